use log::{debug, warn};
use std::time::Duration;

use crate::error::RoverResult;

/// Upper bound for a single response body (full-size rover photos run a few MB)
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Blocking GET returning the raw response body.
///
/// Non-2xx statuses are not errors here: the API reports failures in the JSON
/// body, so callers decide what a body means.
pub trait Transport {
    fn get(&self, url: &str, query: &[(&str, String)]) -> RoverResult<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, query: &[(&str, String)]) -> RoverResult<Vec<u8>> {
        (**self).get(url, query)
    }
}

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();

        Self {
            agent: config.into(),
        }
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, query: &[(&str, String)]) -> RoverResult<Vec<u8>> {
        debug!("GET {}", redacted_url(url, query));

        let mut request = self.agent.get(url);
        for (key, value) in query {
            request = request.query(*key, value.as_str());
        }

        let mut response = request.call()?;
        if !response.status().is_success() {
            warn!("{} returned HTTP {}", url, response.status());
        }

        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_vec()?;
        Ok(body)
    }
}

/// URL with its query string for diagnostics, `api_key` masked.
pub fn redacted_url(url: &str, query: &[(&str, String)]) -> String {
    if query.is_empty() {
        return url.to_string();
    }

    let params: Vec<String> = query
        .iter()
        .map(|(key, value)| {
            if *key == "api_key" {
                format!("{}=***", key)
            } else {
                format!("{}={}", key, value)
            }
        })
        .collect();
    format!("{}?{}", url, params.join("&"))
}
