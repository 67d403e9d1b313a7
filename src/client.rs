use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeSet;

use crate::api_types::{ManifestResponse, PhotoRecord, PhotosResponse};
use crate::config::ApiConfig;
use crate::distribution::{self, CameraDistribution};
use crate::error::{RoverError, RoverResult};
use crate::images::{self, PixelGrid};
use crate::query::PhotoQuery;
use crate::transport::{redacted_url, Transport, UreqTransport};

const MANIFESTS_PATH: &str = "/mars-photos/api/v1/manifests";
const ROVERS_PATH: &str = "/mars-photos/api/v1/rovers";

/// Client for the rover photo API.
///
/// Every call goes to the network; nothing is cached between calls.
pub struct RoverClient<T: Transport = UreqTransport> {
    transport: T,
    base_url: String,
    api_key: String,
}

impl RoverClient<UreqTransport> {
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_transport(UreqTransport::new(config.timeout), config)
    }
}

impl<T: Transport> RoverClient<T> {
    pub fn with_transport(transport: T, config: &ApiConfig) -> Self {
        Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Distinct cameras that took photos on any sol, per the rover's manifest.
    pub fn list_cameras(&self, rover: &str) -> RoverResult<BTreeSet<String>> {
        let url = format!("{}{}/{}", self.base_url, MANIFESTS_PATH, rover);
        let manifest: ManifestResponse = self.request(&url, Vec::new())?;

        Ok(manifest
            .photo_manifest
            .photos
            .into_iter()
            .flat_map(|day| day.cameras)
            .collect())
    }

    pub fn list_photos(&self, rover: &str, query: &PhotoQuery) -> RoverResult<Vec<PhotoRecord>> {
        let url = format!("{}{}/{}/photos", self.base_url, ROVERS_PATH, rover);
        let response: PhotosResponse = self.request(&url, query.to_params())?;
        Ok(response.photos)
    }

    /// Photo count per manifest camera, one request per camera.
    pub fn camera_distribution(&self, rover: &str, sol: u32) -> RoverResult<CameraDistribution> {
        let mut distribution = CameraDistribution::new();
        for camera in self.list_cameras(rover)? {
            let query = PhotoQuery::by_sol(sol).with_camera(camera.as_str());
            let count = self.list_photos(rover, &query)?.len();
            debug!("{} sol {}: {} photos by {}", rover, sol, count, camera);
            distribution.insert(camera, count);
        }
        Ok(distribution)
    }

    /// Photo count per camera computed from an already fetched listing,
    /// with manifest cameras that took no photos filled in as zero.
    pub fn camera_distribution_brute_force(
        &self,
        all_photos_for_sol: &[PhotoRecord],
        rover: &str,
    ) -> RoverResult<CameraDistribution> {
        let mut counts = distribution::tally_cameras(all_photos_for_sol)?;
        distribution::zero_fill(&mut counts, &self.list_cameras(rover)?);
        Ok(counts)
    }

    pub fn fetch_image(&self, url: &str) -> RoverResult<PixelGrid> {
        images::fetch_image(&self.transport, url)
    }

    fn request<R: DeserializeOwned>(
        &self,
        url: &str,
        mut params: Vec<(&str, String)>,
    ) -> RoverResult<R> {
        params.push(("api_key", self.api_key.clone()));

        let body = self.transport.get(url, &params)?;
        let data: Value = serde_json::from_slice(&body)?;

        if let Some(errors) = data.get("errors") {
            return Err(RoverError::Api {
                url: redacted_url(url, &params),
                errors: errors.clone(),
            });
        }

        serde_json::from_value(data).map_err(|e| {
            RoverError::MalformedResponse(format!("{}: {}", redacted_url(url, &params), e))
        })
    }
}
