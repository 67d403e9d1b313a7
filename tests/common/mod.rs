#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::io::Cursor;

use rover_photo_check::config::{ApiConfig, CheckConfig};
use rover_photo_check::transport::Transport;
use rover_photo_check::{RoverClient, RoverResult};

pub const BASE_URL: &str = "http://api.test";
pub const API_KEY: &str = "test-key";
pub const MANIFEST_URL: &str = "http://api.test/mars-photos/api/v1/manifests/curiosity";
pub const PHOTOS_URL: &str = "http://api.test/mars-photos/api/v1/rovers/curiosity/photos";

struct Route {
    url: String,
    params: Vec<(String, String)>,
    body: Vec<u8>,
}

/// Serves canned bodies keyed by URL and query parameters (api_key excluded).
#[derive(Default)]
pub struct FakeTransport {
    routes: Vec<Route>,
    pub calls: RefCell<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: &str, params: &[(&str, &str)], body: Vec<u8>) -> Self {
        let mut params: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        params.sort();
        self.routes.push(Route {
            url: url.to_string(),
            params,
            body,
        });
        self
    }

    pub fn json(self, url: &str, params: &[(&str, &str)], body: Value) -> Self {
        self.route(url, params, body.to_string().into_bytes())
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str, query: &[(&str, String)]) -> RoverResult<Vec<u8>> {
        let recorded: Vec<(String, String)> = query
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        self.calls.borrow_mut().push((url.to_string(), recorded.clone()));

        let mut params: Vec<(String, String)> = recorded
            .into_iter()
            .filter(|(k, _)| k != "api_key")
            .collect();
        params.sort();

        let route = self
            .routes
            .iter()
            .find(|r| r.url == url && r.params == params)
            .unwrap_or_else(|| panic!("unexpected request: {} {:?}", url, params));
        Ok(route.body.clone())
    }
}

pub fn api_config() -> ApiConfig {
    ApiConfig {
        api_key: API_KEY.to_string(),
        base_url: format!("{}/", BASE_URL),
        ..ApiConfig::default()
    }
}

pub fn check_config(amount: usize, threshold: usize) -> CheckConfig {
    CheckConfig {
        rover: "curiosity".to_string(),
        sol: 1000,
        amount,
        threshold,
    }
}

pub fn client(transport: FakeTransport) -> RoverClient<FakeTransport> {
    RoverClient::with_transport(transport, &api_config())
}

pub fn photo(id: u32, camera: &str, earth_date: &str) -> Value {
    json!({
        "id": id,
        "sol": 1000,
        "camera": {"id": 20, "name": camera, "rover_id": 5},
        "img_src": img_src(id),
        "earth_date": earth_date,
        "rover": {"id": 5, "name": "Curiosity", "landing_date": "2012-08-06", "status": "active"}
    })
}

pub fn img_src(id: u32) -> String {
    format!("http://img.test/{}.png", id)
}

pub fn photos(records: &[Value]) -> Value {
    json!({ "photos": records })
}

pub fn manifest(days: &[&[&str]]) -> Value {
    let photos: Vec<Value> = days
        .iter()
        .enumerate()
        .map(|(sol, cameras)| json!({"sol": sol, "total_photos": cameras.len(), "cameras": cameras}))
        .collect();
    json!({"photo_manifest": {"name": "Curiosity", "photos": photos}})
}

pub fn png(seed: u8) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_fn(6, 4, |x, y| {
        Rgb([seed, x as u8, y as u8])
    }));
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png).unwrap();
    buffer.into_inner()
}
