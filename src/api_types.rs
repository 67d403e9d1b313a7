use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RoverError, RoverResult};

/// One photo as returned by the photo-listing endpoint.
///
/// Kept as raw JSON so that listings fetched through different query modes can
/// be compared field for field, including fields this crate never reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoRecord(pub Value);

impl PhotoRecord {
    pub fn img_src(&self) -> RoverResult<&str> {
        self.str_at(&["img_src"])
    }

    pub fn camera_name(&self) -> RoverResult<&str> {
        self.str_at(&["camera", "name"])
    }

    pub fn earth_date(&self) -> RoverResult<&str> {
        self.str_at(&["earth_date"])
    }

    pub fn landing_date(&self) -> RoverResult<&str> {
        self.str_at(&["rover", "landing_date"])
    }

    fn str_at(&self, path: &[&str]) -> RoverResult<&str> {
        let mut node = &self.0;
        for key in path {
            node = node.get(key).ok_or_else(|| missing(path))?;
        }
        node.as_str().ok_or_else(|| missing(path))
    }
}

fn missing(path: &[&str]) -> RoverError {
    RoverError::MalformedResponse(format!("photo has no string field '{}'", path.join(".")))
}

#[derive(Debug, Deserialize)]
pub struct PhotosResponse {
    pub photos: Vec<PhotoRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ManifestResponse {
    pub photo_manifest: PhotoManifest,
}

#[derive(Debug, Deserialize)]
pub struct PhotoManifest {
    pub photos: Vec<ManifestDay>,
}

/// Per-sol manifest entry; only the camera list is used
#[derive(Debug, Deserialize)]
pub struct ManifestDay {
    #[serde(default)]
    pub cameras: Vec<String>,
}

/// `rover.landing_date` of the first photo in a listing.
pub fn landing_date_of(photos: &[PhotoRecord]) -> RoverResult<&str> {
    first(photos)?.landing_date()
}

/// `earth_date` of the first photo in a listing.
pub fn earth_date_of(photos: &[PhotoRecord]) -> RoverResult<&str> {
    first(photos)?.earth_date()
}

fn first(photos: &[PhotoRecord]) -> RoverResult<&PhotoRecord> {
    photos
        .first()
        .ok_or_else(|| RoverError::MalformedResponse("photo listing is empty".to_string()))
}
