use std::collections::{BTreeMap, BTreeSet};

use crate::api_types::PhotoRecord;
use crate::error::{RoverError, RoverResult};

/// Camera name -> number of photos it took
pub type CameraDistribution = BTreeMap<String, usize>;

/// Counts photos per `camera.name`.
pub fn tally_cameras(photos: &[PhotoRecord]) -> RoverResult<CameraDistribution> {
    let mut counts = CameraDistribution::new();
    for photo in photos {
        *counts.entry(photo.camera_name()?.to_string()).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Adds a zero count for every known camera. Existing counts are untouched and
/// names are compared verbatim.
pub fn zero_fill(counts: &mut CameraDistribution, cameras: &BTreeSet<String>) {
    for camera in cameras {
        counts.entry(camera.clone()).or_insert(0);
    }
}

/// Cameras whose count is at most `1 / threshold` of the busiest camera.
pub fn low_distribution_cameras(
    distribution: &CameraDistribution,
    threshold: usize,
) -> RoverResult<CameraDistribution> {
    let max_count = *distribution
        .values()
        .max()
        .ok_or(RoverError::EmptyDistribution)?;

    Ok(distribution
        .iter()
        .filter(|(_, &count)| {
            count
                .checked_mul(threshold)
                .is_some_and(|scaled| scaled <= max_count)
        })
        .map(|(camera, &count)| (camera.clone(), count))
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountMismatch {
    pub camera: String,
    pub left: usize,
    pub right: usize,
}

/// Cameras present in both distributions whose counts disagree.
pub fn count_mismatches(
    left: &CameraDistribution,
    right: &CameraDistribution,
) -> Vec<CountMismatch> {
    left.iter()
        .filter_map(|(camera, &left_count)| {
            let &right_count = right.get(camera)?;
            (left_count != right_count).then(|| CountMismatch {
                camera: camera.clone(),
                left: left_count,
                right: right_count,
            })
        })
        .collect()
}
