use image::DynamicImage;
use log::debug;

use crate::error::{RoverError, RoverResult};
use crate::transport::Transport;

/// Decoded image as a height x width x channels grid of samples.
///
/// Samples are widened to 16 bits so 8- and 16-bit sources share one
/// representation; the channel layout of the source is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    channels: u8,
    samples: Vec<u16>,
}

impl PixelGrid {
    pub fn from_image(image: &DynamicImage) -> Self {
        let channels = image.color().channel_count();
        let samples = match channels {
            1 => image.to_luma16().into_raw(),
            2 => image.to_luma_alpha16().into_raw(),
            3 => image.to_rgb16().into_raw(),
            _ => image.to_rgba16().into_raw(),
        };

        Self {
            width: image.width(),
            height: image.height(),
            channels,
            samples,
        }
    }

    pub fn decode(bytes: &[u8]) -> RoverResult<Self> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::from_image(&image))
    }

    /// (width, height, channels)
    pub fn shape(&self) -> (u32, u32, u8) {
        (self.width, self.height, self.channels)
    }

    pub fn samples(&self) -> &[u16] {
        &self.samples
    }
}

/// Downloads `url` and decodes the body as an image.
pub fn fetch_image<T: Transport>(transport: &T, url: &str) -> RoverResult<PixelGrid> {
    let bytes = transport.get(url, &[])?;
    debug!("Fetched {} bytes from {}", bytes.len(), url);
    PixelGrid::decode(&bytes)
}

/// True when the sum of absolute sample differences is zero.
///
/// Grids of different shape are an error, not a mismatch.
pub fn images_equal(a: &PixelGrid, b: &PixelGrid) -> RoverResult<bool> {
    if a.shape() != b.shape() {
        return Err(RoverError::ShapeMismatch {
            left: a.shape(),
            right: b.shape(),
        });
    }

    let total_diff: u64 = a
        .samples
        .iter()
        .zip(&b.samples)
        .map(|(&x, &y)| u64::from(x.abs_diff(y)))
        .sum();
    Ok(total_diff == 0)
}
