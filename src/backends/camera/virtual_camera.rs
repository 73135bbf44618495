// SPDX-License-Identifier: GPL-3.0-only

//! Virtual camera backend
//!
//! Stands in for a hardware camera. Each capture renders a color-bar test
//! pattern and writes it as a JPEG into the photo directory, returning its
//! `file://` URI just like a platform still-capture would.

use super::{CameraBackendType, CameraDevice, CameraProvider, CameraResult, CapturedPicture};
use crate::backends::{Capability, PermissionPolicy, PermissionPrompter, PermissionResponse};
use crate::config::Config;
use crate::constants::PHOTO_JPEG_QUALITY;
use crate::errors::CameraError;
use crate::storage;
use async_trait::async_trait;
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, info};

/// SMPTE-style bar colors, left to right
const BARS: [[u8; 3]; 7] = [
    [192, 192, 192],
    [192, 192, 0],
    [0, 192, 192],
    [0, 192, 0],
    [192, 0, 192],
    [192, 0, 0],
    [0, 0, 192],
];

/// Virtual camera provider
pub struct VirtualCamera {
    policy: PermissionPolicy,
    prompter: PermissionPrompter,
    output_dir: PathBuf,
    width: u32,
    height: u32,
}

impl VirtualCamera {
    pub fn new(
        policy: PermissionPolicy,
        prompter: PermissionPrompter,
        output_dir: PathBuf,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            policy,
            prompter,
            output_dir,
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn from_config(config: &Config, prompter: PermissionPrompter) -> Self {
        Self::new(
            config.camera_permission,
            prompter,
            config.photo_directory(),
            config.capture_width,
            config.capture_height,
        )
    }
}

#[async_trait]
impl CameraProvider for VirtualCamera {
    async fn request_permission(&self) -> PermissionResponse {
        self.prompter.resolve(self.policy, Capability::Camera).await
    }

    async fn open(&self) -> CameraResult<Box<dyn CameraDevice>> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| {
                CameraError::InitializationFailed(format!(
                    "cannot create {}: {}",
                    self.output_dir.display(),
                    e
                ))
            })?;

        info!(
            dir = %self.output_dir.display(),
            width = self.width,
            height = self.height,
            "Virtual camera opened"
        );
        Ok(Box::new(VirtualCameraDevice {
            output_dir: self.output_dir.clone(),
            width: self.width,
            height: self.height,
            shots: AtomicU32::new(0),
        }))
    }

    fn backend_type(&self) -> CameraBackendType {
        CameraBackendType::Virtual
    }
}

struct VirtualCameraDevice {
    output_dir: PathBuf,
    width: u32,
    height: u32,
    shots: AtomicU32,
}

#[async_trait]
impl CameraDevice for VirtualCameraDevice {
    fn name(&self) -> &str {
        "Virtual Camera"
    }

    async fn take_picture(&self) -> CameraResult<CapturedPicture> {
        let shot = self.shots.fetch_add(1, Ordering::Relaxed);
        let path = self
            .output_dir
            .join(storage::photo_file_name(chrono::Local::now()));
        let (width, height) = (self.width, self.height);

        let save_path = path.clone();
        tokio::task::spawn_blocking(move || {
            let image = render_test_pattern(width, height, shot);
            save_jpeg(&image, &save_path)
        })
        .await
        .map_err(|e| CameraError::CaptureFailed(e.to_string()))??;

        info!(path = %path.display(), shot, "Picture captured");
        Ok(CapturedPicture {
            uri: storage::file_uri(&path),
            width,
            height,
        })
    }

    fn release(&self) {
        debug!(
            shots = self.shots.load(Ordering::Relaxed),
            "Virtual camera released"
        );
    }
}

/// Color bars over a gray ramp; the ramp shifts with `shot` so consecutive
/// pictures differ.
pub fn render_test_pattern(width: u32, height: u32, shot: u32) -> RgbImage {
    let bar_height = height * 2 / 3;
    let bar_width = width.div_ceil(BARS.len() as u32).max(1);
    let shift = shot.wrapping_mul(37);

    RgbImage::from_fn(width, height, |x, y| {
        if y < bar_height {
            let bar = ((x / bar_width) as usize).min(BARS.len() - 1);
            Rgb(BARS[bar])
        } else {
            let level = ((x.wrapping_add(shift) % width) * 255 / width.max(1)) as u8;
            Rgb([level, level, level])
        }
    })
}

fn save_jpeg(image: &RgbImage, path: &Path) -> CameraResult<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, PHOTO_JPEG_QUALITY)
        .encode_image(image)
        .map_err(|e| CameraError::SaveFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_has_requested_size() {
        let image = render_test_pattern(64, 48, 0);
        assert_eq!(image.dimensions(), (64, 48));
        assert_eq!(image.get_pixel(0, 0), &Rgb(BARS[0]));
        assert_eq!(image.get_pixel(63, 0), &Rgb(BARS[6]));
    }

    #[test]
    fn test_pattern_ramp_moves_between_shots() {
        let first = render_test_pattern(64, 48, 0);
        let second = render_test_pattern(64, 48, 1);
        assert_eq!(first.get_pixel(10, 10), second.get_pixel(10, 10));
        assert_ne!(first.get_pixel(10, 47), second.get_pixel(10, 47));
    }

    #[tokio::test]
    async fn test_capture_writes_jpeg_and_returns_file_uri() {
        let dir = std::env::temp_dir().join(format!("camloc-vcam-{}", uuid::Uuid::new_v4()));
        let camera = VirtualCamera::new(
            PermissionPolicy::Grant,
            PermissionPrompter::disconnected(),
            dir.clone(),
            32,
            24,
        );

        assert_eq!(
            camera.request_permission().await,
            PermissionResponse::Granted
        );
        let device = camera.open().await.unwrap();
        let picture = device.take_picture().await.unwrap();

        assert!(picture.uri.starts_with("file://"));
        assert_eq!((picture.width, picture.height), (32, 24));
        let path = storage::path_from_uri(&picture.uri).unwrap();
        assert!(path.exists());
        assert_eq!(image::image_dimensions(&path).unwrap(), (32, 24));

        let _ = std::fs::remove_dir_all(dir);
    }
}
