// SPDX-License-Identifier: GPL-3.0-only

//! Camera session and capture types

use super::CameraDevice;
use crate::errors::CameraError;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub type CameraResult<T> = Result<T, CameraError>;

/// A still picture written by the camera
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPicture {
    /// `file://` URI of the written image
    pub uri: String,
    pub width: u32,
    pub height: u32,
}

/// Opaque reference to a captured photo, kept for the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPhoto {
    pub uri: String,
}

impl From<CapturedPicture> for CapturedPhoto {
    fn from(picture: CapturedPicture) -> Self {
        Self { uri: picture.uri }
    }
}

struct CameraSession {
    id: Uuid,
    device: Box<dyn CameraDevice>,
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        info!(session = %self.id, device = %self.device.name(), "Releasing camera");
        self.device.release();
    }
}

/// Shared handle to an open camera session
///
/// Cloning is cheap. The device is released when the last clone is dropped,
/// so an in-flight capture keeps the session alive until it finishes.
#[derive(Clone)]
pub struct CameraHandle {
    session: Arc<CameraSession>,
}

impl CameraHandle {
    pub fn new(device: Box<dyn CameraDevice>) -> Self {
        let id = Uuid::new_v4();
        info!(session = %id, device = %device.name(), "Camera session opened");
        Self {
            session: Arc::new(CameraSession { id, device }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.session.id
    }

    pub fn device_name(&self) -> &str {
        self.session.device.name()
    }

    pub async fn take_picture(&self) -> CameraResult<CapturedPicture> {
        self.session.device.take_picture().await
    }
}

impl std::fmt::Debug for CameraHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraHandle")
            .field("session", &self.session.id)
            .field("device", &self.session.device.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingDevice {
        releases: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CameraDevice for CountingDevice {
        fn name(&self) -> &str {
            "counting"
        }

        async fn take_picture(&self) -> CameraResult<CapturedPicture> {
            Err(CameraError::CaptureFailed("no sensor".into()))
        }

        fn release(&self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_release_happens_once_after_last_clone() {
        let releases = Arc::new(AtomicUsize::new(0));
        let handle = CameraHandle::new(Box::new(CountingDevice {
            releases: Arc::clone(&releases),
        }));
        let in_flight = handle.clone();

        drop(handle);
        assert_eq!(releases.load(Ordering::SeqCst), 0);

        drop(in_flight);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }
}
