use crate::config::CameraConfig;
use crate::device_camera::interface::DeviceCamera;
use crate::library::logger::interface::Logger;
use image::{DynamicImage, Rgb, RgbImage};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct DeviceCameraFake {
    config: CameraConfig,
    logger: Arc<dyn Logger + Send + Sync>,
    started: AtomicBool,
}

impl DeviceCameraFake {
    pub fn new(config: CameraConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            config,
            logger: logger.with_namespace("camera").with_namespace("fake"),
            started: AtomicBool::new(false),
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Starting camera...")?;
        self.started.store(true, Ordering::SeqCst);
        self.logger.info("Camera started")?;
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Stopping camera...")?;
        self.started.store(false, Ordering::SeqCst);
        self.logger.info("Camera stopped")?;
        Ok(())
    }

    fn capture_frame(&self) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
        if !self.started.load(Ordering::SeqCst) {
            return Err("Camera not started".into());
        }

        let mut rng = rand::rng();
        let frame = RgbImage::from_fn(
            self.config.resolution_width,
            self.config.resolution_height,
            |_, _| Rgb([rng.random(), rng.random(), rng.random()]),
        );

        Ok(DynamicImage::ImageRgb8(frame))
    }
}
