use config::{Config, UiMode};
use device_camera::impl_fake::DeviceCameraFake;
use device_camera::interface::DeviceCamera;
use device_display::impl_console::DeviceDisplayConsole;
use device_display::impl_gui::DeviceDisplayGui;
use device_display::interface::DeviceDisplay;
use image_classifier::impl_fake::ImageClassifierFake;
use image_classifier::interface::ImageClassifier;
use label_loop::main::LabelLoop;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::{Arc, Mutex};
use user_controls::impl_channel::UserControlsChannel;
use user_controls::impl_console::UserControlsConsole;

mod config;
mod device_camera;
mod device_display;
mod image_classifier;
mod label_loop;
mod library;
mod user_controls;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default();

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_camera: Arc<dyn DeviceCamera + Send + Sync> =
        Arc::new(DeviceCameraFake::new(config.camera.clone(), logger.clone()));

    let image_classifier: Arc<Mutex<dyn ImageClassifier + Send>> =
        Arc::new(Mutex::new(ImageClassifierFake::new(
            config.fake_classifier.clone(),
            logger.clone(),
            device_camera.clone(),
        )));

    let _ = logger.info("Setup application");

    match config.ui {
        UiMode::Gui => {
            let device_display = DeviceDisplayGui::new(device_camera.clone());
            let (user_controls, actions) = UserControlsChannel::new();

            let label_loop = LabelLoop::new(
                config,
                logger.clone(),
                device_camera,
                Arc::new(Mutex::new(device_display.clone())),
                image_classifier,
                Arc::new(user_controls),
            );

            let loop_clone = label_loop.clone();
            let handle = std::thread::spawn(move || loop_clone.run());

            // The window must own the main thread.
            device_display.run_window(actions)?;

            label_loop.stop();
            handle
                .join()
                .map_err(|_| "Label loop thread panicked".to_string())??;
        }
        UiMode::Console => {
            let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> =
                Arc::new(Mutex::new(DeviceDisplayConsole::new(24)));

            let label_loop = LabelLoop::new(
                config,
                logger.clone(),
                device_camera,
                device_display,
                image_classifier,
                Arc::new(UserControlsConsole::new(logger.clone())),
            );

            label_loop.run()?;
        }
    }

    let _ = logger.info("Stopped");

    Ok(())
}
