use crate::config::Config;
use crate::device_display::interface::DeviceDisplay;
use crate::label_loop::core::{Model, State};
use std::sync::{Arc, Mutex};

pub const PLACEHOLDER_TEXT: &str = "Prediction";

/// Writes to the display once per new prediction and never otherwise.
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    config: Config,
    last_rendered: Option<(u64, u64)>,
}

impl Render {
    pub fn new(device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>, config: Config) -> Self {
        Self {
            device_display,
            config,
            last_rendered: None,
        }
    }

    pub fn init(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut device_display = self.device_display.lock().unwrap_or_else(|e| e.into_inner());
        device_display.init()?;
        device_display.write_text(PLACEHOLDER_TEXT)?;
        Ok(())
    }

    pub fn render(&mut self, model: &Model) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let State::Classifying {
            prediction: Some(prediction),
            frames_classified,
        } = &model.state
        {
            let key = (model.training_run, *frames_classified);
            if self.last_rendered == Some(key) {
                return Ok(());
            }
            self.last_rendered = Some(key);

            let text = prediction.to_display_string(self.config.confidence_decimals);
            self.device_display
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .write_text(&text)?;
        }

        Ok(())
    }
}
