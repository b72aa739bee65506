use crate::device_display::interface::DeviceDisplay;
use crate::library::logger::interface::Logger;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Records every write so tests can inspect the display history.
#[derive(Clone)]
pub struct DeviceDisplayFake {
    logger: Arc<dyn Logger + Send + Sync>,
    writes: Arc<Mutex<Vec<String>>>,
    fail_after: Option<usize>,
}

impl DeviceDisplayFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("display").with_namespace("fake"),
            writes: Arc::new(Mutex::new(Vec::new())),
            fail_after: None,
        }
    }

    /// Accepts `writes` writes, then fails every later one.
    pub fn failing_after(logger: Arc<dyn Logger + Send + Sync>, writes: usize) -> Self {
        Self {
            fail_after: Some(writes),
            ..Self::new(logger)
        }
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info("DeviceDisplayFake::init()")?;
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger
            .info(&format!("DeviceDisplayFake::write_text({})", text))?;
        let mut writes = self.writes.lock().unwrap_or_else(|e| e.into_inner());
        if self.fail_after.is_some_and(|limit| writes.len() >= limit) {
            return Err("Display disconnected".into());
        }
        writes.push(text.to_string());
        Ok(())
    }
}
