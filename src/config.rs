use chrono::Offset;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClassifyErrorPolicy {
    /// Stop classifying after the first error. The display keeps the last prediction.
    Halt,
    /// Log the error and classify the next frame after the delay.
    #[allow(dead_code)]
    RetryAfter(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiMode {
    Gui,
    #[allow(dead_code)]
    Console,
}

#[derive(Debug, Clone)]
pub struct CameraConfig {
    pub resolution_width: u32,
    pub resolution_height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            resolution_width: 224,
            resolution_height: 224,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FakeClassifierConfig {
    pub load_delay: Duration,
    pub epochs: usize,
    pub epoch_delay: Duration,
    pub classify_delay: Duration,
}

impl Default for FakeClassifierConfig {
    fn default() -> Self {
        Self {
            load_delay: Duration::from_millis(500),
            epochs: 10,
            epoch_delay: Duration::from_millis(200),
            classify_delay: Duration::from_millis(100),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub logger_timezone: chrono::FixedOffset,
    pub classify_interval: Duration,
    pub on_classify_error: ClassifyErrorPolicy,
    pub confidence_decimals: Option<usize>,
    pub ui: UiMode,
    pub camera: CameraConfig,
    pub fake_classifier: FakeClassifierConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_timezone: utc(),
            classify_interval: Duration::ZERO,
            on_classify_error: ClassifyErrorPolicy::Halt,
            confidence_decimals: None,
            ui: UiMode::Gui,
            camera: CameraConfig::default(),
            fake_classifier: FakeClassifierConfig::default(),
        }
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::Utc.fix()
}
