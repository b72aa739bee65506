use std::error::Error;

/// A single line of text shown to the user.
pub trait DeviceDisplay: Send + Sync {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Replace the displayed text.
    fn write_text(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
}
