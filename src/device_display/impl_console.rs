use crate::device_display::interface::DeviceDisplay;
use std::error::Error;

pub struct DeviceDisplayConsole {
    width: usize,
    text: String,
}

impl DeviceDisplayConsole {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            text: String::new(),
        }
    }

    fn render_display(&self) -> String {
        let border = "─".repeat(self.width);
        let text: String = self.text.chars().take(self.width).collect();
        format!(
            "┌{}┐\n│{:<width$}│\n└{}┘",
            border,
            text,
            border,
            width = self.width
        )
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.text.clear();
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.text = text.to_string();
        println!("{}", self.render_display());
        Ok(())
    }
}
