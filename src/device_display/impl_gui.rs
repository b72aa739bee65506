use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::image_classifier::interface::ClassTag;
use crate::user_controls::interface::UserAction;
use eframe::egui;
use image::DynamicImage;
use std::error::Error;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn frame_to_color_image(frame: &DynamicImage) -> egui::ColorImage {
    let rgb = frame.to_rgb8();
    egui::ColorImage::from_rgb(
        [rgb.width() as usize, rgb.height() as usize],
        rgb.as_raw(),
    )
}

struct DisplayWindow {
    text: Arc<Mutex<String>>,
    actions: Sender<UserAction>,
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    video: Option<egui::TextureHandle>,
}

impl DisplayWindow {
    fn refresh_video(&mut self, ctx: &egui::Context) {
        // Before the camera starts there is simply no frame to show.
        let Ok(frame) = self.device_camera.capture_frame() else {
            return;
        };
        let image = frame_to_color_image(&frame);
        if let Some(texture) = self.video.as_mut() {
            texture.set(image, egui::TextureOptions::default());
            return;
        }
        self.video = Some(ctx.load_texture("video", image, egui::TextureOptions::default()));
    }
}

impl eframe::App for DisplayWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let text = self.text.lock().unwrap_or_else(|e| e.into_inner()).clone();
        self.refresh_video(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                if let Some(texture) = &self.video {
                    ui.add(egui::Image::new(egui::load::SizedTexture::new(
                        texture.id(),
                        texture.size_vec2(),
                    )));
                }
                ui.add_space(20.0);
                ui.label(egui::RichText::new(text).monospace().size(28.0));
                ui.add_space(20.0);

                ui.horizontal(|ui| {
                    for tag in ClassTag::ALL {
                        if ui.button(tag.as_str()).clicked() {
                            let _ = self.actions.send(UserAction::AddExample(tag));
                        }
                    }
                    if ui.button("Train").clicked() {
                        let _ = self.actions.send(UserAction::BeginTraining);
                    }
                });
            });
        });

        // Predictions arrive from another thread.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

/// Live video, prediction label and the Duck, Pen and Train buttons in a native window.
#[derive(Clone)]
pub struct DeviceDisplayGui {
    text: Arc<Mutex<String>>,
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
}

impl DeviceDisplayGui {
    pub fn new(device_camera: Arc<dyn DeviceCamera + Send + Sync>) -> Self {
        Self {
            text: Arc::new(Mutex::new(String::new())),
            device_camera,
        }
    }

    /// Blocks the calling thread until the window is closed. Dropping the window
    /// drops `actions`, which disconnects the user controls.
    pub fn run_window(
        &self,
        actions: Sender<UserAction>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([400.0, 420.0])
                .with_resizable(false),
            ..Default::default()
        };

        let window = DisplayWindow {
            text: self.text.clone(),
            actions,
            device_camera: self.device_camera.clone(),
            video: None,
        };

        eframe::run_native("Webcam Trainer", options, Box::new(|_cc| Box::new(window)))
            .map_err(|e| e.to_string().into())
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.text.lock().unwrap_or_else(|e| e.into_inner()).clear();
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        *self.text.lock().unwrap_or_else(|e| e.into_inner()) = text.to_string();
        Ok(())
    }
}
