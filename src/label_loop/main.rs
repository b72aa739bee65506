use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::image_classifier::interface::ImageClassifier;
use crate::label_loop::core::{Model, Msg};
use crate::library::logger::interface::Logger;
use crate::user_controls::interface::UserControls;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Owns the collaborators of one labeling session and the message channel that drives it.
#[derive(Clone)]
pub struct LabelLoop {
    pub model: Arc<Mutex<Model>>,
    pub msg_sender: Sender<Msg>,
    pub msg_receiver: Arc<Mutex<Receiver<Msg>>>,
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    pub image_classifier: Arc<Mutex<dyn ImageClassifier + Send>>,
    pub user_controls: Arc<dyn UserControls + Send + Sync>,
}

impl LabelLoop {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        image_classifier: Arc<Mutex<dyn ImageClassifier + Send>>,
        user_controls: Arc<dyn UserControls + Send + Sync>,
    ) -> Self {
        let (msg_sender, msg_receiver) = channel();

        Self {
            model: Arc::new(Mutex::new(Model::default())),
            msg_sender,
            msg_receiver: Arc::new(Mutex::new(msg_receiver)),
            config,
            logger: logger.with_namespace("label_loop"),
            device_camera,
            device_display,
            image_classifier,
            user_controls,
        }
    }

    pub fn send(&self, msg: Msg) {
        if self.msg_sender.send(msg).is_err() {
            let _ = self.logger.error("Message dropped, loop is gone");
        }
    }

    pub fn stop(&self) {
        self.send(Msg::Stop);
    }

    #[cfg(test)]
    pub fn model(&self) -> Model {
        self.model.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
