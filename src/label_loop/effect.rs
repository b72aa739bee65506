use crate::image_classifier::interface::{ImageClassifier, TrainingEvent};
use crate::label_loop::core::{Effect, Msg};
use crate::label_loop::main::LabelLoop;
use std::sync::MutexGuard;

impl LabelLoop {
    pub fn execute_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::StartCamera => {
                let started = self.device_camera.start();
                if let Err(e) = &started {
                    let _ = self.logger.error(&format!("Failed to start camera: {}", e));
                }
                self.send(Msg::CameraStartDone(started));
            }
            Effect::LoadExtractor => {
                let loaded = self.lock_classifier().load();
                match &loaded {
                    Ok(()) => {
                        let _ = self.logger.info("Model is ready to make predictions");
                    }
                    Err(e) => {
                        let _ = self.logger.error(&format!("Failed to load model: {}", e));
                    }
                }
                self.send(Msg::ExtractorReady(loaded));
            }
            Effect::SubscribeUserControls => {
                let events = self.user_controls.events();
                for action in events.iter() {
                    if self.msg_sender.send(Msg::UserAction(action)).is_err() {
                        return;
                    }
                }
                let _ = self.logger.info("User controls closed");
                self.send(Msg::Stop);
            }
            Effect::AddExample(tag) => {
                let added = self.lock_classifier().add_image(tag);
                match &added {
                    Ok(()) => {
                        let _ = self.logger.info(&format!("Added {}", tag));
                    }
                    Err(e) => {
                        let _ = self
                            .logger
                            .error(&format!("Failed to add {} example: {}", tag, e));
                    }
                }
                self.send(Msg::ExampleAdded(tag, added));
            }
            Effect::Train => {
                let _ = self.logger.info("Begin training");
                let mut done = false;
                let trained = self.lock_classifier().train(&mut |event| match event {
                    TrainingEvent::Loss(loss) => {
                        let _ = self.logger.info(&format!("Loss: {}", loss));
                        self.send(Msg::TrainingLoss(loss));
                    }
                    TrainingEvent::Done => {
                        done = true;
                        let _ = self.logger.info("Training complete");
                        self.send(Msg::TrainingDone(Ok(())));
                    }
                });
                match trained {
                    Err(e) if !done => {
                        let _ = self.logger.error(&format!("Training failed: {}", e));
                        self.send(Msg::TrainingDone(Err(e)));
                    }
                    Err(e) => {
                        let _ = self
                            .logger
                            .error(&format!("Training failed after completing: {}", e));
                    }
                    Ok(()) if !done => {
                        let _ = self
                            .logger
                            .error("Training returned without a completion signal");
                        self.send(Msg::TrainingDone(Err(
                            "training returned without a completion signal".into(),
                        )));
                    }
                    Ok(()) => {}
                }
            }
            Effect::RejectTraining => {
                let _ = self
                    .logger
                    .info("Training already in progress, request ignored");
            }
            Effect::ClassifyFrame { training_run, .. } => {
                let result = self.lock_classifier().classify();
                if let Err(e) = &result {
                    let _ = self.logger.error(&format!("Classification failed: {}", e));
                }
                self.send(Msg::ClassifyDone {
                    training_run,
                    result,
                });
            }
        }
    }

    fn lock_classifier(&self) -> MutexGuard<'_, dyn ImageClassifier + Send + 'static> {
        self.image_classifier
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }
}
