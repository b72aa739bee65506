use crate::label_loop::core::{init, transition, Effect, Model, State};
use crate::label_loop::main::LabelLoop;
use crate::label_loop::render::Render;
use std::sync::mpsc::{channel, Sender};
use std::time::Duration;

impl LabelLoop {
    /// Processes messages until the loop is stopped. The camera is stopped on every exit.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.run_loop();

        if let Err(e) = self.device_camera.stop() {
            let _ = self.logger.error(&format!("Failed to stop camera: {}", e));
        }

        result
    }

    fn run_loop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut render = Render::new(self.device_display.clone(), self.config.clone());
        render.init()?;

        let classifier_jobs = self.spawn_classifier_worker();

        let (mut current_model, effects) = init();
        self.set_model(current_model.clone());
        self.execute_effects(effects, &classifier_jobs);

        let receiver = self.msg_receiver.lock().unwrap_or_else(|e| e.into_inner());

        while current_model.state != State::Stopped {
            let msg = receiver.recv()?;

            let was_stalled = matches!(current_model.state, State::Stalled { .. });

            let _ = self.logger.info(&format!(
                "\nold model:\n\t{:?}\n\nmsg:\n\t{:?}",
                current_model, msg,
            ));

            let (new_model, effects) = transition(&self.config, current_model, msg);

            let _ = self.logger.info(&format!(
                "\nnew model:\n\t{:?}\n\neffects:\n\t{:?}",
                new_model, effects
            ));

            if let State::Stalled { reason, .. } = &new_model.state {
                if !was_stalled {
                    let _ = self
                        .logger
                        .error(&format!("Classification halted: {}", reason));
                }
            }

            current_model = new_model;
            self.set_model(current_model.clone());

            render.render(&current_model)?;

            self.execute_effects(effects, &classifier_jobs);
        }

        Ok(())
    }

    fn set_model(&self, model: Model) {
        *self.model.lock().unwrap_or_else(|e| e.into_inner()) = model;
    }

    fn spawn_classifier_worker(&self) -> Sender<Effect> {
        let (job_sender, job_receiver) = channel::<Effect>();
        let self_clone = self.clone();

        std::thread::spawn(move || {
            for effect in job_receiver {
                self_clone.execute_effect(effect);
            }
        });

        job_sender
    }

    fn execute_effects(&self, effects: Vec<Effect>, classifier_jobs: &Sender<Effect>) {
        for effect in effects {
            match effect {
                // Wait off the classifier worker so queued labels and training are not held up.
                Effect::ClassifyFrame {
                    training_run,
                    delay,
                } if !delay.is_zero() => {
                    let classifier_jobs = classifier_jobs.clone();
                    let model = self.model.clone();
                    std::thread::spawn(move || {
                        std::thread::sleep(delay);
                        let current = model.lock().unwrap_or_else(|e| e.into_inner()).clone();
                        if current.state == State::Stopped || current.training_run != training_run {
                            return;
                        }
                        let _ = classifier_jobs.send(Effect::ClassifyFrame {
                            training_run,
                            delay: Duration::ZERO,
                        });
                    });
                }
                effect if effect.uses_classifier() => {
                    if classifier_jobs.send(effect).is_err() {
                        let _ = self.logger.error("Classifier worker is gone");
                    }
                }
                effect => {
                    let self_clone = self.clone();
                    std::thread::spawn(move || self_clone.execute_effect(effect));
                }
            }
        }
    }
}
