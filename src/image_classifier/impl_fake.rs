use crate::config::FakeClassifierConfig;
use crate::device_camera::interface::DeviceCamera;
use crate::image_classifier::interface::{
    ClassTag, Classification, ImageClassifier, TrainingEvent,
};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use rand::distr::{Distribution, Uniform};
use std::sync::Arc;

struct Example {
    tag: ClassTag,
    #[allow(dead_code)]
    frame: DynamicImage,
}

/// Stands in for a pretrained extractor. Training only simulates a falling loss and
/// classification draws random confidences over the trained classes.
pub struct ImageClassifierFake {
    config: FakeClassifierConfig,
    logger: Arc<dyn Logger + Send + Sync>,
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    loaded: bool,
    examples: Vec<Example>,
    trained_tags: Vec<ClassTag>,
}

impl ImageClassifierFake {
    pub fn new(
        config: FakeClassifierConfig,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            device_camera,
            loaded: false,
            examples: Vec::new(),
            trained_tags: Vec::new(),
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn load(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Loading feature extractor...")?;
        std::thread::sleep(self.config.load_delay);
        self.loaded = true;
        self.logger.info("Feature extractor loaded")?;
        Ok(())
    }

    fn add_image(&mut self, tag: ClassTag) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if !self.loaded {
            return Err("Feature extractor not loaded".into());
        }
        let frame = self.device_camera.capture_frame()?;
        self.examples.push(Example { tag, frame });
        Ok(())
    }

    fn train(
        &mut self,
        on_progress: &mut dyn FnMut(TrainingEvent),
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut tags: Vec<ClassTag> = Vec::new();
        for example in &self.examples {
            if !tags.contains(&example.tag) {
                tags.push(example.tag);
            }
        }

        self.logger.info(&format!(
            "Training on {} examples across {} classes",
            self.examples.len(),
            tags.len()
        ))?;

        if !self.examples.is_empty() {
            for epoch in 0..self.config.epochs {
                std::thread::sleep(self.config.epoch_delay);
                on_progress(TrainingEvent::Loss(1.0 / (epoch as f32 + 1.0)));
            }
        }

        self.trained_tags = tags;
        on_progress(TrainingEvent::Done);
        Ok(())
    }

    fn classify(&mut self) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        if self.trained_tags.is_empty() {
            return Err("Model not trained".into());
        }
        let _frame = self.device_camera.capture_frame()?;
        std::thread::sleep(self.config.classify_delay);

        let mut rng = rand::rng();
        let score_dist = Uniform::new(0.0f32, 1.0)?;

        let scores: Vec<f32> = self
            .trained_tags
            .iter()
            .map(|_| score_dist.sample(&mut rng))
            .collect();
        let total: f32 = scores.iter().sum::<f32>().max(f32::EPSILON);

        let mut classifications: Vec<Classification> = self
            .trained_tags
            .iter()
            .zip(scores)
            .map(|(tag, score)| Classification {
                label: tag.to_string(),
                confidence: (score / total).min(1.0),
            })
            .collect();

        classifications.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        Ok(classifications)
    }
}
