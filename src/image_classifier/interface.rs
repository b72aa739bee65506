use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassTag {
    Duck,
    Pen,
}

impl ClassTag {
    pub const ALL: [ClassTag; 2] = [ClassTag::Duck, ClassTag::Pen];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassTag::Duck => "Duck",
            ClassTag::Pen => "Pen",
        }
    }
}

impl fmt::Display for ClassTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrainingEvent {
    Loss(f32),
    Done,
}

/// A frozen feature extractor with a trainable classifier head, bound to one frame source.
///
/// `train` reports zero or more `TrainingEvent::Loss` values and then exactly one
/// `TrainingEvent::Done` when it succeeds. `classify` returns candidates sorted by
/// descending confidence.
pub trait ImageClassifier: Send {
    fn load(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn add_image(&mut self, tag: ClassTag) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn train(
        &mut self,
        on_progress: &mut dyn FnMut(TrainingEvent),
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn classify(&mut self) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>>;
}
