use crate::image_classifier::interface::ClassTag;
use std::sync::mpsc::Receiver;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserAction {
    AddExample(ClassTag),
    BeginTraining,
}

/// The buttons the user presses. The receiver disconnects when the controls go away.
pub trait UserControls: Send + Sync {
    fn events(&self) -> Receiver<UserAction>;
}
