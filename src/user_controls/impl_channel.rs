use crate::user_controls::interface::{UserAction, UserControls};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

/// Controls fed through a plain channel, by the GUI buttons or by tests.
pub struct UserControlsChannel {
    receiver: Mutex<Option<Receiver<UserAction>>>,
}

impl UserControlsChannel {
    pub fn new() -> (Self, Sender<UserAction>) {
        let (sender, receiver) = channel();
        (
            Self {
                receiver: Mutex::new(Some(receiver)),
            },
            sender,
        )
    }
}

impl UserControls for UserControlsChannel {
    fn events(&self) -> Receiver<UserAction> {
        let taken = self
            .receiver
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        // Only one subscriber gets the events.
        taken.unwrap_or_else(|| channel().1)
    }
}
