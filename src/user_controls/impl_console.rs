use crate::image_classifier::interface::ClassTag;
use crate::library::logger::interface::Logger;
use crate::user_controls::interface::{UserAction, UserControls};
use std::io::BufRead;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsoleCommand {
    Action(UserAction),
    Quit,
}

pub fn parse_command(line: &str) -> Option<ConsoleCommand> {
    match line.trim().to_lowercase().as_str() {
        "d" | "duck" => Some(ConsoleCommand::Action(UserAction::AddExample(ClassTag::Duck))),
        "p" | "pen" => Some(ConsoleCommand::Action(UserAction::AddExample(ClassTag::Pen))),
        "t" | "train" => Some(ConsoleCommand::Action(UserAction::BeginTraining)),
        "q" | "quit" | "exit" => Some(ConsoleCommand::Quit),
        _ => None,
    }
}

/// Reads commands from stdin, one per line.
pub struct UserControlsConsole {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl UserControlsConsole {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("user_controls").with_namespace("console"),
        }
    }
}

impl UserControls for UserControlsConsole {
    fn events(&self) -> Receiver<UserAction> {
        let (sender, receiver) = channel();
        let logger = self.logger.clone();

        std::thread::spawn(move || {
            let _ = logger.info("Commands: duck, pen, train, quit");
            for line in std::io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        let _ = logger.error(&format!("Failed to read stdin: {}", e));
                        break;
                    }
                };
                match parse_command(&line) {
                    Some(ConsoleCommand::Action(action)) => {
                        if sender.send(action).is_err() {
                            break;
                        }
                    }
                    Some(ConsoleCommand::Quit) => break,
                    None if line.trim().is_empty() => {}
                    None => {
                        let _ = logger.info(&format!("Unknown command: {}", line.trim()));
                    }
                }
            }
        });

        receiver
    }
}
