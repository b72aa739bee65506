use crate::config::{ClassifyErrorPolicy, Config};
use crate::image_classifier::interface::{ClassTag, Classification};
use crate::image_classifier::prediction::Prediction;
use crate::user_controls::interface::UserAction;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum State {
    Idle,
    CollectingExamples,
    Training {
        last_loss: Option<f32>,
    },
    Classifying {
        prediction: Option<Prediction>,
        frames_classified: u64,
    },
    Stalled {
        prediction: Option<Prediction>,
        reason: String,
    },
    Stopped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub state: State,
    /// Bumped on every accepted training request. Classification results tagged
    /// with an older run are dropped.
    pub training_run: u64,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            state: State::Idle,
            training_run: 0,
        }
    }
}

#[derive(Debug)]
pub enum Msg {
    UserAction(UserAction),
    CameraStartDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    ExtractorReady(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    ExampleAdded(ClassTag, Result<(), Box<dyn std::error::Error + Send + Sync>>),
    TrainingLoss(f32),
    TrainingDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    ClassifyDone {
        training_run: u64,
        result: Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>>,
    },
    Stop,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    StartCamera,
    LoadExtractor,
    SubscribeUserControls,
    AddExample(ClassTag),
    Train,
    RejectTraining,
    ClassifyFrame { training_run: u64, delay: Duration },
}

impl Effect {
    /// Effects that touch the classifier head. They run one at a time, in order.
    pub fn uses_classifier(&self) -> bool {
        matches!(
            self,
            Effect::LoadExtractor
                | Effect::AddExample(_)
                | Effect::Train
                | Effect::ClassifyFrame { .. }
        )
    }
}

pub fn init() -> (Model, Vec<Effect>) {
    (
        Model::default(),
        vec![
            Effect::StartCamera,
            Effect::LoadExtractor,
            Effect::SubscribeUserControls,
        ],
    )
}

pub fn transition(config: &Config, model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    let Model {
        state,
        training_run,
    } = model;

    match (state, msg) {
        (State::Stopped, _) | (_, Msg::Stop) => (
            Model {
                state: State::Stopped,
                training_run,
            },
            vec![],
        ),

        (state, Msg::UserAction(UserAction::AddExample(tag))) => {
            let state = match state {
                State::Idle => State::CollectingExamples,
                state => state,
            };
            (
                Model {
                    state,
                    training_run,
                },
                vec![Effect::AddExample(tag)],
            )
        }

        // A second request while training is rejected.
        (State::Training { last_loss }, Msg::UserAction(UserAction::BeginTraining)) => (
            Model {
                state: State::Training { last_loss },
                training_run,
            },
            vec![Effect::RejectTraining],
        ),
        (_, Msg::UserAction(UserAction::BeginTraining)) => (
            Model {
                state: State::Training { last_loss: None },
                training_run: training_run + 1,
            },
            vec![Effect::Train],
        ),

        (State::Training { .. }, Msg::TrainingLoss(loss)) => (
            Model {
                state: State::Training {
                    last_loss: Some(loss),
                },
                training_run,
            },
            vec![],
        ),
        (State::Training { .. }, Msg::TrainingDone(Ok(()))) => (
            Model {
                state: State::Classifying {
                    prediction: None,
                    frames_classified: 0,
                },
                training_run,
            },
            vec![Effect::ClassifyFrame {
                training_run,
                delay: Duration::ZERO,
            }],
        ),
        (State::Training { .. }, Msg::TrainingDone(Err(_))) => (
            Model {
                state: State::CollectingExamples,
                training_run,
            },
            vec![],
        ),

        (
            State::Classifying {
                prediction,
                frames_classified,
            },
            Msg::ClassifyDone {
                training_run: result_run,
                result,
            },
        ) if result_run == training_run => {
            let prediction_result = result.map_err(|e| e.to_string()).and_then(|classifications| {
                Prediction::from_classifications(&classifications).map_err(|e| e.to_string())
            });

            match prediction_result {
                Ok(new_prediction) => (
                    Model {
                        state: State::Classifying {
                            prediction: Some(new_prediction),
                            frames_classified: frames_classified + 1,
                        },
                        training_run,
                    },
                    vec![Effect::ClassifyFrame {
                        training_run,
                        delay: config.classify_interval,
                    }],
                ),
                Err(reason) => match config.on_classify_error {
                    ClassifyErrorPolicy::Halt => (
                        Model {
                            state: State::Stalled { prediction, reason },
                            training_run,
                        },
                        vec![],
                    ),
                    ClassifyErrorPolicy::RetryAfter(delay) => (
                        Model {
                            state: State::Classifying {
                                prediction,
                                frames_classified,
                            },
                            training_run,
                        },
                        vec![Effect::ClassifyFrame {
                            training_run,
                            delay,
                        }],
                    ),
                },
            }
        }

        // Startup results, stale classifications and late training events change nothing.
        (state, _) => (
            Model {
                state,
                training_run,
            },
            vec![],
        ),
    }
}
