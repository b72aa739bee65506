use super::fixture::{classification, wait_until, Fixture, ImageClassifierScripted};
use crate::config::{ClassifyErrorPolicy, Config};
use crate::image_classifier::interface::ClassTag;
use crate::label_loop::core::State;
use crate::label_loop::render::PLACEHOLDER_TEXT;
use crate::user_controls::interface::UserAction;
use std::time::{Duration, Instant};

#[test]
fn test_end_to_end() {
    let classifier = ImageClassifierScripted::new(
        vec![0.9, 0.5],
        vec![],
        Ok(vec![classification("Duck", 0.95), classification("Pen", 0.05)]),
    );
    let f = Fixture::new(classifier);
    let handle = f.spawn();

    for _ in 0..3 {
        f.press(UserAction::AddExample(ClassTag::Duck));
    }
    for _ in 0..3 {
        f.press(UserAction::AddExample(ClassTag::Pen));
    }
    f.press(UserAction::BeginTraining);

    assert!(wait_until(|| f
        .device_display
        .writes()
        .contains(&"Duck - 0.95".to_string())));
    assert!(wait_until(|| f.classify_calls() >= 2));

    {
        let script = f.script.lock().unwrap();
        assert_eq!(script.trained_batches.len(), 1);
        assert_eq!(
            script.trained_batches[0],
            vec![
                ClassTag::Duck,
                ClassTag::Duck,
                ClassTag::Duck,
                ClassTag::Pen,
                ClassTag::Pen,
                ClassTag::Pen,
            ]
        );
    }
    assert_eq!(f.device_display.writes()[0], PLACEHOLDER_TEXT);
    assert!(f
        .logger
        .lines()
        .iter()
        .any(|line| line.ends_with("Added Duck")));
    assert!(f.logger.lines().iter().any(|line| line.ends_with("Loss: 0.5")));

    f.label_loop.stop();
    assert_eq!(handle.join().unwrap(), Ok(()));
    assert_eq!(f.state(), State::Stopped);
}

#[test]
fn test_halts_after_classification_error() {
    let classifier = ImageClassifierScripted::new(
        vec![],
        vec![
            Ok(vec![classification("Duck", 0.6)]),
            Ok(vec![classification("Pen", 0.87)]),
            Err("frame dropped".to_string()),
        ],
        Ok(vec![classification("Duck", 0.99)]),
    );
    let f = Fixture::new(classifier);
    let handle = f.spawn();

    f.press(UserAction::AddExample(ClassTag::Duck));
    f.press(UserAction::AddExample(ClassTag::Pen));
    f.press(UserAction::BeginTraining);

    assert!(wait_until(|| matches!(f.state(), State::Stalled { .. })));
    std::thread::sleep(Duration::from_millis(50));

    assert_eq!(f.classify_calls(), 3);
    assert_eq!(
        f.device_display.writes(),
        vec![PLACEHOLDER_TEXT, "Duck - 0.6", "Pen - 0.87"]
    );
    match f.state() {
        State::Stalled { prediction, reason } => {
            assert_eq!(prediction.map(|p| p.to_string()), Some("Pen - 0.87".to_string()));
            assert_eq!(reason, "frame dropped");
        }
        state => panic!("Unexpected state {:?}", state),
    }
    assert!(f
        .logger
        .lines()
        .iter()
        .any(|line| line.contains("Classification halted: frame dropped")));

    f.label_loop.stop();
    assert_eq!(handle.join().unwrap(), Ok(()));
}

#[test]
fn test_one_display_update_per_classification() {
    let classifier = ImageClassifierScripted::new(
        vec![],
        vec![],
        Ok(vec![classification("Pen", 0.87)]),
    );
    let f = Fixture::new(classifier);
    let handle = f.spawn();

    f.press(UserAction::BeginTraining);
    assert!(wait_until(|| f.classify_calls() >= 5));

    f.label_loop.stop();
    assert_eq!(handle.join().unwrap(), Ok(()));

    let updates = f.device_display.writes().len() - 1;
    assert!(updates >= 4);
    assert_eq!(f.state(), State::Stopped);
    // The last classification may still be in flight when the loop stops.
    let calls = f.classify_calls();
    assert!(calls == updates || calls == updates + 1);
}

#[test]
fn test_duplicate_examples_reach_training() {
    let classifier = ImageClassifierScripted::new(
        vec![],
        vec![],
        Ok(vec![classification("Duck", 1.0)]),
    );
    let f = Fixture::new(classifier);
    let handle = f.spawn();

    f.press(UserAction::AddExample(ClassTag::Duck));
    f.press(UserAction::AddExample(ClassTag::Duck));
    f.press(UserAction::BeginTraining);

    assert!(wait_until(|| f.script.lock().unwrap().trained_batches.len() == 1));
    assert_eq!(
        f.script.lock().unwrap().trained_batches[0],
        vec![ClassTag::Duck, ClassTag::Duck]
    );

    f.label_loop.stop();
    assert_eq!(handle.join().unwrap(), Ok(()));
}

#[test]
fn test_each_training_restarts_classification_once() {
    let classifier = ImageClassifierScripted::new(
        vec![0.3],
        vec![Err("first run fails".to_string())],
        Ok(vec![classification("Pen", 0.7)]),
    );
    let f = Fixture::new(classifier);
    let handle = f.spawn();

    f.press(UserAction::BeginTraining);
    assert!(wait_until(|| matches!(f.state(), State::Stalled { .. })));
    assert_eq!(f.classify_calls(), 1);

    f.press(UserAction::AddExample(ClassTag::Pen));
    f.press(UserAction::BeginTraining);
    assert!(wait_until(|| f
        .device_display
        .writes()
        .contains(&"Pen - 0.7".to_string())));

    {
        let script = f.script.lock().unwrap();
        assert_eq!(script.trained_batches, vec![vec![], vec![ClassTag::Pen]]);
    }
    assert_eq!(f.label_loop.model().training_run, 2);

    f.label_loop.stop();
    assert_eq!(handle.join().unwrap(), Ok(()));
}

#[test]
fn test_closing_controls_stops_the_loop() {
    let classifier = ImageClassifierScripted::new(vec![], vec![], Err("unused".to_string()));
    let f = Fixture::new(classifier);
    let handle = f.spawn();

    let Fixture {
        actions,
        label_loop,
        ..
    } = f;
    drop(actions);

    assert_eq!(handle.join().unwrap(), Ok(()));
    assert_eq!(label_loop.model().state, State::Stopped);
}

#[test]
fn test_retry_delay_does_not_hold_up_examples() {
    let config = Config {
        on_classify_error: ClassifyErrorPolicy::RetryAfter(Duration::from_millis(1500)),
        ..Config::default()
    };
    let classifier =
        ImageClassifierScripted::new(vec![], vec![], Err("camera busy".to_string()));
    let f = Fixture::with_config(config, classifier);
    let handle = f.spawn();

    f.press(UserAction::BeginTraining);
    assert!(wait_until(|| f.classify_calls() == 1));
    assert!(wait_until(|| f.logged("Classification failed: camera busy")));

    let pressed_at = Instant::now();
    f.press(UserAction::AddExample(ClassTag::Pen));
    assert!(wait_until(|| f.pending() == vec![ClassTag::Pen]));
    assert!(pressed_at.elapsed() < Duration::from_millis(500));
    assert_eq!(f.classify_calls(), 1);

    f.label_loop.stop();
    assert_eq!(handle.join().unwrap(), Ok(()));
}

#[test]
fn test_training_without_done_can_be_retried() {
    let classifier =
        ImageClassifierScripted::new(vec![0.4], vec![], Ok(vec![classification("Pen", 0.5)]))
            .without_done();
    let f = Fixture::new(classifier);
    let handle = f.spawn();

    f.press(UserAction::BeginTraining);
    assert!(wait_until(|| f.script.lock().unwrap().trained_batches.len() == 1
        && f.state() == State::CollectingExamples));
    assert!(f.logged("Training returned without a completion signal"));

    f.press(UserAction::BeginTraining);
    assert!(wait_until(|| f.script.lock().unwrap().trained_batches.len() == 2));
    assert_eq!(f.classify_calls(), 0);

    f.label_loop.stop();
    assert_eq!(handle.join().unwrap(), Ok(()));
}

#[test]
fn test_camera_stopped_when_display_fails() {
    let classifier =
        ImageClassifierScripted::new(vec![], vec![], Ok(vec![classification("Duck", 0.9)]));
    let f = Fixture::with_display(Config::default(), classifier, Some(1));
    let handle = f.spawn();

    assert!(wait_until(|| f.logged("Camera started")));
    f.press(UserAction::BeginTraining);

    let result = handle.join().unwrap();
    assert_eq!(result, Err("Display disconnected".to_string()));
    assert!(f.logged("Camera stopped"));
}
