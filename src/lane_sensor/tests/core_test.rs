use crate::config::{ClassConfig, Config};
use crate::device_buttons::interface::DeviceButtonsEvent;
use crate::device_camera::interface::{DeviceCameraEvent, Frame};
use crate::lane_sensor::core::{
    init, transition, CameraState, EmbedderState, Effect, Model, Msg, Phase,
};
use crate::lane_sensor::tests::fixture::Fixture;
use serde_json::Map;
use std::time::Instant;

fn test_config() -> Config {
    let mut config = Config::default();
    config.classes = vec![
        ClassConfig {
            label: "car".to_string(),
            confidence_threshold: 0.6,
            webhook_url: "http://localhost/hooks/car".to_string(),
            extra_payload: Map::new(),
        },
        ClassConfig {
            label: "truck".to_string(),
            confidence_threshold: 0.6,
            webhook_url: "http://localhost/hooks/truck".to_string(),
            extra_payload: Map::new(),
        },
    ];
    config
}

fn running_model(config: &Config) -> Model {
    let (mut model, _) = init(config);
    model.phase = Phase::Running;
    model
}

fn embed_done(embedding: Vec<f32>, train_class: Option<usize>, at_secs: i64) -> Msg {
    Msg::FrameEmbedDone {
        result: Ok(embedding),
        train_class,
        at_secs,
    }
}

/// Trains `count` identical examples for a class, spacing the timestamps so
/// dedup state from training does not leak into the assertions.
fn train(config: &Config, mut model: Model, class_index: usize, count: usize) -> Model {
    for i in 0..count {
        let msg = embed_done(vec![1.0, 2.0], Some(class_index), 100 + i as i64);
        let (new_model, _) = transition(config, model, msg);
        model = new_model;
    }
    model
}

#[test]
fn test_init() {
    let config = test_config();
    let (model, effects) = init(&config);

    assert!(matches!(model.phase, Phase::DevicesInitializing { .. }));
    assert_eq!(model.store.total(), 0);
    assert_eq!(model.active_class, None);
    assert_eq!(effects.len(), 4);
    assert!(effects.contains(&Effect::SubscribeToCameraEvents));
    assert!(effects.contains(&Effect::SubscribeToButtonEvents));
    assert!(effects.contains(&Effect::SubscribeTick));
    assert!(effects.contains(&Effect::LoadEmbedder));
}

#[test]
fn test_camera_connection_flow() {
    let config = test_config();
    let (model, _) = init(&config);

    // Camera connects
    let (model, effects) = transition(
        &config,
        model,
        Msg::CameraEvent(DeviceCameraEvent::Connected),
    );

    match &model.phase {
        Phase::DevicesInitializing { device_states } => {
            assert!(matches!(device_states.camera, CameraState::Connected(_)));
            assert!(matches!(device_states.embedder, EmbedderState::Loading));
        }
        _ => panic!("Unexpected phase"),
    }
    assert_eq!(effects, vec![Effect::StartCamera]);

    // Camera start completes, embedder still loading
    let (model, effects) = transition(&config, model, Msg::CameraStartDone(Ok(())));

    match &model.phase {
        Phase::DevicesInitializing { device_states } => {
            assert!(matches!(device_states.camera, CameraState::Started));
        }
        _ => panic!("Unexpected phase"),
    }
    assert!(effects.is_empty());

    // Embedder finishes loading: the loop may run
    let (model, effects) = transition(&config, model, Msg::EmbedderLoadDone(Ok(())));

    assert!(matches!(model.phase, Phase::Running));
    assert!(effects.is_empty());
}

#[test]
fn test_embedder_ready_before_camera() {
    let config = test_config();
    let (model, _) = init(&config);

    let (model, effects) = transition(&config, model, Msg::EmbedderLoadDone(Ok(())));
    assert!(matches!(model.phase, Phase::DevicesInitializing { .. }));
    assert!(effects.is_empty());

    let (model, _) = transition(
        &config,
        model,
        Msg::CameraEvent(DeviceCameraEvent::Connected),
    );
    let (model, _) = transition(&config, model, Msg::CameraStartDone(Ok(())));

    assert!(matches!(model.phase, Phase::Running));
}

#[test]
fn test_camera_start_failure_faults() {
    let config = test_config();
    let (model, _) = init(&config);

    let (model, effects) = transition(
        &config,
        model,
        Msg::CameraStartDone(Err("permission denied".into())),
    );

    match &model.phase {
        Phase::Faulted { message } => assert!(message.contains("permission denied")),
        _ => panic!("Unexpected phase"),
    }
    assert!(effects.is_empty());

    // A fatal acquisition failure is not retried: ticks do nothing.
    let (model, effects) = transition(&config, model, Msg::Tick(Instant::now()));
    assert!(matches!(model.phase, Phase::Faulted { .. }));
    assert!(effects.is_empty());
}

#[test]
fn test_embedder_load_failure_faults() {
    let config = test_config();
    let (model, _) = init(&config);

    let (model, _) = transition(
        &config,
        model,
        Msg::EmbedderLoadDone(Err("model file missing".into())),
    );

    assert!(matches!(model.phase, Phase::Faulted { .. }));
}

#[test]
fn test_tick_captures_frame_while_running() {
    let config = test_config();
    let model = running_model(&config);

    let (_, effects) = transition(&config, model, Msg::Tick(Instant::now()));

    assert_eq!(effects, vec![Effect::CaptureFrame]);
}

#[test]
fn test_tick_ignored_while_stopped() {
    let config = test_config();
    let mut model = running_model(&config);
    model.phase = Phase::Stopped;

    let (model, effects) = transition(&config, model, Msg::Tick(Instant::now()));

    assert!(matches!(model.phase, Phase::Stopped));
    assert!(effects.is_empty());
}

#[test]
fn test_button_events_update_training_cell() {
    let config = test_config();
    let model = running_model(&config);

    let (model, effects) = transition(
        &config,
        model,
        Msg::ButtonEvent(DeviceButtonsEvent::Pressed(1)),
    );
    assert_eq!(model.active_class, Some(1));
    assert!(effects.is_empty());

    let (model, _) = transition(&config, model, Msg::ButtonEvent(DeviceButtonsEvent::Released));
    assert_eq!(model.active_class, None);

    // Out-of-range class indexes are dropped rather than trained.
    let (model, _) = transition(
        &config,
        model,
        Msg::ButtonEvent(DeviceButtonsEvent::Pressed(9)),
    );
    assert_eq!(model.active_class, None);
}

#[test]
fn test_capture_snapshots_training_class() {
    let config = test_config();
    let mut model = running_model(&config);
    model.active_class = Some(1);

    let frame = Frame(vec![1, 2, 3]);
    let (_, effects) = transition(&config, model, Msg::FrameCaptureDone(Ok(frame.clone())));

    assert_eq!(
        effects,
        vec![Effect::EmbedFrame {
            frame,
            train_class: Some(1),
        }]
    );
}

#[test]
fn test_training_appends_only_active_class() {
    let config = test_config();
    let model = running_model(&config);

    let model = train(&config, model, 1, 3);

    assert_eq!(model.store.counts(), &[0, 3]);
}

#[test]
fn test_untrained_store_skips_classification() {
    let config = test_config();
    let model = running_model(&config);

    let (model, effects) = transition(&config, model, embed_done(vec![1.0, 2.0], None, 100));

    assert!(effects.is_empty());
    assert!(model.last_confidences.is_none());
}

#[test]
fn test_qualifying_classification_dispatches() {
    let config = test_config();
    let model = train(&config, running_model(&config), 0, 10);

    // Same embedding as the training examples: unanimous vote for class 0.
    let (model, effects) = transition(&config, model, embed_done(vec![1.0, 2.0], None, 500));

    assert_eq!(model.last_confidences, Some(vec![1.0, 0.0]));
    match effects.as_slice() {
        [Effect::DispatchEvents { events }] => {
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].class_index, 0);
            assert_eq!(events[0].url, "http://localhost/hooks/car");
            assert_eq!(events[0].payload["timestamp"], serde_json::Value::from(500));
        }
        _ => panic!("Expected a single DispatchEvents effect"),
    }

    // A second frame in the same second is suppressed.
    let (_, effects) = transition(&config, model, embed_done(vec![1.0, 2.0], None, 500));
    assert!(effects.is_empty());
}

#[test]
fn test_below_threshold_confidence_does_not_dispatch() {
    let config = test_config();
    // Five examples: a unanimous vote still only reaches 5/topk = 0.5.
    let model = train(&config, running_model(&config), 0, 5);

    let (model, effects) = transition(&config, model, embed_done(vec![1.0, 2.0], None, 500));

    assert_eq!(model.last_confidences, Some(vec![0.5, 0.0]));
    assert!(effects.is_empty());
}

#[test]
fn test_stop_then_start_preserves_examples() {
    let config = test_config();
    let model = train(&config, running_model(&config), 0, 4);

    let (model, effects) = transition(&config, model, Msg::StopRequested);
    assert!(matches!(model.phase, Phase::Stopped));
    assert_eq!(effects, vec![Effect::StopCamera]);

    let (model, effects) = transition(&config, model, Msg::StartRequested);
    assert!(matches!(model.phase, Phase::Stopped));
    assert_eq!(effects, vec![Effect::StartCamera]);

    let (model, effects) = transition(&config, model, Msg::CameraStartDone(Ok(())));
    assert!(matches!(model.phase, Phase::Running));
    assert!(effects.is_empty());

    // Examples collected before the stop are still there.
    assert_eq!(model.store.counts(), &[4, 0]);
}

#[test]
fn test_camera_disconnect_reinitializes_but_keeps_store() {
    let config = test_config();
    let model = train(&config, running_model(&config), 0, 4);

    let (model, effects) = transition(
        &config,
        model,
        Msg::CameraEvent(DeviceCameraEvent::Disconnected),
    );

    match &model.phase {
        Phase::DevicesInitializing { device_states } => {
            assert!(matches!(device_states.camera, CameraState::Disconnected));
            // The embedder was already loaded; only the camera reconnects.
            assert!(matches!(device_states.embedder, EmbedderState::Ready));
        }
        _ => panic!("Unexpected phase"),
    }
    assert!(effects.is_empty());
    assert_eq!(model.store.counts(), &[4, 0]);
}

#[test]
fn test_embed_failure_keeps_loop_running() {
    let config = test_config();
    let model = running_model(&config);

    let (model, effects) = transition(
        &config,
        model,
        Msg::FrameEmbedDone {
            result: Err("embedder crashed".into()),
            train_class: Some(0),
            at_secs: 100,
        },
    );

    assert!(matches!(model.phase, Phase::Running));
    assert!(effects.is_empty());
    assert_eq!(model.store.total(), 0);
}

#[test]
fn test_dispatch_effect_notifies_each_event() {
    let fixture = Fixture::new();

    let mut config = test_config();
    config.classes[0].confidence_threshold = 0.5;

    let model = train(&config, running_model(&config), 0, 10);
    let (_, effects) = transition(&config, model, embed_done(vec![1.0, 2.0], None, 900));

    match effects.as_slice() {
        [Effect::DispatchEvents { events }] => {
            fixture.lane_sensor.run_effect(Effect::DispatchEvents {
                events: events.clone(),
            });
            let notified = fixture.notifier.notified();
            assert_eq!(notified.len(), 1);
            assert_eq!(notified[0].url, "http://localhost/hooks/car");
        }
        _ => panic!("Expected a single DispatchEvents effect"),
    }
}

#[test]
fn test_operator_start_stop_enqueue_msgs() {
    let fixture = Fixture::new();

    fixture.lane_sensor.stop();
    fixture.lane_sensor.start();

    let receiver = fixture.lane_sensor.msg_receiver.lock().unwrap();
    assert!(matches!(receiver.try_recv(), Ok(Msg::StopRequested)));
    assert!(matches!(receiver.try_recv(), Ok(Msg::StartRequested)));
}

#[test]
fn test_render_shows_counts_and_percentages() {
    let fixture = Fixture::new();

    let mut model = running_model(&fixture.config);
    model = train(&fixture.config, model, 0, 5);
    model.last_confidences = Some(vec![0.7, 0.0, 0.0]);

    fixture.lane_sensor.render(&model).unwrap();

    let display = fixture.device_display.lock().unwrap();
    assert_eq!(display.lines[0], "Watching");
    assert_eq!(display.lines[1], "car: 5 examples - 70%");
    assert!(display.lines[2].contains("no examples added"));
}
