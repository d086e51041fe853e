use crate::config::Config;
use crate::device_buttons::interface::DeviceButtonsEvent;
use crate::device_camera::interface::{DeviceCameraEvent, Frame};
use crate::dispatch::{Dispatcher, OutboundEvent};
use crate::embedder::interface::Embedding;
use crate::knn::classifier::KnnClassifier;
use crate::knn::store::ExampleStore;
use std::time::Instant;

#[derive(Default, Clone, Debug)]
pub struct DeviceStates {
    pub camera: CameraState,
    pub embedder: EmbedderState,
}

#[derive(Default, Clone, Debug)]
pub enum CameraState {
    #[default]
    Disconnected,
    Connected(Instant),
    Started,
}

#[derive(Default, Clone, Debug)]
pub enum EmbedderState {
    #[default]
    Loading,
    Ready,
}

#[derive(Clone, Debug)]
pub enum Phase {
    DevicesInitializing { device_states: DeviceStates },
    Running,
    Stopped,
    Faulted { message: String },
}

/// The training cell, example store and dedup state live outside the phase
/// so they survive stop/start and camera reconnects.
#[derive(Clone)]
pub struct Model {
    pub phase: Phase,
    pub store: ExampleStore,
    pub dispatcher: Dispatcher,
    pub active_class: Option<usize>,
    pub last_confidences: Option<Vec<f32>>,
}

#[derive(Debug)]
pub enum Msg {
    Tick(Instant),
    CameraEvent(DeviceCameraEvent),
    CameraStartDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    CameraStopDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    EmbedderLoadDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    ButtonEvent(DeviceButtonsEvent),
    FrameCaptureDone(Result<Frame, Box<dyn std::error::Error + Send + Sync>>),
    FrameEmbedDone {
        result: Result<Embedding, Box<dyn std::error::Error + Send + Sync>>,
        train_class: Option<usize>,
        at_secs: i64,
    },
    StartRequested,
    StopRequested,
}

impl Msg {
    pub fn to_display_string(&self) -> String {
        match self {
            Msg::FrameEmbedDone {
                result: Ok(_),
                train_class,
                at_secs,
            } => format!(
                "FrameEmbedDone {{ result: Ok(<embedding>), train_class: {:?}, at_secs: {} }}",
                train_class, at_secs
            ),
            msg => format!("{:?}", msg),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SubscribeToCameraEvents,
    SubscribeToButtonEvents,
    SubscribeTick,
    LoadEmbedder,
    StartCamera,
    StopCamera,
    CaptureFrame,
    EmbedFrame {
        frame: Frame,
        train_class: Option<usize>,
    },
    DispatchEvents {
        events: Vec<OutboundEvent>,
    },
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::EmbedFrame { train_class, .. } => {
                format!("EmbedFrame {{ train_class: {:?} }}", train_class)
            }
            effect => format!("{:?}", effect),
        }
    }
}

pub fn init(config: &Config) -> (Model, Vec<Effect>) {
    (
        Model {
            phase: Phase::DevicesInitializing {
                device_states: DeviceStates::default(),
            },
            store: ExampleStore::new(config.num_classes()),
            dispatcher: Dispatcher::new(config.dedup_retention),
            active_class: None,
            last_confidences: None,
        },
        vec![
            Effect::SubscribeToCameraEvents,
            Effect::SubscribeToButtonEvents,
            Effect::SubscribeTick,
            Effect::LoadEmbedder,
        ],
    )
}

pub fn transition(config: &Config, model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    let mut model = model;

    match (model.phase.clone(), msg) {
        // Training input applies in every phase; last value wins.
        (_, Msg::ButtonEvent(DeviceButtonsEvent::Pressed(class_index))) => {
            model.active_class = if class_index < config.num_classes() {
                Some(class_index)
            } else {
                None
            };
            (model, vec![])
        }
        (_, Msg::ButtonEvent(DeviceButtonsEvent::Released)) => {
            model.active_class = None;
            (model, vec![])
        }

        // Device bring-up
        (
            Phase::DevicesInitializing { mut device_states },
            Msg::CameraEvent(DeviceCameraEvent::Connected),
        ) => {
            device_states.camera = CameraState::Connected(Instant::now());
            model.phase = Phase::DevicesInitializing { device_states };
            (model, vec![Effect::StartCamera])
        }
        (Phase::DevicesInitializing { mut device_states }, Msg::CameraStartDone(Ok(()))) => {
            device_states.camera = CameraState::Started;

            model.phase = if matches!(device_states.embedder, EmbedderState::Ready) {
                Phase::Running
            } else {
                Phase::DevicesInitializing { device_states }
            };
            (model, vec![])
        }
        (Phase::DevicesInitializing { mut device_states }, Msg::EmbedderLoadDone(Ok(()))) => {
            device_states.embedder = EmbedderState::Ready;

            model.phase = if matches!(device_states.camera, CameraState::Started) {
                Phase::Running
            } else {
                Phase::DevicesInitializing { device_states }
            };
            (model, vec![])
        }
        (Phase::DevicesInitializing { .. }, Msg::CameraStartDone(Err(e))) => {
            model.phase = Phase::Faulted {
                message: format!("camera start failed: {}", e),
            };
            (model, vec![])
        }
        (Phase::DevicesInitializing { .. }, Msg::EmbedderLoadDone(Err(e))) => {
            model.phase = Phase::Faulted {
                message: format!("embedder load failed: {}", e),
            };
            (model, vec![])
        }

        // Main loop
        (Phase::Running, Msg::Tick(_)) => (model, vec![Effect::CaptureFrame]),
        (Phase::Running, Msg::FrameCaptureDone(Ok(frame))) => {
            // Training mode is read once per tick; a button change after this
            // point wins on the next tick.
            let train_class = model.active_class;
            (model, vec![Effect::EmbedFrame { frame, train_class }])
        }
        (
            Phase::Running,
            Msg::FrameEmbedDone {
                result: Ok(embedding),
                train_class,
                at_secs,
            },
        ) => {
            if let Some(class_index) = train_class {
                model.store.add_example(class_index, embedding.clone());
            }

            if model.store.total() == 0 {
                return (model, vec![]);
            }

            let classifier = KnnClassifier::new(config.topk);
            let confidences = classifier.classify(&model.store, &embedding);
            let counts = model.store.counts().to_vec();
            let events = model
                .dispatcher
                .evaluate(config, &confidences, &counts, at_secs);
            model.last_confidences = Some(confidences);

            let effects = if events.is_empty() {
                vec![]
            } else {
                vec![Effect::DispatchEvents { events }]
            };
            (model, effects)
        }

        // Operator control
        (Phase::Running, Msg::StopRequested) => {
            model.phase = Phase::Stopped;
            (model, vec![Effect::StopCamera])
        }
        (Phase::Stopped, Msg::StartRequested) => (model, vec![Effect::StartCamera]),
        (Phase::Stopped, Msg::CameraStartDone(Ok(()))) => {
            model.phase = Phase::Running;
            (model, vec![])
        }
        (Phase::Stopped, Msg::CameraStartDone(Err(e))) => {
            model.phase = Phase::Faulted {
                message: format!("camera restart failed: {}", e),
            };
            (model, vec![])
        }

        // Camera connectivity, any phase
        (phase, Msg::CameraEvent(DeviceCameraEvent::Disconnected)) => {
            let embedder = match phase {
                Phase::DevicesInitializing { device_states } => device_states.embedder,
                _ => EmbedderState::Ready,
            };
            model.phase = Phase::DevicesInitializing {
                device_states: DeviceStates {
                    camera: CameraState::Disconnected,
                    embedder,
                },
            };
            (model, vec![])
        }

        // Everything else, including capture/embed faults and ticks outside
        // Running, leaves the model as-is and the loop live.
        _ => (model, vec![]),
    }
}
