//! Globe engine: scene graph, camera, orbit controls and the controller that
//! drives a render backend, plus the scenario that lays a compacted star
//! catalog out on a sphere.
//!
//! Platform specifics (drawing, frame scheduling, the host document) sit
//! behind the [`RenderBackend`] and [`Host`] traits so the same code runs
//! natively and in the browser.

#![cfg_attr(target_arch = "wasm32", allow(clippy::unused_unit))]

pub mod backend;
pub mod camera;
pub mod controller;
pub mod controls;
pub mod error;
pub mod event;
pub mod geometry;
pub mod options;
pub mod scenario;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use backend::{BufferBackend, Host, ManualHost, RenderBackend, Viewport};
pub use camera::{CameraUniform, PerspectiveCamera};
pub use controller::{Controller, FrameOutcome};
pub use controls::OrbitControls;
pub use error::{EngineError, EngineResult};
pub use event::{Event, ListenerId};
pub use options::ControllerOptions;
pub use scenario::{Scenario, ScenarioConfig, SceneSummary};
pub use scene::{Fog, LineKind, NodeId, Scene, SceneNode};
