//! route-mirror
//!
//! Planar-mirror reflections for scenery objects placed along a route in a
//! real-time 3D simulation. Each configured structure gets an independent
//! off-screen render target containing a reflected view of the scene; the
//! target's texture is bound into the structure's matching materials so the
//! object visually behaves as a mirror.
//!
//! The crate is a plugin core driven entirely by host callbacks: the host
//! engine owns the scene graph, the camera and the actual scene
//! rasterization, and talks to this crate through the [`host::HostScenario`]
//! trait and the [`system::MirrorSystem`] entry points.
//!
//! High-level modules
//! - `math`: transform helpers (strip translation, vector reflection)
//! - `host`: the host collaborator interface and scene-graph data types
//! - `texture`: GPU color/depth texture wrappers for render targets
//! - `renderer`: per-tick camera state and the reflected-view math
//! - `target`: per-structure render targets with throttling and culling
//! - `factory`: resolution of config entries into render targets
//! - `config`: declarative per-structure mirror settings (TOML)
//! - `error`: the subsystem's error taxonomy
//! - `system`: the callbacks the host's plugin layer drives
//!

pub mod config;
pub mod error;
pub mod factory;
pub mod host;
pub mod math;
pub mod renderer;
pub mod system;
pub mod target;
pub mod texture;

// Re-exports commonly used types for convenience in downstream code.
pub use config::{MirrorConfig, MirrorStructure};
pub use error::MirrorError;
pub use factory::RenderTargetFactory;
pub use host::{HostScenario, SceneFrame, SceneMaterial, SceneModel, StructureInstance, ViewPlane};
pub use renderer::Renderer;
pub use system::{FrameContext, MirrorSystem};
pub use target::{FrameLimiter, RenderTarget};
