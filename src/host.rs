//! Host simulation interface and externally owned scene-graph data.
//!
//! The host engine owns the scene graph, the camera and the actual triangle
//! rasterization; this module is the seam between it and the mirror core.
//! [`HostScenario`] exposes the per-frame accessors the mirror math needs and
//! the one call that crosses back into the host: drawing the full scene into
//! a mirror's render target.
//!
//! Everything here is single-threaded by design, so shared scene data uses
//! `Rc`/`RefCell` rather than any locking.

use std::cell::RefCell;
use std::rc::Rc;

use cgmath::Matrix4;

use crate::texture::Texture;

/// Shared, mutable handle to a model material.
pub type MaterialHandle = Rc<RefCell<SceneMaterial>>;

/// A material of a host-owned model.
///
/// The mirror core only reads `texture_file_name` (to match configuration
/// suffixes against it) and writes `texture` (to bind a mirror render target
/// in place of whatever the host loaded). It never owns the material.
#[derive(Debug)]
pub struct SceneMaterial {
    /// File name of the texture the model references, as authored.
    pub texture_file_name: String,
    /// Current texture binding. Replaced by the mirror core when this
    /// material belongs to a registered mirror structure.
    pub texture: Option<Texture>,
}

impl SceneMaterial {
    pub fn new(texture_file_name: impl Into<String>) -> MaterialHandle {
        Rc::new(RefCell::new(Self {
            texture_file_name: texture_file_name.into(),
            texture: None,
        }))
    }
}

/// A host-owned 3D asset: a named mesh with an ordered list of materials.
#[derive(Debug)]
pub struct SceneModel {
    pub name: String,
    pub materials: Vec<MaterialHandle>,
}

/// A placement of a [`SceneModel`] at a location along the route.
#[derive(Debug)]
pub struct StructureInstance {
    /// The placed model. Slots without geometry carry `None` and are skipped.
    pub model: Option<Rc<SceneModel>>,
    /// Route location of the placement, in meters.
    pub location: f64,
}

/// The camera framing rectangle on the view plane.
///
/// Symmetric around the view axis for mirror rendering; the host applies it
/// when building its projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewPlane {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Parameters for one host scene draw into a mirror render target.
pub struct SceneFrame<'a> {
    /// Color attachment to draw into. Already cleared to opaque black.
    pub color: &'a wgpu::TextureView,
    /// Depth attachment to draw with. Already cleared to 1.0.
    pub depth: &'a wgpu::TextureView,
    /// View transform expressed in the camera's own reference frame.
    pub view: Matrix4<f32>,
    /// Upper bound for anisotropic filtering during this draw. Mirror draws
    /// pass 1: the texture is generated fresh, not sampled.
    pub anisotropy_clamp: u16,
}

/// Per-frame host accessors consumed by the mirror core.
///
/// All methods are called on the thread that owns the graphics device, inside
/// the host's draw callback; none of them may suspend.
pub trait HostScenario {
    /// Current route location of the vehicle, in meters.
    fn location(&self) -> f64;

    /// Index of the route block the camera state is anchored to.
    fn block_index(&self) -> i64;

    /// Transform taking a point from the camera's reference block into the
    /// camera frame.
    fn camera_transform_from_block(&self) -> Matrix4<f32>;

    /// Placement transform of `instance` at `location`, relative to the block
    /// origin at `block_origin_location`.
    fn track_transform(
        &self,
        instance: &StructureInstance,
        location: f64,
        block_origin_location: f64,
    ) -> Matrix4<f32>;

    /// Current camera framing rectangle.
    fn camera_plane(&self) -> ViewPlane;

    /// Replace the camera framing rectangle.
    fn set_camera_plane(&mut self, plane: ViewPlane);

    /// Draw the full scene with the given attachments and view transform.
    ///
    /// The host records its passes into `encoder`; attachments arrive cleared,
    /// so scene passes should load rather than clear.
    fn draw_scene(
        &mut self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        frame: &SceneFrame<'_>,
    ) -> anyhow::Result<()>;
}
