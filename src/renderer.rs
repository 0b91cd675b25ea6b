//! Per-tick camera state and the reflected-view math.
//!
//! [`Renderer`] snapshots the host camera transform once per frame and
//! derives the quantities every mirror target shares: the block-origin
//! location, the camera-to-block transform and the camera position in block
//! space. It also builds the reflected view matrix for a mirror plane and
//! owns the one call that hands rendering back to the host.
//!
//! All math runs in the frame anchored at the camera's current block origin,
//! keeping coordinates numerically stable far from the world origin.

use cgmath::{EuclideanSpace, Matrix4, Point3, SquareMatrix, Vector2, Vector3, Vector4};

use crate::error::MirrorError;
use crate::host::{HostScenario, SceneFrame, StructureInstance, ViewPlane};
use crate::math;

/// Length of one route block in meters.
pub const BLOCK_LENGTH: f64 = 25.0;

/// Camera state tracker, refreshed once per frame before any target renders.
#[derive(Debug)]
pub struct Renderer {
    block_origin_location: f64,
    block_to_camera: Matrix4<f32>,
    camera_to_block: Matrix4<f32>,
    camera_position: Vector3<f32>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            block_origin_location: 0.0,
            block_to_camera: Matrix4::identity(),
            camera_to_block: Matrix4::identity(),
            camera_position: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    /// Snapshot the host camera state for this frame.
    ///
    /// Must run before any [`RenderTarget::render`](crate::target::RenderTarget::render)
    /// call in the same frame; all reflection math reads the state stored
    /// here.
    pub fn tick(&mut self, scenario: &dyn HostScenario) -> Result<(), MirrorError> {
        self.block_origin_location = scenario.block_index() as f64 * BLOCK_LENGTH;

        self.block_to_camera = scenario.camera_transform_from_block();
        self.camera_to_block = self
            .block_to_camera
            .invert()
            .ok_or(MirrorError::SingularTransform)?;

        self.camera_position =
            math::to_vector3(self.camera_to_block * Vector4::new(0.0, 0.0, 0.0, 1.0));

        Ok(())
    }

    /// Route location of the block origin the camera state is anchored to.
    pub fn block_origin_location(&self) -> f64 {
        self.block_origin_location
    }

    /// Camera position in block space, as of the last [`tick`](Self::tick).
    pub fn camera_position(&self) -> Vector3<f32> {
        self.camera_position
    }

    pub fn camera_to_block(&self) -> Matrix4<f32> {
        self.camera_to_block
    }

    pub fn block_to_camera(&self) -> Matrix4<f32> {
        self.block_to_camera
    }

    /// Placement transform of `instance`, relative to the camera's current
    /// block origin rather than the instance's own block.
    pub fn track_transform(
        &self,
        scenario: &dyn HostScenario,
        instance: &StructureInstance,
    ) -> Matrix4<f32> {
        scenario.track_transform(instance, instance.location, self.block_origin_location)
    }

    /// Build the view transform that renders the scene as seen in a mirror.
    ///
    /// `block_to_object` is the mirror object's track matrix. The mirror
    /// plane passes through the object's position with the object's forward
    /// axis as normal; the camera position is reflected across it and the
    /// result is a look-at from the object toward the mirrored camera,
    /// composed with the camera-to-block transform so the final matrix is
    /// expressed in the camera's own reference frame (the transforms apply
    /// right to left).
    pub fn reflection_view(
        &self,
        block_to_object: Matrix4<f32>,
    ) -> Result<Matrix4<f32>, MirrorError> {
        let object_to_block = block_to_object
            .invert()
            .ok_or(MirrorError::SingularTransform)?;

        let object_up =
            math::to_vector3(math::remove_translation(object_to_block) * Vector4::unit_y());
        let object_normal =
            math::to_vector3(math::remove_translation(block_to_object) * Vector4::unit_z());

        let object_position =
            math::to_vector3(block_to_object * Vector4::new(0.0, 0.0, 0.0, 1.0));
        let relative_object_position = object_position - self.camera_position;

        let camera_position_reflection =
            object_position + math::reflect(relative_object_position, object_normal);

        let look_at = Matrix4::look_at_lh(
            Point3::from_vec(object_position),
            Point3::from_vec(camera_position_reflection),
            object_up,
        );

        Ok(look_at * self.camera_to_block)
    }

    /// Issue one more scene draw through the host.
    ///
    /// Sets a symmetric view-plane rectangle of aspect `width/height` scaled
    /// by `1/zoom` on the host camera framing, then hands the draw to the
    /// host with the attachments and view transform in `frame`.
    pub fn render_scene(
        &self,
        scenario: &mut dyn HostScenario,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        frame: &SceneFrame<'_>,
        render_size: [u32; 2],
        zoom: f32,
    ) -> anyhow::Result<()> {
        let aspect = render_size[0] as f32 / render_size[1] as f32;
        let plane_vertex = Vector2::new(1.0, -1.0 / aspect) / zoom;
        scenario.set_camera_plane(ViewPlane {
            x: -plane_vertex.x / 2.0,
            y: -plane_vertex.y / 2.0,
            width: plane_vertex.x,
            height: plane_vertex.y,
        });

        scenario.draw_scene(device, encoder, frame)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
