//! Shared helpers for the integration tests: a headless host scenario stub
//! and small scene-graph builders.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use cgmath::{Matrix4, SquareMatrix, Vector4};
use route_mirror::host::{
    HostScenario, MaterialHandle, SceneFrame, SceneMaterial, SceneModel, StructureInstance,
    ViewPlane,
};

/// Route log output from the crate through env_logger; repeated calls are
/// fine, only the first initialization wins.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Headless [`HostScenario`] with fixed transforms.
///
/// `draw_scene` fails: nothing in these tests owns a GPU device, so any test
/// reaching a scene draw is a test bug.
pub struct StubScenario {
    pub location: f64,
    pub block_index: i64,
    pub camera_from_block: Matrix4<f32>,
    pub track: Matrix4<f32>,
    pub plane: ViewPlane,
    /// `(location, block_origin_location)` of the last track query.
    pub last_track_query: RefCell<Option<(f64, f64)>>,
}

impl StubScenario {
    pub fn new() -> Self {
        Self {
            location: 0.0,
            block_index: 0,
            camera_from_block: Matrix4::identity(),
            track: Matrix4::identity(),
            plane: ViewPlane {
                x: -0.5,
                y: -0.375,
                width: 1.0,
                height: 0.75,
            },
            last_track_query: RefCell::new(None),
        }
    }
}

impl HostScenario for StubScenario {
    fn location(&self) -> f64 {
        self.location
    }

    fn block_index(&self) -> i64 {
        self.block_index
    }

    fn camera_transform_from_block(&self) -> Matrix4<f32> {
        self.camera_from_block
    }

    fn track_transform(
        &self,
        _instance: &StructureInstance,
        location: f64,
        block_origin_location: f64,
    ) -> Matrix4<f32> {
        *self.last_track_query.borrow_mut() = Some((location, block_origin_location));
        self.track
    }

    fn camera_plane(&self) -> ViewPlane {
        self.plane
    }

    fn set_camera_plane(&mut self, plane: ViewPlane) {
        self.plane = plane;
    }

    fn draw_scene(
        &mut self,
        _device: &wgpu::Device,
        _encoder: &mut wgpu::CommandEncoder,
        _frame: &SceneFrame<'_>,
    ) -> anyhow::Result<()> {
        anyhow::bail!("scene drawing is not exercised in headless tests")
    }
}

/// Build a model whose materials reference the given texture file names.
pub fn model(name: &str, texture_files: &[&str]) -> Rc<SceneModel> {
    let materials: Vec<MaterialHandle> = texture_files
        .iter()
        .map(|file| SceneMaterial::new(*file))
        .collect();
    Rc::new(SceneModel {
        name: name.to_owned(),
        materials,
    })
}

/// Host-style model table, keyed by lowercased model name.
pub fn model_table(models: &[&Rc<SceneModel>]) -> HashMap<String, Rc<SceneModel>> {
    models
        .iter()
        .map(|model| (model.name.to_lowercase(), Rc::clone(model)))
        .collect()
}

/// A placed instance of `model` at `location`.
pub fn instance(model: &Rc<SceneModel>, location: f64) -> Rc<StructureInstance> {
    Rc::new(StructureInstance {
        model: Some(Rc::clone(model)),
        location,
    })
}

pub fn assert_vec3_close(actual: cgmath::Vector3<f32>, expected: cgmath::Vector3<f32>) {
    for (a, e) in [
        (actual.x, expected.x),
        (actual.y, expected.y),
        (actual.z, expected.z),
    ] {
        assert!(
            (a - e).abs() < 1e-4,
            "expected {expected:?}, got {actual:?}"
        );
    }
}

pub fn assert_vec4_close(actual: Vector4<f32>, expected: Vector4<f32>) {
    for (a, e) in [
        (actual.x, expected.x),
        (actual.y, expected.y),
        (actual.z, expected.z),
        (actual.w, expected.w),
    ] {
        assert!(
            (a - e).abs() < 1e-4,
            "expected {expected:?}, got {actual:?}"
        );
    }
}
