//! Resolution of configuration entries into mirror render targets.
//!
//! [`RenderTargetFactory`] runs once per scenario load: [`register`]
//! resolves each configuration entry against the host's model table and
//! selects the materials whose texture file names match the configured
//! suffix; [`create`] then walks the placed structure list and produces one
//! [`RenderTarget`] per instance of a registered model.
//!
//! Registration is keyed by model identity, so several instances of one
//! model register once and render independently — but they share the model's
//! material bindings, and the instance rendered last wins them. Scoping the
//! binding per instance would require host-side material cloning, which this
//! crate does not own.
//!
//! [`register`]: RenderTargetFactory::register
//! [`create`]: RenderTargetFactory::create

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::MirrorError;
use crate::host::{MaterialHandle, SceneModel, StructureInstance};
use crate::target::RenderTarget;

struct TargetSettings {
    materials: Rc<Vec<MaterialHandle>>,
    texture_size: [u32; 2],
    zoom: f32,
    back_draw_distance: f32,
    front_draw_distance: f32,
    max_fps: f64,
}

/// Builds the scenario's render-target list from registered mirror entries.
pub struct RenderTargetFactory<'a> {
    models: &'a HashMap<String, Rc<SceneModel>>,
    structures: &'a [Option<Rc<StructureInstance>>],
    registered: HashMap<usize, TargetSettings>,
}

impl<'a> RenderTargetFactory<'a> {
    /// `models` is the host's model-name table, keyed by lowercased name;
    /// `structures` the placed structure list in route order.
    pub fn new(
        models: &'a HashMap<String, Rc<SceneModel>>,
        structures: &'a [Option<Rc<StructureInstance>>],
    ) -> Self {
        Self {
            models,
            structures,
            registered: HashMap::new(),
        }
    }

    /// Register a mirror structure.
    ///
    /// Looks up `key` case-insensitively in the model table and selects, in
    /// original order, every material whose texture file name ends with
    /// `texture_file_name_ending` (case-insensitive). Zero matched materials
    /// is allowed: the target renders into a texture nobody samples.
    ///
    /// Fails with [`MirrorError::ModelNotFound`] for an unknown key and
    /// [`MirrorError::DuplicateModel`] when the resolved model is already
    /// registered; neither leaves a partial registration behind.
    pub fn register(
        &mut self,
        key: &str,
        texture_file_name_ending: &str,
        texture_size: [u32; 2],
        zoom: f32,
        back_draw_distance: f32,
        front_draw_distance: f32,
        max_fps: f64,
    ) -> Result<(), MirrorError> {
        let model = self
            .models
            .get(&key.to_lowercase())
            .ok_or_else(|| MirrorError::ModelNotFound(key.to_owned()))?;

        let model_id = Rc::as_ptr(model) as usize;
        if self.registered.contains_key(&model_id) {
            return Err(MirrorError::DuplicateModel(key.to_owned()));
        }

        let ending = texture_file_name_ending.to_lowercase();
        let materials: Vec<MaterialHandle> = model
            .materials
            .iter()
            .filter(|material| {
                material
                    .borrow()
                    .texture_file_name
                    .to_lowercase()
                    .ends_with(&ending)
            })
            .cloned()
            .collect();

        log::debug!(
            "registered mirror `{}`: {} material(s) match `{}`",
            key,
            materials.len(),
            texture_file_name_ending
        );

        self.registered.insert(
            model_id,
            TargetSettings {
                materials: Rc::new(materials),
                texture_size,
                zoom,
                back_draw_distance,
                front_draw_distance,
                max_fps,
            },
        );

        Ok(())
    }

    /// Produce one render target per placed instance of a registered model,
    /// in structure-list order.
    ///
    /// Empty slots, instances without a model, and instances whose model has
    /// no registration are skipped; none of these are errors.
    pub fn create(&self) -> Vec<RenderTarget> {
        let mut targets = Vec::new();

        for structure in self.structures {
            let Some(structure) = structure else {
                continue;
            };
            let Some(model) = &structure.model else {
                continue;
            };
            let Some(settings) = self.registered.get(&(Rc::as_ptr(model) as usize)) else {
                continue;
            };

            targets.push(RenderTarget::new(
                Rc::downgrade(structure),
                Rc::clone(&settings.materials),
                settings.texture_size,
                settings.zoom,
                settings.back_draw_distance,
                settings.front_draw_distance,
                settings.max_fps,
            ));
        }

        targets
    }
}
