//! The single owner of parameters and the displayed galaxy.
//!
//! Whatever drives the program (window loop, egui panel, tests) holds one
//! [`GalaxyController`] and lends it a [`Scene`] for each call:
//!
//! - [`start`](GalaxyController::start) once, to build the first galaxy,
//! - [`commit`](GalaxyController::commit) after each finished edit,
//! - [`update`](GalaxyController::update) every frame, to animate.

use log::error;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::SceneError;
use crate::lifecycle::{DisplayedField, FieldLifecycle};
use crate::params::GalaxyParams;
use crate::scene::Scene;

/// Detects when a parameter edit is finished.
///
/// Widgets report "changed" on every intermediate drag value. An edit is
/// committed once something changed and no pointer button is held any more,
/// which covers slider drags, color pickers, typed values and toggles alike.
#[derive(Debug, Default, Clone, Copy)]
pub struct EditCommit {
    pending: bool,
}

impl EditCommit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame of UI state. Returns `true` when the edit just completed.
    pub fn observe(&mut self, changed: bool, pointer_down: bool) -> bool {
        self.pending |= changed;
        if self.pending && !pointer_down {
            self.pending = false;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Parameters, RNG and displayed galaxy in one place.
pub struct GalaxyController {
    params: GalaxyParams,
    lifecycle: FieldLifecycle,
    rng: StdRng,
    edits: EditCommit,
}

impl GalaxyController {
    /// A controller seeded from OS entropy.
    pub fn new(params: GalaxyParams) -> Self {
        Self::with_rng(params, StdRng::from_entropy())
    }

    /// A controller whose galaxies are reproducible for a given seed.
    pub fn seeded(params: GalaxyParams, seed: u64) -> Self {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    fn with_rng(params: GalaxyParams, rng: StdRng) -> Self {
        Self {
            params,
            lifecycle: FieldLifecycle::new(),
            rng,
            edits: EditCommit::new(),
        }
    }

    pub fn params(&self) -> &GalaxyParams {
        &self.params
    }

    /// Edit parameters. Nothing is rebuilt until [`commit`](Self::commit).
    pub fn params_mut(&mut self) -> &mut GalaxyParams {
        &mut self.params
    }

    pub fn displayed(&self) -> Option<&DisplayedField> {
        self.lifecycle.displayed()
    }

    /// Build the first galaxy.
    pub fn start<S: Scene + ?Sized>(&mut self, scene: &mut S) -> Result<(), SceneError> {
        self.commit(scene)
    }

    /// Rebuild the galaxy from the current parameters.
    pub fn commit<S: Scene + ?Sized>(&mut self, scene: &mut S) -> Result<(), SceneError> {
        self.lifecycle
            .regenerate_with(&self.params, scene, &mut self.rng)
            .map(|_| ())
    }

    /// Replace all parameters and rebuild.
    pub fn replace_params<S: Scene + ?Sized>(
        &mut self,
        params: GalaxyParams,
        scene: &mut S,
    ) -> Result<(), SceneError> {
        self.params = params;
        self.commit(scene)
    }

    /// Feed one frame of edit state; rebuilds when an edit completes.
    ///
    /// Returns whether a rebuild happened.
    pub fn observe_edit<S: Scene + ?Sized>(
        &mut self,
        changed: bool,
        pointer_down: bool,
        scene: &mut S,
    ) -> Result<bool, SceneError> {
        if self.edits.observe(changed, pointer_down) {
            self.commit(scene)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Animate the displayed galaxy for the frame at `elapsed` seconds.
    ///
    /// Sets the Y rotation to `elapsed * rotation` and, with waviness on,
    /// moves every particle's Y to `sin(elapsed + original_x)` and uploads
    /// the new positions.
    pub fn update<S: Scene + ?Sized>(&mut self, elapsed: f32, scene: &mut S) -> Result<(), SceneError> {
        let rotation = self.params.rotation;
        let waviness = self.params.waviness;
        let Some(displayed) = self.lifecycle.displayed_mut() else {
            return Ok(());
        };
        let id = displayed.drawable();

        if waviness {
            displayed.field_mut().apply_wave(elapsed);
        }
        if displayed.field_mut().take_positions_dirty() {
            scene.upload_positions(id, displayed.field().positions())?;
        }

        scene.set_rotation_y(id, elapsed * rotation)
    }

    /// Release the displayed galaxy before the scene goes away.
    pub fn shutdown<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        if let Err(e) = self.lifecycle.release(scene) {
            error!("Failed to release galaxy on shutdown: {}", e);
        }
    }
}
