//! Ownership of the displayed galaxy.
//!
//! [`FieldLifecycle`] holds at most one [`DisplayedField`]. Regenerating
//! always releases the current one (detach, then dispose) before generating
//! and attaching its replacement, so a scene never shows two galaxies and
//! never holds two full sets of buffers.
//!
//! # Sequence
//!
//! | Step | Scene call |
//! |------|------------|
//! | 1 | `detach(old)` |
//! | 2 | `dispose(old)` (always, even if step 1 failed) |
//! | 3 | generate new buffers |
//! | 4 | `create_points(new)` |
//! | 5 | `attach(new)` |

use std::time::Instant;

use log::{debug, error, info};
use rand::Rng;

use crate::error::SceneError;
use crate::field::ParticleField;
use crate::generator::generate_with;
use crate::params::GalaxyParams;
use crate::scene::{DrawableId, Scene};
use crate::visuals::PointsMaterial;

/// The galaxy currently in the scene.
#[derive(Debug)]
pub struct DisplayedField {
    field: ParticleField,
    drawable: DrawableId,
}

impl DisplayedField {
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn drawable(&self) -> DrawableId {
        self.drawable
    }
}

/// Sole writer of the [`DisplayedField`].
#[derive(Debug, Default)]
pub struct FieldLifecycle {
    displayed: Option<DisplayedField>,
}

impl FieldLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn displayed(&self) -> Option<&DisplayedField> {
        self.displayed.as_ref()
    }

    pub fn displayed_mut(&mut self) -> Option<&mut DisplayedField> {
        self.displayed.as_mut()
    }

    /// Replace the displayed galaxy with a fresh one built from `params`.
    ///
    /// Uses the thread-local RNG.
    pub fn regenerate<S: Scene + ?Sized>(
        &mut self,
        params: &GalaxyParams,
        scene: &mut S,
    ) -> Result<&DisplayedField, SceneError> {
        self.regenerate_with(params, scene, &mut rand::thread_rng())
    }

    /// Replace the displayed galaxy, drawing randomness from `rng`.
    ///
    /// If releasing the old field fails, the replacement is still built and
    /// attached, and the release error is returned with the new field in
    /// place. An attach failure leaves nothing displayed.
    pub fn regenerate_with<S: Scene + ?Sized, R: Rng + ?Sized>(
        &mut self,
        params: &GalaxyParams,
        scene: &mut S,
        rng: &mut R,
    ) -> Result<&DisplayedField, SceneError> {
        let released = self.release(scene);
        if let Err(e) = &released {
            error!("Releasing the previous galaxy failed: {}", e);
        }

        let start = Instant::now();
        let field = generate_with(params, rng);
        let drawable = scene.create_points(&field, &PointsMaterial::from(params));
        if let Err(e) = scene.attach(drawable) {
            // Never hold a drawable the scene refused
            if let Err(disposed) = scene.dispose(drawable) {
                error!("Disposing refused drawable {} failed: {}", drawable, disposed);
            }
            return Err(e);
        }

        info!(
            "Generated galaxy: {} particles, {} branches in {:.1} ms",
            field.len(),
            params.branches,
            start.elapsed().as_secs_f64() * 1000.0
        );
        debug!("Attached drawable {}", drawable);

        let displayed: &DisplayedField = self.displayed.insert(DisplayedField { field, drawable });
        released.map(|()| displayed)
    }

    /// Detach and dispose the displayed galaxy, if any.
    pub fn release<S: Scene + ?Sized>(&mut self, scene: &mut S) -> Result<(), SceneError> {
        let Some(old) = self.displayed.take() else {
            return Ok(());
        };

        let detached = scene.detach(old.drawable);
        let disposed = scene.dispose(old.drawable);
        debug!("Released drawable {}", old.drawable);
        drop(old);

        detached.and(disposed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::HeadlessScene;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_first_regenerate_attaches() {
        let mut scene = HeadlessScene::new();
        let mut lifecycle = FieldLifecycle::new();
        let id = lifecycle
            .regenerate(&GalaxyParams::default(), &mut scene)
            .unwrap()
            .drawable();

        assert_eq!(scene.attached(), &[id]);
        assert_eq!(scene.detach_count, 0);
    }

    #[test]
    fn test_release_empties_scene() {
        let mut scene = HeadlessScene::new();
        let mut lifecycle = FieldLifecycle::new();
        lifecycle.regenerate(&GalaxyParams::default(), &mut scene).unwrap();

        lifecycle.release(&mut scene).unwrap();
        assert!(lifecycle.displayed().is_none());
        assert!(scene.attached().is_empty());
        assert_eq!(scene.live(), 0);

        // Nothing left to release
        lifecycle.release(&mut scene).unwrap();
        assert_eq!(scene.dispose_count, 1);
    }

    #[test]
    fn test_material_follows_size() {
        let mut scene = HeadlessScene::new();
        let mut lifecycle = FieldLifecycle::new();
        let params = GalaxyParams {
            size: 0.07,
            ..Default::default()
        };
        let id = lifecycle
            .regenerate_with(&params, &mut scene, &mut StdRng::seed_from_u64(5))
            .unwrap()
            .drawable();
        assert_eq!(scene.material(id).map(|m| m.size), Some(0.07));
    }

    #[test]
    fn test_old_released_even_if_detached_externally() {
        let mut scene = HeadlessScene::new();
        let mut lifecycle = FieldLifecycle::new();
        let first = lifecycle
            .regenerate(&GalaxyParams::default(), &mut scene)
            .unwrap()
            .drawable();

        // Someone else broke the invariant
        scene.detach(first).unwrap();

        let err = lifecycle
            .regenerate(&GalaxyParams::default(), &mut scene)
            .unwrap_err();
        assert_eq!(err, SceneError::NotAttached(first));
        assert!(!scene.is_live(first));

        // The replacement is on screen regardless
        let second = lifecycle.displayed().map(|d| d.drawable()).unwrap();
        assert_ne!(second, first);
        assert_eq!(scene.attached(), &[second]);
        assert_eq!(scene.live(), 1);
    }

    /// Refuses every attach, and reports failure from every dispose after doing it.
    #[derive(Default)]
    struct RefusingScene {
        inner: HeadlessScene,
        dispose_calls: u32,
    }

    impl Scene for RefusingScene {
        fn create_points(
            &mut self,
            field: &ParticleField,
            material: &PointsMaterial,
        ) -> DrawableId {
            self.inner.create_points(field, material)
        }

        fn attach(&mut self, id: DrawableId) -> Result<(), SceneError> {
            Err(SceneError::AlreadyAttached(id))
        }

        fn detach(&mut self, id: DrawableId) -> Result<(), SceneError> {
            self.inner.detach(id)
        }

        fn dispose(&mut self, id: DrawableId) -> Result<(), SceneError> {
            self.dispose_calls += 1;
            self.inner.dispose(id)?;
            Err(SceneError::UnknownDrawable(id))
        }

        fn upload_positions(
            &mut self,
            id: DrawableId,
            positions: &[glam::Vec3],
        ) -> Result<(), SceneError> {
            self.inner.upload_positions(id, positions)
        }

        fn set_rotation_y(&mut self, id: DrawableId, angle: f32) -> Result<(), SceneError> {
            self.inner.set_rotation_y(id, angle)
        }
    }

    #[test]
    fn test_refused_attach_disposes_and_reports_attach_error() {
        let mut scene = RefusingScene::default();
        let mut lifecycle = FieldLifecycle::new();

        let err = lifecycle
            .regenerate(&GalaxyParams::default(), &mut scene)
            .unwrap_err();

        // The attach error wins over the failed dispose
        assert!(matches!(err, SceneError::AlreadyAttached(_)));
        assert_eq!(scene.dispose_calls, 1);
        assert_eq!(scene.inner.live(), 0);
        assert!(lifecycle.displayed().is_none());
    }
}
