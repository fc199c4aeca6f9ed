//! The surface the lifecycle manager draws into.
//!
//! A [`Scene`] owns drawable resources (geometry buffers and a material) and
//! hands out [`DrawableId`]s for them. Creating a drawable allocates its
//! resources, attaching makes it visible, detaching hides it, disposing frees
//! the resources. The GPU renderer implements this for real; [`HeadlessScene`]
//! only keeps the books.

use std::collections::HashMap;
use std::fmt;

use glam::Vec3;

use crate::error::SceneError;
use crate::field::ParticleField;
use crate::visuals::PointsMaterial;

/// Opaque handle to a drawable owned by a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableId(pub u64);

impl fmt::Display for DrawableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Container of point-cloud drawables.
pub trait Scene {
    /// Allocate geometry and material for `field`. The drawable starts detached.
    fn create_points(&mut self, field: &ParticleField, material: &PointsMaterial) -> DrawableId;

    /// Make a drawable visible.
    fn attach(&mut self, id: DrawableId) -> Result<(), SceneError>;

    /// Hide a drawable. Its resources stay allocated.
    fn detach(&mut self, id: DrawableId) -> Result<(), SceneError>;

    /// Free a drawable's geometry and material. The handle is dead afterwards.
    fn dispose(&mut self, id: DrawableId) -> Result<(), SceneError>;

    /// Replace a drawable's positions, e.g. after the wave moved them.
    fn upload_positions(&mut self, id: DrawableId, positions: &[Vec3]) -> Result<(), SceneError>;

    /// Set a drawable's rotation around the Y axis, in radians.
    fn set_rotation_y(&mut self, id: DrawableId, angle: f32) -> Result<(), SceneError>;
}

#[derive(Debug, Clone)]
struct HeadlessDrawable {
    count: usize,
    material: PointsMaterial,
    rotation_y: f32,
    uploads: u32,
}

/// A [`Scene`] without a GPU.
///
/// Tracks live resources and attachment the same way the renderer does, and
/// counts every call so tests and benchmarks can check the sequencing.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    next_id: u64,
    drawables: HashMap<DrawableId, HeadlessDrawable>,
    attached: Vec<DrawableId>,
    /// Total `attach` calls that succeeded.
    pub attach_count: u32,
    /// Total `detach` calls that succeeded.
    pub detach_count: u32,
    /// Total `dispose` calls that succeeded.
    pub dispose_count: u32,
    /// Most drawables ever alive at the moment a new one was created.
    pub peak_live: usize,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drawables currently attached, in attach order.
    pub fn attached(&self) -> &[DrawableId] {
        &self.attached
    }

    /// Drawables with allocated resources.
    pub fn live(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_live(&self, id: DrawableId) -> bool {
        self.drawables.contains_key(&id)
    }

    /// Particle count of a drawable.
    pub fn point_count(&self, id: DrawableId) -> Option<usize> {
        self.drawables.get(&id).map(|d| d.count)
    }

    pub fn material(&self, id: DrawableId) -> Option<&PointsMaterial> {
        self.drawables.get(&id).map(|d| &d.material)
    }

    pub fn rotation_y(&self, id: DrawableId) -> Option<f32> {
        self.drawables.get(&id).map(|d| d.rotation_y)
    }

    /// How many times positions were re-uploaded for a drawable.
    pub fn uploads(&self, id: DrawableId) -> Option<u32> {
        self.drawables.get(&id).map(|d| d.uploads)
    }

    fn get_mut(&mut self, id: DrawableId) -> Result<&mut HeadlessDrawable, SceneError> {
        self.drawables
            .get_mut(&id)
            .ok_or(SceneError::UnknownDrawable(id))
    }
}

impl Scene for HeadlessScene {
    fn create_points(&mut self, field: &ParticleField, material: &PointsMaterial) -> DrawableId {
        self.peak_live = self.peak_live.max(self.drawables.len() + 1);
        let id = DrawableId(self.next_id);
        self.next_id += 1;
        self.drawables.insert(
            id,
            HeadlessDrawable {
                count: field.len(),
                material: *material,
                rotation_y: 0.0,
                uploads: 0,
            },
        );
        id
    }

    fn attach(&mut self, id: DrawableId) -> Result<(), SceneError> {
        if !self.drawables.contains_key(&id) {
            return Err(SceneError::UnknownDrawable(id));
        }
        if self.attached.contains(&id) {
            return Err(SceneError::AlreadyAttached(id));
        }
        self.attached.push(id);
        self.attach_count += 1;
        Ok(())
    }

    fn detach(&mut self, id: DrawableId) -> Result<(), SceneError> {
        let pos = self
            .attached
            .iter()
            .position(|a| *a == id)
            .ok_or(SceneError::NotAttached(id))?;
        self.attached.remove(pos);
        self.detach_count += 1;
        Ok(())
    }

    fn dispose(&mut self, id: DrawableId) -> Result<(), SceneError> {
        self.drawables
            .remove(&id)
            .ok_or(SceneError::UnknownDrawable(id))?;
        // A disposed drawable can't stay visible
        self.attached.retain(|a| *a != id);
        self.dispose_count += 1;
        Ok(())
    }

    fn upload_positions(&mut self, id: DrawableId, positions: &[Vec3]) -> Result<(), SceneError> {
        let drawable = self.get_mut(id)?;
        drawable.count = positions.len();
        drawable.uploads += 1;
        Ok(())
    }

    fn set_rotation_y(&mut self, id: DrawableId, angle: f32) -> Result<(), SceneError> {
        self.get_mut(id)?.rotation_y = angle;
        Ok(())
    }
}
