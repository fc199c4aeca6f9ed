//! Generated particle buffers.

use glam::Vec3;

/// Positions and colors of one generated galaxy, index-aligned.
///
/// Produced by [`generate`](crate::generate). After that only the Y
/// components of `positions` ever change, through [`ParticleField::apply_wave`],
/// which also raises the dirty bit telling the renderer to re-upload.
#[derive(Debug, Clone)]
pub struct ParticleField {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    /// X of every particle as generated, kept so the wave never compounds.
    original_x: Vec<f32>,
    positions_dirty: bool,
}

impl ParticleField {
    /// Build a field from parallel buffers.
    ///
    /// # Panics
    ///
    /// Panics if the buffers differ in length.
    pub fn new(positions: Vec<Vec3>, colors: Vec<Vec3>) -> Self {
        assert_eq!(
            positions.len(),
            colors.len(),
            "positions and colors must be index-aligned"
        );
        let original_x = positions.iter().map(|p| p.x).collect();
        Self {
            positions,
            colors,
            original_x,
            positions_dirty: false,
        }
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// X coordinates as generated.
    #[inline]
    pub fn original_x(&self) -> &[f32] {
        &self.original_x
    }

    /// Overwrite every Y with `sin(elapsed + original_x)`.
    ///
    /// Depends only on `elapsed`, so calling it twice with the same time is a no-op.
    pub fn apply_wave(&mut self, elapsed: f32) {
        for (p, x) in self.positions.iter_mut().zip(&self.original_x) {
            p.y = (elapsed + x).sin();
        }
        self.positions_dirty = true;
    }

    #[inline]
    pub fn positions_dirty(&self) -> bool {
        self.positions_dirty
    }

    /// Clear the dirty bit, returning whether it was set.
    pub fn take_positions_dirty(&mut self) -> bool {
        std::mem::take(&mut self.positions_dirty)
    }

    /// Positions flattened to `[x, y, z, x, y, z, ...]` for upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colors flattened to `[r, g, b, r, g, b, ...]` for upload.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }
}
