//! Rendering seam. The core paints through this trait so gameplay runs
//! identically against a browser canvas or a recording double in tests.

use crate::entity::Lane;

pub trait Surface {
    /// Wipe the whole canvas.
    fn clear(&mut self);

    /// Axis-aligned filled rectangle in a CSS color.
    fn fill_rect(&mut self, color: &str, x: f64, y: f64, w: f64, h: f64);

    /// Blit the sprite for `lane` with its top-left corner at (x, y).
    fn draw_sprite(&mut self, lane: Lane, x: f64, y: f64, w: f64, h: f64);

    /// Global alpha applied to subsequent draws.
    fn set_alpha(&mut self, alpha: f64);
}
