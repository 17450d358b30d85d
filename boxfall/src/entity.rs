//! Falling boxes and their timing arithmetic.
//!
//! A box never stores a position. Both edges are recomputed from the session
//! time on every call, so suspending the clock freezes the whole field and
//! no per-frame integration error can accumulate.

use crate::config::{Geometry, Tuning};
use crate::surface::Surface;

/// The four playable columns. Discriminants double as column indices, so a
/// sprite's x position is `column * lane_width`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lane {
    Red = 1,
    Blue = 2,
    Yellow = 3,
    Green = 4,
}

impl Lane {
    pub const ALL: [Lane; 4] = [Lane::Red, Lane::Blue, Lane::Yellow, Lane::Green];

    pub fn column(self) -> u32 {
        self as u32
    }
}

/// One slot of the session layout. `lane == None` is an empty slot: it keeps
/// its place in the cadence but never draws, never scores and never counts
/// as missed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FallingBox {
    pub lane: Option<Lane>,
    /// Rank in the session layout; each rank trails the previous by
    /// `phase_gap` units.
    pub offset: u32,
    scored: bool,
}

impl FallingBox {
    pub fn new(lane: Option<Lane>, offset: u32) -> Self {
        Self {
            lane,
            offset,
            scored: false,
        }
    }

    /// Whether this box has been resolved, by a catch or by a miss. Flips
    /// false to true at most once and never reverts.
    pub fn scored(&self) -> bool {
        self.scored
    }

    /// Top edge at the given session time.
    pub fn y_top(&self, elapsed_ms: f64, tuning: &Tuning) -> f64 {
        elapsed_ms * tuning.scroll_rate - self.offset as f64 * tuning.phase_gap
    }

    /// Bottom edge; always `y_top + box_size`.
    pub fn y_bottom(&self, elapsed_ms: f64, tuning: &Tuning) -> f64 {
        self.y_top(elapsed_ms, tuning) + tuning.box_size
    }

    /// Paint this box. Empty slots and boxes fully outside the canvas emit
    /// no draw ops; resolved boxes render half-transparent as feedback.
    pub fn draw(
        &self,
        elapsed_ms: f64,
        geometry: &Geometry,
        tuning: &Tuning,
        surface: &mut dyn Surface,
    ) {
        let Some(lane) = self.lane else {
            return;
        };

        let top = self.y_top(elapsed_ms, tuning);
        let bottom = top + tuning.box_size;
        if bottom < 0.0 || top > geometry.height {
            return;
        }

        if self.scored {
            surface.set_alpha(0.5);
        }
        let x = lane.column() as f64 * tuning.lane_width;
        surface.draw_sprite(lane, x, top, tuning.box_size, tuning.box_size);
        surface.set_alpha(1.0);
    }

    /// Mark a newly missed box: true exactly once, the first time the bottom
    /// edge is found past `miss_line` without having been caught.
    pub fn register_miss(&mut self, elapsed_ms: f64, miss_line: f64, tuning: &Tuning) -> bool {
        if self.lane.is_none() || self.scored {
            return false;
        }
        if self.y_bottom(elapsed_ms, tuning) > miss_line {
            self.scored = true;
            return true;
        }
        false
    }

    /// Score a keypress against this box, returning its contribution.
    ///
    /// Returns 0 without side effects when the box is already resolved, the
    /// lane does not match, or the bottom edge is further than `tolerance`
    /// from the finish line. Otherwise marks the box resolved and returns
    /// `floor(max_bonus - closeness)`; a catch past `max_bonus` units out is
    /// worth negative points.
    pub fn score_keypress(
        &mut self,
        pressed: Lane,
        elapsed_ms: f64,
        finish_line: f64,
        tuning: &Tuning,
    ) -> i32 {
        if self.scored || self.lane != Some(pressed) {
            return 0;
        }

        let closeness = (self.y_bottom(elapsed_ms, tuning) - finish_line).abs();
        if closeness > tuning.tolerance {
            return 0;
        }

        self.scored = true;
        (tuning.max_bonus - closeness).floor() as i32
    }
}
