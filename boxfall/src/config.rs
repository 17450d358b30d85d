//! Session tuning and playfield geometry.
//!
//! Every gameplay constant lives here so the core stays free of magic
//! numbers and tests can shrink the field or the cadence at will.

/// Which boxes a keypress is offered to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Targeting {
    /// Only the first box whose bottom edge sits inside the capture window
    /// around the finish line, in insertion order. A wrong-lane box inside
    /// the window absorbs the press.
    #[default]
    NearestBox,
    /// Every box, summing the individual contributions.
    EveryBox,
}

/// Gameplay constants for one session.
///
/// Distances are canvas units (pixels at 1x), times are milliseconds, so
/// `scroll_rate` is px/ms.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tuning {
    /// Downward speed of the box field.
    pub scroll_rate: f64,
    /// Vertical spacing between consecutive offsets.
    pub phase_gap: f64,
    /// Sprite edge length; boxes are square.
    pub box_size: f64,
    /// Horizontal width of one lane column.
    pub lane_width: f64,
    /// Slots generated per session.
    pub box_count: u32,
    /// Score floor; reaching it ends the session.
    pub score_min: i32,
    /// Score ceiling.
    pub score_max: i32,
    /// Best possible catch contribution, eroded by closeness.
    pub max_bonus: f64,
    /// A press further than this from the finish line scores nothing.
    pub tolerance: f64,
    /// Half-height of the window a press searches for a target in.
    pub capture_radius: f64,
    /// Contribution dispatched for every box that sails past uncaught.
    pub miss_penalty: i32,
    /// Contributions at or above this trigger the good-score cue.
    pub good_cue_at: i32,
    pub targeting: Targeting,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scroll_rate: 0.1,
            phase_gap: 120.0,
            box_size: 80.0,
            lane_width: 80.0,
            box_count: 255,
            score_min: -40,
            score_max: 40,
            max_bonus: 10.0,
            tolerance: 20.0,
            capture_radius: 30.0,
            miss_penalty: -9,
            good_cue_at: 8,
            targeting: Targeting::NearestBox,
        }
    }
}

/// Canvas dimensions. The finish and miss lines hang off the bottom edge, so
/// they move with the viewport height.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The line players time their catches against.
    pub fn finish_line(&self) -> f64 {
        self.height - 80.0
    }

    /// A box whose bottom edge drops past this uncaught counts as missed.
    pub fn miss_line(&self) -> f64 {
        self.height - 60.0
    }
}
