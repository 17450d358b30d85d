//! Keyboard scoring: the key-to-lane table and the capture scan.

use crate::audio::Cue;
use crate::config::{Targeting, Tuning};
use crate::entity::{FallingBox, Lane};

/// The four scoring keys. Case-sensitive: a shifted 'A' is not a catch.
pub fn lane_for_key(key: &str) -> Option<Lane> {
    match key {
        "a" => Some(Lane::Red),
        "s" => Some(Lane::Blue),
        "d" => Some(Lane::Yellow),
        "f" => Some(Lane::Green),
        _ => None,
    }
}

/// Offer `pressed` to the session's boxes per the tuning's targeting mode.
pub fn score_press(
    boxes: &mut [FallingBox],
    pressed: Lane,
    elapsed_ms: f64,
    finish_line: f64,
    tuning: &Tuning,
) -> i32 {
    match tuning.targeting {
        Targeting::NearestBox => score_nearest(boxes, pressed, elapsed_ms, finish_line, tuning),
        Targeting::EveryBox => score_every(boxes, pressed, elapsed_ms, finish_line, tuning),
    }
}

/// Score against the first non-empty box whose bottom edge sits strictly
/// inside the capture window around the finish line. A wrong-lane box inside
/// the window absorbs the press for 0; no box in the window scores 0.
pub fn score_nearest(
    boxes: &mut [FallingBox],
    pressed: Lane,
    elapsed_ms: f64,
    finish_line: f64,
    tuning: &Tuning,
) -> i32 {
    for item in boxes.iter_mut() {
        if item.lane.is_none() {
            continue;
        }
        let distance = item.y_bottom(elapsed_ms, tuning) - finish_line;
        if distance > -tuning.capture_radius && distance < tuning.capture_radius {
            return item.score_keypress(pressed, elapsed_ms, finish_line, tuning);
        }
    }
    0
}

/// Offer the press to every box, summing the contributions. Only relevant
/// when the phase gap is tight enough for several boxes to share the
/// tolerance band.
pub fn score_every(
    boxes: &mut [FallingBox],
    pressed: Lane,
    elapsed_ms: f64,
    finish_line: f64,
    tuning: &Tuning,
) -> i32 {
    boxes
        .iter_mut()
        .map(|item| item.score_keypress(pressed, elapsed_ms, finish_line, tuning))
        .sum()
}

/// Feedback sound for a contribution, if it earns one.
pub fn cue_for(contribution: i32, tuning: &Tuning) -> Option<Cue> {
    if contribution >= tuning.good_cue_at {
        Some(Cue::Good)
    } else if contribution < 0 {
        Some(Cue::Bad)
    } else {
        None
    }
}
