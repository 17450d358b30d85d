//! Score presentation math shared by the web HUD and tests.

/// Map a clamped score onto a 0-100% position along the ticker track.
/// The midpoint of the range sits at 50%.
pub fn marker_percent(score: i32, score_min: i32, score_max: i32) -> f64 {
    let span = (score_max - score_min) as f64;
    if span <= 0.0 {
        return 50.0;
    }
    (score - score_min) as f64 * 100.0 / span
}
