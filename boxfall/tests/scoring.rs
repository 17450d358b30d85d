// Integration tests (native) for box timing math: derived positions, catch
// scoring, miss registration and draw culling. Geometry is fixed at 480x640
// so the finish line sits at 560 and the miss line at 580.

use approx::assert_relative_eq;

use boxfall::config::{Geometry, Tuning};
use boxfall::entity::{FallingBox, Lane};
use boxfall::surface::Surface;

fn geometry() -> Geometry {
    Geometry::new(480.0, 640.0)
}

#[derive(Debug, PartialEq)]
enum Op {
    Sprite(Lane, f64, f64),
    Alpha(f64),
}

#[derive(Default)]
struct RecordingSurface {
    ops: Vec<Op>,
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {}
    fn fill_rect(&mut self, _color: &str, _x: f64, _y: f64, _w: f64, _h: f64) {}
    fn draw_sprite(&mut self, lane: Lane, x: f64, y: f64, _w: f64, _h: f64) {
        self.ops.push(Op::Sprite(lane, x, y));
    }
    fn set_alpha(&mut self, alpha: f64) {
        self.ops.push(Op::Alpha(alpha));
    }
}

#[test]
fn bottom_edge_tracks_top_edge() {
    let tuning = Tuning::default();
    let item = FallingBox::new(Some(Lane::Red), 3);

    for elapsed in [0.0, 1234.5, 99999.0] {
        assert_relative_eq!(
            item.y_bottom(elapsed, &tuning),
            item.y_top(elapsed, &tuning) + tuning.box_size
        );
    }
}

#[test]
fn offset_delays_the_fall_by_the_phase_gap() {
    let tuning = Tuning::default();
    let front = FallingBox::new(Some(Lane::Red), 0);
    let behind = FallingBox::new(Some(Lane::Red), 1);

    assert_relative_eq!(
        behind.y_top(800.0, &tuning),
        front.y_top(800.0, &tuning) - tuning.phase_gap
    );
}

#[test]
fn perfect_catch_scores_the_max_bonus() {
    let tuning = Tuning::default();
    let finish = geometry().finish_line();
    let mut item = FallingBox::new(Some(Lane::Red), 0);

    // Bottom edge exactly on the finish line.
    assert_relative_eq!(item.y_bottom(4800.0, &tuning), finish);
    assert_eq!(item.score_keypress(Lane::Red, 4800.0, finish, &tuning), 10);
    assert!(item.scored());
}

#[test]
fn fractional_closeness_floors_the_bonus() {
    let tuning = Tuning::default();
    let finish = geometry().finish_line();
    let mut item = FallingBox::new(Some(Lane::Red), 0);

    // Bottom at 560.5, half a unit late.
    assert_eq!(item.score_keypress(Lane::Red, 4805.0, finish, &tuning), 9);
}

#[test]
fn sloppy_catch_costs_points() {
    let tuning = Tuning::default();
    let finish = geometry().finish_line();
    let mut item = FallingBox::new(Some(Lane::Red), 0);

    // Bottom at 575: inside tolerance but 15 units out.
    assert_eq!(item.score_keypress(Lane::Red, 4950.0, finish, &tuning), -5);
    assert!(item.scored());
}

#[test]
fn tolerance_boundary_still_scores() {
    let tuning = Tuning::default();
    let finish = geometry().finish_line();
    let mut item = FallingBox::new(Some(Lane::Red), 0);

    // Bottom at 540, exactly 20 out: not beyond tolerance, worth -10.
    assert_eq!(item.score_keypress(Lane::Red, 4600.0, finish, &tuning), -10);
}

#[test]
fn outside_tolerance_leaves_the_box_unscored() {
    let tuning = Tuning::default();
    let finish = geometry().finish_line();
    let mut item = FallingBox::new(Some(Lane::Red), 0);

    // Bottom at 581, 21 units out.
    assert_eq!(item.score_keypress(Lane::Red, 5010.0, finish, &tuning), 0);
    assert!(!item.scored());
}

#[test]
fn second_press_scores_zero() {
    let tuning = Tuning::default();
    let finish = geometry().finish_line();
    let mut item = FallingBox::new(Some(Lane::Red), 0);

    assert_eq!(item.score_keypress(Lane::Red, 4800.0, finish, &tuning), 10);
    assert_eq!(item.score_keypress(Lane::Red, 4800.0, finish, &tuning), 0);
}

#[test]
fn wrong_lane_scores_zero() {
    let tuning = Tuning::default();
    let finish = geometry().finish_line();
    let mut item = FallingBox::new(Some(Lane::Red), 0);

    assert_eq!(item.score_keypress(Lane::Blue, 4800.0, finish, &tuning), 0);
    assert!(!item.scored());
}

#[test]
fn empty_slot_never_scores() {
    let tuning = Tuning::default();
    let finish = geometry().finish_line();
    let mut item = FallingBox::new(None, 0);

    for lane in Lane::ALL {
        assert_eq!(item.score_keypress(lane, 4800.0, finish, &tuning), 0);
    }
}

#[test]
fn miss_registers_once_past_the_line() {
    let tuning = Tuning::default();
    let miss_line = geometry().miss_line();
    let mut item = FallingBox::new(Some(Lane::Red), 0);

    // Bottom exactly on the miss line does not count yet.
    assert!(!item.register_miss(5000.0, miss_line, &tuning));
    // One unit past: missed, exactly once.
    assert!(item.register_miss(5010.0, miss_line, &tuning));
    assert!(!item.register_miss(5010.0, miss_line, &tuning));
    assert!(item.scored());
}

#[test]
fn caught_boxes_are_never_missed() {
    let tuning = Tuning::default();
    let geometry = geometry();
    let mut item = FallingBox::new(Some(Lane::Red), 0);

    assert_eq!(
        item.score_keypress(Lane::Red, 4800.0, geometry.finish_line(), &tuning),
        10
    );
    assert!(!item.register_miss(5010.0, geometry.miss_line(), &tuning));
}

#[test]
fn empty_slots_are_never_missed() {
    let tuning = Tuning::default();
    let mut item = FallingBox::new(None, 0);

    assert!(!item.register_miss(999999.0, geometry().miss_line(), &tuning));
}

#[test]
fn draw_skips_empty_slots() {
    let tuning = Tuning::default();
    let mut surface = RecordingSurface::default();

    FallingBox::new(None, 0).draw(1000.0, &geometry(), &tuning, &mut surface);
    assert!(surface.ops.is_empty());
}

#[test]
fn draw_culls_boxes_outside_the_canvas() {
    let tuning = Tuning::default();
    let mut surface = RecordingSurface::default();

    // Still above the canvas: bottom edge at -520.
    FallingBox::new(Some(Lane::Red), 5).draw(0.0, &geometry(), &tuning, &mut surface);
    // Already below the canvas: top edge at 650.
    FallingBox::new(Some(Lane::Red), 0).draw(6500.0, &geometry(), &tuning, &mut surface);
    assert!(surface.ops.is_empty());
}

#[test]
fn draw_places_the_sprite_by_lane_column() {
    let tuning = Tuning::default();
    let mut surface = RecordingSurface::default();

    FallingBox::new(Some(Lane::Yellow), 0).draw(1000.0, &geometry(), &tuning, &mut surface);
    assert_eq!(
        surface.ops,
        vec![Op::Sprite(Lane::Yellow, 240.0, 100.0), Op::Alpha(1.0)]
    );
}

#[test]
fn draw_keeps_partially_visible_boxes() {
    let tuning = Tuning::default();
    let mut surface = RecordingSurface::default();

    // Top edge at -40: the lower half has entered the canvas.
    FallingBox::new(Some(Lane::Blue), 1).draw(800.0, &geometry(), &tuning, &mut surface);
    assert_eq!(
        surface.ops,
        vec![Op::Sprite(Lane::Blue, 160.0, -40.0), Op::Alpha(1.0)]
    );
}

#[test]
fn resolved_boxes_render_half_transparent() {
    let tuning = Tuning::default();
    let geometry = geometry();
    let mut item = FallingBox::new(Some(Lane::Red), 0);
    let mut surface = RecordingSurface::default();

    assert_eq!(
        item.score_keypress(Lane::Red, 4800.0, geometry.finish_line(), &tuning),
        10
    );
    item.draw(4800.0, &geometry, &tuning, &mut surface);
    assert_eq!(
        surface.ops,
        vec![
            Op::Alpha(0.5),
            Op::Sprite(Lane::Red, 80.0, 480.0),
            Op::Alpha(1.0)
        ]
    );
}
