//! Frame-loop lifecycle and the session clock.
//!
//! The engine never schedules anything itself. The host calls
//! [`crate::game::Game::frame`] with raw timestamps and the engine maps them
//! onto a session clock that carves out time spent suspended, so a hidden
//! tab freezes the field exactly instead of letting it jump on return.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::{Geometry, Tuning};
use crate::store::{Store, Subscription};
use crate::surface::Surface;

/// Lifecycle of the render loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Suspended,
    /// Terminal. No input, visibility change or progress dispatch re-enters
    /// the loop after this.
    Terminated,
}

/// Loop bookkeeping: phase transitions, pause accounting, and the game-over
/// latch fed by a store subscription.
pub struct Engine {
    phase: Phase,
    paused_ms: f64,
    pause_began: Option<f64>,
    game_over: Rc<Cell<bool>>,
    // Watches the score for the session floor; lives as long as the engine.
    _game_over_watch: Subscription,
}

impl Engine {
    /// Wire a fresh engine to `store`, latching game over as soon as the
    /// score falls to the tuning floor.
    pub fn new(store: &mut Store, tuning: &Tuning) -> Self {
        let game_over = Rc::new(Cell::new(false));
        let watch = {
            let game_over = game_over.clone();
            let floor = tuning.score_min;
            store.subscribe(move |state| {
                if state.score() <= floor {
                    game_over.set(true);
                }
            })
        };
        Self {
            phase: Phase::Running,
            paused_ms: 0.0,
            pause_began: None,
            game_over,
            _game_over_watch: watch,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.game_over.get()
    }

    /// Map a raw host timestamp onto the session clock. While suspended the
    /// clock reads the instant the suspension began, so elapsed time is
    /// frozen rather than distorted.
    pub fn session_now(&self, raw_now_ms: f64) -> f64 {
        match self.pause_began {
            Some(began) => began - self.paused_ms,
            None => raw_now_ms - self.paused_ms,
        }
    }

    pub fn suspend(&mut self, raw_now_ms: f64) {
        if self.phase == Phase::Running {
            self.phase = Phase::Suspended;
            self.pause_began = Some(raw_now_ms);
        }
    }

    pub fn resume(&mut self, raw_now_ms: f64) {
        if self.phase == Phase::Suspended {
            if let Some(began) = self.pause_began.take() {
                self.paused_ms += raw_now_ms - began;
            }
            self.phase = Phase::Running;
        }
    }

    pub fn terminate(&mut self) {
        self.phase = Phase::Terminated;
    }
}

/// Grey field, the green finish line, and the yellow/pink timing guides
/// bracketing it at 10 and 20 units.
pub fn paint_background(geometry: &Geometry, surface: &mut dyn Surface) {
    let w = geometry.width;
    let finish = geometry.finish_line();

    surface.fill_rect("#f0f0f0", 0.0, 0.0, w, geometry.height);

    // finish line
    surface.fill_rect("#00ff00", 0.0, finish, w, 1.0);

    surface.fill_rect("#dddd00", 0.0, finish + 10.0, w, 1.0);
    surface.fill_rect("#dddd00", 0.0, finish - 10.0, w, 1.0);

    surface.fill_rect("#ffaaaa", 0.0, finish + 20.0, w, 1.0);
    surface.fill_rect("#ffaaaa", 0.0, finish - 20.0, w, 1.0);
}
