//! Session orchestration. `Game` owns the store, the engine and the tuning,
//! and exposes the three host entry points: animation frames, key presses
//! and visibility changes. Hosts hand in their surfaces; nothing here knows
//! about the browser.

use log::{debug, info};

use crate::audio::AudioOut;
use crate::config::{Geometry, Tuning};
use crate::engine::{self, Engine, Phase};
use crate::entity::FallingBox;
use crate::input;
use crate::store::{Action, GameState, Store, Subscription};
use crate::surface::Surface;

pub struct Game {
    tuning: Tuning,
    geometry: Geometry,
    store: Store,
    engine: Engine,
}

impl Game {
    /// Start a session with a layout drawn from `seed`. `now_ms` becomes the
    /// session epoch, so boxes begin falling from this instant even if the
    /// host enters the frame loop later.
    pub fn new(tuning: Tuning, geometry: Geometry, seed: u64, now_ms: f64) -> Self {
        let store = Store::new(&tuning, seed, now_ms);
        Self::assemble(tuning, geometry, store)
    }

    /// Start a session over an explicit layout.
    pub fn with_boxes(
        tuning: Tuning,
        geometry: Geometry,
        boxes: Vec<FallingBox>,
        now_ms: f64,
    ) -> Self {
        let store = Store::with_boxes(&tuning, boxes, now_ms);
        Self::assemble(tuning, geometry, store)
    }

    fn assemble(tuning: Tuning, geometry: Geometry, mut store: Store) -> Self {
        let engine = Engine::new(&mut store, &tuning);
        info!(
            "session start: {} slots on a {}x{} field",
            store.get().boxes().len(),
            geometry.width,
            geometry.height
        );
        Self {
            tuning,
            geometry,
            store,
            engine,
        }
    }

    pub fn state(&self) -> &GameState {
        self.store.get()
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Register a store subscriber (HUD bindings and the like).
    pub fn subscribe(&mut self, callback: impl Fn(&GameState) + 'static) -> Subscription {
        self.store.subscribe(callback)
    }

    /// One animation frame. Returns whether the host should schedule the
    /// next one.
    ///
    /// A running frame is atomic: progress, miss sweep, clear, background,
    /// then every box in insertion order. The frame that discovers game over
    /// still paints in full, then stops the music and refuses rescheduling.
    pub fn frame(
        &mut self,
        now_ms: f64,
        surface: &mut dyn Surface,
        audio: &mut dyn AudioOut,
    ) -> bool {
        match self.engine.phase() {
            Phase::Terminated => return false,
            Phase::Suspended => return true,
            Phase::Running => {}
        }

        let session_now = self.engine.session_now(now_ms);
        self.store.update(Action::Progress { now_ms: session_now });

        // Sweep misses before painting, so entity iteration never
        // interleaves with score dispatches.
        let elapsed = self.store.get().elapsed_ms();
        let miss_line = self.geometry.miss_line();
        let mut missed = 0u32;
        for item in self.store.boxes_mut() {
            if item.register_miss(elapsed, miss_line, &self.tuning) {
                missed += 1;
            }
        }
        for _ in 0..missed {
            self.store.update(Action::AddToScore {
                addition: self.tuning.miss_penalty,
            });
        }

        surface.clear();
        engine::paint_background(&self.geometry, surface);
        let state = self.store.get();
        for item in state.boxes() {
            item.draw(state.elapsed_ms(), &self.geometry, &self.tuning, surface);
        }

        if self.engine.game_over() {
            info!("game over at score {}", self.store.get().score());
            self.engine.terminate();
            audio.music_pause();
            return false;
        }
        true
    }

    /// Host keydown entry. Only the four scoring keys do anything, and only
    /// while the session is alive.
    pub fn key_pressed(&mut self, key: &str, audio: &mut dyn AudioOut) {
        if self.engine.phase() == Phase::Terminated {
            return;
        }
        let Some(lane) = input::lane_for_key(key) else {
            return;
        };

        let elapsed = self.store.get().elapsed_ms();
        let finish_line = self.geometry.finish_line();
        let contribution = input::score_press(
            self.store.boxes_mut(),
            lane,
            elapsed,
            finish_line,
            &self.tuning,
        );
        debug!("{:?} press scored {contribution}", lane);
        if contribution == 0 {
            return;
        }

        if let Some(cue) = input::cue_for(contribution, &self.tuning) {
            audio.cue(cue);
        }
        self.store.update(Action::AddToScore {
            addition: contribution,
        });
    }

    /// Host visibilitychange entry: hiding suspends, revealing resumes.
    /// Neither direction does anything once the session has terminated.
    pub fn visibility_changed(&mut self, hidden: bool, now_ms: f64, audio: &mut dyn AudioOut) {
        match (self.engine.phase(), hidden) {
            (Phase::Running, true) => {
                self.engine.suspend(now_ms);
                audio.music_pause();
            }
            (Phase::Suspended, false) => {
                self.engine.resume(now_ms);
                audio.music_play();
            }
            _ => {}
        }
    }
}
