//! Reactive session state: one state value, a closed action set, and
//! synchronous change notification.
//!
//! Mutation goes through [`Store::update`] only; callbacks receive
//! `&GameState` and so cannot re-enter the store mid-pass. The subscriber
//! list is snapshotted before each pass, which makes subscribing or
//! cancelling from inside a callback safe.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::Tuning;
use crate::entity::{FallingBox, Lane};

/// Everything that changes over a session. Fields are read-only outside the
/// crate; the only mutation path is an [`Action`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    elapsed_ms: f64,
    score: i32,
    boxes: Vec<FallingBox>,
}

impl GameState {
    /// Session time in milliseconds. Non-negative, never decreases, frozen
    /// while the session is suspended.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Current score, always inside the tuning's score range.
    pub fn score(&self) -> i32 {
        self.score
    }

    /// The session layout in insertion order, which is also draw order.
    pub fn boxes(&self) -> &[FallingBox] {
        &self.boxes
    }
}

/// The closed set of state transitions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// Advance session time to `now_ms` on the session clock. Time never
    /// runs backwards even if the clock does.
    Progress { now_ms: f64 },
    /// Add `addition` to the score, clamping into the score range.
    AddToScore { addition: i32 },
}

type Callback = Rc<dyn Fn(&GameState)>;

struct Registration {
    id: u64,
    callback: Callback,
}

type SubscriberList = Rc<RefCell<Vec<Registration>>>;

/// Handle for one registered callback.
///
/// Dropping the handle leaves the subscription live for the session;
/// [`Subscription::cancel`] removes it explicitly.
pub struct Subscription {
    id: u64,
    subscribers: Weak<RefCell<Vec<Registration>>>,
}

impl Subscription {
    /// Remove exactly this registration. A notification pass already under
    /// way still runs the old list to completion; the removal takes effect
    /// for the next pass. Calling after the store is gone is a no-op.
    pub fn cancel(self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.borrow_mut().retain(|r| r.id != self.id);
        }
    }
}

/// Holds the session state and tells every subscriber about each update.
pub struct Store {
    state: GameState,
    epoch_ms: f64,
    score_min: i32,
    score_max: i32,
    subscribers: SubscriberList,
    next_id: u64,
}

impl Store {
    /// New session with a layout drawn from `seed`.
    pub fn new(tuning: &Tuning, seed: u64, now_ms: f64) -> Self {
        Self::with_boxes(tuning, spawn_boxes(tuning, seed), now_ms)
    }

    /// New session over an explicit layout. `now_ms` becomes the session
    /// epoch: elapsed time is measured from this instant.
    pub fn with_boxes(tuning: &Tuning, boxes: Vec<FallingBox>, now_ms: f64) -> Self {
        Self {
            state: GameState {
                elapsed_ms: 0.0,
                score: 0,
                boxes,
            },
            epoch_ms: now_ms,
            score_min: tuning.score_min,
            score_max: tuning.score_max,
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_id: 0,
        }
    }

    pub fn get(&self) -> &GameState {
        &self.state
    }

    /// Apply `action`, then synchronously run every subscriber registered at
    /// the start of the pass, in subscription order.
    pub fn update(&mut self, action: Action) {
        match action {
            Action::Progress { now_ms } => {
                let elapsed = now_ms - self.epoch_ms;
                if elapsed > self.state.elapsed_ms {
                    self.state.elapsed_ms = elapsed;
                }
            }
            Action::AddToScore { addition } => {
                self.state.score =
                    (self.state.score + addition).clamp(self.score_min, self.score_max);
            }
        }
        self.notify();
    }

    fn notify(&self) {
        // Snapshot so a callback cancelling (or adding) a subscription can
        // neither skip nor double-run anyone in this pass.
        let pass: Vec<Callback> = self
            .subscribers
            .borrow()
            .iter()
            .map(|r| r.callback.clone())
            .collect();
        for callback in &pass {
            callback(&self.state);
        }
    }

    /// Register `callback` to run after every update, in registration order.
    pub fn subscribe(&mut self, callback: impl Fn(&GameState) + 'static) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.borrow_mut().push(Registration {
            id,
            callback: Rc::new(callback),
        });
        Subscription {
            id,
            subscribers: Rc::downgrade(&self.subscribers),
        }
    }

    /// Entity mutation path for catch scoring and the miss sweep. `scored`
    /// is entity state, not an action, so it does not notify.
    pub(crate) fn boxes_mut(&mut self) -> &mut [FallingBox] {
        &mut self.state.boxes
    }
}

/// Build a session layout: `box_count` slots at offsets `0..n`, each drawn
/// uniformly from empty plus the four lanes. The same seed reproduces the
/// same layout.
pub fn spawn_boxes(tuning: &Tuning, seed: u64) -> Vec<FallingBox> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..tuning.box_count)
        .map(|offset| {
            let lane = match rng.gen_range(0..5) {
                1 => Some(Lane::Red),
                2 => Some(Lane::Blue),
                3 => Some(Lane::Yellow),
                4 => Some(Lane::Green),
                _ => None,
            };
            FallingBox::new(lane, offset)
        })
        .collect()
}
