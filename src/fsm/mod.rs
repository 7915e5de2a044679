//! Function-pointer finite state machine engine for focus mode.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  StateTable                                             │
//! │  ┌────────────────┬───────────┬───────────────────────┐ │
//! │  │ FocusMode      │ on_enter  │ on_update             │ │
//! │  ├────────────────┼───────────┼───────────────────────┤ │
//! │  │ Off            │ fn(ctx)   │ fn(ctx)->Option<>     │ │
//! │  │ On             │ fn(ctx)   │ fn(ctx)->Option<>     │ │
//! │  │ ConfirmDisable │ fn(ctx)   │ fn(ctx)->Option<>     │ │
//! │  └────────────────┴───────────┴───────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.  If
//! it returns `Some(next)`, the engine sets the display text for the
//! `(current, next)` transition, switches state and runs `on_enter` for
//! the next state.  Every handler receives `&mut FocusContext`.
//!
//! [`FocusStateMachine`] bundles the engine with its context and is the
//! type the rest of the crate uses.

pub mod context;
pub mod states;

use context::{ButtonInputs, FocusContext, FocusTiming};
use log::info;
use serde::Serialize;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum FocusMode {
    Off = 0,
    On = 1,
    ConfirmDisable = 2,
}

impl FocusMode {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 3;

    /// Convert an index back to `FocusMode`.  Panics on out-of-range in
    /// debug builds; returns `Off` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Off,
            1 => Self::On,
            2 => Self::ConfirmDisable,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Off
            }
        }
    }

    /// Focus is considered active while on or awaiting disable confirmation.
    pub fn is_active(self) -> bool {
        matches!(self, Self::On | Self::ConfirmDisable)
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Runs exactly once on entry to a state.
pub type StateActionFn = fn(&mut FocusContext);

/// Per-tick handler.  Returns `Some(next)` to trigger a transition.
pub type StateUpdateFn = fn(&mut FocusContext) -> Option<FocusMode>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

pub struct StateDescriptor {
    pub id: FocusMode,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// Owns the state table and the current-state pointer.
pub struct Fsm {
    /// Fixed-size table indexed by `FocusMode as usize`.
    table: [StateDescriptor; FocusMode::COUNT],
    current: usize,
    /// Monotonically increasing tick counter.
    tick_count: u64,
    /// Tick at which the current state was entered.
    state_entry_tick: u64,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; FocusMode::COUNT], initial: FocusMode) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, d)| d.id as usize == i),
            "state table out of order"
        );
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Run the initial `on_enter` and set the start-up display text.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FocusContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        ctx.display = states::transition_message(None, self.current_state());
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.  Returns the previous state if a
    /// transition happened.
    pub fn tick(&mut self, ctx: &mut FocusContext) -> Option<FocusMode> {
        self.tick_count += 1;

        let from = self.current_state();
        let next = (self.table[self.current].on_update)(ctx)?;
        self.transition(next, ctx);
        Some(from)
    }

    pub fn current_state(&self) -> FocusMode {
        FocusMode::from_index(self.current)
    }

    pub fn ticks_in_current_state(&self) -> u64 {
        self.tick_count - self.state_entry_tick
    }

    fn transition(&mut self, next: FocusMode, ctx: &mut FocusContext) {
        let next_idx = next as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        ctx.display = states::transition_message(Some(self.current_state()), next);

        self.current = next_idx;
        self.state_entry_tick = self.tick_count;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}

// ---------------------------------------------------------------------------
// FocusStateMachine
// ---------------------------------------------------------------------------

/// Hold-to-enable, confirm-to-disable focus toggle.
///
/// `tick` is a total function of its inputs: it never fails and every
/// `(state, input)` pair has a defined successor.
pub struct FocusStateMachine {
    fsm: Fsm,
    ctx: FocusContext,
}

impl FocusStateMachine {
    /// Start in `Off` showing "Focus Mode Off".
    pub fn new(timing: FocusTiming) -> Self {
        let mut ctx = FocusContext::new(timing);
        let mut fsm = Fsm::new(states::build_state_table(), FocusMode::Off);
        fsm.start(&mut ctx);
        Self { fsm, ctx }
    }

    /// Resume from an arbitrary mode and context.  No `on_enter` runs, so
    /// the timers and display text are taken as given.
    pub fn with_context(mode: FocusMode, ctx: FocusContext) -> Self {
        Self {
            fsm: Fsm::new(states::build_state_table(), mode),
            ctx,
        }
    }

    /// Advance one step and return the display text.
    ///
    /// A negative or non-finite `dt` is treated as zero.
    pub fn tick(&mut self, level: bool, rising_edge: bool, dt: f32) -> &'static str {
        self.ctx.inputs = ButtonInputs { level, rising_edge };
        self.ctx.dt_secs = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        self.fsm.tick(&mut self.ctx);
        self.ctx.display
    }

    pub fn is_active(&self) -> bool {
        self.mode().is_active()
    }

    pub fn mode(&self) -> FocusMode {
        self.fsm.current_state()
    }

    pub fn display(&self) -> &'static str {
        self.ctx.display
    }

    pub fn context(&self) -> &FocusContext {
        &self.ctx
    }

    pub fn ticks_in_mode(&self) -> u64 {
        self.fsm.ticks_in_current_state()
    }
}
