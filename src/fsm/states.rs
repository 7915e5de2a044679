//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers: no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!          [held ≥ hold_to_enable]
//!   OFF ──────────────────────────▶ ON ◀──────────┐
//!    ▲                               │            │ [window expired]
//!    │                          [press]           │
//!    │                               ▼            │
//!    └──────────[press]────── CONFIRM_DISABLE ────┘
//! ```

use super::context::FocusContext;
use super::{FocusMode, StateDescriptor};
use log::{debug, info};

pub const MSG_OFF: &str = "Focus Mode Off";
pub const MSG_ON: &str = "Focus Mode On";
pub const MSG_CONFIRM: &str = "Disable Focus Mode?";
pub const MSG_DISABLED: &str = "Focus Mode Disabled";

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.
pub fn build_state_table() -> [StateDescriptor; FocusMode::COUNT] {
    [
        // Index 0 — Off
        StateDescriptor {
            id: FocusMode::Off,
            name: "Off",
            on_enter: Some(off_enter),
            on_update: off_update,
        },
        // Index 1 — On
        StateDescriptor {
            id: FocusMode::On,
            name: "On",
            on_enter: Some(focused_enter),
            on_update: focused_update,
        },
        // Index 2 — ConfirmDisable
        StateDescriptor {
            id: FocusMode::ConfirmDisable,
            name: "ConfirmDisable",
            on_enter: Some(confirm_enter),
            on_update: confirm_update,
        },
    ]
}

/// Display text for a completed transition.  `from` is `None` at start-up.
pub fn transition_message(from: Option<FocusMode>, to: FocusMode) -> &'static str {
    match (from, to) {
        (Some(FocusMode::ConfirmDisable), FocusMode::Off) => MSG_DISABLED,
        (_, FocusMode::Off) => MSG_OFF,
        (_, FocusMode::On) => MSG_ON,
        (_, FocusMode::ConfirmDisable) => MSG_CONFIRM,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  OFF — accumulate a continuous hold
// ═══════════════════════════════════════════════════════════════════════════

fn off_enter(ctx: &mut FocusContext) {
    ctx.hold_timer_secs = 0.0;
}

fn off_update(ctx: &mut FocusContext) -> Option<FocusMode> {
    if !ctx.inputs.level {
        if ctx.hold_timer_secs > 0.0 {
            debug!("OFF: released after {:.2}s, hold reset", ctx.hold_timer_secs);
        }
        ctx.hold_timer_secs = 0.0;
        return None;
    }

    ctx.hold_timer_secs += ctx.dt_secs;
    if ctx.hold_timer_secs >= ctx.timing.hold_to_enable_secs {
        info!("OFF: held {:.2}s, enabling", ctx.hold_timer_secs);
        return Some(FocusMode::On);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  ON — first press asks for confirmation
// ═══════════════════════════════════════════════════════════════════════════

fn focused_enter(ctx: &mut FocusContext) {
    ctx.hold_timer_secs = 0.0;
}

fn focused_update(ctx: &mut FocusContext) -> Option<FocusMode> {
    if ctx.inputs.rising_edge {
        return Some(FocusMode::ConfirmDisable);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  CONFIRM_DISABLE — second press within the window disables
// ═══════════════════════════════════════════════════════════════════════════

fn confirm_enter(ctx: &mut FocusContext) {
    ctx.confirm_timer_secs = ctx.timing.confirm_disable_window_secs;
    info!(
        "CONFIRM: press again within {:.1}s to disable",
        ctx.confirm_timer_secs
    );
}

fn confirm_update(ctx: &mut FocusContext) -> Option<FocusMode> {
    ctx.confirm_timer_secs = (ctx.confirm_timer_secs - ctx.dt_secs).max(0.0);

    // A press on the expiry tick still counts.
    if ctx.inputs.rising_edge {
        return Some(FocusMode::Off);
    }
    if ctx.confirm_timer_secs <= 0.0 {
        info!("CONFIRM: window expired, staying on");
        return Some(FocusMode::On);
    }
    None
}
