//! focuslink library.
//!
//! Reads `L:<light>,B:<button>` status lines from a microcontroller and
//! drives a hold-to-enable, confirm-to-disable focus mode.  Exposes the
//! pure-logic modules for integration testing; the host loop lives in
//! `main.rs`.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod decoder;
pub mod diagnostics;
pub mod error;
pub mod fsm;
pub mod transport;
