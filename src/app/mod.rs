//! Application core — pure domain logic, zero direct I/O.
//!
//! Ties the line decoder to the focus state machine.  All interaction with
//! the terminal, files and logging happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without a serial port.

pub mod events;
pub mod ports;
pub mod service;
