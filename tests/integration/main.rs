//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  All tests run on the host with no serial port
//! attached.

mod decoder_pipeline_tests;
mod focus_service_tests;
mod mock_io;
