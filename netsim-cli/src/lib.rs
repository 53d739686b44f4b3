//! Support library for the netsim CLI binary.
//!
//! Exposes the command pipeline and logging setup so doctests and unit tests
//! can drive a run without spawning a subprocess.

pub mod cli;
pub mod logging;
