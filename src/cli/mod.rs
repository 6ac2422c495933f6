//! Command Line Interface (CLI) layer for WOUNDMET.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for a single mask. It wires
//! user-provided options to the underlying library functionality exposed
//! via `woundmet::api`.
//!
//! If you are embedding WOUNDMET into another application, prefer using
//! the high-level `woundmet::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
