// Library target exists for integration tests and criterion benchmarks.
// The binary entry point is main.rs; this file re-declares the module tree
// so harnesses can import types via `railbar::engine::*`. Most code is only
// exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

// Public: used directly by tests and benchmarks
pub mod engine;
pub mod ui;

// Private: required transitively (won't compile without them)
mod app;
mod config;
mod event;
