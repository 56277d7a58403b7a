//! roadside - Roadside assistance head-unit flow
//!
//! The binary drives the navigation engine from a line-oriented console.
//! The engine itself lives in `roadside-app`.

pub mod headless;

pub use headless::runner::run_headless;
