/// videolist Core — video discovery, media index, and background execution.
///
/// This crate contains all business logic with zero presentation code.
/// It is designed to be driven by any frontend (CLI, TUI, mobile shell).
///
/// # Modules
///
/// - [`model`] — `VideoEntry` and `ScanResult`.
/// - [`scanner`] — Indexed query (fast path) and recursive directory walk (fallback).
/// - [`task`] — Single-worker serial task runner with one-shot result hand-off.
/// - [`platform`] — Storage read-permission checks.
/// - [`config`] — TOML configuration with defaults.
/// - [`error`] — The `ScanError` type shared by every scan path.
pub mod config;
pub mod error;
pub mod model;
pub mod platform;
pub mod scanner;
pub mod task;

pub use error::ScanError;
