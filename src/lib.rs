//! ZiaMet Dashboard Library
//!
//! Exposes the data, view-state and rendering modules so the binary and the
//! integration tests share them.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod refresh;
pub mod ui;
