// regexgrid/src/lib.rs
//! # regexgrid Service and CLI
//!
//! Front ends for `regexgrid-core`: an axum HTTP service (`serve`) and a one-shot
//! file command (`apply`).

pub mod cli;
pub mod commands;
pub mod logger;
pub mod server;

pub use server::{build_router, AppState};
