// regexgrid-core/src/backends/mod.rs
//! Concrete `CompletionBackend` implementations.
//!
//! Each backend lives in its own file and is declared here.

pub mod ollama;
