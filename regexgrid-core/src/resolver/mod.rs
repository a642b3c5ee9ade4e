//! Instruction resolution.
//!
//! An instruction is resolved twice, independently: `synthesizer` asks the
//! completion backend for the pattern (cleaned by `sanitizer`), and `replacement`
//! applies fixed rules to find the literal to substitute.

pub mod replacement;
pub mod sanitizer;
pub mod synthesizer;

pub use replacement::extract_replacement;
pub use sanitizer::sanitize;
pub use synthesizer::PatternSynthesizer;
