//! Report rendering.
//!
//! Derives officer-facing text from a submission; read-only over its input.

pub mod text;

pub use text::TextRenderer;
