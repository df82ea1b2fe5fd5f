//! Utility functions for code generation, URL processing, and formatting.
//!
//! - [`code_generator`] - Shortcode generation and validation
//! - [`url_normalizer`] - URL normalization and sanitization
//! - [`base36`] - Compact integer encoding for fallback shortcodes
//! - [`time_ago`] - Human-readable relative times

pub mod base36;
pub mod code_generator;
pub mod time_ago;
pub mod url_normalizer;
