//! Glyph backend for exprint
//!
//! The layout engine treats text as an opaque service: it asks for run
//! widths while measuring and hands out baseline anchors while drawing.
//! This crate is that service, built on the usual stack:
//!
//! - font parsing via ttf-parser
//! - shaping (kerning, ligatures) via rustybuzz
//! - glyph rasterization via swash
//! - system font discovery via fontdb
//!
//! [`TextEngine`] implements [`exprint_core::TextPainter`] over a single
//! loaded [`FontFace`].

pub mod engine;
pub mod font;

pub use engine::TextEngine;
pub use font::FontFace;

use thiserror::Error;

/// Font backend errors.
#[derive(Error, Debug)]
pub enum TextError {
    #[error("failed to load font: {0}")]
    FontLoad(String),

    #[error("failed to parse font: {0}")]
    FontParse(String),

    #[error("no usable system font found")]
    NoFontFound,
}

pub type Result<T> = std::result::Result<T, TextError>;
