//! CPU rasterization for exprint
//!
//! Two pieces: [`Pixmap`], an owned RGBA8 buffer implementing
//! [`exprint_core::RasterTarget`], and [`draw_line`], the thick-segment
//! rasterizer the layout engine uses for fraction bars and radical strokes.
//! Glyphs are not rasterized here; that is the text backend's job.

pub mod line;
pub mod pixmap;

pub use line::draw_line;
pub use pixmap::Pixmap;
