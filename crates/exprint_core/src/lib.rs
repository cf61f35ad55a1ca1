//! Exprint core types
//!
//! Foundational primitives shared by every exprint crate:
//!
//! - **Fixed-point geometry**: 26.6 scalars and points, the unit every
//!   measured width, offset, and stroke endpoint is expressed in
//! - **Color**: flat RGBA used for the whole render
//! - **Rendering seams**: the [`RasterTarget`] and [`TextPainter`] traits
//!   that decouple layout from the pixel buffer and the glyph backend
//! - **Render context**: the immutable per-render configuration threaded
//!   through measure and draw

pub mod color;
pub mod context;
pub mod fixed;

pub use color::Color;
pub use context::{RasterTarget, RenderContext, TextPainter};
pub use fixed::{Fixed, FixedPoint, DPI};
