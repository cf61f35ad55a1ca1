//! Expression typesetting
//!
//! Turns an expression tree into a parallel tree of layout boxes, one box
//! per node, then draws it. The two phases are strictly separated:
//!
//! - [`layout`] *is* the measure pass. It walks the tree bottom-up once,
//!   computing every bounding size, child offset, punctuation run, and
//!   stroke endpoint, and returns them as an immutable [`LayoutBox`] tree.
//!   There is no backtracking and no renegotiation; a parent only ever
//!   reads its children's finished sizes.
//! - [`LayoutBox::draw`] is the top-down pass. It replays the stored
//!   geometry relative to a caller-supplied anchor (the left-baseline
//!   point) and never computes or mutates anything.
//!
//! Because geometry only exists inside a finished box tree, drawing
//! without measuring is unrepresentable, and two renders at different
//! font sizes simply build two trees.

pub mod boxes;

pub use boxes::LayoutBox;

use thiserror::Error;
use tracing::debug;

use exprint_core::RenderContext;
use exprint_expr::Expr;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("font size must be a positive, finite number of points (got {0})")]
    InvalidFontSize(f64),
}

/// Measure `expr` at `font_size` points, producing the geometry tree.
///
/// The font size is validated before any geometry is computed; measuring
/// a valid tree cannot otherwise fail.
pub fn layout(
    expr: &Expr,
    ctx: &RenderContext<'_>,
    font_size: f64,
) -> Result<LayoutBox, LayoutError> {
    if !font_size.is_finite() || font_size <= 0.0 {
        return Err(LayoutError::InvalidFontSize(font_size));
    }
    let root = boxes::measure(expr, ctx, font_size);
    let size = root.size();
    debug!(
        font_size,
        width = size.x.to_f64(),
        height = size.y.to_f64(),
        "measured expression"
    );
    Ok(root)
}
