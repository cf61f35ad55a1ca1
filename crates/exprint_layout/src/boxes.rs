//! Layout boxes
//!
//! One box variant per expression construct. A box is built fully measured:
//! its constructor recurses into the children, reads their finished sizes,
//! and stores its own bounding size together with every offset it will
//! need at draw time. Offsets are relative to the box's anchor, the
//! left-baseline point; `y` is negative above the baseline.
//!
//! Punctuation drawn by a composite box (operator glyphs, inserted
//! parentheses, function names) uses a face size equal to the box height
//! in points, so the grouping marks grow with the tallest operand.

use exprint_core::{Fixed, FixedPoint, RasterTarget, RenderContext};
use exprint_expr::{needs_parens, BinaryOp, Expr, Func, ParenSite, UnaryOp};
use exprint_paint::draw_line;

/// A measured layout node. Geometry is fixed at construction.
#[derive(Debug)]
pub enum LayoutBox {
    Text(TextBox),
    Unary(UnaryBox),
    Binary(BinaryBox),
    Divide(DivideBox),
    Power(PowerBox),
    Call(CallBox),
    Sqrt(SqrtBox),
}

impl LayoutBox {
    /// Overall bounding size of this box.
    pub fn size(&self) -> FixedPoint {
        match self {
            LayoutBox::Text(b) => b.size,
            LayoutBox::Unary(b) => b.size,
            LayoutBox::Binary(b) => b.size,
            LayoutBox::Divide(b) => b.size,
            LayoutBox::Power(b) => b.size,
            LayoutBox::Call(b) => b.size,
            LayoutBox::Sqrt(b) => b.size,
        }
    }

    /// Draw this box with its left-baseline point at `anchor`.
    pub fn draw(&self, ctx: &RenderContext<'_>, target: &mut dyn RasterTarget, anchor: FixedPoint) {
        match self {
            LayoutBox::Text(b) => b.draw(ctx, target, anchor),
            LayoutBox::Unary(b) => b.draw(ctx, target, anchor),
            LayoutBox::Binary(b) => b.draw(ctx, target, anchor),
            LayoutBox::Divide(b) => b.draw(ctx, target, anchor),
            LayoutBox::Power(b) => b.draw(ctx, target, anchor),
            LayoutBox::Call(b) => b.draw(ctx, target, anchor),
            LayoutBox::Sqrt(b) => b.draw(ctx, target, anchor),
        }
    }
}

/// Build the measured box tree for `expr` at `font_size` points.
pub(crate) fn measure(expr: &Expr, ctx: &RenderContext<'_>, font_size: f64) -> LayoutBox {
    match expr {
        Expr::Var(name) => LayoutBox::Text(TextBox::measure(name.clone(), ctx, font_size)),
        Expr::Number(text) => LayoutBox::Text(TextBox::measure(text.clone(), ctx, font_size)),
        Expr::Unary { op, operand } => {
            LayoutBox::Unary(UnaryBox::measure(*op, operand, ctx, font_size))
        }
        Expr::Binary { op, lhs, rhs } => match op {
            BinaryOp::Div => LayoutBox::Divide(DivideBox::measure(lhs, rhs, ctx, font_size)),
            _ => LayoutBox::Binary(BinaryBox::measure(*op, lhs, rhs, ctx, font_size)),
        },
        Expr::Call { func, args } => match func {
            Func::Pow => LayoutBox::Power(PowerBox::measure(&args[0], &args[1], ctx, font_size)),
            Func::Sqrt => LayoutBox::Sqrt(SqrtBox::measure(&args[0], ctx, font_size)),
            _ => LayoutBox::Call(CallBox::measure(func.name(), &args[0], ctx, font_size)),
        },
    }
}

/// Leaf run of text: a variable name or a numeral.
#[derive(Debug)]
pub struct TextBox {
    text: String,
    font_size: f64,
    size: FixedPoint,
}

impl TextBox {
    fn measure(text: String, ctx: &RenderContext<'_>, font_size: f64) -> Self {
        let width = ctx.measure_str(&text, font_size);
        // The em size stands in for the ascent; leaves define the
        // baseline-relative height every parent ratio is derived from.
        let size = FixedPoint::new(width, Fixed::from_f64(font_size));
        Self {
            text,
            font_size,
            size,
        }
    }

    fn draw(&self, ctx: &RenderContext<'_>, target: &mut dyn RasterTarget, anchor: FixedPoint) {
        ctx.draw_str(target, anchor, &self.text, self.font_size);
    }
}

/// Signed operand. A unary plus is an identity passthrough; a unary minus
/// prefixes a sign, parenthesizing additive operands.
#[derive(Debug)]
pub struct UnaryBox {
    operand: Box<LayoutBox>,
    size: FixedPoint,
    punct_size: f64,
    prefix: Option<&'static str>,
    operand_at: FixedPoint,
    close_at: Option<FixedPoint>,
}

impl UnaryBox {
    fn measure(op: UnaryOp, operand: &Expr, ctx: &RenderContext<'_>, font_size: f64) -> Self {
        let child = measure(operand, ctx, font_size);
        let child_size = child.size();
        match op {
            UnaryOp::Plus => Self {
                operand: Box::new(child),
                size: child_size,
                punct_size: font_size,
                prefix: None,
                operand_at: FixedPoint::ZERO,
                close_at: None,
            },
            UnaryOp::Minus => {
                let height = child_size.y;
                let punct_size = height.to_f64();
                if needs_parens(operand.kind(), ParenSite::NegatedOperand) {
                    let pre = ctx.measure_str("-(", punct_size);
                    let post = ctx.measure_str(")", punct_size);
                    Self {
                        operand: Box::new(child),
                        size: FixedPoint::new(pre + child_size.x + post, height),
                        punct_size,
                        prefix: Some("-("),
                        operand_at: FixedPoint::new(pre, Fixed::ZERO),
                        close_at: Some(FixedPoint::new(pre + child_size.x, Fixed::ZERO)),
                    }
                } else {
                    let pre = ctx.measure_str("-", punct_size);
                    Self {
                        operand: Box::new(child),
                        size: FixedPoint::new(pre + child_size.x, height),
                        punct_size,
                        prefix: Some("-"),
                        operand_at: FixedPoint::new(pre, Fixed::ZERO),
                        close_at: None,
                    }
                }
            }
        }
    }

    fn draw(&self, ctx: &RenderContext<'_>, target: &mut dyn RasterTarget, anchor: FixedPoint) {
        if let Some(prefix) = self.prefix {
            ctx.draw_str(target, anchor, prefix, self.punct_size);
        }
        self.operand.draw(ctx, target, anchor + self.operand_at);
        if let Some(close_at) = self.close_at {
            ctx.draw_str(target, anchor + close_at, ")", self.punct_size);
        }
    }
}

/// Infix run for `+`, `-`, and `*`: operands side by side with the
/// operator glyph between, parenthesizing additive operands of `*`.
///
/// The glyphs between and around the operands collapse into at most three
/// runs: an opening paren, the operator fused with the adjacent closing/
/// opening parens, and a final closing paren.
#[derive(Debug)]
pub struct BinaryBox {
    lhs: Box<LayoutBox>,
    rhs: Box<LayoutBox>,
    size: FixedPoint,
    punct_size: f64,
    lhs_at: FixedPoint,
    rhs_at: FixedPoint,
    open: bool,
    op_text: String,
    op_at: FixedPoint,
    close_at: Option<FixedPoint>,
}

impl BinaryBox {
    fn measure(
        op: BinaryOp,
        lhs: &Expr,
        rhs: &Expr,
        ctx: &RenderContext<'_>,
        font_size: f64,
    ) -> Self {
        let left = measure(lhs, ctx, font_size);
        let right = measure(rhs, ctx, font_size);
        let (lsize, rsize) = (left.size(), right.size());
        let height = lsize.y.max(rsize.y);
        let punct_size = height.to_f64();

        let wrap_site = ParenSite::FactorOperand;
        let (lhs_wrap, rhs_wrap) = match op {
            BinaryOp::Mul => (
                needs_parens(lhs.kind(), wrap_site),
                needs_parens(rhs.kind(), wrap_site),
            ),
            _ => (false, false),
        };

        let open_w = ctx.measure_str("(", punct_size);
        let close_w = ctx.measure_str(")", punct_size);
        let op_w = ctx.measure_str(op.symbol(), punct_size);

        let mut op_text = String::new();
        let (lhs_at, op_at);
        let mut cursor;
        if lhs_wrap {
            lhs_at = FixedPoint::new(open_w, Fixed::ZERO);
            op_at = FixedPoint::new(open_w + lsize.x, Fixed::ZERO);
            op_text.push(')');
            cursor = open_w + lsize.x + close_w + op_w;
        } else {
            lhs_at = FixedPoint::ZERO;
            op_at = FixedPoint::new(lsize.x, Fixed::ZERO);
            cursor = lsize.x + op_w;
        }
        op_text.push_str(op.symbol());

        let (rhs_at, close_at);
        if rhs_wrap {
            op_text.push('(');
            cursor += open_w;
            rhs_at = FixedPoint::new(cursor, Fixed::ZERO);
            close_at = Some(FixedPoint::new(cursor + rsize.x, Fixed::ZERO));
            cursor += rsize.x + close_w;
        } else {
            rhs_at = FixedPoint::new(cursor, Fixed::ZERO);
            close_at = None;
            cursor += rsize.x;
        }

        Self {
            lhs: Box::new(left),
            rhs: Box::new(right),
            size: FixedPoint::new(cursor, height),
            punct_size,
            lhs_at,
            rhs_at,
            open: lhs_wrap,
            op_text,
            op_at,
            close_at,
        }
    }

    fn draw(&self, ctx: &RenderContext<'_>, target: &mut dyn RasterTarget, anchor: FixedPoint) {
        if self.open {
            ctx.draw_str(target, anchor, "(", self.punct_size);
        }
        ctx.draw_str(target, anchor + self.op_at, &self.op_text, self.punct_size);
        if let Some(close_at) = self.close_at {
            ctx.draw_str(target, anchor + close_at, ")", self.punct_size);
        }
        self.lhs.draw(ctx, target, anchor + self.lhs_at);
        self.rhs.draw(ctx, target, anchor + self.rhs_at);
    }
}

/// Stacked fraction: numerator over denominator, separated by a bar.
///
/// Both children are measured at 4/9 of the surrounding size; the box
/// leaves an eighth of slack around the wider child and the stacked pair.
#[derive(Debug)]
pub struct DivideBox {
    numerator: Box<LayoutBox>,
    denominator: Box<LayoutBox>,
    size: FixedPoint,
    numerator_at: FixedPoint,
    denominator_at: FixedPoint,
    bar_width: f64,
}

impl DivideBox {
    fn measure(num: &Expr, den: &Expr, ctx: &RenderContext<'_>, font_size: f64) -> Self {
        let child_size = font_size * 4.0 / 9.0;
        let numerator = measure(num, ctx, child_size);
        let denominator = measure(den, ctx, child_size);
        let (nsize, dsize) = (numerator.size(), denominator.size());

        let width = nsize.x.max(dsize.x).scale(9, 8);
        let height = (nsize.y + dsize.y).scale(9, 8);
        // Denominator sits on the anchor baseline; the numerator's
        // baseline is 5/9 of the box above it, leaving 4/9 for the bar.
        let numerator_at =
            FixedPoint::new((width - nsize.x).scale(1, 2), -height.scale(5, 9));
        let denominator_at = FixedPoint::new((width - dsize.x).scale(1, 2), Fixed::ZERO);

        Self {
            numerator: Box::new(numerator),
            denominator: Box::new(denominator),
            size: FixedPoint::new(width, height),
            numerator_at,
            denominator_at,
            bar_width: height.scale(1, 40).to_f64(),
        }
    }

    fn draw(&self, ctx: &RenderContext<'_>, target: &mut dyn RasterTarget, anchor: FixedPoint) {
        self.numerator.draw(ctx, target, anchor + self.numerator_at);
        self.denominator
            .draw(ctx, target, anchor + self.denominator_at);
        let bar_start = anchor + FixedPoint::new(Fixed::ZERO, -self.size.y.scale(4, 9));
        let bar_end = bar_start + FixedPoint::new(self.size.x, Fixed::ZERO);
        draw_line(target, bar_start, bar_end, self.bar_width, ctx.color());
    }
}

/// Superscripted power: the base at full size, the exponent scaled to 3/5
/// and raised by 3/5 of the base height.
///
/// The base keeps the surrounding face size (a bare `x` reads as its own
/// first power); structurally ambiguous bases get parentheses.
#[derive(Debug)]
pub struct PowerBox {
    base: Box<LayoutBox>,
    exponent: Box<LayoutBox>,
    size: FixedPoint,
    punct_size: f64,
    wrapped: bool,
    base_at: FixedPoint,
    exponent_at: FixedPoint,
    close_at: FixedPoint,
}

impl PowerBox {
    fn measure(base: &Expr, exponent: &Expr, ctx: &RenderContext<'_>, font_size: f64) -> Self {
        let base_box = measure(base, ctx, font_size);
        let exp_box = measure(exponent, ctx, font_size * 3.0 / 5.0);
        let (bsize, esize) = (base_box.size(), exp_box.size());
        let raise = -bsize.y.scale(3, 5);

        let wrapped = needs_parens(base.kind(), ParenSite::PowerBase);
        let open_w = ctx.measure_str("(", font_size);
        let close_w = ctx.measure_str(")", font_size);

        let (base_at, exponent_at, close_at, width);
        if wrapped {
            base_at = FixedPoint::new(open_w, Fixed::ZERO);
            close_at = FixedPoint::new(open_w + bsize.x, Fixed::ZERO);
            exponent_at = FixedPoint::new(open_w + bsize.x + close_w, raise);
            width = open_w + bsize.x + close_w + esize.x;
        } else {
            base_at = FixedPoint::ZERO;
            close_at = FixedPoint::ZERO;
            exponent_at = FixedPoint::new(bsize.x, raise);
            width = bsize.x + esize.x;
        }

        Self {
            base: Box::new(base_box),
            exponent: Box::new(exp_box),
            size: FixedPoint::new(width, bsize.y + esize.y),
            punct_size: font_size,
            wrapped,
            base_at,
            exponent_at,
            close_at,
        }
    }

    fn draw(&self, ctx: &RenderContext<'_>, target: &mut dyn RasterTarget, anchor: FixedPoint) {
        if self.wrapped {
            ctx.draw_str(target, anchor, "(", self.punct_size);
            ctx.draw_str(target, anchor + self.close_at, ")", self.punct_size);
        }
        self.base.draw(ctx, target, anchor + self.base_at);
        self.exponent.draw(ctx, target, anchor + self.exponent_at);
    }
}

/// Prefix function application: `name(` argument `)`.
#[derive(Debug)]
pub struct CallBox {
    prefix: String,
    argument: Box<LayoutBox>,
    size: FixedPoint,
    punct_size: f64,
    argument_at: FixedPoint,
    close_at: FixedPoint,
}

impl CallBox {
    fn measure(name: &'static str, arg: &Expr, ctx: &RenderContext<'_>, font_size: f64) -> Self {
        let argument = measure(arg, ctx, font_size);
        let asize = argument.size();
        // The name and opening paren form one run, so shaping across the
        // pair cannot disagree between measure and draw.
        let prefix = format!("{name}(");
        let pre = ctx.measure_str(&prefix, font_size);
        let post = ctx.measure_str(")", font_size);

        Self {
            prefix,
            argument: Box::new(argument),
            size: FixedPoint::new(pre + asize.x + post, asize.y),
            punct_size: font_size,
            argument_at: FixedPoint::new(pre, Fixed::ZERO),
            close_at: FixedPoint::new(pre + asize.x, Fixed::ZERO),
        }
    }

    fn draw(&self, ctx: &RenderContext<'_>, target: &mut dyn RasterTarget, anchor: FixedPoint) {
        ctx.draw_str(target, anchor, &self.prefix, self.punct_size);
        ctx.draw_str(target, anchor + self.close_at, ")", self.punct_size);
        self.argument.draw(ctx, target, anchor + self.argument_at);
    }
}

/// Radical: a stub of strokes on the left, a bar over the content.
///
/// The sign is drawn, not typeset: four segments at a stroke width of
/// 1/30 of the face size.
#[derive(Debug)]
pub struct SqrtBox {
    content: Box<LayoutBox>,
    size: FixedPoint,
    content_at: FixedPoint,
    stub: Fixed,
    stroke_width: f64,
}

impl SqrtBox {
    fn measure(content: &Expr, ctx: &RenderContext<'_>, font_size: f64) -> Self {
        let inner = measure(content, ctx, font_size);
        let isize = inner.size();
        let stub = Fixed::from_f64(font_size / 3.0);

        Self {
            content: Box::new(inner),
            size: FixedPoint::new(stub + isize.x, isize.y.scale(5, 4)),
            content_at: FixedPoint::new(stub, Fixed::ZERO),
            stub,
            stroke_width: font_size / 30.0,
        }
    }

    fn draw(&self, ctx: &RenderContext<'_>, target: &mut dyn RasterTarget, anchor: FixedPoint) {
        self.content.draw(ctx, target, anchor + self.content_at);

        let h = self.size.y;
        let color = ctx.color();
        let bar_start = anchor + FixedPoint::new(self.stub, -h.scale(7, 10));
        let bar_end = bar_start + FixedPoint::new(self.size.x - self.stub, Fixed::ZERO);
        // Top bar, then the long diagonal down to the low point, the
        // rising tick into it, and the short leading tick.
        draw_line(target, bar_start, bar_end, self.stroke_width, color);
        let low = anchor + FixedPoint::new(self.stub.scale(3, 5), h.scale(1, 5));
        draw_line(target, bar_start, low, self.stroke_width, color);
        let mid = anchor + FixedPoint::new(self.stub.scale(1, 10), -h.scale(3, 10));
        draw_line(target, mid, low, self.stroke_width, color);
        let lead = anchor + FixedPoint::new(Fixed::ZERO, -h.scale(1, 10));
        draw_line(target, mid, lead, self.stroke_width, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exprint_core::{Color, TextPainter};
    use exprint_expr::parse;
    use exprint_paint::Pixmap;

    /// Deterministic stand-in for the glyph backend: every character
    /// advances half the face size, and drawing marks the anchor pixel.
    struct HalfEm;

    impl TextPainter for HalfEm {
        fn measure_str(&self, text: &str, size: f64) -> Fixed {
            Fixed::from_f64(size * 0.5 * text.chars().count() as f64)
        }

        fn draw_str(
            &self,
            target: &mut dyn RasterTarget,
            color: Color,
            anchor: FixedPoint,
            _text: &str,
            _size: f64,
        ) {
            target.set_pixel(anchor.x.floor(), anchor.y.floor(), color);
        }
    }

    fn ctx() -> RenderContext<'static> {
        RenderContext::new(&HalfEm, Color::BLACK)
    }

    fn measured(input: &str, font_size: f64) -> LayoutBox {
        let expr = parse(input).unwrap();
        measure(&expr, &ctx(), font_size)
    }

    /// Width the stub backend reports for `text` at `size`.
    fn w(text: &str, size: f64) -> Fixed {
        HalfEm.measure_str(text, size)
    }

    #[test]
    fn leaf_box_is_text_width_by_em() {
        let b = measured("x", 36.0);
        assert_eq!(b.size(), FixedPoint::new(w("x", 36.0), Fixed::from_f64(36.0)));

        let b = measured("3.14", 36.0);
        assert_eq!(b.size().x, w("3.14", 36.0));
    }

    #[test]
    fn unary_plus_is_identity() {
        assert_eq!(measured("+x", 36.0).size(), measured("x", 36.0).size());
    }

    #[test]
    fn unary_minus_prefixes_the_sign() {
        let b = measured("-x", 36.0);
        assert_eq!(b.size().x, w("-", 36.0) + w("x", 36.0));
        assert_eq!(b.size().y, Fixed::from_f64(36.0));
    }

    #[test]
    fn unary_minus_parenthesizes_additive_operands() {
        // -(x+1) keeps its grouping; -(x*y) does not need it.
        let wrapped = measured("-(x+1)", 36.0);
        let child = measured("x+1", 36.0);
        assert_eq!(
            wrapped.size().x,
            w("-(", 36.0) + child.size().x + w(")", 36.0)
        );

        let unwrapped = measured("-(x*y)", 36.0);
        let child = measured("x*y", 36.0);
        assert_eq!(unwrapped.size().x, w("-", 36.0) + child.size().x);
    }

    #[test]
    fn additive_operands_are_never_wrapped() {
        let b = measured("x+y", 36.0);
        assert_eq!(b.size().x, w("x", 36.0) + w("+", 36.0) + w("y", 36.0));
        assert_eq!(b.size().y, Fixed::from_f64(36.0));
    }

    #[test]
    fn multiplication_wraps_additive_operands() {
        let b = measured("(x+y)*z", 36.0);
        let lhs = measured("x+y", 36.0);
        let expected = w("(", 36.0) + lhs.size().x + w(")", 36.0) + w("*", 36.0) + w("z", 36.0);
        assert_eq!(b.size().x, expected);

        // Both sides wrapped.
        let b = measured("(x+y)*(x-y)", 36.0);
        let expected = w("(", 36.0)
            + lhs.size().x
            + w(")", 36.0)
            + w("*", 36.0)
            + w("(", 36.0)
            + measured("x-y", 36.0).size().x
            + w(")", 36.0);
        assert_eq!(b.size().x, expected);

        // A multiplicative operand is unambiguous.
        let b = measured("x*y*z", 36.0);
        assert_eq!(
            b.size().x,
            measured("x*y", 36.0).size().x + w("*", 36.0) + w("z", 36.0)
        );
    }

    #[test]
    fn binary_height_is_the_taller_operand() {
        let b = measured("x/y+z", 36.0);
        let fraction = measured("x/y", 36.0);
        assert_eq!(b.size().y, fraction.size().y.max(Fixed::from_f64(36.0)));
    }

    #[test]
    fn fraction_stacks_children_at_four_ninths() {
        let b = measured("x/y", 36.0);
        // Children measure 8x16 at the scaled-down face size.
        let child_w = w("x", 16.0);
        let child_h = Fixed::from_f64(16.0);
        assert_eq!(b.size().x, child_w.scale(9, 8));
        assert_eq!(b.size().y, (child_h + child_h).scale(9, 8));

        let LayoutBox::Divide(div) = &b else {
            panic!("expected a fraction, got {b:?}");
        };
        // Numerator raised 5/9 of the box, both children centered.
        assert_eq!(div.numerator_at.y, -b.size().y.scale(5, 9));
        assert_eq!(div.denominator_at.y, Fixed::ZERO);
        assert_eq!(div.numerator_at.x, (b.size().x - child_w).scale(1, 2));
        // Bar thickness is 1/40 of the box height.
        assert_eq!(div.bar_width, b.size().y.scale(1, 40).to_f64());
    }

    #[test]
    fn power_raises_a_scaled_exponent() {
        let b = measured("pow(x,2)", 36.0);
        let exp_w = w("2", 36.0 * 3.0 / 5.0);
        assert_eq!(b.size().x, w("x", 36.0) + exp_w);
        assert_eq!(
            b.size().y,
            Fixed::from_f64(36.0) + Fixed::from_f64(36.0 * 3.0 / 5.0)
        );

        let LayoutBox::Power(p) = &b else {
            panic!("expected a power, got {b:?}");
        };
        assert!(!p.wrapped);
        assert_eq!(p.exponent_at.y, -Fixed::from_f64(36.0).scale(3, 5));
    }

    #[test]
    fn ambiguous_power_bases_are_wrapped() {
        for base in ["-x", "x+y", "x*y", "x/y", "pow(x,2)", "sin(x)", "sqrt(x)"] {
            let b = measured(&format!("pow({base},2)"), 36.0);
            let LayoutBox::Power(p) = &b else {
                panic!("expected a power for base {base}");
            };
            assert!(p.wrapped, "base {base} should be wrapped");
            let inner = measured(base, 36.0);
            let exp_w = w("2", 36.0 * 3.0 / 5.0);
            assert_eq!(
                b.size().x,
                w("(", 36.0) + inner.size().x + w(")", 36.0) + exp_w
            );
        }
        for base in ["x", "1.5", "+x"] {
            let b = measured(&format!("pow({base},2)"), 36.0);
            let LayoutBox::Power(p) = &b else {
                panic!("expected a power for base {base}");
            };
            assert!(!p.wrapped, "base {base} should not be wrapped");
        }
    }

    #[test]
    fn call_surrounds_its_argument() {
        let b = measured("sin(x)", 36.0);
        assert_eq!(
            b.size().x,
            w("sin", 36.0) + w("(", 36.0) + w("x", 36.0) + w(")", 36.0)
        );
        assert_eq!(b.size().y, Fixed::from_f64(36.0));
    }

    #[test]
    fn radical_adds_a_stub_and_headroom() {
        let b = measured("sqrt(x)", 36.0);
        assert_eq!(b.size().x, Fixed::from_f64(12.0) + w("x", 36.0));
        assert_eq!(b.size().y, Fixed::from_f64(36.0).scale(5, 4));

        let LayoutBox::Sqrt(s) = &b else {
            panic!("expected a radical, got {b:?}");
        };
        assert_eq!(s.content_at.x, Fixed::from_f64(12.0));
        assert_eq!(s.stroke_width, 36.0 / 30.0);
    }

    #[test]
    fn doubling_the_font_size_doubles_leaf_boxes() {
        let small = measured("x", 12.0).size();
        let large = measured("x", 24.0).size();
        assert_eq!(large.x, small.x + small.x);
        assert_eq!(large.y, small.y + small.y);
    }

    #[test]
    fn larger_faces_strictly_widen_text_boxes() {
        for input in ["x", "sin(x)", "x+y*x", "sqrt(x/y)"] {
            let small = measured(input, 12.0).size();
            let large = measured(input, 24.0).size();
            assert!(large.x > small.x, "{input} width did not grow");
            assert!(large.y > small.y, "{input} height did not grow");
        }
    }

    #[test]
    fn draw_marks_runs_at_stored_offsets() {
        let context = ctx();
        let b = measured("-x", 36.0);
        let mut pm = Pixmap::new(200, 200);
        let anchor = FixedPoint::new(Fixed::from_f64(50.0), Fixed::from_f64(100.0));
        b.draw(&context, &mut pm, anchor);
        // The sign run marks the anchor, the operand run marks the
        // anchor displaced by the sign width.
        assert_eq!(pm.pixel(50, 100), Some([0, 0, 0, 255]));
        assert_eq!(pm.pixel(68, 100), Some([0, 0, 0, 255]));
    }

    #[test]
    fn fraction_draw_strokes_the_bar() {
        let context = ctx();
        let b = measured("x/y", 36.0);
        let mut pm = Pixmap::new(200, 200);
        let anchor = FixedPoint::new(Fixed::from_f64(50.0), Fixed::from_f64(100.0));
        b.draw(&context, &mut pm, anchor);
        // Bar runs at 4/9 of the box height above the anchor.
        let bar_y = 100 - b.size().y.scale(4, 9).floor();
        let hits = (50..50 + b.size().x.floor())
            .filter(|&x| pm.pixel(x, bar_y).map(|p| p[3] != 0).unwrap_or(false))
            .count();
        assert!(hits > 0, "no bar pixels found on row {bar_y}");
    }

    #[test]
    fn radical_draw_strokes_reach_the_full_width() {
        let context = ctx();
        let b = measured("sqrt(x)", 36.0);
        let mut pm = Pixmap::new(200, 200);
        let anchor = FixedPoint::new(Fixed::from_f64(50.0), Fixed::from_f64(100.0));
        b.draw(&context, &mut pm, anchor);
        let bar_y = 100 - b.size().y.scale(7, 10).floor();
        let right_edge = 50 + b.size().x.floor();
        let hits = (50..=right_edge)
            .filter(|&x| pm.pixel(x, bar_y).map(|p| p[3] != 0).unwrap_or(false))
            .count();
        assert!(hits >= (right_edge - 50 - 13) as usize, "bar too short: {hits}");
    }
}
