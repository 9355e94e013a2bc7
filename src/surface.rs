use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

/// The drawing calls the control surface needs each frame.
pub trait DrawSurface {
    fn clear(&mut self);
    fn draw_circle_outline(&mut self, cx: f64, cy: f64, r: f64);
    fn draw_filled_circle(&mut self, cx: f64, cy: f64, r: f64, alpha: f64);
    fn draw_text(&mut self, s: &str, x: f64, y: f64);
}

/// Stands in when no 2D context is available, so ticks still stream.
pub struct NullSurface;

impl DrawSurface for NullSurface {
    fn clear(&mut self) {}
    fn draw_circle_outline(&mut self, _cx: f64, _cy: f64, _r: f64) {}
    fn draw_filled_circle(&mut self, _cx: f64, _cy: f64, _r: f64, _alpha: f64) {}
    fn draw_text(&mut self, _s: &str, _x: f64, _y: f64) {}
}

/// Canvas 2D implementation. Draw errors from the context are ignored, as a
/// missed frame is repainted on the next tick.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.set_fill_style_str("#0e1116");
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_circle_outline(&mut self, cx: f64, cy: f64, r: f64) {
        self.ctx.set_stroke_style_str("#c9d1d9");
        self.ctx.set_line_width(2.0);
        self.ctx.begin_path();
        self.ctx.arc(cx, cy, r.max(0.0), 0.0, TAU).ok();
        self.ctx.stroke();
    }

    fn draw_filled_circle(&mut self, cx: f64, cy: f64, r: f64, alpha: f64) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0));
        self.ctx.set_fill_style_str("#58a6ff");
        self.ctx.begin_path();
        self.ctx.arc(cx, cy, r.max(0.0), 0.0, TAU).ok();
        self.ctx.fill();
        self.ctx.set_global_alpha(1.0);
    }

    fn draw_text(&mut self, s: &str, x: f64, y: f64) {
        self.ctx.set_fill_style_str("#c9d1d9");
        self.ctx.set_font("16px sans-serif");
        self.ctx.set_text_align("center");
        self.ctx.fill_text(s, x, y).ok();
    }
}
