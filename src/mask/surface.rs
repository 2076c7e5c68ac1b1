use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Black,
    /// Translucent color laid over whatever is already in the cell.
    Tint { rgb: (u8, u8, u8), alpha: f64 },
}

impl Paint {
    pub fn css(&self) -> String {
        match *self {
            Paint::Black => "rgb(0, 0, 0)".to_string(),
            Paint::Tint { rgb: (r, g, b), alpha } => {
                format!("rgba({}, {}, {}, {:.3})", r, g, b, alpha.clamp(0.0, 1.0))
            }
        }
    }
}

/// A raster the mask paints into: cleared each frame, then filled with square cells.
pub trait Surface {
    fn size(&self) -> (u32, u32);
    fn clear(&mut self);
    fn fill_cell(&mut self, x: u32, y: u32, side: u32, paint: Paint);
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("canvas is not attached to the document")]
    Detached,
    #[error("canvas has no 2d context")]
    NoContext,
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Last fill style set, to skip redundant style changes across cells.
    style: String,
}

impl CanvasSurface {
    pub fn attach(canvas: &HtmlCanvasElement) -> Result<Self, SurfaceError> {
        if !canvas.is_connected() {
            return Err(SurfaceError::Detached);
        }
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(SurfaceError::NoContext)?;
        Ok(Self {
            canvas: canvas.clone(),
            ctx,
            style: String::new(),
        })
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn fill_cell(&mut self, x: u32, y: u32, side: u32, paint: Paint) {
        let css = paint.css();
        if css != self.style {
            self.ctx.set_fill_style_str(&css);
            self.style = css;
        }
        self.ctx
            .fill_rect(x as f64, y as f64, side as f64, side as f64);
    }
}
