use crate::foundation::core::{Canvas, Rect, Rgba8};
use crate::foundation::error::{PolaroidError, PolaroidResult};

/// Horizontal anchoring of the caption relative to [`Typography::anchor_x`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    /// Left edge of the text sits on the anchor.
    Left,
    /// Horizontal center of the text sits on the anchor.
    Center,
    /// Right edge of the text sits on the anchor.
    Right,
}

/// Caption typography.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Typography {
    /// Preferred font family; sans-serif fallbacks are used when it is not installed.
    pub font_family: &'static str,
    /// CSS-style weight (400 regular, 700 bold).
    pub font_weight: u16,
    /// Font size in pixels.
    pub size_px: f32,
    /// X coordinate of the aligned edge.
    pub anchor_x: f64,
    /// Y coordinate of the first line's baseline.
    pub baseline_y: f64,
    /// Which edge of the text sits on `anchor_x`.
    pub align: TextAlign,
    /// Text color.
    pub ink: Rgba8,
}

/// Fixed layout geometry of the composite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Template {
    /// Side of the square output canvas in pixels.
    pub canvas_size: u32,
    /// Substrate color filling the whole canvas.
    pub background: Rgba8,
    /// Rectangle painted with the accent color.
    pub frame: Rect,
    /// Slot the photo is cover-fitted into; strictly inside `frame`.
    pub photo: Rect,
    /// Caption placement and style.
    pub caption: Typography,
}

impl Template {
    /// Canonical 1080x1080 polaroid: white border, 12 px accent frame around the photo and a
    /// right-aligned bold caption in the bottom band.
    pub const POLAROID: Template = Template {
        canvas_size: 1080,
        background: Rgba8::WHITE,
        frame: Rect::new(60.0, 60.0, 1020.0, 880.0),
        photo: Rect::new(72.0, 72.0, 1008.0, 868.0),
        caption: Typography {
            font_family: "Arial",
            font_weight: 700,
            size_px: 40.0,
            anchor_x: 1020.0,
            baseline_y: 985.0,
            align: TextAlign::Right,
            ink: Rgba8::opaque(0x33, 0x33, 0x33),
        },
    };

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas::square(self.canvas_size)
    }

    /// `photo.width / photo.height`.
    pub fn photo_ratio(&self) -> f64 {
        self.photo.width() / self.photo.height()
    }

    /// Check the geometric invariants every render relies on.
    pub fn validate(&self) -> PolaroidResult<()> {
        if self.canvas_size == 0 || self.canvas_size > u32::from(u16::MAX) {
            return Err(PolaroidError::validation(format!(
                "canvas_size must be in 1..=65535, got {}",
                self.canvas_size
            )));
        }
        let canvas = self.canvas().rect();

        check_rect("frame", self.frame, canvas)?;
        check_rect("photo", self.photo, canvas)?;

        let inner = self.photo.x0 > self.frame.x0
            && self.photo.y0 > self.frame.y0
            && self.photo.x1 < self.frame.x1
            && self.photo.y1 < self.frame.y1;
        if !inner {
            return Err(PolaroidError::validation(
                "photo rect must be strictly inside the frame rect",
            ));
        }

        let c = &self.caption;
        if !c.size_px.is_finite() || c.size_px <= 0.0 {
            return Err(PolaroidError::validation(
                "caption size_px must be finite and > 0",
            ));
        }
        let inside = (canvas.x0..=canvas.x1).contains(&c.anchor_x)
            && (canvas.y0..=canvas.y1).contains(&c.baseline_y);
        if !inside {
            return Err(PolaroidError::validation(
                "caption anchor must lie within the canvas",
            ));
        }
        Ok(())
    }
}

fn check_rect(name: &str, r: Rect, canvas: Rect) -> PolaroidResult<()> {
    let finite = [r.x0, r.y0, r.x1, r.y1].iter().all(|v| v.is_finite());
    if !finite || r.width() <= 0.0 || r.height() <= 0.0 {
        return Err(PolaroidError::validation(format!(
            "{name} rect must have positive finite size"
        )));
    }
    if r.x0 < canvas.x0 || r.y0 < canvas.y0 || r.x1 > canvas.x1 || r.y1 > canvas.y1 {
        return Err(PolaroidError::validation(format!(
            "{name} rect must fit within the canvas"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/template.rs"]
mod tests;
