use crate::{
    assets::decode::SourceImage,
    foundation::core::{Canvas, Point, Rect, Rgba8},
    layout::cover::{SourceCrop, cover_fit},
    layout::template::{TextAlign, Template},
    session::style::StyleState,
};

#[derive(Clone, Debug, PartialEq)]
/// Backend-agnostic description of one render.
///
/// Layers are listed back-to-front; a backend paints them in order onto a blank canvas, so later
/// layers occlude earlier ones.
pub struct LayerPlan {
    /// Output canvas.
    pub canvas: Canvas,
    /// Layers, back-to-front.
    pub layers: Vec<Layer>,
}

#[derive(Clone, Debug, PartialEq)]
/// One paint step of a [`LayerPlan`].
pub enum Layer {
    /// Fill the whole canvas.
    Background {
        /// Substrate color.
        color: Rgba8,
    },
    /// Fill the frame rectangle with the accent color.
    Frame {
        /// Frame rectangle in canvas pixels.
        rect: Rect,
        /// Accent color.
        color: Rgba8,
    },
    /// Scale `crop` of the source image to exactly fill `dest`.
    Photo {
        /// Source region chosen by cover-fit.
        crop: SourceCrop,
        /// Photo slot in canvas pixels.
        dest: Rect,
    },
    /// Single line of caption text.
    Caption(CaptionLayer),
}

#[derive(Clone, Debug, PartialEq)]
/// Resolved caption draw.
pub struct CaptionLayer {
    /// Trimmed caption text with every whitespace character replaced by a space (never empty).
    pub text: String,
    /// `x` of the aligned edge and `y` of the baseline.
    pub anchor: Point,
    /// Which edge of the text sits on `anchor.x`.
    pub align: TextAlign,
    /// Font size in pixels.
    pub size_px: f32,
    /// CSS-style font weight.
    pub weight: u16,
    /// Text color.
    pub ink: Rgba8,
}

/// Coarse layer kind, handy for asserting plan shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    /// [`Layer::Background`].
    Background,
    /// [`Layer::Frame`].
    Frame,
    /// [`Layer::Photo`].
    Photo,
    /// [`Layer::Caption`].
    Caption,
}

impl Layer {
    /// Kind of this layer.
    pub fn kind(&self) -> LayerKind {
        match self {
            Layer::Background { .. } => LayerKind::Background,
            Layer::Frame { .. } => LayerKind::Frame,
            Layer::Photo { .. } => LayerKind::Photo,
            Layer::Caption(_) => LayerKind::Caption,
        }
    }
}

impl LayerPlan {
    /// Layer kinds in paint order.
    pub fn kinds(&self) -> Vec<LayerKind> {
        self.layers.iter().map(Layer::kind).collect()
    }
}

/// Resolve template, image and style into the layers of one composite.
///
/// Background and frame are always present; the photo layer needs an image and the caption layer
/// needs a caption that is non-empty after trimming.
pub fn compile_layers(
    template: &Template,
    image: Option<&SourceImage>,
    style: &StyleState,
) -> LayerPlan {
    let mut layers = Vec::with_capacity(4);
    layers.push(Layer::Background {
        color: template.background,
    });
    layers.push(Layer::Frame {
        rect: template.frame,
        color: style.accent,
    });

    if let Some(img) = image {
        layers.push(Layer::Photo {
            crop: cover_fit(img.width(), img.height(), template.photo),
            dest: template.photo,
        });
    }

    if let Some(text) = style.trimmed_caption() {
        let t = &template.caption;
        layers.push(Layer::Caption(CaptionLayer {
            text: single_line(text),
            anchor: Point::new(t.anchor_x, t.baseline_y),
            align: t.align,
            size_px: t.size_px,
            weight: t.font_weight,
            ink: t.ink,
        }));
    }

    LayerPlan {
        canvas: template.canvas(),
        layers,
    }
}

/// Captions are drawn on one line; line and paragraph separators become plain spaces.
fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
