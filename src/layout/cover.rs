use crate::foundation::core::Rect;

/// Sub-rectangle of the source image selected by [`cover_fit`], in source pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceCrop {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Crop width (never exceeds the image width).
    pub width: f64,
    /// Crop height (never exceeds the image height).
    pub height: f64,
}

impl SourceCrop {
    /// Crop as a rectangle in source pixel space.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// `width / height`.
    pub fn aspect_ratio(self) -> f64 {
        self.width / self.height
    }
}

/// Select the centered source region that, scaled uniformly, exactly fills `target`.
///
/// An image relatively wider than the target keeps its full height and loses equal strips on the
/// left and right; otherwise it keeps its full width and loses equal strips top and bottom.
pub fn cover_fit(image_width: u32, image_height: u32, target: Rect) -> SourceCrop {
    let iw = f64::from(image_width.max(1));
    let ih = f64::from(image_height.max(1));
    let target_ratio = target.width() / target.height();
    let image_ratio = iw / ih;

    if image_ratio > target_ratio {
        let height = ih;
        let width = (height * target_ratio).min(iw);
        SourceCrop {
            x: (iw - width) / 2.0,
            y: 0.0,
            width,
            height,
        }
    } else {
        let width = iw;
        let height = (width / target_ratio).min(ih);
        SourceCrop {
            x: 0.0,
            y: (ih - height) / 2.0,
            width,
            height,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/cover.rs"]
mod tests;
