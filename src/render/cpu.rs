use std::sync::Arc;

use crate::assets::decode::SourceImage;
use crate::assets::font::{CaptionFont, TextBrushRgba8, TextLayoutEngine};
use crate::compile::plan::{CaptionLayer, Layer, LayerPlan};
use crate::foundation::core::{Affine, Canvas, Rect, Rgba8};
use crate::foundation::error::{PolaroidError, PolaroidResult};
use crate::foundation::math::clamp_premul_in_place;
use crate::layout::cover::SourceCrop;
use crate::layout::template::TextAlign;
use crate::render::backend::{Composite, RenderBackend};

/// Sources are reduced until the final draw magnifies them by at most this factor's inverse.
const PRESCALE_HEADROOM: f64 = 2.0;
const MAX_PIXMAP_DIM: u32 = u16::MAX as u32;

/// Options for the CPU backend.
#[derive(Debug, Clone, Default)]
pub struct CpuBackendOpts {
    pub(crate) caption_font: Option<CaptionFont>,
}

impl CpuBackendOpts {
    /// Return options with the font used for caption layers.
    ///
    /// Without a font, caption layers are skipped with a warning.
    pub fn with_caption_font(mut self, font: Option<CaptionFont>) -> Self {
        self.caption_font = font;
        self
    }
}

/// Source pixels prepared for sampling, cached across renders of the same image.
#[derive(Clone)]
struct PhotoPaint {
    source: Arc<Vec<u8>>,
    dest_w: f64,
    dest_h: f64,
    paint: vello_cpu::Image,
    scale_x: f64,
    scale_y: f64,
}

struct CaptionText {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

pub(crate) struct CpuBackend {
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: Option<vello_cpu::Pixmap>,
    caption: Option<CaptionText>,
    photo_cache: Option<PhotoPaint>,
    warned_missing_font: bool,
}

impl CpuBackend {
    pub(crate) fn new(opts: CpuBackendOpts) -> PolaroidResult<Self> {
        let caption = match opts.caption_font {
            Some(font) => {
                let engine = TextLayoutEngine::new(&font)?;
                tracing::debug!(family = engine.family_name(), "caption font registered");
                Some(CaptionText {
                    engine,
                    font: font.font_data(),
                })
            }
            None => None,
        };
        Ok(Self {
            ctx: None,
            pixmap: None,
            caption,
            photo_cache: None,
            warned_missing_font: false,
        })
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> PolaroidResult<R>,
    ) -> PolaroidResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn take_blank_pixmap(&mut self, width: u16, height: u16) -> vello_cpu::Pixmap {
        match self.pixmap.take() {
            Some(mut pm) if pm.width() == width && pm.height() == height => {
                pm.data_as_u8_slice_mut().fill(0);
                pm
            }
            _ => vello_cpu::Pixmap::new(width, height),
        }
    }

    fn draw_layer(
        &mut self,
        canvas: Canvas,
        layer: &Layer,
        image: Option<&SourceImage>,
        ctx: &mut vello_cpu::RenderContext,
    ) -> PolaroidResult<()> {
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match layer {
            Layer::Background { color } => {
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_rect(&rect_to_cpu(canvas.rect()));
                Ok(())
            }
            Layer::Frame { rect, color } => {
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_rect(&rect_to_cpu(*rect));
                Ok(())
            }
            Layer::Photo { crop, dest } => {
                let image = image.ok_or_else(|| {
                    PolaroidError::render("photo layer requires a source image")
                })?;
                let p = self.photo_paint_for(image, *crop, *dest)?;

                // Crop in prepared-pixel space, mapped onto the destination slot.
                let src = Rect::new(
                    crop.x * p.scale_x,
                    crop.y * p.scale_y,
                    (crop.x + crop.width) * p.scale_x,
                    (crop.y + crop.height) * p.scale_y,
                );
                let tr = Affine::translate((dest.x0, dest.y0))
                    * Affine::scale_non_uniform(
                        dest.width() / src.width(),
                        dest.height() / src.height(),
                    )
                    * Affine::translate((-src.x0, -src.y0));

                ctx.set_transform(affine_to_cpu(tr));
                ctx.set_paint(p.paint);
                ctx.fill_rect(&rect_to_cpu(src));
                Ok(())
            }
            Layer::Caption(caption) => self.draw_caption(caption, ctx),
        }
    }

    fn photo_paint_for(
        &mut self,
        image: &SourceImage,
        crop: SourceCrop,
        dest: Rect,
    ) -> PolaroidResult<PhotoPaint> {
        if let Some(p) = &self.photo_cache
            && image.same_pixels(&p.source)
            && p.dest_w == dest.width()
            && p.dest_h == dest.height()
        {
            return Ok(p.clone());
        }

        let (w, h) = (image.width(), image.height());
        let factor = prescale_factor(w, h, crop, dest);
        let (pw, ph, bytes) = if factor < 1.0 {
            let pw = scaled_dim(w, factor);
            let ph = scaled_dim(h, factor);
            tracing::debug!(w, h, pw, ph, "reducing source before sampling");
            (pw, ph, reduce_premul(image, pw, ph)?)
        } else {
            (w, h, image.premul_bytes().to_vec())
        };

        let pixmap = pixmap_from_premul_bytes(&bytes, pw, ph)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler {
                quality: vello_cpu::peniko::ImageQuality::High,
                ..vello_cpu::peniko::ImageSampler::default()
            },
        };
        let out = PhotoPaint {
            source: image.pixels_arc(),
            dest_w: dest.width(),
            dest_h: dest.height(),
            paint,
            scale_x: f64::from(pw) / f64::from(w),
            scale_y: f64::from(ph) / f64::from(h),
        };
        self.photo_cache = Some(out.clone());
        Ok(out)
    }

    fn draw_caption(
        &mut self,
        caption: &CaptionLayer,
        ctx: &mut vello_cpu::RenderContext,
    ) -> PolaroidResult<()> {
        let Some(text) = self.caption.as_mut() else {
            if !self.warned_missing_font {
                tracing::warn!("no caption font configured; caption layers are skipped");
                self.warned_missing_font = true;
            }
            return Ok(());
        };

        let brush = TextBrushRgba8 {
            r: caption.ink.r,
            g: caption.ink.g,
            b: caption.ink.b,
            a: caption.ink.a,
        };
        let layout =
            text.engine
                .layout_line(&caption.text, caption.size_px, caption.weight, brush)?;
        let Some(first) = layout.lines().next() else {
            return Ok(());
        };
        let baseline = f64::from(first.metrics().baseline);
        let width = f64::from(layout.width());
        let x = match caption.align {
            TextAlign::Left => caption.anchor.x,
            TextAlign::Center => caption.anchor.x - width / 2.0,
            TextAlign::Right => caption.anchor.x - width,
        };

        ctx.set_transform(affine_to_cpu(Affine::translate((
            x,
            caption.anchor.y - baseline,
        ))));
        // Only the first line is painted; captions never wrap.
        for item in first.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&text.font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(level = "debug", skip_all, fields(layers = plan.layers.len()))]
    fn render_plan(
        &mut self,
        plan: &LayerPlan,
        image: Option<&SourceImage>,
        out: &mut Composite,
    ) -> PolaroidResult<()> {
        let (w, h) = canvas_dims_u16(plan.canvas)?;
        let mut pixmap = self.take_blank_pixmap(w, h);

        self.with_ctx_mut(w, h, |this, ctx| {
            for layer in &plan.layers {
                this.draw_layer(plan.canvas, layer, image, ctx)?;
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        out.width = plan.canvas.width;
        out.height = plan.canvas.height;
        out.data.clear();
        out.data.extend_from_slice(pixmap.data_as_u8_slice());
        self.pixmap = Some(pixmap);
        Ok(())
    }
}

fn canvas_dims_u16(canvas: Canvas) -> PolaroidResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| PolaroidError::render("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| PolaroidError::render("canvas height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(PolaroidError::render("canvas must be at least 1x1"));
    }
    Ok((w, h))
}

/// Reduction applied to the whole source before the final high-quality sampling pass.
///
/// `1.0` means "use as is". Large downscales are split so the sampler never minifies by more
/// than [`PRESCALE_HEADROOM`], and sources are always brought under the pixmap size limit.
fn prescale_factor(width: u32, height: u32, crop: SourceCrop, dest: Rect) -> f64 {
    let draw_scale = (dest.width() / crop.width).max(dest.height() / crop.height);
    let max = f64::from(MAX_PIXMAP_DIM);
    (draw_scale * PRESCALE_HEADROOM)
        .min(1.0)
        .min(max / f64::from(width))
        .min(max / f64::from(height))
}

fn scaled_dim(v: u32, factor: f64) -> u32 {
    ((f64::from(v) * factor).round() as u32).clamp(1, MAX_PIXMAP_DIM)
}

fn reduce_premul(image: &SourceImage, width: u32, height: u32) -> PolaroidResult<Vec<u8>> {
    let src = image::RgbaImage::from_raw(
        image.width(),
        image.height(),
        image.premul_bytes().to_vec(),
    )
    .ok_or_else(|| PolaroidError::render("source pixel buffer does not match its dimensions"))?;
    let mut out = image::imageops::resize(
        &src,
        width,
        height,
        image::imageops::FilterType::Lanczos3,
    )
    .into_raw();
    clamp_premul_in_place(&mut out);
    Ok(out)
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> PolaroidResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PolaroidError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PolaroidError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(PolaroidError::render("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
