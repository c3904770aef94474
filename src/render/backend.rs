use crate::{
    assets::decode::SourceImage,
    compile::plan::LayerPlan,
    foundation::core::{Canvas, Rgba8Premul},
    foundation::error::PolaroidResult,
    render::cpu::{CpuBackend, CpuBackendOpts},
};

/// The rendered composite as RGBA8 pixels.
///
/// Pixels are **premultiplied alpha**, tightly packed and row-major. A render overwrites every
/// byte; nothing from an earlier render survives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Composite {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes.
    pub data: Vec<u8>,
}

impl Composite {
    /// Transparent buffer of the given size.
    pub fn blank(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0; canvas.byte_len()],
        }
    }

    /// Buffer dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data.get(i..i + 4).map(Rgba8Premul::from_slice)
    }
}

/// A rasterizer that paints a [`LayerPlan`] into a [`Composite`].
pub trait RenderBackend {
    /// Paint every layer of `plan` onto a blank canvas and store the result in `out`.
    ///
    /// `image` supplies the pixels for a photo layer; it must be present when the plan has one.
    fn render_plan(
        &mut self,
        plan: &LayerPlan,
        image: Option<&SourceImage>,
        out: &mut Composite,
    ) -> PolaroidResult<()>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Create a rendering backend implementation.
pub fn create_backend(
    kind: BackendKind,
    opts: CpuBackendOpts,
) -> PolaroidResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(CpuBackend::new(opts)?)),
    }
}
