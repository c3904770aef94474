use crate::{
    assets::color::parse_hex_color,
    assets::decode::{SourceImage, decode_image},
    assets::font::CaptionFont,
    compile::plan::compile_layers,
    export::namer::export_file_name,
    export::png::encode_png,
    export::sink::DownloadSink,
    foundation::core::Rgba8,
    foundation::error::{PolaroidError, PolaroidResult},
    layout::template::Template,
    render::backend::{BackendKind, Composite, RenderBackend, create_backend},
    render::cpu::CpuBackendOpts,
    session::style::StyleState,
};

/// Options for [`PolaroidSession::new`].
#[derive(Clone, Debug)]
pub struct PolaroidSessionOpts {
    /// Layout geometry; validated when the session is created.
    pub template: Template,
    /// Font for the caption. Without one, captions are not drawn.
    pub caption_font: Option<CaptionFont>,
}

impl Default for PolaroidSessionOpts {
    /// Canonical template with the best installed match for its caption typography, or the
    /// bundled face when none is installed.
    fn default() -> Self {
        Self {
            template: Template::POLAROID,
            caption_font: Some(CaptionFont::resolve_or_bundled(
                &Template::POLAROID.caption,
                &[],
            )),
        }
    }
}

/// Handle for a decode started with [`PolaroidSession::begin_decode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecodeTicket(u64);

impl DecodeTicket {
    /// Monotonic sequence number of this ticket.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Result of [`PolaroidSession::complete_decode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The image became the current photo and the composite was re-rendered.
    Applied,
    /// A newer ticket or image superseded this decode; nothing changed.
    Stale,
}

/// One exported file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedFile {
    /// Download file name derived from the caption.
    pub file_name: String,
    /// PNG bytes.
    pub bytes: Vec<u8>,
}

/// Interactive editing session: current style and photo plus the rendered composite.
///
/// Every mutation re-renders immediately, so [`composite`](Self::composite) always reflects the
/// current state. A session starts with a frame-only preview in the default accent color.
pub struct PolaroidSession {
    template: Template,
    backend: Box<dyn RenderBackend>,
    style: StyleState,
    image: Option<SourceImage>,
    composite: Composite,
    render_count: u64,
    latest_ticket: u64,
}

impl std::fmt::Debug for PolaroidSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolaroidSession")
            .field("style", &self.style)
            .field("has_image", &self.image.is_some())
            .field("render_count", &self.render_count)
            .field("latest_ticket", &self.latest_ticket)
            .finish_non_exhaustive()
    }
}

impl PolaroidSession {
    /// Validate the template, create the CPU backend and render the initial preview.
    pub fn new(opts: PolaroidSessionOpts) -> PolaroidResult<Self> {
        opts.template.validate()?;
        let backend = create_backend(
            BackendKind::Cpu,
            CpuBackendOpts::default().with_caption_font(opts.caption_font),
        )?;
        let mut session = Self {
            template: opts.template,
            backend,
            style: StyleState::default(),
            image: None,
            composite: Composite::blank(opts.template.canvas()),
            render_count: 0,
            latest_ticket: 0,
        };
        session.render()?;
        Ok(session)
    }

    /// Change the frame color and re-render.
    pub fn set_accent_color(&mut self, color: Rgba8) -> PolaroidResult<()> {
        self.style.accent = color;
        self.render().map(|_| ())
    }

    /// Parse a `#rrggbb` / `#rrggbbaa` string and apply it as the accent.
    ///
    /// An unparsable string leaves the session untouched.
    pub fn set_accent_color_hex(&mut self, hex: &str) -> PolaroidResult<()> {
        let color = parse_hex_color(hex)?;
        self.set_accent_color(color)
    }

    /// Replace the caption and re-render.
    pub fn set_caption(&mut self, caption: impl Into<String>) -> PolaroidResult<()> {
        self.style.caption = caption.into();
        self.render().map(|_| ())
    }

    /// Replace the photo and re-render. Outstanding decode tickets become stale.
    pub fn set_image(&mut self, image: SourceImage) -> PolaroidResult<()> {
        self.latest_ticket += 1;
        self.image = Some(image);
        self.render().map(|_| ())
    }

    /// Drop the photo, returning to the frame-only preview.
    pub fn clear_image(&mut self) -> PolaroidResult<()> {
        self.latest_ticket += 1;
        self.image = None;
        self.render().map(|_| ())
    }

    /// Decode uploaded bytes and make them the current photo.
    ///
    /// On a decode error the previous photo (if any) stays in place.
    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> PolaroidResult<()> {
        let image = decode_image(bytes)?;
        self.set_image(image)
    }

    /// Start an asynchronous decode; only the newest ticket may apply its result.
    pub fn begin_decode(&mut self) -> DecodeTicket {
        self.latest_ticket += 1;
        DecodeTicket(self.latest_ticket)
    }

    /// Apply a finished decode if `ticket` is still the newest one issued.
    ///
    /// A ticket applies at most once; completing it again reports [`DecodeOutcome::Stale`].
    pub fn complete_decode(
        &mut self,
        ticket: DecodeTicket,
        image: SourceImage,
    ) -> PolaroidResult<DecodeOutcome> {
        if ticket.0 != self.latest_ticket {
            tracing::warn!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "ignoring stale decode result"
            );
            return Ok(DecodeOutcome::Stale);
        }
        self.latest_ticket += 1;
        self.image = Some(image);
        self.render()?;
        Ok(DecodeOutcome::Applied)
    }

    /// Re-render the composite from the current state.
    #[tracing::instrument(level = "debug", skip(self), fields(has_image = self.image.is_some()))]
    pub fn render(&mut self) -> PolaroidResult<&Composite> {
        let plan = compile_layers(&self.template, self.image.as_ref(), &self.style);
        self.backend
            .render_plan(&plan, self.image.as_ref(), &mut self.composite)?;
        self.render_count += 1;
        tracing::debug!(render_count = self.render_count, "composite rendered");
        Ok(&self.composite)
    }

    /// Most recent render.
    pub fn composite(&self) -> &Composite {
        &self.composite
    }

    /// Current accent and caption.
    pub fn style(&self) -> &StyleState {
        &self.style
    }

    /// Current photo, if one is loaded.
    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    /// Layout geometry in use.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Number of renders performed so far, including the initial one.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Encode the current composite and name it after the caption.
    ///
    /// Fails with [`PolaroidError::MissingInput`] while no photo is loaded.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn export_png(&self) -> PolaroidResult<ExportedFile> {
        if self.image.is_none() {
            return Err(PolaroidError::missing_input("please upload a photo first"));
        }
        let file_name = export_file_name(&self.style.caption);
        let bytes = encode_png(&self.composite)?;
        tracing::debug!(file_name = %file_name, bytes = bytes.len(), "export ready");
        Ok(ExportedFile { file_name, bytes })
    }

    /// Export the current composite and hand it to `sink`.
    ///
    /// Nothing is delivered when no photo is loaded.
    pub fn export(&self, sink: &mut dyn DownloadSink) -> PolaroidResult<ExportedFile> {
        let file = self.export_png()?;
        sink.deliver(&file.file_name, &file.bytes)?;
        Ok(file)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
