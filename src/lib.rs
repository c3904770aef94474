//! Polaroid is a photo compositor that turns an uploaded photo into a square polaroid print.
//!
//! The photo is cover-fitted into a slot inside a colored frame on a white card, with an optional
//! caption below. The public API is session-oriented:
//!
//! - Create a [`PolaroidSession`] (optionally with a [`CaptionFont`])
//! - Feed it a photo, an accent color and a caption; every change re-renders the [`Composite`]
//! - Export the composite as a lossless PNG named after the caption into a [`DownloadSink`]
//!
//! The lower-level pieces ([`compile_layers`], [`RenderBackend`], [`encode_png`],
//! [`export_file_name`]) are exposed for hosts that drive rendering themselves.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod compile;
pub(crate) mod export;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod session;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgba8, Rgba8Premul};
pub use crate::foundation::error::{PolaroidError, PolaroidResult};

pub use crate::assets::color::parse_hex_color;
pub use crate::assets::decode::{SourceImage, decode_image};
pub use crate::assets::font::CaptionFont;
pub use crate::compile::plan::{CaptionLayer, Layer, LayerKind, LayerPlan, compile_layers};
pub use crate::export::namer::{DEFAULT_EXPORT_NAME, EXPORT_EXTENSION, export_file_name};
pub use crate::export::png::encode_png;
pub use crate::export::sink::{DirectorySink, DownloadSink, InMemorySink};
pub use crate::layout::cover::{SourceCrop, cover_fit};
pub use crate::layout::template::{Template, TextAlign, Typography};
pub use crate::render::backend::{BackendKind, Composite, RenderBackend, create_backend};
pub use crate::render::cpu::CpuBackendOpts;
pub use crate::session::render_session::{
    DecodeOutcome, DecodeTicket, ExportedFile, PolaroidSession, PolaroidSessionOpts,
};
pub use crate::session::style::{DEFAULT_ACCENT, StyleState};
