use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{PolaroidError, PolaroidResult};
use crate::layout::template::Typography;

/// Families tried after the template family, in order, before any installed face is accepted.
const FALLBACK_FAMILIES: [&str; 5] = [
    "Helvetica",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
    "Roboto",
];

/// Public-domain sans face shipped with the crate for hosts without installed fonts.
const BUNDLED_TUFFY: &[u8] = include_bytes!("../../fonts/Tuffy.ttf");

/// Font used to draw the caption: raw font file bytes plus the face index inside them.
#[derive(Clone)]
pub struct CaptionFont {
    bytes: Arc<Vec<u8>>,
    index: u32,
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont")
            .field("len", &self.bytes.len())
            .field("index", &self.index)
            .finish()
    }
}

impl CaptionFont {
    /// Wrap raw `.ttf`/`.otf` bytes (face 0).
    pub fn from_bytes(bytes: Vec<u8>) -> PolaroidResult<Self> {
        if bytes.is_empty() {
            return Err(PolaroidError::font("font bytes are empty"));
        }
        Ok(Self {
            bytes: Arc::new(bytes),
            index: 0,
        })
    }

    /// Read a font file from disk (face 0).
    pub fn from_path(path: impl AsRef<Path>) -> PolaroidResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    /// Find an installed font matching `typo` (family, then sans-serif fallbacks, then any face).
    ///
    /// System fonts are always searched; `extra_dirs` adds loose `.ttf`/`.otf`/`.ttc` files.
    pub fn resolve(typo: &Typography, extra_dirs: &[PathBuf]) -> PolaroidResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in extra_dirs {
            load_fonts_from_dir(&mut db, dir);
        }

        let mut families =
            Vec::<usvg::fontdb::Family<'_>>::with_capacity(FALLBACK_FAMILIES.len() + 2);
        families.push(usvg::fontdb::Family::Name(typo.font_family));
        families.extend(
            FALLBACK_FAMILIES
                .iter()
                .map(|f| usvg::fontdb::Family::Name(*f)),
        );
        families.push(usvg::fontdb::Family::SansSerif);

        let query = usvg::fontdb::Query {
            families: &families,
            weight: usvg::fontdb::Weight(typo.font_weight),
            stretch: usvg::fontdb::Stretch::Normal,
            style: usvg::fontdb::Style::Normal,
        };

        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|face| face.id))
            .ok_or_else(|| {
                PolaroidError::font(format!(
                    "no installed font found for family \"{}\"",
                    typo.font_family
                ))
            })?;

        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| PolaroidError::font("font face data is unavailable"))?;

        tracing::debug!(family = typo.font_family, index, "resolved caption font");
        Ok(Self {
            bytes: Arc::new(bytes),
            index,
        })
    }

    /// The bundled Tuffy face.
    pub fn bundled() -> Self {
        Self {
            bytes: Arc::new(BUNDLED_TUFFY.to_vec()),
            index: 0,
        }
    }

    /// [`CaptionFont::resolve`], falling back to [`CaptionFont::bundled`] when no installed face
    /// is usable.
    pub fn resolve_or_bundled(typo: &Typography, extra_dirs: &[PathBuf]) -> Self {
        Self::resolve(typo, extra_dirs).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "using bundled caption font");
            Self::bundled()
        })
    }

    /// Raw font file bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Face index inside [`CaptionFont::bytes`] (non-zero only for collections).
    pub fn index(&self) -> u32 {
        self.index
    }

    pub(crate) fn font_data(&self) -> vello_cpu::peniko::FontData {
        vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(self.bytes.as_ref().clone()),
            self.index,
        )
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font file");
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Parley contexts with the caption font registered once.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    pub(crate) fn new(font: &CaptionFont) -> PolaroidResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes().to_vec()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| PolaroidError::font("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PolaroidError::font("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    pub(crate) fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape `text` as a single unbroken line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        weight: u16,
        brush: TextBrushRgba8,
    ) -> PolaroidResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PolaroidError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(weight)),
        ));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
