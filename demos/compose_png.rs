use std::path::Path;

use polaroid::{DirectorySink, PolaroidSession, PolaroidSessionOpts, SourceImage};

/// Diagonal gradient used when no photo path is given.
fn gradient(width: u32, height: u32) -> anyhow::Result<SourceImage> {
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width.max(1)) as u8;
            let b = (y * 255 / height.max(1)) as u8;
            rgba.extend_from_slice(&[r, 96, b, 255]);
        }
    }
    Ok(SourceImage::from_rgba8(width, height, rgba)?)
}

// Usage: compose_png [photo] [caption] [#accent]
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let photo = args.next();
    let caption = args.next().unwrap_or_else(|| "Lyon, Septembre 2025".to_owned());
    let accent = args.next().unwrap_or_else(|| "#4a90d9".to_owned());

    let mut session = PolaroidSession::new(PolaroidSessionOpts::default())?;

    match photo {
        Some(path) => session.load_image_bytes(&std::fs::read(&path)?)?,
        None => session.set_image(gradient(1600, 1200)?)?,
    }
    session.set_accent_color_hex(&accent)?;
    session.set_caption(caption)?;

    let out_dir = Path::new("target/polaroid_demos");
    let mut sink = DirectorySink::new(out_dir);
    let file = session.export(&mut sink)?;

    eprintln!(
        "wrote {} ({} bytes, {} renders)",
        out_dir.join(&file.file_name).display(),
        file.bytes.len(),
        session.render_count()
    );
    Ok(())
}
