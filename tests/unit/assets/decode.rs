use std::io::Cursor;

use super::*;

fn encode_png(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let prepared = decode_image(&encode_png(img)).unwrap();
    assert_eq!(prepared.width(), 1);
    assert_eq!(prepared.height(), 1);
    assert_eq!(
        prepared.premul_bytes(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_keeps_wide_dimensions() {
    let img = image::RgbaImage::from_pixel(40, 10, image::Rgba([1, 2, 3, 255]));
    let prepared = decode_image(&encode_png(img)).unwrap();
    assert_eq!((prepared.width(), prepared.height()), (40, 10));
    assert!((prepared.aspect_ratio() - 4.0).abs() < 1e-12);
}

#[test]
fn decode_rejects_empty_and_garbage() {
    assert!(matches!(decode_image(&[]), Err(PolaroidError::Decode(_))));
    assert!(matches!(
        decode_image(b"definitely not an image"),
        Err(PolaroidError::Decode(_))
    ));
}

#[test]
fn from_rgba8_validates_buffer() {
    assert!(SourceImage::from_rgba8(0, 1, vec![]).is_err());
    assert!(SourceImage::from_rgba8(2, 2, vec![0; 15]).is_err());

    let img = SourceImage::from_rgba8(2, 1, vec![255, 0, 0, 255, 0, 0, 0, 0]).unwrap();
    assert_eq!(img.premul_bytes(), &[255, 0, 0, 255, 0, 0, 0, 0]);
}

#[test]
fn clones_share_pixels() {
    let a = SourceImage::from_rgba8(1, 1, vec![9, 9, 9, 255]).unwrap();
    let b = a.clone();
    assert!(b.same_pixels(&a.pixels_arc()));

    let c = SourceImage::from_rgba8(1, 1, vec![9, 9, 9, 255]).unwrap();
    assert!(!c.same_pixels(&a.pixels_arc()));
}
