#![allow(dead_code)]

use std::io::{Cursor, Write};

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

pub const KRITA_MIMETYPE: &[u8] = b"application/x-krita";

pub fn encode_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 20) as u8, (y * 20) as u8, 128, 255])
    });
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

pub fn build_zip(entries: &[(&str, &[u8])], method: CompressionMethod) -> Vec<u8> {
    let options = SimpleFileOptions::default().compression_method(method);
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// A `.kra`-shaped package. `mimetype` goes first and uncompressed, as Krita
/// writes it.
pub fn build_kra(mimetype: Option<&[u8]>, merged: Option<&[u8]>) -> Vec<u8> {
    let mut entries: Vec<(&str, &[u8])> = Vec::new();
    if let Some(mimetype) = mimetype {
        entries.push(("mimetype", mimetype));
    }
    entries.push(("maindoc.xml", b"<DOC/>"));
    if let Some(merged) = merged {
        entries.push(("mergedimage.png", merged));
    }
    build_zip(&entries, CompressionMethod::Stored)
}

fn read_u16(data: &[u8], at: usize) -> usize {
    u16::from_le_bytes([data[at], data[at + 1]]) as usize
}

fn bump_u32(data: &mut [u8], at: usize, extra: u32) {
    let value = u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]);
    data[at..at + 4].copy_from_slice(&(value + extra).to_le_bytes());
}

/// Makes the archive declare `extra` more uncompressed bytes for `name` than
/// it stores, in both the local header and the central directory.
pub fn inflate_declared_size(zip: &mut [u8], name: &str, extra: u32) {
    let name = name.as_bytes();
    let mut patched = 0;
    let mut i = 0;
    while i + 46 <= zip.len() {
        if zip[i..].starts_with(b"PK\x03\x04") {
            let name_len = read_u16(zip, i + 26);
            if zip.get(i + 30..i + 30 + name_len) == Some(name) {
                bump_u32(zip, i + 22, extra);
                patched += 1;
            }
        } else if zip[i..].starts_with(b"PK\x01\x02") {
            let name_len = read_u16(zip, i + 28);
            if zip.get(i + 46..i + 46 + name_len) == Some(name) {
                bump_u32(zip, i + 24, extra);
                patched += 1;
            }
        }
        i += 1;
    }
    assert_eq!(patched, 2, "expected one local and one central header");
}
