//! Debug dump side-channel: writes advisory
//! `debug_*.png` grayscale images when the caller opts in. A
//! from-scratch, dependency-free PNG encoder (uncompressed "stored"
//! deflate blocks) since the workspace carries no image-encoding crate.

use std::io::{self, Write};
use std::path::Path;

/// Writes an 8-bit grayscale PNG to `path`. `pixels.len()` must equal
/// `width * height`.
pub fn write_grayscale_png(path: &Path, width: u32, height: u32, pixels: &[u8]) -> io::Result<()> {
    debug_assert_eq!(pixels.len(), width as usize * height as usize);

    let mut file = std::fs::File::create(path)?;
    file.write_all(&PNG_SIGNATURE)?;
    write_chunk(&mut file, b"IHDR", &ihdr(width, height))?;
    write_chunk(&mut file, b"IDAT", &idat(width, height, pixels))?;
    write_chunk(&mut file, b"IEND", &[])?;
    Ok(())
}

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

fn ihdr(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.push(8); // bit depth
    data.push(0); // color type: grayscale
    data.push(0); // compression method: deflate
    data.push(0); // filter method: adaptive (per-scanline filter byte)
    data.push(0); // interlace: none
    data
}

/// Builds the zlib-wrapped, stored-deflate-block scanline stream: each
/// row prefixed with a `None` filter byte, per the PNG scanline format.
fn idat(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
    let width = width as usize;
    let mut raw = Vec::with_capacity(height as usize * (width + 1));
    for row in pixels.chunks_exact(width) {
        raw.push(0); // filter type: None
        raw.extend_from_slice(row);
    }
    zlib_compress_stored(&raw)
}

fn write_chunk<W: Write>(writer: &mut W, chunk_type: &[u8; 4], data: &[u8]) -> io::Result<()> {
    writer.write_all(&(data.len() as u32).to_be_bytes())?;
    writer.write_all(chunk_type)?;
    writer.write_all(data)?;
    let mut crc = crc32_update(0xFFFF_FFFF, chunk_type);
    crc = crc32_update(crc, data);
    writer.write_all(&(crc ^ 0xFFFF_FFFF).to_be_bytes())?;
    Ok(())
}

/// zlib stream (2-byte header, deflate stored blocks, 4-byte Adler-32
/// trailer) with no compression — correctness over ratio; these dumps
/// are advisory.
fn zlib_compress_stored(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len() + raw.len() / 65535 * 5 + 11);
    out.push(0x78);
    out.push(0x01);

    const MAX_BLOCK: usize = 65535;
    if raw.is_empty() {
        out.extend_from_slice(&[1, 0, 0, 0xFF, 0xFF]);
    } else {
        let mut offset = 0;
        while offset < raw.len() {
            let end = (offset + MAX_BLOCK).min(raw.len());
            let is_final = end == raw.len();
            let block = &raw[offset..end];
            out.push(if is_final { 1 } else { 0 });
            let len = block.len() as u16;
            out.extend_from_slice(&len.to_le_bytes());
            out.extend_from_slice(&(!len).to_le_bytes());
            out.extend_from_slice(block);
            offset = end;
        }
    }

    out.extend_from_slice(&adler32(raw).to_be_bytes());
    out
}

fn adler32(data: &[u8]) -> u32 {
    const MOD_ADLER: u32 = 65521;
    let mut a: u32 = 1;
    let mut b: u32 = 0;
    for &byte in data {
        a = (a + byte as u32) % MOD_ADLER;
        b = (b + a) % MOD_ADLER;
    }
    (b << 16) | a
}

/// Runs the CRC-32 (IEEE 802.3) register forward over `data`, starting
/// from `crc`. Callers seed with `0xFFFF_FFFF` and invert the final
/// result; kept split so `write_chunk` can run it across the
/// chunk-type and data spans without re-seeding in between.
fn crc32_update(mut crc: u32, data: &[u8]) -> u32 {
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ 0xEDB8_8320 } else { crc >> 1 };
        }
    }
    crc
}
