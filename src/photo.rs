//! Photo collaborator standing between the create form and the store. It
//! loads an image file, crops it to the locked profile aspect ratio, and
//! re-encodes it as PNG for storage; the detail screen derives a terminal
//! preview from the stored bytes when it opens.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};

/// Profile photos are locked to 16:9. The crop is centered and the caller
/// only ever receives the final cropped image.
const CROP_RATIO: (u32, u32) = (16, 9);

/// Brightness ramp for the terminal preview, darkest first.
const PREVIEW_SHADES: &[u8] = b" .:-=+*#%@";

/// Read an image file in any format the `image` crate decodes, center-crop
/// it to the locked ratio, and return PNG bytes ready for the store.
pub fn load_cropped(path: &Path) -> Result<Vec<u8>> {
    let img = image::open(path)
        .with_context(|| format!("failed to read photo {}", path.display()))?;
    encode_png(&crop_to_ratio(&img))
}

/// Trim the longer axis so the result matches [`CROP_RATIO`] exactly, keeping
/// the center of the original.
fn crop_to_ratio(img: &DynamicImage) -> DynamicImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return img.clone();
    }

    let (rw, rh) = CROP_RATIO;
    let wide = u64::from(w) * u64::from(rh);
    let tall = u64::from(h) * u64::from(rw);

    if wide > tall {
        let new_w = ((tall / u64::from(rh)) as u32).max(1);
        img.crop_imm((w - new_w) / 2, 0, new_w, h)
    } else if wide < tall {
        let new_h = ((wide / u64::from(rw)) as u32).max(1);
        img.crop_imm(0, (h - new_h) / 2, w, new_h)
    } else {
        img.clone()
    }
}

fn encode_png(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .context("failed to encode photo as PNG")?;
    Ok(bytes)
}

/// Derive ASCII shading rows from stored photo bytes for rendering inside a
/// Ratatui paragraph. The row count halves the pixel aspect because terminal
/// cells are roughly twice as tall as they are wide.
pub fn preview_rows(bytes: &[u8], width: u32) -> Result<Vec<String>> {
    if width == 0 {
        return Ok(Vec::new());
    }

    let img = image::load_from_memory(bytes)
        .context("stored photo bytes are not a decodable image")?;
    let (w, h) = img.dimensions();
    let rows = ((u64::from(h) * u64::from(width)) / (u64::from(w) * 2)).max(1) as u32;

    let gray = img
        .resize_exact(width, rows, FilterType::Triangle)
        .to_luma8();

    let mut lines = Vec::with_capacity(rows as usize);
    for y in 0..rows {
        let mut line = String::with_capacity(width as usize);
        for x in 0..width {
            let luma = gray.get_pixel(x, y).0[0] as usize;
            let idx = luma * (PREVIEW_SHADES.len() - 1) / 255;
            line.push(PREVIEW_SHADES[idx] as char);
        }
        lines.push(line);
    }

    Ok(lines)
}
