//! Artwork decoding for the card's image region.

use image::imageops::FilterType;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Artwork PNGs are downscaled to a small thumbnail at decode time; the
/// card panel samples the thumbnail to whatever cell grid it has.
const THUMB_MAX: u32 = 64;

/// Decoded artwork, RGBA row-major.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteData, String> {
    let img = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let rgba = img.to_rgba8();
    let (w, h) = (rgba.width().max(1), rgba.height().max(1));
    let scale = (THUMB_MAX as f32 / w as f32).min(THUMB_MAX as f32 / h as f32);
    let rgba = if scale < 1.0 {
        let tw = ((w as f32 * scale).round() as u32).max(1);
        let th = ((h as f32 * scale).round() as u32).max(1);
        image::imageops::resize(&rgba, tw, th, FilterType::Lanczos3)
    } else {
        rgba
    };
    Ok(SpriteData {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

impl SpriteData {
    /// Nearest-neighbor sample onto a `cols` x `rows` cell grid. Pixels
    /// below the alpha cutoff come back as `None` so the panel background
    /// shows through, like the transparent artwork PNGs on the page.
    pub fn cell_rows(&self, cols: u16, rows: u16) -> Vec<Vec<Option<(u8, u8, u8)>>> {
        let mut grid = Vec::with_capacity(rows as usize);
        if self.width == 0 || self.height == 0 || cols == 0 || rows == 0 {
            return grid;
        }
        for row in 0..rows {
            let mut cells = Vec::with_capacity(cols as usize);
            let y = (row as u32 * self.height) / rows as u32;
            for col in 0..cols {
                let x = (col as u32 * self.width) / cols as u32;
                let idx = ((y * self.width + x) * 4) as usize;
                match self.pixels.get(idx..idx + 4) {
                    Some([r, g, b, a]) if *a >= 128 => cells.push(Some((*r, *g, *b))),
                    _ => cells.push(None),
                }
            }
            grid.push(cells);
        }
        grid
    }
}
