use crate::models::PhotoGrid;
use crate::utils::TabienError;
use image::{imageops, DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use std::io::Cursor;

const CELL_WIDTH: u32 = 600;
const CELL_HEIGHT: u32 = 800;
const GRID_CELLS: usize = 4;
const GRID_WIDTH_MM: u32 = 120;
const JPEG_QUALITY: u8 = 90;

/// Top-left corner of each cell in a 2x2 grid.
const CELL_POSITIONS: [(u32, u32); GRID_CELLS] = [
    (0, 0),
    (CELL_WIDTH, 0),
    (0, CELL_HEIGHT),
    (CELL_WIDTH, CELL_HEIGHT),
];

pub struct PhotoGridBuilder;

impl PhotoGridBuilder {
    /// Compose uploaded photos into a 2x2 JPEG collage.
    ///
    /// Empty or undecodable uploads are skipped. Returns `None` when no
    /// photo is usable; fewer than four photos are padded by repeating the
    /// last one.
    pub fn build(photos: &[Vec<u8>]) -> Result<Option<PhotoGrid>, TabienError> {
        let mut images: Vec<DynamicImage> = photos
            .iter()
            .enumerate()
            .filter(|(_, bytes)| !bytes.is_empty())
            .filter_map(|(index, bytes)| match image::load_from_memory(bytes) {
                Ok(img) => Some(img),
                Err(e) => {
                    log::warn!("Skipping photo {}: {}", index + 1, e);
                    None
                }
            })
            .collect();

        let last = match images.last() {
            Some(last) => last.clone(),
            None => return Ok(None),
        };
        while images.len() < GRID_CELLS {
            images.push(last.clone());
        }

        let mut grid = RgbImage::from_pixel(
            CELL_WIDTH * 2,
            CELL_HEIGHT * 2,
            Rgb([255, 255, 255]),
        );
        for (img, (x, y)) in images.iter().take(GRID_CELLS).zip(CELL_POSITIONS) {
            let cell = Self::fit_to_cell(img);
            imageops::overlay(&mut grid, &cell, x as i64, y as i64);
        }

        let (width_px, height_px) = grid.dimensions();
        let mut jpeg = Vec::new();
        DynamicImage::ImageRgb8(grid)
            .write_to(&mut Cursor::new(&mut jpeg), ImageOutputFormat::Jpeg(JPEG_QUALITY))
            .map_err(|e| {
                TabienError::ImageProcessingError(format!("Failed to encode photo grid: {}", e))
            })?;

        Ok(Some(PhotoGrid {
            jpeg,
            width_px,
            height_px,
            width_mm: GRID_WIDTH_MM,
        }))
    }

    /// Shrink to fit one cell, keeping aspect ratio. Small photos are not enlarged.
    fn fit_to_cell(img: &DynamicImage) -> RgbImage {
        if img.width() <= CELL_WIDTH && img.height() <= CELL_HEIGHT {
            return img.to_rgb8();
        }
        img.thumbnail(CELL_WIDTH, CELL_HEIGHT).to_rgb8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb(color));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        bytes
    }

    fn is_reddish(pixel: &Rgb<u8>) -> bool {
        pixel[0] > 200 && pixel[1] < 60 && pixel[2] < 60
    }

    fn is_whitish(pixel: &Rgb<u8>) -> bool {
        pixel[0] > 230 && pixel[1] > 230 && pixel[2] > 230
    }

    #[test]
    fn test_no_usable_photos() {
        assert!(PhotoGridBuilder::build(&[]).unwrap().is_none());
        assert!(PhotoGridBuilder::build(&[Vec::new(), b"junk".to_vec()])
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_single_photo_fills_every_cell() {
        let grid = PhotoGridBuilder::build(&[png(100, 50, [255, 0, 0])])
            .unwrap()
            .unwrap();
        assert_eq!((grid.width_px, grid.height_px), (1200, 1600));
        assert_eq!(grid.width_mm, 120);

        let decoded = image::load_from_memory(&grid.jpeg).unwrap().to_rgb8();
        for (x, y) in CELL_POSITIONS {
            assert!(is_reddish(decoded.get_pixel(x + 10, y + 10)));
            // Small photos keep their size; the rest of the cell stays white.
            assert!(is_whitish(decoded.get_pixel(x + 300, y + 400)));
        }
    }

    #[test]
    fn test_large_photo_is_shrunk_to_cell() {
        let grid = PhotoGridBuilder::build(&[png(1200, 800, [255, 0, 0])])
            .unwrap()
            .unwrap();
        let decoded = image::load_from_memory(&grid.jpeg).unwrap().to_rgb8();

        // 1200x800 fits the cell as 600x400.
        assert!(is_reddish(decoded.get_pixel(590, 390)));
        assert!(is_whitish(decoded.get_pixel(300, 600)));
    }

    #[test]
    fn test_height_mm_keeps_aspect() {
        let grid = PhotoGridBuilder::build(&[png(10, 10, [0, 0, 0])])
            .unwrap()
            .unwrap();
        assert!((grid.height_mm() - 160.0).abs() < f64::EPSILON);
    }
}
