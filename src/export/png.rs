use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

use crate::error::{PaletteError, Result};
use crate::palette::{Palette, PALETTE_SIZE};

use super::Exporter;

/// Rasterizes the palette as side-by-side color bands on a white card.
#[derive(Debug, Clone, Copy)]
pub struct PngExporter {
    /// Logical width of one band.
    pub band_width: u32,
    /// Logical height of the bands.
    pub band_height: u32,
    /// Logical margin around the bands.
    pub padding: u32,
    /// Logical space between adjacent bands.
    pub gap: u32,
    /// Device pixels per logical pixel.
    pub pixel_ratio: u32,
}

impl Default for PngExporter {
    fn default() -> Self {
        Self {
            band_width: 180,
            band_height: 360,
            padding: 20,
            gap: 10,
            pixel_ratio: 2,
        }
    }
}

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

impl PngExporter {
    /// Output size in device pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        let bands = PALETTE_SIZE as u32;
        let width = 2 * self.padding + bands * self.band_width + (bands - 1) * self.gap;
        let height = 2 * self.padding + self.band_height;
        (width * self.pixel_ratio, height * self.pixel_ratio)
    }

    /// Draw the palette into an image buffer.
    pub fn rasterize(&self, palette: &Palette) -> Result<RgbImage> {
        if self.pixel_ratio == 0 || self.band_width == 0 || self.band_height == 0 {
            return Err(PaletteError::export(self.name(), "empty image dimensions"));
        }
        let (width, height) = self.dimensions();
        let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

        let scale = self.pixel_ratio;
        let top = self.padding * scale;
        let bottom = top + self.band_height * scale;
        for (i, color) in palette.colors().iter().enumerate() {
            let left = (self.padding + i as u32 * (self.band_width + self.gap)) * scale;
            let right = left + self.band_width * scale;
            let fill = Rgb([color.r, color.g, color.b]);
            for y in top..bottom {
                for x in left..right {
                    img.put_pixel(x, y, fill);
                }
            }
        }
        Ok(img)
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &str {
        "PNG"
    }

    fn extension(&self) -> &str {
        "png"
    }

    fn render(&self, palette: &Palette) -> Result<Vec<u8>> {
        let img = self.rasterize(palette)?;
        let mut cursor = Cursor::new(Vec::new());
        img.write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| PaletteError::export(self.name(), e))?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn rgb() -> Palette {
        Palette::from_colors([
            Color::new(255, 0, 0),
            Color::new(0, 255, 0),
            Color::new(0, 0, 255),
            Color::BLACK,
            Color::new(10, 20, 30),
        ])
    }

    #[test]
    fn default_dimensions_include_pixel_ratio() {
        assert_eq!(PngExporter::default().dimensions(), (1960, 800));
    }

    #[test]
    fn bands_are_filled_in_order() {
        let exporter = PngExporter::default();
        let img = exporter.rasterize(&rgb()).unwrap();
        let y = 400;
        for (i, color) in rgb().colors().iter().enumerate() {
            let x = (20 + i as u32 * 190 + 90) * 2;
            assert_eq!(*img.get_pixel(x, y), Rgb([color.r, color.g, color.b]), "band {i}");
        }
        assert_eq!(*img.get_pixel(5, 5), BACKGROUND);
        // Gap between the first two bands.
        assert_eq!(*img.get_pixel((20 + 185) * 2, y), BACKGROUND);
    }

    #[test]
    fn render_produces_decodable_png() {
        let bytes = PngExporter::default().render(&rgb()).unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1960, 800));
    }

    #[test]
    fn zero_ratio_is_an_export_failure() {
        let exporter = PngExporter {
            pixel_ratio: 0,
            ..PngExporter::default()
        };
        assert!(matches!(
            exporter.render(&rgb()),
            Err(PaletteError::ExportFailure { .. })
        ));
    }
}
