use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{PaletteError, Result};
use crate::palette::Palette;

use super::Exporter;

/// Pretty-printed JSON with RGB and HSL strings per swatch.
pub struct JsonExporter;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteDocument {
    pub palette: Vec<ExportedColor>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ExportedColor {
    pub id: usize,
    pub hex: String,
    pub name: String,
    pub rgb: String,
    pub hsl: String,
}

impl PaletteDocument {
    pub fn new(palette: &Palette, generated_at: DateTime<Utc>) -> Self {
        let palette = palette
            .swatches()
            .iter()
            .enumerate()
            .map(|(i, s)| ExportedColor {
                id: i + 1,
                hex: s.hex(),
                name: s.name().to_string(),
                rgb: s.color().rgb_string(),
                hsl: s.color().to_hsl().to_string(),
            })
            .collect();
        Self {
            palette,
            generated_at,
        }
    }
}

impl Exporter for JsonExporter {
    fn name(&self) -> &str {
        "JSON"
    }

    fn extension(&self) -> &str {
        "json"
    }

    fn render(&self, palette: &Palette) -> Result<Vec<u8>> {
        let doc = PaletteDocument::new(palette, Utc::now());
        serde_json::to_vec_pretty(&doc).map_err(|e| PaletteError::export(self.name(), e))
    }
}
