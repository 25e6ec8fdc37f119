//! Palette export formats.

pub mod css;
pub mod json;
pub mod png;

use crate::error::Result;
use crate::palette::Palette;

pub use css::CssExporter;
pub use json::JsonExporter;
pub use png::PngExporter;

/// A serializer that turns a palette into a downloadable file.
pub trait Exporter {
    /// Human-readable format name, used in notifications.
    fn name(&self) -> &str;

    /// File extension without the dot.
    fn extension(&self) -> &str;

    /// Render the palette to the file contents.
    fn render(&self, palette: &Palette) -> Result<Vec<u8>>;

    /// Suggested file name for the export.
    fn default_filename(&self) -> String {
        format!("palette.{}", self.extension())
    }
}

/// Export formats selectable from the CLI and TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Css,
    Json,
    Png,
}

impl ExportFormat {
    pub fn exporter(self) -> Box<dyn Exporter> {
        match self {
            ExportFormat::Css => Box::new(CssExporter),
            ExportFormat::Json => Box::new(JsonExporter),
            ExportFormat::Png => Box::new(PngExporter::default()),
        }
    }
}
