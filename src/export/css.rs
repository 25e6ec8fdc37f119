use crate::error::Result;
use crate::palette::Palette;

use super::Exporter;

/// CSS custom properties on `:root`, one `--color-N` per swatch.
pub struct CssExporter;

impl CssExporter {
    pub fn stylesheet(palette: &Palette) -> String {
        let vars: Vec<String> = palette
            .swatches()
            .iter()
            .enumerate()
            .map(|(i, s)| format!("  --color-{}: {}; /* {} */", i + 1, s.hex(), s.name()))
            .collect();
        format!(":root {{\n{}\n}}", vars.join("\n"))
    }
}

impl Exporter for CssExporter {
    fn name(&self) -> &str {
        "CSS"
    }

    fn extension(&self) -> &str {
        "css"
    }

    fn render(&self, palette: &Palette) -> Result<Vec<u8>> {
        Ok(Self::stylesheet(palette).into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use pretty_assertions::assert_eq;

    #[test]
    fn stylesheet_lists_every_swatch() {
        let palette = Palette::from_colors([
            Color::new(255, 0, 0),
            Color::new(0, 255, 0),
            Color::new(0, 0, 255),
            Color::BLACK,
            Color::WHITE,
        ]);
        let expected = ":root {\n  --color-1: #FF0000; /* Red */\n  --color-2: #00FF00; /* Lime */\n  --color-3: #0000FF; /* Blue */\n  --color-4: #000000; /* Black */\n  --color-5: #FFFFFF; /* White */\n}";
        assert_eq!(CssExporter::stylesheet(&palette), expected);
        assert_eq!(CssExporter.render(&palette).unwrap(), expected.as_bytes());
        assert_eq!(CssExporter.default_filename(), "palette.css");
    }
}
