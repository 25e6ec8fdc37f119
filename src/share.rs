//! Shareable palette links.
//!
//! A palette is carried in a `colors` query parameter as five hex codes
//! joined by `-`, e.g. `FF0000-00FF00-0000FF-FFFF00-FF00FF`.

use crate::palette::{Palette, Swatch, PALETTE_SIZE};

/// Query parameter that carries the palette.
pub const QUERY_KEY: &str = "colors";

/// The `-`-joined hex code for `palette`, without `#`.
pub fn encode_colors(palette: &Palette) -> String {
    palette
        .swatches()
        .iter()
        .map(|s| s.hex().trim_start_matches('#').to_string())
        .collect::<Vec<_>>()
        .join("-")
}

/// Full share link: `{base}?colors={code}`.
pub fn share_url(base: &str, palette: &Palette) -> String {
    let base = base.split(['?', '#']).next().unwrap_or(base);
    format!("{base}?{QUERY_KEY}={}", encode_colors(palette))
}

/// Decode a `colors` parameter value. Anything other than exactly five
/// six-digit hex segments yields `None`.
pub fn decode_colors(param: &str) -> Option<[Swatch; PALETTE_SIZE]> {
    let segments: Vec<&str> = param.trim().split('-').collect();
    if segments.len() != PALETTE_SIZE || !segments.iter().all(|s| is_hex6(s)) {
        return None;
    }
    let swatches: Vec<Swatch> = segments
        .iter()
        .map(|s| Swatch::from_hex(s))
        .collect::<crate::error::Result<_>>()
        .ok()?;
    swatches.try_into().ok()
}

/// Find the `colors` parameter in a URL or bare query string and decode it.
/// A bare code without any `?` or `=` is accepted as well.
pub fn decode_url(url: &str) -> Option<[Swatch; PALETTE_SIZE]> {
    let url = url.trim();
    let query = match url.split_once('?') {
        Some((_, query)) => query,
        None if url.contains('=') => url,
        None => return decode_colors(url),
    };
    let query = query.split('#').next().unwrap_or(query);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == QUERY_KEY)
        .and_then(|(_, value)| decode_colors(value))
}

fn is_hex6(segment: &str) -> bool {
    segment.len() == 6 && segment.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CODE: &str = "FF0000-00FF00-0000FF-FFFF00-FF00FF";

    fn hexes(swatches: &[Swatch; PALETTE_SIZE]) -> Vec<String> {
        swatches.iter().map(Swatch::hex).collect()
    }

    #[test]
    fn decode_example_url() {
        let swatches = decode_url(&format!("https://example.com/?colors={CODE}")).unwrap();
        assert_eq!(
            hexes(&swatches),
            vec!["#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF"]
        );
        assert!(swatches.iter().all(|s| !s.is_locked()));
        assert_eq!(swatches[0].name(), "Red");
    }

    #[test]
    fn decode_lowercase_canonicalizes() {
        let swatches = decode_colors("ff0000-00ff00-0000ff-ffff00-ff00ff").unwrap();
        assert_eq!(swatches[4].hex(), "#FF00FF");
    }

    #[test]
    fn wrong_segment_count_is_absent() {
        assert!(decode_colors("FF0000-00FF00-0000FF-FFFF00").is_none());
        assert!(decode_colors(&format!("{CODE}-000000")).is_none());
        assert!(decode_colors("").is_none());
    }

    #[test]
    fn non_hex_segment_is_absent() {
        assert!(decode_colors("FF0000-00FF00-0000FF-FFFF00-GG00FF").is_none());
        assert!(decode_colors("#F0000-00FF00-0000FF-FFFF00-FF00FF").is_none());
        assert!(decode_colors("FF000-00FF00-0000FF-FFFF00-FF00FF0").is_none());
    }

    #[test]
    fn missing_parameter_is_absent() {
        assert!(decode_url("https://example.com/").is_none());
        assert!(decode_url("https://example.com/?palette=abc").is_none());
    }

    #[test]
    fn parameter_among_others() {
        let swatches = decode_url(&format!("?ref=x&colors={CODE}&y=1#top")).unwrap();
        assert_eq!(swatches[1].hex(), "#00FF00");
        assert!(decode_url(CODE).is_some());
    }

    #[test]
    fn encode_then_link() {
        let palette = Palette::new(decode_colors(CODE).unwrap());
        assert_eq!(encode_colors(&palette), CODE);
        assert_eq!(
            share_url("https://example.com/app?old=1", &palette),
            format!("https://example.com/app?colors={CODE}")
        );
    }
}
