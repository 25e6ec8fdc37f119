use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Minimum ratio for large text at AA.
pub const AA_LARGE: f64 = 3.0;
/// Minimum ratio for normal text at AA.
pub const AA_NORMAL: f64 = 4.5;
/// Minimum ratio for large text at AAA.
pub const AAA_LARGE: f64 = 4.5;
/// Minimum ratio for normal text at AAA.
pub const AAA_NORMAL: f64 = 7.0;

/// WCAG verdict for one foreground/background pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastResult {
    /// Contrast ratio rounded to two decimals.
    pub ratio: f64,
    pub aa_large: bool,
    pub aa_normal: bool,
    pub aaa_large: bool,
    pub aaa_normal: bool,
}

/// Contrast between palette entries `first` and `second` (`first < second`).
#[derive(Debug, Clone, PartialEq)]
pub struct PairContrast {
    pub first: usize,
    pub second: usize,
    pub first_color: Color,
    pub second_color: Color,
    pub result: ContrastResult,
}

/// WCAG 2.0 relative luminance.
///
/// Linearizes each sRGB channel, then computes the weighted sum.
pub fn relative_luminance(color: &Color) -> f64 {
    fn linearize(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    let r = linearize(color.r);
    let g = linearize(color.g);
    let b = linearize(color.b);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// WCAG 2.0 contrast ratio between two colors.
///
/// Returns a value in [1, 21]. Symmetric in its arguments.
pub fn contrast_ratio(c1: &Color, c2: &Color) -> f64 {
    let l1 = relative_luminance(c1);
    let l2 = relative_luminance(c2);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Bucket the contrast between `fg` and `bg` into the WCAG levels.
///
/// AA normal and AAA large share the 4.5 threshold.
pub fn check_contrast(fg: &Color, bg: &Color) -> ContrastResult {
    let ratio = contrast_ratio(fg, bg);
    ContrastResult {
        ratio: (ratio * 100.0).round() / 100.0,
        aa_large: ratio >= AA_LARGE,
        aa_normal: ratio >= AA_NORMAL,
        aaa_large: ratio >= AAA_LARGE,
        aaa_normal: ratio >= AAA_NORMAL,
    }
}

/// Score every unordered pair `i < j`, in lexicographic `(i, j)` order.
pub fn all_pairwise_contrasts(colors: &[Color]) -> Vec<PairContrast> {
    let n = colors.len();
    let mut results = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            results.push(PairContrast {
                first: i,
                second: j,
                first_color: colors[i],
                second_color: colors[j],
                result: check_contrast(&colors[i], &colors[j]),
            });
        }
    }
    results
}
