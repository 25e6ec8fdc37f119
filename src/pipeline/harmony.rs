//! Color harmony algorithms
//!
//! Synthesizes five related hues from a random base hue. The angular
//! relationships of each mode are exact; saturation and lightness are
//! sampled per color.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::Color;
use crate::palette::PALETTE_SIZE;

/// Saturation range (percent) sampled for every generated color.
pub const SATURATION_RANGE: std::ops::RangeInclusive<f32> = 65.0..=90.0;
/// Lightness range (percent) sampled for every generated color.
pub const LIGHTNESS_RANGE: std::ops::RangeInclusive<f32> = 45.0..=70.0;

/// Rule for choosing related hues.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonyMode {
    /// Pick one of the concrete modes at random on every generation
    #[default]
    Random,
    /// Neighbors within 60 degrees of the base
    Analogous,
    /// Base pair plus a triple around the opposite hue
    Complementary,
    /// Points 120 degrees apart
    Triadic,
    /// Base pair plus the two neighbors of the complement and their midpoint
    SplitComplementary,
    /// Four points 90 degrees apart plus an accent at 45
    Tetradic,
}

impl HarmonyMode {
    /// Every mode, in selector order.
    pub const ALL: [HarmonyMode; 6] = [
        Self::Random,
        Self::Analogous,
        Self::Complementary,
        Self::Triadic,
        Self::SplitComplementary,
        Self::Tetradic,
    ];

    /// Modes with a fixed angular rule.
    pub const CONCRETE: [HarmonyMode; 5] = [
        Self::Analogous,
        Self::Complementary,
        Self::Triadic,
        Self::SplitComplementary,
        Self::Tetradic,
    ];

    /// Resolve `Random` to one of the concrete modes; other modes map to themselves.
    pub fn resolve<R: Rng>(self, rng: &mut R) -> HarmonyMode {
        match self {
            Self::Random => Self::CONCRETE[rng.random_range(0..Self::CONCRETE.len())],
            mode => mode,
        }
    }

    /// The mode after this one, wrapping. Used by the selector.
    pub fn next(self) -> HarmonyMode {
        let pos = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Analogous => "analogous",
            Self::Complementary => "complementary",
            Self::Triadic => "triadic",
            Self::SplitComplementary => "split-complementary",
            Self::Tetradic => "tetradic",
        }
    }
}

impl std::fmt::Display for HarmonyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

fn wrap(hue: f32) -> f32 {
    hue.rem_euclid(360.0)
}

/// The five hues for a concrete mode around `base_hue`.
///
/// `Random` has no rule of its own and falls back to analogous; callers
/// should [`HarmonyMode::resolve`] first.
pub fn harmony_hues(mode: HarmonyMode, base_hue: f32) -> [f32; PALETTE_SIZE] {
    let b = wrap(base_hue);
    match mode {
        HarmonyMode::Analogous | HarmonyMode::Random => {
            [b, wrap(b + 30.0), wrap(b + 60.0), wrap(b - 30.0), wrap(b - 60.0)]
        }
        HarmonyMode::Complementary => {
            let c = wrap(b + 180.0);
            [b, wrap(b + 15.0), c, wrap(c + 15.0), wrap(c + 30.0)]
        }
        HarmonyMode::Triadic => {
            let second = wrap(b + 120.0);
            let third = wrap(b + 240.0);
            [b, wrap(b + 15.0), second, wrap(second + 15.0), third]
        }
        HarmonyMode::SplitComplementary => {
            let c = wrap(b + 180.0);
            let split1 = wrap(c - 30.0);
            let split2 = wrap(c + 30.0);
            [b, wrap(b + 15.0), split1, split2, wrap((split1 + split2) / 2.0)]
        }
        HarmonyMode::Tetradic => [
            b,
            wrap(b + 90.0),
            wrap(b + 180.0),
            wrap(b + 270.0),
            wrap(b + 45.0),
        ],
    }
}

/// Produces palettes of perceptually related colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct HarmonyGenerator;

impl HarmonyGenerator {
    /// Generate five colors for `mode` from a uniformly random integer base hue.
    pub fn generate<R: Rng>(mode: HarmonyMode, rng: &mut R) -> [Color; PALETTE_SIZE] {
        let concrete = mode.resolve(rng);
        let base_hue = rng.random_range(0..360u16) as f32;
        debug!(%mode, %concrete, base_hue, "generating harmony");
        Self::generate_from_base(concrete, base_hue, rng)
    }

    /// Generate five colors around a fixed base hue. Saturation and lightness
    /// are still drawn from `rng`.
    pub fn generate_from_base<R: Rng>(
        mode: HarmonyMode,
        base_hue: f32,
        rng: &mut R,
    ) -> [Color; PALETTE_SIZE] {
        harmony_hues(mode, base_hue).map(|hue| {
            let s = rng.random_range(SATURATION_RANGE);
            let l = rng.random_range(LIGHTNESS_RANGE);
            Color::from_hsl(hue, s, l)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hue_distance;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sorted(mut hues: [f32; 5]) -> [f32; 5] {
        hues.sort_by(|a, b| a.partial_cmp(b).unwrap());
        hues
    }

    #[test]
    fn complementary_from_zero() {
        assert_eq!(
            sorted(harmony_hues(HarmonyMode::Complementary, 0.0)),
            [0.0, 15.0, 180.0, 195.0, 210.0]
        );
    }

    #[test]
    fn analogous_wraps_below_zero() {
        assert_eq!(
            harmony_hues(HarmonyMode::Analogous, 10.0),
            [10.0, 40.0, 70.0, 340.0, 310.0]
        );
    }

    #[test]
    fn triadic_offsets() {
        assert_eq!(
            harmony_hues(HarmonyMode::Triadic, 300.0),
            [300.0, 315.0, 60.0, 75.0, 180.0]
        );
    }

    #[test]
    fn split_complementary_offsets() {
        assert_eq!(
            harmony_hues(HarmonyMode::SplitComplementary, 0.0),
            [0.0, 15.0, 150.0, 210.0, 180.0]
        );
    }

    #[test]
    fn split_complementary_midpoint_is_arithmetic_mean() {
        // Complement 350 splits into 320 and 20; the mean of the wrapped
        // angles lands back on the base hue.
        assert_eq!(
            harmony_hues(HarmonyMode::SplitComplementary, 170.0),
            [170.0, 185.0, 320.0, 20.0, 170.0]
        );
    }

    #[test]
    fn tetradic_offsets() {
        assert_eq!(
            harmony_hues(HarmonyMode::Tetradic, 100.0),
            [100.0, 190.0, 280.0, 10.0, 145.0]
        );
    }

    #[test]
    fn resolve_never_returns_random() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert_ne!(HarmonyMode::Random.resolve(&mut rng), HarmonyMode::Random);
        }
        assert_eq!(
            HarmonyMode::Triadic.resolve(&mut rng),
            HarmonyMode::Triadic
        );
    }

    #[test]
    fn resolve_reaches_every_concrete_mode() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(HarmonyMode::Random.resolve(&mut rng));
        }
        assert_eq!(seen.len(), HarmonyMode::CONCRETE.len());
    }

    #[test]
    fn generated_colors_stay_in_sampling_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for mode in HarmonyMode::ALL {
            for _ in 0..50 {
                for color in HarmonyGenerator::generate(mode, &mut rng) {
                    let hsl = color.to_hsl();
                    assert!(
                        (64.0..=91.0).contains(&hsl.s),
                        "{mode}: saturation {} out of range for {color}",
                        hsl.s
                    );
                    assert!(
                        (44.0..=71.0).contains(&hsl.l),
                        "{mode}: lightness {} out of range for {color}",
                        hsl.l
                    );
                }
            }
        }
    }

    #[test]
    fn generated_hues_follow_the_rule() {
        let mut rng = StdRng::seed_from_u64(3);
        let colors = HarmonyGenerator::generate_from_base(HarmonyMode::Complementary, 0.0, &mut rng);
        let expected = harmony_hues(HarmonyMode::Complementary, 0.0);
        for (color, hue) in colors.iter().zip(expected) {
            let got = color.to_hsl().h;
            assert!(
                hue_distance(got, hue) <= 1.0,
                "expected hue {hue}, got {got} for {color}"
            );
        }
    }

    #[test]
    fn same_seed_same_palette() {
        let a = HarmonyGenerator::generate(HarmonyMode::Random, &mut StdRng::seed_from_u64(99));
        let b = HarmonyGenerator::generate(HarmonyMode::Random, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn next_cycles_through_all_modes() {
        let mut mode = HarmonyMode::Random;
        for _ in 0..HarmonyMode::ALL.len() {
            mode = mode.next();
        }
        assert_eq!(mode, HarmonyMode::Random);
        assert_eq!(HarmonyMode::Random.next(), HarmonyMode::Analogous);
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&HarmonyMode::SplitComplementary).unwrap();
        assert_eq!(json, "\"split-complementary\"");
        let mode: HarmonyMode = serde_json::from_str("\"tetradic\"").unwrap();
        assert_eq!(mode, HarmonyMode::Tetradic);
    }
}
