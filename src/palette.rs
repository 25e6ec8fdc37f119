use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{PaletteError, Result};
use crate::naming::color_name;
use crate::pipeline::contrast::{all_pairwise_contrasts, PairContrast};

/// Number of slots in every palette.
pub const PALETTE_SIZE: usize = 5;

/// One palette slot: a color, its display name and its lock flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SwatchRecord", into = "SwatchRecord")]
pub struct Swatch {
    color: Color,
    name: String,
    locked: bool,
}

/// Serialized form of a swatch: `{"hex","name","locked"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SwatchRecord {
    hex: String,
    name: String,
    #[serde(default)]
    locked: bool,
}

impl TryFrom<SwatchRecord> for Swatch {
    type Error = PaletteError;

    fn try_from(record: SwatchRecord) -> Result<Self> {
        Ok(Swatch {
            color: Color::from_hex(&record.hex)?,
            name: record.name,
            locked: record.locked,
        })
    }
}

impl From<Swatch> for SwatchRecord {
    fn from(swatch: Swatch) -> Self {
        SwatchRecord {
            hex: swatch.color.to_hex(),
            name: swatch.name,
            locked: swatch.locked,
        }
    }
}

impl Swatch {
    /// Unlocked swatch named after its color.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            name: color_name(&color).to_string(),
            locked: false,
        }
    }

    /// Parse `hex` into an unlocked swatch.
    pub fn from_hex(hex: &str) -> Result<Self> {
        Ok(Self::new(Color::from_hex(hex)?))
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Canonical uppercase `#RRGGBB`.
    pub fn hex(&self) -> String {
        self.color.to_hex()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Same slot with a new color; the lock flag is kept and the name recomputed.
    pub(crate) fn recolored(&self, color: Color) -> Self {
        Self {
            locked: self.locked,
            ..Self::new(color)
        }
    }

    pub(crate) fn toggle_lock(&mut self) {
        self.locked = !self.locked;
    }

    /// Same swatch with the lock flag set to `locked`.
    pub fn with_lock(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }
}

/// Exactly five swatches in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    swatches: [Swatch; PALETTE_SIZE],
}

impl Palette {
    pub fn new(swatches: [Swatch; PALETTE_SIZE]) -> Self {
        Self { swatches }
    }

    /// Unlocked palette from five colors.
    pub fn from_colors(colors: [Color; PALETTE_SIZE]) -> Self {
        Self::new(colors.map(Swatch::new))
    }

    pub fn swatches(&self) -> &[Swatch; PALETTE_SIZE] {
        &self.swatches
    }

    pub fn get(&self, index: usize) -> Result<&Swatch> {
        check_index(index)?;
        Ok(&self.swatches[index])
    }

    pub fn colors(&self) -> [Color; PALETTE_SIZE] {
        self.swatches.each_ref().map(Swatch::color)
    }

    pub fn hexes(&self) -> [String; PALETTE_SIZE] {
        self.swatches.each_ref().map(Swatch::hex)
    }

    /// Lock the given slots, leaving the others as they are.
    pub fn lock_slots(mut self, indices: &[usize]) -> Result<Self> {
        for &index in indices {
            check_index(index)?;
        }
        for &index in indices {
            self.swatches[index].locked = true;
        }
        Ok(self)
    }

    pub fn locked_count(&self) -> usize {
        self.swatches.iter().filter(|s| s.is_locked()).count()
    }

    /// Contrast of every unordered pair of swatches.
    pub fn contrast_report(&self) -> Vec<PairContrast> {
        all_pairwise_contrasts(&self.colors())
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Result<&mut Swatch> {
        check_index(index)?;
        Ok(&mut self.swatches[index])
    }

    /// Move the swatch at `old` to `new`, shifting the slots in between.
    pub(crate) fn move_swatch(&mut self, old: usize, new: usize) -> Result<()> {
        check_index(old)?;
        check_index(new)?;
        if old < new {
            self.swatches[old..=new].rotate_left(1);
        } else if old > new {
            self.swatches[new..=old].rotate_right(1);
        }
        Ok(())
    }
}

fn check_index(index: usize) -> Result<()> {
    if index < PALETTE_SIZE {
        Ok(())
    } else {
        Err(PaletteError::IndexOutOfRange {
            index,
            len: PALETTE_SIZE,
        })
    }
}
