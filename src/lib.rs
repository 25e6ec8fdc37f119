//! chromaset - generate, lock, reorder and export five-color palettes.
//!
//! The engine is made of pure color math ([`color`], [`pipeline`]) and a
//! single state object, [`PaletteStore`], through which every palette change
//! flows. The CLI and TUI in the binary are thin views over that store.

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod naming;
pub mod notify;
pub mod palette;
pub mod pipeline;
pub mod share;
pub mod state;
pub mod tui;

pub use color::{Color, Hsl};
pub use error::{PaletteError, Result};
pub use history::{HistoryStore, SavedPalette, MAX_HISTORY};
pub use palette::{Palette, Swatch, PALETTE_SIZE};
pub use pipeline::contrast::{check_contrast, contrast_ratio, ContrastResult};
pub use pipeline::harmony::{HarmonyGenerator, HarmonyMode};
pub use state::PaletteStore;
