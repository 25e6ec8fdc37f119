//! Color synthesis and scoring.

pub mod contrast;
pub mod harmony;
