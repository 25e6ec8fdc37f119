//! The palette state machine.
//!
//! [`PaletteStore`] owns the live palette and funnels every mutation through
//! a small set of operations. Generation and lock changes are recorded in the
//! history log; history failures never disturb the palette itself.

use std::time::Instant;

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::color::Color;
use crate::error::{PaletteError, Result};
use crate::export::Exporter;
use crate::history::{HistoryStore, SavedPalette};
use crate::notify::{NotificationKind, Notifications};
use crate::palette::{Palette, Swatch, PALETTE_SIZE};
use crate::pipeline::harmony::{HarmonyGenerator, HarmonyMode};
use crate::share;

/// Owned palette state plus its collaborators.
pub struct PaletteStore<R = ThreadRng> {
    palette: Palette,
    harmony: HarmonyMode,
    active_index: Option<usize>,
    history: HistoryStore,
    notifications: Notifications,
    rng: R,
}

impl PaletteStore<ThreadRng> {
    pub fn new(history: HistoryStore) -> Self {
        Self::with_rng(history, rand::rng())
    }
}

impl<R: Rng> PaletteStore<R> {
    /// Start with a freshly generated, fully unlocked palette. The initial
    /// palette is not recorded in history.
    pub fn with_rng(history: HistoryStore, mut rng: R) -> Self {
        let palette =
            Palette::from_colors(HarmonyGenerator::generate(HarmonyMode::Random, &mut rng));
        Self {
            palette,
            harmony: HarmonyMode::default(),
            active_index: None,
            history,
            notifications: Notifications::default(),
            rng,
        }
    }

    /// Start from an existing palette, keeping its lock flags.
    pub fn from_palette(palette: Palette, history: HistoryStore, rng: R) -> Self {
        Self {
            palette,
            harmony: HarmonyMode::default(),
            active_index: None,
            history,
            notifications: Notifications::default(),
            rng,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn harmony_type(&self) -> HarmonyMode {
        self.harmony
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Replace every unlocked slot with a fresh color for the current
    /// harmony mode, then record the result.
    pub fn generate(&mut self) {
        let fresh = HarmonyGenerator::generate(self.harmony, &mut self.rng);
        let current = self.palette.swatches();
        let next: [Swatch; PALETTE_SIZE] = std::array::from_fn(|i| {
            if current[i].is_locked() {
                current[i].clone()
            } else {
                Swatch::new(fresh[i])
            }
        });
        self.palette = Palette::new(next);
        debug!(
            mode = %self.harmony,
            locked = self.palette.locked_count(),
            "palette generated"
        );
        self.record_history();
    }

    /// Set slot `index` to `hex`. The lock flag is kept and the name recomputed.
    /// Invalid input leaves the palette unchanged.
    pub fn update_color(&mut self, index: usize, hex: &str) -> Result<()> {
        let color = Color::from_hex(hex)?;
        self.set_color(index, color)
    }

    fn set_color(&mut self, index: usize, color: Color) -> Result<()> {
        let slot = self.palette.slot_mut(index)?;
        *slot = slot.recolored(color);
        debug!(index, hex = %color, "color updated");
        Ok(())
    }

    /// Flip the lock on slot `index` and record the new lock state.
    pub fn toggle_lock(&mut self, index: usize) -> Result<()> {
        let slot = self.palette.slot_mut(index)?;
        slot.toggle_lock();
        debug!(index, locked = slot.is_locked(), "lock toggled");
        self.record_history();
        Ok(())
    }

    /// Move the swatch at `old_index` to `new_index`.
    pub fn reorder_colors(&mut self, old_index: usize, new_index: usize) -> Result<()> {
        self.palette.move_swatch(old_index, new_index)?;
        if let Some(active) = self.active_index {
            self.active_index = Some(follow_move(active, old_index, new_index));
        }
        debug!(old_index, new_index, "colors reordered");
        Ok(())
    }

    /// Select the harmony mode used by the next [`generate`](Self::generate).
    pub fn set_harmony_type(&mut self, mode: HarmonyMode) {
        debug!(%mode, "harmony mode set");
        self.harmony = mode;
    }

    /// Open the editor on `index`, or close it with `None`.
    pub fn set_active_index(&mut self, index: Option<usize>) -> Result<()> {
        if let Some(i) = index {
            self.palette.get(i)?;
        }
        self.active_index = index;
        Ok(())
    }

    pub fn close_editor(&mut self) {
        self.active_index = None;
    }

    /// Apply five colors slot by slot. Locks are kept; history is not written.
    pub fn load_colors(&mut self, colors: [Color; PALETTE_SIZE], source: &str) {
        for (index, color) in colors.into_iter().enumerate() {
            if let Err(e) = self.set_color(index, color) {
                warn!("skipping slot {index}: {e}");
            }
        }
        self.notify(format!("Palette loaded from {source}"), NotificationKind::Success);
    }

    /// Load colors decoded from a share link. Returns false and changes
    /// nothing if the link carries no valid palette.
    pub fn load_share_link(&mut self, url: &str) -> bool {
        match share::decode_url(url) {
            Some(swatches) => {
                self.load_colors(swatches.each_ref().map(Swatch::color), "URL");
                true
            }
            None => false,
        }
    }

    /// Load a saved palette's colors into the live palette.
    pub fn restore_from_history(&mut self, id: &str) -> Result<()> {
        let saved = self
            .history
            .get(id)
            .ok_or_else(|| PaletteError::HistoryEntryNotFound { id: id.to_string() })?;
        self.load_colors(saved.colors.colors(), "history");
        Ok(())
    }

    pub fn saved_palettes(&self) -> Vec<SavedPalette> {
        self.history.list()
    }

    pub fn delete_saved(&mut self, id: &str) {
        match self.history.remove(id) {
            Ok(()) => {
                self.notify("Palette deleted", NotificationKind::Info);
            }
            Err(e) => self.persistence_failed(e),
        }
    }

    pub fn clear_history(&mut self) {
        match self.history.clear() {
            Ok(()) => {
                self.notify("History cleared", NotificationKind::Info);
            }
            Err(e) => self.persistence_failed(e),
        }
    }

    /// Render the palette with `exporter`. Failures are reported as a
    /// notification and returned; the palette is never touched.
    pub fn export(&mut self, exporter: &dyn Exporter) -> Result<Vec<u8>> {
        match exporter.render(&self.palette) {
            Ok(bytes) => {
                info!(format = exporter.name(), bytes = bytes.len(), "palette exported");
                self.notify(
                    format!("Palette exported as {}", exporter.name()),
                    NotificationKind::Success,
                );
                Ok(bytes)
            }
            Err(e) => {
                warn!(format = exporter.name(), "export failed: {e}");
                self.notify("Failed to export palette", NotificationKind::Error);
                Err(match e {
                    e @ PaletteError::ExportFailure { .. } => e,
                    other => PaletteError::export(exporter.name(), other),
                })
            }
        }
    }

    pub fn share_url(&self, base: &str) -> String {
        share::share_url(base, &self.palette)
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        self.notifications.push(message, kind)
    }

    pub fn dismiss_notification(&mut self, id: u64) {
        self.notifications.dismiss(id);
    }

    pub fn expire_notifications(&mut self, now: Instant) {
        self.notifications.expire(now);
    }

    fn record_history(&mut self) {
        if let Err(e) = self.history.append(&self.palette, Some(self.harmony)) {
            self.persistence_failed(e);
        }
    }

    fn persistence_failed(&mut self, e: PaletteError) {
        warn!("palette history not saved: {e}");
        self.notify("Could not save palette history", NotificationKind::Error);
    }
}

/// Where the item at `index` ends up after moving `old` to `new`.
fn follow_move(index: usize, old: usize, new: usize) -> usize {
    if index == old {
        new
    } else if old < index && index <= new {
        index - 1
    } else if new <= index && index < old {
        index + 1
    } else {
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryStorage;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store(seed: u64) -> PaletteStore<StdRng> {
        PaletteStore::with_rng(HistoryStore::in_memory(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn starts_with_five_unlocked_and_no_history() {
        let s = store(1);
        assert_eq!(s.palette().locked_count(), 0);
        assert_eq!(s.harmony_type(), HarmonyMode::Random);
        assert!(s.saved_palettes().is_empty());
    }

    #[test]
    fn generate_keeps_locked_slots_identical() {
        let mut s = store(2);
        s.toggle_lock(1).unwrap();
        s.toggle_lock(3).unwrap();
        let before = s.palette().clone();

        for _ in 0..25 {
            s.generate();
            assert_eq!(s.palette().swatches()[1], before.swatches()[1]);
            assert_eq!(s.palette().swatches()[3], before.swatches()[3]);
        }
    }

    #[test]
    fn generate_replaces_unlocked_slots() {
        let mut s = store(3);
        let mut changed = [0usize; PALETTE_SIZE];
        const TRIALS: usize = 40;
        for _ in 0..TRIALS {
            let before = s.palette().hexes();
            s.generate();
            for (i, hex) in s.palette().hexes().iter().enumerate() {
                if *hex != before[i] {
                    changed[i] += 1;
                }
                assert!(!s.palette().swatches()[i].is_locked());
            }
        }
        for (i, count) in changed.iter().enumerate() {
            assert!(*count >= TRIALS - 2, "slot {i} changed only {count}/{TRIALS} times");
        }
    }

    #[test]
    fn generate_records_history_with_mode() {
        let mut s = store(4);
        s.set_harmony_type(HarmonyMode::Tetradic);
        s.generate();
        let saved = s.saved_palettes();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].harmony_type, Some(HarmonyMode::Tetradic));
        assert_eq!(&saved[0].colors, s.palette());
    }

    #[test]
    fn all_locked_generate_is_idempotent_but_recorded() {
        let mut s = store(5);
        for i in 0..PALETTE_SIZE {
            s.toggle_lock(i).unwrap();
        }
        let before = s.palette().clone();
        s.generate();
        assert_eq!(s.palette(), &before);
        assert_eq!(s.saved_palettes().len(), PALETTE_SIZE + 1);
    }

    #[test]
    fn update_color_canonicalizes_and_keeps_lock() {
        let mut s = store(6);
        s.toggle_lock(2).unwrap();
        s.update_color(2, "ff0000").unwrap();
        let slot = &s.palette().swatches()[2];
        assert_eq!(slot.hex(), "#FF0000");
        assert_eq!(slot.name(), "Red");
        assert!(slot.is_locked());
        assert_eq!(s.saved_palettes().len(), 1, "update must not write history");
    }

    #[test]
    fn invalid_update_leaves_palette_unchanged() {
        let mut s = store(7);
        let before = s.palette().clone();
        assert!(matches!(
            s.update_color(0, "#12345"),
            Err(PaletteError::InvalidFormat { .. })
        ));
        assert!(matches!(
            s.update_color(5, "#123456"),
            Err(PaletteError::IndexOutOfRange { index: 5, .. })
        ));
        assert_eq!(s.palette(), &before);
    }

    #[test]
    fn toggle_lock_writes_history_each_time() {
        let mut s = store(8);
        s.toggle_lock(0).unwrap();
        s.toggle_lock(0).unwrap();
        let saved = s.saved_palettes();
        assert_eq!(saved.len(), 2);
        assert!(!saved[0].colors.swatches()[0].is_locked());
        assert!(saved[1].colors.swatches()[0].is_locked());
        assert!(s.toggle_lock(9).is_err());
    }

    #[test]
    fn reorder_moves_first_to_last() {
        let mut s = store(9);
        let [a, b, c, d, e] = s.palette().hexes();
        s.reorder_colors(0, 4).unwrap();
        assert_eq!(s.palette().hexes(), [b, c, d, e, a]);
        assert!(s.saved_palettes().is_empty(), "reorder must not write history");
    }

    #[test]
    fn reorder_out_of_range_fails() {
        let mut s = store(10);
        let before = s.palette().clone();
        assert!(matches!(
            s.reorder_colors(7, 0),
            Err(PaletteError::IndexOutOfRange { index: 7, .. })
        ));
        assert_eq!(s.palette(), &before);
    }

    #[test]
    fn reorder_carries_active_editor() {
        let mut s = store(11);
        s.set_active_index(Some(0)).unwrap();
        s.reorder_colors(0, 3).unwrap();
        assert_eq!(s.active_index(), Some(3));
        s.reorder_colors(4, 1).unwrap();
        assert_eq!(s.active_index(), Some(4));
        s.close_editor();
        assert_eq!(s.active_index(), None);
    }

    #[test]
    fn follow_move_table() {
        assert_eq!(follow_move(2, 0, 4), 1);
        assert_eq!(follow_move(2, 4, 0), 3);
        assert_eq!(follow_move(0, 1, 2), 0);
        assert_eq!(follow_move(1, 1, 1), 1);
    }

    #[test]
    fn persistence_failure_keeps_palette_and_notifies() {
        let history = HistoryStore::new(Box::new(MemoryStorage::failing()));
        let mut s = PaletteStore::with_rng(history, StdRng::seed_from_u64(12));
        s.toggle_lock(0).unwrap();
        s.generate();

        assert!(s.palette().swatches()[0].is_locked());
        assert_eq!(s.palette().swatches().len(), PALETTE_SIZE);
        let last = s.notifications().latest().unwrap();
        assert_eq!(last.kind, NotificationKind::Error);
        assert_eq!(s.notifications().len(), 2);
    }

    #[test]
    fn load_share_link_preserves_locks() {
        let mut s = store(13);
        s.toggle_lock(4).unwrap();
        assert!(s.load_share_link("https://x.test/?colors=FF0000-00FF00-0000FF-FFFF00-FF00FF"));
        assert_eq!(s.palette().swatches()[0].hex(), "#FF0000");
        assert!(s.palette().swatches()[4].is_locked());
        assert_eq!(s.palette().swatches()[4].hex(), "#FF00FF");

        let before = s.palette().clone();
        assert!(!s.load_share_link("https://x.test/?colors=FF0000-00FF00"));
        assert_eq!(s.palette(), &before);
    }

    #[test]
    fn restore_from_history_loads_colors() {
        let mut s = store(14);
        s.generate();
        let saved = s.saved_palettes()[0].clone();
        s.generate();
        assert_ne!(s.palette().hexes(), saved.colors.hexes());

        s.restore_from_history(&saved.id).unwrap();
        assert_eq!(s.palette().hexes(), saved.colors.hexes());
        assert!(matches!(
            s.restore_from_history("missing"),
            Err(PaletteError::HistoryEntryNotFound { .. })
        ));
    }

    #[test]
    fn export_success_and_failure_notify() {
        struct Broken;
        impl Exporter for Broken {
            fn name(&self) -> &str {
                "Broken"
            }
            fn extension(&self) -> &str {
                "bin"
            }
            fn render(&self, _palette: &Palette) -> Result<Vec<u8>> {
                Err(PaletteError::Io(std::io::Error::other("disk gone")))
            }
        }

        let mut s = store(15);
        let before = s.palette().clone();
        let css = s.export(&crate::export::CssExporter).unwrap();
        assert!(String::from_utf8(css).unwrap().starts_with(":root {"));
        assert_eq!(
            s.notifications().latest().map(|n| n.message.as_str()),
            Some("Palette exported as CSS")
        );

        let err = s.export(&Broken).unwrap_err();
        assert!(matches!(err, PaletteError::ExportFailure { .. }));
        assert_eq!(s.notifications().latest().map(|n| n.kind), Some(NotificationKind::Error));
        assert_eq!(s.palette(), &before);
    }

    #[test]
    fn set_active_index_validates() {
        let mut s = store(16);
        assert!(s.set_active_index(Some(5)).is_err());
        assert_eq!(s.active_index(), None);
        s.set_active_index(Some(4)).unwrap();
        assert_eq!(s.active_index(), Some(4));
    }

    #[test]
    fn delete_saved_removes_one_entry() {
        let mut s = store(17);
        s.generate();
        s.generate();
        let saved = s.saved_palettes();
        s.delete_saved(&saved[0].id);

        let left = s.saved_palettes();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, saved[1].id);
        let last = s.notifications().latest().unwrap();
        assert_eq!(last.message, "Palette deleted");
        assert_eq!(last.kind, NotificationKind::Info);
    }

    #[test]
    fn clear_history_empties_log() {
        let mut s = store(18);
        s.generate();
        s.toggle_lock(0).unwrap();
        s.clear_history();
        assert!(s.saved_palettes().is_empty());
        assert_eq!(
            s.notifications().latest().map(|n| n.message.as_str()),
            Some("History cleared")
        );
    }

    #[test]
    fn history_management_failures_become_error_notifications() {
        let history = HistoryStore::new(Box::new(MemoryStorage::failing()));
        let mut s = PaletteStore::with_rng(history, StdRng::seed_from_u64(19));
        let before = s.palette().clone();

        s.delete_saved("anything");
        assert_eq!(s.notifications().len(), 1);
        s.clear_history();
        assert_eq!(s.notifications().len(), 2);

        for n in s.notifications().iter() {
            assert_eq!(n.kind, NotificationKind::Error);
            assert_eq!(n.message, "Could not save palette history");
        }
        assert_eq!(s.palette(), &before);
    }
}
