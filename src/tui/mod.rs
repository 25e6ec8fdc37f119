pub mod widgets;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::Rng;
use ratatui::prelude::*;
use ratatui::DefaultTerminal;

use crate::export::ExportFormat;
use crate::notify::NotificationKind;
use crate::palette::PALETTE_SIZE;
use crate::state::PaletteStore;

use widgets::{ContrastWidget, HistoryWidget, PaletteWidget, PreviewWidget, StatusWidget};

const TICK: Duration = Duration::from_millis(250);

/// State for the interactive TUI application.
pub struct TuiApp<R> {
    pub store: PaletteStore<R>,
    pub selected: usize,
    pub input: String,
    pub show_contrast: bool,
    pub show_preview: bool,
    /// Cursor row while the history overlay is open.
    pub history_cursor: Option<usize>,
    pub base_url: String,
    pub export_dir: PathBuf,
    pub should_quit: bool,
}

impl<R: Rng> TuiApp<R> {
    pub fn new(store: PaletteStore<R>, base_url: String, export_dir: PathBuf) -> Self {
        Self {
            store,
            selected: 0,
            input: String::new(),
            show_contrast: false,
            show_preview: false,
            history_cursor: None,
            base_url,
            export_dir,
            should_quit: false,
        }
    }

    /// Apply one key press. Editor input takes priority while the editor is open.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let Some(index) = self.store.active_index() {
            self.handle_editor_key(index, key);
            return;
        }
        if let Some(cursor) = self.history_cursor {
            self.handle_history_key(cursor, key);
            return;
        }
        match key.code {
            KeyCode::Char(' ') => self.store.generate(),
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Left => {
                self.selected = (self.selected + PALETTE_SIZE - 1) % PALETTE_SIZE
            }
            KeyCode::Right => self.selected = (self.selected + 1) % PALETTE_SIZE,
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.selected = index;
                self.toggle_lock(index);
            }
            KeyCode::Char('l') => self.toggle_lock(self.selected),
            KeyCode::Char('<') => self.move_selected(-1),
            KeyCode::Char('>') => self.move_selected(1),
            KeyCode::Char('m') => {
                let next = self.store.harmony_type().next();
                self.store.set_harmony_type(next);
                self.store.notify(format!("Harmony: {next}"), NotificationKind::Info);
            }
            KeyCode::Char('e') | KeyCode::Enter => self.open_editor(),
            KeyCode::Char('a') => self.show_contrast = !self.show_contrast,
            KeyCode::Char('v') => self.show_preview = !self.show_preview,
            KeyCode::Char('y') => self.history_cursor = Some(0),
            KeyCode::Char('c') => self.export(ExportFormat::Css),
            KeyCode::Char('j') => self.export(ExportFormat::Json),
            KeyCode::Char('p') => self.export(ExportFormat::Png),
            KeyCode::Char('u') => {
                let url = self.store.share_url(&self.base_url);
                self.store.notify(url, NotificationKind::Info);
            }
            KeyCode::Char('x') => {
                if let Some(id) = self.store.notifications().latest().map(|n| n.id) {
                    self.store.dismiss_notification(id);
                }
            }
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, index: usize, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.store.close_editor();
                self.input.clear();
            }
            KeyCode::Enter => match self.store.update_color(index, &self.input) {
                Ok(()) => {
                    self.store.close_editor();
                    self.input.clear();
                }
                Err(e) => {
                    self.store.notify(e.to_string(), NotificationKind::Error);
                }
            },
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_hexdigit() && self.input.len() < 6 => {
                self.input.push(c.to_ascii_uppercase());
            }
            _ => {}
        }
    }

    fn handle_history_key(&mut self, cursor: usize, key: KeyEvent) {
        let entries = self.store.saved_palettes();
        match key.code {
            KeyCode::Esc | KeyCode::Char('y') => self.history_cursor = None,
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up => self.history_cursor = Some(cursor.saturating_sub(1)),
            KeyCode::Down => {
                let last = entries.len().saturating_sub(1);
                self.history_cursor = Some((cursor + 1).min(last));
            }
            KeyCode::Enter => {
                if let Some(saved) = entries.get(cursor) {
                    match self.store.restore_from_history(&saved.id) {
                        Ok(()) => self.history_cursor = None,
                        Err(e) => {
                            self.store.notify(e.to_string(), NotificationKind::Error);
                        }
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some(saved) = entries.get(cursor) {
                    self.store.delete_saved(&saved.id);
                    let last = entries.len().saturating_sub(2);
                    self.history_cursor = Some(cursor.min(last));
                }
            }
            KeyCode::Char('D') => {
                self.store.clear_history();
                self.history_cursor = Some(0);
            }
            _ => {}
        }
    }

    fn open_editor(&mut self) {
        if self.store.set_active_index(Some(self.selected)).is_ok() {
            self.input = self.store.palette().swatches()[self.selected]
                .hex()
                .trim_start_matches('#')
                .to_string();
        }
    }

    fn toggle_lock(&mut self, index: usize) {
        if let Err(e) = self.store.toggle_lock(index) {
            self.store.notify(e.to_string(), NotificationKind::Error);
        }
    }

    fn move_selected(&mut self, delta: isize) {
        let target = self.selected as isize + delta;
        if !(0..PALETTE_SIZE as isize).contains(&target) {
            return;
        }
        let target = target as usize;
        if self.store.reorder_colors(self.selected, target).is_ok() {
            self.selected = target;
        }
    }

    fn export(&mut self, format: ExportFormat) {
        let exporter = format.exporter();
        let Ok(bytes) = self.store.export(exporter.as_ref()) else {
            return;
        };
        let path = self.export_dir.join(exporter.default_filename());
        if let Err(e) = std::fs::write(&path, bytes) {
            tracing::warn!("failed to save {}: {e}", path.display());
            self.store
                .notify(format!("Failed to save {}", path.display()), NotificationKind::Error);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [title, body, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .areas(frame.area());

        let locked = self.store.palette().locked_count();
        frame.render_widget(
            Line::from(vec![
                Span::styled(" chromaset ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(
                    " harmony: {}  locked: {locked}/{PALETTE_SIZE}",
                    self.store.harmony_type()
                )),
            ]),
            title,
        );

        let palette_area = if self.show_contrast || self.show_preview {
            let [left, right] =
                Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .areas(body);
            let panels = match (self.show_contrast, self.show_preview) {
                (true, true) => Layout::vertical([Constraint::Percentage(50); 2]).split(right),
                _ => Layout::vertical([Constraint::Percentage(100)]).split(right),
            };
            let mut slots = panels.iter();
            if self.show_contrast {
                if let Some(area) = slots.next() {
                    let pairs = self.store.palette().contrast_report();
                    frame.render_widget(ContrastWidget::new(&pairs), *area);
                }
            }
            if self.show_preview {
                if let Some(area) = slots.next() {
                    frame.render_widget(PreviewWidget::new(self.store.palette()), *area);
                }
            }
            left
        } else {
            body
        };
        frame.render_widget(
            PaletteWidget::new(self.store.palette(), self.selected),
            palette_area,
        );

        if let Some(cursor) = self.history_cursor {
            let entries = self.store.saved_palettes();
            let [_, popup, _] = Layout::horizontal([
                Constraint::Percentage(15),
                Constraint::Percentage(70),
                Constraint::Percentage(15),
            ])
            .areas(body);
            frame.render_widget(HistoryWidget::new(&entries, cursor), popup);
        }

        frame.render_widget(
            StatusWidget {
                editor: self.store.active_index().map(|i| (i, self.input.as_str())),
                notification: self.store.notifications().latest(),
                mode: self.store.harmony_type().label(),
            },
            status,
        );
    }
}

/// Launch the TUI application.
pub fn run<R: Rng>(mut app: TuiApp<R>) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app);
    ratatui::restore();
    result
}

fn event_loop<R: Rng>(terminal: &mut DefaultTerminal, app: &mut TuiApp<R>) -> Result<()> {
    while !app.should_quit {
        app.store.expire_notifications(Instant::now());
        terminal.draw(|frame| app.draw(frame))?;
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}
