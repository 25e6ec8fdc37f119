use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::color::{Color as AppColor, DARK_TEXT};
use crate::history::{SavedPalette, MAX_HISTORY};
use crate::notify::{Notification, NotificationKind};
use crate::palette::Palette;
use crate::pipeline::contrast::PairContrast;

fn to_color(c: &AppColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Black or white foreground for readable text on the given background.
fn contrast_fg(c: &AppColor) -> Color {
    if c.text_color() == DARK_TEXT {
        Color::Black
    } else {
        Color::White
    }
}

/// Renders the five swatches as full-height colored columns with name, hex
/// and lock state. The selected column is bold and underlined.
pub struct PaletteWidget<'a> {
    palette: &'a Palette,
    selected: usize,
}

impl<'a> PaletteWidget<'a> {
    pub fn new(palette: &'a Palette, selected: usize) -> Self {
        Self { palette, selected }
    }
}

impl Widget for PaletteWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = Layout::horizontal([Constraint::Ratio(1, 5); 5]).split(area);
        for (i, (swatch, column)) in self.palette.swatches().iter().zip(columns.iter()).enumerate() {
            let color = swatch.color();
            let mut style = Style::default().bg(to_color(&color)).fg(contrast_fg(&color));
            if i == self.selected {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            let lock = if swatch.is_locked() { "[locked]" } else { "[      ]" };
            let marker = if i == self.selected { "▲" } else { " " };

            let padding = column.height.saturating_sub(5) / 2;
            let mut lines: Vec<Line> = (0..padding).map(|_| Line::from("")).collect();
            lines.extend([
                Line::from(swatch.name().to_string()),
                Line::from(swatch.hex()),
                Line::from(lock),
                Line::from(format!("{}", i + 1)),
                Line::from(marker),
            ]);

            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().style(style))
                .style(style)
                .render(*column, buf);
        }
    }
}

/// Pairwise WCAG results, one row per pair.
pub struct ContrastWidget<'a> {
    pairs: &'a [PairContrast],
}

impl<'a> ContrastWidget<'a> {
    pub fn new(pairs: &'a [PairContrast]) -> Self {
        Self { pairs }
    }
}

fn badge(pass: bool, label: &str) -> Span<'static> {
    let style = if pass {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mark = if pass { "✓" } else { "✗" };
    Span::styled(format!(" {mark} {label} "), style)
}

impl Widget for ContrastWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title("Contrast");
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .pairs
            .iter()
            .map(|pair| {
                let r = &pair.result;
                Line::from(vec![
                    Span::styled(
                        format!(" {} ", pair.first + 1),
                        Style::default()
                            .bg(to_color(&pair.first_color))
                            .fg(contrast_fg(&pair.first_color)),
                    ),
                    Span::styled(
                        format!(" {} ", pair.second + 1),
                        Style::default()
                            .bg(to_color(&pair.second_color))
                            .fg(contrast_fg(&pair.second_color)),
                    ),
                    Span::raw(format!(" {:>5.2}:1 ", r.ratio)),
                    badge(r.aa_normal, "AA"),
                    badge(r.aa_large, "AA large"),
                    badge(r.aaa_normal, "AAA"),
                    badge(r.aaa_large, "AAA large"),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Sample interface drawn with the palette. Slots map to the roles
/// primary, secondary, accent, background and text.
pub struct PreviewWidget<'a> {
    palette: &'a Palette,
}

impl<'a> PreviewWidget<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }
}

fn button(label: &str, bg: &AppColor) -> Span<'static> {
    Span::styled(
        format!(" {label} "),
        Style::default()
            .bg(to_color(bg))
            .fg(contrast_fg(bg))
            .add_modifier(Modifier::BOLD),
    )
}

impl Widget for PreviewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [primary, secondary, accent, background, text] = self.palette.colors();
        let base = Style::default().bg(to_color(&background)).fg(to_color(&text));
        let block = Block::bordered().title("Preview").style(base);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(Span::styled(
                "Heading",
                Style::default()
                    .fg(to_color(&primary))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Subheading", Style::default().fg(to_color(&secondary)))),
            Line::from("Body text sits on the background color."),
            Line::from(vec![
                Span::raw("Read the "),
                Span::styled(
                    "linked docs",
                    Style::default()
                        .fg(to_color(&accent))
                        .add_modifier(Modifier::UNDERLINED),
                ),
                Span::raw("."),
            ]),
            Line::from(""),
            Line::from(vec![
                button("Primary", &primary),
                Span::raw(" "),
                button("Secondary", &secondary),
                Span::raw(" "),
                button("Accent", &accent),
            ]),
            Line::from(""),
            Line::from(
                self.palette
                    .colors()
                    .iter()
                    .map(|c| Span::styled("      ", Style::default().bg(to_color(c))))
                    .collect::<Vec<_>>(),
            ),
        ];
        Paragraph::new(lines).style(base).render(inner, buf);
    }
}

/// Saved palettes, newest first, with the cursor row highlighted.
pub struct HistoryWidget<'a> {
    entries: &'a [SavedPalette],
    selected: usize,
}

impl<'a> HistoryWidget<'a> {
    pub fn new(entries: &'a [SavedPalette], selected: usize) -> Self {
        Self { entries, selected }
    }
}

impl Widget for HistoryWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(format!("History ({}/{MAX_HISTORY})", self.entries.len()))
            .title_bottom(" ↑/↓ select  enter load  d delete  D clear all  esc close ");
        let inner = block.inner(area);
        block.render(area, buf);

        if self.entries.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                " No saved palettes yet",
                Style::default().fg(Color::DarkGray),
            )))
            .render(inner, buf);
            return;
        }

        let visible = inner.height.max(1) as usize;
        let first = self.selected.saturating_sub(visible - 1);
        let lines: Vec<Line> = self
            .entries
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .map(|(i, saved)| {
                let marker = if i == self.selected { "▶ " } else { "  " };
                let mut spans = vec![Span::raw(marker)];
                spans.extend(
                    saved
                        .colors
                        .colors()
                        .iter()
                        .map(|c| Span::styled("   ", Style::default().bg(to_color(c)))),
                );
                let mode = saved.harmony_type.map(|m| m.label()).unwrap_or("-");
                spans.push(Span::raw(format!(
                    "  {}  {mode}",
                    saved.created_at.format("%Y-%m-%d %H:%M")
                )));
                let line = Line::from(spans);
                if i == self.selected {
                    line.style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    line
                }
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}

/// Bottom bar: the hex editor prompt when open, else the latest
/// notification, followed by the key help.
pub struct StatusWidget<'a> {
    pub editor: Option<(usize, &'a str)>,
    pub notification: Option<&'a Notification>,
    pub mode: &'a str,
}

const HELP: &str = "space generate  ←/→ select  l/1-5 lock  </> move  e edit  m mode  a contrast  v preview  y history  c/j/p export  u share  q quit";

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let first = if let Some((index, input)) = self.editor {
            Line::from(vec![
                Span::styled(
                    format!(" edit slot {} ", index + 1),
                    Style::default().fg(Color::Black).bg(Color::Yellow),
                ),
                Span::raw(format!(" #{input}")),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
                Span::styled("  enter apply  esc close", Style::default().fg(Color::DarkGray)),
            ])
        } else if let Some(n) = self.notification {
            let color = match n.kind {
                NotificationKind::Success => Color::Green,
                NotificationKind::Error => Color::Red,
                NotificationKind::Info => Color::Cyan,
            };
            Line::from(Span::styled(format!(" {}", n.message), Style::default().fg(color)))
        } else {
            Line::from(Span::styled(
                format!(" harmony: {}", self.mode),
                Style::default().fg(Color::DarkGray),
            ))
        };

        Paragraph::new(vec![
            first,
            Line::from(Span::styled(format!(" {HELP}"), Style::default().fg(Color::DarkGray))),
        ])
        .wrap(Wrap { trim: false })
        .render(area, buf);
    }
}
