use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::style::{Color as TermColor, Stylize};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use chromaset::cli::{Args, Command, HistoryAction};
use chromaset::config::Config;
use chromaset::export::ExportFormat;
use chromaset::history::{HistoryStore, SavedPalette};
use chromaset::notify::NotificationKind;
use chromaset::palette::{Palette, PALETTE_SIZE};
use chromaset::share;
use chromaset::tui::{self, TuiApp};
use chromaset::PaletteStore;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let config = Config::resolve(args.history_file.clone(), args.base_url.clone());
    debug!(history = %config.history_path.display(), "resolved config");
    let history = HistoryStore::file(&config.history_path);

    match args.command {
        Command::Generate { mode, from, lock } => {
            let mut store = match from {
                Some(spec) => {
                    let locks: Vec<usize> = lock
                        .iter()
                        .map(|&n| slot_from_one_based(n))
                        .collect::<Result<_>>()?;
                    let palette = resolve_palette(&spec, &history)?.lock_slots(&locks)?;
                    PaletteStore::from_palette(palette, history, rand::rng())
                }
                None => PaletteStore::new(history),
            };
            store.set_harmony_type(mode);
            store.generate();
            report_errors(&store);
            print_palette(store.palette());
            println!("{}", share::encode_colors(store.palette()));
        }
        Command::Contrast { palette } => {
            let palette = resolve_palette(&palette, &history)?;
            print_palette(&palette);
            println!();
            for pair in palette.contrast_report() {
                let r = pair.result;
                println!(
                    "{} {} vs {} {}  {:>5.2}:1  AA {}  AA-large {}  AAA {}  AAA-large {}",
                    pair.first + 1,
                    pair.first_color,
                    pair.second + 1,
                    pair.second_color,
                    r.ratio,
                    verdict(r.aa_normal),
                    verdict(r.aa_large),
                    verdict(r.aaa_normal),
                    verdict(r.aaa_large),
                );
            }
        }
        Command::Export {
            palette,
            format,
            output,
        } => {
            let palette = resolve_palette(&palette, &history)?;
            let mut store = PaletteStore::from_palette(palette, history, rand::rng());
            let exporter = format.exporter();
            let bytes = store.export(exporter.as_ref())?;
            match output {
                Some(path) => std::fs::write(&path, &bytes)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None if format == ExportFormat::Png => {
                    let path = exporter.default_filename();
                    std::fs::write(&path, &bytes)
                        .with_context(|| format!("failed to write {path}"))?;
                    eprintln!("wrote {path}");
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&bytes)?;
                    writeln!(stdout)?;
                }
            }
        }
        Command::Share { palette } => {
            let palette = resolve_palette(&palette, &history)?;
            println!("{}", share::share_url(&config.base_url, &palette));
        }
        Command::History { action } => run_history(action, history)?,
        Command::Tui { from } => {
            let mut store = PaletteStore::new(history);
            if let Some(spec) = from {
                load_into(&mut store, &spec)?;
            }
            let cwd = std::env::current_dir().context("failed to read working directory")?;
            tui::run(TuiApp::new(store, config.base_url, cwd))?;
        }
    }

    Ok(())
}

/// Logs go to stderr. The TUI owns the screen, so it only logs when asked to
/// via `RUST_LOG`.
fn init_logging(args: &Args) {
    let in_tui = matches!(args.command, Command::Tui { .. });
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if in_tui {
        return;
    } else if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn slot_from_one_based(n: usize) -> Result<usize> {
    if (1..=PALETTE_SIZE).contains(&n) {
        Ok(n - 1)
    } else {
        bail!("slot {n} out of range: expected 1-{PALETTE_SIZE}")
    }
}

/// Accepts a share code, a share URL, or `latest` for the newest history entry.
fn resolve_palette(spec: &str, history: &HistoryStore) -> Result<Palette> {
    if spec.eq_ignore_ascii_case("latest") {
        return history
            .list()
            .into_iter()
            .next()
            .map(|saved| saved.colors)
            .context("palette history is empty");
    }
    share::decode_url(spec)
        .map(Palette::new)
        .with_context(|| format!("not a palette: {spec} (expected five hex codes joined by '-')"))
}

/// Load a starting palette into a live store, the way the TUI's own history
/// and share actions do.
fn load_into<R: rand::Rng>(store: &mut PaletteStore<R>, spec: &str) -> Result<()> {
    if spec.eq_ignore_ascii_case("latest") {
        let latest = store
            .saved_palettes()
            .into_iter()
            .next()
            .context("palette history is empty")?;
        store.restore_from_history(&latest.id)?;
    } else if !store.load_share_link(spec) {
        bail!("not a palette: {spec} (expected five hex codes joined by '-')");
    }
    Ok(())
}

fn run_history(action: HistoryAction, mut history: HistoryStore) -> Result<()> {
    match action {
        HistoryAction::List => {
            for saved in history.list() {
                print_saved_line(&saved);
            }
        }
        HistoryAction::Show { id } => {
            let saved = history
                .get(&id)
                .with_context(|| format!("no saved palette with id {id}"))?;
            print_saved_line(&saved);
            print_palette(&saved.colors);
        }
        HistoryAction::Remove { id } => history.remove(&id)?,
        HistoryAction::Clear => history.clear()?,
    }
    Ok(())
}

fn print_saved_line(saved: &SavedPalette) {
    let swatches: String = saved
        .colors
        .colors()
        .iter()
        .map(|c| "  ".on(TermColor::Rgb { r: c.r, g: c.g, b: c.b }).to_string())
        .collect();
    let mode = saved
        .harmony_type
        .map(|m| m.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{}  {}  {swatches}  {}  {mode}",
        saved.id,
        saved.created_at.format("%Y-%m-%d %H:%M:%S"),
        share::encode_colors(&saved.colors),
    );
}

fn print_palette(palette: &Palette) {
    for (i, swatch) in palette.swatches().iter().enumerate() {
        let c = swatch.color();
        let fg = if c.text_color() == chromaset::color::DARK_TEXT {
            TermColor::Black
        } else {
            TermColor::White
        };
        let chip = format!(" {} ", swatch.hex())
            .with(fg)
            .on(TermColor::Rgb { r: c.r, g: c.g, b: c.b });
        let lock = if swatch.is_locked() { "locked" } else { "" };
        println!(
            "{}  {chip}  {:<22} {:<20} {lock}",
            i + 1,
            swatch.name(),
            c.to_hsl().to_string(),
        );
    }
}

fn verdict(pass: bool) -> &'static str {
    if pass {
        "pass"
    } else {
        "fail"
    }
}

/// Surface persistence problems the store swallowed.
fn report_errors<R: rand::Rng>(store: &PaletteStore<R>) {
    for n in store.notifications().iter() {
        if n.kind == NotificationKind::Error {
            eprintln!("warning: {}", n.message);
        }
    }
}
