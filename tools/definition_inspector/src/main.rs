use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use blockinfo_client::cache::FormattedResult;
use blockinfo_client::engine::{RenderMode, TextEngine};
use blockinfo_client::glyphs::text_width;
use blockinfo_client::host::{DrawRequest, GameSession, OverlayRenderer};
use blockinfo_client::lines::{plain_text, to_markup, StyledRun};
use blockinfo_client::settings::Settings;
use blockinfo_shared::block::BlockDefinitionId;
use blockinfo_shared::registry::DefinitionRegistry;
use glam::Vec2;
use tracing::info;

const USAGE: &str = "Usage: definition_inspector <definitions.toml> [--block <Category/Subtype>] \
[--settings <settings.toml>] [--notification] [--markup]";

/// Pixel widths of the bundled glyph table, scaled like the overlay does.
const PX_TO_SCREEN: f32 = 1.0 / 1000.0;
const LINE_HEIGHT: f32 = 0.03;

struct Options {
    definitions: PathBuf,
    block: Option<String>,
    settings: Option<PathBuf>,
    mode: RenderMode,
    markup: bool,
}

/// Measures with the glyph table instead of a real overlay.
struct MeasuringOverlay;

impl OverlayRenderer for MeasuringOverlay {
    fn measure(&mut self, runs: &[StyledRun], scale: f32) -> Vec2 {
        let text = plain_text(runs);
        let widest = text.lines().map(text_width).max().unwrap_or(0);
        let rows = text.lines().count();
        Vec2::new(
            widest as f32 * PX_TO_SCREEN * scale,
            -(rows as f32) * LINE_HEIGHT * scale,
        )
    }

    fn draw(&mut self, _request: &DrawRequest<'_>) {}

    fn hide(&mut self) {}
}

fn main() {
    let _ = tracing_subscriber::fmt().with_target(false).try_init();

    let mut definitions = None;
    let mut block = None;
    let mut settings = None;
    let mut mode = RenderMode::Rich;
    let mut markup = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--block" => {
                let Some(value) = args.next() else {
                    eprintln!("--block expects a Category/Subtype or subtype argument");
                    std::process::exit(2);
                };
                block = Some(value);
            }
            "--settings" => {
                let Some(value) = args.next() else {
                    eprintln!("--settings expects a path argument");
                    std::process::exit(2);
                };
                settings = Some(PathBuf::from(value));
            }
            "--notification" => mode = RenderMode::Notification,
            "--markup" => markup = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                return;
            }
            other if other.starts_with("--") => {
                eprintln!("unknown argument: {other}");
                std::process::exit(2);
            }
            path => definitions = Some(PathBuf::from(path)),
        }
    }

    let Some(definitions) = definitions else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let options = Options {
        definitions,
        block,
        settings,
        mode,
        markup,
    };
    if let Err(err) = run(&options) {
        eprintln!("definition_inspector error: {err}");
        std::process::exit(1);
    }
}

fn run(options: &Options) -> Result<(), String> {
    let registry = DefinitionRegistry::load(&options.definitions)
        .map_err(|err| format!("failed to load {}: {err}", options.definitions.display()))?;
    let settings = load_settings(options.settings.as_deref())?;
    info!(
        "loaded {} block definitions from {}",
        registry.len(),
        options.definitions.display()
    );

    let ids: Vec<BlockDefinitionId> = match &options.block {
        Some(wanted) => {
            let def = registry
                .blocks()
                .find(|def| def.id.to_string() == *wanted || def.id.subtype == *wanted)
                .ok_or_else(|| format!("no block named {wanted}"))?;
            vec![def.id.clone()]
        }
        None => registry.blocks().map(|def| def.id.clone()).collect(),
    };

    let mut engine = TextEngine::new(registry, settings);
    let session = GameSession::default();
    let mut overlay = MeasuringOverlay;
    let now = Instant::now();

    for id in &ids {
        let Some(result) = engine.held_result(id, options.mode, &session, now, &mut overlay) else {
            continue;
        };

        println!("== {id}");
        match result {
            FormattedResult::Rich(rich) => {
                if options.markup {
                    print!("{}", to_markup(&rich.runs));
                } else {
                    print!("{}", plain_text(&rich.runs));
                }
                println!("-- size {:.3} x {:.3}", rich.size.x, -rich.size.y);
            }
            FormattedResult::Notification(notification) => {
                for line in &notification.lines {
                    println!("[{:?}] {}", line.style, line.text);
                }
            }
        }
        println!();
    }

    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<Settings, String> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let settings = Settings::load(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    Ok(settings.unwrap_or_default())
}
