use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};

use duopong::config;
use duopong::env::SeededRandom;
use duopong::{debug, game_modes};

/// Command line options
#[derive(Debug, Default)]
struct Args {
    debug: bool,
    seed: Option<u64>,
    left_ai: bool,
    right_ai: bool,
    config_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let Some(args) = parse_args(&args)? else {
        return Ok(());
    };

    if let Some(path) = debug::init(args.debug)? {
        eprintln!("Debug log: {}", path.display());
    }

    let config_path = args.config_path.clone().unwrap_or_else(config::get_config_path);
    let mut config = config::load_config(&config_path)?;
    config.ai.left_enabled |= args.left_ai;
    config.ai.right_enabled |= args.right_ai;
    config.validate()?;

    let mut rng = match args.seed {
        Some(seed) => {
            tracing::info!(seed, "seeded match");
            SeededRandom::from_seed(seed)
        }
        None => SeededRandom::from_entropy(),
    };

    // Key release events make held paddle keys exact
    let release_events = supports_keyboard_enhancement().unwrap_or(false);

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = game_modes::run_game_local(&mut terminal, &config, &mut rng, release_events);

    // Restore terminal
    if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "game loop failed");
    }
    result
}

/// Parse command line arguments. `Ok(None)` means help was printed.
fn parse_args(args: &[String]) -> Result<Option<Args>> {
    let program = args.first().map(String::as_str).unwrap_or("duopong");
    let mut parsed = Args::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--debug" | "-d" => parsed.debug = true,
            "--left-ai" => parsed.left_ai = true,
            "--right-ai" => parsed.right_ai = true,
            "--seed" | "-s" => {
                let value = iter.next().context("--seed requires a number")?;
                parsed.seed = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid seed {:?}", value))?,
                );
            }
            "--config" | "-c" => {
                let value = iter.next().context("--config requires a path")?;
                parsed.config_path = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                print_usage(program);
                return Ok(None);
            }
            other => {
                print_usage(program);
                bail!("unknown argument: {}", other);
            }
        }
    }

    Ok(Some(parsed))
}

fn print_usage(program: &str) {
    println!("duopong - two-paddle terminal ball game");
    println!();
    println!("Usage:");
    println!("  {} [options]", program);
    println!();
    println!("Options:");
    println!("  -d, --debug          Write a debug log to {}", debug::log_file_path().display());
    println!("  -s, --seed <N>       Seed the random source for a reproducible match");
    println!("      --left-ai        Start with the left paddle under AI control");
    println!("      --right-ai       Start with the right paddle under AI control");
    println!("  -c, --config <PATH>  Use a config file other than the default");
    println!("  -h, --help           Show this help");
    println!();
    println!("Controls (defaults):");
    println!("  W/S        left paddle      Up/Down   right paddle");
    println!("  L          toggle left AI   P         toggle right AI");
    println!("  Space      serve            R         rematch after a win");
    println!("  Q / Esc    quit");
}
