use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use custom_snake::app::App;
use custom_snake::config::{Difficulty, FoodPolicy, Mode, Settings};
use custom_snake::error::Result;
use custom_snake::game::GameState;
use custom_snake::input::InputHandler;
use custom_snake::logging;
use custom_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use tracing::{error, info};

/// Upper bound on how long one input poll may block.
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Boundary mode for the first run.
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Speed tier for the first run.
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Canvas width in pixels (10 px per cell).
    #[arg(long)]
    canvas_width: Option<u16>,

    /// Canvas height in pixels (10 px per cell).
    #[arg(long)]
    canvas_height: Option<u16>,

    /// Where new food may appear.
    #[arg(long, value_enum)]
    food_policy: Option<FoodPolicy>,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file. Defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append logs to this file. Without it nothing is logged.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply_to(&self, settings: &mut Settings) {
        if let Some(mode) = self.mode {
            settings.mode = mode;
        }
        if let Some(difficulty) = self.difficulty {
            settings.difficulty = difficulty;
        }
        if let Some(width) = self.canvas_width {
            settings.canvas_width = width;
        }
        if let Some(height) = self.canvas_height {
            settings.canvas_height = height;
        }
        if let Some(policy) = self.food_policy {
            settings.food_policy = policy;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "exiting");
            eprintln!("custom-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    logging::init(cli.log_file.as_deref())?;

    let mut settings = Settings::load(cli.config.as_deref())?;
    cli.apply_to(&mut settings);
    info!(?settings, grid = ?settings.grid(), "starting");

    let state = match settings.seed {
        Some(seed) => GameState::new_with_seed(
            settings.grid(),
            settings.mode,
            settings.difficulty,
            settings.food_policy,
            seed,
        ),
        None => GameState::new(
            settings.grid(),
            settings.mode,
            settings.difficulty,
            settings.food_policy,
        ),
    };

    install_panic_hook();
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut app = App::new(state);

    while !app.should_quit() {
        if app.take_redraw() {
            session.draw(&app)?;
        }

        let timeout = app
            .time_until_tick(Instant::now())
            .map_or(IDLE_POLL, |due| due.min(IDLE_POLL));
        if let Some(game_input) = input.poll_input(timeout)? {
            app.handle_input(game_input, Instant::now());
        }

        app.on_frame(Instant::now());
    }

    info!("quit");
    Ok(())
}
