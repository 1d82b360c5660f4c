use anyhow::Context;
use clap::Parser;
use crossterm::event;
use minegrid_core::{CellCount, Coord, Game, GameConfig, RandomLayoutGenerator};
use rand::prelude::*;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

mod animation;
mod app;
mod layout;
mod render;
mod terminal;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Cells per row and per column
    #[arg(short = 'n', long, default_value_t = GameConfig::DEFAULT_SIZE)]
    size: Coord,

    /// Number of mines on the board
    #[arg(short, long, default_value_t = GameConfig::DEFAULT_MINES)]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where log output goes; nothing is logged without it
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// The screen belongs to the game, so log records only ever go to a file.
fn init_logger(args: &Args) -> anyhow::Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Error initializing logger")
}

fn run(app: &mut app::App) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    loop {
        let now = Instant::now();
        app.tick(now);
        app.draw(&mut stdout)?;

        if !event::poll(app.poll_timeout(now))? {
            continue;
        }
        if app.handle_event(event::read()?, Instant::now())? == app::Control::Quit {
            return Ok(());
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(&args)?;

    let config = GameConfig::new(args.size, args.mines).with_context(|| {
        format!(
            "cannot place {} mines on a {}x{} board",
            args.mines, args.size, args.size
        )
    })?;
    let seed: u64 = args.seed.unwrap_or_else(|| rand::rng().random());
    log::debug!("seed: {}", seed);

    let game = Game::new(config, RandomLayoutGenerator::new(seed))?;
    let mut app = app::App::new(game);

    let _terminal = terminal::TerminalGuard::enter()?;
    log::debug!("App started");
    run(&mut app)
}
