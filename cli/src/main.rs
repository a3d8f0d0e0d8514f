use std::io;

use anyhow::{Context, anyhow};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::Verbosity;
use minegrid_core::{GameConfig, GridEngine, Preset};

use input::{custom_config, issue_message};
use session::Session;

mod input;
mod render;
mod session;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PresetArg {
    /// 9x9 with 15 bombs
    Beginner,
    /// 16x16 with 50 bombs
    Intermediate,
    /// 30x16 with 100 bombs
    Expert,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Beginner => Preset::Beginner,
            PresetArg::Intermediate => Preset::Intermediate,
            PresetArg::Expert => Preset::Expert,
        }
    }
}

/// Minesweeper in the terminal.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Grid preset, ignored when a custom size is given
    #[arg(long, value_enum, default_value_t = PresetArg::Beginner)]
    preset: PresetArg,

    /// Custom grid width (5 to 50)
    #[arg(long, requires_all = ["rows", "bombs"])]
    cols: Option<u32>,

    /// Custom grid height (5 to 50)
    #[arg(long, requires_all = ["cols", "bombs"])]
    rows: Option<u32>,

    /// Custom bomb count (5 to 2490, leaving room for a 3x3 start)
    #[arg(long, requires_all = ["cols", "rows"])]
    bombs: Option<u32>,

    /// Seed for bomb placement, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbose: Verbosity,
}

impl Cli {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        match (self.cols, self.rows, self.bombs) {
            (Some(cols), Some(rows), Some(bombs)) => {
                custom_config(cols, rows, bombs).map_err(|issue| anyhow!(issue_message(issue)))
            }
            _ => Ok(Preset::from(self.preset).config()),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let config = cli.game_config()?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!(
        "Starting {}x{} game with {} bombs, seed {}",
        config.cols,
        config.rows,
        config.bombs,
        seed
    );

    let engine = GridEngine::new(config, seed).context("Could not set up the grid")?;
    let mut session = Session::new(engine, io::stdin().lock(), io::stdout().lock());
    session.run().context("Terminal session failed")
}
