//! Shot Table Builder
//!
//! Builds the pitch, loads or computes the shooting-path table, and prints a
//! summary of the layout.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use pitch_grid::core::config::PitchConfig;
use pitch_grid::core::error::Result;
use pitch_grid::pitch::{Cell, Grid, ShootingPaths, ShotTableStore, SweptCorridor};

/// Build or load the precomputed shooting paths
#[derive(Parser, Debug)]
#[command(name = "shot_table")]
#[command(about = "Build or load the shooting-path table for the pitch")]
struct Args {
    /// Pitch config (TOML); defaults are used when omitted
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Where the table is persisted (overrides the config)
    #[arg(long)]
    table: Option<PathBuf>,

    /// Recompute even if a valid table is on disk
    #[arg(long)]
    force: bool,

    /// Compute on a single thread
    #[arg(long)]
    sequential: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        "pitch_grid=debug"
    } else {
        "pitch_grid=info"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &args.config {
        Some(path) => PitchConfig::load(path)?,
        None => PitchConfig::default(),
    };
    if let Some(table) = args.table {
        config.shot_table_path = table;
    }
    if args.sequential {
        config.parallel = false;
    }

    let mut grid = Grid::new(&config)?;
    let store = ShotTableStore::from_config(&config);
    let mut shooting = ShootingPaths::new();

    let start = Instant::now();
    if let Err(e) = shooting.ensure_shot_table(&mut grid, &SweptCorridor, &store, args.force) {
        tracing::warn!("Shot table not persisted to {:?}: {}", store.path(), e);
    }
    let elapsed = start.elapsed();

    let count = |pred: &dyn Fn(&Cell) -> bool| grid.cells().filter(|c| pred(c)).count();

    println!("=== Pitch {}x{} ===", grid.width(), grid.height());
    println!("Cells:            {}", grid.cells().count());
    println!("In bounds:        {}", count(&|c| !c.is_out_of_bounds()));
    println!("Goal cells:       {}", count(&|c| c.is_in_goal()));
    println!("Penalty box:      {}", count(&|c| c.penalty_box() != 0));
    println!("Final third:      {}", count(&|c| c.final_third() != 0));
    println!("Difficult shots:  {}", count(&|c| c.is_difficult_shot()));
    println!();
    println!("=== Shooting paths ({:?}) ===", store.path());
    println!("Shooting origins: {}", count(&|c| c.can_shoot_from()));
    println!(
        "Shooting paths:   {}",
        grid.cells().map(|c| c.shooting_paths().len()).sum::<usize>()
    );
    println!(
        "Heading paths:    {}",
        grid.cells().map(|c| c.heading_paths().len()).sum::<usize>()
    );
    println!("Ready in {:.2?}", elapsed);

    Ok(())
}
