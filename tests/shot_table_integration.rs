//! Integration tests for building, persisting and reloading shooting paths

use std::sync::atomic::{AtomicUsize, Ordering};

use pitch_grid::core::config::PitchConfig;
use pitch_grid::core::error::PitchError;
use pitch_grid::pitch::{
    collect_table, compute_shooting_paths, BallPath, Grid, HexCoord, ShootingPaths,
    ShotTableState, ShotTableStore, SweptCorridor,
};
use tempfile::TempDir;

/// Counts sweeps so tests can tell a load from a rebuild
#[derive(Default)]
struct CountingCorridor {
    sweeps: AtomicUsize,
}

impl BallPath for CountingCorridor {
    fn thick_path(&self, grid: &Grid, from: HexCoord, to: HexCoord, radius: f32) -> Vec<HexCoord> {
        self.sweeps.fetch_add(1, Ordering::Relaxed);
        SweptCorridor.thick_path(grid, from, to, radius)
    }
}

/// Store under a fresh temp dir; the dir is removed when dropped
fn scratch_store() -> (TempDir, ShotTableStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = ShotTableStore::new(temp_dir.path().join("data").join("shooting_paths.json"));
    (temp_dir, store)
}

fn default_grid() -> Grid {
    Grid::new(&PitchConfig::default()).expect("default pitch builds")
}

#[test]
fn test_build_save_reload_gives_equal_table() {
    let (_temp_dir, store) = scratch_store();

    let mut first = default_grid();
    let ball = CountingCorridor::default();
    let mut paths = ShootingPaths::new();
    assert_eq!(paths.state(), ShotTableState::Uninitialized);

    paths.ensure_shot_table(&mut first, &ball, &store, false).unwrap();
    assert_eq!(paths.state(), ShotTableState::Ready);
    assert!(store.exists());
    assert!(ball.sweeps.load(Ordering::Relaxed) > 0);
    let built = collect_table(&first);
    assert!(!built.is_empty());

    // A fresh grid picks the table up from disk without sweeping
    let mut second = default_grid();
    let reloader = CountingCorridor::default();
    ShootingPaths::new()
        .ensure_shot_table(&mut second, &reloader, &store, false)
        .unwrap();
    assert_eq!(reloader.sweeps.load(Ordering::Relaxed), 0);
    assert_eq!(collect_table(&second), built);
}

#[test]
fn test_ready_table_is_not_rebuilt_unless_forced() {
    let (_temp_dir, store) = scratch_store();
    let mut grid = default_grid();
    let ball = CountingCorridor::default();
    let mut paths = ShootingPaths::new();

    paths.ensure_shot_table(&mut grid, &ball, &store, false).unwrap();
    let after_build = ball.sweeps.load(Ordering::Relaxed);

    paths.ensure_shot_table(&mut grid, &ball, &store, false).unwrap();
    assert_eq!(ball.sweeps.load(Ordering::Relaxed), after_build);

    paths.ensure_shot_table(&mut grid, &ball, &store, true).unwrap();
    assert_eq!(ball.sweeps.load(Ordering::Relaxed), after_build * 2);
}

#[test]
fn test_stale_layout_is_rebuilt() {
    let (_temp_dir, store) = scratch_store();

    let thin = PitchConfig {
        ball_radius: 0.05,
        ..PitchConfig::default()
    };
    let mut old_grid = Grid::new(&thin).unwrap();
    ShootingPaths::new()
        .ensure_shot_table(&mut old_grid, &SweptCorridor, &store, false)
        .unwrap();

    let mut grid = default_grid();
    let ball = CountingCorridor::default();
    ShootingPaths::new()
        .ensure_shot_table(&mut grid, &ball, &store, false)
        .unwrap();
    assert!(ball.sweeps.load(Ordering::Relaxed) > 0);

    // The file now belongs to the default layout
    assert_eq!(store.load(&grid).unwrap(), collect_table(&grid));
}

#[test]
fn test_table_respects_sides_and_range() {
    let grid = default_grid();
    let table = compute_shooting_paths(&grid, &SweptCorridor, grid.config().ball_radius);

    for (origin, targets) in &table {
        assert!(origin.x.abs() >= 8 && origin.x.abs() <= 18);
        for (target, path) in targets {
            assert_eq!(origin.x.signum(), target.x.signum(), "{} -> {}", origin, target);
            assert!(origin.distance(target) <= 11);
            assert_eq!(path.last(), Some(target));
            assert!(!path.contains(origin));
        }
    }

    let close = HexCoord::new(16, 0);
    assert!(table.get(&close).is_some_and(|t| t.contains_key(&HexCoord::new(19, 0))));
    let opposite = HexCoord::new(-16, 0);
    assert!(table
        .get(&opposite)
        .is_some_and(|t| t.keys().all(|k| k.x == -19)));
}

#[test]
fn test_parallel_and_sequential_agree() {
    let parallel = default_grid();
    let sequential = Grid::new(&PitchConfig {
        parallel: false,
        ..PitchConfig::default()
    })
    .unwrap();

    let a = compute_shooting_paths(&parallel, &SweptCorridor, 0.1);
    let b = compute_shooting_paths(&sequential, &SweptCorridor, 0.1);
    assert_eq!(a, b);
}

#[test]
fn test_heading_paths_are_short_shooting_paths() {
    let (_temp_dir, store) = scratch_store();
    let mut grid = default_grid();
    ShootingPaths::new()
        .ensure_shot_table(&mut grid, &SweptCorridor, &store, false)
        .unwrap();

    let max = grid.config().max_heading_distance;
    let mut headers = 0;
    for cell in grid.cells() {
        for (target, path) in cell.heading_paths() {
            assert!(cell.coord.distance(target) <= max);
            assert_eq!(cell.shooting_path(*target), Some(path.as_slice()));
            headers += 1;
        }
    }
    assert!(headers > 0);
}

#[test]
fn test_save_failure_is_returned_but_table_is_kept() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let store = ShotTableStore::new(blocker.join("shooting_paths.json"));

    let mut grid = default_grid();
    let mut paths = ShootingPaths::new();
    let result = paths.ensure_shot_table(&mut grid, &SweptCorridor, &store, false);

    assert!(matches!(result, Err(PitchError::IoError(_))));
    assert!(!store.exists());
    assert_eq!(paths.state(), ShotTableState::Ready);
    assert!(!collect_table(&grid).is_empty());
}
