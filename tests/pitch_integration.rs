//! Integration tests for pitch layout, movement and danger queries

use pitch_grid::core::config::PitchConfig;
use pitch_grid::core::types::{Side, TokenId};
use pitch_grid::pitch::{
    defender_zone_of_influence, find_path, is_path_dangerous, reachable, savable_hexes, Grid,
    HexCoord, Motion,
};

fn default_grid() -> Grid {
    Grid::new(&PitchConfig::default()).expect("default pitch builds")
}

#[test]
fn test_default_pitch_landmarks() {
    let grid = default_grid();

    let kickoff = grid.cell(HexCoord::new(0, 0)).unwrap();
    assert!(kickoff.is_kickoff());
    assert!(!kickoff.is_out_of_bounds());

    assert!(grid.cell(HexCoord::new(19, 0)).unwrap().is_out_of_bounds());
    assert_eq!(grid.cell(HexCoord::new(11, 0)).unwrap().penalty_box(), 0);
    assert_eq!(grid.cell(HexCoord::new(14, 0)).unwrap().penalty_box(), 1);
    assert_eq!(grid.cell(HexCoord::new(-14, 0)).unwrap().penalty_box(), -1);
}

#[test]
fn test_pitch_is_mirror_symmetric_in_x() {
    let grid = default_grid();
    for cell in grid.cells() {
        let mirror = HexCoord::new(-cell.coord.x, cell.coord.z);
        let Some(other) = grid.cell(mirror) else {
            continue;
        };
        // Same parity, so the z rules must agree exactly
        assert_eq!(cell.is_out_of_bounds(), other.is_out_of_bounds(), "{}", cell.coord);
        assert_eq!(cell.penalty_box(), -other.penalty_box(), "{}", cell.coord);
        assert_eq!(cell.flags.in_goal, -other.flags.in_goal, "{}", cell.coord);
    }
}

#[test]
fn test_interior_cells_have_six_neighbors() {
    let grid = default_grid();
    for coord in [HexCoord::new(0, 0), HexCoord::new(5, -3), HexCoord::new(-7, 8)] {
        let neighbors = grid.neighbors_of(coord);
        assert_eq!(neighbors.len(), 6);
        for n in neighbors {
            assert_eq!(coord.distance(&n), 1);
        }
    }
}

#[test]
fn test_neighbors_stop_at_touchline_but_reach_goal() {
    let grid = default_grid();

    let touchline = grid.neighbors_of(HexCoord::new(0, 12));
    assert!(touchline.len() < 6);
    assert!(!touchline.contains(&HexCoord::new(0, 13)));

    let goalmouth = grid.neighbors_of(HexCoord::new(18, 0));
    assert!(goalmouth.contains(&HexCoord::new(19, 0)));
}

#[test]
fn test_run_around_a_defensive_line() {
    let mut grid = default_grid();
    let runner = TokenId::new();
    grid.place_token(runner, Side::Attacker, HexCoord::new(-2, 0)).unwrap();

    let line: Vec<HexCoord> = (-2..=2).map(|z| HexCoord::new(0, z)).collect();
    for coord in &line {
        grid.place_token(TokenId::new(), Side::Defender, *coord).unwrap();
    }

    let target = HexCoord::new(2, 0);
    let path = find_path(&grid, HexCoord::new(-2, 0), target, false);
    assert_eq!(path.last(), Some(&target));
    assert!(path.iter().all(|c| !line.contains(c)));
    assert!(path.len() as u32 > HexCoord::new(-2, 0).distance(&target));

    let reach = reachable(&grid, HexCoord::new(-2, 0), 2);
    assert!(reach.cells.iter().all(|c| !line.contains(c)));
    assert_eq!(reach.distance_to(HexCoord::new(-2, 0)), Some(0));
}

#[test]
fn test_pass_through_defender_zone() {
    let mut grid = default_grid();
    grid.place_token(TokenId::new(), Side::Defender, HexCoord::new(4, 0)).unwrap();
    let zone = defender_zone_of_influence(&grid);

    let pass = vec![HexCoord::new(2, 0), HexCoord::new(3, 0), HexCoord::new(3, 1)];
    assert!(is_path_dangerous(&grid, &pass, &zone, false));

    grid.place_token(TokenId::new(), Side::Attacker, HexCoord::new(3, 0)).unwrap();
    assert!(!is_path_dangerous(&grid, &pass, &zone, false));

    let safe = vec![HexCoord::new(1, 8), HexCoord::new(2, 8)];
    assert!(!is_path_dangerous(&grid, &safe, &zone, false));
}

#[test]
fn test_keeper_covers_goal_mouth() {
    let grid = default_grid();
    let hexes = savable_hexes(&grid, HexCoord::new(-18, 0));
    assert_eq!(hexes.len(), 7);
    let zs: Vec<i32> = hexes.iter().map(|c| c.z).collect();
    assert_eq!(zs, vec![-3, -2, -1, 0, 1, 2, 3]);
}

#[test]
fn test_token_walks_its_path() {
    let grid = default_grid();
    let start = HexCoord::new(-5, 2);
    let target = HexCoord::new(-1, -1);

    let mut route = vec![start];
    route.extend(find_path(&grid, start, target, false));
    let motion = Motion::along(&grid, &route, 2.0).unwrap();

    assert_eq!(motion.cell_at(0.0), start);
    assert!(motion.is_finished(motion.duration()));
    assert_eq!(motion.cell_at(motion.duration() + 1.0), target);
}

#[test]
fn test_moving_token_updates_occupancy() {
    let mut grid = default_grid();
    let token = TokenId::new();
    grid.place_token(token, Side::Attacker, HexCoord::new(3, 3)).unwrap();
    grid.place_token(token, Side::Attacker, HexCoord::new(3, 4)).unwrap();

    assert!(!grid.cell(HexCoord::new(3, 3)).unwrap().is_occupied());
    assert!(grid.cell(HexCoord::new(3, 4)).unwrap().is_attacker_occupied());
    assert_eq!(grid.token_position(token), Some(HexCoord::new(3, 4)));
}

#[test]
fn test_small_pitch_from_config() {
    let config = PitchConfig {
        width: 10,
        height: 8,
        ..PitchConfig::default()
    };
    let grid = Grid::new(&config).unwrap();
    assert_eq!(grid.cells().count(), 80);
    assert!(grid.cell(HexCoord::new(-5, -4)).is_some());
    assert!(grid.cell(HexCoord::new(5, 0)).is_none());
}
