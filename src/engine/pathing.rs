use rand::Rng;

use crate::board::{Neighborhood, Tile};
use crate::types::{Cell, Direction};

pub fn distance(a: Cell, b: Cell) -> f64 {
    let d_row = f64::from(a.row - b.row);
    let d_col = f64::from(a.col - b.col);
    (d_row * d_row + d_col * d_col).sqrt()
}

/// Non-wall neighbours in scan order (up, down, left, right).
///
/// While moving, the tile behind the agent is excluded unless it is the only
/// way out of a dead end.
pub fn available_neighbors<'a>(
    hood: &Neighborhood<'a>,
    facing: Direction,
    is_moving: bool,
) -> Vec<&'a Tile> {
    let behind = facing.opposite();
    let mut out: Vec<&'a Tile> = hood
        .around()
        .into_iter()
        .filter(|(dir, _)| !(is_moving && *dir == behind))
        .filter_map(|(_, tile)| tile.filter(|tile| !tile.is_wall()))
        .collect();

    if out.is_empty() && behind != Direction::Neutral {
        if let Some(tile) = hood.toward(behind).filter(|tile| !tile.is_wall()) {
            out.push(tile);
        }
    }
    out
}

/// Greedy step toward `target`: nearest tile by Euclidean grid distance, first
/// one winning exact ties. When frightened the pick is uniform instead.
pub fn choose_next_tile<'a, R: Rng>(
    available: &[&'a Tile],
    target: Option<&Tile>,
    frightened: bool,
    rng: &mut R,
) -> Option<&'a Tile> {
    let target = target?;
    if available.is_empty() {
        return None;
    }
    if frightened {
        return Some(available[rng.random_range(0..available.len())]);
    }

    let goal = target.cell();
    let mut best: Option<(&'a Tile, f64)> = None;
    for &tile in available {
        let d = distance(goal, tile.cell());
        match best {
            Some((_, shortest)) if d >= shortest => {}
            _ => best = Some((tile, d)),
        }
    }
    best.map(|(tile, _)| tile)
}

/// Direction from one tile to an adjacent one, comparing rows before columns.
pub fn next_direction_to(from: &Tile, to: Option<&Tile>) -> Direction {
    let Some(to) = to else {
        return Direction::Neutral;
    };
    if to.row() > from.row() {
        Direction::Down
    } else if to.row() < from.row() {
        Direction::Up
    } else if to.col() > from.col() {
        Direction::Right
    } else if to.col() < from.col() {
        Direction::Left
    } else {
        Direction::Neutral
    }
}
