use std::collections::BTreeMap;
use std::path::Path;

use crate::constants::TILE_SIZE;
use crate::error::GameError;
use crate::types::{BoardInit, Cell, Direction, GhostKind, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileValue {
    Wall(u8),
    Empty,
    Pickup,
    SuperPickup,
    PlayerSpawn,
    GhostSpawn(GhostKind),
}

impl TileValue {
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            '0' => Some(Self::Empty),
            '1'..='6' => Some(Self::Wall(code as u8 - b'0')),
            '7' => Some(Self::Pickup),
            '8' => Some(Self::SuperPickup),
            'p' => Some(Self::PlayerSpawn),
            other => GhostKind::from_code(other).map(Self::GhostSpawn),
        }
    }

    pub fn code(self) -> char {
        match self {
            Self::Wall(variant) => (b'0' + variant) as char,
            Self::Empty => '0',
            Self::Pickup => '7',
            Self::SuperPickup => '8',
            Self::PlayerSpawn => 'p',
            Self::GhostSpawn(kind) => kind.code(),
        }
    }

    pub fn is_wall(self) -> bool {
        matches!(self, Self::Wall(_))
    }

    pub fn is_pickup(self) -> bool {
        matches!(self, Self::Pickup | Self::SuperPickup)
    }
}

/// One grid cell. `x`/`y` is the center point in board units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    size: i32,
    value: TileValue,
    x: i32,
    y: i32,
}

impl Tile {
    pub fn new(size: i32, value: TileValue, x: i32, y: i32) -> Self {
        Self { size, value, x, y }
    }

    pub fn value(&self) -> TileValue {
        self.value
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn row(&self) -> i32 {
        self.y / self.size
    }

    pub fn col(&self) -> i32 {
        self.x / self.size
    }

    pub fn cell(&self) -> Cell {
        Cell::new(self.row(), self.col())
    }

    pub fn is_wall(&self) -> bool {
        self.value.is_wall()
    }

    pub fn has_pickup(&self) -> bool {
        self.value.is_pickup()
    }

    pub fn is_super(&self) -> bool {
        self.value == TileValue::SuperPickup
    }

    /// Empties a pickup tile and returns what was on it. Other values are left alone.
    fn consume(&mut self) -> Option<TileValue> {
        if !self.has_pickup() {
            return None;
        }
        let eaten = self.value;
        self.value = TileValue::Empty;
        Some(eaten)
    }
}

/// A tile and its four axis neighbours. Neighbours outside the grid are `None`
/// and count as wall.
#[derive(Clone, Copy, Debug)]
pub struct Neighborhood<'a> {
    pub current: &'a Tile,
    pub up: Option<&'a Tile>,
    pub down: Option<&'a Tile>,
    pub left: Option<&'a Tile>,
    pub right: Option<&'a Tile>,
}

impl<'a> Neighborhood<'a> {
    pub fn toward(&self, dir: Direction) -> Option<&'a Tile> {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Neutral => Some(self.current),
        }
    }

    pub fn around(&self) -> [(Direction, Option<&'a Tile>); 4] {
        [
            (Direction::Up, self.up),
            (Direction::Down, self.down),
            (Direction::Left, self.left),
            (Direction::Right, self.right),
        ]
    }

    pub fn is_open(&self, dir: Direction) -> bool {
        dir != Direction::Neutral && self.toward(dir).is_some_and(|tile| !tile.is_wall())
    }
}

#[derive(Clone, Debug)]
pub struct Board {
    grid: Vec<Vec<Tile>>,
    tile_size: i32,
    player_spawns: Vec<Vec2>,
    ghost_spawns: BTreeMap<GhostKind, Vec<Vec2>>,
    ghost_roster: Vec<GhostKind>,
    total_pickups: u32,
    pickups_remaining: u32,
    grid_height: i32,
}

impl Board {
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path).map_err(|error| {
            GameError::map_format(format!("failed to read {}: {error}", path.display()))
        })?;
        Self::parse(&text)
    }

    /// Builds a board from newline-separated rows of tile codes.
    pub fn parse(text: &str) -> Result<Self, GameError> {
        let body = text.trim_end_matches(['\n', '\r']);
        if body.is_empty() {
            return Err(GameError::map_format("map source is empty"));
        }

        let size = TILE_SIZE;
        let mut grid: Vec<Vec<Tile>> = Vec::new();
        let mut player_spawns = Vec::new();
        let mut ghost_spawns: BTreeMap<GhostKind, Vec<Vec2>> = BTreeMap::new();
        let mut ghost_roster = Vec::new();
        let mut total_pickups = 0u32;

        for (row_idx, line) in body.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            let mut row = Vec::with_capacity(line.len());
            for (col_idx, code) in line.chars().enumerate() {
                let Some(value) = TileValue::from_code(code) else {
                    return Err(GameError::map_format(format!(
                        "unknown tile code {code:?} at line {}, column {}",
                        row_idx + 1,
                        col_idx + 1
                    )));
                };
                let x = col_idx as i32 * size + size / 2;
                let y = row_idx as i32 * size + size / 2;
                let center = Vec2 { x, y };
                match value {
                    TileValue::PlayerSpawn => player_spawns.push(center),
                    TileValue::GhostSpawn(kind) => {
                        ghost_spawns.entry(kind).or_default().push(center);
                        ghost_roster.push(kind);
                    }
                    TileValue::Pickup | TileValue::SuperPickup => total_pickups += 1,
                    _ => {}
                }
                row.push(Tile::new(size, value, x, y));
            }
            if let Some(first) = grid.first() {
                let expected = first.len();
                if row.len() != expected {
                    return Err(GameError::map_format(format!(
                        "line {} has {} tiles, expected {expected}",
                        row_idx + 1,
                        row.len()
                    )));
                }
            } else if row.is_empty() {
                return Err(GameError::map_format("first map row is empty"));
            }
            grid.push(row);
        }

        if player_spawns.is_empty() {
            return Err(GameError::map_format("map has no player spawn 'p'"));
        }
        if ghost_spawns.contains_key(&GhostKind::Whim)
            && !ghost_spawns.contains_key(&GhostKind::Chaser)
        {
            return Err(GameError::map_format(
                "whim spawn 'w' requires at least one chaser spawn 'c'",
            ));
        }

        let grid_height = grid.len() as i32 * size;
        Ok(Self {
            grid,
            tile_size: size,
            player_spawns,
            ghost_spawns,
            ghost_roster,
            total_pickups,
            pickups_remaining: total_pickups,
            grid_height,
        })
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn cols(&self) -> usize {
        self.grid[0].len()
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    pub fn grid_height(&self) -> i32 {
        self.grid_height
    }

    pub fn total_pickups(&self) -> u32 {
        self.total_pickups
    }

    pub fn pickups_remaining(&self) -> u32 {
        self.pickups_remaining
    }

    pub fn player_spawn(&self) -> Vec2 {
        self.player_spawns[0]
    }

    pub fn ghost_spawns(&self, kind: GhostKind) -> &[Vec2] {
        self.ghost_spawns
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn ghost_roster(&self) -> &[GhostKind] {
        &self.ghost_roster
    }

    pub fn tile(&self, cell: Cell) -> Option<&Tile> {
        if cell.row < 0 || cell.col < 0 {
            return None;
        }
        self.grid
            .get(cell.row as usize)
            .and_then(|row| row.get(cell.col as usize))
    }

    /// Tile for a cell already known to lie inside the grid, e.g. from [`Board::clamp_cell`].
    fn tile_in_bounds(&self, cell: Cell) -> &Tile {
        &self.grid[cell.row as usize][cell.col as usize]
    }

    pub fn cell_at(&self, pos: Vec2) -> Option<Cell> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let cell = Cell::new(pos.y / self.tile_size, pos.x / self.tile_size);
        self.tile(cell).map(|_| cell)
    }

    pub fn tile_at(&self, pos: Vec2) -> Option<&Tile> {
        self.cell_at(pos).and_then(|cell| self.tile(cell))
    }

    /// The tile containing `pos` plus its four neighbours.
    pub fn neighbors(&self, pos: Vec2) -> Result<Neighborhood<'_>, GameError> {
        let Some(cell) = self.cell_at(pos) else {
            return Err(GameError::OutOfBounds { x: pos.x, y: pos.y });
        };
        Ok(Neighborhood {
            current: self.tile_in_bounds(cell),
            up: self.tile(cell.ahead(Direction::Up, 1)),
            down: self.tile(cell.ahead(Direction::Down, 1)),
            left: self.tile(cell.ahead(Direction::Left, 1)),
            right: self.tile(cell.ahead(Direction::Right, 1)),
        })
    }

    pub fn clamp_cell(&self, cell: Cell) -> Cell {
        Cell::new(
            cell.row.clamp(0, self.rows() as i32 - 1),
            cell.col.clamp(0, self.cols() as i32 - 1),
        )
    }

    pub fn clamped_tile(&self, cell: Cell) -> &Tile {
        self.tile_in_bounds(self.clamp_cell(cell))
    }

    pub fn corner_top_left(&self) -> &Tile {
        &self.grid[0][0]
    }

    pub fn corner_top_right(&self) -> &Tile {
        &self.grid[0][self.cols() - 1]
    }

    pub fn corner_bottom_left(&self) -> &Tile {
        &self.grid[self.rows() - 1][0]
    }

    pub fn corner_bottom_right(&self) -> &Tile {
        &self.grid[self.rows() - 1][self.cols() - 1]
    }

    pub fn consume_pickup(&mut self, cell: Cell) -> Option<TileValue> {
        if cell.row < 0 || cell.col < 0 {
            return None;
        }
        let eaten = self
            .grid
            .get_mut(cell.row as usize)
            .and_then(|row| row.get_mut(cell.col as usize))
            .and_then(Tile::consume)?;
        self.pickups_remaining = self.pickups_remaining.saturating_sub(1);
        Some(eaten)
    }

    pub fn render_rows(&self) -> Vec<String> {
        self.grid
            .iter()
            .map(|row| row.iter().map(|tile| tile.value.code()).collect())
            .collect()
    }

    pub fn to_init(&self) -> BoardInit {
        BoardInit {
            rows: self.rows(),
            cols: self.cols(),
            tile_size: self.tile_size,
            grid_height: self.grid_height,
            tiles: self.render_rows(),
            total_pickups: self.total_pickups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_MAP: &str = "\
3111114
2c780a2
2070702
2p0i0w2
5111116
";

    fn small_board() -> Board {
        Board::parse(SMALL_MAP).expect("small map parses")
    }

    #[test]
    fn wall_codes_are_exactly_one_to_six() {
        for code in ['0', '7', '8', 'p', 'a', 'c', 'i', 'w'] {
            let value = TileValue::from_code(code).expect("known code");
            assert!(!value.is_wall(), "{code} should be walkable");
        }
        for code in ['1', '2', '3', '4', '5', '6'] {
            let value = TileValue::from_code(code).expect("known code");
            assert!(value.is_wall(), "{code} should be a wall");
        }
        assert_eq!(TileValue::from_code('9'), None);
    }

    #[test]
    fn rendering_reproduces_every_source_character() {
        let board = small_board();
        let expected: Vec<String> = SMALL_MAP.lines().map(str::to_string).collect();
        assert_eq!(board.render_rows(), expected);
    }

    #[test]
    fn spawns_are_tile_centers_in_parse_order() {
        let board = small_board();
        assert_eq!(board.player_spawn(), Vec2 { x: 24, y: 56 });
        assert_eq!(board.ghost_spawns(GhostKind::Chaser), &[Vec2 { x: 24, y: 24 }]);
        assert_eq!(board.ghost_spawns(GhostKind::Ambusher), &[Vec2 { x: 88, y: 24 }]);
        assert_eq!(
            board.ghost_roster(),
            &[
                GhostKind::Chaser,
                GhostKind::Ambusher,
                GhostKind::Ignorant,
                GhostKind::Whim
            ]
        );
    }

    #[test]
    fn counts_pickups_and_grid_height() {
        let board = small_board();
        assert_eq!(board.total_pickups(), 4);
        assert_eq!(board.pickups_remaining(), 4);
        assert_eq!(board.rows(), 5);
        assert_eq!(board.cols(), 7);
        assert_eq!(board.grid_height(), 80);
    }

    #[test]
    fn corners_are_derived_from_grid_extent() {
        let board = small_board();
        assert_eq!(board.corner_top_left().cell(), Cell::new(0, 0));
        assert_eq!(board.corner_top_right().cell(), Cell::new(0, 6));
        assert_eq!(board.corner_bottom_left().cell(), Cell::new(4, 0));
        assert_eq!(board.corner_bottom_right().cell(), Cell::new(4, 6));
    }

    #[test]
    fn row_and_col_derive_from_center() {
        let tile = Tile::new(16, TileValue::Empty, 88, 280);
        assert_eq!(tile.row(), 17);
        assert_eq!(tile.col(), 5);
    }

    #[test]
    fn neighbors_resolve_axis_tiles() {
        let board = small_board();
        let hood = board.neighbors(Vec2 { x: 40, y: 40 }).expect("inside grid");
        assert_eq!(hood.current.cell(), Cell::new(2, 2));
        assert_eq!(hood.up.map(Tile::cell), Some(Cell::new(1, 2)));
        assert_eq!(hood.down.map(Tile::cell), Some(Cell::new(3, 2)));
        assert_eq!(hood.left.map(Tile::cell), Some(Cell::new(2, 1)));
        assert_eq!(hood.right.map(Tile::cell), Some(Cell::new(2, 3)));
    }

    #[test]
    fn neighbors_on_the_edge_are_implicit_walls() {
        let board = small_board();
        let hood = board.neighbors(Vec2 { x: 8, y: 8 }).expect("corner is inside grid");
        assert!(hood.up.is_none());
        assert!(hood.left.is_none());
        assert!(!hood.is_open(Direction::Up));
        assert!(!hood.is_open(Direction::Left));
    }

    #[test]
    fn neighbors_outside_grid_is_out_of_bounds() {
        let board = small_board();
        let err = board.neighbors(Vec2 { x: 8, y: 500 }).unwrap_err();
        assert_eq!(err, GameError::OutOfBounds { x: 8, y: 500 });
        assert!(board.neighbors(Vec2 { x: -1, y: 8 }).is_err());
    }

    #[test]
    fn consuming_a_pickup_is_one_way() {
        let mut board = small_board();
        let cell = Cell::new(1, 2);
        assert_eq!(board.consume_pickup(cell), Some(TileValue::Pickup));
        assert_eq!(board.tile(cell).map(Tile::value), Some(TileValue::Empty));
        assert_eq!(board.consume_pickup(cell), None);
        assert_eq!(board.pickups_remaining(), 3);
        assert_eq!(board.consume_pickup(Cell::new(0, 0)), None);
    }

    #[test]
    fn super_pickup_tile_reports_super() {
        let board = small_board();
        let tile = board.tile(Cell::new(1, 3)).expect("in grid");
        assert!(tile.is_super());
        assert!(tile.has_pickup());
    }

    #[test]
    fn clamp_keeps_cells_inside_grid() {
        let board = small_board();
        assert_eq!(board.clamp_cell(Cell::new(-3, 40)), Cell::new(0, 6));
        assert_eq!(board.clamped_tile(Cell::new(9, -1)).cell(), Cell::new(4, 0));
    }

    #[test]
    fn empty_source_is_rejected() {
        assert!(matches!(
            Board::parse(""),
            Err(GameError::MapFormat { .. })
        ));
        assert!(matches!(
            Board::parse("\n\n"),
            Err(GameError::MapFormat { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_map_format_error() {
        let err = Board::load(Path::new("/definitely/not/here/map.txt")).unwrap_err();
        assert!(matches!(err, GameError::MapFormat { .. }));
    }

    #[test]
    fn unknown_codes_and_ragged_rows_are_rejected() {
        assert!(Board::parse("111\n1x1\n1p1\n").is_err());
        assert!(Board::parse("111\n1p\n111\n").is_err());
    }

    #[test]
    fn map_needs_player_spawn_and_chaser_for_whim() {
        assert!(Board::parse("111\n101\n111\n").is_err());
        let err = Board::parse("1111\n1pw1\n1111\n").unwrap_err();
        assert!(matches!(err, GameError::MapFormat { .. }));
        assert!(Board::parse("11111\n1pwc1\n11111\n").is_ok());
    }

    #[test]
    fn bundled_map_parses() {
        let board = Board::parse(include_str!("../maps/map.txt")).expect("bundled map parses");
        assert_eq!((board.rows(), board.cols()), (10, 19));
        assert_eq!(board.total_pickups(), 96);
        assert_eq!(
            board.ghost_roster(),
            &[
                GhostKind::Chaser,
                GhostKind::Ambusher,
                GhostKind::Whim,
                GhostKind::Ignorant
            ]
        );
        assert_eq!(board.grid_height(), 160);
    }

    #[test]
    fn windows_line_endings_parse() {
        let board = Board::parse("111\r\n1p1\r\n111\r\n").expect("crlf map parses");
        assert_eq!(board.rows(), 3);
        assert_eq!(board.cols(), 3);
    }
}
