use crate::board::Tile;
use crate::types::{Direction, SpriteExtent, Vec2};

/// Continuous position, facing and moving flag shared by the player and ghosts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Motion {
    pub x: i32,
    pub y: i32,
    pub facing: Direction,
    pub is_moving: bool,
    speed: i32,
}

impl Motion {
    pub fn new(start: Vec2, speed: i32) -> Self {
        Self {
            x: start.x,
            y: start.y,
            facing: Direction::Right,
            is_moving: false,
            speed,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2 {
            x: self.x,
            y: self.y,
        }
    }

    pub fn step(&mut self, dir: Direction) {
        match dir {
            Direction::Neutral => return,
            Direction::Up => self.y -= self.speed,
            Direction::Down => self.y += self.speed,
            Direction::Left => self.x -= self.speed,
            Direction::Right => self.x += self.speed,
        }
        self.facing = dir;
        self.is_moving = true;
    }

    pub fn halt(&mut self) {
        self.is_moving = false;
    }

    pub fn at_tile_center(&self, tile: &Tile) -> bool {
        self.x == tile.x() && self.y == tile.y()
    }

    pub fn teleport(&mut self, to: Vec2) {
        self.x = to.x;
        self.y = to.y;
    }
}

/// Axis-aligned overlap of two sprites centred on `a` and `b`.
pub fn overlaps(a: Vec2, a_extent: SpriteExtent, b: Vec2, b_extent: SpriteExtent) -> bool {
    let reach_x = a_extent.width / 2 + b_extent.width / 2;
    let reach_y = a_extent.height / 2 + b_extent.height / 2;
    (a.x - b.x).abs() < reach_x && (a.y - b.y).abs() < reach_y
}
