use super::motion::Motion;
use crate::board::{Board, Neighborhood, TileValue};
use crate::constants::MOUTH_PERIOD_FRAMES;
use crate::error::GameError;
use crate::types::{Cell, Direction, PlayerView, SpriteExtent, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickupEaten {
    pub cell: Cell,
    pub is_super: bool,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub motion: Motion,
    spawn: Vec2,
    lives_remaining: i32,
    pickups_eaten: u32,
    queued: Direction,
    awaiting_input: bool,
    has_won: bool,
    extent: SpriteExtent,
    mouth_open: bool,
}

impl Player {
    pub fn new(spawn: Vec2, speed: i32, lives: i32, extent: SpriteExtent) -> Self {
        Self {
            motion: Motion::new(spawn, speed),
            spawn,
            lives_remaining: lives,
            pickups_eaten: 0,
            queued: Direction::Neutral,
            awaiting_input: true,
            has_won: false,
            extent,
            mouth_open: true,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.motion.position()
    }

    pub fn facing(&self) -> Direction {
        self.motion.facing
    }

    pub fn extent(&self) -> SpriteExtent {
        self.extent
    }

    pub fn lives_remaining(&self) -> i32 {
        self.lives_remaining
    }

    pub fn pickups_eaten(&self) -> u32 {
        self.pickups_eaten
    }

    pub fn queued(&self) -> Direction {
        self.queued
    }

    pub fn has_won(&self) -> bool {
        self.has_won
    }

    pub fn is_awaiting_input(&self) -> bool {
        self.awaiting_input
    }

    pub fn update(
        &mut self,
        board: &mut Board,
        input: Option<Direction>,
        frame: u64,
    ) -> Result<Option<PickupEaten>, GameError> {
        if frame % MOUTH_PERIOD_FRAMES == 0 {
            self.mouth_open = !self.mouth_open;
        }
        if let Some(dir) = input {
            self.queued = dir;
            if dir != Direction::Neutral {
                self.awaiting_input = false;
            }
        }

        let mut eaten = None;
        if !self.awaiting_input {
            let hood = board.neighbors(self.position())?;
            let at_center = self.motion.at_tile_center(hood.current);
            let dir = self.resolve_direction(&hood, at_center);
            if dir == Direction::Neutral {
                self.motion.halt();
            } else {
                self.motion.step(dir);
            }
            eaten = self.eat_pickup(board);
        }

        if self.pickups_eaten == board.total_pickups() {
            self.has_won = true;
        }
        Ok(eaten)
    }

    fn resolve_direction(&self, hood: &Neighborhood<'_>, at_center: bool) -> Direction {
        let facing = self.motion.facing;
        let queued_ok = hood.is_open(self.queued);
        let facing_ok = hood.is_open(facing);
        // Turning a corner waits for the tile center; reversing does not.
        let gated = self.queued.is_perpendicular_to(facing) && !at_center;

        match (queued_ok, facing_ok) {
            (true, _) if gated => facing,
            (true, _) => self.queued,
            (false, true) if self.motion.is_moving => facing,
            (false, true) => Direction::Neutral,
            (false, false) if at_center => Direction::Neutral,
            // Finish the approach to the center of a dead-end tile.
            (false, false) => facing,
        }
    }

    /// Consumes the pickup under the player, only when exactly on its center.
    fn eat_pickup(&mut self, board: &mut Board) -> Option<PickupEaten> {
        let tile = board.tile_at(self.position())?;
        if !tile.has_pickup() || !self.motion.at_tile_center(tile) {
            return None;
        }
        let cell = tile.cell();
        let value = board.consume_pickup(cell)?;
        self.pickups_eaten += 1;
        Some(PickupEaten {
            cell,
            is_super: value == TileValue::SuperPickup,
        })
    }

    pub fn lose_life(&mut self) {
        self.lives_remaining -= 1;
        self.back_to_start();
    }

    pub fn back_to_start(&mut self) {
        self.motion.teleport(self.spawn);
        self.motion.halt();
        self.motion.facing = Direction::Right;
        self.queued = Direction::Neutral;
        self.awaiting_input = true;
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            x: self.motion.x,
            y: self.motion.y,
            dir: self.motion.facing,
            sprite: if self.mouth_open {
                self.motion.facing
            } else {
                Direction::Neutral
            },
            moving: self.motion.is_moving,
            lives_remaining: self.lives_remaining,
            pickups_eaten: self.pickups_eaten,
            has_won: self.has_won,
        }
    }
}
