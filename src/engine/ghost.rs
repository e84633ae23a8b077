use rand::Rng;

use super::motion::{overlaps, Motion};
use super::pathing::{available_neighbors, choose_next_tile, next_direction_to};
use super::strategy::{GhostStrategy, TargetContext};
use crate::board::{Board, Tile};
use crate::error::GameError;
use crate::types::{Cell, Direction, GhostKind, GhostView, Mode, SpriteExtent, Vec2};

#[derive(Clone, Copy, Debug)]
pub struct GhostFrame<'a> {
    pub board: &'a Board,
    pub mode: Mode,
    pub frightened: bool,
    pub player_pos: Vec2,
    pub player_facing: Direction,
    pub player_extent: SpriteExtent,
    pub chaser_pos: Option<Vec2>,
    pub any_collision: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GhostOutcome {
    Moved,
    Eaten,
    Reset,
}

#[derive(Clone, Debug)]
pub struct Ghost {
    strategy: GhostStrategy,
    spawn_index: usize,
    spawn: Vec2,
    pub motion: Motion,
    visible: bool,
    extent: SpriteExtent,
    last_target: Option<Cell>,
}

impl Ghost {
    pub fn new(
        strategy: GhostStrategy,
        spawn_index: usize,
        spawn: Vec2,
        speed: i32,
        extent: SpriteExtent,
    ) -> Self {
        Self {
            strategy,
            spawn_index,
            spawn,
            motion: Motion::new(spawn, speed),
            visible: true,
            extent,
            last_target: None,
        }
    }

    pub fn kind(&self) -> GhostKind {
        self.strategy.kind()
    }

    pub fn strategy(&self) -> GhostStrategy {
        self.strategy
    }

    pub fn spawn_index(&self) -> usize {
        self.spawn_index
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn position(&self) -> Vec2 {
        self.motion.position()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn last_target(&self) -> Option<Cell> {
        self.last_target
    }

    pub fn collides_with(&self, pos: Vec2, extent: SpriteExtent) -> bool {
        self.visible && overlaps(pos, extent, self.position(), self.extent)
    }

    pub fn back_to_start(&mut self) {
        self.motion.teleport(self.spawn);
    }

    pub fn update<R: Rng>(
        &mut self,
        frame: &GhostFrame<'_>,
        rng: &mut R,
    ) -> Result<GhostOutcome, GameError> {
        if !frame.frightened && !self.visible {
            self.visible = true;
        }

        let hood = frame.board.neighbors(self.position())?;
        let available = available_neighbors(&hood, self.motion.facing, self.motion.is_moving);
        let target = self.strategy.target_tile(&TargetContext {
            board: frame.board,
            mode: frame.mode,
            player_pos: frame.player_pos,
            player_facing: frame.player_facing,
            ghost_pos: self.position(),
            chaser_pos: frame.chaser_pos,
        });
        let next = choose_next_tile(&available, target, frame.frightened, rng);
        let next_dir = next_direction_to(hood.current, next);
        self.last_target = if frame.frightened { next } else { target }.map(Tile::cell);

        // An eaten ghost waits at its spawn until the frightened window closes.
        if self.visible {
            if self.motion.at_tile_center(hood.current) {
                self.motion.step(next_dir);
            } else {
                self.motion.step(self.motion.facing);
            }
        }

        if frame.frightened {
            if self.collides_with(frame.player_pos, frame.player_extent) {
                self.back_to_start();
                self.visible = false;
                return Ok(GhostOutcome::Eaten);
            }
        } else if frame.any_collision {
            self.back_to_start();
            self.visible = true;
            return Ok(GhostOutcome::Reset);
        }
        Ok(GhostOutcome::Moved)
    }

    pub fn view(&self, frightened: bool, debug: bool) -> GhostView {
        GhostView {
            kind: self.kind(),
            x: self.motion.x,
            y: self.motion.y,
            dir: self.motion.facing,
            frightened,
            visible: self.visible,
            target: if debug { self.last_target } else { None },
        }
    }
}
