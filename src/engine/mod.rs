use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::board::Board;
use crate::config::{EngineOptions, SessionConfig};
use crate::error::GameError;
use crate::types::{
    BoardInit, Direction, GameStatus, GhostKind, Mode, RuntimeEvent, SessionSummary, Snapshot,
    Vec2,
};

pub mod ghost;
pub mod mode_clock;
pub mod motion;
pub mod pathing;
pub mod player;
pub mod strategy;

use self::ghost::{Ghost, GhostFrame, GhostOutcome};
use self::mode_clock::{ClockEvent, ModeClock};
use self::player::Player;
use self::strategy::GhostStrategy;

#[derive(Clone, Debug)]
pub struct GameEngine {
    board: Board,
    player: Player,
    ghosts: Vec<Ghost>,
    clock: ModeClock,
    rng: StdRng,
    events: Vec<RuntimeEvent>,
    status: GameStatus,
    frame: u64,
    debug: bool,
    ghosts_eaten: u32,
    times_caught: u32,
}

impl GameEngine {
    pub fn new(
        board: Board,
        config: &SessionConfig,
        options: EngineOptions,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let clock = ModeClock::new(
            config.mode_lengths.clone(),
            config.frightened_length,
            options.frames_per_second,
        )?;
        let ghosts = spawn_ghosts(&board, config.speed, &options)?;
        let player = Player::new(
            board.player_spawn(),
            config.speed,
            config.lives,
            options.player_extent,
        );
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        info!(
            rows = board.rows(),
            cols = board.cols(),
            ghosts = ghosts.len(),
            pickups = board.total_pickups(),
            lives = config.lives,
            "session started"
        );

        Ok(Self {
            board,
            player,
            ghosts,
            clock,
            rng,
            events: Vec::new(),
            status: GameStatus::Playing,
            frame: 0,
            debug: options.debug,
            ghosts_eaten: 0,
            times_caught: 0,
        })
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_ended(&self) -> bool {
        self.status != GameStatus::Playing
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn mode(&self) -> Mode {
        self.clock.mode()
    }

    pub fn is_frightened(&self) -> bool {
        self.clock.is_frightened()
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn board_init(&self) -> BoardInit {
        self.board.to_init()
    }

    pub fn step(&mut self, frame: u64, input: Option<Direction>) -> Result<(), GameError> {
        if self.is_ended() {
            return Ok(());
        }
        self.frame = frame;

        if let Some(eaten) = self.player.update(&mut self.board, input, frame)? {
            let (row, col) = (eaten.cell.row, eaten.cell.col);
            debug!(row, col, is_super = eaten.is_super, "pickup eaten");
            if eaten.is_super {
                self.events.push(RuntimeEvent::SuperPickupEaten { row, col });
                if self.clock.frighten(frame) {
                    let until_frame = self.clock.frightened_deadline();
                    info!(frame, until_frame, "ghosts frightened");
                    self.events
                        .push(RuntimeEvent::FrightenedStarted { until_frame });
                }
            } else {
                self.events.push(RuntimeEvent::PickupEaten { row, col });
            }
        }

        let frightened = self.clock.is_frightened();
        let player_pos = self.player.position();
        let player_extent = self.player.extent();
        let any_collision = self
            .ghosts
            .iter()
            .any(|ghost| ghost.collides_with(player_pos, player_extent));
        let room_reset = any_collision && !frightened;
        if room_reset {
            self.player.lose_life();
            self.times_caught += 1;
            let lives_remaining = self.player.lives_remaining();
            info!(frame, lives_remaining, "player caught");
            self.events
                .push(RuntimeEvent::PlayerCaught { lives_remaining });
        }

        match self.clock.tick(frame) {
            Some(ClockEvent::ModeChanged(mode)) => {
                info!(frame, ?mode, "mode changed");
                self.events.push(RuntimeEvent::ModeChanged { mode });
            }
            Some(ClockEvent::FrightenedEnded) => {
                info!(frame, "frightened ended");
                self.events.push(RuntimeEvent::FrightenedEnded);
            }
            None => {}
        }

        self.update_ghosts(room_reset)?;
        self.update_status();
        Ok(())
    }

    fn update_ghosts(&mut self, room_reset: bool) -> Result<(), GameError> {
        let positions: Vec<Vec2> = self.ghosts.iter().map(Ghost::position).collect();
        let base = GhostFrame {
            board: &self.board,
            mode: self.clock.mode(),
            frightened: self.clock.is_frightened(),
            player_pos: self.player.position(),
            player_facing: self.player.facing(),
            player_extent: self.player.extent(),
            chaser_pos: None,
            any_collision: room_reset,
        };

        for (index, ghost) in self.ghosts.iter_mut().enumerate() {
            let chaser_pos = match ghost.strategy() {
                GhostStrategy::Whim { chaser } => positions.get(chaser).copied(),
                _ => None,
            };
            let frame = GhostFrame { chaser_pos, ..base };
            if ghost.update(&frame, &mut self.rng)? == GhostOutcome::Eaten {
                let kind = ghost.kind();
                debug!(ghost_index = index, ?kind, "ghost eaten");
                self.ghosts_eaten += 1;
                self.events.push(RuntimeEvent::GhostEaten {
                    ghost_index: index,
                    kind,
                });
            }
        }
        Ok(())
    }

    fn update_status(&mut self) {
        // The win is decided during the player update, before any collision.
        let status = if self.player.has_won() {
            GameStatus::Won
        } else if self.player.lives_remaining() < 0 {
            GameStatus::Lost
        } else {
            GameStatus::Playing
        };
        if status != GameStatus::Playing {
            info!(frame = self.frame, ?status, "game over");
            self.status = status;
            self.events.push(RuntimeEvent::GameOver { status });
        }
    }

    pub fn build_snapshot(&mut self, include_events: bool) -> Snapshot {
        let frightened = self.clock.is_frightened();
        let snapshot = Snapshot {
            frame: self.frame,
            status: self.status,
            mode: self.clock.mode(),
            frightened,
            pickups_remaining: self.board.pickups_remaining(),
            player: self.player.view(),
            ghosts: self
                .ghosts
                .iter()
                .map(|ghost| ghost.view(frightened, self.debug))
                .collect(),
            events: if include_events {
                self.events.clone()
            } else {
                Vec::new()
            },
        };
        if include_events {
            self.events.clear();
        }
        snapshot
    }

    pub fn build_summary(&self) -> SessionSummary {
        SessionSummary {
            frames: self.frame,
            status: self.status,
            lives_remaining: self.player.lives_remaining(),
            pickups_eaten: self.player.pickups_eaten(),
            total_pickups: self.board.total_pickups(),
            ghosts_eaten: self.ghosts_eaten,
            times_caught: self.times_caught,
        }
    }
}

fn spawn_ghosts(
    board: &Board,
    speed: i32,
    options: &EngineOptions,
) -> Result<Vec<Ghost>, GameError> {
    let roster = board.ghost_roster();
    let first_chaser = roster.iter().position(|kind| *kind == GhostKind::Chaser);
    let mut seen = [0usize; GhostKind::ALL.len()];
    let mut ghosts = Vec::with_capacity(roster.len());

    for &kind in roster {
        let slot = GhostKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default();
        let spawn_index = seen[slot];
        seen[slot] += 1;

        let strategy = match kind {
            GhostKind::Chaser => GhostStrategy::Chaser,
            GhostKind::Ambusher => GhostStrategy::Ambusher,
            GhostKind::Ignorant => GhostStrategy::Ignorant,
            GhostKind::Whim => GhostStrategy::Whim {
                chaser: first_chaser.ok_or_else(|| {
                    GameError::map_format("whim spawn 'w' requires at least one chaser spawn 'c'")
                })?,
            },
        };
        let spawn = board
            .ghost_spawns(kind)
            .get(spawn_index)
            .copied()
            .ok_or_else(|| GameError::map_format(format!("missing spawn for {kind:?}")))?;
        ghosts.push(Ghost::new(
            strategy,
            spawn_index,
            spawn,
            speed,
            options.ghost_extent,
        ));
    }
    Ok(ghosts)
}
