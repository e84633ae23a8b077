use crate::board::{Board, Tile};
use crate::constants::{AMBUSH_LOOKAHEAD_TILES, IGNORANT_RADIUS_TILES, WHIM_LOOKAHEAD_TILES};
use crate::types::{Cell, Direction, GhostKind, Mode, Vec2};

#[derive(Clone, Copy, Debug)]
pub struct TargetContext<'a> {
    pub board: &'a Board,
    pub mode: Mode,
    pub player_pos: Vec2,
    pub player_facing: Direction,
    pub ghost_pos: Vec2,
    pub chaser_pos: Option<Vec2>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GhostStrategy {
    Chaser,
    Ambusher,
    Ignorant,
    Whim { chaser: usize },
}

impl GhostStrategy {
    pub fn kind(&self) -> GhostKind {
        match self {
            Self::Chaser => GhostKind::Chaser,
            Self::Ambusher => GhostKind::Ambusher,
            Self::Ignorant => GhostKind::Ignorant,
            Self::Whim { .. } => GhostKind::Whim,
        }
    }

    pub fn scatter_corner<'b>(&self, board: &'b Board) -> &'b Tile {
        match self {
            Self::Chaser => board.corner_top_left(),
            Self::Ambusher => board.corner_top_right(),
            Self::Ignorant => board.corner_bottom_left(),
            Self::Whim { .. } => board.corner_bottom_right(),
        }
    }

    pub fn target_tile<'b>(&self, ctx: &TargetContext<'b>) -> Option<&'b Tile> {
        let board = ctx.board;
        if ctx.mode == Mode::Scatter {
            return Some(self.scatter_corner(board));
        }
        let player_tile = board.tile_at(ctx.player_pos)?;
        match self {
            Self::Chaser => Some(player_tile),
            Self::Ambusher => {
                let ahead = player_tile
                    .cell()
                    .ahead(ctx.player_facing, AMBUSH_LOOKAHEAD_TILES);
                Some(board.clamped_tile(ahead))
            }
            Self::Ignorant => {
                let dx = f64::from(ctx.player_pos.x - ctx.ghost_pos.x);
                let dy = f64::from(ctx.player_pos.y - ctx.ghost_pos.y);
                let radius = f64::from(IGNORANT_RADIUS_TILES * board.tile_size());
                if (dx * dx + dy * dy).sqrt() > radius {
                    Some(player_tile)
                } else {
                    Some(self.scatter_corner(board))
                }
            }
            Self::Whim { .. } => {
                let chaser = board.cell_at(ctx.chaser_pos?)?;
                let ahead = whim_lookahead(board, player_tile.cell(), ctx.player_facing);
                let reflected = Cell::new(
                    2 * ahead.row - chaser.row,
                    2 * ahead.col - chaser.col,
                );
                Some(board.clamped_tile(reflected))
            }
        }
    }
}

// Row and column 0 count as outside when looking up or left.
fn whim_lookahead(board: &Board, from: Cell, facing: Direction) -> Cell {
    let ahead = from.ahead(facing, WHIM_LOOKAHEAD_TILES);
    let in_range = match facing {
        Direction::Up => ahead.row > 0,
        Direction::Left => ahead.col > 0,
        Direction::Down => ahead.row < board.rows() as i32,
        Direction::Right => ahead.col < board.cols() as i32,
        Direction::Neutral => true,
    };
    if in_range {
        ahead
    } else {
        from
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Walled `rows` x `cols` room with the player spawn at (1,1).
    fn open_board(rows: usize, cols: usize) -> Board {
        let mut lines = Vec::new();
        for row in 0..rows {
            let line: String = (0..cols)
                .map(|col| {
                    if row == 0 || col == 0 || row == rows - 1 || col == cols - 1 {
                        '1'
                    } else if row == 1 && col == 1 {
                        'p'
                    } else {
                        '0'
                    }
                })
                .collect();
            lines.push(line);
        }
        Board::parse(&lines.join("\n")).expect("open board parses")
    }

    fn center(row: i32, col: i32) -> Vec2 {
        Vec2 {
            x: col * 16 + 8,
            y: row * 16 + 8,
        }
    }

    fn ctx(board: &Board, mode: Mode, player: Cell, facing: Direction) -> TargetContext<'_> {
        TargetContext {
            board,
            mode,
            player_pos: center(player.row, player.col),
            player_facing: facing,
            ghost_pos: center(1, 1),
            chaser_pos: Some(center(1, 1)),
        }
    }

    fn target(strategy: GhostStrategy, ctx: &TargetContext<'_>) -> Option<Cell> {
        strategy.target_tile(ctx).map(Tile::cell)
    }

    #[test]
    fn scatter_targets_fixed_corners_regardless_of_player() {
        let board = open_board(20, 12);
        for (player, facing) in [
            (Cell::new(17, 5), Direction::Right),
            (Cell::new(2, 9), Direction::Up),
        ] {
            let ctx = ctx(&board, Mode::Scatter, player, facing);
            assert_eq!(target(GhostStrategy::Chaser, &ctx), Some(Cell::new(0, 0)));
            assert_eq!(target(GhostStrategy::Ambusher, &ctx), Some(Cell::new(0, 11)));
            assert_eq!(target(GhostStrategy::Ignorant, &ctx), Some(Cell::new(19, 0)));
            assert_eq!(
                target(GhostStrategy::Whim { chaser: 0 }, &ctx),
                Some(Cell::new(19, 11))
            );
        }
    }

    #[test]
    fn chaser_targets_player_tile() {
        let board = open_board(20, 12);
        let ctx = ctx(&board, Mode::Chase, Cell::new(7, 3), Direction::Left);
        assert_eq!(target(GhostStrategy::Chaser, &ctx), Some(Cell::new(7, 3)));
    }

    #[test]
    fn ambusher_leads_the_player_by_four_tiles() {
        let board = open_board(20, 12);
        let ctx = ctx(&board, Mode::Chase, Cell::new(17, 5), Direction::Right);
        assert_eq!(target(GhostStrategy::Ambusher, &ctx), Some(Cell::new(17, 9)));

        let ctx = TargetContext {
            player_facing: Direction::Up,
            ..ctx
        };
        assert_eq!(target(GhostStrategy::Ambusher, &ctx), Some(Cell::new(13, 5)));
    }

    #[test]
    fn ambusher_clamps_to_grid_edge() {
        let board = open_board(20, 12);
        let ctx = ctx(&board, Mode::Chase, Cell::new(17, 9), Direction::Right);
        assert_eq!(target(GhostStrategy::Ambusher, &ctx), Some(Cell::new(17, 11)));

        let ctx = TargetContext {
            player_pos: center(2, 4),
            player_facing: Direction::Up,
            ..ctx
        };
        assert_eq!(target(GhostStrategy::Ambusher, &ctx), Some(Cell::new(0, 4)));
    }

    #[test]
    fn ambusher_without_facing_targets_player() {
        let board = open_board(20, 12);
        let ctx = ctx(&board, Mode::Chase, Cell::new(8, 8), Direction::Neutral);
        assert_eq!(target(GhostStrategy::Ambusher, &ctx), Some(Cell::new(8, 8)));
    }

    #[test]
    fn ignorant_chases_from_afar_and_retreats_up_close() {
        let board = open_board(20, 12);
        let far = TargetContext {
            ghost_pos: center(1, 1),
            ..ctx(&board, Mode::Chase, Cell::new(17, 5), Direction::Right)
        };
        assert_eq!(target(GhostStrategy::Ignorant, &far), Some(Cell::new(17, 5)));

        // Exactly eight tiles away still counts as close.
        let edge = TargetContext {
            ghost_pos: center(9, 5),
            ..far
        };
        assert_eq!(target(GhostStrategy::Ignorant, &edge), Some(Cell::new(19, 0)));

        let near = TargetContext {
            ghost_pos: center(15, 5),
            ..far
        };
        assert_eq!(target(GhostStrategy::Ignorant, &near), Some(Cell::new(19, 0)));
    }

    #[test]
    fn whim_reflects_through_chaser() {
        let board = open_board(20, 12);
        // Two ahead of (10,4) facing right is (10,6); chaser at (8,5) reflects to (12,7).
        let ctx = TargetContext {
            chaser_pos: Some(center(8, 5)),
            ..ctx(&board, Mode::Chase, Cell::new(10, 4), Direction::Right)
        };
        assert_eq!(
            target(GhostStrategy::Whim { chaser: 0 }, &ctx),
            Some(Cell::new(12, 7))
        );
    }

    #[test]
    fn whim_target_clamps_to_grid() {
        let board = open_board(20, 12);
        let ctx = TargetContext {
            chaser_pos: Some(center(18, 1)),
            ..ctx(&board, Mode::Chase, Cell::new(3, 8), Direction::Right)
        };
        // Ahead (3,10), reflected (-12,19) clamps to the top-right corner.
        assert_eq!(
            target(GhostStrategy::Whim { chaser: 0 }, &ctx),
            Some(Cell::new(0, 11))
        );
    }

    #[test]
    fn whim_looks_from_player_tile_when_two_ahead_leaves_grid() {
        let board = open_board(5, 8);
        let ctx = TargetContext {
            chaser_pos: Some(center(2, 6)),
            ..ctx(&board, Mode::Chase, Cell::new(2, 6), Direction::Right)
        };
        assert_eq!(
            target(GhostStrategy::Whim { chaser: 0 }, &ctx),
            Some(Cell::new(2, 6))
        );

        // Row 0 is out of reach looking up, so (2,4) stays the look-ahead.
        let up = TargetContext {
            player_pos: center(2, 4),
            player_facing: Direction::Up,
            chaser_pos: Some(center(3, 3)),
            ..ctx
        };
        assert_eq!(
            target(GhostStrategy::Whim { chaser: 0 }, &up),
            Some(Cell::new(1, 5))
        );

        // One more row of room and the look-ahead moves two up.
        let room = TargetContext {
            player_pos: center(3, 4),
            chaser_pos: Some(center(1, 4)),
            ..up
        };
        assert_eq!(
            target(GhostStrategy::Whim { chaser: 0 }, &room),
            Some(Cell::new(1, 4))
        );
    }

    #[test]
    fn whim_without_chaser_has_no_target() {
        let board = open_board(20, 12);
        let ctx = TargetContext {
            chaser_pos: None,
            ..ctx(&board, Mode::Chase, Cell::new(3, 8), Direction::Right)
        };
        assert_eq!(target(GhostStrategy::Whim { chaser: 0 }, &ctx), None);
    }

    #[test]
    fn kinds_match_variants() {
        assert_eq!(GhostStrategy::Chaser.kind(), GhostKind::Chaser);
        assert_eq!(GhostStrategy::Whim { chaser: 3 }.kind(), GhostKind::Whim);
    }
}
