use crate::types::SpriteExtent;

pub const TILE_SIZE: i32 = 16;
pub const FRAMES_PER_SECOND: u64 = 60;

pub const AMBUSH_LOOKAHEAD_TILES: i32 = 4;
pub const WHIM_LOOKAHEAD_TILES: i32 = 2;
pub const IGNORANT_RADIUS_TILES: i32 = 8;

/// Frames between mouth open/closed flips of the player sprite.
pub const MOUTH_PERIOD_FRAMES: u64 = 8;

pub const PLAYER_EXTENT: SpriteExtent = SpriteExtent {
    width: 24,
    height: 26,
};
pub const GHOST_EXTENT: SpriteExtent = SpriteExtent {
    width: 28,
    height: 28,
};

pub fn seconds_to_frames(seconds: u64, frames_per_second: u64) -> u64 {
    seconds.saturating_mul(frames_per_second)
}
