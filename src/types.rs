use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Neutral,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn parse_move(value: &str) -> Option<Self> {
        match value {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "none" | "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Neutral => Self::Neutral,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub fn is_perpendicular_to(self, other: Self) -> bool {
        (self.is_vertical() && other.is_horizontal())
            || (self.is_horizontal() && other.is_vertical())
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::Neutral => (0, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Scatter,
    Chase,
}

impl Mode {
    pub fn alter(self) -> Self {
        match self {
            Self::Scatter => Self::Chase,
            Self::Chase => Self::Scatter,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostKind {
    Ambusher,
    Chaser,
    Ignorant,
    Whim,
}

impl GhostKind {
    pub const ALL: [GhostKind; 4] = [Self::Ambusher, Self::Chaser, Self::Ignorant, Self::Whim];

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'a' => Some(Self::Ambusher),
            'c' => Some(Self::Chaser),
            'i' => Some(Self::Ignorant),
            'w' => Some(Self::Whim),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Self::Ambusher => 'a',
            Self::Chaser => 'c',
            Self::Ignorant => 'i',
            Self::Whim => 'w',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn ahead(self, dir: Direction, tiles: i32) -> Self {
        let (d_row, d_col) = dir.delta();
        Self {
            row: self.row + d_row * tiles,
            col: self.col + d_col * tiles,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SpriteExtent {
    pub width: i32,
    pub height: i32,
}

#[derive(Clone, Debug, Serialize)]
pub struct BoardInit {
    pub rows: usize,
    pub cols: usize,
    #[serde(rename = "tileSize")]
    pub tile_size: i32,
    #[serde(rename = "gridHeight")]
    pub grid_height: i32,
    pub tiles: Vec<String>,
    #[serde(rename = "totalPickups")]
    pub total_pickups: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct PlayerView {
    pub x: i32,
    pub y: i32,
    pub dir: Direction,
    pub sprite: Direction,
    pub moving: bool,
    #[serde(rename = "livesRemaining")]
    pub lives_remaining: i32,
    #[serde(rename = "pickupsEaten")]
    pub pickups_eaten: u32,
    #[serde(rename = "hasWon")]
    pub has_won: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct GhostView {
    pub kind: GhostKind,
    pub x: i32,
    pub y: i32,
    pub dir: Direction,
    pub frightened: bool,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Cell>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuntimeEvent {
    PickupEaten {
        row: i32,
        col: i32,
    },
    SuperPickupEaten {
        row: i32,
        col: i32,
    },
    ModeChanged {
        mode: Mode,
    },
    FrightenedStarted {
        #[serde(rename = "untilFrame")]
        until_frame: u64,
    },
    FrightenedEnded,
    GhostEaten {
        #[serde(rename = "ghostIndex")]
        ghost_index: usize,
        kind: GhostKind,
    },
    PlayerCaught {
        #[serde(rename = "livesRemaining")]
        lives_remaining: i32,
    },
    GameOver {
        status: GameStatus,
    },
}

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub status: GameStatus,
    pub mode: Mode,
    pub frightened: bool,
    #[serde(rename = "pickupsRemaining")]
    pub pickups_remaining: u32,
    pub player: PlayerView,
    pub ghosts: Vec<GhostView>,
    pub events: Vec<RuntimeEvent>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SessionSummary {
    pub frames: u64,
    pub status: GameStatus,
    #[serde(rename = "livesRemaining")]
    pub lives_remaining: i32,
    #[serde(rename = "pickupsEaten")]
    pub pickups_eaten: u32,
    #[serde(rename = "totalPickups")]
    pub total_pickups: u32,
    #[serde(rename = "ghostsEaten")]
    pub ghosts_eaten: u32,
    #[serde(rename = "timesCaught")]
    pub times_caught: u32,
}
