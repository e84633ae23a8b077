use crate::constants::seconds_to_frames;
use crate::error::GameError;
use crate::types::Mode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockEvent {
    ModeChanged(Mode),
    FrightenedEnded,
}

/// Scatter/chase timetable with a frightened overlay, shared by every ghost.
///
/// Deadlines are absolute frame numbers. While frightened the mode deadline is
/// not evaluated; it was pushed back by the frightened length when the overlay
/// started, so the interrupted phase keeps its full duration.
#[derive(Clone, Debug)]
pub struct ModeClock {
    mode: Mode,
    frightened: bool,
    mode_deadline: u64,
    frightened_deadline: u64,
    timetable: Vec<u64>,
    cursor: usize,
    frightened_frames: u64,
    frames_per_second: u64,
}

impl ModeClock {
    /// Starts in scatter at frame 0 with the first timetable entry.
    pub fn new(
        timetable_seconds: Vec<u64>,
        frightened_seconds: u64,
        frames_per_second: u64,
    ) -> Result<Self, GameError> {
        let Some(&first) = timetable_seconds.first() else {
            return Err(GameError::config("mode timetable must not be empty"));
        };
        Ok(Self {
            mode: Mode::Scatter,
            frightened: false,
            mode_deadline: seconds_to_frames(first, frames_per_second),
            frightened_deadline: 0,
            timetable: timetable_seconds,
            cursor: 0,
            frightened_frames: seconds_to_frames(frightened_seconds, frames_per_second),
            frames_per_second,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_frightened(&self) -> bool {
        self.frightened
    }

    pub fn mode_deadline(&self) -> u64 {
        self.mode_deadline
    }

    pub fn frightened_deadline(&self) -> u64 {
        self.frightened_deadline
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Evaluates deadlines for `frame`. Calling it again for the same frame is harmless.
    pub fn tick(&mut self, frame: u64) -> Option<ClockEvent> {
        if self.frightened {
            if frame >= self.frightened_deadline {
                self.frightened = false;
                return Some(ClockEvent::FrightenedEnded);
            }
            return None;
        }
        if frame < self.mode_deadline {
            return None;
        }
        self.mode = self.mode.alter();
        self.cursor = (self.cursor + 1) % self.timetable.len();
        self.mode_deadline = frame.saturating_add(seconds_to_frames(
            self.timetable[self.cursor],
            self.frames_per_second,
        ));
        Some(ClockEvent::ModeChanged(self.mode))
    }

    /// Starts the frightened overlay. Returns false, changing nothing, if it is already running.
    pub fn frighten(&mut self, frame: u64) -> bool {
        if self.frightened {
            return false;
        }
        self.frightened = true;
        self.frightened_deadline = frame.saturating_add(self.frightened_frames);
        self.mode_deadline = self.mode_deadline.saturating_add(self.frightened_frames);
        true
    }
}
