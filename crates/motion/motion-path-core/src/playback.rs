//! Frame-counter playback state.
//!
//! `running` plus a signed `frame`: a negative frame is a pending delay
//! countdown, advanced by one per tick like any other frame.

use serde::{Deserialize, Serialize};

use crate::generator::GeneratedTrack;
use crate::sink::{emit_rotation, MotionSink};

/// Conceptual playback phase derived from the raw state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackPhase {
    Stopped,
    Paused,
    Running,
}

impl PlaybackPhase {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Paused => "paused",
            Self::Running => "running",
        }
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Not running; nothing happened.
    Idle,
    /// Still counting down the start delay.
    Waiting,
    /// Emitted the sample at `frame`.
    Emitted { frame: usize },
    /// Ran past the end of the track and stopped running.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub running: bool,
    pub frame: i64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            running: false,
            frame: 0,
        }
    }
}

/// Countdown frame for a delay: `-(delay_seconds * ticks_per_second)`.
#[inline]
pub fn delay_frame(delay_seconds: i32, ticks_per_second: i32) -> i64 {
    -(i64::from(delay_seconds) * i64::from(ticks_per_second))
}

impl PlaybackState {
    pub fn new(countdown: i64) -> Self {
        Self {
            running: false,
            frame: countdown,
        }
    }

    /// Stopped = not running and rewound to `countdown`; Paused = not running elsewhere.
    pub fn phase(&self, countdown: i64) -> PlaybackPhase {
        if self.running {
            PlaybackPhase::Running
        } else if self.frame == countdown {
            PlaybackPhase::Stopped
        } else {
            PlaybackPhase::Paused
        }
    }

    #[inline]
    pub fn is_delaying(&self) -> bool {
        self.running && self.frame < 0
    }

    /// Resume from the current frame.
    #[inline]
    pub fn start(&mut self) {
        self.running = true;
    }

    #[inline]
    pub fn pause(&mut self) {
        self.running = false;
    }

    #[inline]
    pub fn stop(&mut self, countdown: i64) {
        self.running = false;
        self.frame = countdown;
    }

    #[inline]
    pub fn rewind(&mut self, countdown: i64) {
        self.frame = countdown;
    }

    /// Advance one frame and emit the matching samples.
    ///
    /// Past the end the frame is left where it is and `running` drops to false.
    pub fn tick(&mut self, track: &GeneratedTrack, sink: &mut dyn MotionSink) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        self.frame += 1;
        if self.frame < 0 {
            return TickOutcome::Waiting;
        }
        let frame = self.frame as usize;
        let Some(position) = track.position(frame) else {
            self.running = false;
            return TickOutcome::Finished;
        };
        sink.force_position(position);
        if let Some(rotation) = track.rotation(frame) {
            emit_rotation(sink, rotation);
        }
        TickOutcome::Emitted { frame }
    }
}
