//! Collaborator contracts for the actor a path drives.
//!
//! Hosts implement the sinks for whatever they move and pass them explicitly
//! into playback calls; the core never looks actors up on its own.

use crate::data::{Vec2, Vec3};

/// Identity of the actor that owns a path (the name saved blobs are keyed by).
pub type ActorKey = String;

/// Teleports the actor. Fire-and-forget from the core's perspective.
pub trait PositionSink {
    fn force_position(&mut self, position: Vec3);
}

/// Turns the actor. Fire-and-forget from the core's perspective.
pub trait RotationSink {
    fn force_rotation(&mut self, yaw: f32, pitch: f32);
}

/// Both capabilities; implemented for every type that has them.
pub trait MotionSink: PositionSink + RotationSink {}

impl<T: PositionSink + RotationSink + ?Sized> MotionSink for T {}

/// Emit a rotation sample through a sink.
#[inline]
pub fn emit_rotation(sink: &mut dyn MotionSink, rotation: Vec2) {
    sink.force_rotation(rotation.x, rotation.y);
}

/// One recorded sink call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SinkCall {
    Position(Vec3),
    Rotation { yaw: f32, pitch: f32 },
}

/// Sink that records every call in order; handy for headless hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<SinkCall>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SinkCall::Position(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn rotations(&self) -> Vec<Vec2> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SinkCall::Rotation { yaw, pitch } => Some(Vec2::new(*yaw, *pitch)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl PositionSink for RecordingSink {
    fn force_position(&mut self, position: Vec3) {
        self.calls.push(SinkCall::Position(position));
    }
}

impl RotationSink for RecordingSink {
    fn force_rotation(&mut self, yaw: f32, pitch: f32) {
        self.calls.push(SinkCall::Rotation { yaw, pitch });
    }
}
