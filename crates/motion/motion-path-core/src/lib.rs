//! Motion Path Core (engine-agnostic)
//!
//! Turns sparse position and rotation control points into dense, evenly spaced
//! tracks (linear, Bezier, or arc-length cubic spline) and plays them back one
//! frame per fixed tick through host-provided sinks. Path definitions encode to
//! a compact little-endian blob for saving and restoring.

pub mod codec;
pub mod commands;
pub mod config;
pub mod data;
pub mod error;
pub mod generator;
pub mod ids;
pub mod instance;
pub mod interp;
pub mod outputs;
pub mod path;
pub mod playback;
pub mod registry;
pub mod sink;

// Re-exports for consumers (hosts)
pub use codec::{decode, encode, MIN_ENCODED_LEN};
pub use commands::{
    create_path, delete_path, execute, export_path, import_path, CommandContext, PathCommand,
};
pub use config::Config;
pub use data::{parse_path_definition_json, EasingMode, PathDefinition, Vec2, Vec3};
pub use error::{PathError, PathResult};
pub use generator::{generate_track, GeneratedTrack};
pub use ids::{IdAllocator, PathId};
pub use instance::PathInstance;
pub use interp::{BoundaryTangents, CubicSpline};
pub use outputs::CommandResponse;
pub use path::MotionPath;
pub use playback::{delay_frame, PlaybackPhase, PlaybackState, TickOutcome};
pub use registry::{PathRegistry, RegisteredPath, SavedPathStore};
pub use sink::{ActorKey, MotionSink, PositionSink, RecordingSink, RotationSink, SinkCall};
