//! Command layer: one serde-tagged variant per path operation.
//!
//! `execute` never panics and never returns `Err`; every outcome becomes a
//! `CommandResponse` with a message for the person who issued the command.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::config::Config;
use crate::data::{EasingMode, Vec2, Vec3};
use crate::error::PathError;
use crate::outputs::{format_listing, CommandResponse};
use crate::path::MotionPath;
use crate::registry::{PathRegistry, SavedPathStore};
use crate::sink::MotionSink;

const NO_PATH: &str = "You haven't created a motion path yet! Use 'motionpath create [interval]'";
const NOT_GENERATED: &str = "Path not generated yet! Use 'motionpath generate'";
const NOTHING_TO_REMOVE: &str = "There are no points to remove.";
const MAX_DELAY_SECONDS: i32 = u8::MAX as i32;

fn default_regenerate() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum PathCommand {
    Create {
        #[serde(default)]
        interval: Option<i32>,
    },
    Delete,
    /// Query (no value) or set the per-segment sample count.
    Interval {
        #[serde(default)]
        value: Option<i32>,
    },
    /// Query (no value) or set the start delay in seconds.
    Delay {
        #[serde(default)]
        value: Option<i32>,
    },
    /// Query (no mode) or set the easing by name.
    Easing {
        #[serde(default)]
        mode: Option<String>,
    },
    AddPoint {
        point: Vec3,
    },
    AddRotation {
        rotation: Vec2,
    },
    RemoveFirst,
    RemoveLast,
    RemoveAt {
        index: i64,
    },
    Clear,
    RemoveFirstRotation,
    RemoveLastRotation,
    RemoveRotationAt {
        index: i64,
    },
    ClearRotations,
    Generate,
    Start,
    Pause,
    Stop,
    Restart,
    GoToStart,
    /// Save the encoded definition under the actor's name.
    Export,
    /// Rebuild the actor's path from its saved blob.
    Import {
        #[serde(default = "default_regenerate")]
        regenerate: bool,
    },
    Points,
    Rotations,
    Generated,
    GeneratedRotations,
}

/// Everything a command may touch, borrowed from the host for one call.
pub struct CommandContext<'a> {
    pub registry: &'a PathRegistry,
    pub store: &'a SavedPathStore,
    pub config: &'a Config,
    /// Sink of the actor issuing the command (teleports for restart/go-to-start).
    pub sink: &'a mut dyn MotionSink,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        registry: &'a PathRegistry,
        store: &'a SavedPathStore,
        config: &'a Config,
        sink: &'a mut dyn MotionSink,
    ) -> Self {
        Self {
            registry,
            store,
            config,
            sink,
        }
    }
}

pub fn execute(ctx: &mut CommandContext<'_>, actor: &str, command: &PathCommand) -> CommandResponse {
    log::debug!("{actor}: {command:?}");
    match command {
        PathCommand::Create { interval } => {
            create_path(ctx.registry, ctx.config, actor, *interval)
        }
        PathCommand::Delete => delete_path(ctx.registry, actor),
        PathCommand::Export => export_path(ctx.registry, ctx.store, actor),
        PathCommand::Import { regenerate } => {
            import_path(ctx.registry, ctx.store, ctx.config, actor, *regenerate)
        }
        other => match ctx.registry.lookup(actor) {
            Some(path) => on_path(ctx, &path, other),
            None => CommandResponse::fail(NO_PATH),
        },
    }
}

/// Register an empty path for `actor`; `None` takes `Config::default_interval`.
pub fn create_path(
    registry: &PathRegistry,
    config: &Config,
    actor: &str,
    interval: Option<i32>,
) -> CommandResponse {
    if registry.contains(actor) {
        return CommandResponse::fail(
            "You've already created a motion path! To remove it, use 'motionpath delete'",
        );
    }
    let interval = interval.unwrap_or(config.default_interval);
    let path = MotionPath::new(config, interval);
    let message = format!("Motion path created! Interval: {}", path.interval());
    registry.register(actor, Arc::new(path));
    CommandResponse::ok(message)
}

/// Stop and unregister the actor's path.
pub fn delete_path(registry: &PathRegistry, actor: &str) -> CommandResponse {
    match registry.unregister(actor) {
        Some(path) => {
            path.stop();
            CommandResponse::ok("Path deleted.")
        }
        None => CommandResponse::fail("You don't have a motion path!"),
    }
}

/// Save the actor's encoded definition under its name.
pub fn export_path(registry: &PathRegistry, store: &SavedPathStore, actor: &str) -> CommandResponse {
    let Some(path) = registry.lookup(actor) else {
        return CommandResponse::fail("You haven't created a motion path yet!");
    };
    store.save(actor, codec::encode(&path.definition()));
    CommandResponse::ok("MotionPath saved to server memory.")
}

/// Rebuild the actor's path from its saved blob.
///
/// The registry only sees the new path once it decoded and built. A failed
/// generation keeps the imported definition and is reported in the message.
pub fn import_path(
    registry: &PathRegistry,
    store: &SavedPathStore,
    config: &Config,
    actor: &str,
    regenerate: bool,
) -> CommandResponse {
    let Some(blob) = store.load(actor) else {
        return CommandResponse::fail("No MotionPath has been saved for the target");
    };
    let built = codec::decode(&blob).and_then(|def| MotionPath::from_definition(config, &def));
    let path = match built {
        Ok(path) => path,
        Err(err) => {
            log::warn!("rejected saved path for {actor}: {err}");
            return CommandResponse::fail(format!("Malformed data object:\n{err}"));
        }
    };
    let generation = if regenerate { path.generate().err() } else { None };

    if let Some(old) = registry.lookup(actor) {
        old.stop();
    }
    registry.register(actor, Arc::new(path));

    match generation {
        None => CommandResponse::ok("Successfully created MotionPath from saved data"),
        Some(err) => {
            log::warn!("imported path for {actor} did not generate: {err}");
            CommandResponse::ok(format!(
                "Successfully created MotionPath from saved data\nPath not generated: {err}"
            ))
        }
    }
}

fn on_path(ctx: &mut CommandContext<'_>, path: &MotionPath, command: &PathCommand) -> CommandResponse {
    match command {
        PathCommand::Interval { value: None } => CommandResponse::ok(format!(
            "Current interval: {}\nUse 'motionpath interval [newInterval]' to change it",
            path.interval()
        )),
        PathCommand::Interval { value: Some(value) } => {
            let max = ctx.config.max_interval;
            let stored = path.set_interval(*value);
            if *value > max {
                CommandResponse::ok(format!(
                    "The maximum interval is {max}, setting it to that value."
                ))
            } else {
                CommandResponse::ok(format!("Interval is now {stored}"))
            }
        }
        PathCommand::Delay { value: None } => {
            CommandResponse::ok(format!("Current delay: {}s", path.delay()))
        }
        PathCommand::Delay { value: Some(value) } => {
            if !(0..=MAX_DELAY_SECONDS).contains(value) {
                return CommandResponse::fail(format!(
                    "Invalid delay! It must be between 0 and {MAX_DELAY_SECONDS} seconds."
                ));
            }
            path.set_delay(*value);
            CommandResponse::ok(format!("Delay is now {}s", path.delay()))
        }
        PathCommand::Easing { mode: None } => CommandResponse::ok(format!(
            "Current easing: {}\nTo change it, use 'motionpath easing <type>'",
            path.easing()
        )),
        PathCommand::Easing { mode: Some(name) } => match name.parse::<EasingMode>() {
            Ok(mode) => {
                path.set_easing(mode);
                CommandResponse::ok(format!("Easing set to {mode}"))
            }
            Err(message) => CommandResponse::fail(message),
        },

        PathCommand::AddPoint { point } => match path.add_point(*point) {
            Ok(()) => CommandResponse::ok(format!("Point {point} added.")),
            Err(PathError::PointLimitReached { max }) => CommandResponse::fail(format!(
                "You've already reached the vector limit ({max} points)."
            )),
            Err(err) => err.into(),
        },
        PathCommand::AddRotation { rotation } => match path.add_rotation(*rotation) {
            Ok(()) => CommandResponse::ok(format!("Rotation {rotation} added.")),
            Err(PathError::PointLimitReached { max }) => CommandResponse::fail(format!(
                "You've already reached the rotation limit ({max} points)."
            )),
            Err(err) => err.into(),
        },
        PathCommand::RemoveFirst => removal(path.remove_first_point(), "First position removed."),
        PathCommand::RemoveLast => removal(path.remove_last_point(), "Last position removed."),
        PathCommand::RemoveAt { index } => removal(
            path.remove_point_at(*index),
            &format!("Vector at position {index} removed."),
        ),
        PathCommand::Clear => {
            path.clear_points();
            CommandResponse::ok("Path cleared.")
        }
        PathCommand::RemoveFirstRotation => {
            removal(path.remove_first_rotation(), "First rotation removed.")
        }
        PathCommand::RemoveLastRotation => {
            removal(path.remove_last_rotation(), "Last rotation removed.")
        }
        PathCommand::RemoveRotationAt { index } => removal(
            path.remove_rotation_at(*index),
            &format!("Rotation at position {index} removed."),
        ),
        PathCommand::ClearRotations => {
            path.clear_rotations();
            CommandResponse::ok("Rotations cleared.")
        }

        PathCommand::Generate => match path.generate() {
            Ok(true) => CommandResponse::ok("Motion path generated."),
            Ok(false) => CommandResponse::fail("Path already generated."),
            Err(err) => err.into(),
        },
        PathCommand::Start => match path.start() {
            Ok(()) => CommandResponse::ok("Started motion."),
            Err(_) => CommandResponse::fail(NOT_GENERATED),
        },
        PathCommand::Pause => {
            path.pause();
            CommandResponse::ok("Paused motion.")
        }
        PathCommand::Stop => {
            path.stop();
            CommandResponse::ok("Stopped motion.")
        }
        PathCommand::Restart => match path.restart(ctx.sink) {
            Ok(()) => CommandResponse::ok("Restarting motion."),
            Err(_) => CommandResponse::fail(NOT_GENERATED),
        },
        PathCommand::GoToStart => match path.go_to_start(ctx.sink) {
            Ok(()) => CommandResponse::ok("Teleporting you to the start."),
            Err(_) => CommandResponse::fail("No points are specified!"),
        },

        PathCommand::Points => {
            CommandResponse::ok(format_listing("Points", &path.specified_points()))
        }
        PathCommand::Rotations => {
            CommandResponse::ok(format_listing("Rotations", &path.specified_rotations()))
        }
        PathCommand::Generated => match path.generated_track() {
            Some(track) => CommandResponse::ok(format_listing("Generated points", &track.positions)),
            None => CommandResponse::fail(NOT_GENERATED),
        },
        PathCommand::GeneratedRotations => match path.generated_track() {
            Some(track) => {
                CommandResponse::ok(format_listing("Generated rotation", &track.rotations))
            }
            None => CommandResponse::fail(NOT_GENERATED),
        },

        PathCommand::Create { .. }
        | PathCommand::Delete
        | PathCommand::Export
        | PathCommand::Import { .. } => {
            log::error!("registry-level command routed to a path: {command:?}");
            CommandResponse::fail("Unsupported command")
        }
    }
}

fn removal<T>(result: Result<T, PathError>, message: &str) -> CommandResponse {
    match result {
        Ok(_) => CommandResponse::ok(message),
        Err(PathError::IndexOutOfRange { len: 0, .. }) => CommandResponse::fail(NOTHING_TO_REMOVE),
        Err(err) => err.into(),
    }
}
