//! MotionPath: one actor's control points, settings, generated track and playback.
//!
//! Shared as `Arc<MotionPath>` between a fixed-rate tick driver and an editing
//! role. Locking layout:
//! - positions and rotations each sit behind their own mutex; generation copies
//!   them out and fits without holding either lock
//! - the generated track is an immutable `Arc` replaced in a single assignment,
//!   and readers clone the `Arc` before touching it
//! - every invalidating edit bumps `revision`; the published track carries the
//!   revision it was snapshotted at, and is swapped under the write lock only
//!   for a newer revision, so an edit or a slower fit racing a publish leaves
//!   the path either ungenerated or holding the newest track

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use crate::config::Config;
use crate::data::{EasingMode, PathDefinition, Vec2, Vec3};
use crate::error::{PathError, PathResult};
use crate::generator::{generate_track, GeneratedTrack};
use crate::playback::{delay_frame, PlaybackPhase, PlaybackState, TickOutcome};
use crate::sink::{emit_rotation, MotionSink};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Settings {
    easing: EasingMode,
    interval: i32,
    delay: i32,
}

#[derive(Debug)]
pub struct MotionPath {
    max_points: usize,
    max_interval: i32,
    ticks_per_second: i32,

    positions: Mutex<Vec<Vec3>>,
    rotations: Mutex<Vec<Vec2>>,
    settings: Mutex<Settings>,
    playback: Mutex<PlaybackState>,

    revision: AtomicU64,
    track: RwLock<Option<PublishedTrack>>,
}

/// A generated track and the definition revision it was built from.
#[derive(Clone, Debug)]
struct PublishedTrack {
    revision: u64,
    track: Arc<GeneratedTrack>,
}

/// Lock a mutex, recovering the data if a previous holder panicked.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MotionPath {
    /// Empty path with the config's default easing and the given interval (clamped).
    pub fn new(cfg: &Config, interval: i32) -> Self {
        Self {
            max_points: cfg.max_points_per_path,
            max_interval: cfg.max_interval,
            ticks_per_second: cfg.ticks_per_second,
            positions: Mutex::new(Vec::new()),
            rotations: Mutex::new(Vec::new()),
            settings: Mutex::new(Settings {
                easing: cfg.default_easing,
                interval: cfg.clamp_interval(interval),
                delay: 0,
            }),
            playback: Mutex::new(PlaybackState::default()),
            revision: AtomicU64::new(0),
            track: RwLock::new(None),
        }
    }

    /// Build a path from a decoded definition. Control points beyond the
    /// configured limit are rejected so the caller can discard the whole path.
    pub fn from_definition(cfg: &Config, def: &PathDefinition) -> PathResult<Self> {
        let max = cfg.max_points_per_path;
        if def.positions.len() > max || def.rotations.len() > max {
            return Err(PathError::PointLimitReached { max });
        }
        let path = Self::new(cfg, def.interval);
        path.set_easing(def.easing);
        path.set_delay(def.delay);
        *lock(&path.positions) = def.positions.clone();
        *lock(&path.rotations) = def.rotations.clone();
        Ok(path)
    }

    /// Snapshot the sparse definition (independent of generation state).
    pub fn definition(&self) -> PathDefinition {
        let settings = *lock(&self.settings);
        PathDefinition {
            easing: settings.easing,
            delay: settings.delay,
            interval: settings.interval,
            positions: self.specified_points(),
            rotations: self.specified_rotations(),
        }
    }

    // ---- settings -------------------------------------------------------

    pub fn easing(&self) -> EasingMode {
        lock(&self.settings).easing
    }

    pub fn set_easing(&self, easing: EasingMode) {
        lock(&self.settings).easing = easing;
        self.invalidate();
    }

    pub fn interval(&self) -> i32 {
        lock(&self.settings).interval
    }

    /// Set the per-segment sample count, clamped to `[1, max_interval]`.
    /// Returns the value actually stored.
    pub fn set_interval(&self, interval: i32) -> i32 {
        let clamped = interval.clamp(1, self.max_interval.max(1));
        if clamped != interval {
            log::warn!("interval {interval} clamped to {clamped}");
        }
        lock(&self.settings).interval = clamped;
        self.invalidate();
        clamped
    }

    pub fn delay(&self) -> i32 {
        lock(&self.settings).delay
    }

    /// Set the start delay in seconds. The countdown is only re-armed while the
    /// path is not running or has never been generated.
    pub fn set_delay(&self, delay: i32) {
        lock(&self.settings).delay = delay;
        let has_track = self.current_track().is_some();
        let mut playback = lock(&self.playback);
        if !playback.running || !has_track {
            playback.rewind(delay_frame(delay, self.ticks_per_second));
        }
    }

    fn countdown(&self) -> i64 {
        delay_frame(self.delay(), self.ticks_per_second)
    }

    // ---- control points -------------------------------------------------

    pub fn add_point(&self, point: Vec3) -> PathResult<()> {
        push_bounded(&mut lock(&self.positions), point, self.max_points)?;
        self.invalidate();
        Ok(())
    }

    pub fn remove_first_point(&self) -> PathResult<Vec3> {
        self.remove_point_at(0)
    }

    pub fn remove_last_point(&self) -> PathResult<Vec3> {
        let removed = pop_checked(&mut lock(&self.positions))?;
        self.invalidate();
        Ok(removed)
    }

    pub fn remove_point_at(&self, index: i64) -> PathResult<Vec3> {
        let removed = remove_checked(&mut lock(&self.positions), index)?;
        self.invalidate();
        Ok(removed)
    }

    pub fn clear_points(&self) {
        lock(&self.positions).clear();
        self.invalidate();
    }

    pub fn add_rotation(&self, rotation: Vec2) -> PathResult<()> {
        push_bounded(&mut lock(&self.rotations), rotation, self.max_points)?;
        self.invalidate();
        Ok(())
    }

    pub fn remove_first_rotation(&self) -> PathResult<Vec2> {
        self.remove_rotation_at(0)
    }

    pub fn remove_last_rotation(&self) -> PathResult<Vec2> {
        let removed = pop_checked(&mut lock(&self.rotations))?;
        self.invalidate();
        Ok(removed)
    }

    pub fn remove_rotation_at(&self, index: i64) -> PathResult<Vec2> {
        let removed = remove_checked(&mut lock(&self.rotations), index)?;
        self.invalidate();
        Ok(removed)
    }

    pub fn clear_rotations(&self) {
        lock(&self.rotations).clear();
        self.invalidate();
    }

    pub fn specified_points(&self) -> Vec<Vec3> {
        lock(&self.positions).clone()
    }

    pub fn specified_rotations(&self) -> Vec<Vec2> {
        lock(&self.rotations).clone()
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    // ---- generation -----------------------------------------------------

    fn invalidate(&self) {
        self.revision.fetch_add(1, Ordering::AcqRel);
    }

    fn published(&self) -> Option<PublishedTrack> {
        self.track.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    /// True when the published track reflects the current definition.
    pub fn is_generated(&self) -> bool {
        let revision = self.revision.load(Ordering::Acquire);
        self.published().is_some_and(|p| p.revision == revision)
    }

    /// Build and publish a fresh track.
    ///
    /// Returns `Ok(false)` without touching the published track when it is
    /// already up to date, or when a concurrent pass published a newer one first.
    pub fn generate(&self) -> PathResult<bool> {
        match self.build()? {
            Some((revision, track)) => Ok(self.publish(revision, track)),
            None => Ok(false),
        }
    }

    /// Snapshot the definition and fit it outside every lock.
    fn build(&self) -> PathResult<Option<(u64, GeneratedTrack)>> {
        let revision = self.revision.load(Ordering::Acquire);
        if self.published().is_some_and(|p| p.revision == revision) {
            return Ok(None);
        }
        let settings = *lock(&self.settings);
        let positions = self.specified_points();
        let rotations = self.specified_rotations();

        let track = generate_track(
            settings.easing,
            settings.interval.max(1) as usize,
            &positions,
            &rotations,
        )?;
        log::debug!(
            "generated {} track at revision {revision}: {} positions, {} rotations",
            settings.easing,
            track.positions.len(),
            track.rotations.len()
        );
        Ok(Some((revision, track)))
    }

    /// Swap in `track` unless an equal or newer revision is already published.
    fn publish(&self, revision: u64, track: GeneratedTrack) -> bool {
        let mut slot = self.track.write().unwrap_or_else(|p| p.into_inner());
        if slot.as_ref().is_some_and(|p| p.revision >= revision) {
            log::debug!("dropping track for revision {revision}; a newer one is published");
            return false;
        }
        *slot = Some(PublishedTrack {
            revision,
            track: Arc::new(track),
        });
        true
    }

    /// Last published track, possibly stale relative to later edits.
    pub fn current_track(&self) -> Option<Arc<GeneratedTrack>> {
        self.published().map(|p| p.track)
    }

    /// Published track, only if it matches the current definition.
    pub fn generated_track(&self) -> Option<Arc<GeneratedTrack>> {
        let revision = self.revision.load(Ordering::Acquire);
        self.published()
            .filter(|p| p.revision == revision)
            .map(|p| p.track)
    }

    // ---- playback -------------------------------------------------------

    pub fn playback_state(&self) -> PlaybackState {
        *lock(&self.playback)
    }

    pub fn is_running(&self) -> bool {
        lock(&self.playback).running
    }

    pub fn phase(&self) -> PlaybackPhase {
        let countdown = self.countdown();
        lock(&self.playback).phase(countdown)
    }

    /// Resume playback from the current frame.
    pub fn start(&self) -> PathResult<()> {
        if self.current_track().is_none() {
            return Err(PathError::NotGenerated);
        }
        lock(&self.playback).start();
        Ok(())
    }

    pub fn pause(&self) {
        lock(&self.playback).pause();
    }

    pub fn stop(&self) {
        let countdown = self.countdown();
        lock(&self.playback).stop(countdown);
    }

    /// Rewind to the delay countdown, teleport to the first point, then start.
    pub fn restart(&self, sink: &mut dyn MotionSink) -> PathResult<()> {
        let countdown = self.countdown();
        lock(&self.playback).rewind(countdown);
        // An empty path has nothing to teleport to; start still decides the outcome.
        if let Err(err) = self.go_to_start(sink) {
            log::debug!("restart without teleport: {err}");
        }
        self.start()
    }

    /// Emit the first rotation (if any) and the first position without touching playback.
    pub fn go_to_start(&self, sink: &mut dyn MotionSink) -> PathResult<()> {
        let Some(first) = lock(&self.positions).first().copied() else {
            return Err(PathError::NoControlPoints);
        };
        let first_rotation = lock(&self.rotations).first().copied();
        if let Some(rotation) = first_rotation {
            emit_rotation(sink, rotation);
        }
        sink.force_position(first);
        Ok(())
    }

    /// Advance playback by one frame against the published track.
    pub fn tick(&self, sink: &mut dyn MotionSink) -> TickOutcome {
        let mut playback = lock(&self.playback);
        if !playback.running {
            return TickOutcome::Idle;
        }
        match self.current_track() {
            Some(track) => playback.tick(&track, sink),
            None => {
                playback.pause();
                TickOutcome::Finished
            }
        }
    }
}

fn push_bounded<T>(items: &mut Vec<T>, item: T, max: usize) -> PathResult<()> {
    if items.len() >= max {
        return Err(PathError::PointLimitReached { max });
    }
    items.push(item);
    Ok(())
}

fn pop_checked<T>(items: &mut Vec<T>) -> PathResult<T> {
    items
        .pop()
        .ok_or(PathError::IndexOutOfRange { index: -1, len: 0 })
}

fn remove_checked<T>(items: &mut Vec<T>, index: i64) -> PathResult<T> {
    let len = items.len();
    match usize::try_from(index) {
        Ok(i) if i < len => Ok(items.remove(i)),
        _ => Err(PathError::IndexOutOfRange { index, len }),
    }
}
