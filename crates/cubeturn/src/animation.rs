//! Per-tick animation of a single quarter turn.

use std::f32::consts::FRAC_PI_2;
use std::fmt;

use cgmath::{Quaternion, Vector3};
use web_time::Duration;

use crate::axis::axis_index;
use crate::orientation::{quarter_turn, rotate_towards};
use crate::{CubeEvent, CubeState, CubieId, EventSink, LAYER_SIZE, Move, Slot, axis_for};

/// State of a turn in progress.
///
/// Everything here is captured when the turn starts. The cube order is not
/// touched until the turn finishes.
#[derive(Debug, Clone)]
pub struct TurnAnimation {
    mv: Move,
    axis: Vector3<f32>,
    elapsed: Duration,
    duration: Duration,
    /// Slots in the turning face, before the turn.
    slots: [Slot; LAYER_SIZE],
    /// Cubie in each of `slots`, before the turn.
    cubies: [CubieId; LAYER_SIZE],
    start_orientations: [Quaternion<f32>; LAYER_SIZE],
    start_positions: [Vector3<f32>; LAYER_SIZE],
    end_orientations: [Quaternion<f32>; LAYER_SIZE],
}

impl fmt::Display for TurnAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.0}%)", self.mv, self.progress() * 100.0)
    }
}

impl TurnAnimation {
    /// Captures the start of `mv` on `state`.
    pub fn new(state: &CubeState, mv: Move, duration: Duration) -> Self {
        let axis = axis_for(mv.face, mv.positive);
        let rotation = quarter_turn(axis);

        let slots = state.order().slots_for_face(mv.face);
        let cubies = slots.map(|slot| state.order()[slot]);
        let start_orientations = cubies.map(|c| state.cubie(c).orientation);
        let start_positions = cubies.map(|c| state.cubie(c).position);
        let end_orientations = start_orientations.map(|q| rotation * q);

        Self {
            mv,
            axis,
            elapsed: Duration::ZERO,
            duration,
            slots,
            cubies,
            start_orientations,
            start_positions,
            end_orientations,
        }
    }

    /// Returns the move being animated.
    pub fn mv(&self) -> Move {
        self.mv
    }
    /// Returns the unit axis of the rotation.
    pub fn axis(&self) -> Vector3<f32> {
        self.axis
    }
    /// Returns the pre-turn slots of the turning face.
    pub fn slots(&self) -> &[Slot; LAYER_SIZE] {
        &self.slots
    }
    /// Returns the cubies in the turning face.
    pub fn cubies(&self) -> &[CubieId; LAYER_SIZE] {
        &self.cubies
    }
    /// Returns the orientation of each turning cubie at the start of the turn.
    pub fn start_orientations(&self) -> &[Quaternion<f32>; LAYER_SIZE] {
        &self.start_orientations
    }
    /// Returns the orientation each turning cubie will have when the turn
    /// finishes.
    pub fn end_orientations(&self) -> &[Quaternion<f32>; LAYER_SIZE] {
        &self.end_orientations
    }

    /// Returns the fraction of the turn completed, from 0 to 1.
    pub fn progress(&self) -> f32 {
        if self.is_complete() {
            1.0
        } else {
            self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
        }
    }

    /// Returns whether the full duration has elapsed.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Returns the position of the `i`th turning cubie at progress `t`.
    pub fn position_at(&self, i: usize, t: f32) -> Vector3<f32> {
        let angle = t.clamp(0.0, 1.0) * FRAC_PI_2;
        rotate_in_plane(
            self.start_positions[i],
            axis_index(self.mv.face),
            self.axis,
            angle,
        )
    }

    /// Advances the animation by `delta` and writes the interpolated transform
    /// of each turning cubie into `state`.
    fn advance(&mut self, delta: Duration, state: &mut CubeState) {
        self.elapsed += delta;
        let step = FRAC_PI_2 * delta.as_secs_f32() / self.duration.as_secs_f32();
        let t = self.progress();
        for (i, &id) in self.cubies.iter().enumerate() {
            let position = self.position_at(i, t);
            let cubie = state.cubie_mut(id);
            cubie.orientation = rotate_towards(cubie.orientation, self.end_orientations[i], step);
            cubie.position = position;
        }
    }

    /// Lands every turning cubie on its destination and commits the turn.
    fn finish(self, state: &mut CubeState) {
        for (&id, &end) in std::iter::zip(&self.cubies, &self.end_orientations) {
            state.cubie_mut(id).orientation = end;
        }
        state.commit_turn(self.mv);
    }

    fn emit_transforms<S: EventSink + ?Sized>(&self, state: &CubeState, sink: &mut S) {
        for &id in &self.cubies {
            let cubie = state.cubie(id);
            sink.emit(CubeEvent::PieceTransform {
                cubie: id,
                position: cubie.position,
                orientation: cubie.orientation,
            });
        }
    }
}

/// Rotates `v` by `angle` around `axis`, which must be a signed unit vector
/// along principal axis `k`.
///
/// Only the two components perpendicular to the axis change.
fn rotate_in_plane(v: Vector3<f32>, k: usize, axis: Vector3<f32>, angle: f32) -> Vector3<f32> {
    let (i, j) = ((k + 1) % 3, (k + 2) % 3);
    let (sin, cos) = (axis[k].signum() * angle).sin_cos();
    let mut ret = v;
    ret[i] = v[i] * cos - v[j] * sin;
    ret[j] = v[i] * sin + v[j] * cos;
    ret
}

/// Idle/rotating state machine that runs at most one turn at a time.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    current: Option<TurnAnimation>,
    duration: Duration,
}

impl AnimationDriver {
    /// Constructs an idle driver whose turns each take `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    /// Returns whether a turn is in progress.
    pub fn is_rotating(&self) -> bool {
        self.current.is_some()
    }
    /// Returns the turn in progress, if any.
    pub fn current(&self) -> Option<&TurnAnimation> {
        self.current.as_ref()
    }

    /// Returns the duration of each turn.
    pub fn duration(&self) -> Duration {
        self.duration
    }
    /// Sets the duration of turns started after this call.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Starts animating `mv`. Returns `false` and does nothing if a turn is
    /// already in progress.
    pub fn start_turn<S: EventSink + ?Sized>(
        &mut self,
        state: &CubeState,
        mv: Move,
        sink: &mut S,
    ) -> bool {
        if let Some(current) = &self.current {
            log::trace!("dropping {mv} because {current} is in progress");
            return false;
        }
        log::debug!("starting {mv}");
        self.current = Some(TurnAnimation::new(state, mv, self.duration));
        sink.emit(CubeEvent::TurnStarted(mv));
        true
    }

    /// Advances the turn in progress by `delta`. Returns the move if it
    /// finished during this tick.
    pub fn tick<S: EventSink + ?Sized>(
        &mut self,
        state: &mut CubeState,
        delta: Duration,
        sink: &mut S,
    ) -> Option<Move> {
        let anim = self.current.as_mut()?;

        if !anim.is_complete() {
            anim.advance(delta, state);
            log::trace!("turning {anim}");
        }
        if !anim.is_complete() {
            anim.emit_transforms(state, sink);
            return None;
        }

        let anim = self.current.take()?;
        let mv = anim.mv;
        let cubies = anim.cubies;
        anim.finish(state);
        for id in cubies {
            let cubie = state.cubie(id);
            sink.emit(CubeEvent::PieceTransform {
                cubie: id,
                position: cubie.position,
                orientation: cubie.orientation,
            });
        }
        log::debug!("finished {mv}");
        sink.emit(CubeEvent::TurnFinished(mv));
        Some(mv)
    }
}
