//! Tick-driven facade over the cube, its animation, and its shuffler.

use cgmath::{Point2, Vector3};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use web_time::Duration;

use crate::{
    AnimationDriver, AnimationPreferences, CubeError, CubeEvent, CubeState, DragCandidates,
    DragResolver, DragTracker, EventSink, Face, Move, ShuffleSequencer, Slot, pick,
};

/// Interactive cube simulation.
///
/// The caller calls [`CubeSimulation::tick()`] once per frame and forwards
/// input. All output goes to the event sink `S`.
#[derive(Debug)]
pub struct CubeSimulation<S> {
    prefs: AnimationPreferences,
    state: CubeState,
    driver: AnimationDriver,
    shuffle: ShuffleSequencer,
    drag: DragTracker,
    rng: ChaCha12Rng,
    sink: S,
}

impl<S: EventSink> CubeSimulation<S> {
    /// Constructs a solved cube whose shuffles are seeded from the OS.
    pub fn new(prefs: AnimationPreferences, sink: S) -> Self {
        Self::with_rng(prefs, sink, ChaCha12Rng::from_os_rng())
    }

    /// Constructs a solved cube whose shuffles are reproducible from `seed`.
    pub fn with_seed(prefs: AnimationPreferences, sink: S, seed: u64) -> Self {
        Self::with_rng(prefs, sink, ChaCha12Rng::seed_from_u64(seed))
    }

    fn with_rng(prefs: AnimationPreferences, sink: S, rng: ChaCha12Rng) -> Self {
        Self {
            state: CubeState::new(prefs.pitch()),
            driver: AnimationDriver::new(prefs.twist_duration()),
            shuffle: ShuffleSequencer::new(),
            drag: DragTracker::new(prefs.drag_threshold),
            prefs,
            rng,
            sink,
        }
    }

    /// Returns the current preferences.
    pub fn prefs(&self) -> &AnimationPreferences {
        &self.prefs
    }
    /// Replaces the preferences.
    ///
    /// The new turn duration applies from the next turn. Geometry changes
    /// apply to a freshly constructed simulation only.
    pub fn set_prefs(&mut self, prefs: AnimationPreferences) {
        self.driver.set_duration(prefs.twist_duration());
        self.drag = DragTracker::new(prefs.drag_threshold);
        self.prefs = prefs;
    }

    /// Returns the cube.
    pub fn state(&self) -> &CubeState {
        &self.state
    }
    /// Returns the animation driver.
    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }
    /// Returns whether a turn is animating.
    pub fn is_rotating(&self) -> bool {
        self.driver.is_rotating()
    }
    /// Returns whether a shuffle is in progress.
    pub fn is_shuffling(&self) -> bool {
        self.shuffle.is_running()
    }

    /// Returns the event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }
    /// Returns the event sink mutably, for example to drain it.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
    /// Consumes the simulation and returns the event sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Requests a quarter turn. Returns `false` and does nothing if a turn is
    /// already animating.
    pub fn request_turn(&mut self, face: Face, positive: bool) -> bool {
        let mv = Move::new(face, positive);
        self.driver.start_turn(&self.state, mv, &mut self.sink)
    }

    /// Requests a quarter turn of the face named `face`.
    pub fn request_turn_by_name(&mut self, face: &str, positive: bool) -> Result<bool, CubeError> {
        Ok(self.request_turn(Face::from_name(face)?, positive))
    }

    /// Requests a shuffle of `n` random moves. Does nothing if a shuffle is
    /// already in progress.
    ///
    /// If a turn is animating, the shuffle begins once it finishes.
    pub fn request_shuffle(&mut self, n: usize) {
        let queued = self.shuffle.start(n, &mut self.rng, &mut self.sink);
        if queued && !self.driver.is_rotating() {
            self.start_next_shuffle_move();
        }
    }

    /// Returns the layers that can be dragged from the sticker at `slot`
    /// facing `normal`.
    pub fn report_pick(
        &self,
        slot: Slot,
        normal: Vector3<f32>,
    ) -> Result<DragCandidates, CubeError> {
        pick::drag_candidates(slot, normal)
    }

    /// Records a pointer press on the sticker at `slot` facing `normal`, at
    /// screen position `cursor`.
    pub fn press(
        &mut self,
        slot: Slot,
        normal: Vector3<f32>,
        cursor: Point2<f32>,
    ) -> Result<DragCandidates, CubeError> {
        Ok(self.drag.press(slot, normal, cursor)?.into())
    }

    /// Reports that the pointer moved to `cursor` while pressed.
    ///
    /// Once the pointer has traveled far enough, `resolver` picks a move from
    /// the candidates of the press and the move is requested. Returns the
    /// move if one was started.
    pub fn report_drag(
        &mut self,
        cursor: Point2<f32>,
        resolver: &impl DragResolver,
    ) -> Option<Move> {
        let drag = self.drag.update(cursor)?;
        let mv = resolver.resolve(self.drag.candidates()?, drag)?;
        log::trace!("drag {drag:?} resolved to {mv}");
        self.request_turn(mv.face, mv.positive).then_some(mv)
    }

    /// Reports that the pointer was released.
    pub fn release(&mut self) {
        self.drag.release();
    }

    /// Advances the simulation by `delta`.
    pub fn tick(&mut self, delta: Duration) {
        let finished = self.driver.tick(&mut self.state, delta, &mut self.sink);
        if finished.is_some() {
            self.start_next_shuffle_move();
        }
    }

    /// Runs ticks of `delta` until no turn is animating and no shuffle is in
    /// progress. Returns the number of ticks.
    ///
    /// `delta` must be nonzero unless turns take no time.
    pub fn run_until_idle(&mut self, delta: Duration) -> usize {
        let mut ticks = 0;
        while self.is_rotating() || self.is_shuffling() {
            self.tick(delta);
            ticks += 1;
        }
        ticks
    }

    fn start_next_shuffle_move(&mut self) {
        if let Some(mv) = self.shuffle.advance(&mut self.sink) {
            if !self.driver.start_turn(&self.state, mv, &mut self.sink) {
                debug_panic!("shuffle move {mv} was dropped");
            }
        }
    }
}

impl CubeSimulation<Vec<CubeEvent>> {
    /// Removes and returns every event emitted so far.
    pub fn drain_events(&mut self) -> Vec<CubeEvent> {
        std::mem::take(&mut self.sink)
    }
}
