//! Random shuffle generation and sequential playback.

use std::collections::VecDeque;

use rand::Rng;

use crate::{CubeEvent, EventSink, Face, Move};

/// Generates `n` random quarter turns of outer faces.
///
/// No move is the inverse of the move right before it. When the random sign
/// would undo the previous move, the sign is flipped, which makes that move a
/// repeat of the previous one instead.
pub fn generate_shuffle<R: Rng>(n: usize, rng: &mut R) -> Vec<Move> {
    let mut moves: Vec<Move> = Vec::with_capacity(n);
    for _ in 0..n {
        let face = Face::OUTER[rng.random_range(0..Face::OUTER.len())];
        let mut mv = Move::new(face, rng.random_bool(0.5));
        if moves.last().is_some_and(|&prev| mv.cancels(prev)) {
            mv = mv.inverse();
        }
        moves.push(mv);
    }
    moves
}

/// Plays a shuffle one turn at a time, driven by turn completion.
#[derive(Debug, Default, Clone)]
pub struct ShuffleSequencer {
    queue: VecDeque<Move>,
    running: bool,
    /// Whether the turn currently animating came from this shuffle.
    in_flight: bool,
}

impl ShuffleSequencer {
    /// Constructs an idle sequencer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a shuffle is in progress.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the number of shuffle moves not yet started.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Queues a new shuffle of `n` moves. Returns whether any moves were
    /// queued.
    ///
    /// Does nothing if a shuffle is already running. A shuffle of zero moves
    /// finishes immediately.
    pub fn start<R: Rng, S: EventSink + ?Sized>(
        &mut self,
        n: usize,
        rng: &mut R,
        sink: &mut S,
    ) -> bool {
        if self.running {
            log::trace!("ignoring shuffle request; already shuffling");
            return false;
        }
        let moves = generate_shuffle(n, rng);
        log::debug!("shuffling with {n} moves");
        if moves.is_empty() {
            sink.emit(CubeEvent::ShuffleFinished);
            return false;
        }
        self.queue = moves.into();
        self.running = true;
        true
    }

    /// Handles the end of the previous turn (if any) and returns the next move
    /// to start.
    ///
    /// Call this when a shuffle has just been queued onto an idle driver, and
    /// after every finished turn.
    pub fn advance<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> Option<Move> {
        if !self.running {
            return None;
        }
        if std::mem::take(&mut self.in_flight) {
            sink.emit(CubeEvent::ShuffleStepFinished);
        }
        match self.queue.pop_front() {
            Some(mv) => {
                self.in_flight = true;
                Some(mv)
            }
            None => {
                self.running = false;
                log::debug!("shuffle finished");
                sink.emit(CubeEvent::ShuffleFinished);
                None
            }
        }
    }
}
