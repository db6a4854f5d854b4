use std::sync::mpsc;

use cgmath::{Quaternion, Vector3};

use crate::{CubieId, Move};

/// Event emitted by the simulation for a renderer or input layer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CubeEvent {
    /// New transform for a cubie.
    PieceTransform {
        /// Cubie to move.
        cubie: CubieId,
        /// Position of the cubie's center.
        position: Vector3<f32>,
        /// Orientation of the cubie.
        orientation: Quaternion<f32>,
    },
    /// A turn was accepted and has begun animating.
    TurnStarted(Move),
    /// A turn finished animating and has been committed.
    TurnFinished(Move),
    /// A turn that was part of a shuffle finished.
    ShuffleStepFinished,
    /// The last turn of a shuffle finished.
    ShuffleFinished,
}

/// Consumer of [`CubeEvent`]s.
pub trait EventSink {
    /// Handles an event.
    fn emit(&mut self, event: CubeEvent);
}

impl EventSink for Vec<CubeEvent> {
    fn emit(&mut self, event: CubeEvent) {
        self.push(event);
    }
}

impl EventSink for mpsc::Sender<CubeEvent> {
    fn emit(&mut self, event: CubeEvent) {
        // ignore channel error
        let _ = self.send(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: CubeEvent) {
        (**self).emit(event);
    }
}
