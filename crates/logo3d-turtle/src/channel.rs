//! Cross-thread intent hand-off: the evaluator on one thread, the stepper on
//! another. Single producer, single consumer.

use crossbeam::channel::{self, Receiver, Sender};
use logo3d_eval::TurtleActions;
use tracing::debug;

use crate::queue::IntentSource;
use crate::Intent;

/// Create a connected sender/receiver pair.
pub fn intent_channel() -> (IntentSender, IntentReceiver) {
    let (tx, rx) = channel::unbounded();
    (IntentSender { tx }, IntentReceiver { rx })
}

/// Producer half; use it as a session's port.
#[derive(Debug)]
pub struct IntentSender {
    tx: Sender<Intent>,
}

impl IntentSender {
    fn send(&self, intent: Intent) {
        if let Err(err) = self.tx.send(intent) {
            debug!(intent = ?err.into_inner(), "stepper gone, intent dropped");
        }
    }
}

impl TurtleActions for IntentSender {
    fn forward(&mut self, distance: f64) {
        self.send(Intent::Forward(distance));
    }
    fn backward(&mut self, distance: f64) {
        self.send(Intent::Backward(distance));
    }
    fn turn_left(&mut self, degrees: f64) {
        self.send(Intent::TurnLeft(degrees));
    }
    fn turn_right(&mut self, degrees: f64) {
        self.send(Intent::TurnRight(degrees));
    }
    fn print(&mut self, text: &str) {
        self.send(Intent::Print(text.to_string()));
    }
}

/// Consumer half, drained by the stepper.
#[derive(Debug)]
pub struct IntentReceiver {
    rx: Receiver<Intent>,
}

impl IntentReceiver {
    /// Intents sent and not yet taken.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Block until an intent arrives. `None` once the sender is gone and the
    /// backlog is empty.
    pub fn wait(&mut self) -> Option<Intent> {
        self.rx.recv().ok()
    }

    /// Drop the backlog. Returns how many intents were dropped.
    pub fn clear(&mut self) -> usize {
        self.rx.try_iter().count()
    }
}

impl IntentSource for IntentReceiver {
    fn next_intent(&mut self) -> Option<Intent> {
        self.rx.try_recv().ok()
    }
}
