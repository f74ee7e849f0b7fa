//! Same-thread intent queue.

use std::collections::VecDeque;

use logo3d_eval::TurtleActions;

use crate::Intent;

/// Anything the stepper can pull intents from, oldest first.
pub trait IntentSource {
    fn next_intent(&mut self) -> Option<Intent>;
}

/// FIFO of intents issued by the evaluator and not yet started by the
/// stepper. Plugged straight into a session as its port.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntentQueue {
    pending: VecDeque<Intent>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intent: Intent) {
        self.pending.push_back(intent);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every intent that has not started. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }
}

impl IntentSource for IntentQueue {
    fn next_intent(&mut self) -> Option<Intent> {
        self.pending.pop_front()
    }
}

impl TurtleActions for IntentQueue {
    fn forward(&mut self, distance: f64) {
        self.push(Intent::Forward(distance));
    }
    fn backward(&mut self, distance: f64) {
        self.push(Intent::Backward(distance));
    }
    fn turn_left(&mut self, degrees: f64) {
        self.push(Intent::TurnLeft(degrees));
    }
    fn turn_right(&mut self, degrees: f64) {
        self.push(Intent::TurnRight(degrees));
    }
    fn print(&mut self, text: &str) {
        self.push(Intent::Print(text.to_string()));
    }
}
