//! logo3d turtle host side.
//!
//! The evaluator issues intents without waiting for them. This crate queues
//! them ([`IntentQueue`] on one thread, [`intent_channel`] across two) and
//! plays them back over time with a [`Stepper`].

mod channel;
mod queue;
mod stepper;

/// A queued turtle request: one port call as data.
pub use logo3d_eval::TurtleAction as Intent;

pub use channel::{intent_channel, IntentReceiver, IntentSender};
pub use queue::{IntentQueue, IntentSource};
pub use stepper::{Point, Segment, StepEvent, Stepper, StepperConfig, TurtleState};
