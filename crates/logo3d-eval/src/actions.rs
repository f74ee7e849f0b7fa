//! The outbound turtle capability and its stock implementations.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Fire-and-forget turtle commands issued by the evaluator.
///
/// Calls return immediately; the host decides when the turtle actually moves.
pub trait TurtleActions {
    fn forward(&mut self, distance: f64);
    fn backward(&mut self, distance: f64);
    fn turn_left(&mut self, degrees: f64);
    fn turn_right(&mut self, degrees: f64);
    fn print(&mut self, text: &str);
}

impl<T: TurtleActions + ?Sized> TurtleActions for &mut T {
    fn forward(&mut self, distance: f64) {
        (**self).forward(distance);
    }
    fn backward(&mut self, distance: f64) {
        (**self).backward(distance);
    }
    fn turn_left(&mut self, degrees: f64) {
        (**self).turn_left(degrees);
    }
    fn turn_right(&mut self, degrees: f64) {
        (**self).turn_right(degrees);
    }
    fn print(&mut self, text: &str) {
        (**self).print(text);
    }
}

impl<T: TurtleActions + ?Sized> TurtleActions for Box<T> {
    fn forward(&mut self, distance: f64) {
        (**self).forward(distance);
    }
    fn backward(&mut self, distance: f64) {
        (**self).backward(distance);
    }
    fn turn_left(&mut self, degrees: f64) {
        (**self).turn_left(degrees);
    }
    fn turn_right(&mut self, degrees: f64) {
        (**self).turn_right(degrees);
    }
    fn print(&mut self, text: &str) {
        (**self).print(text);
    }
}

/// One port call as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "arg", rename_all = "snake_case")]
pub enum TurtleAction {
    Forward(f64),
    Backward(f64),
    TurnLeft(f64),
    TurnRight(f64),
    Print(String),
}

/// Headless port: every call becomes an `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingTurtle;

impl TurtleActions for LoggingTurtle {
    fn forward(&mut self, distance: f64) {
        info!(distance, "should forward by {distance}");
    }
    fn backward(&mut self, distance: f64) {
        info!(distance, "should backward by {distance}");
    }
    fn turn_left(&mut self, degrees: f64) {
        info!(degrees, "should turn left by {degrees}");
    }
    fn turn_right(&mut self, degrees: f64) {
        info!(degrees, "should turn right by {degrees}");
    }
    fn print(&mut self, text: &str) {
        info!(text, "should print {text}");
    }
}

/// Port that keeps every call, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionRecorder {
    actions: Vec<TurtleAction>,
}

impl ActionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> &[TurtleAction] {
        &self.actions
    }

    /// Remove and return everything recorded so far.
    pub fn take(&mut self) -> Vec<TurtleAction> {
        std::mem::take(&mut self.actions)
    }

    /// Text of every `print` call, in order.
    pub fn printed(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                TurtleAction::Print(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl TurtleActions for ActionRecorder {
    fn forward(&mut self, distance: f64) {
        self.actions.push(TurtleAction::Forward(distance));
    }
    fn backward(&mut self, distance: f64) {
        self.actions.push(TurtleAction::Backward(distance));
    }
    fn turn_left(&mut self, degrees: f64) {
        self.actions.push(TurtleAction::TurnLeft(degrees));
    }
    fn turn_right(&mut self, degrees: f64) {
        self.actions.push(TurtleAction::TurnRight(degrees));
    }
    fn print(&mut self, text: &str) {
        self.actions.push(TurtleAction::Print(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_order() {
        let mut rec = ActionRecorder::new();
        rec.forward(1.0);
        rec.turn_right(90.0);
        rec.print("hi");
        assert_eq!(
            rec.actions(),
            &[
                TurtleAction::Forward(1.0),
                TurtleAction::TurnRight(90.0),
                TurtleAction::Print("hi".into()),
            ]
        );
        assert_eq!(rec.printed(), vec!["hi"]);
    }

    #[test]
    fn test_take_empties_recorder() {
        let mut rec = ActionRecorder::new();
        rec.backward(2.0);
        assert_eq!(rec.take(), vec![TurtleAction::Backward(2.0)]);
        assert!(rec.actions().is_empty());
    }

    #[test]
    fn test_port_through_mutable_reference() {
        fn drive(mut port: impl TurtleActions) {
            port.forward(3.0);
        }
        let mut rec = ActionRecorder::new();
        drive(&mut rec);
        assert_eq!(rec.actions(), &[TurtleAction::Forward(3.0)]);
    }

    #[test]
    fn test_action_json() {
        let json = serde_json::to_string(&TurtleAction::TurnLeft(90.0)).unwrap();
        assert_eq!(json, r#"{"action":"turn_left","arg":90.0}"#);
    }
}
