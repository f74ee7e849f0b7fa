//! Per-tick turtle motion.
//!
//! The host calls [`Stepper::step`] once per frame with the elapsed time.
//! Intents run strictly in issue order and one motion runs to completion
//! before the next starts. A finished translate leaves a trail segment.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::queue::IntentSource;
use crate::Intent;

/// Motion rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StepperConfig {
    /// Distance units per second.
    pub speed: f64,
    /// Degrees per second.
    pub turn_speed: f64,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            speed: 4.0,
            turn_speed: 90.0,
        }
    }
}

impl StepperConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// A point on the ground plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    fn offset(self, heading_degrees: f64, distance: f64) -> Point {
        let (sin, cos) = heading_degrees.to_radians().sin_cos();
        Point {
            x: self.x - sin * distance,
            z: self.z - cos * distance,
        }
    }
}

/// Where the turtle is and which way it faces.
///
/// Heading 0 faces -z; positive headings turn left (counter-clockwise seen
/// from above). Headings are kept in `[0, 360)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    pub position: Point,
    pub heading_degrees: f64,
}

/// A drawn line left by a completed translate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// What a step finished.
#[derive(Debug, Clone, PartialEq)]
pub enum StepEvent {
    Moved { from: Point, to: Point },
    Turned { heading_degrees: f64 },
    Printed(String),
}

#[derive(Debug, Clone)]
enum Motion {
    Translate {
        from: Point,
        to: Point,
        length: f64,
        travelled: f64,
    },
    Turn {
        from: f64,
        /// Signed: positive is left.
        delta: f64,
        turned: f64,
    },
}

/// Owns the turtle state and advances at most one motion at a time.
#[derive(Debug, Clone)]
pub struct Stepper {
    config: StepperConfig,
    state: TurtleState,
    active: Option<Motion>,
    trail: Vec<Segment>,
}

impl Default for Stepper {
    fn default() -> Self {
        Self::new(StepperConfig::default())
    }
}

impl Stepper {
    pub fn new(config: StepperConfig) -> Self {
        Self {
            config,
            state: TurtleState::default(),
            active: None,
            trail: Vec::new(),
        }
    }

    pub fn state(&self) -> &TurtleState {
        &self.state
    }

    pub fn trail(&self) -> &[Segment] {
        &self.trail
    }

    /// `true` when no motion is in progress.
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Advance by `dt` seconds. When idle, the next intent is taken from
    /// `source` and starts in this same step. Returns the event for an
    /// intent that finished during this step.
    ///
    /// A move or turn by a non-finite amount is skipped with a warning and
    /// draws nothing; the intent after it starts instead.
    pub fn step(&mut self, source: &mut impl IntentSource, dt: f64) -> Option<StepEvent> {
        while self.active.is_none() {
            let intent = source.next_intent()?;
            trace!(?intent, "start intent");
            match intent {
                Intent::Print(text) => return Some(StepEvent::Printed(text)),
                Intent::Forward(d) => self.start_translate(d),
                Intent::Backward(d) => self.start_translate(-d),
                Intent::TurnLeft(deg) => self.start_turn(deg),
                Intent::TurnRight(deg) => self.start_turn(-deg),
            }
        }
        self.advance(dt.max(0.0))
    }

    /// Step until both the stepper and the source are idle, or `max_steps`
    /// is reached. Returns every event in order.
    pub fn run_until_idle(
        &mut self,
        source: &mut impl IntentSource,
        dt: f64,
        max_steps: usize,
    ) -> Vec<StepEvent> {
        let mut events = Vec::new();
        for _ in 0..max_steps {
            let was_idle = self.is_idle();
            match self.step(source, dt) {
                Some(event) => events.push(event),
                None if was_idle && self.is_idle() => break,
                None => {}
            }
        }
        events
    }

    /// Abandon the motion in progress where it stands. Returns `true` if
    /// there was one.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.active.take();
        if let Some(motion) = &cancelled {
            debug!(?motion, position = ?self.state.position, "motion cancelled");
        }
        cancelled.is_some()
    }

    fn start_translate(&mut self, signed_distance: f64) {
        if !signed_distance.is_finite() {
            warn!(distance = signed_distance, "skipping move by a non-finite distance");
            return;
        }
        let from = self.state.position;
        let to = from.offset(self.state.heading_degrees, signed_distance);
        self.active = Some(Motion::Translate {
            from,
            to,
            length: signed_distance.abs(),
            travelled: 0.0,
        });
    }

    fn start_turn(&mut self, delta: f64) {
        if !delta.is_finite() {
            warn!(degrees = delta, "skipping turn by a non-finite angle");
            return;
        }
        self.active = Some(Motion::Turn {
            from: self.state.heading_degrees,
            delta,
            turned: 0.0,
        });
    }

    fn advance(&mut self, dt: f64) -> Option<StepEvent> {
        match self.active.as_mut()? {
            Motion::Translate {
                from,
                to,
                length,
                travelled,
            } => {
                *travelled += self.config.speed * dt;
                if *travelled >= *length {
                    let segment = Segment {
                        from: *from,
                        to: *to,
                    };
                    self.state.position = segment.to;
                    self.trail.push(segment);
                    self.active = None;
                    debug!(?segment, "translate done");
                    return Some(StepEvent::Moved {
                        from: segment.from,
                        to: segment.to,
                    });
                }
                let t = *travelled / *length;
                self.state.position =
                    Point::new(from.x + (to.x - from.x) * t, from.z + (to.z - from.z) * t);
                None
            }
            Motion::Turn {
                from,
                delta,
                turned,
            } => {
                *turned += self.config.turn_speed * dt;
                if *turned >= delta.abs() {
                    let heading = normalize_degrees(*from + *delta);
                    self.state.heading_degrees = heading;
                    self.active = None;
                    debug!(heading, "turn done");
                    return Some(StepEvent::Turned {
                        heading_degrees: heading,
                    });
                }
                self.state.heading_degrees = normalize_degrees(*from + delta.signum() * *turned);
                None
            }
        }
    }
}

fn normalize_degrees(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
    }

    #[test]
    fn test_offset_heading_zero_faces_negative_z() {
        let p = Point::default().offset(0.0, 10.0);
        assert_eq!(p, Point::new(0.0, -10.0));
    }

    #[test]
    fn test_config_from_json() {
        let config = StepperConfig::from_json(r#"{ "speed": 8.0 }"#).unwrap();
        assert_eq!(config.speed, 8.0);
        assert_eq!(config.turn_speed, 90.0);
    }
}
