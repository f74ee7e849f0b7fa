//! The line-oriented console: one submission per line, then play the turtle
//! forward until it stops.

use std::io::{self, BufRead, Write};

use logo3d_eval::EvalOptions;
use logo3d_interp::{InterpretError, Session};
use logo3d_turtle::{IntentQueue, StepEvent, Stepper, StepperConfig};

/// Seconds per simulated frame.
pub const TICK: f64 = 1.0 / 60.0;
/// Frames one submission may animate before the rest is dropped.
pub const MAX_FRAMES: usize = 1_000_000;

pub struct Console<W: Write> {
    session: Session<IntentQueue>,
    stepper: Stepper,
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(options: EvalOptions, stepper: StepperConfig, out: W) -> Self {
        Self {
            session: Session::with_options(IntentQueue::new(), options),
            stepper: Stepper::new(stepper),
            out,
        }
    }

    /// Run every line until end of input or `quit`.
    pub fn run(&mut self, input: impl BufRead) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            if line.trim() == "quit" {
                break;
            }
            self.submit(&line)?;
        }
        self.out.flush()
    }

    /// Interpret one line, then animate whatever it queued.
    pub fn submit(&mut self, line: &str) -> io::Result<()> {
        match self.session.interpret(line) {
            Ok(_) => {}
            Err(InterpretError::Syntax(diagnostics)) => {
                for message in diagnostics.distinct_messages() {
                    writeln!(self.out, "Syntax error: {message}")?;
                }
            }
            // Effects issued before the failure still play.
            Err(InterpretError::Runtime(error)) => writeln!(self.out, "Error: {error}")?,
        }

        let events = self
            .stepper
            .run_until_idle(self.session.actions_mut(), TICK, MAX_FRAMES);
        // Anything still running here hit the frame cap.
        let interrupted = self.stepper.cancel();
        let dropped = self.session.actions_mut().clear();
        if interrupted || dropped > 0 {
            writeln!(self.out, "Stopped: {dropped} commands not run")?;
        }

        let mut moved = false;
        for event in events {
            match event {
                StepEvent::Printed(text) => writeln!(self.out, "{text}")?,
                StepEvent::Moved { .. } | StepEvent::Turned { .. } => moved = true,
            }
        }
        if moved {
            let state = self.stepper.state();
            writeln!(
                self.out,
                "turtle at ({:.2}, {:.2}) heading {:.1}",
                state.position.x, state.position.z, state.heading_degrees
            )?;
        }
        Ok(())
    }

    pub fn stepper(&self) -> &Stepper {
        &self.stepper
    }
}
