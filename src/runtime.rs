use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::engine::SessionEngine;
use crate::error::GameError;

/// Player input forwarded from the terminal
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizEvent {
    Key(KeyEvent),
    Resize,
}

/// Spawn the terminal reader thread. It forwards key presses and resizes until
/// the receiver is dropped or the terminal stops producing events.
pub fn spawn_terminal_events() -> Receiver<QuizEvent> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || loop {
        let forwarded = match event::read() {
            // Windows reports releases too
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => QuizEvent::Key(key),
            Ok(Event::Resize(_, _)) => QuizEvent::Resize,
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("terminal event stream closed: {e}");
                break;
            }
        };
        if tx.send(forwarded).is_err() {
            break;
        }
    });

    rx
}

/// Reports how much time passed since it was last asked
pub trait Clock {
    fn lap(&mut self) -> Duration;
}

#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    last: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        elapsed
    }
}

/// Every lap lasts exactly `step`, however long the caller actually waited.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepClock {
    step: Duration,
}

impl FixedStepClock {
    pub fn new(step: Duration) -> Self {
        Self { step }
    }
}

impl Clock for FixedStepClock {
    fn lap(&mut self) -> Duration {
        self.step
    }
}

/// One pass of the loop: the time that went by and the input that arrived, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub elapsed: Duration,
    pub event: Option<QuizEvent>,
}

/// Waits for input in `poll_interval` slices and keeps the engine's timers on
/// the clock's time.
pub struct Runner<C: Clock> {
    events: Receiver<QuizEvent>,
    clock: C,
    poll_interval: Duration,
}

impl<C: Clock> Runner<C> {
    pub fn new(events: Receiver<QuizEvent>, clock: C, poll_interval: Duration) -> Self {
        Self {
            events,
            clock,
            poll_interval,
        }
    }

    pub fn step(&mut self) -> Step {
        let event = match self.events.recv_timeout(self.poll_interval) {
            Ok(ev) => Some(ev),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                // No sender left; still pace the loop so timers keep running
                thread::sleep(self.poll_interval);
                None
            }
        };
        Step {
            elapsed: self.clock.lap(),
            event,
        }
    }

    /// Take one step, feed its elapsed time to `engine` and hand back the input.
    pub fn drive(&mut self, engine: &mut SessionEngine) -> Result<Option<QuizEvent>, GameError> {
        let step = self.step();
        engine.update(step.elapsed)?;
        Ok(step.event)
    }
}
