use std::time::Duration;

/// Identifies one scheduled advance. Tickets are never reused within an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvanceTicket(pub(crate) u64);

/// A post-answer advance that has been scheduled but not fired yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAdvance {
    pub ticket: AdvanceTicket,
    pub delay: Duration,
}

/// Deferred work that became due during [`Timers::elapse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fired {
    Tick,
    Advance(AdvanceTicket),
}

#[derive(Debug, Clone, Copy)]
struct Countdown {
    period: Duration,
    until_next: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Deferred {
    ticket: AdvanceTicket,
    remaining: Duration,
}

/// Cooperative timer set owned by the engine: one repeating countdown and at
/// most one one-shot advance. Nothing runs on its own; time only moves when
/// the owner calls [`Timers::elapse`].
#[derive(Debug, Default)]
pub struct Timers {
    countdown: Option<Countdown>,
    deferred: Option<Deferred>,
    next_ticket: u64,
}

impl Timers {
    pub fn start_countdown(&mut self, period: Duration) {
        self.countdown = Some(Countdown {
            period,
            until_next: period,
        });
    }

    pub fn countdown_running(&self) -> bool {
        self.countdown.is_some()
    }

    /// Schedule the one-shot advance, replacing any outstanding one.
    pub fn schedule_advance(&mut self, delay: Duration) -> ScheduledAdvance {
        self.next_ticket += 1;
        let ticket = AdvanceTicket(self.next_ticket);
        self.deferred = Some(Deferred {
            ticket,
            remaining: delay,
        });
        ScheduledAdvance { ticket, delay }
    }

    pub fn pending_ticket(&self) -> Option<AdvanceTicket> {
        self.deferred.map(|d| d.ticket)
    }

    /// Cancel everything. Ticket numbering keeps counting so old tickets stay invalid.
    pub fn cancel_all(&mut self) {
        self.countdown = None;
        self.deferred = None;
    }

    /// Move time forward by `elapsed` and report what became due, oldest first.
    /// A tick and an advance falling due at the same instant report the tick first.
    pub fn elapse(&mut self, elapsed: Duration) -> Vec<Fired> {
        let mut fired = Vec::new();
        let mut budget = elapsed;

        loop {
            let next_tick = self.countdown.map(|c| c.until_next);
            let next_advance = self.deferred.map(|d| d.remaining);

            let step = match (next_tick, next_advance) {
                (Some(t), Some(a)) => t.min(a),
                (Some(t), None) => t,
                (None, Some(a)) => a,
                (None, None) => break,
            };

            if step > budget {
                self.consume(budget);
                break;
            }

            budget -= step;
            self.consume(step);

            if let Some(countdown) = self.countdown.as_mut() {
                if countdown.until_next.is_zero() {
                    countdown.until_next = countdown.period;
                    fired.push(Fired::Tick);
                }
            }
            if let Some(deferred) = self.deferred {
                if deferred.remaining.is_zero() {
                    self.deferred = None;
                    fired.push(Fired::Advance(deferred.ticket));
                }
            }
        }

        fired
    }

    fn consume(&mut self, step: Duration) {
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.until_next = countdown.until_next.saturating_sub(step);
        }
        if let Some(deferred) = self.deferred.as_mut() {
            deferred.remaining = deferred.remaining.saturating_sub(step);
        }
    }
}
