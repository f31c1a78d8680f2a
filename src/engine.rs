use crate::error::GameError;
use crate::question::{QuestionFactory, OPTION_COUNT};
use crate::session::{GameSummary, Mistake, Phase, Selection, SessionConfig, SessionState};
use crate::timer::{AdvanceTicket, Fired, ScheduledAdvance, Timers};
use crate::word_bank::WordBank;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::time::Duration;

const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Runs one quiz session at a time: Start -> Playing -> Over <-> Review, with
/// `reset` returning to Start from anywhere.
///
/// The engine never reads a clock. Time reaches it either through [`update`],
/// which drives the owned timers, or through direct [`tick`]/[`advance`] calls
/// from a caller that schedules its own deferred work. Every handler checks the
/// phase first, so late calls after the game ended or was reset do nothing.
///
/// [`update`]: SessionEngine::update
/// [`tick`]: SessionEngine::tick
/// [`advance`]: SessionEngine::advance
#[derive(Debug)]
pub struct SessionEngine {
    bank: WordBank,
    config: SessionConfig,
    state: SessionState,
    timers: Timers,
    outstanding_advance: Option<AdvanceTicket>,
    rng: StdRng,
}

impl SessionEngine {
    pub fn new(bank: WordBank, config: SessionConfig) -> Result<Self, GameError> {
        Self::with_rng(bank, config, StdRng::from_entropy())
    }

    pub fn with_seed(bank: WordBank, config: SessionConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(bank, config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(bank: WordBank, config: SessionConfig, rng: StdRng) -> Result<Self, GameError> {
        let available = bank.answers().len();
        if available < OPTION_COUNT {
            return Err(GameError::InsufficientPool {
                needed: OPTION_COUNT,
                available,
            });
        }

        Ok(Self {
            state: SessionState::new(config.game_duration_secs),
            bank,
            config,
            timers: Timers::default(),
            outstanding_advance: None,
            rng,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn bank(&self) -> &WordBank {
        &self.bank
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn start(&mut self) -> Result<bool, GameError> {
        if self.state.phase != Phase::Start {
            return Ok(false);
        }

        let (question, used_prompts) =
            QuestionFactory::next(&HashSet::new(), &self.bank, &mut self.rng)?;

        let mut state = SessionState::new(self.config.game_duration_secs);
        state.phase = Phase::Playing;
        state.current_question = Some(question);
        state.used_prompts = used_prompts;
        self.state = state;

        self.timers.cancel_all();
        self.outstanding_advance = None;
        self.timers.start_countdown(COUNTDOWN_PERIOD);

        tracing::info!(
            duration = self.config.game_duration_secs,
            words = self.bank.size(),
            "game started"
        );
        Ok(true)
    }

    /// One second of play has elapsed.
    pub fn tick(&mut self) -> bool {
        if self.state.phase != Phase::Playing {
            return false;
        }

        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
        tracing::trace!(remaining = self.state.time_remaining, "tick");

        if self.state.time_remaining == 0 {
            self.end_game();
        }
        true
    }

    pub fn submit_answer(&mut self, selected: &str) -> Option<ScheduledAdvance> {
        self.answer(Selection::Chosen(selected.to_string()))
    }

    pub fn skip(&mut self) -> Option<ScheduledAdvance> {
        self.answer(Selection::Skipped)
    }

    /// Select the option at `index` of the current question.
    pub fn submit_option(&mut self, index: usize) -> Option<ScheduledAdvance> {
        let selected = self
            .state
            .current_question
            .as_ref()?
            .options
            .get(index)?
            .clone();
        self.submit_answer(&selected)
    }

    fn answer(&mut self, selection: Selection) -> Option<ScheduledAdvance> {
        if self.state.phase != Phase::Playing || self.state.pending_answer.is_some() {
            return None;
        }
        let question = self.state.current_question.as_ref()?;

        let correct = selection
            .as_chosen()
            .is_some_and(|answer| question.is_correct(answer));

        let delay = if correct {
            self.state.score += 1;
            self.config.correct_delay
        } else {
            self.state.mistakes.push(Mistake {
                prompt: question.word.prompt.clone(),
                answer: question.word.answer.clone(),
                selected: selection.clone(),
            });
            self.config.incorrect_delay
        };

        tracing::debug!(
            prompt = %question.word.prompt,
            selected = %selection,
            correct,
            "answer submitted"
        );

        self.state.pending_answer = Some(selection);
        let scheduled = self.timers.schedule_advance(delay);
        self.outstanding_advance = Some(scheduled.ticket);
        Some(scheduled)
    }

    /// Move on to the next question once the feedback window for `ticket` has passed.
    ///
    /// Only the most recently scheduled advance of the running game is honoured.
    pub fn advance(&mut self, ticket: AdvanceTicket) -> Result<bool, GameError> {
        if self.state.phase != Phase::Playing || self.outstanding_advance != Some(ticket) {
            return Ok(false);
        }

        let (question, used_prompts) =
            QuestionFactory::next(&self.state.used_prompts, &self.bank, &mut self.rng)?;

        self.outstanding_advance = None;
        self.state.questions_asked += 1;
        self.state.pending_answer = None;
        self.state.current_question = Some(question);
        self.state.used_prompts = used_prompts;

        tracing::debug!(asked = self.state.questions_asked, "advanced to next question");
        Ok(true)
    }

    pub fn end_game(&mut self) -> bool {
        if self.state.phase != Phase::Playing {
            return false;
        }

        self.timers.cancel_all();
        // An answer still in its feedback window was already scored; count it as asked.
        if self.outstanding_advance.take().is_some() {
            self.state.questions_asked += 1;
            self.state.pending_answer = None;
        }
        self.state.phase = Phase::Over;

        tracing::info!(
            score = self.state.score,
            asked = self.state.questions_asked,
            mistakes = self.state.mistakes.len(),
            "game over"
        );
        true
    }

    pub fn open_review(&mut self) -> bool {
        if self.state.phase != Phase::Over {
            return false;
        }
        self.state.phase = Phase::Review;
        true
    }

    pub fn close_review(&mut self) -> bool {
        if self.state.phase != Phase::Review {
            return false;
        }
        self.state.phase = Phase::Over;
        true
    }

    pub fn reset(&mut self) {
        self.timers.cancel_all();
        self.outstanding_advance = None;
        self.state = SessionState::new(self.config.game_duration_secs);
        tracing::info!("session reset");
    }

    /// Let `elapsed` pass on the owned timers and run whatever fell due.
    pub fn update(&mut self, elapsed: Duration) -> Result<(), GameError> {
        for fired in self.timers.elapse(elapsed) {
            match fired {
                Fired::Tick => {
                    self.tick();
                }
                Fired::Advance(ticket) => {
                    self.advance(ticket)?;
                }
            }
        }
        Ok(())
    }

    pub fn accuracy(&self) -> u32 {
        if self.state.questions_asked == 0 {
            return 0;
        }
        (100.0 * self.state.score as f64 / self.state.questions_asked as f64).round() as u32
    }

    pub fn is_perfect_run(&self) -> bool {
        self.state.questions_asked > 0 && self.state.score == self.state.questions_asked
    }

    /// 1-based number of the question on screen
    pub fn question_number(&self) -> u32 {
        self.state.questions_asked + 1
    }

    /// Share of the time budget still left, for a progress bar
    pub fn time_fraction(&self) -> f64 {
        if self.config.game_duration_secs == 0 {
            return 0.0;
        }
        self.state.time_remaining as f64 / self.config.game_duration_secs as f64
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            questions_asked: self.state.questions_asked,
            score: self.state.score,
            accuracy: self.accuracy(),
            perfect: self.is_perfect_run(),
            wrong_count: self.state.wrong_answers().count(),
            skipped_count: self.state.skipped().count(),
        }
    }
}
