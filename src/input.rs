use crate::engine::SessionEngine;
use crate::error::GameError;
use crate::question::OPTION_COUNT;
use crate::session::Phase;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Player intents forwarded from the terminal to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start,
    Choose(usize),
    Skip,
    OpenReview,
    CloseReview,
    Reset,
    Quit,
}

/// Map a key press to an intent for the current phase.
pub fn intent_for_key(phase: Phase, key: KeyEvent) -> Option<Intent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Intent::Quit);
    }

    match (phase, key.code) {
        (Phase::Review, KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b' | 'r')) => {
            Some(Intent::CloseReview)
        }
        (_, KeyCode::Esc) => Some(Intent::Quit),
        (_, KeyCode::Char('n')) => Some(Intent::Reset),
        (Phase::Start, KeyCode::Enter | KeyCode::Char(' ')) => Some(Intent::Start),
        (Phase::Playing, KeyCode::Char(c @ '1'..='9')) => {
            let index = c as usize - '1' as usize;
            (index < OPTION_COUNT).then_some(Intent::Choose(index))
        }
        (Phase::Playing, KeyCode::Char('s' | ' ')) => Some(Intent::Skip),
        (Phase::Over, KeyCode::Char('r')) => Some(Intent::OpenReview),
        (Phase::Over, KeyCode::Enter) => Some(Intent::Reset),
        _ => None,
    }
}

/// Forward an intent to the engine. `Quit` is the caller's business.
pub fn apply_intent(engine: &mut SessionEngine, intent: Intent) -> Result<(), GameError> {
    match intent {
        Intent::Start => {
            engine.start()?;
        }
        Intent::Choose(index) => {
            engine.submit_option(index);
        }
        Intent::Skip => {
            engine.skip();
        }
        Intent::OpenReview => {
            engine.open_review();
        }
        Intent::CloseReview => {
            engine.close_review();
        }
        Intent::Reset => engine.reset(),
        Intent::Quit => {}
    }
    Ok(())
}
