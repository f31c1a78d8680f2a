use std::collections::HashSet;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use wordrace::corpus::{Corpus, DEFAULT_CORPUS};
use wordrace::question::{QuestionFactory, OPTION_COUNT};
use wordrace::{Phase, Selection, SessionConfig, SessionEngine, WordBank, WordPair};

/// End-to-end scenarios for whole quiz sessions driven through the public engine API.

fn five_pair_bank() -> WordBank {
    WordBank::new(vec![
        WordPair::new("koala", "考拉"),
        WordPair::new("dream", "梦想"),
        WordPair::new("net", "网"),
        WordPair::new("bite", "咬"),
        WordPair::new("cola", "可乐"),
    ])
    .unwrap()
}

fn default_bank() -> WordBank {
    Corpus::embedded(DEFAULT_CORPUS)
        .unwrap()
        .into_bank()
        .unwrap()
}

fn current_answer(engine: &SessionEngine) -> String {
    engine
        .state()
        .current_question
        .as_ref()
        .unwrap()
        .word
        .answer
        .clone()
}

#[test]
fn perfect_run_over_five_pair_bank() {
    let mut engine = SessionEngine::with_seed(five_pair_bank(), SessionConfig::default(), 1).unwrap();
    engine.start().unwrap();

    let mut prompts = HashSet::new();
    for _ in 0..5 {
        let question = engine.state().current_question.clone().unwrap();
        prompts.insert(question.word.prompt.clone());

        assert!(engine.submit_answer(&question.word.answer).is_some());
        // Let the feedback window run out
        engine.update(Duration::from_millis(500)).unwrap();
    }

    let state = engine.state();
    assert_eq!(state.score, 5);
    assert_eq!(state.questions_asked, 5);
    assert!(state.mistakes.is_empty());
    assert!(engine.is_perfect_run());
    assert_eq!(engine.accuracy(), 100);
    // Five answers over a five word bank cover every prompt exactly once
    assert_eq!(prompts.len(), 5);
}

#[test]
fn fifty_ticks_end_the_game() {
    let mut engine = SessionEngine::with_seed(default_bank(), SessionConfig::default(), 2).unwrap();
    engine.start().unwrap();
    assert_eq!(engine.state().time_remaining, 50);

    for _ in 0..50 {
        engine.tick();
    }

    assert_eq!(engine.phase(), Phase::Over);
    assert_eq!(engine.state().time_remaining, 0);
    assert_eq!(engine.accuracy(), 0);
    assert!(!engine.is_perfect_run());
}

#[test]
fn reset_mid_question_discards_pending_advance() {
    let mut engine = SessionEngine::with_seed(five_pair_bank(), SessionConfig::default(), 3).unwrap();
    engine.start().unwrap();
    let answer = current_answer(&engine);
    let pending = engine.submit_answer(&answer).unwrap();

    engine.reset();

    // Both the owned timer and a caller-held ticket must be inert now
    engine.update(Duration::from_secs(5)).unwrap();
    assert!(!engine.advance(pending.ticket).unwrap());
    assert_eq!(engine.phase(), Phase::Start);
    assert_eq!(engine.state().questions_asked, 0);
    assert_eq!(engine.state().score, 0);

    // Same for a new game started right away
    engine.start().unwrap();
    assert!(!engine.advance(pending.ticket).unwrap());
    assert_eq!(engine.state().questions_asked, 0);
}

#[test]
fn advance_after_game_over_is_a_no_op() {
    let mut engine = SessionEngine::with_seed(five_pair_bank(), SessionConfig::default(), 4).unwrap();
    engine.start().unwrap();
    let pending = engine.skip().unwrap();

    for _ in 0..50 {
        engine.tick();
    }
    assert_eq!(engine.phase(), Phase::Over);
    let asked = engine.state().questions_asked;

    assert!(!engine.advance(pending.ticket).unwrap());
    engine.update(Duration::from_secs(10)).unwrap();
    assert_eq!(engine.state().questions_asked, asked);
}

#[test]
fn skip_is_recorded_with_marker_and_never_scores() {
    let mut engine = SessionEngine::with_seed(default_bank(), SessionConfig::default(), 5).unwrap();
    engine.start().unwrap();

    for _ in 0..10 {
        engine.skip().unwrap();
        engine.update(Duration::from_secs(2)).unwrap();
    }

    let state = engine.state();
    assert_eq!(state.score, 0);
    assert_eq!(state.mistakes.len(), 10);
    assert!(state.mistakes.iter().all(|m| m.selected == Selection::Skipped));
    assert_eq!(state.skipped().count(), 10);
    assert_eq!(state.wrong_answers().count(), 0);
}

#[test]
fn score_never_exceeds_questions_asked() {
    let mut engine = SessionEngine::with_seed(default_bank(), SessionConfig::default(), 6).unwrap();
    let mut rng = StdRng::seed_from_u64(60);
    engine.start().unwrap();

    // Random play in 100ms slices until the clock runs out
    while engine.phase() == Phase::Playing {
        if engine.state().pending_answer.is_none() {
            let question = engine.state().current_question.clone().unwrap();
            match rng.gen_range(0..3) {
                0 => {
                    engine.skip();
                }
                _ => {
                    let pick = rng.gen_range(0..OPTION_COUNT);
                    engine.submit_answer(&question.options[pick]);
                }
            }
        }
        engine.update(Duration::from_millis(100)).unwrap();

        let state = engine.state();
        assert!(state.score <= state.questions_asked + u32::from(state.pending_answer.is_some()));
    }

    let state = engine.state();
    assert!(state.score <= state.questions_asked);
    assert_eq!(
        state.questions_asked as usize,
        state.score as usize + state.mistakes.len()
    );
}

#[test]
fn questions_never_repeat_within_a_cycle() {
    let bank = default_bank();
    let mut rng = StdRng::seed_from_u64(7);
    let mut used = HashSet::new();

    for cycle in 0..2 {
        let mut seen = HashSet::new();
        for _ in 0..bank.size() {
            let (question, next_used) = QuestionFactory::next(&used, &bank, &mut rng).unwrap();
            assert!(
                seen.insert(question.word.prompt.clone()),
                "prompt {} repeated in cycle {cycle}",
                question.word.prompt
            );
            assert_eq!(question.options.len(), OPTION_COUNT);
            let unique: HashSet<&String> = question.options.iter().collect();
            assert_eq!(unique.len(), OPTION_COUNT);
            assert_eq!(
                question
                    .options
                    .iter()
                    .filter(|o| **o == question.word.answer)
                    .count(),
                1
            );
            used = next_used;
        }
        assert_eq!(seen.len(), bank.size());
    }
}

#[test]
fn double_submission_leaves_state_untouched() {
    let mut engine = SessionEngine::with_seed(five_pair_bank(), SessionConfig::default(), 8).unwrap();
    engine.start().unwrap();
    let answer = current_answer(&engine);

    engine.submit_answer(&answer).unwrap();
    let score = engine.state().score;
    let mistakes = engine.state().mistakes.len();

    assert!(engine.submit_answer(&answer).is_none());
    assert!(engine.submit_answer("not an option").is_none());
    assert_eq!(engine.state().score, score);
    assert_eq!(engine.state().mistakes.len(), mistakes);
}
