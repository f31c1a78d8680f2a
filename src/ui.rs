use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;
use wordrace::{Mistake, Phase, SessionEngine};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let engine = &self.engine;
        match engine.phase() {
            Phase::Start => render_start(engine, area, buf),
            Phase::Playing => render_playing(engine, area, buf),
            Phase::Over => render_over(engine, area, buf),
            Phase::Review => render_review(engine, area, buf),
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn legend(text: &str) -> Paragraph<'_> {
    Paragraph::new(Span::styled(
        text,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
}

fn centered_rows(area: Rect, heights: &[u16]) -> Vec<Rect> {
    let content: u16 = heights.iter().sum();
    let pad = area.height.saturating_sub(content) / 2;

    let mut constraints = vec![Constraint::Length(pad)];
    constraints.extend(heights.iter().map(|h| Constraint::Length(*h)));
    constraints.push(Constraint::Min(0));

    Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(constraints)
        .split(area)
        .iter()
        .skip(1)
        .take(heights.len())
        .copied()
        .collect()
}

fn render_start(engine: &SessionEngine, area: Rect, buf: &mut Buffer) {
    let rows = centered_rows(area, &[1, 1, 2, 1]);

    Paragraph::new(Span::styled(
        "Chinese Word Challenge",
        bold().fg(Color::Cyan),
    ))
    .alignment(Alignment::Center)
    .render(rows[0], buf);

    Paragraph::new(format!(
        "You have {} seconds to translate as many words as possible.",
        engine.config().game_duration_secs
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(rows[1], buf);

    legend("(enter) start / (esc)ape").render(rows[3], buf);
}

/// Pad `text` with spaces up to `width` terminal columns.
fn pad_to_width(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

fn render_playing(engine: &SessionEngine, area: Rect, buf: &mut Buffer) {
    let state = engine.state();
    let Some(question) = state.current_question.as_ref() else {
        return;
    };

    let rows = centered_rows(area, &[1, 1, 1, 3, 1, 6, 1, 1]);

    Paragraph::new(Span::styled(
        format!(
            "Question {}   Score {}",
            engine.question_number(),
            state.score
        ),
        Style::default().add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center)
    .render(rows[0], buf);

    let gauge_color = if state.time_remaining <= 10 {
        Color::Red
    } else {
        Color::Green
    };
    Gauge::default()
        .gauge_style(Style::default().fg(gauge_color))
        .ratio(engine.time_fraction().clamp(0.0, 1.0))
        .label(format!("{}s", state.time_remaining))
        .render(rows[1], buf);

    Paragraph::new(Span::styled(question.word.prompt.as_str(), bold()))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .render(rows[3], buf);

    let option_width = question
        .options
        .iter()
        .map(|o| o.width())
        .max()
        .unwrap_or(0);

    let lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let label = format!("({}) {}", idx + 1, pad_to_width(option, option_width));
            let style = match state.pending_answer.as_ref() {
                None => bold(),
                Some(_) if question.is_correct(option) => bold().fg(Color::Green),
                Some(selected) if selected.as_chosen() == Some(option.as_str()) => {
                    bold().fg(Color::Red)
                }
                Some(_) => Style::default().add_modifier(Modifier::DIM),
            };
            Line::from(Span::styled(label, style))
        })
        .collect();

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(rows[5], buf);

    legend("(1-4) answer / (s)kip / (n)ew / (esc)ape").render(rows[7], buf);
}

fn render_over(engine: &SessionEngine, area: Rect, buf: &mut Buffer) {
    let summary = engine.summary();
    let rows = centered_rows(area, &[1, 1, 1, 1, 1, 1, 1]);

    let (title, style) = if summary.perfect {
        ("全对！太棒了！", bold().fg(Color::Green))
    } else {
        ("时间到！", bold())
    };
    Paragraph::new(Span::styled(title, style))
        .alignment(Alignment::Center)
        .render(rows[0], buf);

    let figures = [
        format!("答题数量：{}", summary.questions_asked),
        format!("正确答案：{}", summary.score),
        format!("正确率：{}%", summary.accuracy),
    ];
    for (row, text) in rows[2..5].iter().zip(figures) {
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .render(*row, buf);
    }

    let mistakes = engine.state().mistakes.len();
    let keys = if mistakes > 0 {
        format!("(r)eview mistakes ({mistakes}) / (n)ew / (esc)ape")
    } else {
        "(n)ew / (esc)ape".to_string()
    };
    legend(&keys).render(rows[6], buf);
}

fn mistake_line(mistake: &Mistake, show_selected: bool) -> Line<'_> {
    let mut spans = vec![
        Span::styled(mistake.prompt.as_str(), bold()),
        Span::raw("  "),
        Span::styled(mistake.answer.as_str(), Style::default().fg(Color::Green)),
    ];
    if show_selected {
        spans.push(Span::styled(
            format!("  你的答案：{}", mistake.selected),
            Style::default().fg(Color::Red),
        ));
    }
    Line::from(spans)
}

fn render_review(engine: &SessionEngine, area: Rect, buf: &mut Buffer) {
    let state = engine.state();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let wrong: Vec<&Mistake> = state.wrong_answers().collect();
    let skipped: Vec<&Mistake> = state.skipped().collect();

    let mut lines: Vec<Line> = Vec::new();
    if !wrong.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("答错的单词 ({})", wrong.len()),
            bold().fg(Color::Red),
        )));
        lines.extend(wrong.iter().map(|m| mistake_line(m, true)));
        lines.push(Line::default());
    }
    if !skipped.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("跳过的单词 ({})", skipped.len()),
            bold().fg(Color::Yellow),
        )));
        lines.extend(skipped.iter().map(|m| mistake_line(m, false)));
    }
    if state.mistakes.is_empty() {
        lines.push(Line::from(Span::styled(
            "恭喜！全部回答正确！",
            bold().fg(Color::Green),
        )));
    }

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("复习"))
        .wrap(Wrap { trim: false })
        .render(chunks[0], buf);

    legend("(b)ack / (n)ew / (ctrl+c) quit").render(chunks[1], buf);
}
