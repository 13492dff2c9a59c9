use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::models::AnswerRecord;
use crate::session::Summary;
use crate::source::QuestionSource;

const QUESTION_PREVIEW_LENGTH: usize = 70;

pub fn render<S: QuestionSource>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let Some(session) = app.session() else {
        return;
    };
    let summary = session.summary();

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], &summary);
    render_answer_breakdown(frame, chunks[2], session.answers(), app.result_scroll());
    render_controls(frame, chunks[3]);
}

fn get_grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, summary: &Summary) {
    let percentage = summary.percentage();
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ SUMMARY",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Correct: {} / {}  ({:.0}%)",
                summary.score, summary.total, percentage
            ),
            Style::default().fg(get_grade_color(percentage)).bold(),
        )),
        Line::from(format!("Total time taken: {}s", summary.elapsed_secs).fg(Color::Gray)),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_answer_breakdown(frame: &mut Frame, area: Rect, answers: &[AnswerRecord], scroll: usize) {
    let lines: Vec<Line> = answers
        .iter()
        .enumerate()
        .flat_map(|(index, answer)| answer_lines(index, answer))
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll_offset(scroll), 0));
    frame.render_widget(widget, area);
}

/// Rows to skip for `scroll` answers, saturating at the widget's limit.
fn scroll_offset(scroll: usize) -> u16 {
    u16::try_from(scroll.saturating_mul(3)).unwrap_or(u16::MAX)
}

/// Three lines per answer: prompt, the player's answer, then the correct
/// answer when it differs (blank otherwise).
fn answer_lines(index: usize, answer: &AnswerRecord) -> [Line<'static>; 3] {
    let (symbol, color) = if answer.was_correct {
        ("+", Color::Green)
    } else {
        ("-", Color::Red)
    };

    let prompt = Line::from(vec![
        Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
        Span::styled(
            format!("{:2}. ", index + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            truncate_question(&answer.prompt),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let given = Line::from(vec![
        Span::styled("      Your answer: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            answer
                .selected_option
                .clone()
                .unwrap_or_else(|| "No Answer".to_string()),
            Style::default().fg(color),
        ),
    ]);

    let correction = if answer.was_correct {
        Line::from("")
    } else {
        Line::from(vec![
            Span::styled("      Correct answer: ", Style::default().fg(Color::DarkGray)),
            Span::styled(answer.correct_answer.clone(), Style::default().fg(Color::Cyan)),
        ])
    };

    [prompt, given, correction]
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r retry  ·  n new quiz  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_question() {
        assert_eq!(truncate_question("short"), "short");
        let long = "x".repeat(QUESTION_PREVIEW_LENGTH + 5);
        let preview = truncate_question(&long);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), QUESTION_PREVIEW_LENGTH + 3);
    }

    #[test]
    fn test_scroll_offset_saturates() {
        assert_eq!(scroll_offset(0), 0);
        assert_eq!(scroll_offset(4), 12);
        assert_eq!(scroll_offset(30_000), u16::MAX);
        assert_eq!(scroll_offset(usize::MAX), u16::MAX);
    }

    #[test]
    fn test_grade_colors() {
        assert_eq!(get_grade_color(100.0), Color::Green);
        assert_eq!(get_grade_color(75.0), Color::Cyan);
        assert_eq!(get_grade_color(50.0), Color::Yellow);
        assert_eq!(get_grade_color(0.0), Color::Red);
    }

    #[test]
    fn test_unanswered_shows_no_answer_and_correction() {
        let answer = AnswerRecord {
            prompt: "Q".into(),
            selected_option: None,
            correct_answer: "B".into(),
            was_correct: false,
        };
        let [_, given, correction] = answer_lines(0, &answer);
        assert!(given.to_string().contains("No Answer"));
        assert!(correction.to_string().contains("Correct answer: B"));
    }
}
