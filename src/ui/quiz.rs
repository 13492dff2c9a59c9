use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::AnswerRecord;
use crate::session::SessionState;
use crate::source::QuestionSource;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render<S: QuestionSource>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let Some(session) = app.session() else {
        return;
    };
    let Some(question) = session.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], session, question.category.as_deref());
    render_countdown(frame, chunks[1], session);
    render_question_text(frame, chunks[3], &question.prompt);
    render_options(
        frame,
        chunks[4],
        session.options(),
        app.highlighted_option(),
        session.pending(),
    );
    render_controls(frame, chunks[5]);
}

fn render_progress(frame: &mut Frame, area: Rect, session: &SessionState, category: Option<&str>) {
    let columns = Layout::horizontal([Constraint::Fill(1), Constraint::Length(12)]).split(area);

    if let Some(category) = category {
        frame.render_widget(Paragraph::new(category).fg(Color::DarkGray), columns[0]);
    }

    let progress = format!(
        "{}/{}",
        session.current_question_number(),
        session.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, columns[1]);
}

fn render_countdown(frame: &mut Frame, area: Rect, session: &SessionState) {
    let remaining = session.time_remaining();
    let ratio = f64::from(remaining) / f64::from(session.time_budget().max(1));
    let color = match remaining {
        0..=3 => Color::Red,
        4..=7 => Color::Yellow,
        _ => Color::Cyan,
    };

    let widget = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{}s", remaining));
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    options: &[String],
    highlighted: usize,
    pending: Option<&AnswerRecord>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let style = option_style(option, index == highlighted, pending);
        let marker = if pending.is_none() && index == highlighted {
            ">"
        } else {
            " "
        };
        let label = OPTION_LABELS.get(index).copied().unwrap_or('?');

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray)
            .padding(Padding::vertical(1)),
    );
    frame.render_widget(widget, area);
}

/// Selected option turns green or red while feedback shows; the rest dim.
fn option_style(option: &str, highlighted: bool, pending: Option<&AnswerRecord>) -> Style {
    match pending {
        Some(record) if record.selected_option.as_deref() == Some(option) => {
            let color = if record.was_correct {
                Color::Green
            } else {
                Color::Red
            };
            Style::default().fg(color).bold()
        }
        Some(_) => Style::default().fg(Color::DarkGray),
        None if highlighted => Style::default().fg(Color::Cyan).bold(),
        None => Style::default().fg(Color::Gray),
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k navigate  ·  enter or 1-4 answer  ·  esc leave  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
