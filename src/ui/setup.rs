use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, SetupField, SetupForm};
use crate::assistant::{QUIZ_PATH, script_for};
use crate::source::QuestionSource;

/// Form content plus the top and bottom border.
const FORM_HEIGHT: u16 = 16;

pub fn render<S: QuestionSource>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(FORM_HEIGHT),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    let content = form_lines(app.form());

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);

    if let Some(notice) = app.notice() {
        let widget = Paragraph::new(notice)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Red).bold());
        frame.render_widget(widget, chunks[2]);
    }

    let controls = Paragraph::new("j/k field  ·  h/l change  ·  enter start  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[4]);
}

fn form_lines(form: &SetupForm) -> Vec<Line<'static>> {
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "TRIVIA QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
    ];

    if let Some(script) = script_for(QUIZ_PATH) {
        content.push(Line::from(
            format!("Pica: {}", script.text).fg(Color::DarkGray).italic(),
        ));
        content.push(Line::from(""));
    }

    content.push(field_line(
        "Questions",
        form.count.to_string(),
        form.field == SetupField::Count,
    ));
    content.push(Line::from(""));
    content.push(field_line(
        "Topic",
        form.topic().name.to_string(),
        form.field == SetupField::Topic,
    ));
    content.push(Line::from(""));
    content.push(field_line(
        "Difficulty",
        form.difficulty.to_string(),
        form.field == SetupField::Difficulty,
    ));
    content.push(Line::from(""));
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "ENTER",
        Style::default().fg(Color::Green).bold(),
    )));
    content.push(Line::from("to generate the quiz".fg(Color::DarkGray)));

    content
}

fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let (marker_style, value_style) = if focused {
        (
            Style::default().fg(Color::Cyan).bold(),
            Style::default().fg(Color::Cyan).bold(),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::White),
        )
    };

    Line::from(vec![
        Span::styled(format!("{:<12}", label), Style::default().fg(Color::Gray)),
        Span::styled("< ", marker_style),
        Span::styled(format!("{:^18}", value), value_style),
        Span::styled(" >", marker_style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuizConfig;

    #[test]
    fn test_form_fits_its_panel() {
        let form = SetupForm::from_config(&QuizConfig::default());
        let lines = form_lines(&form);
        assert_eq!(lines.len() as u16 + 2, FORM_HEIGHT);
        assert_eq!(lines.last().unwrap().to_string(), "to generate the quiz");
    }
}
