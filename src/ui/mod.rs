mod quiz;
mod result;
mod setup;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::App;
use crate::session::Phase;
use crate::source::QuestionSource;

pub fn render<S: QuestionSource>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.phase() {
        Phase::Setup => setup::render(frame, area, app),
        Phase::Loading => render_loading(frame),
        Phase::InProgress => quiz::render(frame, area, app),
        Phase::Ended => result::render(frame, area, app),
    }
}

pub fn render_loading(frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .split(area);

    let widget = Paragraph::new(vec![
        Line::from(Span::styled(
            "TRIVIA QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from("Loading questions...".fg(Color::Yellow)),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(widget, chunks[1]);
}
