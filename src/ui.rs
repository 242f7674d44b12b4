pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
    Frame,
};
use typerace::view::{LetterStatus, WordStatus, WordView};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(&self.state).render(self, area, buf);
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn word_background(status: WordStatus) -> Style {
    match status {
        WordStatus::Current => Style::default().bg(Color::DarkGray),
        WordStatus::Correct | WordStatus::Incorrect | WordStatus::Upcoming => Style::default(),
    }
}

fn letter_style(status: LetterStatus, word: WordStatus) -> Style {
    let base = word_background(word).patch(bold());
    match (status, word) {
        (LetterStatus::Correct, WordStatus::Current) => base.fg(Color::LightGreen),
        (LetterStatus::Correct, _) => base.fg(Color::Green),
        (LetterStatus::Incorrect, _) => base.fg(Color::Red),
        (LetterStatus::Untyped, _) => base.add_modifier(Modifier::DIM),
    }
}

/// Colored spans for the word list, one space between words
fn word_spans(views: &[WordView]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (idx, view) in views.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        for letter in &view.letters {
            spans.push(Span::styled(
                letter.ch.to_string(),
                letter_style(letter.status, view.status),
            ));
        }
    }
    spans
}
