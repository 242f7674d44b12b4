use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::{bold, word_spans, HORIZONTAL_MARGIN, VERTICAL_MARGIN};
use crate::{App, AppState};

/// A UI screen boundary: renders one app state
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

pub struct TypingScreen;

impl Screen for TypingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let views = app.race.view();
        let text_width: usize = views
            .iter()
            .map(|v| v.text().width() + 1)
            .sum::<usize>()
            .saturating_sub(1);
        let word_lines = (text_width as f64 / width as f64).ceil().max(1.0) as u16;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(word_lines),
                Constraint::Length(1),
                Constraint::Length(3), // input field
                Constraint::Length(1), // clock
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        let words = Paragraph::new(Line::from(word_spans(&views)))
            .alignment(if word_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true });
        words.render(chunks[1], buf);

        let field = Paragraph::new(Line::from(vec![
            Span::styled(app.race.current_input().to_string(), bold()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]))
        .block(Block::default().borders(Borders::ALL));
        field.render(chunks[3], buf);

        let progress = format!(
            "{}/{}   {:.1}s",
            app.race.state().current_word_index,
            app.race.state().words.len(),
            app.race
                .running_time()
                .map(|t| t.as_secs_f64())
                .unwrap_or_default()
        );
        Paragraph::new(Span::styled(
            progress,
            Style::default().add_modifier(Modifier::DIM),
        ))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

        Paragraph::new(Span::styled(
            "(ctrl+r) restart / (esc)ape",
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(chunks[6], buf);
    }
}

pub struct ResultsScreen;

impl ResultsScreen {
    fn stat_lines(app: &App) -> Vec<Line<'static>> {
        let Some(summary) = app.summary() else {
            return vec![Line::from("no result")];
        };

        let mut lines = vec![
            Line::from(Span::styled(
                format!(
                    "{} wpm   {}/{} words   {:.2} s",
                    summary.wpm_label(),
                    summary.correct_words,
                    summary.total_words,
                    summary.elapsed_secs().unwrap_or_default()
                ),
                bold(),
            )),
        ];

        if let (Some(mean), Some(sd)) = (summary.mean_word_ms, summary.word_ms_std_dev) {
            lines.push(Line::from(format!("word time {mean:.0} ± {sd:.0} ms")));
        }
        if let (Some((fw, fd)), Some((sw, sd))) =
            (&summary.fastest_word, &summary.slowest_word)
        {
            lines.push(Line::from(format!(
                "fastest {fw} {} ms   slowest {sw} {} ms",
                fd.as_millis(),
                sd.as_millis()
            )));
        }
        if let Some(best) = app.best_wpm {
            lines.push(Line::from(Span::styled(
                format!("best {best:.2} wpm"),
                Style::default().fg(Color::Cyan),
            )));
        }
        if let Some(room) = &app.room {
            lines.push(Line::from(format!("room {room} (solo)")));
        }
        lines
    }
}

impl Screen for ResultsScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let stats = Self::stat_lines(app);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(stats.len() as u16),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        Paragraph::new(Span::styled(
            "Race Complete!",
            bold().fg(Color::Magenta),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Paragraph::new(stats)
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let rows: Vec<Row> = app
            .race
            .state()
            .words
            .iter()
            .map(|w| {
                let style = if w.is_correct() {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Red)
                };
                Row::new(vec![
                    Cell::from(w.correct_word.clone()),
                    Cell::from(w.user_input.clone()),
                    Cell::from(
                        w.elapsed
                            .map(|d| d.as_millis().to_string())
                            .unwrap_or_else(|| "-".into()),
                    ),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(14),
                Constraint::Length(20),
                Constraint::Length(8),
            ],
        )
        .header(
            Row::new(vec!["word", "typed", "ms"])
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title("Words"));
        table.render(chunks[2], buf);

        Paragraph::new(Span::styled(
            "(r)estart / (esc)ape",
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(chunks[3], buf);
    }
}

pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Typing => Box::new(TypingScreen),
        AppState::Results => Box::new(ResultsScreen),
    }
}
