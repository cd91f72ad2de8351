use std::io;

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::Paragraph;

use crate::error::AppError;

const FOOTER: &str = "\n\nUp and down to scroll, q to quit: ";
/// Rows kept free for the footer.
const RESERVED_ROWS: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerState {
    Viewing,
    Exiting,
}

/// Scroll position over a fixed set of lines.
#[derive(Debug, Clone)]
pub struct Pager {
    lines: Vec<String>,
    offset: usize,
    visible_height: usize,
    state: PagerState,
}

impl Pager {
    pub fn new(text: &str, screen_height: u16) -> Self {
        let mut pager = Pager {
            lines: text.lines().map(str::to_string).collect(),
            offset: 0,
            visible_height: 0,
            state: PagerState::Viewing,
        };
        pager.resize(screen_height);
        pager
    }

    pub fn resize(&mut self, screen_height: u16) {
        self.visible_height = usize::from(screen_height.saturating_sub(RESERVED_ROWS));
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Down => self.offset = (self.offset + 1).min(self.max_offset()),
            KeyCode::Up => self.offset = self.offset.saturating_sub(1),
            KeyCode::Char('q') | KeyCode::Esc => self.state = PagerState::Exiting,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state = PagerState::Exiting;
            }
            _ => {}
        }
    }

    pub fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.visible_height)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn state(&self) -> PagerState {
        self.state
    }

    pub fn visible_lines(&self) -> &[String] {
        let end = (self.offset + self.visible_height).min(self.lines.len());
        &self.lines[self.offset..end]
    }

    /// The visible slice followed by the footer hint.
    pub fn screen_text(&self) -> String {
        let mut output = self.visible_lines().join("\n");
        output.push_str(FOOTER);
        output
    }
}

pub fn draw(frame: &mut Frame, pager: &Pager) {
    frame.render_widget(Paragraph::new(pager.screen_text()), frame.area());
}

/// Shows `text` full screen until the user quits.
pub fn run(text: &str) -> Result<(), AppError> {
    enable_raw_mode()?;
    if let Err(err) = io::stdout().execute(EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(err.into());
    }

    let result = view(text);

    let restored = disable_raw_mode().and_then(|()| {
        io::stdout().execute(LeaveAlternateScreen)?;
        Ok(())
    });
    result?;
    restored?;
    Ok(())
}

fn view(text: &str) -> Result<(), AppError> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut pager = Pager::new(text, terminal.size()?.height);
    tracing::debug!(lines = pager.lines.len(), "opening pager");

    while pager.state() == PagerState::Viewing {
        terminal.draw(|frame| draw(frame, &pager))?;
        match event::read()? {
            Event::Key(key) => pager.handle_key(key),
            Event::Resize(_, height) => pager.resize(height),
            _ => {}
        }
    }

    tracing::debug!(offset = pager.offset(), "closing pager");
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn numbered_lines(count: usize) -> String {
        (0..count).map(|index| format!("line {index}\n")).collect()
    }

    #[test]
    fn visible_height_leaves_room_for_footer() {
        let pager = Pager::new(&numbered_lines(20), 13);
        assert_eq!(pager.visible_lines().len(), 10);
        assert_eq!(pager.max_offset(), 10);
    }

    #[test]
    fn scrolling_clamps_at_both_ends() {
        let mut pager = Pager::new(&numbered_lines(20), 13);
        assert_eq!(pager.offset(), 0);

        pager.handle_key(press(KeyCode::Up));
        assert_eq!(pager.offset(), 0);

        pager.handle_key(press(KeyCode::Down));
        assert_eq!(pager.offset(), 1);

        for _ in 0..9 {
            pager.handle_key(press(KeyCode::Down));
        }
        assert_eq!(pager.offset(), 10);

        pager.handle_key(press(KeyCode::Down));
        assert_eq!(pager.offset(), 10);
        assert_eq!(pager.visible_lines().first().map(String::as_str), Some("line 10"));
        assert_eq!(pager.visible_lines().last().map(String::as_str), Some("line 19"));
    }

    #[test]
    fn short_text_does_not_scroll() {
        let mut pager = Pager::new(&numbered_lines(3), 24);
        pager.handle_key(press(KeyCode::Down));
        assert_eq!(pager.offset(), 0);
        assert_eq!(pager.visible_lines().len(), 3);
    }

    #[test]
    fn q_exits() {
        let mut pager = Pager::new("a\nb", 10);
        pager.handle_key(press(KeyCode::Char('x')));
        assert_eq!(pager.state(), PagerState::Viewing);
        pager.handle_key(press(KeyCode::Char('q')));
        assert_eq!(pager.state(), PagerState::Exiting);
    }

    #[test]
    fn ctrl_c_exits() {
        let mut pager = Pager::new("a", 10);
        pager.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(pager.state(), PagerState::Exiting);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut pager = Pager::new(&numbered_lines(20), 13);
        let mut key = press(KeyCode::Down);
        key.kind = KeyEventKind::Release;
        pager.handle_key(key);
        assert_eq!(pager.offset(), 0);
    }

    #[test]
    fn resize_reclamps_offset() {
        let mut pager = Pager::new(&numbered_lines(20), 13);
        for _ in 0..10 {
            pager.handle_key(press(KeyCode::Down));
        }
        pager.resize(23);
        assert_eq!(pager.max_offset(), 0);
        assert_eq!(pager.offset(), 0);
    }

    #[test]
    fn tiny_screen_shows_only_footer() {
        let pager = Pager::new(&numbered_lines(5), 2);
        assert!(pager.visible_lines().is_empty());
        assert_eq!(pager.screen_text(), FOOTER);
    }

    #[test]
    fn draws_visible_lines_and_footer() {
        let mut pager = Pager::new(&numbered_lines(20), 8);
        pager.handle_key(press(KeyCode::Down));

        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal.draw(|frame| draw(frame, &pager)).unwrap();

        let buffer = terminal.backend().buffer();
        let rows: Vec<String> = (0..8u16)
            .map(|y| {
                (0..40u16)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect();
        assert_eq!(rows[0], "line 1");
        assert_eq!(rows[4], "line 5");
        assert_eq!(rows[5], "");
        assert_eq!(rows[6], "Up and down to scroll, q to quit:");
        assert_eq!(rows[7], "");
    }
}
