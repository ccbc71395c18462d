use crate::context::TreehopContext;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::warn;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use std::io::{self, Stdout};
use std::ops::Range;
use std::path::Path;
use tree_sitter::Node;
use treehop::color::Hsl;
use treehop::navigator::{
    HintRenderer, InputHandler, InputSurface, KeyOutcome, ScrollDirection, ViewportProvider,
};
use treehop::{Navigator, ParsedSource, TsSyntax};
use unicode_width::UnicodeWidthChar;

struct Overlay {
    offset: usize,
    label: String,
    color: Color,
}

/// Text window, cursor and hint overlays of the viewer.
struct Screen<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
    top: usize,
    height: usize,
    cursor: usize,
    overlays: Vec<Overlay>,
    hint_level: Option<usize>,
    background: Color,
    status: String,
}

impl<'a> Screen<'a> {
    fn new(text: &'a str, background: Color) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(index, _)| index + 1))
            .collect();
        Self {
            text,
            line_starts,
            top: 0,
            height: 1,
            cursor: 0,
            overlays: Vec::new(),
            hint_level: None,
            background,
            status: String::new(),
        }
    }

    fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        }
    }

    /// Byte range of `line` without its newline.
    fn line_range(&self, line: usize) -> Range<usize> {
        let start = self.line_starts[line];
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(self.text.len(), |next| next - 1);
        start..end
    }

    fn scroll(&mut self, direction: ScrollDirection) {
        let step = (self.height / 2).max(1);
        self.top = match direction {
            ScrollDirection::Down => (self.top + step).min(self.line_count() - 1),
            ScrollDirection::Up => self.top.saturating_sub(step),
        };
    }

    fn move_lines(&mut self, delta: isize) {
        let line = self.line_of(self.cursor);
        let column = self.cursor - self.line_starts[line];
        let target = line
            .saturating_add_signed(delta)
            .min(self.line_count() - 1);
        let range = self.line_range(target);
        let mut offset = (range.start + column).min(range.end);
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        self.cursor = offset;
        self.reveal_cursor();
    }

    fn reveal_cursor(&mut self) {
        let line = self.line_of(self.cursor);
        if line < self.top {
            self.top = line;
        } else if line >= self.top + self.height {
            self.top = line + 1 - self.height;
        }
    }

    fn render_line(&self, line: usize) -> Line<'static> {
        let range = self.line_range(line);
        let mut overlays: Vec<&Overlay> = self
            .overlays
            .iter()
            .filter(|overlay| overlay.offset >= range.start && overlay.offset < range.end)
            .collect();
        overlays.sort_by_key(|overlay| overlay.offset);
        let mut overlays = overlays.into_iter().peekable();

        let cursor_style = Style::default().add_modifier(Modifier::REVERSED);
        let mut spans = Vec::new();
        let mut plain = String::new();
        let mut covered = 0usize;

        for (relative, ch) in self.text[range.clone()].char_indices() {
            let offset = range.start + relative;
            // Hints that start under an earlier label stay hidden.
            while overlays.peek().is_some_and(|overlay| overlay.offset < offset) {
                overlays.next();
            }
            if let Some(overlay) = overlays.next_if(|overlay| overlay.offset == offset) {
                flush(&mut spans, &mut plain);
                spans.push(Span::styled(
                    overlay.label.clone(),
                    Style::default()
                        .fg(Color::Black)
                        .bg(overlay.color)
                        .add_modifier(Modifier::BOLD),
                ));
                covered = overlay.label.chars().count();
            }
            let ch = if ch == '\t' { ' ' } else { ch };
            if covered > 0 {
                covered = covered.saturating_sub(ch.width().unwrap_or(0).max(1));
                continue;
            }
            if offset == self.cursor {
                flush(&mut spans, &mut plain);
                spans.push(Span::styled(ch.to_string(), cursor_style));
                continue;
            }
            plain.push(ch);
        }
        flush(&mut spans, &mut plain);
        if self.cursor == range.end && self.line_of(self.cursor) == line {
            spans.push(Span::styled(" ", cursor_style));
        }
        Line::from(spans)
    }
}

fn flush(spans: &mut Vec<Span<'static>>, plain: &mut String) {
    if !plain.is_empty() {
        spans.push(Span::raw(std::mem::take(plain)));
    }
}

impl ViewportProvider for Screen<'_> {
    fn visible_range(&self) -> Range<usize> {
        let start = self.line_starts[self.top];
        let end = self
            .line_starts
            .get(self.top + self.height)
            .copied()
            .unwrap_or(self.text.len());
        start..end
    }

    fn goto_offset(&mut self, offset: usize) {
        self.cursor = offset.min(self.text.len());
        self.reveal_cursor();
    }
}

impl<'t> HintRenderer<Node<'t>> for Screen<'_> {
    fn clear_all(&mut self) {
        self.overlays.clear();
    }

    fn draw(&mut self, node: Node<'t>, label: &str, color: Hsl) {
        self.overlays.push(Overlay {
            offset: node.start_byte(),
            label: label.to_string(),
            color: to_color(color),
        });
    }
}

impl InputSurface for Screen<'_> {
    fn install(&mut self, handler: InputHandler<'_>) {
        self.hint_level = match handler {
            InputHandler::Default => None,
            InputHandler::Hints(table) => Some(table.level()),
        };
    }
}

fn to_color(color: Hsl) -> Color {
    let (red, green, blue) = color.to_rgb();
    Color::Rgb(red, green, blue)
}

pub fn run(context: &TreehopContext, file: &Path) -> Result<()> {
    let source = ParsedSource::load(file)?;
    let background = Hsl::from_hex(&context.config.colors.background)
        .map(to_color)
        .unwrap_or(Color::Reset);
    let mut screen = Screen::new(&source.text, background);
    screen.status = match source.language {
        Some(language) => format!("{} ({})", file.display(), language.name()),
        None => format!("{} (no parser)", file.display()),
    };
    let mut navigator = Navigator::new(context.config.clone());

    let mut terminal = setup_terminal()?;
    let run_result = run_app(&mut terminal, &source, &mut screen, &mut navigator);
    restore_terminal(&mut terminal)?;
    run_result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app<'t>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    source: &'t ParsedSource,
    screen: &mut Screen<'t>,
    navigator: &mut Navigator<TsSyntax<'t>>,
) -> Result<()> {
    let keys = navigator.config().keys.clone();
    loop {
        let size = terminal.size().context("Failed to read terminal size")?;
        screen.height = usize::from(size.height.saturating_sub(1)).max(1);
        terminal.draw(|frame| ui(frame, screen))?;

        if !event::poll(std::time::Duration::from_millis(16))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(());
        }

        if navigator.is_active() {
            match key.code {
                KeyCode::Esc => navigator.suspend(screen),
                KeyCode::Char(symbol) => match navigator.handle_key(symbol, screen) {
                    Ok(KeyOutcome::ScrollRequested(direction)) => {
                        screen.scroll(direction);
                        if let Err(err) = navigator.viewport_changed(screen) {
                            report(screen, &err);
                        }
                    }
                    Ok(KeyOutcome::Jumped { offset }) => {
                        screen.status = format!("jumped to offset {}", offset);
                    }
                    Ok(KeyOutcome::Suspended) => screen.status = "hints off".to_string(),
                    Ok(_) => {}
                    Err(err) => report(screen, &err),
                },
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char(symbol) if symbol == keys.activate => {
                match navigator.activate(source.syntax(), screen) {
                    Ok(()) => screen.status = format!("{} hints", navigator.labels().len()),
                    Err(err) => report(screen, &err),
                }
            }
            KeyCode::Char('j') | KeyCode::Down => screen.move_lines(1),
            KeyCode::Char('k') | KeyCode::Up => screen.move_lines(-1),
            KeyCode::Char(symbol) if symbol == keys.scroll_down => {
                screen.scroll(ScrollDirection::Down);
                navigator.viewport_changed(screen)?;
            }
            KeyCode::Char(symbol) if symbol == keys.scroll_up => {
                screen.scroll(ScrollDirection::Up);
                navigator.viewport_changed(screen)?;
            }
            KeyCode::PageDown => screen.scroll(ScrollDirection::Down),
            KeyCode::PageUp => screen.scroll(ScrollDirection::Up),
            _ => {}
        }
    }
}

fn report(screen: &mut Screen<'_>, err: &treehop::HintError) {
    warn!("hint navigation error: {}", err);
    screen.status = err.to_string();
}

fn ui(frame: &mut Frame, screen: &Screen<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let last = (screen.top + screen.height).min(screen.line_count());
    let lines: Vec<Line> = (screen.top..last)
        .map(|line| screen.render_line(line))
        .collect();
    let body = Paragraph::new(lines)
        .block(Block::default().style(Style::default().bg(screen.background)));
    frame.render_widget(body, layout[0]);

    let mode = match screen.hint_level {
        Some(level) => format!("HINT {}", level),
        None => "NORMAL".to_string(),
    };
    let (line, column) = crate::commands::position(screen.text, screen.cursor);
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", mode),
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::raw(format!(" {}:{}  {}", line, column, screen.status)),
    ]));
    frame.render_widget(footer, layout[1]);
}
