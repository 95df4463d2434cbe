use std::io::{stderr, IsTerminal, Stderr};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::debug;

const ACCENT: Color = Color::Indexed(212);

/// Let the user pick one of `options`. `None` means the user cancelled.
///
/// The menu is drawn on stderr so stdout stays clean for the generated text.
/// Without a terminal the first option is taken.
pub fn select(title: &str, options: &[String]) -> Result<Option<String>> {
    if options.is_empty() {
        return Ok(None);
    }

    if !std::io::stdin().is_terminal() || !stderr().is_terminal() {
        debug!(title, choice = %options[0], "no terminal, taking first option");
        return Ok(Some(options[0].clone()));
    }

    let mut app = SelectApp::new(title, options);

    enable_raw_mode()?;
    stderr().execute(EnterAlternateScreen)?;

    let outcome = Terminal::new(CrosstermBackend::new(stderr()))
        .map_err(anyhow::Error::from)
        .and_then(|mut terminal| run_loop(&mut terminal, &mut app));

    disable_raw_mode()?;
    stderr().execute(LeaveAlternateScreen)?;

    outcome?;
    Ok(app.choice)
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stderr>>, app: &mut SelectApp) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Filterable single-choice list
struct SelectApp {
    title: String,
    options: Vec<String>,
    filter: String,
    cursor: usize,
    choice: Option<String>,
    should_quit: bool,
}

impl SelectApp {
    fn new(title: &str, options: &[String]) -> Self {
        Self {
            title: title.to_string(),
            options: options.to_vec(),
            filter: String::new(),
            cursor: 0,
            choice: None,
            should_quit: false,
        }
    }

    fn visible(&self) -> Vec<&str> {
        let needle = self.filter.to_lowercase();
        self.options
            .iter()
            .map(String::as_str)
            .filter(|o| o.to_lowercase().contains(&needle))
            .collect()
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        match code {
            KeyCode::Char('c') if ctrl => self.cancel(),
            KeyCode::Esc => self.cancel(),
            KeyCode::Enter => {
                let picked = self.visible().get(self.cursor).map(|c| c.to_string());
                if picked.is_some() {
                    self.choice = picked;
                    self.should_quit = true;
                }
            }
            KeyCode::Down | KeyCode::Tab => self.move_cursor(1),
            KeyCode::Char('n') if ctrl => self.move_cursor(1),
            KeyCode::Up | KeyCode::BackTab => self.move_cursor(-1),
            KeyCode::Char('p') if ctrl => self.move_cursor(-1),
            KeyCode::Backspace => {
                self.filter.pop();
                self.cursor = 0;
            }
            KeyCode::Char(c) if !ctrl => {
                self.filter.push(c);
                self.cursor = 0;
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor as isize + delta).rem_euclid(len as isize) as usize;
    }

    fn cancel(&mut self) {
        self.choice = None;
        self.should_quit = true;
    }
}

fn ui(f: &mut Frame, app: &SelectApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter
            Constraint::Min(3),    // Options
            Constraint::Length(1), // Help
        ])
        .split(f.size());

    let filter = Paragraph::new(format!("> {}", app.filter))
        .style(Style::default().fg(ACCENT))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!(" {} ", app.title),
                    Style::default().fg(ACCENT).bold(),
                )),
        );
    f.render_widget(filter, chunks[0]);

    let visible = app.visible();
    let items: Vec<ListItem> = visible.iter().map(|o| ListItem::new(o.to_string())).collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().fg(ACCENT).bold())
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.cursor));
    }
    f.render_stateful_widget(list, chunks[1], &mut state);

    let help = Paragraph::new(" ↑/↓: move | type to filter | Enter: select | Esc: cancel")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}
