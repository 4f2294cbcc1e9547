use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use seointel_core::analysis::{LOADING_STAGES, LOADING_TITLE};
use seointel_core::analyzer::{AnalysisError, ReportSource, SeoReport};
use seointel_core::session::{AnalysisSession, SessionState, Submission, SubmitRejected, Ticket};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::debug;

pub mod dashboard;

use dashboard::Page;

const TICK: Duration = Duration::from_millis(100);
/// Ticks each loading line stays highlighted
const STAGE_TICKS: usize = 40;
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FEATURES: &[&str] = &["Backlink Analysis", "Content Quality", "Core Web Vitals", "Search Intent"];

/// Outcome of one background request, tagged with its submission
#[derive(Debug)]
pub struct AnalysisMessage {
    pub ticket: Ticket,
    pub result: Result<SeoReport, AnalysisError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Url,
    Location,
    Industry,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Url => Field::Location,
            Field::Location => Field::Industry,
            Field::Industry => Field::Url,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Url => Field::Industry,
            Field::Location => Field::Url,
            Field::Industry => Field::Location,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Field::Url => " Website URL ",
            Field::Location => " Target Location ",
            Field::Industry => " Industry ",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            Field::Url => "https://...",
            Field::Location => "Global",
            Field::Industry => "General",
        }
    }
}

pub struct App {
    session: AnalysisSession,
    focus: Field,
    notice: Option<String>,
    page: usize,
    scroll: u16,
    tick: usize,
    should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            session: AnalysisSession::new(),
            focus: Field::Url,
            notice: None,
            page: 0,
            scroll: 0,
            tick: 0,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn field_value(&self, field: Field) -> &str {
        let input = self.session.input();
        match field {
            Field::Url => &input.url,
            Field::Location => &input.location,
            Field::Industry => &input.industry,
        }
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        let mut value = self.field_value(self.focus).to_string();
        edit(&mut value);
        match self.focus {
            Field::Url => self.session.set_url(value),
            Field::Location => self.session.set_location(value),
            Field::Industry => self.session.set_industry(value),
        }
    }

    /// Pages available for the current report
    pub fn pages(&self) -> Vec<Page> {
        self.session.report().map(Page::for_report).unwrap_or_default()
    }

    pub fn current_page(&self) -> Option<Page> {
        self.pages().get(self.page).copied()
    }

    /// Apply one key press. Returns a submission when the form was accepted
    /// and a request should be started.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Submission> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        match self.session.state() {
            SessionState::Idle => return self.handle_form_key(key),
            SessionState::Loading => {}
            SessionState::Error { .. } => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char('r') => self.session.dismiss(),
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
            SessionState::Report(_) => self.handle_report_key(key),
        }
        None
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Submission> {
        match key.code {
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.session.reset();
                self.focus = Field::Url;
                self.notice = None;
            }
            // Other Ctrl/Alt chords are not text
            KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
            KeyCode::Char(c) => {
                self.edit_focused(|value| value.push(c));
                self.notice = None;
            }
            KeyCode::Backspace => {
                self.edit_focused(|value| {
                    value.pop();
                });
            }
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter => match self.session.submit() {
                Ok(submission) => {
                    self.notice = None;
                    self.tick = 0;
                    return Some(submission);
                }
                Err(SubmitRejected::EmptyUrl) => {
                    self.focus = Field::Url;
                    self.notice = Some(SubmitRejected::EmptyUrl.to_string());
                }
                Err(SubmitRejected::AlreadyLoading) => {}
            },
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
        None
    }

    fn handle_report_key(&mut self, key: KeyEvent) {
        let page_count = self.pages().len().max(1);
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('n') | KeyCode::Esc => {
                self.session.dismiss();
                self.focus = Field::Url;
            }
            KeyCode::Tab | KeyCode::Right => {
                self.page = (self.page + 1) % page_count;
                self.scroll = 0;
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.page = (self.page + page_count - 1) % page_count;
                self.scroll = 0;
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if idx < page_count {
                    self.page = idx;
                    self.scroll = 0;
                }
            }
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
    }

    /// Apply a finished request. Results for superseded submissions are dropped.
    pub fn apply(&mut self, message: AnalysisMessage) {
        if self.session.complete(message.ticket, message.result) {
            self.page = 0;
            self.scroll = 0;
        }
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_analysis(
    handle: &Handle,
    source: Arc<dyn ReportSource>,
    tx: mpsc::UnboundedSender<AnalysisMessage>,
    submission: Submission,
) {
    debug!(url = %submission.input.url, "Starting background analysis");
    handle.spawn(async move {
        let result = source.request(&submission.input).await;
        // receiver gone means the UI already exited
        let _ = tx.send(AnalysisMessage {
            ticket: submission.ticket,
            result,
        });
    });
}

/// Run the interactive dashboard. Blocks until the user quits, so call it
/// from a blocking thread; requests are spawned on `handle`.
pub fn run(source: Arc<dyn ReportSource>, handle: Handle) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let (tx, rx) = mpsc::unbounded_channel();

    let result = run_app(&mut terminal, &mut app, &source, &handle, &tx, rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    source: &Arc<dyn ReportSource>,
    handle: &Handle,
    tx: &mpsc::UnboundedSender<AnalysisMessage>,
    mut rx: mpsc::UnboundedReceiver<AnalysisMessage>,
) -> Result<()> {
    loop {
        while let Ok(message) = rx.try_recv() {
            app.apply(message);
        }

        terminal.draw(|f| ui(f, app))?;

        if app.should_quit {
            break;
        }

        // Poll with a timeout so the loading spinner keeps moving
        if event::poll(TICK)?
            && let Event::Key(key) = event::read()?
            && let Some(submission) = app.handle_key(key)
        {
            spawn_analysis(handle, Arc::clone(source), tx.clone(), submission);
        }

        app.on_tick();
    }

    Ok(())
}

pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Body
            Constraint::Length(1), // Hints bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    match app.session.state() {
        SessionState::Idle => render_form(f, chunks[1], app),
        SessionState::Loading => render_loading(f, chunks[1], app.tick),
        SessionState::Error { message, .. } => render_error(f, chunks[1], message),
        SessionState::Report(report) => {
            let page = app.current_page().unwrap_or(Page::Overview);
            dashboard::render(f, chunks[1], &app.session.input().url, report, page, app.scroll);
        }
    }

    render_hints(f, chunks[2], app.session.state());
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ✦ SEO Intel Agent ", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    f.render_widget(header, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let area = centered(area, 76, 20);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title
            Constraint::Length(3), // URL
            Constraint::Length(3), // Location
            Constraint::Length(3), // Industry
            Constraint::Length(2), // Submit
            Constraint::Length(1), // Notice
            Constraint::Length(2), // Features
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "⚡ Advanced AI Search Grounding",
            Style::default().fg(Color::Magenta),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Unlock Deep "),
            Span::styled("SEO Intelligence", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
            Span::raw(" in seconds."),
        ]),
    ])
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    for (field, area) in [
        (Field::Url, chunks[1]),
        (Field::Location, chunks[2]),
        (Field::Industry, chunks[3]),
    ] {
        let focused = app.focus == field;
        let value = app.field_value(field);
        let content = if value.is_empty() {
            Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(value, Style::default().fg(Color::White))
        };
        let border = if focused { Color::Yellow } else { Color::DarkGray };
        let input = Paragraph::new(Line::from(content)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(field.label())
                .border_style(Style::default().fg(border)),
        );
        f.render_widget(input, area);

        if focused {
            let offset = u16::try_from(value.chars().count()).unwrap_or(u16::MAX);
            f.set_cursor_position((
                area.x.saturating_add(1).saturating_add(offset).min(area.right().saturating_sub(2)),
                area.y + 1,
            ));
        }
    }

    let submit = Paragraph::new(Line::from(vec![
        Span::styled(" Enter ", Style::default().fg(Color::Black).bg(Color::Magenta)),
        Span::styled(" Analyze Domain Performance", Style::default().add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(submit, chunks[4]);

    if let Some(notice) = &app.notice {
        let notice = Paragraph::new(notice.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        f.render_widget(notice, chunks[5]);
    }

    let features: Vec<Span> = FEATURES
        .iter()
        .flat_map(|item| {
            [
                Span::styled("✓ ", Style::default().fg(Color::Green)),
                Span::styled(format!("{}   ", item), Style::default().fg(Color::Gray)),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(features)).alignment(Alignment::Center), chunks[6]);
}

fn render_loading(f: &mut Frame, area: Rect, tick: usize) {
    let area = centered(area, 60, 10);
    let active = (tick / STAGE_TICKS) % LOADING_STAGES.len();

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} {}", SPINNER[tick % SPINNER.len()], LOADING_TITLE),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (idx, stage) in LOADING_STAGES.iter().enumerate() {
        let style = if idx == active {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(*stage, style)));
    }

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let area = centered(area, 64, 9);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Analysis Interrupted ")
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(Color::Red));

    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::LightRed))),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::White).bg(Color::Red)),
            Span::raw(" Try Again"),
        ]),
    ])
    .block(block)
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(body, area);
}

fn hint(key: &str, label: &str) -> [Span<'static>; 2] {
    [
        Span::styled(format!(" {} ", key), Style::default().fg(Color::Black).bg(Color::Gray)),
        Span::raw(format!(" {}  ", label)),
    ]
}

fn render_hints(f: &mut Frame, area: Rect, state: &SessionState) {
    let hints: &[(&str, &str)] = match state {
        SessionState::Idle => &[("Tab", "Next field"), ("Enter", "Analyze"), ("Ctrl+R", "Clear"), ("Esc", "Quit")],
        SessionState::Loading => &[("Ctrl+C", "Quit")],
        SessionState::Error { .. } => &[("Enter", "Try Again"), ("q", "Quit")],
        SessionState::Report(_) => &[
            ("Tab/←→", "Page"),
            ("↑↓", "Scroll"),
            ("n", "New Analysis"),
            ("q", "Quit"),
        ],
    };

    let spans: Vec<Span> = hints.iter().flat_map(|(key, label)| hint(key, label)).collect();
    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black).fg(Color::Gray));
    f.render_widget(paragraph, area);
}
