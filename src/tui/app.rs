//! Application state and event loop

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::Widget,
    DefaultTerminal, Frame,
};

use crate::render::HeatmapOptions;
use crate::services::worker::FetchOutcome;
use crate::services::{FetchState, FetchWorker, HeatmapLoader, HttpSource, Settings};

use super::theme::Theme;
use super::widgets::{
    heatmap::HeatmapView,
    help::HelpPopup,
    panel::{ConfigPanel, PanelField, PanelView},
    spinner::Spinner,
};

/// Upper bound on the event poll wait (spinner frame rate)
const TICK: Duration = Duration::from_millis(100);

/// Main application
pub struct App {
    panel: ConfigPanel,
    loader: HeatmapLoader,
    api_url: String,
    theme: Theme,
    /// Cursor over the loaded grid as (week, day)
    focus: Option<(usize, usize)>,
    show_help: bool,
    should_quit: bool,
    spinner_frame: usize,
}

impl App {
    pub fn new(settings: &Settings, theme: Theme) -> Self {
        let loader = HeatmapLoader::new().on_data_load(|data| {
            log::info!(
                "loaded {} contributions over {} weeks",
                data.total_count,
                data.weeks.len()
            );
        });
        Self {
            panel: ConfigPanel::from_settings(settings),
            loader,
            api_url: settings.api_url.clone(),
            theme,
            focus: None,
            show_help: false,
            should_quit: false,
            spinner_frame: 0,
        }
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event, now: Instant) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.panel.focus = self.panel.focus.next(),
            KeyCode::BackTab => self.panel.focus = self.panel.focus.prev(),
            KeyCode::Enter => self.confirm(now),
            _ if self.panel.focus == PanelField::Subject => match key.code {
                KeyCode::Char(c) => self.panel.push_char(c),
                KeyCode::Backspace => self.panel.pop_char(),
                _ => {}
            },
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            _ if self.panel.focus == PanelField::Grid => match key.code {
                KeyCode::Left | KeyCode::Char('h') => self.move_focus(-1, 0),
                KeyCode::Right | KeyCode::Char('l') => self.move_focus(1, 0),
                KeyCode::Up | KeyCode::Char('k') => self.move_focus(0, -1),
                KeyCode::Down | KeyCode::Char('j') => self.move_focus(0, 1),
                _ => {}
            },
            KeyCode::Left | KeyCode::Char('h') => {
                self.panel.adjust(-1);
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                self.panel.adjust(1);
            }
            _ => {}
        }
    }

    /// Hand the typed subject to the loader
    fn confirm(&mut self, now: Instant) {
        let subject = self.panel.subject().to_string();
        if subject.is_empty() {
            self.loader.reset();
            self.focus = None;
            return;
        }

        let same = self
            .loader
            .current_request()
            .is_some_and(|r| r.subject == subject && r.api_url == self.api_url);
        let started = if same && matches!(self.loader.state(), FetchState::Error(_)) {
            self.loader.retry(now)
        } else {
            self.loader.request(&subject, &self.api_url, now)
        };
        if started {
            self.focus = None;
        }
    }

    fn move_focus(&mut self, d_week: isize, d_day: isize) {
        let (Some(data), Some((week, day))) = (self.loader.data(), self.focus) else {
            return;
        };
        let last_week = data.weeks.len().saturating_sub(1);
        let week = week.saturating_add_signed(d_week).min(last_week);
        let days = data.weeks.get(week).map_or(0, |w| w.days.len());
        let day = day.saturating_add_signed(d_day).min(days.saturating_sub(1));
        self.focus = Some((week, day));
    }

    /// Issue a due ticket and commit finished fetches
    pub fn pump(&mut self, worker: &FetchWorker, now: Instant) {
        if let Some(ticket) = self.loader.poll(now) {
            worker.submit(ticket);
        }
        while let Some(outcome) = worker.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome) {
        if !self.loader.complete(outcome.generation, outcome.result) {
            return;
        }
        // Start the cursor on the most recent week
        self.focus = self
            .loader
            .data()
            .and_then(|data| data.weeks.len().checked_sub(1))
            .map(|week| (week, 0));
    }

    /// Event poll timeout: one tick, or sooner if the debounce expires first
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.loader
            .time_until_due(now)
            .map_or(TICK, |due| due.min(TICK))
    }

    /// Update spinner animation
    pub fn tick(&mut self) {
        if matches!(self.loader.state(), FetchState::Loading) {
            self.spinner_frame = Spinner::next_frame(self.spinner_frame);
        }
    }

    /// Confirm the subject given on the command line or in the config file
    pub fn confirm_initial(&mut self, now: Instant) {
        if !self.panel.subject().is_empty() {
            self.panel.focus = PanelField::Grid;
            self.confirm(now);
        }
    }

    /// Stop accepting fetch results
    pub fn unmount(&mut self) {
        self.loader.unmount();
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Options for the subject the loader is working on
    fn options(&self) -> HeatmapOptions {
        let subject = self
            .loader
            .current_request()
            .map_or("", |r| r.subject.as_str());
        self.panel.options(subject)
    }

    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [panel_area, heatmap_area] =
            Layout::vertical([Constraint::Length(ConfigPanel::height()), Constraint::Min(0)])
                .areas(area);

        PanelView::new(&self.panel, self.theme).render(panel_area, buf);

        let options = self.options();
        let focus = if self.panel.focus == PanelField::Grid {
            self.focus
        } else {
            None
        };
        HeatmapView::new(self.loader.state(), &options, self.theme)
            .with_focus(focus)
            .with_spinner_frame(self.spinner_frame)
            .render(heatmap_area, buf);

        if self.show_help {
            let popup_area = HelpPopup::centered_area(area);
            HelpPopup::new(self.theme).render(popup_area, buf);
        }
    }
}

/// Run the TUI application
pub fn run(settings: Settings) -> anyhow::Result<()> {
    let worker = FetchWorker::new(Arc::new(HttpSource::new()?));
    // Detect before raw mode
    let theme = Theme::detect();
    let mut app = App::new(&settings, theme);

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &mut app, &worker);
    ratatui::restore();
    app.unmount();
    result
}

fn run_app(terminal: &mut DefaultTerminal, app: &mut App, worker: &FetchWorker) -> anyhow::Result<()> {
    app.confirm_initial(Instant::now());

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        let now = Instant::now();
        app.pump(worker, now);

        if event::poll(app.poll_timeout(now))? {
            let ev = event::read()?;
            app.handle_event(ev, Instant::now());
        } else {
            app.tick();
        }
    }

    Ok(())
}
