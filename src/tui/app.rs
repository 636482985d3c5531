use std::io;
use std::path::Path;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io;
use crate::io::data_dir::resolve_data_dir;
use crate::io::kv::FileKv;
use crate::model::config::{Config, TaskDefaults};
use crate::model::view::{SortMode, ViewParams};
use crate::ops::store::TaskStore;
use crate::ops::view::project;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new task
    Insert,
    /// Typing replacement fields for an existing task
    Edit,
    /// Typing an incremental search query
    Search,
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub params: ViewParams,
    pub defaults: TaskDefaults,
    pub theme: Theme,
    pub mode: Mode,
    /// Cursor index into the projected (displayed) list
    pub cursor: usize,
    /// First visible row of the list area
    pub scroll: usize,
    /// Shared input buffer for Insert/Edit/Search modes
    pub input: String,
    /// Task being edited while in Edit mode
    pub editing_id: Option<i64>,
    /// Query to restore when a search is cancelled
    pub saved_query: String,
    /// Transient message for the status row
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: TaskStore, config: &Config) -> Self {
        App {
            store,
            params: ViewParams::default(),
            defaults: config.defaults.clone(),
            theme: Theme::from_config(&config.ui),
            mode: Mode::Navigate,
            cursor: 0,
            scroll: 0,
            input: String::new(),
            editing_id: None,
            saved_query: String::new(),
            status: None,
            should_quit: false,
        }
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Ids of the currently displayed tasks, in display order
    pub fn visible_ids(&self) -> Vec<i64> {
        project(self.store.tasks(), &self.params, self.today())
            .iter()
            .map(|t| t.id)
            .collect()
    }

    /// Id of the task under the cursor
    pub fn selected_id(&self) -> Option<i64> {
        self.visible_ids().get(self.cursor).copied()
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.visible_ids().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    /// True when the displayed order IS the stored order, so positional
    /// reordering is meaningful.
    pub fn manual_order_active(&self) -> bool {
        !self.params.is_filtered() && self.params.sort == SortMode::Default
    }
}

/// Run the TUI application
pub fn run(data_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = resolve_data_dir(data_dir)?;
    let config = config_io::read_config(&dir)?;
    let store = TaskStore::load(Box::new(FileKv::new(&dir)?));
    let mut app = App::new(store, &config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
