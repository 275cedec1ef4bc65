//! Event loop tying the terminal, the search box and the board state together.

use std::sync::Arc;

use coinboard_lib::debounce::Debouncer;
use coinboard_lib::source::DataSource;
use coinboard_lib::state::Request;
use coinboard_lib::{BoardConfig, BoardState, CryptoRecord, FetchError};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use log::{debug, info};
use tokio::sync::mpsc;

use crate::error::AppError;
use crate::input::{InputResult, SearchInput};
use crate::terminal::Terminal;
use crate::view::{self, Frame};

/// Messages from spawned tasks back to the loop.
#[derive(Debug)]
pub enum AppEvent {
    /// The debounce window elapsed after the last keystroke.
    ///
    /// Carries the generation it was scheduled under. Enter and later
    /// keystrokes bump the generation, so a run that fired before they were
    /// handled is dropped.
    SearchDue { generation: u64 },
    Loaded {
        request: Request,
        records: Vec<CryptoRecord>,
    },
    Failed {
        request: Request,
        error: FetchError,
    },
}

pub struct App {
    state: BoardState,
    input: SearchInput,
    debouncer: Debouncer,
    search_generation: u64,
    source: Arc<dyn DataSource>,
    source_label: String,
    tx: mpsc::UnboundedSender<AppEvent>,
    scroll: usize,
    page: usize,
    quit: bool,
}

impl App {
    pub fn new(
        source: Arc<dyn DataSource>,
        config: &BoardConfig,
    ) -> (Self, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = Self {
            state: BoardState::new(),
            input: SearchInput::new(),
            debouncer: Debouncer::new(config.debounce),
            search_generation: 0,
            source_label: source.describe(),
            source,
            tx,
            scroll: 0,
            page: 1,
            quit: false,
        };
        (app, rx)
    }

    pub async fn run(
        mut self,
        terminal: &mut Terminal,
        mut rx: mpsc::UnboundedReceiver<AppEvent>,
    ) -> Result<(), AppError> {
        info!("Loading records from {}", self.source_label);
        self.start_load();
        self.redraw(terminal)?;

        let mut events = EventStream::new();
        while !self.should_quit() {
            let dirty = tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_terminal_event(event),
                    Some(Err(e)) => return Err(AppError::Terminal(e)),
                    None => {
                        self.quit = true;
                        false
                    }
                },
                Some(event) = rx.recv() => self.handle_app_event(event),
            };

            if dirty && !self.quit {
                self.redraw(terminal)?;
            }
        }

        info!("Quit requested");
        Ok(())
    }

    fn redraw(&mut self, terminal: &mut Terminal) -> Result<(), AppError> {
        let (_, height) = terminal.size();
        self.page = view::table_height(height).max(1);
        self.clamp_scroll();

        let frame = Frame {
            state: &self.state,
            input: &self.input,
            scroll: self.scroll,
            source: &self.source_label,
        };
        terminal.draw(|buf| view::paint(buf, &frame))?;
        Ok(())
    }

    /// Issues a load for the current query and fetches it in the background.
    fn start_load(&mut self) {
        let request = self.state.begin_request();
        let source = self.source.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = match source.load_all().await {
                Ok(records) => AppEvent::Loaded { request, records },
                Err(error) => AppEvent::Failed { request, error },
            };
            let _ = tx.send(event);
        });
    }

    fn schedule_search(&mut self) {
        self.search_generation += 1;
        let generation = self.search_generation;
        let tx = self.tx.clone();
        self.debouncer.schedule(async move {
            let _ = tx.send(AppEvent::SearchDue { generation });
        });
    }

    pub fn handle_app_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::SearchDue { generation } if generation != self.search_generation => {
                debug!(
                    "Dropping superseded debounced search (generation {}, current {})",
                    generation, self.search_generation
                );
                false
            }
            AppEvent::SearchDue { .. } => {
                debug!("Debounced search for {:?}", self.state.query());
                self.start_load();
                true
            }
            AppEvent::Loaded { request, records } => {
                let update = self.state.apply_loaded(&request, records);
                if update.needs_redraw() {
                    self.scroll = 0;
                }
                update.needs_redraw()
            }
            AppEvent::Failed { request, error } => {
                self.state.apply_failed(&request, &error).needs_redraw()
            }
        }
    }

    fn handle_terminal_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(..) => true,
            _ => false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.quit = true;
                return false;
            }
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.quit = true;
                return false;
            }
            KeyCode::F(2) => {
                self.scroll = 0;
                return self.state.sort_by_market_cap_descending().needs_redraw();
            }
            KeyCode::F(3) => {
                self.scroll = 0;
                return self.state.sort_by_percent_change_descending().needs_redraw();
            }
            KeyCode::Up => return self.scroll_by(-1),
            KeyCode::Down => return self.scroll_by(1),
            KeyCode::PageUp => return self.scroll_by(-(self.page as isize)),
            KeyCode::PageDown => return self.scroll_by(self.page as isize),
            _ => {}
        }

        match self.input.handle_key(key) {
            InputResult::Changed => {
                let _ = self.state.set_query(self.input.text());
                self.schedule_search();
                true
            }
            InputResult::Submitted => {
                if self.debouncer.cancel() {
                    debug!("Enter superseded a pending debounced search");
                }
                self.search_generation += 1;
                let _ = self.state.set_query(self.input.text());
                self.start_load();
                true
            }
            InputResult::Handled => true,
            InputResult::Ignored => false,
        }
    }

    fn scroll_by(&mut self, delta: isize) -> bool {
        let before = self.scroll;
        self.scroll = self.scroll.saturating_add_signed(delta);
        self.clamp_scroll();
        self.scroll != before
    }

    fn clamp_scroll(&mut self) {
        let max = self.state.rows().len().saturating_sub(self.page);
        self.scroll = self.scroll.min(max);
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}
