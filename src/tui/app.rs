use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::widgets::ListState;

use crate::app::{Result, SharedStore};
use crate::domain::{Language, NewsItem};
use crate::gesture::RefreshGestureController;
use crate::read_state::ReadStateCache;
use crate::tui::feedback::{ChannelReload, TerminalBell};

pub const PAGE_SIZE: usize = 10;

pub type Gesture = RefreshGestureController<ChannelReload, TerminalBell>;

/// Result of a background fetch, tagged with the language it was for.
pub struct FetchOutcome {
    pub language: Language,
    pub result: Result<Vec<NewsItem>>,
}

pub struct TuiApp {
    pub items: Vec<NewsItem>,
    pub selected: usize,
    /// At most one item shows its description.
    pub expanded: Option<usize>,
    pub list_state: ListState,
    /// Where the list was last drawn, for mapping mouse rows.
    pub list_area: Rect,
    pub language: Language,
    pub loading: bool,
    pub show_disclaimer: bool,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub read_state: ReadStateCache<SharedStore>,
    pub gesture: Gesture,
    started: Instant,
}

impl TuiApp {
    pub fn new(
        language: Language,
        read_state: ReadStateCache<SharedStore>,
        gesture: Gesture,
    ) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            items: Vec::new(),
            selected: 0,
            expanded: None,
            list_state,
            list_area: Rect::default(),
            language,
            loading: false,
            show_disclaimer: false,
            should_quit: false,
            status_message: None,
            read_state,
            gesture,
            started: Instant::now(),
        }
    }

    /// Monotonic milliseconds since the app started, for the gesture clock.
    pub fn now_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    pub fn selected_item(&self) -> Option<&NewsItem> {
        self.items.get(self.selected)
    }

    pub fn is_item_read(&self, item: &NewsItem) -> bool {
        self.read_state.is_read(&item.url)
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded == Some(index)
    }

    pub fn is_at_top(&self) -> bool {
        self.list_state.offset() == 0
    }

    pub fn move_up(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    pub fn move_down(&mut self) {
        self.select(self.selected.saturating_add(1));
    }

    pub fn next_page(&mut self) {
        self.select(self.selected.saturating_add(PAGE_SIZE));
    }

    pub fn prev_page(&mut self) {
        self.select(self.selected.saturating_sub(PAGE_SIZE));
    }

    fn select(&mut self, index: usize) {
        self.selected = index.min(self.items.len().saturating_sub(1));
        self.list_state.select(Some(self.selected));
    }

    /// Expand the selected item, or collapse it if it already is.
    ///
    /// Expanding marks the item read; collapsing leaves read state alone.
    pub fn toggle_selected(&mut self) {
        if self.items.is_empty() {
            return;
        }
        if self.is_expanded(self.selected) {
            self.expanded = None;
            return;
        }

        self.expanded = Some(self.selected);
        let url = self.items[self.selected].url.clone();
        self.read_state.mark_read(&url);
    }

    /// Mark the selected item read and hand back its link if it can be opened.
    pub fn take_link_to_open(&mut self) -> Option<String> {
        let item = self.selected_item()?;
        if !item.has_web_link() {
            self.set_status("This item has no web link".to_string());
            return None;
        }
        let url = item.url.clone();
        self.read_state.mark_read(&url);
        Some(url)
    }

    /// Enter the loading state for a new fetch and return the language to fetch.
    pub fn begin_fetch(&mut self) -> Language {
        self.loading = true;
        self.status_message = None;
        self.language
    }

    pub fn switch_language(&mut self) -> Language {
        self.language = self.language.next();
        self.items.clear();
        self.expanded = None;
        self.select(0);
        self.begin_fetch()
    }

    /// Fold a finished fetch into the view. Results for another language are stale.
    pub fn apply_fetch(&mut self, outcome: FetchOutcome) {
        if outcome.language != self.language {
            tracing::debug!("Dropping stale {} fetch", outcome.language);
            return;
        }
        self.loading = false;

        match outcome.result {
            Ok(items) => {
                let expanded_url = self
                    .expanded
                    .and_then(|i| self.items.get(i))
                    .map(|item| item.url.clone());

                self.items = items;
                self.expanded =
                    expanded_url.and_then(|url| self.items.iter().position(|i| i.url == url));
                self.select(self.selected);
                // Each refresh sweeps read state again.
                self.read_state.load();
            }
            Err(e) => {
                tracing::error!("Failed to load news: {}", e);
                self.set_status(format!("Failed to load news: {}", e));
            }
        }
    }

    pub fn toggle_disclaimer(&mut self) {
        self.show_disclaimer = !self.show_disclaimer;
    }

    /// Esc closes the modal first, then the expanded item.
    pub fn close(&mut self) {
        if self.show_disclaimer {
            self.show_disclaimer = false;
        } else {
            self.expanded = None;
        }
    }

    /// Translate mouse input into gesture events and wheel scrolling.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let now_ms = self.now_ms();
        let config = self.gesture.config();
        let y = config.row_to_units(mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.list_area.contains(Position::new(mouse.column, mouse.row)) {
                    let at_top = self.is_at_top();
                    self.gesture.touch_start(y, at_top, now_ms);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => self.gesture.touch_move(y, now_ms),
            MouseEventKind::Up(MouseButton::Left) => {
                self.gesture.touch_end(now_ms);
            }
            MouseEventKind::ScrollDown => self.move_down(),
            MouseEventKind::ScrollUp => self.move_up(),
            _ => {}
        }
    }

    pub fn tick(&mut self) {
        let now_ms = self.now_ms();
        self.gesture.tick(now_ms);
    }

    /// Rows the pull indicator currently occupies.
    pub fn indicator_rows(&self) -> u16 {
        self.gesture
            .config()
            .units_to_rows(self.gesture.indicator_offset())
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }
}
