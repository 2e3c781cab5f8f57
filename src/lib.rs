//! # Tidings
//!
//! A minimalist terminal news reader.
//!
//! ## Architecture
//!
//! ```text
//! NewsSource → Normalizer → TUI list ← ReadStateCache ← KeyValueStore
//!                              ↑
//!                   RefreshGestureController
//! ```
//!
//! Two pieces carry the interesting behaviour:
//!
//! - [`read_state`]: remembers which items were opened, for 24 hours only
//! - [`gesture`]: pull-to-refresh with damping, a trigger threshold and a cooldown
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the reader
//! tidings
//!
//! # Print today's Italian news with read markers
//! tidings list --lang it
//!
//! # See what is currently marked read
//! tidings read-state
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires the store, news source and config together.
pub mod app;

/// Command-line interface using clap.
///
/// - `tui` - Launch the TUI (default)
/// - `list` - Print the news with read markers
/// - `mark-read <url>` - Mark one item read
/// - `read-state` - Show read items and their expiry
pub mod cli;

/// Injectable millisecond clocks.
pub mod clock;

/// Configuration loaded from `~/.config/tidings/config.toml`.
///
/// Colors, keybindings, gesture tuning and the feed list per language.
pub mod config;

/// Core domain models.
///
/// - [`NewsItem`](domain::NewsItem): one entry in the list
/// - [`ReadRecord`](domain::ReadRecord): one remembered read
/// - [`Language`](domain::Language): English or Italian, with localized labels
pub mod domain;

/// Fetching the news list over HTTP.
pub mod fetcher;

pub mod gesture;

/// Tracing subscriber setup.
pub mod logging;

/// Feed parsing into [`NewsItem`](domain::NewsItem)s.
///
/// Accepts RSS, Atom and JSON Feed.
pub mod normalizer;

pub mod read_state;

/// String key-value persistence.
///
/// - [`KeyValueStore`](store::KeyValueStore): the storage seam
/// - [`SqliteStore`](store::SqliteStore): on-disk implementation
/// - [`MemoryStore`](store::MemoryStore): in-process implementation
pub mod store;

/// Terminal user interface.
///
/// A single collapsible list. j/k navigate, Enter expands and marks read,
/// o opens in the browser, R refreshes, l switches language, ? shows the
/// mission statement, q quits. Dragging the list down with the mouse while
/// it is at the top pulls to refresh.
pub mod tui;
