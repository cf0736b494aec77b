//! TUI application module
//!
//! Contains the terminal user interface, the screens of the journey and the
//! navigation state between them.

pub mod app;
pub mod screens;
pub mod state;
pub mod tui;

pub use app::{App, Journey};
pub use screens::{Outcome, ScreenView};
pub use state::{Edge, NavigationAction, Screen, StateManager};
pub use tui::{Tui, TuiEvent};
