//! Ratatui front-end split across logical submodules: the central [`App`]
//! state machine, the modal form and confirmation states, the screen
//! snapshots, and the terminal event loop.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
