//! Binary entry point that glues the SQLite-backed profile store to the TUI.
//! Bootstrapping is deliberately linear: open the database, hydrate the
//! initial snapshot, and drive the Ratatui event loop until the user exits.
use dog_profile_manager::{run_app, App, ProfileStore, SqliteStore};

/// Initialize persistence, load the saved profiles, and launch the event
/// loop. Returning a `Result` bubbles fatal initialization problems (for
/// example an unreadable home directory) up to the terminal instead of
/// starting with a store that can never complete an operation.
fn main() -> anyhow::Result<()> {
    let store = SqliteStore::open()?;
    let profiles = store.fetch_all()?;

    let mut app = App::new(Box::new(store), profiles);
    run_app(&mut app)
}
