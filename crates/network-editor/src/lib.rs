pub mod actions;
pub mod cache;
pub mod changes;
pub mod cli;
pub mod effects;
pub mod logging;
pub mod settings;
pub mod state;
pub mod store;
pub mod versioned;

pub use actions::Action;
pub use changes::ModelChange;
pub use settings::EditorSettings;
pub use state::State;
pub use store::{EditError, Store};
