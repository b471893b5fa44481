pub mod loader;
pub mod types;

pub use loader::{load_players, load_players_from_reader, resolve_inputs, LoadError, LoadedPlayers};
pub use types::{present, PlayerRecord};
