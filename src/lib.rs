pub mod app;
pub mod distribution;
pub mod errors;
pub mod goal;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use distribution::distribute;
pub use state::AppState;
pub use storage::{FileStore, KeyValueStore, MemoryStore, resolve_data_path};
pub use tracker::Tracker;
