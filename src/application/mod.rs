//! Application layer - Use cases and orchestration

pub mod entry_store;
pub mod init;
pub mod manage_config;
pub mod theme;

pub use entry_store::EntryStore;
pub use manage_config::ConfigService;
pub use theme::ThemeService;
