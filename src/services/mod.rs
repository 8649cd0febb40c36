//! Fetching, fetch lifecycle and configuration

pub mod config;
pub mod debounce;
pub mod fetcher;
pub mod loader;
pub mod worker;

pub use config::{Overrides, Settings};
pub use debounce::Debouncer;
pub use fetcher::{ContributionSource, HttpSource, DEFAULT_API_URL};
pub use loader::{FetchState, FetchTicket, HeatmapLoader};
pub use worker::FetchWorker;
