pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use models::{ParsedVideo, RankedResultSet, ReelsScript, ScoredVideo, VideoCandidate};
pub use services::discovery::VideoDiscovery;
