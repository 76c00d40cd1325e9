pub mod board;
pub mod category;
pub mod config;
pub mod controller;
pub mod css;
pub mod deg;
pub mod direction;
pub mod drag;
pub mod effect;
pub mod error;
pub mod piece;
pub mod r2;
pub mod rect;
pub mod session;
pub mod summary;

// Re-export key types for external use
pub use board::{Board, Container};
pub use category::Category;
pub use config::Config;
pub use controller::Controller;
pub use deg::Deg;
pub use direction::{Axis, Direction};
pub use effect::{Effect, Effects};
pub use error::{Action, SessionError, TangramError};
pub use piece::{ContainerId, Layer, Piece, PieceId, PieceSpec};
pub use r2::R2;
pub use rect::Rect;
pub use session::{Event, Outcome, Session};
pub use summary::{SummaryEntry, SummaryView};

/// Parse a log level string into LevelFilter.
///
/// Unrecognized levels fall back to `Info`.
pub fn parse_log_level(level: Option<&str>) -> log::LevelFilter {
    match level {
        Some("off") => log::LevelFilter::Off,
        Some("error") => log::LevelFilter::Error,
        Some("warn") => log::LevelFilter::Warn,
        Some("debug") => log::LevelFilter::Debug,
        Some("trace") => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    }
}
