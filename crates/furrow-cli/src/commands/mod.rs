//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `catalog` - Crop catalog and configuration display (crops, config)
//! - `core` - Init and shared utilities (open_db, load_engine)
//! - `history` - Recommendation log commands (history, stats)
//! - `recommend` - Run the recommendation engine
//! - `status` - Database and configuration status

pub mod catalog;
pub mod core;
pub mod history;
pub mod recommend;
pub mod status;

// Re-export command functions for main.rs
pub use catalog::*;
pub use core::*;
pub use history::*;
pub use recommend::*;
pub use status::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
