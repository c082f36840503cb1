//! TUI widget modules.

pub mod banner;
pub mod header;
pub mod insight;
pub mod receipt;
pub mod selector;
pub mod status_bar;
pub mod trigger;
