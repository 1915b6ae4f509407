//! Reusable widgets for the dicetray TUI

pub mod history;
pub mod input;
pub mod result;

pub use history::HistoryWidget;
pub use input::InputWidget;
pub use result::ResultWidget;
