pub mod journal;
pub mod stack;

pub use journal::Journal;
pub use stack::HistoryManager;
