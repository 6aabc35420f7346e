pub mod catalog;
pub mod engine;
pub mod format;
pub mod session;
