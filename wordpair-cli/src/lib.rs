pub mod app;
pub mod commands;
pub mod config;
pub mod console;
pub mod ticker;

pub use app::{App, load_word_lists, run};
