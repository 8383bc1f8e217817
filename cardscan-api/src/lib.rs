pub mod config;
pub mod handlers;
pub mod helpers;
pub mod jobs;
pub mod ocr;
pub mod store;

pub use store::{ContactStore, SharedContactStore};
