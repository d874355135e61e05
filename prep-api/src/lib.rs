pub mod config;
pub mod handlers;
pub mod helpers;
pub mod queries;
pub mod storage;

pub use storage::Stores;
