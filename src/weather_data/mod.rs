pub mod error;
pub mod fetcher;
