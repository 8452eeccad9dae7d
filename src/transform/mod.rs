pub mod error;
pub mod merge;
pub mod rolling;
pub mod tidy;
