pub mod charts;
pub mod csv;
pub mod error;
pub mod weekly;
