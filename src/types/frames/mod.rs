pub mod daily_table;
pub mod hourly_table;
