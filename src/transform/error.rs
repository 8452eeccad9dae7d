use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Cannot merge an empty list of tables ({hourly} hourly, {daily} daily)")]
    EmptyInput { hourly: usize, daily: usize },
}
