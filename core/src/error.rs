use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("worker count must be between 1 and {max}, got {requested}")]
    InvalidWorkerCount { requested: usize, max: usize },
    #[error("failed to spawn indexing worker: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("indexing worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}
