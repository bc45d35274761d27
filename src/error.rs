pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("process CPU clock error: {0}")]
    CpuClock(#[source] std::io::Error),
    #[error("logging setup error: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}
