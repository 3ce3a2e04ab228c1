pub mod config;
pub mod logging;

pub mod client;
pub mod error;
pub mod progress;
pub mod resolver;
pub mod session;
pub mod storage;
pub mod transfer;
pub mod transport;

pub use client::Client;
pub use error::{Error, Result};
pub use progress::{observer_fn, ChunkProgress, ConsoleProgressBar, ProgressObserver};
pub use resolver::{Resolution, ResolvedUrl};
pub use session::{DownloadOptions, Session, SessionState};
pub use storage::StorageMode;
pub use transport::{CurlTransport, ResponseHead, Transport};
