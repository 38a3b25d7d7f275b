//! List and download the CycleGAN datasets and pretrained models published
//! at <http://efrosgans.eecs.berkeley.edu/cyclegan/>.
//!
//! ```no_run
//! use cyclegan_fetch::{Category, Fetcher, LogReporter};
//!
//! let fetcher = Fetcher::new()?;
//! for name in fetcher.list_files(Category::Datasets)? {
//!     println!("{}", name);
//! }
//! fetcher.download_with(Category::Datasets, "horse2zebra", LogReporter::new("horse2zebra.zip"))?;
//! # Ok::<(), cyclegan_fetch::Error>(())
//! ```

pub mod category;
pub mod config;
pub mod downloader;
pub mod errors;
pub mod listing;

pub use category::Category;
pub use config::FetcherConfig;
pub use downloader::progress::{BlockProgress, LogReporter, NoProgress, ProgressReporter};
pub use downloader::{DownloadResult, Fetcher};
pub use errors::{Error, ErrorKind, Result};
