use std::path::PathBuf;

pub const BASE_URL: &str = "http://efrosgans.eecs.berkeley.edu/cyclegan/";
pub const BLOCK_SIZE: u64 = 8192;
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Settings a [`Fetcher`](crate::Fetcher) is built from.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub base_url: String,
    pub output_dir: PathBuf,
    /// Unit in which transfer progress is counted.
    pub block_size: u64,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        FetcherConfig {
            base_url: BASE_URL.to_string(),
            output_dir: PathBuf::from("."),
            block_size: BLOCK_SIZE,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl FetcherConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_block_size(mut self, block_size: u64) -> Self {
        self.block_size = block_size.max(1);
        self
    }
}
