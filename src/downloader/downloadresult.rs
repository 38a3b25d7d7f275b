use crate::category::Category;
use crate::listing::file_stem;
use std::path::PathBuf;

/// What a finished download left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    pub category: Category,
    pub file_name: String,
    pub path: PathBuf,
    pub url: String,
    pub bytes: u64,
}

impl DownloadResult {
    pub fn key(&self) -> &str {
        file_stem(&self.file_name)
    }

    pub fn summary(&self) -> String {
        format!(
            "Downloaded {} {} ({} bytes) from {} to {}",
            self.category,
            self.file_name,
            self.bytes,
            self.url,
            self.path.display()
        )
    }

    pub fn print_result(&self) {
        println!("{}", self.summary());
    }
}
