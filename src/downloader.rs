mod downloadresult;
pub mod progress;

pub use downloadresult::DownloadResult;
use progress::{BlockProgress, ProgressReporter};

use crate::{
    category::Category,
    config::FetcherConfig,
    errors::{ErrorKind, Result, ResultExt},
    listing,
};
use reqwest::{Client, Url};
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

/// Lists and downloads files from the CycleGAN index.
///
/// Every call blocks until the underlying request finishes. Progress state is
/// owned by the caller and handed to [`Fetcher::download`], so one `Fetcher`
/// can serve any number of sequential transfers.
///
/// A `Fetcher` drives its own tokio runtime with `block_on`. Its methods
/// panic when called from inside an async context; use it from plain threads
/// or wrap calls in `tokio::task::spawn_blocking`.
pub struct Fetcher {
    base_url: Url,
    output_dir: PathBuf,
    block_size: u64,
    client: Client,
    runtime: Runtime,
}

impl Fetcher {
    pub fn new() -> Result<Fetcher> {
        Fetcher::with_config(FetcherConfig::default())
    }

    pub fn with_config(config: FetcherConfig) -> Result<Fetcher> {
        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().user_agent(config.user_agent).build()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Fetcher {
            base_url,
            output_dir: config.output_dir,
            block_size: config.block_size.max(1),
            client,
            runtime,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Index page of `category`.
    pub fn category_url(&self, category: Category) -> Result<Url> {
        Ok(self.base_url.join(&format!("{}/", category.segment()))?)
    }

    /// Remote location of `key` under `category`.
    pub fn file_url(&self, category: Category, key: &str) -> Result<Url> {
        let file_name = category.file_name(key);
        Ok(self.category_url(category)?.join(&format!("./{}", file_name))?)
    }

    /// Filenames on the category's index page that carry its suffix, in
    /// page order. Each call fetches the page again.
    pub fn list_files(&self, category: Category) -> Result<Vec<String>> {
        let url = self.category_url(category)?;
        debug!("Fetching listing {}", url);

        let html = self.runtime.block_on(fetch_text(&self.client, url.clone()))?;
        let files = listing::filter_listing(&html, category);

        debug!("{} lists {} {} files", url, files.len(), category.suffix());
        Ok(files)
    }

    /// The listing with extensions stripped: the keys `download` accepts.
    pub fn list_keys(&self, category: Category) -> Result<Vec<String>> {
        Ok(self
            .list_files(category)?
            .iter()
            .map(|name| listing::file_stem(name).to_string())
            .collect())
    }

    /// Downloads `key` into the output directory, overwriting any file of
    /// the same name. Keys missing from the current listing fail with
    /// [`ErrorKind::KeyNotFound`] before any download request is made.
    pub fn download<R: ProgressReporter>(
        &self,
        category: Category,
        key: &str,
        progress: &mut BlockProgress<R>,
    ) -> Result<DownloadResult> {
        if !self.list_keys(category)?.iter().any(|listed| listed == key) {
            warn!("{} is not listed under {}", key, category);
            return Err(ErrorKind::KeyNotFound(category, key.to_string()).into());
        }

        let file_name = category.file_name(key);
        let url = self.file_url(category, key)?;
        let path = self.output_dir.join(&file_name);
        info!("Downloading {} to {}", url, path.display());

        let bytes = self.runtime.block_on(stream_to_file(
            &self.client,
            url.clone(),
            &path,
            self.block_size,
            progress,
        ))?;

        info!("Download {} success! ({} bytes)", file_name, bytes);
        Ok(DownloadResult {
            category,
            file_name,
            path,
            url: url.to_string(),
            bytes,
        })
    }

    /// [`Fetcher::download`] with a fresh tracker around `reporter`.
    pub fn download_with<R: ProgressReporter>(
        &self,
        category: Category,
        key: &str,
        reporter: R,
    ) -> Result<DownloadResult> {
        let mut progress = BlockProgress::new(reporter);
        self.download(category, key, &mut progress)
    }
}

async fn fetch_text(client: &Client, url: Url) -> Result<String> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}

async fn stream_to_file<R: ProgressReporter>(
    client: &Client,
    url: Url,
    path: &Path,
    block_size: u64,
    progress: &mut BlockProgress<R>,
) -> Result<u64> {
    let mut response = client.get(url).send().await?.error_for_status()?;
    let total = response.content_length();

    let mut dest =
        File::create(path).chain_err(|| format!("Couldn't create {}", path.display()))?;

    let mut received: u64 = 0;
    let mut blocks: u64 = 0;
    progress.reset();
    progress.update(blocks, block_size, total);

    while let Some(chunk) = response.chunk().await? {
        dest.write_all(&chunk)?;
        received += chunk.len() as u64;

        let full_blocks = received / block_size;
        if full_blocks > blocks {
            blocks = full_blocks;
            progress.update(blocks, block_size, total);
        }
    }
    dest.flush()?;

    let last_block = received.div_ceil(block_size);
    if last_block > blocks {
        progress.update(last_block, block_size, total);
    }
    progress.complete();

    Ok(received)
}
