use clap::{Parser, Subcommand};
use cyclegan_fetch::{Category, Fetcher, FetcherConfig, LogReporter, NoProgress, Result};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "List and download CycleGAN datasets and pretrained models")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory downloads are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Don't report download progress
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the files available in a category
    List {
        /// datasets or pretrained_models
        #[arg(value_parser = parse_category)]
        category: Category,
    },
    /// Download one file, named by its key (filename without extension)
    Fetch {
        /// datasets or pretrained_models
        #[arg(value_parser = parse_category)]
        category: Category,
        key: String,
    },
}

fn parse_category(name: &str) -> std::result::Result<Category, String> {
    name.parse().map_err(|e: cyclegan_fetch::Error| e.to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let fetcher = Fetcher::with_config(FetcherConfig::default().with_output_dir(cli.output_dir))?;

    match cli.command {
        Commands::List { category } => {
            for name in fetcher.list_files(category)? {
                println!("{}", name);
            }
        }
        Commands::Fetch { category, key } => {
            info!("Writing {} to {}", category, fetcher.output_dir().display());
            let result = if cli.quiet {
                fetcher.download_with(category, &key, NoProgress)?
            } else {
                let reporter = LogReporter::new(category.file_name(&key));
                fetcher.download_with(category, &key, reporter)?
            };
            result.print_result();
        }
    }

    Ok(())
}
