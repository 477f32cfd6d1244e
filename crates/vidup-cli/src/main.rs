//! vidup CLI: upload, list and download videos through the vidup API.
//!
//! Set VIDUP_API_URL and VIDUP_SESSION_TOKEN. Downloads need a cloud name, from
//! CLOUDINARY_CLOUD_NAME or --cloud-name.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vidup_api_client::{ApiClient, SubmitOutcome, UploadPage, VideoGrid};
use vidup_cli::{init_tracing, media_urls, read_selected_file};
use vidup_core::HostingConfig;

#[derive(Parser)]
#[command(name = "vidup", about = "Upload and download videos")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a video file (70MB max)
    Upload {
        /// Path to the video
        file: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List uploaded videos
    List {
        /// Print the raw records as JSON
        #[arg(long)]
        json: bool,
        #[arg(long)]
        cloud_name: Option<String>,
    },
    /// Download a video by public id or title
    Download {
        video: String,
        #[arg(long)]
        cloud_name: Option<String>,
        /// Target directory
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let client = ApiClient::from_env().context("Failed to create API client")?;
    let mut page = UploadPage::new(client);

    match cli.command {
        Commands::Upload {
            file,
            title,
            description,
        } => {
            page.title = title;
            page.description = description;
            page.select_file(Some(read_selected_file(&file).await?));

            match page.submit().await {
                SubmitOutcome::Uploaded(response) => {
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                SubmitOutcome::TooLarge { max, .. } => {
                    bail!("File size exceeds the limit of {}MB", max / (1024 * 1024));
                }
                SubmitOutcome::MissingFile => bail!("No file selected"),
                SubmitOutcome::Busy => bail!("An upload is already in progress"),
                SubmitOutcome::Failed(e) => return Err(e).context("Upload failed"),
            }
        }
        Commands::List { json, cloud_name } => {
            page.mount().await;
            if let Some(message) = page.error() {
                bail!("{}", message);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(page.videos())?);
            } else {
                let urls = media_urls(&HostingConfig::from_env(), cloud_name)?;
                print!("{}", VideoGrid::new(page.videos(), &urls).render_text());
            }
        }
        Commands::Download {
            video,
            cloud_name,
            dir,
        } => {
            let urls = media_urls(&HostingConfig::from_env(), cloud_name)?;
            page.mount().await;
            if let Some(message) = page.error() {
                bail!("{}", message);
            }

            let grid = VideoGrid::new(page.videos(), &urls);
            let card = grid
                .find(&video)
                .with_context(|| format!("No video matches '{}'", video))?;
            let destination = dir.join(&card.download.filename);
            let written = page
                .api()
                .download_to(&card.download.url, &destination)
                .await?;
            println!("Saved {} ({} bytes)", destination.display(), written);
        }
    }

    Ok(())
}
