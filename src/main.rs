use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use clap::{Parser, Subcommand, ValueHint};
use tracing_subscriber::EnvFilter;
use url::Url;

use contenthub_upload::request::LargeUploadRequest;
use contenthub_upload::{config, trigger, upload};

#[derive(Parser)]
#[command(name = "contenthub-upload")]
#[command(version)]
#[command(about = "Chunked large-file uploads to Sitecore Content Hub")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP upload trigger
    Serve {
        /// Address to bind, overriding configuration
        #[arg(short, long)]
        listen: Option<SocketAddr>,
    },
    /// Upload a single file from the command line
    Upload {
        /// Path of the file to upload
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Content Hub instance URL
        #[arg(long)]
        host: Url,
        /// Content Hub access token
        #[arg(long)]
        token: String,
        /// Media/MIME type of the file
        #[arg(short, long)]
        media_type: String,
        /// Asset filename; defaults to the file's name on disk
        #[arg(short, long)]
        name: Option<String>,
        /// Upload configuration name
        #[arg(short, long)]
        configuration: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { listen } => {
            let config = config::read_config()?;
            let addr = listen.unwrap_or(config.listen_addr);
            trigger::serve(addr, config.max_body_bytes).await
        }
        Commands::Upload {
            file,
            host,
            token,
            media_type,
            name,
            configuration,
        } => upload_file(file, host, token, media_type, name, configuration).await,
    }
}

async fn upload_file(
    file: PathBuf,
    host: Url,
    token: String,
    media_type: String,
    name: Option<String>,
    configuration: Option<String>,
) -> Result<()> {
    let bytes = std::fs::read(&file).context("Failed to read input file")?;
    let filename = match name {
        Some(name) => name,
        None => file
            .file_name()
            .context("Input path has no file name")?
            .to_string_lossy()
            .into_owned(),
    };

    let request = LargeUploadRequest {
        filename,
        media_type,
        file_size: bytes.len() as i64,
        file_content: STANDARD.encode(&bytes),
        content_hub_host_name: host.to_string(),
        content_hub_token: token,
        upload_configuration: configuration,
    };

    let outcome = upload::run(&request).await?;
    if !outcome.success {
        bail!("Upload failed: {}", outcome.message);
    }

    println!(
        "Asset created with ID {} ({})",
        outcome.asset_id, outcome.asset_identifier
    );
    Ok(())
}
