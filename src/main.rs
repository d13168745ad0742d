use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use clashgen::kv::{ConfiguredDatasetStore, FileDatasetStore};
use clashgen::models::AppState;
use clashgen::web_handlers::interfaces;
use clashgen::{get_cl_normal_config, get_cl_warp_config, ClashBuilders, Settings};

/// Generate Clash (mihomo) configurations for a Cloudflare worker panel
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the settings file (YAML or TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Listen address (e.g., 127.0.0.1 or 0.0.0.0)
    #[arg(short, long, value_name = "ADDRESS")]
    address: Option<String>,

    /// Listen port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Write one document to this file instead of starting the server
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<String>,

    /// Generate the WARP document (with --output)
    #[arg(long)]
    warp: bool,

    /// Use enhanced WARP options (with --warp)
    #[arg(long)]
    pro: bool,

    /// Account dataset file, overriding the settings (with --warp)
    #[arg(long, value_name = "FILE")]
    dataset: Option<String>,
}

fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path))?,
        None => Settings::new(),
    };
    if let Some(address) = &args.address {
        settings.listen_address = address.clone();
    }
    if let Some(port) = args.port {
        settings.listen_port = port;
    }
    Ok(settings)
}

async fn write_document(args: &Args, settings: &Settings, output: &str) -> anyhow::Result<()> {
    let builders = ClashBuilders::new(settings);
    let document = if args.warp {
        let store = match &args.dataset {
            Some(path) => ConfiguredDatasetStore::File(FileDatasetStore::new(path)),
            None => ConfiguredDatasetStore::from_location(&settings.dataset_path),
        };
        get_cl_warp_config(settings, &builders, &store, args.pro).await?
    } else {
        get_cl_normal_config(settings, &builders)?
    };

    std::fs::write(output, document.content)
        .with_context(|| format!("Failed to write to output file {}", output))?;
    info!("Successfully wrote Clash config to {}", output);
    Ok(())
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();
    if (args.pro || args.dataset.is_some()) && !args.warp {
        anyhow::bail!("--pro and --dataset only apply together with --warp");
    }

    let settings = load_settings(&args)?;

    if let Some(output) = &args.output {
        return write_document(&args, &settings, output).await;
    }

    let listen_address = if settings.listen_address.trim().is_empty() {
        error!("Empty listen_address in settings, defaulting to 127.0.0.1");
        format!("127.0.0.1:{}", settings.listen_port)
    } else if settings.listen_address.contains(':') {
        settings.listen_address.clone()
    } else {
        format!("{}:{}", settings.listen_address, settings.listen_port)
    };

    let app_state = Arc::new(AppState::new(settings));
    info!("clashgen starting on {}", listen_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Arc::clone(&app_state)))
            .configure(interfaces::config)
            // For health check
            .route("/", web::get().to(|| async { "clashgen is running!" }))
    })
    .bind(listen_address)?
    .run()
    .await?;
    Ok(())
}
