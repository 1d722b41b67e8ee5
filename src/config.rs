use std::path::PathBuf;

use clap::Args;

use crate::images::{DEFAULT_MAX_UPLOAD_BYTES, RECIPE_IMAGE_FOLDER};

/// Runtime settings for the HTTP server
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub database: String,
    pub cors_origin: Option<String>,
    /// Directory uploaded files are written beneath
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Public base URL used to build image links
    pub api_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            database: "recipebox.db".to_string(),
            cors_origin: None,
            upload_dir: PathBuf::from("."),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            api_url: "http://localhost:3000".to_string(),
        }
    }
}

impl AppConfig {
    /// Directory holding stored recipe images, served at `/recipe-photos`
    pub fn recipe_image_dir(&self) -> PathBuf {
        self.upload_dir.join(RECIPE_IMAGE_FOLDER)
    }
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[clap(short, long, default_value = "3000")]
    pub port: u16,
    #[clap(short, long, default_value = "recipebox.db")]
    pub database: String,
    #[clap(long)]
    pub cors_origin: Option<String>,
    #[clap(long, default_value = ".")]
    pub upload_dir: PathBuf,
    #[clap(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
    /// Public base URL; defaults to http://localhost:<port>
    #[clap(long)]
    pub api_url: Option<String>,
}

impl From<ServeArgs> for AppConfig {
    fn from(args: ServeArgs) -> Self {
        let api_url = args
            .api_url
            .unwrap_or_else(|| format!("http://localhost:{}", args.port));

        Self {
            port: args.port,
            database: args.database,
            cors_origin: args.cors_origin,
            upload_dir: args.upload_dir,
            max_upload_bytes: args.max_upload_bytes,
            api_url,
        }
    }
}
