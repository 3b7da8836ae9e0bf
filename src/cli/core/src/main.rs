/* src/cli/core/src/main.rs */

mod commands;
mod config;
mod logging;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use studio_client::{
  AssetScope, AssetType, GalleryFilters, JobStatus, SourceAssetFilters, UserAssetFilters, UserRole,
  non_blank,
};

use commands::{browse, upload, users};
use config::{StudioConfig, find_studio_config, load_studio_config};

#[derive(Parser)]
#[command(name = "studio", about = "Creative Studio collection browser")]
struct Cli {
  /// Path to studio.toml (auto-detected if omitted)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,
  /// Log at debug level (otherwise STUDIO_LOG, default warn)
  #[arg(short, long, global = true)]
  verbose: bool,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Browse generated media in a workspace
  Gallery {
    /// Workspace id (defaults to [workspace].id)
    #[arg(short, long)]
    workspace: Option<String>,
    #[arg(long)]
    user_email: Option<String>,
    #[arg(long)]
    mime_type: Option<String>,
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    status: Option<JobStatus>,
    /// Number of pages to load
    #[arg(long, default_value_t = 1)]
    pages: u32,
  },
  /// Browse uploaded source assets
  Assets {
    #[arg(short, long)]
    workspace: Option<String>,
    /// Match on the original file name
    #[arg(long)]
    filename: Option<String>,
    #[arg(long)]
    scope: Option<AssetScope>,
    #[arg(long)]
    asset_type: Option<AssetType>,
    #[arg(long)]
    mime_type: Option<String>,
    #[arg(long)]
    user_email: Option<String>,
    #[arg(long, default_value_t = 1)]
    pages: u32,
  },
  /// Browse per-user assets
  UserAssets {
    #[arg(long)]
    mime_type: Option<String>,
    #[arg(long)]
    user_email: Option<String>,
    #[arg(long, default_value_t = 1)]
    pages: u32,
  },
  /// List users (admin only)
  Users {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    page: u64,
    /// Rows per page (defaults to [users].page_size)
    #[arg(long)]
    page_size: Option<u32>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    role: Option<UserRole>,
    /// Navigate pages from stdin
    #[arg(short, long)]
    interactive: bool,
  },
  /// Upload a file as a source asset
  Upload {
    file: PathBuf,
    #[arg(long)]
    scope: Option<AssetScope>,
    #[arg(long)]
    asset_type: Option<AssetType>,
    #[arg(short, long)]
    workspace: Option<String>,
  },
}

/// Resolve config path (explicit or auto-detected) and parse it
fn resolve_config(explicit: Option<PathBuf>) -> Result<(PathBuf, StudioConfig)> {
  let path = match explicit {
    Some(p) => p,
    None => {
      let cwd = std::env::current_dir().context("failed to get cwd")?;
      find_studio_config(&cwd)?
    }
  };
  let config = load_studio_config(&path)?;
  Ok((path, config))
}

fn require_workspace(config: &StudioConfig, explicit: Option<String>) -> Result<String> {
  match non_blank(config.workspace_id(explicit)) {
    Some(id) => Ok(id),
    None => bail!("a workspace id is required (pass --workspace or set [workspace].id)"),
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  logging::init(cli.verbose);

  let (config_path, config) = resolve_config(cli.config)?;
  tracing::debug!(path = %config_path.display(), "loaded config");
  let backend = commands::connect(&config)?;

  match cli.command {
    Command::Gallery { workspace, user_email, mime_type, model, status, pages } => {
      let filters = GalleryFilters {
        workspace_id: require_workspace(&config, workspace)?,
        user_email: non_blank(user_email),
        mime_type: non_blank(mime_type),
        model: non_blank(model),
        status,
      };
      ui::banner("gallery");
      let loader =
        browse::loader(backend.gallery(), filters, config.gallery.page_size, "gallery")?;
      browse::run(&loader, pages).await?;
    }
    Command::Assets { workspace, filename, scope, asset_type, mime_type, user_email, pages } => {
      let filters = SourceAssetFilters {
        workspace_id: non_blank(config.workspace_id(workspace)),
        original_filename: non_blank(filename),
        scope,
        asset_type,
        mime_type: non_blank(mime_type),
        user_email: non_blank(user_email),
      };
      ui::banner("assets");
      let loader =
        browse::loader(backend.source_assets(), filters, config.assets.page_size, "source assets")?;
      browse::run(&loader, pages).await?;
    }
    Command::UserAssets { mime_type, user_email, pages } => {
      let filters =
        UserAssetFilters { mime_type: non_blank(mime_type), user_email: non_blank(user_email) };
      ui::banner("user assets");
      let loader =
        browse::loader(backend.user_assets(), filters, config.assets.page_size, "user assets")?;
      browse::run(&loader, pages).await?;
    }
    Command::Users { page, page_size, email, role, interactive } => {
      ui::banner("users");
      let args = users::UsersArgs {
        page: usize::try_from(page).context("page number is too large")?,
        page_size: page_size.unwrap_or(config.users.page_size),
        email,
        role,
        interactive,
        debounce: config.users.debounce(),
      };
      users::run(backend.users(), args).await?;
    }
    Command::Upload { file, scope, asset_type, workspace } => {
      ui::banner("upload");
      let args = upload::UploadArgs {
        file: &file,
        scope,
        asset_type,
        workspace_id: non_blank(config.workspace_id(workspace)),
        page_size: config.assets.page_size,
      };
      upload::run(&backend, args).await?;
    }
  }

  Ok(())
}
