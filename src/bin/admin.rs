//! CLI administration tool for shopvault.
//!
//! Provides commands for managing shop tokens and performing database
//! operations without going through the web panel.
//!
//! # Usage
//!
//! ```bash
//! # Create a new shop token
//! cargo run --bin admin -- token create
//!
//! # List all tokens with usage counts
//! cargo run --bin admin -- token list
//!
//! # Delete a token and its images
//! cargo run --bin admin -- token delete h7Kp2mQv9sLx
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `IMAGES_DIR` / `PREVIEWS_DIR` (optional): image storage, used by
//!   `token delete` to remove the files of deleted images

use shopvault::application::services::{PanelOutcome, TokenService};
use shopvault::domain::entities::truncate_to_minute;
use shopvault::infrastructure::media::FileStore;
use shopvault::infrastructure::persistence::PgTokenRepository;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shopvault.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage shop tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new shop token
    Create {
        /// Numeric shop id (auto-suggested if not provided)
        #[arg(short, long)]
        shop_id: Option<String>,

        /// Free-form description shown in the panel
        #[arg(short, long)]
        description: Option<String>,

        /// Validity in days from now
        #[arg(long, default_value_t = 365)]
        days: i64,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Delete a token, its items, and its images
    Delete {
        /// Token value to delete
        token: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let service = TokenService::new(Arc::new(PgTokenRepository::new(Arc::new(pool.clone()))));

    match action {
        TokenAction::Create {
            shop_id,
            description,
            days,
            token,
            yes,
        } => {
            create_token(service, shop_id, description, days, token, yes).await?;
        }
        TokenAction::List => {
            list_tokens(service).await?;
        }
        TokenAction::Delete { token } => {
            delete_token(service, token).await?;
        }
    }

    Ok(())
}

/// Creates a new shop token with interactive prompts.
async fn create_token(
    service: TokenService,
    shop_id: Option<String>,
    description: Option<String>,
    days: i64,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create Shop Token".bright_blue().bold());
    println!();

    let shop_id = match shop_id {
        Some(id) => id,
        None => {
            let suggested = service
                .suggest_shop_id()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to pick a shop id: {}", e))?;
            Input::new()
                .with_prompt("Shop id")
                .with_initial_text(suggested)
                .interact_text()?
        }
    };

    let description = match description {
        Some(d) => d,
        None => Input::new()
            .with_prompt("Description")
            .allow_empty(true)
            .interact_text()?,
    };

    let token_value = match token {
        Some(t) => {
            println!("{}", "⚠️  Using provided token value".yellow());
            t
        }
        None => {
            let generated = service
                .suggest_token()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to generate a token: {}", e))?;
            println!("{}", "✨ Generated new token".green());
            generated
        }
    };

    let expires_at = truncate_to_minute((Utc::now() + Duration::days(days)).timestamp());

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Shop id:     {}", shop_id.cyan());
    println!("  Description: {}", description.cyan());
    println!("  Token:       {}", token_value.bright_yellow().bold());
    println!(
        "  Valid until: {}",
        format_expiry(expires_at).bright_black()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let outcome = service
        .create(&token_value, &shop_id, &description, &expires_at.to_string())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    match outcome {
        PanelOutcome::Applied => {
            println!();
            println!("{}", "✅ Token created successfully!".green().bold());
            println!();
            println!("{}", "Shops send it with every upload:".bright_white());
            println!(
                "  curl -F \"token={}\" -F \"file=@photo.jpg\" http://localhost:32851/upload",
                token_value.bright_yellow()
            );
            println!();
        }
        PanelOutcome::Invalid => {
            anyhow::bail!("token or shop id is already in use");
        }
    }

    Ok(())
}

/// Lists all shop tokens with usage counts.
async fn list_tokens(service: TokenService) -> Result<()> {
    println!("{}", "📋 Shop Tokens".bright_blue().bold());
    println!();

    let overviews = service
        .list_overview()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if overviews.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<14} {:<8} {:<20} {:<7} {:<7} {:<10}",
        "Token".bright_white().bold(),
        "Shop".bright_white().bold(),
        "Expires".bright_white().bold(),
        "Items".bright_white().bold(),
        "Images".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(70).bright_black());

    let now = Utc::now().timestamp();
    for overview in &overviews {
        let token = &overview.token;
        let status = if token.is_expired(now) {
            "EXPIRED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<14} {:<8} {:<20} {:<7} {:<7} {}",
            token.token.cyan(),
            token.shop_id,
            format_expiry(token.expires_at).bright_black(),
            overview.items_count,
            overview.images_count,
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        overviews.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deletes a token with a confirmation prompt, removing its image
/// files as well.
async fn delete_token(service: TokenService, token: String) -> Result<()> {
    println!("{}", "🗑  Delete Shop Token".bright_blue().bold());
    println!();

    println!("  Token: {}", token.cyan());
    println!(
        "{}",
        "  All of its items and images will be removed.".yellow()
    );
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Delete this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    let image_ids = service
        .delete(&token)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete token: {}", e))?;

    let images_dir = std::env::var("IMAGES_DIR").unwrap_or_else(|_| "images".to_string());
    let previews_dir = std::env::var("PREVIEWS_DIR").unwrap_or_else(|_| "previews".to_string());
    let store = FileStore::new(images_dir, previews_dir, 256);
    for id in &image_ids {
        store.remove(id);
    }

    println!();
    println!("{}", "✅ Token deleted!".green().bold());
    println!("  Removed images: {}", image_ids.len());
    println!();

    Ok(())
}

/// Displays system statistics.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let tokens_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shop_tokens")
        .fetch_one(pool)
        .await?;

    let items_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sub_items")
        .fetch_one(pool)
        .await?;

    let images_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM images")
        .fetch_one(pool)
        .await?;

    println!(
        "  Tokens: {}",
        tokens_count.to_string().bright_green().bold()
    );
    println!("  Items:  {}", items_count.to_string().bright_green().bold());
    println!(
        "  Images: {}",
        images_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?;
            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}

fn format_expiry(expires_at: i64) -> String {
    DateTime::from_timestamp(expires_at, 0)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .format("%Y-%m-%d %H:%M UTC")
        .to_string()
}
