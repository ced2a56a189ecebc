//! Callboard CLI - Submit call requests and watch their status
//!
//! Talks to the call-processing backend over its REST API.

mod config;
mod dashboard;
mod prompt;
mod render;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use callboard::{
    ApiConfig, CallForm, CallListView, CallsApi, Credential, HttpCallsApi, RefreshSignal, Workflow,
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Password;
use tracing_subscriber::EnvFilter;

use config::{Config, Overrides};

#[derive(Parser)]
#[command(name = "callboard")]
#[command(about = "Callboard CLI - Submit call requests and watch their status", long_about = None)]
#[command(version)]
struct Cli {
    /// Backend base URL (e.g. http://localhost:8000/api)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token (overrides config and environment)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Polling interval in milliseconds
    #[arg(long, global = true)]
    interval_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify and store an auth token (prompts unless --token is given)
    Login,

    /// Show current configuration
    Config,

    /// Submit a new call request
    Create {
        /// Customer name (will prompt if not provided)
        #[arg(short, long)]
        name: Option<String>,
        /// Phone number, e.g. +14155550100
        #[arg(short, long)]
        phone: Option<String>,
        /// Workflow: support, sales, reminder
        #[arg(short, long)]
        workflow: Option<Workflow>,
    },

    /// Print the call history once
    List,

    /// Keep the call history on screen, polling for updates
    Watch,

    /// Call history plus the submission form
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let overrides = Overrides {
        api_url: cli.api_url,
        auth_token: cli.token,
        poll_interval_ms: cli.interval_ms,
    };

    match cli.command {
        Commands::Login => cmd_login(&overrides).await,
        Commands::Config => cmd_config(&overrides),
        Commands::Create { name, phone, workflow } => {
            cmd_create(name, phone, workflow, &overrides).await
        }
        Commands::List => cmd_list(&overrides).await,
        Commands::Watch => cmd_watch(&overrides).await,
        Commands::Dashboard => cmd_dashboard(&overrides).await,
    }
}

// ============================================
// Command Implementations
// ============================================

fn connect(config: &Config) -> Result<Arc<dyn CallsApi>> {
    if config.auth_token.is_none() {
        bail!("Not logged in. Run 'callboard login' or set CALLBOARD_AUTH_TOKEN.");
    }
    let api_config = config.api_config()?;
    Ok(Arc::new(HttpCallsApi::new(api_config)))
}

async fn cmd_login(overrides: &Overrides) -> Result<()> {
    let resolved = Config::resolve(overrides)?;

    let token = match overrides.auth_token.clone() {
        Some(k) => k,
        None => Password::new()
            .with_prompt("Auth token")
            .interact()
            .context("Failed to read auth token")?,
    };

    let api_config = ApiConfig::new(&resolved.api_url, Credential::new(token.clone())?)?;
    let client = HttpCallsApi::new(api_config);
    print!("Testing connection... ");

    match client.list_calls().await {
        Ok(_) => {
            println!("{}", "OK".green());
        }
        Err(e) => {
            println!("{}", "Failed".red());
            bail!("Could not reach the call backend: {}", e);
        }
    }

    // Persist only what the user gave; environment values stay out of the file
    let mut config = Config::load()?;
    config.set_auth_token(token);
    if let Some(url) = &overrides.api_url {
        config.api_url = url.clone();
    }
    config.save()?;

    println!("{} Token saved to {:?}", "✓".green(), Config::config_path()?);
    Ok(())
}

fn cmd_config(overrides: &Overrides) -> Result<()> {
    let config = Config::resolve(overrides)?;

    println!("{}", "Configuration:".bold());
    println!("  Config file:   {:?}", Config::config_path()?);
    println!("  API URL:       {}", config.api_url);
    println!(
        "  Auth token:    {}",
        if config.auth_token.is_some() {
            "Set".green()
        } else {
            "Not set".yellow()
        }
    );
    println!("  Poll interval: {}ms", config.poll_interval_ms);
    println!("  Ordering:      {}", config.ordering()?);

    Ok(())
}

async fn cmd_create(
    name: Option<String>,
    phone: Option<String>,
    workflow: Option<Workflow>,
    overrides: &Overrides,
) -> Result<()> {
    let config = Config::resolve(overrides)?;
    let api = connect(&config)?;

    let mut form = CallForm::new();
    prompt::fill_form(&mut form, name, phone, workflow)?;

    println!("{}", form.submit_label().dimmed());
    match form.submit(api.as_ref(), || {}).await {
        Ok(call) => {
            println!(
                "{} Call started for {} ({})",
                "✓".green(),
                call.customer_name.cyan(),
                call.id.dimmed()
            );
            println!("  {} {}  {}", call.workflow, call.phone_number, call.status);
            Ok(())
        }
        Err(e) => {
            if let Some(status) = render::render_form_status(&form) {
                println!("{}", status);
            }
            bail!("{}", e.user_message());
        }
    }
}

async fn cmd_list(overrides: &Overrides) -> Result<()> {
    let config = Config::resolve(overrides)?;
    let api = connect(&config)?;

    let signal = RefreshSignal::new();
    let list = CallListView::mount(api, signal.subscribe(), config.list_config()?);

    let mut rx = list.subscribe();
    let snapshot = rx
        .wait_for(|s| s.applied_seq > 0)
        .await
        .context("Call list stopped before the first response")?
        .clone();
    list.unmount().await;

    print!("{}", render::render_list(&snapshot.view(), false));
    if let Some(error) = snapshot.error {
        bail!("{}", error);
    }
    Ok(())
}

async fn cmd_watch(overrides: &Overrides) -> Result<()> {
    let config = Config::resolve(overrides)?;
    let api = connect(&config)?;
    dashboard::run_watch(api, config.list_config()?).await
}

async fn cmd_dashboard(overrides: &Overrides) -> Result<()> {
    let config = Config::resolve(overrides)?;
    let api = connect(&config)?;
    dashboard::run_dashboard(api, config.list_config()?).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "callboard",
            "create",
            "--name",
            "Ada",
            "--workflow",
            "sales",
            "--interval-ms",
            "500",
        ])
        .unwrap();
        assert_eq!(cli.interval_ms, Some(500));
        match cli.command {
            Commands::Create { name, phone, workflow } => {
                assert_eq!(name.as_deref(), Some("Ada"));
                assert!(phone.is_none());
                assert_eq!(workflow, Some(Workflow::Sales));
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_workflow() {
        assert!(Cli::try_parse_from(["callboard", "create", "--workflow", "billing"]).is_err());
    }
}
