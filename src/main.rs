//! Labdocs CLI - document versioning and lab onboarding
//!
//! Thin command-line front end over the engine. Every command prints its result
//! as pretty JSON on stdout; logs go to stderr.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use http::{HeaderMap, HeaderName, HeaderValue};
use labdocs_core::versioning::parse_change_type;
use labdocs_core::workflow::parse_action;
use labdocs_core::{
    AmendmentRecorder, LabCloner, LabOnboarding, NewLab, Owner, TemplateService, TenantResolver,
    WorkflowEngine,
};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use crate::config::LabdocsConfig;

/// Labdocs - versioned lab documents with an approval workflow
#[derive(Parser, Debug)]
#[command(name = "labdocs")]
#[command(about = "Labdocs - versioned lab documents with an approval workflow")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: discover .labdocs.yml upwards from the current directory)
    #[arg(long, global = true, env = "LABDOCS_CONFIG")]
    config: Option<PathBuf>,

    /// Database URL, overrides the config file
    #[arg(long, global = true, env = "LABDOCS_DATABASE_URL")]
    database_url: Option<String>,

    /// Tenant context (`super_admin`, `lab:<uuid>` or a bare lab UUID)
    #[arg(long, global = true, env = "LABDOCS_TENANT")]
    tenant: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply pending database migrations
    Migrate,

    /// Apply a workflow action to a document version
    #[command(long_about = r#"
Apply a workflow action to a document version.

Actions: pending, completed, sent_back, rejected.
Steps:   prepared -> reviewed -> approved -> issued -> effective

EXAMPLES:
  labdocs act --version 7f1c... --action completed --actor 2b9e...
  labdocs act --version 7f1c... --action sent_back --comments "Missing annex"
    "#)]
    Act {
        /// Document version id
        #[arg(long)]
        version: Uuid,

        /// Workflow action
        #[arg(long)]
        action: String,

        /// Acting user
        #[arg(long, env = "LABDOCS_ACTOR")]
        actor: Uuid,

        /// Free-form comment stored on the audit row
        #[arg(long)]
        comments: Option<String>,
    },

    /// Record an amendment against a document version
    Amend {
        /// Document version id
        #[arg(long)]
        version: Uuid,

        /// Change type: major or minor
        #[arg(long = "type", default_value = "minor")]
        change_type: String,

        /// Acting user
        #[arg(long, env = "LABDOCS_ACTOR")]
        actor: Uuid,

        /// Reason for the change
        #[arg(long)]
        reason: Option<String>,
    },

    /// Clone a master document into a lab
    Clone {
        /// Master document id
        #[arg(long)]
        document: Uuid,

        /// Target lab (defaults to the lab of --tenant)
        #[arg(long)]
        lab: Option<Uuid>,

        /// Acting user
        #[arg(long, env = "LABDOCS_ACTOR")]
        actor: Uuid,
    },

    /// Create a lab and clone master documents into it
    Onboard {
        /// Lab display name
        #[arg(long)]
        name: String,

        /// Unique lab code
        #[arg(long)]
        code: String,

        /// Lab contact email
        #[arg(long)]
        email: Option<String>,

        /// Lab admin user (defaults to --actor)
        #[arg(long)]
        admin: Option<Uuid>,

        /// Master documents to clone (repeatable)
        #[arg(long = "document")]
        documents: Vec<Uuid>,

        /// Acting user
        #[arg(long, env = "LABDOCS_ACTOR")]
        actor: Uuid,
    },

    /// Show the workflow audit trail of a document version
    Log {
        /// Document version id
        #[arg(long)]
        version: Uuid,
    },

    /// Show the change ledger of a template
    History {
        /// Template id
        #[arg(long)]
        template: Uuid,
    },
}

/// Setup logging: --verbose, then RUST_LOG, then the configured level
fn setup_logging(verbose: bool, configured_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new(configured_level).unwrap_or_else(|_| EnvFilter::new("info"))
        })
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn load_config(explicit: Option<&PathBuf>) -> Result<(Option<PathBuf>, LabdocsConfig)> {
    match explicit {
        Some(path) => Ok((Some(path.clone()), LabdocsConfig::load(path)?)),
        None => Ok(match LabdocsConfig::discover()? {
            Some((path, config)) => (Some(path), config),
            None => (None, LabdocsConfig::default()),
        }),
    }
}

/// Resolve `--tenant` the same way a request header would be resolved
fn resolve_tenant(config: &LabdocsConfig, tenant: Option<&str>) -> Result<Owner> {
    let resolver = TenantResolver::new(config.tenant_header.as_str());
    let mut headers = HeaderMap::new();

    if let Some(value) = tenant {
        let name = HeaderName::from_bytes(resolver.header().as_bytes())
            .with_context(|| format!("Invalid tenant header name: {}", resolver.header()))?;
        let value = HeaderValue::from_str(value).context("Invalid tenant value")?;
        headers.insert(name, value);
    }

    Ok(resolver.resolve(&headers)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config_path, config) = load_config(cli.config.as_ref())?;
    setup_logging(cli.verbose, &config.log_level);

    match &config_path {
        Some(path) => debug!("Loaded config from {:?}", path),
        None => debug!("No .labdocs.yml found, using defaults"),
    }

    let owner = resolve_tenant(&config, cli.tenant.as_deref())?;
    debug!("Tenant context: {}", owner);

    let database_url = cli
        .database_url
        .clone()
        .unwrap_or_else(|| config.database_url.clone());
    let db = labdocs_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let migrate_only = matches!(cli.command, Commands::Migrate);
    if config.run_migrations || migrate_only {
        labdocs_db::migrate(&db)
            .await
            .context("Failed to run database migrations")?;
    }

    match cli.command {
        Commands::Migrate => {
            info!("✅ Database schema is up to date");
            print_json(&json!({ "migrated": true }))?;
        }
        Commands::Act {
            version,
            action,
            actor,
            comments,
        } => {
            let action = parse_action(&action)?;
            let state = WorkflowEngine::new(db)
                .act(version, action, actor, comments.as_deref())
                .await?;
            print_json(&json!({ "version_id": version, "workflow_state": state }))?;
        }
        Commands::Amend {
            version,
            change_type,
            actor,
            reason,
        } => {
            let change_type = parse_change_type(&change_type)?;
            let current = AmendmentRecorder::new(db)
                .record_amendment(version, change_type, actor, reason.as_deref())
                .await?;
            print_json(&current)?;
        }
        Commands::Clone {
            document,
            lab,
            actor,
        } => {
            let lab_id = lab
                .or_else(|| owner.lab_id())
                .context("No target lab: pass --lab or a lab --tenant")?;
            let cloned = LabCloner::new(db)
                .clone_document_for_lab(document, lab_id, actor)
                .await?;
            print_json(&cloned)?;
        }
        Commands::Onboard {
            name,
            code,
            email,
            admin,
            documents,
            actor,
        } => {
            let report = LabOnboarding::new(db)
                .onboard(
                    NewLab {
                        name,
                        code,
                        email,
                        admin_user_id: admin,
                    },
                    &documents,
                    actor,
                )
                .await?;
            if !report.is_complete() {
                warn!(
                    "⚠️  {} of {} documents failed to clone",
                    report.failed.len(),
                    documents.len()
                );
            }
            print_json(&report)?;
        }
        Commands::Log { version } => {
            let rows = WorkflowEngine::new(db).workflow_log(version).await?;
            print_json(&rows)?;
        }
        Commands::History { template } => {
            let rows = TemplateService::new(db).history(template).await?;
            print_json(&rows)?;
        }
    }

    Ok(())
}
