//! `fw-authz` - operator CLI for the Fairway authorization core.
//!
//! Evaluates permission checks, classifies tournament windows and resolves
//! slugs without touching storage. Results are printed as JSON on stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::info;

use fw_common::{GlobalRole, TournamentContext, TournamentRole, User, ACTIVE_STATUS};
use fw_engine::config::Config;
use fw_engine::observability::init_tracing;
use fw_engine::permissions::{evaluate, role_for_rank, ACTION_PERMISSIONS};
use fw_engine::tournament::{classify, now_millis, InMemorySlugs};

#[derive(Debug, Parser)]
#[command(name = "fw-authz", version, about = "Fairway authorization and tournament tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate a permission check and print the decision.
    Can {
        /// Action token, e.g. `tournament:edit`.
        #[arg(long)]
        action: String,

        /// Evaluate as an unauthenticated caller.
        #[arg(long, conflicts_with = "global_role")]
        anonymous: bool,

        /// Global role of the caller.
        #[arg(long, default_value = "guest")]
        global_role: GlobalRole,

        /// Tournament role; omit when the caller has no membership.
        #[arg(long)]
        role: Option<TournamentRole>,

        /// Membership status.
        #[arg(long, default_value = ACTIVE_STATUS, requires = "role")]
        status: String,

        #[arg(long, default_value_t = 0)]
        tournament_id: i64,

        #[arg(long, default_value = "")]
        organization_id: String,
    },

    /// Classify a tournament window.
    Status {
        /// Start date (epoch ms).
        #[arg(long)]
        start: Option<i64>,

        /// End date (epoch ms).
        #[arg(long)]
        end: Option<i64>,

        /// Evaluation time (epoch ms, default: now).
        #[arg(long)]
        now: Option<i64>,
    },

    /// Resolve a unique slug for a tournament name.
    Slug {
        name: String,

        /// Slugs already in use. `slug=id` records the owning tournament.
        #[arg(long = "taken", value_name = "SLUG[=ID]")]
        taken: Vec<String>,

        /// Tournament being renamed; its own slug is not a conflict.
        #[arg(long)]
        exclude_id: Option<i64>,
    },

    /// Print the action permission table.
    Actions,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::from_env().context("Invalid configuration")?;
    init_tracing(config.log_format);

    let output = execute(cli.command, &config).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Run a subcommand and return its JSON output.
async fn execute(command: Command, config: &Config) -> Result<Value> {
    let output = match command {
        Command::Can {
            action,
            anonymous,
            global_role,
            role,
            status,
            tournament_id,
            organization_id,
        } => {
            let user = (!anonymous).then(|| User::new("cli", "", global_role));
            let context =
                role.map(|role| TournamentContext::new(tournament_id, organization_id, role, status));

            let decision = evaluate(user.as_ref(), &action, context.as_ref());
            info!(%action, allowed = decision.is_allowed(), "Evaluated permission");
            json!({ "action": action, "allowed": decision.is_allowed(), "detail": decision })
        }
        Command::Status { start, end, now } => {
            let now = now.unwrap_or_else(now_millis);
            let status = classify(start, end, now);
            json!({ "status": status, "now": now })
        }
        Command::Slug {
            name,
            taken,
            exclude_id,
        } => {
            let registry = parse_taken(&taken)?;
            let slug = config
                .slug_resolver()
                .resolve_with(&name, &registry, exclude_id)
                .await
                .context("Failed to resolve slug")?;
            json!({ "slug": slug })
        }
        Command::Actions => {
            let actions: Vec<_> = ACTION_PERMISSIONS
                .iter()
                .map(|p| {
                    json!({
                        "action": p.action,
                        "min_rank": p.min_rank,
                        "min_role": role_for_rank(p.min_rank),
                    })
                })
                .collect();
            json!({ "actions": actions })
        }
    };

    Ok(output)
}

/// Build a registry from `slug` or `slug=id` arguments.
///
/// Bare slugs are reserved without an owner, so `--exclude-id` never frees
/// them.
fn parse_taken(taken: &[String]) -> Result<InMemorySlugs> {
    let mut registry = InMemorySlugs::new();

    for entry in taken {
        match entry.split_once('=') {
            Some((slug, id)) => {
                let id = id
                    .parse()
                    .with_context(|| format!("Invalid tournament ID in --taken {entry}"))?;
                registry.insert(slug, id);
            }
            None => registry.reserve(entry.as_str()),
        }
    }

    Ok(registry)
}
