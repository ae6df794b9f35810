//! gh-labels CLI
//!
//! Command line tool for managing GitHub repository labels

use std::path::Path;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use colored::Colorize;

use gh_labels::{
    commands,
    github::{LabelClient, LabelPatch, NewLabel},
    snapshot::EXPORT_DIR,
    Error, Result,
};

/// gh-labels CLI
///
/// Command-line client for GitHub repository label management
#[derive(Parser)]
#[command(
    name = "gh-labels",
    version,
    about = "Manage GitHub repository labels from the command line",
    long_about = "A command-line client for GitHub repository labels: single-label CRUD, \
    bulk copy between repositories, bulk clear, and JSON snapshot export/import."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Repository owner
    #[arg(long, global = true)]
    owner: Option<String>,

    /// Repository name
    #[arg(long, global = true)]
    repo: Option<String>,

    /// GitHub access token (the GITHUB_TOKEN env var takes precedence)
    #[arg(long, global = true)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display current labels
    List {
        /// Output format
        #[arg(long, default_value = "table", value_parser = ["table", "json"])]
        format: String,
    },

    /// Create a label
    Create {
        /// Label name
        #[arg(long)]
        name: Option<String>,

        /// Label color (6-digit hex, no #)
        #[arg(long)]
        color: Option<String>,

        /// Label description
        #[arg(long)]
        description: Option<String>,
    },

    /// Show a single label
    Get {
        /// Label name
        #[arg(long)]
        name: Option<String>,
    },

    /// Update a label, addressed by its current name
    Update {
        /// Current label name
        #[arg(long)]
        name: Option<String>,

        /// New label name
        #[arg(long)]
        new_name: Option<String>,

        /// New color (6-digit hex, no #)
        #[arg(long)]
        color: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a label
    Delete {
        /// Label name
        #[arg(long)]
        name: Option<String>,
    },

    /// Copy labels from one repository to another (default labels excluded)
    Copy {
        /// Source owner (falls back to --owner)
        #[arg(long)]
        from_owner: Option<String>,

        /// Source repository (falls back to --repo)
        #[arg(long)]
        from_repo: Option<String>,

        /// Destination owner
        #[arg(long)]
        to_owner: Option<String>,

        /// Destination repository
        #[arg(long)]
        to_repo: Option<String>,
    },

    /// Export labels to exports/<repo>.json
    Export,

    /// Import labels from a snapshot file in exports/
    Import {
        /// Snapshot filename inside exports/
        #[arg(long)]
        file: Option<String>,
    },

    /// Delete every label in a repository
    Clear,
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    if let Err(e) = run(cli, std::env::var("GITHUB_TOKEN").ok()).await {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

/// Validate inputs and execute the requested command
///
/// Validation failures are terminal and happen before any network call.
/// Per-item failures inside the bulk commands are reported by the batch
/// runner and never bubble up here.
async fn run(cli: Cli, env_token: Option<String>) -> Result<()> {
    let token = resolve_token(env_token, cli.token)?;

    match cli.command {
        Commands::List { format } => {
            let (owner, repo) = require_repo(cli.owner, cli.repo)?;
            let client = LabelClient::new(&token, &owner, &repo);
            commands::list(&client, &format).await
        }

        Commands::Create {
            name,
            color,
            description,
        } => {
            let (owner, repo) = require_repo(cli.owner, cli.repo)?;
            let (name, color) = match (name, color) {
                (Some(name), Some(color)) => (name, color),
                _ => {
                    return Err(Error::validation(
                        "create requires both --name and --color",
                    ))
                }
            };

            let client = LabelClient::new(&token, &owner, &repo);
            commands::create(
                &client,
                &NewLabel {
                    name,
                    color,
                    description,
                },
            )
            .await
        }

        Commands::Get { name } => {
            let (owner, repo) = require_repo(cli.owner, cli.repo)?;
            let name = require_name(name)?;
            let client = LabelClient::new(&token, &owner, &repo);
            commands::get(&client, &name).await
        }

        Commands::Update {
            name,
            new_name,
            color,
            description,
        } => {
            let (owner, repo) = require_repo(cli.owner, cli.repo)?;
            let name = require_name(name)?;
            let patch = LabelPatch {
                new_name,
                color,
                description,
            };
            if patch.is_empty() {
                return Err(Error::validation(
                    "update requires at least one of --new-name, --color, --description",
                ));
            }

            let client = LabelClient::new(&token, &owner, &repo);
            commands::update(&client, &name, &patch).await
        }

        Commands::Delete { name } => {
            let (owner, repo) = require_repo(cli.owner, cli.repo)?;
            let name = require_name(name)?;
            let client = LabelClient::new(&token, &owner, &repo);
            commands::delete(&client, &name).await
        }

        Commands::Copy {
            from_owner,
            from_repo,
            to_owner,
            to_repo,
        } => {
            // Explicit source flags win; the generic pair is the fallback
            let (from_owner, from_repo) =
                match (from_owner.or(cli.owner), from_repo.or(cli.repo)) {
                    (Some(o), Some(r)) => (o, r),
                    _ => {
                        return Err(Error::validation(
                            "copy requires a source: --from-owner/--from-repo or --owner/--repo",
                        ))
                    }
                };
            let (to_owner, to_repo) = match (to_owner, to_repo) {
                (Some(o), Some(r)) => (o, r),
                _ => {
                    return Err(Error::validation(
                        "copy requires a destination: --to-owner and --to-repo",
                    ))
                }
            };

            let source = LabelClient::new(&token, &from_owner, &from_repo);
            let dest = LabelClient::new(&token, &to_owner, &to_repo);
            commands::copy(&source, &dest).await.map(|_| ())
        }

        Commands::Export => {
            let (owner, repo) = require_repo(cli.owner, cli.repo)?;
            let client = LabelClient::new(&token, &owner, &repo);
            commands::export(&client, Path::new(EXPORT_DIR)).await
        }

        Commands::Import { file } => {
            let (owner, repo) = require_repo(cli.owner, cli.repo)?;
            let file = file.ok_or_else(|| Error::validation("import requires --file"))?;
            let client = LabelClient::new(&token, &owner, &repo);
            commands::import(&client, Path::new(EXPORT_DIR), &file)
                .await
                .map(|_| ())
        }

        Commands::Clear => {
            let (owner, repo) = require_repo(cli.owner, cli.repo)?;
            let client = LabelClient::new(&token, &owner, &repo);
            commands::clear(&client).await.map(|_| ())
        }
    }
}

/// Resolve the access token; the environment takes precedence over the flag
fn resolve_token(env_token: Option<String>, flag_token: Option<String>) -> Result<String> {
    env_token
        .filter(|t| !t.trim().is_empty())
        .or_else(|| flag_token.filter(|t| !t.trim().is_empty()))
        .ok_or_else(|| {
            Error::validation(
                "GitHub access token is required. Set the GITHUB_TOKEN env var or pass --token",
            )
        })
}

/// Require the target repository pair
fn require_repo(owner: Option<String>, repo: Option<String>) -> Result<(String, String)> {
    match (owner, repo) {
        (Some(owner), Some(repo)) => Ok((owner, repo)),
        _ => Err(Error::validation("--owner and --repo are required")),
    }
}

/// Require a label name
fn require_name(name: Option<String>) -> Result<String> {
    name.ok_or_else(|| Error::validation("--name is required"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    // --- resolve_token tests ---
    // The env value is threaded in as a parameter, so no process-global
    // environment mutation is needed here.

    #[test]
    fn test_resolve_token_env_wins_over_flag() {
        let token = resolve_token(Some("env-token".to_string()), Some("flag-token".to_string()));
        assert_eq!(token.unwrap(), "env-token");
    }

    #[test]
    fn test_resolve_token_flag_fallback() {
        let token = resolve_token(None, Some("flag-token".to_string()));
        assert_eq!(token.unwrap(), "flag-token");
    }

    #[test]
    fn test_resolve_token_empty_env_is_absent() {
        let token = resolve_token(Some("   ".to_string()), Some("flag-token".to_string()));
        assert_eq!(token.unwrap(), "flag-token");
    }

    #[test]
    fn test_resolve_token_neither_present() {
        assert!(resolve_token(None, None).is_err());
    }

    // --- validation tests; all fail before any client is built ---

    #[tokio::test]
    async fn test_missing_token_is_terminal() {
        let cli = parse(&["gh-labels", "list", "--owner", "o", "--repo", "r"]);
        let err = run(cli, None).await.unwrap_err();
        assert!(err.to_string().contains("token"));
    }

    #[tokio::test]
    async fn test_list_requires_owner_and_repo() {
        let cli = parse(&["gh-labels", "list", "--token", "t"]);
        let err = run(cli, None).await.unwrap_err();
        assert!(err.to_string().contains("--owner"));
    }

    #[tokio::test]
    async fn test_create_message_names_both_required_flags() {
        let cli = parse(&[
            "gh-labels", "create", "--owner", "o", "--repo", "r", "--token", "t", "--name", "bug",
        ]);
        let err = run(cli, None).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("--name"));
        assert!(message.contains("--color"));
    }

    #[tokio::test]
    async fn test_update_rejects_empty_patch() {
        let cli = parse(&[
            "gh-labels", "update", "--owner", "o", "--repo", "r", "--token", "t", "--name", "bug",
        ]);
        let err = run(cli, None).await.unwrap_err();
        assert!(err.to_string().contains("at least one"));
    }

    #[tokio::test]
    async fn test_copy_requires_destination() {
        let cli = parse(&[
            "gh-labels", "copy", "--owner", "o", "--repo", "r", "--token", "t",
        ]);
        let err = run(cli, None).await.unwrap_err();
        assert!(err.to_string().contains("--to-owner"));
    }

    #[tokio::test]
    async fn test_copy_requires_source_pair() {
        // --from-repo absent and no --repo to fall back on
        let cli = parse(&[
            "gh-labels",
            "copy",
            "--from-owner",
            "a",
            "--token",
            "t",
            "--to-owner",
            "b",
            "--to-repo",
            "dst",
        ]);
        let err = run(cli, None).await.unwrap_err();
        assert!(err.to_string().contains("source"));
    }

    #[tokio::test]
    async fn test_import_requires_file() {
        let cli = parse(&[
            "gh-labels", "import", "--owner", "o", "--repo", "r", "--token", "t",
        ]);
        let err = run(cli, None).await.unwrap_err();
        assert!(err.to_string().contains("--file"));
    }

    #[test]
    fn test_unknown_command_is_a_parse_error() {
        assert!(Cli::try_parse_from(["gh-labels", "frobnicate"]).is_err());
    }
}
