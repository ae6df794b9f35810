//! Command Execution
//!
//! One function per CLI command. Single-item commands call the client
//! directly; the bulk commands (copy, clear, import) go through the batch
//! runner so one bad label never aborts the rest.

use std::path::Path;

use colored::Colorize;

use crate::batch::{run_batch, BatchSummary, Outcome};
use crate::error::{Error, Result};
use crate::github::{Label, LabelClient, LabelPatch, NewLabel};
use crate::snapshot;

/// Display current labels
pub async fn list(client: &LabelClient, format: &str) -> Result<()> {
    let labels = client.list_labels().await?;

    match format {
        "table" => {
            println!(
                "{:<30} {:<8} {:<50}",
                "Name".cyan(),
                "Color".cyan(),
                "Description".cyan()
            );
            println!("{}", "─".repeat(90));

            for label in labels {
                let description = label.description.as_deref().unwrap_or("(none)");
                println!(
                    "{:<30} {:<8} {:<50}",
                    label.name,
                    format!("#{}", label.color),
                    description
                );
            }
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&labels)?);
        }
        _ => return Err(Error::validation("Unsupported format")),
    }

    Ok(())
}

/// Create a single label
pub async fn create(client: &LabelClient, label: &NewLabel) -> Result<()> {
    let created = client.create_label(label).await?;
    println!(
        "{} Created label {} (#{})",
        "✓".green(),
        created.name.cyan(),
        created.color
    );
    Ok(())
}

/// Show a single label
pub async fn get(client: &LabelClient, name: &str) -> Result<()> {
    let label = client.get_label(name).await?;
    print_label(&label);
    Ok(())
}

/// Update a single label, addressed by its current name
pub async fn update(client: &LabelClient, name: &str, patch: &LabelPatch) -> Result<()> {
    let updated = client.update_label(name, patch).await?;
    println!(
        "{} Updated label {} -> {}",
        "✓".green(),
        name.cyan(),
        updated.name.cyan()
    );
    Ok(())
}

/// Delete a single label by name
pub async fn delete(client: &LabelClient, name: &str) -> Result<()> {
    client.delete_label(name).await?;
    println!("{} Deleted label {}", "✓".green(), name.cyan());
    Ok(())
}

/// Copy labels from one repository to another
///
/// Repository-default labels are excluded; the destination already has its
/// own. Creation failures are reported per label and the copy continues.
pub async fn copy(source: &LabelClient, dest: &LabelClient) -> Result<BatchSummary> {
    let labels = source.list_labels().await?;
    let custom: Vec<Label> = labels.into_iter().filter(|l| !l.default).collect();

    println!(
        "{} Copying {} labels from {}/{} to {}/{}",
        "•".blue(),
        custom.len(),
        source.owner(),
        source.repo(),
        dest.owner().cyan(),
        dest.repo().cyan()
    );

    let summary = run_batch("Created", custom, |l| l.name.clone(), |label| async move {
        let request = NewLabel {
            name: label.name,
            color: label.color,
            description: label.description,
        };
        match dest.create_label(&request).await {
            Ok(_) => Outcome::Success,
            Err(e) => Outcome::Failed(e.to_string()),
        }
    })
    .await;

    Ok(summary)
}

/// Delete every label in a repository, defaults included
pub async fn clear(client: &LabelClient) -> Result<BatchSummary> {
    let labels = client.list_labels().await?;

    if labels.is_empty() {
        println!(
            "{} No labels to delete in {}/{}",
            "•".blue(),
            client.owner(),
            client.repo()
        );
        return Ok(BatchSummary::default());
    }

    let summary = run_batch("Deleted", labels, |l| l.name.clone(), |label| async move {
        match client.delete_label(&label.name).await {
            Ok(()) => Outcome::Success,
            Err(e) => Outcome::Failed(e.to_string()),
        }
    })
    .await;

    Ok(summary)
}

/// Export a repository's labels to `<dir>/<repo>.json`
pub async fn export(client: &LabelClient, dir: &Path) -> Result<()> {
    let labels = client.list_labels().await?;
    let count = labels.len();
    let path = snapshot::write_snapshot(dir, client.owner(), client.repo(), labels)?;

    println!(
        "{} Exported {} labels to {}",
        "✓".green(),
        count,
        path.display().to_string().cyan()
    );
    Ok(())
}

/// Import labels from a snapshot file into a repository
///
/// A default-flagged label that is already present in the target is skipped
/// before any create. A create that fails because the label already exists is
/// counted as a skip, not an error; every other failure stays an error.
pub async fn import(client: &LabelClient, dir: &Path, file: &str) -> Result<BatchSummary> {
    let labels = snapshot::read_labels(dir, file)?;

    println!(
        "{} Importing {} labels into {}/{}",
        "•".blue(),
        labels.len(),
        client.owner().cyan(),
        client.repo().cyan()
    );

    let summary = run_batch("Imported", labels, |l| l.name.clone(), |label| async move {
        if label.default && client.get_label(&label.name).await.is_ok() {
            return Outcome::Skipped("default label already present".to_string());
        }

        let request = NewLabel {
            name: label.name,
            color: label.color,
            description: label.description,
        };
        match client.create_label(&request).await {
            Ok(_) => Outcome::Success,
            Err(e) if e.is_already_exists() => Outcome::Skipped("already exists".to_string()),
            Err(e) => Outcome::Failed(e.to_string()),
        }
    })
    .await;

    Ok(summary)
}

fn print_label(label: &Label) {
    println!("{}: {}", "Name".cyan(), label.name);
    println!("{}: #{}", "Color".cyan(), label.color);
    println!(
        "{}: {}",
        "Description".cyan(),
        label.description.as_deref().unwrap_or("(none)")
    );
    println!("{}: {}", "Default".cyan(), label.default);
}
