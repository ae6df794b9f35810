//! Batch Operation Runner
//!
//! Sequential "for each item, apply operation, collect outcome" driver shared
//! by the copy, clear, and import commands. A single item's failure never
//! aborts the rest of the batch.

use std::future::Future;

use colored::Colorize;

/// Result of applying the batch action to one item
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The operation succeeded
    Success,

    /// The item was intentionally not processed
    Skipped(String),

    /// The operation failed; the batch continues
    Failed(String),
}

/// Aggregate tallies for one batch invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    /// Number of items that succeeded
    pub succeeded: u32,

    /// Number of items that were skipped
    pub skipped: u32,

    /// Number of items that failed
    pub failed: u32,
}

impl BatchSummary {
    /// Total number of items processed
    pub fn total(&self) -> u32 {
        self.succeeded + self.skipped + self.failed
    }
}

/// Apply `action` to every item in fetch order, folding outcomes into tallies
///
/// Items are processed strictly one at a time. Each outcome is reported as it
/// happens: a confirmation line on success, the reason on skip, and the item
/// name plus reason on failure. Failures do not stop the batch.
///
/// # Arguments
/// - `verb`: Past-tense verb for per-item confirmations (e.g. "Created")
/// - `items`: Items in the order they were fetched
/// - `name`: Extracts the display name of an item
/// - `action`: Per-item operation
pub async fn run_batch<T, F, Fut>(
    verb: &str,
    items: Vec<T>,
    name: impl Fn(&T) -> String,
    action: F,
) -> BatchSummary
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Outcome>,
{
    let mut summary = BatchSummary::default();

    for item in items {
        let item_name = name(&item);

        match action(item).await {
            Outcome::Success => {
                summary.succeeded += 1;
                println!("{} {} {}", "✓".green(), verb, item_name.cyan());
            }
            Outcome::Skipped(reason) => {
                summary.skipped += 1;
                println!("{} Skipped {}: {}", "•".blue(), item_name.cyan(), reason);
            }
            Outcome::Failed(reason) => {
                summary.failed += 1;
                eprintln!("{} {}: {}", "✗".red(), item_name.red(), reason);
            }
        }
    }

    println!(
        "\n{} {} succeeded, {} skipped, {} failed",
        "Summary:".bold(),
        summary.succeeded.to_string().green(),
        summary.skipped.to_string().blue(),
        summary.failed.to_string().red()
    );

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[tokio::test]
    async fn test_counts_each_outcome() {
        let items = vec!["a", "b", "c", "d"];

        let summary = run_batch("Processed", items, |i| i.to_string(), |item| async move {
            match item {
                "a" | "c" => Outcome::Success,
                "b" => Outcome::Skipped("not wanted".to_string()),
                _ => Outcome::Failed("boom".to_string()),
            }
        })
        .await;

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 4);
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_batch() {
        let processed = RefCell::new(Vec::new());

        let summary = run_batch(
            "Processed",
            vec![1, 2, 3],
            |i| i.to_string(),
            |item| {
                processed.borrow_mut().push(item);
                async move {
                    if item == 1 {
                        Outcome::Failed("first item fails".to_string())
                    } else {
                        Outcome::Success
                    }
                }
            },
        )
        .await;

        // Every item after the failure was still processed, in order
        assert_eq!(*processed.borrow(), vec![1, 2, 3]);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.succeeded, 2);
    }

    #[tokio::test]
    async fn test_empty_input_yields_zero_tallies() {
        let summary =
            run_batch("Processed", Vec::<String>::new(), |i| i.clone(), |_| async {
                Outcome::Success
            })
            .await;

        assert_eq!(summary, BatchSummary::default());
    }
}
