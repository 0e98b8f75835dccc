use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{parse_date, CustomerId, HistoryIndex};
use pipeline::filters::DEFAULT_THRESHOLD;
use serde_json::Value;
use server::{ArtifactPaths, PredictionResponse, RecommendationOrchestrator};
use sources::{sample, ProductCatalog};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// product-recs - Banking Product Recommender
#[derive(Parser)]
#[command(name = "product-recs")]
#[command(about = "Recommends banking products a customer is likely to acquire", long_about = None)]
struct Cli {
    /// Deployment directory holding models/ and data/
    #[arg(short, long, env = "PRODUCT_RECS_BASE_DIR", default_value = ".")]
    base_dir: PathBuf,

    /// Encoder artifact (overrides <base-dir>/models/dict_encoders.json)
    #[arg(long, env = "PRODUCT_RECS_ENCODERS_PATH")]
    encoders: Option<PathBuf>,

    /// Model artifact (overrides <base-dir>/models/logreg_model.json)
    #[arg(long, env = "PRODUCT_RECS_MODEL_PATH")]
    model: Option<PathBuf>,

    /// Engagement history (overrides <base-dir>/data/df_long_cumsum.csv)
    #[arg(long, env = "PRODUCT_RECS_HISTORY_PATH")]
    history: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::from_base_dir(&self.base_dir).with_overrides(
            self.encoders.as_deref(),
            self.model.as_deref(),
            self.history.as_deref(),
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend products for one customer request
    Recommend {
        /// JSON request file ({"user_id": ..., "model_params": {...}});
        /// the built-in reference request when omitted
        #[arg(long)]
        request: Option<PathBuf>,

        /// Show the probability of every candidate product
        #[arg(long)]
        explain: bool,
    },

    /// List the product catalog in response order
    Catalog,

    /// Show a customer's cumulative engagement per product
    History {
        /// Customer id (ncodpers)
        #[arg(long)]
        customer_id: CustomerId,

        /// Reference date (YYYY-MM-DD); the latest recorded date when omitted
        #[arg(long)]
        date: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let paths = cli.artifact_paths();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend { request, explain } => {
            handle_recommend(&paths, request.as_deref(), explain).await?
        }
        Commands::Catalog => handle_catalog(),
        Commands::History { customer_id, date } => {
            handle_history(&paths, customer_id, date.as_deref())?
        }
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    paths: &ArtifactPaths,
    request: Option<&Path>,
    explain: bool,
) -> Result<()> {
    let request = match request {
        Some(path) => read_request(path)?,
        None => sample::reference_request(),
    };

    println!(
        "Loading artifacts from {}...",
        paths.encoders.parent().unwrap_or(Path::new(".")).display()
    );
    let start = Instant::now();
    let orchestrator =
        RecommendationOrchestrator::load(paths).context("Failed to load model artifacts")?;
    println!("{} Loaded artifacts in {:?}", "✓".green(), start.elapsed());
    if !orchestrator.has_history() {
        println!("{} Engagement history unavailable; counts are 0", "!".yellow());
    }

    let response = orchestrator.handle_async(request.clone()).await;
    print_response(&response);

    if explain {
        let model_params = request
            .get("model_params")
            .ok_or_else(|| anyhow!("request has no model_params to explain"))?;
        let scored = orchestrator
            .score_candidates(model_params)
            .context("Failed to score candidates")?;

        println!("\n{}", "Candidate probabilities:".bold().blue());
        for row in &scored {
            let marker = if row.probability > DEFAULT_THRESHOLD {
                "✓".green()
            } else {
                "·".dimmed()
            };
            println!("  {} {:<20} {:.4}", marker, row.product_name_first, row.probability);
        }
    }

    println!("\n{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Handle the 'catalog' command
fn handle_catalog() {
    let catalog = ProductCatalog::standard();
    println!("{}", format!("Product catalog ({} products):", catalog.len()).bold().blue());
    for (idx, product) in catalog.iter().enumerate() {
        println!("{:>3}. {}", (idx + 1).to_string().green(), product);
    }
}

/// Handle the 'history' command
fn handle_history(
    paths: &ArtifactPaths,
    customer_id: CustomerId,
    date: Option<&str>,
) -> Result<()> {
    let history = HistoryIndex::load_from_file(&paths.history).with_context(|| {
        format!(
            "Failed to load engagement history from {}",
            paths.history.display()
        )
    })?;

    let reference_date = match date {
        Some(raw) => parse_date(raw)
            .ok_or_else(|| anyhow!("Invalid date '{}', expected YYYY-MM-DD", raw))?,
        None => history
            .latest_date(customer_id)
            .ok_or_else(|| anyhow!("Customer {} has no engagement history", customer_id))?,
    };
    info!("Showing history for customer {} at {}", customer_id, reference_date);

    let counts = history.get_customer_history(customer_id, reference_date);
    println!(
        "{}",
        format!("Customer {} at {}:", customer_id, reference_date).bold().blue()
    );
    for product in ProductCatalog::standard().iter() {
        match counts.and_then(|counts| counts.get(product)) {
            Some(count) => println!("{}{:<20} {}", "• ".green(), product, count),
            None => println!("{}{:<20} {}", "• ".dimmed(), product, "-".dimmed()),
        }
    }
    Ok(())
}

fn read_request(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Request file {} is not valid JSON", path.display()))
}

/// Helper function to format and print a response
fn print_response(response: &PredictionResponse) {
    match response {
        PredictionResponse::Success(result) => {
            println!(
                "{}",
                format!("Recommended products for user {}:", result.user_id).bold().blue()
            );
            if result.products.is_empty() {
                println!("  (none above {})", DEFAULT_THRESHOLD);
            }
            for (rank, product) in result.products.iter().enumerate() {
                println!("{}. {}", (rank + 1).to_string().green(), product);
            }
        }
        PredictionResponse::Error(error) => {
            println!("{} {}", "✗".red(), error.error.red());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_recommend_defaults() {
        let cli = Cli::parse_from(["product-recs", "recommend"]);
        match cli.command {
            Commands::Recommend { request, explain } => {
                assert!(request.is_none());
                assert!(!explain);
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_artifact_overrides() {
        let cli = Cli::parse_from([
            "product-recs",
            "--base-dir",
            "/srv/recs",
            "--history",
            "/mnt/history.csv",
            "catalog",
        ]);

        let paths = cli.artifact_paths();
        assert_eq!(paths.encoders, PathBuf::from("/srv/recs/models/dict_encoders.json"));
        assert_eq!(paths.history, PathBuf::from("/mnt/history.csv"));
    }

    #[test]
    fn test_history_args() {
        let cli = Cli::parse_from([
            "product-recs",
            "history",
            "--customer-id",
            "1375586",
            "--date",
            "2016-05-28",
        ]);
        match cli.command {
            Commands::History { customer_id, date } => {
                assert_eq!(customer_id, 1375586);
                assert_eq!(date.as_deref(), Some("2016-05-28"));
            }
            _ => panic!("expected history"),
        }
    }

    #[test]
    fn test_read_request() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"user_id": 1, "model_params": {"age": 36}}"#).unwrap();

        let request = read_request(file.path()).unwrap();
        assert_eq!(request["model_params"]["age"], 36);
    }

    #[test]
    fn test_read_request_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"user_id=1").unwrap();
        assert!(read_request(file.path()).is_err());
    }
}
