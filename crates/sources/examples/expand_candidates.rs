//! Example: Correct the reference customer and expand it over the catalog
//!
//! Run with: cargo run --package sources --example expand_candidates

use sources::{sample, CandidateExpander, SnapshotCorrector};
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("debug")
        .init();

    println!("=== Candidate Expansion Example ===\n");

    let raw = sample::reference_record();
    let raw = raw
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("reference record must be a JSON object"))?;

    let start = Instant::now();
    let snapshot = SnapshotCorrector::new().correct(raw);
    println!("Corrected snapshot in {:?}", start.elapsed());
    println!("  Customer: {:?}", snapshot.customer_id);
    println!("  Reference date: {:?}", snapshot.reference_date);
    println!("  Age: {:?}", snapshot.age);
    println!("  Tenure: {:?}", snapshot.tenure_months);
    println!("  Income: {:?}", snapshot.income);
    println!("  Categorical attributes: {}\n", snapshot.categorical.len());

    let start = Instant::now();
    let rows = CandidateExpander::default().expand(snapshot);
    println!("Expanded {} candidate rows in {:?}", rows.len(), start.elapsed());
    for (i, row) in rows.iter().enumerate() {
        println!("  {:2}. {}", i + 1, row.product_name);
    }

    Ok(())
}
