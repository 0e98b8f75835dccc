use data_loader::HistoryIndex;
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("data/df_long_cumsum.csv");

    println!("Loading engagement history...\n");

    let start = Instant::now();
    let index = HistoryIndex::load_from_file(path)
        .expect("Failed to load engagement history");
    let elapsed = start.elapsed();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Keyed counts: {}", index.len());
    println!("Duplicate keys replaced: {}", index.duplicate_keys());
    println!("\nPerformance: {:.0} keys/second",
             index.len() as f64 / elapsed.as_secs_f64());
}
