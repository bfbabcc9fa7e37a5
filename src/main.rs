use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use knn_vote::{Error, KnnConfig, Prediction};

#[derive(Parser, Debug)]
#[command(
    name = "knn-vote",
    about = "Classify a point by majority vote of its k nearest neighbors",
    after_help = "Without --dataset or a config file, reads dataset.csv from the current directory.\n\
                  The bundled sample runs with: knn-vote --dataset data/dataset.csv"
)]
struct Cli {
    /// Path to config file (JSON, keys datasetPath / queryPoint / k)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Dataset CSV, label in the last column [default: dataset.csv]
    #[arg(long)]
    dataset: Option<PathBuf>,
    /// Query point as comma-separated reals, e.g. 5.1,3.5,1.4,0.2
    #[arg(long, allow_hyphen_values = true)]
    query: Option<String>,
    /// Number of neighbors that vote
    #[arg(short, long, allow_negative_numbers = true)]
    k: Option<i64>,
    /// Also print the ranked neighbors and the vote tally
    #[arg(long)]
    explain: bool,
}

impl Cli {
    fn resolve(&self) -> Result<KnnConfig, Error> {
        Ok(KnnConfig::resolve(
            self.config.as_deref(),
            self.dataset.clone(),
            self.query.as_deref(),
            self.k,
        )?)
    }
}

fn print_explanation(prediction: &Prediction<String>) {
    println!("Nearest neighbors:");
    for (rank, neighbor) in prediction.neighbors.iter().enumerate() {
        println!("  {:>3}. row {:<6} distance {:.6}", rank + 1, neighbor.index + 1, neighbor.distance);
    }
    println!("Votes:");
    for vote in &prediction.votes {
        println!("  {}: {}", vote.label, vote.count);
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(e.exit_code());
        }
    };

    match knn_vote::run(&config) {
        Ok(prediction) => {
            if cli.explain {
                print_explanation(&prediction);
            }
            println!("Prediction for new data point: {}", prediction.label);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
