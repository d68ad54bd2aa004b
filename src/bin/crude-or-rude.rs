//! crude-or-rude: classify crude oil headlines from the command line.
//!
//! With no headline, analyses the built-in sample headlines.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crude_or_rude::config::{Config, Secrets};
use crude_or_rude::samples::headlines_from_words;
use crude_or_rude::{AnalysisOutcome, AnalysisResult, Pipeline};

/// Crude or Rude market sentiment analyzer
#[derive(Parser)]
#[command(name = "crude-or-rude")]
#[command(version = crude_or_rude::PKG_VERSION)]
#[command(about = "Is the oil market professional, panicking, or passive-aggressive?")]
struct Args {
    /// Headline to analyse (words are joined); omit to run the samples
    headline: Vec<String>,

    /// Source of the headline
    #[arg(short, long)]
    source: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Skip the reasoning collaborator and use rule-based decisions
    #[arg(long)]
    offline: bool,

    /// Seed for the tone scorer's jitter
    #[arg(long, env = "CRUDE_OR_RUDE_SEED")]
    seed: Option<u64>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every analysis succeeded.
async fn run(args: Args) -> crude_or_rude::Result<bool> {
    let pipeline = build_pipeline(&args)?;

    let headlines = headlines_from_words(&args.headline);

    if !args.json {
        println!("Crude or Rude? Market Sentiment Analyzer");
        println!("{}", "=".repeat(50));
    }

    let mut all_ok = true;
    for (i, headline) in headlines.iter().enumerate() {
        let outcome = pipeline.analyze(headline, args.source.as_deref()).await;
        all_ok &= outcome.is_success();

        if args.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            continue;
        }

        println!();
        if headlines.len() > 1 {
            println!("Sample {}: {headline}", i + 1);
        } else {
            println!("Analyzing: {headline}");
        }
        println!("{}", "-".repeat(50));
        match outcome {
            AnalysisOutcome::Success(result) => print_result(&result),
            AnalysisOutcome::Failure(report) => println!("error: {}", report.error),
        }
    }

    Ok(all_ok)
}

fn build_pipeline(args: &Args) -> crude_or_rude::Result<Pipeline> {
    let config = Config::load_or_default(args.config.as_deref())?;
    let api_key = if args.offline {
        None
    } else {
        Secrets::load()?.anthropic_api_key()
    };

    let mut builder = config.pipeline_builder(api_key);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    builder.build()
}

fn print_result(result: &AnalysisResult) {
    let s = &result.sentiment;
    let t = &result.tone;
    let d = &result.decision;
    println!(
        "sentiment: {} (score: {:.2}, confidence: {:.2})",
        s.label, s.score, s.confidence
    );
    println!(
        "tone: {} (rudeness: {:.2}, confidence: {:.2})",
        t.tone, t.rudeness, t.confidence
    );
    println!("market sentiment: {}", d.category);
    println!("reasoning: {}", d.reasoning);
    println!("market says: \"{}\"", d.response);
}
