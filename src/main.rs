mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use content_insight::config::InsightConfig;
use content_insight::context::ContextAssembler;
use content_insight::memory_client::MemoryClient;
use content_insight::patterns::{PatternAnalysis, PatternCategory};
use content_insight::recommend::build_recommendations;
use content_insight::scoring::ScoreCalculator;
use content_insight::{format_float, ContentItem, Platform};

#[derive(Parser)]
#[command(name = "content-insight", about = "Content performance analytics and context engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Analyze(AnalyzeArgs),
    Context(ContextArgs),
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    platform: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct ContextArgs {
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    platform: String,
    #[arg(long)]
    query: Option<String>,
    #[arg(long)]
    semantic: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8790)]
    port: u16,
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::Context(args) => run_context(args).await,
        Command::Serve(args) => server::serve(args).await,
    }
}

fn run_analyze(args: AnalyzeArgs) -> Result<(), String> {
    let items = read_items(args.input)?;
    let platform = match args.platform.as_deref() {
        Some(value) => Some(
            Platform::from_str(value).ok_or_else(|| format!("invalid platform: {}", value))?,
        ),
        None => None,
    };

    let (config, _) = InsightConfig::load(None)?;
    let calculator = ScoreCalculator::new(
        config.weights.simple.clone(),
        config.weights.normalized.clone(),
    );
    let analyzer =
        content_insight::patterns::PatternAnalyzer::new(calculator, config.patterns.clone());
    let analysis = analyzer.analyze(&items, platform);

    match &analysis {
        PatternAnalysis::InsufficientData { eligible } => {
            println!(
                "Not enough published content with metrics to analyze ({} eligible items, need {}).",
                eligible, config.patterns.min_eligible
            );
        }
        PatternAnalysis::Report(report) => {
            println!(
                "Analyzed {} published items (corpus average score {})",
                report.eligible,
                format_float(report.corpus_average, 2)
            );

            let categories = [
                ("Hooks", PatternCategory::Hook),
                ("Topics", PatternCategory::Topic),
                ("Formats", PatternCategory::Format),
                ("Posting hours", PatternCategory::Hour),
                ("Posting days", PatternCategory::Weekday),
            ];
            for (title, category) in categories {
                let groups = report.groups_for(category);
                if groups.is_empty() {
                    continue;
                }
                println!("\n{}:", title);
                for group in groups {
                    println!(
                        "  {} | {} items | avg {} | x{} | {} confidence",
                        group.label,
                        group.count,
                        format_float(group.average_score, 1),
                        format_float(group.multiplier, 2),
                        group.confidence.label()
                    );
                }
            }

            if !report.statements.is_empty() {
                println!("\nPatterns:");
                for statement in &report.statements {
                    println!("- {}", statement.text);
                }
            }
        }
    }

    println!("\nRecommendations:");
    for recommendation in build_recommendations(&analysis, &config.patterns) {
        println!("- {}", recommendation);
    }

    Ok(())
}

async fn run_context(args: ContextArgs) -> Result<(), String> {
    let items = read_items(args.input)?;
    let platform = Platform::from_str(&args.platform)
        .ok_or_else(|| format!("invalid platform: {}", args.platform))?;

    let (config, _) = InsightConfig::load(None)?;
    let assembler = ContextAssembler::from_config(&config);

    let bundle = match (args.semantic, args.query.as_deref()) {
        (true, Some(query)) if !query.trim().is_empty() => {
            let client = MemoryClient::from_config(&config.memory)?;
            assembler
                .assemble_semantic(&items, platform, query, &client)
                .await
        }
        (true, _) => return Err("--semantic requires a non-empty --query".to_string()),
        _ => assembler.assemble(&items, platform),
    };

    println!("{}", bundle.text);
    Ok(())
}

fn read_items(input: Option<PathBuf>) -> Result<Vec<ContentItem>, String> {
    let payload = match input {
        Some(path) => std::fs::read_to_string(&path)
            .map_err(|err| format!("failed to read {}: {}", path.display(), err))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!("failed reading stdin: {}", err))?;
            buffer
        }
    };

    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Err("missing content items: pass --input or pipe JSON to stdin".to_string());
    }

    serde_json::from_str(trimmed).map_err(|err| format!("failed to parse content items: {}", err))
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
