use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use genre_model::{
    Attribute, ListeningContext, ModelError, Mood, Recommendation, Recommender, Setting,
    describe_options,
};
use rand::Rng;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

mod rate;

/// GenreRecs - Music genre recommendation from a listening context
#[derive(Parser)]
#[command(name = "genre-recs")]
#[command(about = "Suggests a music genre for how and where you are listening", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer the attribute prompts interactively
    Rate,

    /// Get a recommendation for a single context
    Recommend {
        /// Tempo, 1 (very slow) to 10 (very fast)
        #[arg(long, allow_negative_numbers = true)]
        tempo: i64,

        /// Mood, by index or name (e.g. 3 or "excited")
        #[arg(long, allow_negative_numbers = true, value_parser = parse_mood)]
        mood: i64,

        /// Song length, 1 (short) to 10 (long)
        #[arg(long, allow_negative_numbers = true)]
        length: i64,

        /// Explicit content allowed, 0 or 1
        #[arg(long, allow_negative_numbers = true)]
        explicit: i64,

        /// Preferred era (year)
        #[arg(long, allow_negative_numbers = true)]
        age: i64,

        /// Setting, by index or name (e.g. 1 or "home")
        #[arg(long, allow_negative_numbers = true, value_parser = parse_setting)]
        setting: i64,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the attribute options
    Options,

    /// Run benchmark to test prediction performance
    Benchmark {
        /// Number of predictions to make
        #[arg(long, default_value = "1000")]
        requests: usize,

        /// Number of concurrent predictions
        #[arg(long, default_value = "10")]
        concurrent: usize,
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

    // Options need no model
    if let Commands::Options = cli.command {
        handle_options();
        return Ok(());
    }

    let start = Instant::now();
    let recommender = Arc::new(Recommender::train().context("Failed to train recommender")?);
    tracing::info!("Trained {} in {:?}", recommender.classifier_name(), start.elapsed());

    match cli.command {
        Commands::Rate => handle_rate(&recommender)?,
        Commands::Recommend {
            tempo,
            mood,
            length,
            explicit,
            age,
            setting,
            json,
        } => {
            let context = ListeningContext {
                tempo,
                mood,
                length,
                explicit,
                age,
                setting,
            };
            handle_recommend(&recommender, context, json)?
        }
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(recommender, requests, concurrent).await?,
        Commands::Options => {}
    }

    Ok(())
}

/// Handle the 'rate' command
fn handle_rate(recommender: &Recommender) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let count = rate::run_session(recommender, &mut stdin.lock(), &mut stdout.lock())?;
    println!("{} {} recommendation(s) made", "✓".green(), count);
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(recommender: &Recommender, context: ListeningContext, json: bool) -> Result<()> {
    // Same policy as the interactive loop: warn, then classify anyway
    for attribute in Attribute::ALL {
        let value = context.get(attribute);
        if !rate::in_documented_range(attribute, value) {
            eprintln!(
                "{} {} {} is outside the usual range; using it anyway",
                "!".yellow(),
                attribute,
                value
            );
        }
    }

    let rec = recommender.predict(&context)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendation_json(&rec))?);
    } else {
        print_recommendation(&rec);
    }
    Ok(())
}

/// Handle the 'options' command
fn handle_options() {
    let schema = describe_options();
    let attrs = &schema.attributes;

    println!("{}", "Attributes:".bold().blue());
    for (name, range) in [("tempo", &attrs.tempo), ("length", &attrs.length), ("age", &attrs.age)] {
        println!("{}{}: {}-{}  {}", "• ".green(), name, range.min, range.max, range.description);
    }
    println!(
        "{}explicit: {:?}  {}",
        "• ".green(),
        attrs.explicit.options,
        attrs.explicit.description
    );

    println!("{}", format!("Moods ({}):", attrs.mood.description).bold().blue());
    for (code, name) in schema.moods.iter().enumerate() {
        println!("  {}) {}", code, name);
    }

    println!("{}", format!("Settings ({}):", attrs.setting.description).bold().blue());
    for (code, name) in schema.settings.iter().enumerate() {
        println!("  {}) {}", code, name);
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    recommender: Arc<Recommender>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 || concurrent == 0 {
        bail!("requests and concurrent must both be at least 1");
    }

    let contexts = random_contexts(requests);

    let wall = Instant::now();
    let mut timings = Vec::with_capacity(requests);
    for batch in contexts.chunks(concurrent) {
        let mut handles = Vec::with_capacity(batch.len());
        for context in batch.iter().copied() {
            let recommender = Arc::clone(&recommender);
            handles.push(tokio::spawn(async move {
                let start = Instant::now();
                recommender.predict(&context)?;
                Ok::<_, anyhow::Error>(start.elapsed())
            }));
        }
        for handle in handles {
            timings.push(handle.await??);
        }
    }
    let total_time = wall.elapsed();

    let stats = LatencyStats::from_timings(timings);
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", stats.average);
    println!("P50 latency: {:?}", stats.p50);
    println!("P95 latency: {:?}", stats.p95);
    println!("P99 latency: {:?}", stats.p99);
    println!("Throughput: {:.2} predictions/second", throughput);

    Ok(())
}

/// Mood code, or a mood name
fn parse_mood(value: &str) -> std::result::Result<i64, String> {
    parse_choice::<Mood>(value, Mood::code)
}

/// Setting code, or a setting name
fn parse_setting(value: &str) -> std::result::Result<i64, String> {
    parse_choice::<Setting>(value, Setting::code)
}

/// Any integer is taken as-is; otherwise the option name is looked up
fn parse_choice<T>(value: &str, code: fn(T) -> i64) -> std::result::Result<i64, String>
where
    T: FromStr<Err = ModelError>,
{
    if let Ok(number) = value.trim().parse::<i64>() {
        return Ok(number);
    }
    value.parse::<T>().map(code).map_err(|e| e.to_string())
}

/// Random contexts spread over the documented ranges
fn random_contexts(count: usize) -> Vec<ListeningContext> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| ListeningContext {
            tempo: rng.random_range(1..=10),
            mood: rng.random_range(0..Mood::ALL.len() as i64),
            length: rng.random_range(1..=10),
            explicit: rng.random_range(0..=1),
            age: rng.random_range(1800..=2024),
            setting: rng.random_range(0..Setting::ALL.len() as i64),
        })
        .collect()
}

struct LatencyStats {
    average: Duration,
    p50: Duration,
    p95: Duration,
    p99: Duration,
}

impl LatencyStats {
    /// Expects at least one timing
    fn from_timings(mut timings: Vec<Duration>) -> Self {
        timings.sort();
        let total: Duration = timings.iter().sum();
        let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];

        Self {
            average: total / timings.len() as u32,
            p50: percentile(0.50),
            p95: percentile(0.95),
            p99: percentile(0.99),
        }
    }
}

fn recommendation_json(rec: &Recommendation) -> serde_json::Value {
    serde_json::json!({
        "genre": rec.genre_name(),
        "genre_id": rec.genre_id(),
        "inputs": rec.inputs,
    })
}

fn print_recommendation(rec: &Recommendation) {
    let inputs = &rec.inputs;
    println!(
        "{} {} (id {})",
        "Suggested genre:".bold().blue(),
        rec.genre_name().green().bold(),
        rec.genre_id()
    );
    println!(
        "  tempo {}, mood {}, length {}, explicit {}, age {}, setting {}",
        inputs.tempo, inputs.mood, inputs.length, inputs.explicit, inputs.age, inputs.setting
    );
}
