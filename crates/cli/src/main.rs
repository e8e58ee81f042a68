use anyhow::{bail, ensure, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use curator::{CuratedRecommendation, PromptRequest, DEFAULT_SONG_COUNT};
use embed_client::{RemoteEmbedder, DEFAULT_ADDR};
use encoder::{Embedder, HashEmbedder, UserProfile, DEFAULT_DIMENSIONS};
use minilm::{MiniLmEmbedder, ModelSource};
use rand::Rng;
use rayon::prelude::*;
use server::{ContentRecommender, CurationService, RecommendationLog, SongRecommendation};
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// SongScout - Music Recommendation Engine
#[derive(Parser)]
#[command(name = "songscout")]
#[command(about = "Music recommendations from listener profiles and language-model replies", long_about = None)]
struct Cli {
    /// Path to the song catalog CSV (title, artist, mood)
    #[arg(short, long, default_value = "data/songs.csv")]
    catalog: PathBuf,

    /// Embedding backend used for the catalog and profiles
    #[arg(long, value_enum, default_value_t = EmbedderKind::Minilm)]
    embedder: EmbedderKind,

    /// Address of the remote embedding service
    #[arg(long, default_value = DEFAULT_ADDR)]
    embed_addr: String,

    /// Timeout in seconds for connecting to and calling the embedding service
    #[arg(long, default_value_t = 10)]
    embed_timeout: u64,

    /// Vector length: size of the hash embedder, required length of remote vectors
    #[arg(long, default_value_t = DEFAULT_DIMENSIONS)]
    dimensions: usize,

    /// Local all-MiniLM-L6-v2 directory; downloaded from the HuggingFace Hub when omitted
    #[arg(long)]
    model_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum EmbedderKind {
    /// Offline feature-hashing embedder
    Hash,
    /// Pretrained all-MiniLM-L6-v2 sentence embedder, run in-process
    Minilm,
    /// gRPC embedding service
    Remote,
}

#[derive(Subcommand)]
enum Commands {
    /// Get song recommendations for a listener profile
    Recommend {
        /// Listener age (1-100)
        #[arg(long)]
        age: u32,

        /// Preferred genre or artist (repeatable)
        #[arg(long)]
        genre: Vec<String>,

        /// Preferred language (repeatable)
        #[arg(long)]
        language: Vec<String>,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        limit: usize,

        /// Show detailed explanation for each recommendation
        #[arg(long)]
        explain: bool,
    },

    /// Browse recommendation batches interactively, one genre list per line
    Session {
        /// Listener age (1-100)
        #[arg(long)]
        age: u32,

        /// Preferred language (repeatable)
        #[arg(long)]
        language: Vec<String>,

        /// Number of recommendations per batch
        #[arg(long, default_value = "5")]
        limit: usize,

        /// Batches kept for :prev / :next
        #[arg(long, default_value = "20")]
        history: usize,
    },

    /// Render the language-model prompt for a listener
    Prompt {
        /// Listener age (1-100)
        #[arg(long)]
        age: u32,

        /// Genre or artist; omitted means no preference
        #[arg(long, default_value = "")]
        genre: String,

        /// Language for the reasons
        #[arg(long)]
        language: Option<String>,

        /// Number of songs to ask for
        #[arg(long, default_value_t = DEFAULT_SONG_COUNT)]
        count: usize,

        /// Template file with {age}, {genre}, {count}, {language_instruction}
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// Interpret a language-model reply and print its recommendations
    Parse {
        /// File holding the raw reply; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "4")]
        concurrent: usize,

        /// Recommendations per request
        #[arg(long, default_value = "5")]
        limit: usize,
    },
}

const BENCHMARK_GENRES: &[&str] = &[
    "jazz", "rock", "k-pop", "hip hop", "classical", "lo-fi", "metal", "indie", "ballad", "edm",
];
const BENCHMARK_LANGUAGES: &[&str] = &["English", "Korean", "Japanese", "Spanish"];

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Recommend {
            age,
            genre,
            language,
            limit,
            explain,
        } => {
            let profile = UserProfile::new(*age, genre.clone(), language.clone())?;
            let recommender = load_recommender(&cli)?;
            handle_recommend(&recommender, &profile, *limit, *explain)?
        }
        Commands::Session {
            age,
            language,
            limit,
            history,
        } => {
            // Validate before paying for the catalog load
            UserProfile::new(*age, vec![], language.clone())?;
            let recommender = load_recommender(&cli)?;
            handle_session(&recommender, *age, language, *limit, *history)?
        }
        Commands::Prompt {
            age,
            genre,
            language,
            count,
            template,
        } => handle_prompt(*age, genre, language.as_deref(), *count, template.as_ref())?,
        Commands::Parse { input } => handle_parse(input.as_ref())?,
        Commands::Benchmark {
            requests,
            concurrent,
            limit,
        } => {
            let recommender = load_recommender(&cli)?;
            handle_benchmark(&recommender, *requests, *concurrent, *limit)?
        }
    }

    Ok(())
}

/// Build the configured embedding backend
fn build_embedder(cli: &Cli) -> Result<Box<dyn Embedder>> {
    ensure!(cli.dimensions > 0, "--dimensions must be at least 1");
    match cli.embedder {
        EmbedderKind::Hash => Ok(Box::new(HashEmbedder::new().with_dimensions(cli.dimensions))),
        EmbedderKind::Minilm => {
            let source = match &cli.model_dir {
                Some(dir) => ModelSource::Directory(dir.clone()),
                None => ModelSource::default(),
            };
            let embedder = MiniLmEmbedder::load(&source).context("Failed to load MiniLM model")?;
            Ok(Box::new(embedder))
        }
        EmbedderKind::Remote => {
            let embedder = RemoteEmbedder::connect(
                cli.embed_addr.clone(),
                Duration::from_secs(cli.embed_timeout),
            )
            .with_context(|| format!("Failed to connect to embedding service at {}", cli.embed_addr))?
            .with_expected_dimensions(cli.dimensions);
            Ok(Box::new(embedder))
        }
    }
}

/// Load and embed the catalog (this may take a moment with a model or remote backend)
fn load_recommender(cli: &Cli) -> Result<ContentRecommender<Box<dyn Embedder>>> {
    let embedder = build_embedder(cli)?;

    println!(
        "Loading song catalog from {} ({} embedder)...",
        cli.catalog.display(),
        embedder.name()
    );
    let start = Instant::now();
    let recommender = ContentRecommender::load(&cli.catalog, embedder)?;
    println!(
        "{} Loaded {} songs in {:?}",
        "✓".green(),
        recommender.table().len(),
        start.elapsed()
    );
    Ok(recommender)
}

/// Handle the 'recommend' command
fn handle_recommend(
    recommender: &ContentRecommender<Box<dyn Embedder>>,
    profile: &UserProfile,
    limit: usize,
    explain: bool,
) -> Result<()> {
    let recommendations = recommender.recommend(profile, limit)?;

    if explain {
        println!("{}", "Profile:".bold());
        for line in profile.describe().lines() {
            println!("  {}", line);
        }
    }
    print_recommendations(&recommendations, explain);
    Ok(())
}

/// Handle the 'session' command
fn handle_session(
    recommender: &ContentRecommender<Box<dyn Embedder>>,
    age: u32,
    languages: &[String],
    limit: usize,
    history: usize,
) -> Result<()> {
    let mut log: RecommendationLog<Vec<SongRecommendation>> =
        RecommendationLog::with_capacity(history);

    println!(
        "{}",
        "Enter genres separated by commas. :prev / :next browse, :quit exits.".dimmed()
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", ">".cyan());
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        match line.trim() {
            "" => continue,
            ":quit" | ":q" => break,
            ":prev" => match log.previous() {
                Some(batch) => print_recommendations(batch, false),
                None => println!("{}", "Already at the oldest batch".yellow()),
            },
            ":next" => match log.next() {
                Some(batch) => print_recommendations(batch, false),
                None => println!("{}", "Already at the newest batch".yellow()),
            },
            genres => {
                let genres: Vec<String> = genres.split(',').map(str::to_string).collect();
                let profile = UserProfile::new(age, genres, languages.to_vec())?;
                match recommender.recommend(&profile, limit) {
                    Ok(batch) => {
                        print_recommendations(&batch, false);
                        log.push(batch);
                    }
                    Err(e) => println!("{} {:#}", "✗".red(), e),
                }
            }
        }
        if let Some(position) = log.position() {
            println!("{}", format!("[batch {}/{}]", position + 1, log.len()).dimmed());
        }
    }
    Ok(())
}

/// Handle the 'prompt' command
fn handle_prompt(
    age: u32,
    genre: &str,
    language: Option<&str>,
    count: usize,
    template: Option<&PathBuf>,
) -> Result<()> {
    let mut service = CurationService::new();
    if let Some(path) = template {
        service = service.with_template_file(path)?;
    }
    let template = service.template().clone().with_count(count);
    let service = service.with_template(template);

    let prompt = service.prompt(&PromptRequest::new(age, genre, language))?;
    println!("{}", prompt);
    Ok(())
}

/// Handle the 'parse' command
fn handle_parse(input: Option<&PathBuf>) -> Result<()> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reply from {}", path.display()))?,
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read reply from stdin")?;
            raw
        }
    };
    if raw.trim().is_empty() {
        bail!("Reply is empty");
    }
    debug!("Read {} bytes of model reply", raw.len());

    let curated = CurationService::new().interpret(&raw)?;
    if curated.is_empty() {
        println!("{}", "The reply contained no recommendations.".yellow());
        return Ok(());
    }
    print_curated(&curated);
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(
    recommender: &ContentRecommender<Box<dyn Embedder>>,
    requests: usize,
    concurrent: usize,
    limit: usize,
) -> Result<()> {
    ensure!(requests > 0, "--requests must be at least 1");

    // Generate random listener profiles up front so timing covers only recommending
    let mut rng = rand::rng();
    let profiles: Vec<UserProfile> = (0..requests)
        .map(|_| {
            let age = rng.random_range(13..=70);
            let genres = (0..rng.random_range(1..=3))
                .map(|_| BENCHMARK_GENRES[rng.random_range(0..BENCHMARK_GENRES.len())].to_string())
                .collect();
            let language =
                BENCHMARK_LANGUAGES[rng.random_range(0..BENCHMARK_LANGUAGES.len())].to_string();
            UserProfile::new(age, genres, vec![language])
        })
        .collect::<Result<_, _>>()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(concurrent.max(1))
        .build()
        .context("Failed to build benchmark thread pool")?;
    info!("Running {} requests on {} threads", requests, pool.current_num_threads());

    let wall_clock = Instant::now();
    let mut timings: Vec<Duration> = pool.install(|| {
        profiles
            .par_iter()
            .map(|profile| {
                let start = Instant::now();
                recommender.recommend(profile, limit)?;
                Ok::<_, anyhow::Error>(start.elapsed())
            })
            .collect::<Result<_>>()
    })?;
    let total_time = wall_clock.elapsed();

    timings.sort();
    let busy: Duration = timings.iter().sum();
    let avg_latency = busy / timings.len() as u32;
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} threads)", requests, concurrent.max(1));
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[SongRecommendation], explain: bool) {
    println!("{}", "Song Recommendations:".bold().blue());
    if recommendations.is_empty() {
        println!("  {}", "(catalog is empty)".dimmed());
    }
    for rec in recommendations {
        println!(
            "{}. {} - {} [{}] - Score: {:.3}",
            rec.rank.to_string().green(),
            rec.title.bold(),
            rec.artist,
            rec.mood,
            rec.score
        );
        if explain {
            println!("   Explanation: {}", rec.explanation);
        }
    }
}

fn print_curated(curated: &[CuratedRecommendation]) {
    println!("{}", "Curated Recommendations:".bold().blue());
    for item in curated {
        let rec = &item.recommendation;
        println!(
            "{}. {} - {}",
            item.rank.to_string().green(),
            rec.title.bold(),
            rec.artist
        );
        println!("   {}", rec.reason);
        match &item.link {
            Some(link) => println!("   {}", link.underline()),
            None => println!("   {}", "no link".dimmed()),
        }
    }
}
