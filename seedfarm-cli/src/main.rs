//! Seedfarm CLI
//!
//! Command-line interface for the seedfarm wallet scanner and compact
//! seed-phrase codes.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use seedfarm_core::constants::{DEFAULT_MNEMONIC_WORDS, FALLBACK_WORKER_COUNT};
use seedfarm_core::signal::{ShutdownSignal, StopCause};
use seedfarm_core::traits::ExistenceChecker;
use seedfarm_mnemonic::Vocabulary;
use seedfarm_registry::{FileAddressSet, FileNotifier};
use seedfarm_scanner::{MatchPolicy, ScanCoordinator, ScanSummary, ScannerConfig};
use seedfarm_wallet::{
    EthWalletGenerator, GeneratorConfig, MnemonicStrength, DEFAULT_DERIVATION_PATH,
};

/// Seedfarm - concurrent Ethereum wallet scanner
#[derive(Parser)]
#[command(name = "seedfarm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write JSON logs to this file
    #[arg(long, global = true, env = "SEEDFARM_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan random wallets against a set of known addresses
    Run(RunArgs),

    /// Encode a seed phrase as a compact code
    Encode {
        /// Phrase words
        #[arg(required = true, num_args = 1..)]
        phrase: Vec<String>,
    },

    /// Decode a compact code back into its seed phrase
    Decode {
        /// Compact code, e.g. 1692.861.427.
        code: String,
    },

    /// Show the wallet for a seed phrase
    Derive {
        /// Phrase words
        #[arg(required = true, num_args = 1..)]
        phrase: Vec<String>,
        /// BIP-32 derivation path
        #[arg(long, default_value = DEFAULT_DERIVATION_PATH)]
        path: String,
        /// BIP-39 passphrase
        #[arg(long, env = "SEEDFARM_PASSPHRASE", default_value = "")]
        passphrase: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Measure wallet generation speed
    Bench {
        /// Number of wallets to generate
        #[arg(short, long, default_value = "1000")]
        count: u64,
        /// Phrase length in words
        #[arg(long, default_value_t = DEFAULT_MNEMONIC_WORDS)]
        words: usize,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Number of workers (defaults to the number of CPUs)
    #[arg(short, long, env = "SEEDFARM_WORKERS")]
    workers: Option<usize>,

    /// Seconds between progress reports
    #[arg(long, env = "SEEDFARM_REPORT_INTERVAL", default_value = "30")]
    report_interval: u64,

    /// What to do after a match
    #[arg(long, env = "SEEDFARM_POLICY", default_value_t = MatchPolicy::default())]
    policy: MatchPolicy,

    /// File of known addresses, one per line
    #[arg(short, long, env = "SEEDFARM_ADDRESSES")]
    addresses: Option<PathBuf>,

    /// libSQL / Turso database holding known addresses
    #[cfg(feature = "turso")]
    #[arg(long, env = "SEEDFARM_DATABASE_URL")]
    database_url: Option<String>,

    /// Auth token for the database
    #[cfg(feature = "turso")]
    #[arg(long, env = "SEEDFARM_AUTH_TOKEN", default_value = "", hide_env_values = true)]
    auth_token: String,

    /// Directory found wallets are written to
    #[arg(long, env = "SEEDFARM_FOUND_DIR", default_value = ".")]
    found_dir: PathBuf,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    // One runtime thread per scan worker
    let threads = match &cli.command {
        Commands::Run(args) => args.workers.unwrap_or_else(default_workers),
        _ => default_workers(),
    }
    .max(1);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(threads)
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async move {
        match cli.command {
            Commands::Run(args) => cmd_run(args).await,
            Commands::Encode { phrase } => cmd_encode(&phrase),
            Commands::Decode { code } => cmd_decode(&code),
            Commands::Derive {
                phrase,
                path,
                passphrase,
                json,
            } => cmd_derive(&phrase, &path, passphrase, json),
            Commands::Bench { count, words } => cmd_bench(count, words),
        }
    })
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(FALLBACK_WORKER_COUNT)
}

/// Filter used with `--verbose`. The binary's own target is `seedfarm`.
const VERBOSE_FILTER: &str = "seedfarm=debug,seedfarm_scanner=debug,seedfarm_registry=debug,seedfarm_wallet=debug,seedfarm_mnemonic=debug,info";

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = if verbose {
        VERBOSE_FILTER
    } else {
        "info"
    };

    let json_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .with(json_layer)
        .init();

    Ok(())
}

/// Scan until interrupted or the match policy stops the run
async fn cmd_run(args: RunArgs) -> Result<()> {
    // Abort before any worker starts if the word list is corrupted
    Vocabulary::english().context("Reference vocabulary failed verification")?;

    let mut config = ScannerConfig::new()
        .report_interval(Duration::from_secs(args.report_interval))
        .match_policy(args.policy);
    if let Some(workers) = args.workers {
        config = config.workers(workers);
    }

    let checker = open_checker(&args).await?;
    let notifier = Arc::new(FileNotifier::new(&args.found_dir));
    let generator = Arc::new(EthWalletGenerator::new());

    let coordinator = ScanCoordinator::new(config, generator, checker, notifier)
        .context("Invalid scanner configuration")?;

    println!(
        "{} {} workers, policy {}",
        "🚜 Scanning with".cyan().bold(),
        coordinator.config().workers,
        coordinator.config().match_policy
    );
    println!("   {} {}", "Found wallets go to:".dimmed(), args.found_dir.display());

    let signal = ShutdownSignal::new();
    spawn_shutdown_listener(signal.clone());

    let summary = coordinator.run(signal).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

async fn open_checker(args: &RunArgs) -> Result<Arc<dyn ExistenceChecker>> {
    #[cfg(feature = "turso")]
    {
        if let Some(url) = &args.database_url {
            let set = seedfarm_registry::SqlAddressSet::connect(url, &args.auth_token)
                .await
                .context("Failed to connect to address database")?;
            return Ok(Arc::new(set));
        }
    }

    let Some(path) = &args.addresses else {
        bail!("No address source given; pass --addresses <FILE>");
    };

    let set = FileAddressSet::load(path)
        .await
        .with_context(|| format!("Failed to load addresses from {}", path.display()))?;
    if set.is_empty() {
        warn!(path = %path.display(), "Address list is empty; nothing can match");
    }
    println!("   {} {}", "Known addresses:".dimmed(), set.len());

    Ok(Arc::new(set))
}

/// Cancels `signal` on Ctrl-C or SIGTERM.
fn spawn_shutdown_listener(signal: ShutdownSignal) {
    tokio::spawn(async move {
        wait_for_termination().await;
        if signal.cancel(StopCause::Shutdown) {
            info!("shutdown requested");
        }
    });
}

async fn wait_for_termination() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = terminate.recv() => {}
                }
            }
            Err(e) => {
                warn!(error = %e, "Cannot listen for SIGTERM");
                ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    ctrl_c.await;
}

fn print_summary(summary: &ScanSummary) {
    let cause = summary
        .cause
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("\n{}", "📈 Results:".green().bold());
    println!("   Stopped by: {}", cause);
    println!("   Attempts: {}", summary.attempts);
    println!("   Duration: {:.1?}", summary.elapsed);
    println!("   Rate: {:.0} wallets/sec", summary.rate());

    if summary.generation_errors > 0 || summary.check_errors > 0 {
        println!(
            "   {} {} generation, {} check errors",
            "⚠️".yellow(),
            summary.generation_errors,
            summary.check_errors
        );
    }

    if summary.matches > 0 {
        println!("   {} {} wallet(s) found!", "✅".green(), summary.matches);
    } else {
        println!("   No wallets found");
    }
}

/// Encode a phrase as a compact code
fn cmd_encode(phrase: &[String]) -> Result<()> {
    let vocabulary = Vocabulary::english().context("Reference vocabulary failed verification")?;

    let words: Vec<&str> = phrase.iter().flat_map(|w| w.split_whitespace()).collect();
    let unknown: Vec<&str> = words
        .iter()
        .copied()
        .filter(|w| vocabulary.index_of(w).is_none())
        .collect();

    println!("{}", vocabulary.encode(&words));

    if !unknown.is_empty() {
        eprintln!(
            "{} not in the word list, written literally (cannot be decoded): {}",
            "⚠️".yellow(),
            unknown.join(", ")
        );
    }
    Ok(())
}

/// Decode a compact code
fn cmd_decode(code: &str) -> Result<()> {
    let vocabulary = Vocabulary::english().context("Reference vocabulary failed verification")?;
    let phrase = vocabulary
        .decode_phrase(code)
        .context("Invalid compact code")?;
    println!("{}", phrase);
    Ok(())
}

/// Show the wallet for a phrase
fn cmd_derive(phrase: &[String], path: &str, passphrase: String, json: bool) -> Result<()> {
    let config = GeneratorConfig::default()
        .with_path(path)
        .context("Invalid derivation path")?
        .with_passphrase(passphrase);
    let generator = EthWalletGenerator::with_config(config);

    let candidate = generator
        .from_phrase(&phrase.join(" "))
        .context("Failed to derive wallet")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&candidate)?);
        return Ok(());
    }

    let vocabulary = Vocabulary::english().context("Reference vocabulary failed verification")?;

    println!("{}", "🔑 Wallet:".cyan().bold());
    println!("   {} {}", "Address:".green(), candidate.address());
    println!("   {} {}", "Private key:".dimmed(), candidate.private_key());
    println!("   {} {}", "Path:".dimmed(), path);
    println!(
        "   {} {}",
        "Compact code:".dimmed(),
        vocabulary.encode(candidate.phrase())
    );
    println!("\n{}", "⚠️  Anyone with this output controls the wallet.".red().bold());

    Ok(())
}

/// Measure generation throughput
fn cmd_bench(count: u64, words: usize) -> Result<()> {
    let strength = MnemonicStrength::from_word_count(words)?;
    println!(
        "{} {} wallets ({} words)",
        "📊 Generating".cyan().bold(),
        count,
        strength.word_count()
    );

    let generator =
        EthWalletGenerator::with_config(GeneratorConfig::default().with_strength(strength));

    let pb = ProgressBar::new(count);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("   [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let mut failures = 0u64;
    for _ in 0..count {
        if generator.generate_candidate().is_err() {
            failures += 1;
        }
        pb.inc(1);
    }
    pb.finish();
    let elapsed = start.elapsed();

    let rate = if elapsed.as_secs_f64() > 0.0 {
        count as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    println!("\n{}", "📈 Results:".green().bold());
    println!("   Generated {} wallets in {:?}", count - failures, elapsed);
    println!("   Rate: {:.0} wallets/sec per thread", rate);
    if count > 0 {
        println!(
            "   Time per wallet: {:.2}µs",
            elapsed.as_micros() as f64 / count as f64
        );
    }
    if failures > 0 {
        println!("   {} {} generation failures", "❌".red(), failures);
    }

    Ok(())
}
