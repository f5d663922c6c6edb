//! Wordle Engine CLI
//!
//! Command-line driver for the solving engine.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wordle_engine::{
    rank_openers, run_batch, sweep_openers, Feedback, Lexicon, Result, Session, SessionState, Solver,
    SolverConfig, SolverError, Word,
};

#[derive(Parser)]
#[command(name = "wordle-engine", version, about = "Solve fixed-length word puzzles")]
struct Cli {
    /// Lexicon file: one `word` or `word<TAB>frequency` per line
    #[arg(short, long, global = true, env = "WORDLE_LEXICON")]
    lexicon: Option<PathBuf>,

    /// Solver configuration (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a single puzzle whose answer is known
    Solve { target: String },
    /// Solve every target in a file and print statistics as JSON
    Batch {
        targets: PathBuf,
        /// Include every session result in the output
        #[arg(long)]
        solutions: bool,
    },
    /// Solve every target once per opening guess and compare the openers
    Sweep {
        targets: PathBuf,
        /// Openers to evaluate, one per line; defaults to the top-ranked openers
        #[arg(long)]
        openers: Option<PathBuf>,
        /// Number of top-ranked openers to evaluate when no file is given
        #[arg(short, default_value_t = 5)]
        n: usize,
    },
    /// Rank the best opening guesses
    Suggest {
        #[arg(short, default_value_t = 5)]
        n: usize,
    },
    /// Get suggestions while playing a puzzle elsewhere
    Assist,
}

fn load(cli: &Cli) -> Result<(Arc<Lexicon>, SolverConfig)> {
    let path = cli.lexicon.as_ref().ok_or_else(|| {
        SolverError::Configuration("no lexicon given (use --lexicon or WORDLE_LEXICON)".to_string())
    })?;
    let lexicon = Arc::new(Lexicon::load(path)?);
    let config = match &cli.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };
    Ok((lexicon, config))
}

fn solve(lexicon: Arc<Lexicon>, config: &SolverConfig, target: &str) -> Result<()> {
    let target = Word::new(&target.to_lowercase())?;
    let mut session = Session::new(lexicon, &target, config)?;

    println!("Solving for: {}", target.to_string().to_uppercase());
    println!();

    let outcome = session.run();
    for (i, turn) in session.history().iter().enumerate() {
        println!(
            "Guess {}: {} {} ({} left)",
            i + 1,
            turn.guess.to_string().to_uppercase(),
            turn.feedback,
            turn.candidates_remaining
        );
    }
    println!();
    outcome?;

    match session.state() {
        SessionState::Solved => println!("Solved in {} guesses.", session.history().len()),
        _ => println!("Failed to solve within {} guesses.", session.max_turns()),
    }
    Ok(())
}

fn batch(lexicon: Arc<Lexicon>, config: &SolverConfig, targets: &Path, solutions: bool) -> Result<()> {
    let targets = lexicon.read_targets(targets)?;
    let report = run_batch(lexicon, &targets, config)?;
    let json = if solutions {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string_pretty(&report.stats)
    };
    println!("{}", json?);
    Ok(())
}

fn sweep(
    lexicon: Arc<Lexicon>,
    config: &SolverConfig,
    targets: &Path,
    openers: Option<&Path>,
    n: usize,
) -> Result<()> {
    let targets = lexicon.read_targets(targets)?;
    let openers = match openers {
        Some(path) => lexicon.read_targets(path)?,
        None => rank_openers(Arc::clone(&lexicon), config, n)?
            .into_iter()
            .map(|analysis| analysis.word)
            .collect(),
    };
    let swept = sweep_openers(lexicon, &targets, &openers, config)?;
    let rows: Vec<serde_json::Value> = swept
        .iter()
        .map(|(opener, stats)| serde_json::json!({ "first_guess": opener, "stats": stats }))
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn suggest(lexicon: Arc<Lexicon>, config: &SolverConfig, n: usize) -> Result<()> {
    let top = rank_openers(lexicon, config, n)?;
    println!("{:>4} {:>8} {:>8} {:>12} Possible?", "#", "Word", "Entropy", "Exp. Remain");
    println!("{}", "-".repeat(50));
    for (i, analysis) in top.iter().enumerate() {
        println!(
            "{:>4} {:>8} {:>8.3} {:>12.1} {}",
            i + 1,
            analysis.word.to_string().to_uppercase(),
            analysis.entropy,
            analysis.expected_remaining,
            if analysis.is_candidate { "yes" } else { "" }
        );
    }
    Ok(())
}

fn assist(lexicon: Arc<Lexicon>, config: &SolverConfig) -> Result<()> {
    let mut solver = Solver::new(lexicon, config)?;
    println!("Enter '<guess> <feedback>' after each guess, e.g. 'crane gy··g'.");
    println!("Feedback: g = right spot, y = wrong spot, {} = absent.", wordle_engine::Mark::MISS_SYMBOL);
    println!("Other commands: suggest, remaining, reset, quit.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            [] => continue,
            ["quit" | "exit" | "q"] => break,
            ["suggest" | "s"] => match solver.suggest() {
                Ok(word) => println!(
                    "Try: {} ({} candidates left)",
                    word.to_string().to_uppercase(),
                    solver.remaining_count()
                ),
                Err(err) => println!("{err}"),
            },
            ["remaining" | "r"] => {
                let remaining = solver.remaining_words();
                println!("{} candidates", remaining.len());
                for word in remaining.iter().take(20) {
                    print!("{:>8}", word.to_string().to_uppercase());
                }
                println!();
            }
            ["reset"] => {
                solver.reset();
                println!("Reset. {} candidates.", solver.remaining_count());
            }
            [guess, feedback] => {
                let observed = Word::new(&guess.to_lowercase()).and_then(|guess| {
                    let feedback = Feedback::parse(feedback)?;
                    Ok((guess, feedback))
                });
                let (guess, feedback) = match observed {
                    Ok(pair) => pair,
                    Err(err @ SolverError::InvalidFeedbackSymbol { .. }) => return Err(err),
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                match solver.observe(&guess, feedback) {
                    Ok(_) if feedback.is_win() => {
                        println!("Solved!");
                        break;
                    }
                    Ok(left) => match solver.suggest() {
                        Ok(next) => println!(
                            "{left} candidates left. Try: {}",
                            next.to_string().to_uppercase()
                        ),
                        Err(err) => println!("{err}"),
                    },
                    Err(SolverError::NoConsistentCandidates) => {
                        println!("No words match this feedback. Use 'reset' to start over.");
                    }
                    Err(err) => println!("{err}"),
                }
            }
            _ => println!("Unknown command: {}", line.trim()),
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let (lexicon, config) = load(cli)?;
    match &cli.command {
        Command::Solve { target } => solve(lexicon, &config, target),
        Command::Batch { targets, solutions } => batch(lexicon, &config, targets, *solutions),
        Command::Sweep { targets, openers, n } => {
            sweep(lexicon, &config, targets, openers.as_deref(), *n)
        }
        Command::Suggest { n } => suggest(lexicon, &config, *n),
        Command::Assist => assist(lexicon, &config),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
