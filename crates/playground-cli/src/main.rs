//! Alumina playground CLI.
//!
//! Provides the `playground` binary, a local front end over the same core the
//! HTTP server uses:
//!
//! - `run` executes a source file through the toolchain and prints the result
//!   in its JSON wire form
//! - `share` stores a snippet in a SQLite object store and prints its id
//! - `fetch` writes the stored bytes of a snippet to stdout
//!
//! Logs go to stderr so stdout stays machine-readable.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use playground_sandbox::{ExecutionController, ExecutionResult, ExecutorConfig};
use playground_storage::{Snippet, SnippetError, SnippetRepository, SqliteStore};

/// Alumina playground tools.
#[derive(Parser)]
#[command(name = "playground", about = "Alumina playground tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Compile and run a source file.
    Run {
        /// Source file to run.
        file: PathBuf,

        /// Run the program's tests instead of its entry point.
        #[arg(long)]
        test: bool,

        /// Run script to invoke (default: ./scripts/run.sh).
        #[arg(long)]
        script: Option<PathBuf>,

        /// Wall-clock limit for the toolchain, in seconds.
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
    },

    /// Store a snippet and print its id.
    Share {
        /// Source file to share.
        file: PathBuf,

        /// Path to the snippet database file.
        #[arg(short, long)]
        db: String,

        /// JSON file holding an execution result to attach.
        #[arg(short, long)]
        result: Option<PathBuf>,
    },

    /// Print the stored bytes of a snippet.
    Fetch {
        /// Snippet id.
        id: String,

        /// Path to the snippet database file.
        #[arg(short, long)]
        db: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Run {
            file,
            test,
            script,
            timeout_secs,
        } => run_execute(&file, test, script, timeout_secs),
        Commands::Share { file, db, result } => run_share(&file, &db, result.as_deref()),
        Commands::Fetch { id, db } => run_fetch(&id, &db),
    };
    process::exit(exit_code);
}

/// Execute the run subcommand.
///
/// Returns exit code: 0 = program ran, 1 = compilation failed,
/// 2 = invalid arguments, 3 = I/O or toolchain error.
fn run_execute(file: &Path, test: bool, script: Option<PathBuf>, timeout_secs: u64) -> i32 {
    if timeout_secs == 0 {
        eprintln!("Error: --timeout-secs must be at least 1");
        return 2;
    }

    let code = match std::fs::read_to_string(file) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: failed to read '{}': {}", file.display(), e);
            return 3;
        }
    };

    let config = match script {
        Some(script) => ExecutorConfig::new(script),
        None => match std::env::current_dir() {
            Ok(cwd) => ExecutorConfig::for_project_root(cwd),
            Err(e) => {
                eprintln!("Error: failed to resolve current directory: {}", e);
                return 3;
            }
        },
    }
    .with_timeout(Duration::from_secs(timeout_secs));

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            return 3;
        }
    };

    let controller = ExecutionController::new(config);
    let outcome = runtime.block_on(async {
        let execution = controller.run_tracked(&code, test).await?;
        // The process exits right after printing; finish removal first.
        execution.cleanup.wait().await;
        Ok::<_, playground_sandbox::SandboxError>(execution.result)
    });

    match outcome {
        Ok(result) => {
            if !print_json(&result) {
                return 3;
            }
            if result.is_success() {
                0
            } else {
                1
            }
        }
        Err(e) => {
            eprintln!("Execution error: {}", e);
            3
        }
    }
}

/// Execute the share subcommand.
///
/// Returns exit code: 0 = stored, 1 = snippet too large,
/// 2 = invalid result file, 3 = I/O or storage error.
fn run_share(file: &Path, db_path: &str, result_path: Option<&Path>) -> i32 {
    let code = match std::fs::read_to_string(file) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: failed to read '{}': {}", file.display(), e);
            return 3;
        }
    };

    let mut snippet = Snippet::new(code);
    if let Some(path) = result_path {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Error: failed to read '{}': {}", path.display(), e);
                return 3;
            }
        };
        match serde_json::from_slice::<ExecutionResult>(&bytes) {
            Ok(result) => snippet = snippet.with_result(result),
            Err(e) => {
                eprintln!("Error: invalid result in '{}': {}", path.display(), e);
                return 2;
            }
        }
    }

    let repo = match open_repository(db_path) {
        Some(repo) => repo,
        None => return 3,
    };

    match repo.put(&snippet) {
        Ok(id) => {
            tracing::info!(id = %id, db = db_path, "shared snippet");
            if print_json(&serde_json::json!({ "id": id })) {
                0
            } else {
                3
            }
        }
        Err(SnippetError::TooLarge { size, limit }) => {
            eprintln!("Error: snippet is {} bytes, limit is {}", size, limit);
            1
        }
        Err(e) => {
            eprintln!("Storage error: {}", e);
            3
        }
    }
}

/// Execute the fetch subcommand.
///
/// Returns exit code: 0 = found, 3 = I/O or storage error, 4 = not found.
fn run_fetch(id: &str, db_path: &str) -> i32 {
    let repo = match open_repository(db_path) {
        Some(repo) => repo,
        None => return 3,
    };

    match repo.get_raw(id) {
        Ok(bytes) => {
            let mut stdout = std::io::stdout().lock();
            match stdout.write_all(&bytes).and_then(|_| stdout.flush()) {
                Ok(()) => 0,
                Err(e) => {
                    eprintln!("Error: failed to write output: {}", e);
                    3
                }
            }
        }
        Err(SnippetError::NotFound(_)) => {
            eprintln!("Error: no snippet with id '{}'", id);
            4
        }
        Err(e) => {
            eprintln!("Storage error: {}", e);
            3
        }
    }
}

fn open_repository(db_path: &str) -> Option<SnippetRepository> {
    match SqliteStore::new(db_path) {
        Ok(store) => Some(SnippetRepository::new(Arc::new(store))),
        Err(e) => {
            eprintln!("Error: failed to open database '{}': {}", db_path, e);
            None
        }
    }
}

/// Prints `value` as one line of JSON. Returns false if serialization failed.
fn print_json<T: serde::Serialize>(value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => {
            println!("{}", json);
            true
        }
        Err(e) => {
            eprintln!("Error: failed to serialize output: {}", e);
            false
        }
    }
}
