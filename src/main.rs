use clap::Parser;
use notesnap::core::config::{self, CliOverrides};
use notesnap::core::state::Outcome;
use notesnap::sink::Backend;
use notesnap::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, File};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "notesnap",
    about = "Capture a checklist item into a markdown note"
)]
struct Args {
    /// Note to append to: a file path, or a note name for the command backend
    #[arg(short = 'n', long)]
    note_path: Option<String>,

    /// How to append to the note
    #[arg(short, long, value_enum)]
    backend: Option<Backend>,

    /// External program used by the command backend
    #[arg(long)]
    program: Option<String>,

    /// Vault passed to the external program
    #[arg(long)]
    vault: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to ~/.notesnap/notesnap.log
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Some(dir) = config::notesnap_dir()
        && fs::create_dir_all(&dir).is_ok()
        && let Ok(log_file) = File::create(dir.join("notesnap.log"))
    {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    log::info!("notesnap starting up");

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("notesnap: {e}");
            return ExitCode::FAILURE;
        }
    };

    let cli = CliOverrides {
        backend: args.backend,
        note: args.note_path,
        program: args.program,
        vault: args.vault,
    };
    let resolved = config::resolve(&file_config, &cli);
    if let Err(e) = resolved.validate() {
        log::error!("{}", e);
        eprintln!("notesnap: {e}");
        return ExitCode::FAILURE;
    }
    log::info!(
        "Resolved config: backend={}, note={}",
        resolved.backend.label(),
        resolved.note
    );

    let runtime = match tui::build_runtime() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to start runtime: {}", e);
            eprintln!("notesnap: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    let result = {
        let _enter = runtime.enter();
        tui::run(resolved)
    };
    // Appends abandoned by Ctrl+C may still be blocked in file I/O
    tui::shutdown_runtime(runtime);

    match result {
        Ok(outcome) => {
            match outcome {
                Outcome::Submitted => log::info!("Entry appended, exiting"),
                Outcome::Cancelled => log::info!("Cancelled by user, exiting"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Terminal error: {}", e);
            eprintln!("notesnap: terminal error: {e}");
            ExitCode::FAILURE
        }
    }
}
