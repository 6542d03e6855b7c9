mod ascii;
mod config;
mod shell;

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use canvas::engine::EngineCore;
use canvas::store::{self, FileStore};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::shell::{Shell, Step};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("io failed: {0}")]
    Io(#[from] io::Error),
    #[error("no tab {0}")]
    NoTab(usize),
    #[error(transparent)]
    Command(#[from] shell::CommandError),
}

#[derive(Parser, Debug)]
#[command(name = "roomplan", about = "Room layout editor")]
struct Cli {
    /// Directory holding saved designs.
    #[arg(long, env = "ROOMPLAN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Name the design is saved under.
    #[arg(long, env = "ROOMPLAN_STORE_KEY")]
    key: Option<String>,

    /// Seed for block placement, for reproducible sessions.
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Edit interactively, one command per line (default).
    Shell,
    /// Draw a saved room and exit.
    Show {
        /// Tab number; defaults to the saved current room.
        #[arg(long)]
        room: Option<usize>,
    },
    /// Print the saved design as JSON.
    Export,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(key) = cli.key {
        config.store_key = key;
    }

    let store = FileStore::new(&config.data_dir);
    let rooms = store::load_rooms(&store, &config.store_key, config.limits);
    let core = match cli.seed {
        Some(seed) => EngineCore::with_seed(rooms, seed),
        None => EngineCore::new(rooms),
    };
    tracing::info!(dir = %config.data_dir.display(), key = %config.store_key, "session started");

    let mut shell = Shell::new(core, store, config.store_key.clone(), config.cell_px);
    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => run_shell(&mut shell),
        Command::Show { room } => run_show(&mut shell, room),
        Command::Export => run_export(&mut shell),
    }
}

fn run_shell(shell: &mut Shell<FileStore>) -> Result<(), CliError> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut out = io::stdout().lock();
    if interactive {
        writeln!(out, "roomplan: type `help` for commands")?;
    }

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        match shell.exec(&line?) {
            Ok(Step::Continue(reply)) => {
                for text in reply {
                    writeln!(out, "{text}")?;
                }
            }
            Ok(Step::Quit) => break,
            Err(e) => writeln!(out, "error: {e}")?,
        }
    }
    Ok(())
}

fn run_show(shell: &mut Shell<FileStore>, room: Option<usize>) -> Result<(), CliError> {
    if let Some(n) = room {
        if shell.exec(&format!("select {n}")).is_err() {
            return Err(CliError::NoTab(n));
        }
    }
    print_step(shell.exec("show")?)
}

fn run_export(shell: &mut Shell<FileStore>) -> Result<(), CliError> {
    print_step(shell.exec("json")?)
}

fn print_step(step: Step) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    if let Step::Continue(lines) = step {
        for text in lines {
            writeln!(out, "{text}")?;
        }
    }
    Ok(())
}
