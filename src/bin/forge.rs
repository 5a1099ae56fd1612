use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use forge_wm::actor::reactor::{self, Event, HeadlessSession, Record};
use forge_wm::common::config::{Config, config_file};
use forge_wm::common::log;
use forge_wm::layout_engine::LayoutRegistry;
use forge_wm::sys::geometry::Rect;
use forge_wm::sys::headless::HeadlessServer;
use forge_wm::sys::window_server::Request;
use tracing::warn;

#[derive(Parser)]
struct Cli {
    /// Path to configuration file to use (overrides default).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive the tiling engine against a simulated desktop.
    ///
    /// Events are read from stdin as JSON, one per line. Every request the
    /// engine makes is carried out on the simulated desktop and printed to
    /// stdout as JSON.
    Run {
        /// Number of workspaces on the simulated desktop.
        #[arg(long, default_value_t = 1)]
        workspaces: usize,

        /// Work area size, e.g. 1920x1080.
        #[arg(long, default_value = "1920x1080", value_parser = parse_size)]
        size: (i32, i32),

        /// Record reactor events to the specified file path. Overwrites the
        /// file if it exists.
        #[arg(long)]
        record: Option<PathBuf>,
    },
    /// Check the configuration file and report every problem found.
    Validate,
    /// List the available layouts.
    Layouts,
    /// Print the key bindings in effect.
    Keys,
    /// Re-run a recording and print the requests it produces as JSON.
    Replay { file: PathBuf },
}

fn main() {
    sigpipe::reset();
    let opt = Cli::parse();
    log::init_logging();

    let config_path = opt.config.clone().or_else(config_file);
    let result = match opt.command {
        Commands::Validate => validate(config_path.as_deref()),
        Commands::Layouts => {
            for name in LayoutRegistry::default().names() {
                println!("{name}");
            }
            Ok(())
        }
        Commands::Keys => {
            let config = load_config(config_path.as_deref());
            for (key, command) in &config.keys {
                println!("{key}\t{command}");
            }
            Ok(())
        }
        Commands::Replay { file } => replay(&file),
        Commands::Run { workspaces, size, record } => {
            let config = load_config(config_path.as_deref());
            run(config, workspaces, size, record.as_deref())
        }
    };

    if let Err(err) = result {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(path) => Config::read_or_default(path),
        None => {
            warn!("No config directory on this system, using defaults");
            Config::default()
        }
    }
}

fn validate(path: Option<&Path>) -> anyhow::Result<()> {
    let path = path.context("No config file location; pass --config")?;
    let config = Config::read(path)?;
    let issues = config.validate();
    if issues.is_empty() {
        println!("Config validation passed");
        return Ok(());
    }
    for issue in &issues {
        eprintln!("{issue}");
    }
    anyhow::bail!("{} problem(s) in {}", issues.len(), path.display())
}

fn replay(file: &Path) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    let mut result = Ok(());
    reactor::replay(file, |request| {
        if result.is_ok() {
            result = print_request(&mut stdout, &request);
        }
    })?;
    result
}

fn run(
    config: Config,
    workspaces: usize,
    (width, height): (i32, i32),
    record: Option<&Path>,
) -> anyhow::Result<()> {
    anyhow::ensure!(workspaces > 0, "need at least one workspace");
    let area = Rect::new(0, 0, width, height);
    let server = HeadlessServer::with_workspaces(workspaces, area);

    let (stdin_tx, mut stdin_rx) = forge_wm::actor::channel();
    std::thread::spawn(move || {
        for (number, line) in std::io::stdin().lock().lines().enumerate() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Event>(&line) {
                Ok(event) => stdin_tx.send(event),
                Err(err) => warn!(line = number + 1, "Skipping bad event: {err}"),
            }
        }
    });

    let mut session = HeadlessSession::new(config.settings, server, Record::new(record)?);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting runtime")?;
    let mut stdout = std::io::stdout().lock();
    let mut result = Ok(());
    let mut print = |request: Request| {
        if result.is_ok() {
            result = print_request(&mut stdout, &request);
        }
    };
    runtime.block_on(async {
        session.start(&mut print);
        while let Some((span, event)) = stdin_rx.recv().await {
            let _guard = span.enter();
            session.step(event, &mut print);
        }
        session.shutdown(&mut print);
    });
    result
}

fn print_request(out: &mut impl Write, request: &Request) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, request)?;
    writeln!(out)?;
    Ok(())
}

fn parse_size(s: &str) -> Result<(i32, i32), String> {
    let (width, height) = s.split_once('x').ok_or("expected WIDTHxHEIGHT")?;
    let parse = |n: &str| match n.trim().parse::<i32>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err(format!("{n:?} must be positive")),
        Err(err) => Err(format!("{n:?}: {err}")),
    };
    Ok((parse(width)?, parse(height)?))
}
