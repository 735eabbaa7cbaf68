use clap::Parser;
use runevent::{builtins::standard_registry, config::RunConfig, InternalResult, Value};
use std::{ffi::OsString, path::PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Command text. Arguments are joined with `,` before parsing; put `--` in front
    /// of a command that starts with `-`.
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    command: Vec<String>,

    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log every parse step
    #[arg(long)]
    trace: bool,

    /// Evaluate the top-level items in parallel
    #[arg(long)]
    parallel: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Worker pool size for parallel evaluation
    #[arg(long)]
    workers: Option<usize>,

    /// Run the command in a child process and exit with its status
    #[arg(long)]
    spawn: bool,

    /// List the callable names and exit
    #[arg(long)]
    list: bool,

    /// Enable debug mode
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> InternalResult<RunConfig> {
    let mut config = match &cli.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };
    config.trace |= cli.trace;
    config.parallel |= cli.parallel;
    config.json_output |= cli.json;
    config.workers = cli.workers.or(config.workers);
    Ok(config)
}

fn init_tracing(verbose: bool, trace: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    if trace {
        if let Ok(directive) = "runevent::trace=info".parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Arguments for the child process: the parsed flags minus `--spawn`, then the command verbatim.
fn child_args(cli: &Cli) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();
    if let Some(path) = &cli.config {
        args.push("--config".into());
        args.push(path.into());
    }
    if let Some(workers) = cli.workers {
        args.push("--workers".into());
        args.push(workers.to_string().into());
    }
    for (enabled, flag) in [
        (cli.trace, "--trace"),
        (cli.parallel, "--parallel"),
        (cli.json, "--json"),
        (cli.verbose, "--verbose"),
    ] {
        if enabled {
            args.push(flag.into());
        }
    }
    args.push("--".into());
    args.extend(cli.command.iter().map(OsString::from));
    args
}

/// Re-runs this executable on the same command without `--spawn`.
async fn spawn(cli: &Cli) -> InternalResult<i32> {
    let program = std::env::current_exe()?;
    let args = child_args(cli);
    info!(program = %program.display(), "spawning child process");

    let status = tokio::process::Command::new(program)
        .args(args)
        .status()
        .await?;
    debug!(%status, "child process exited");
    Ok(status.code().unwrap_or(1))
}

async fn run(cli: &Cli, config: &RunConfig) -> InternalResult<i32> {
    let registry = standard_registry();
    if cli.list {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(0);
    }
    if cli.spawn {
        return spawn(cli).await;
    }

    let command = cli.command.join(",");
    debug!(%command, ?config, "running command");

    let mut values = runevent::run(&registry, &command, config).await?;
    let value = if values.len() == 1 {
        values.remove(0)
    } else {
        Value::List(values)
    };

    if config.json_output {
        let json = serde_json::to_string(&value).map_err(std::io::Error::from)?;
        println!("{}", json);
    } else if !value.is_unit() {
        println!("{}", value);
    }
    Ok(0)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match load_config(&cli) {
        Ok(config) => {
            init_tracing(cli.verbose, config.trace);
            run(&cli, &config).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
