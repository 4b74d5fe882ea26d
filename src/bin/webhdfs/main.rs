use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use webhdfs::{ClientConfig, parse_auth};

#[derive(Parser, Debug)]
#[command(name = "webhdfs", about = "WebHDFS client: ls/cat/mkdir/mv/rm/cp")]
struct Cli {
    /// The base URI of the service (overrides --host/--port/--secure)
    #[arg(long)]
    base: Option<String>,
    /// The host of the service
    #[arg(long, default_value = "localhost")]
    host: String,
    /// The port of the service
    #[arg(long, default_value_t = 50070)]
    port: u16,
    /// Use https
    #[arg(long)]
    secure: bool,
    /// The gateway name (e.g. a Knox topology)
    #[arg(long)]
    gateway: Option<String>,
    /// Credentials as user:pass
    #[arg(long, env = "WEBHDFS_AUTH", hide_env_values = true)]
    auth: Option<String>,
    /// Proxy URL for all requests
    #[arg(long)]
    proxy: Option<String>,
    /// Skip TLS certificate verification
    #[arg(long)]
    insecure: bool,
    /// Request timeout in seconds (default: none)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
    /// Log request headers
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List directories (default: /)
    Ls {
        /// Report sizes in bytes
        #[arg(short = 'b')]
        bytes: bool,
        /// List details
        #[arg(short = 'l')]
        long: bool,
        paths: Vec<String>,
    },

    /// Print files to stdout
    Cat {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Create directories
    Mkdir {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Rename a file or directory
    Mv { src: String, dst: String },

    /// Remove files or directories
    Rm {
        /// Recursively remove directories
        #[arg(short = 'r')]
        recursive: bool,
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Copy a local file to the cluster
    Cp {
        /// Overwrite an existing target
        #[arg(short = 'f')]
        force: bool,
        src: String,
        dst: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let code = match run(cli) {
        Ok(()) => 0,
        Err(e) => common::report(&e, &mut std::io::stderr().lock()),
    };
    std::process::exit(code);
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig {
        base: cli.base,
        host: cli.host,
        port: cli.port,
        secure: cli.secure,
        gateway: cli.gateway,
        credentials: cli.auth.as_deref().and_then(parse_auth),
        verify_tls: !cli.insecure,
        proxy: cli.proxy,
        timeout: cli.timeout.map(Duration::from_secs),
        verbose: cli.verbose,
        ..Default::default()
    };
    let client = config.connect()?;
    let mut out = std::io::stdout().lock();

    match cli.cmd {
        Commands::Ls { bytes, long, paths } => {
            commands::ls::run(&client, &paths, long, bytes, &mut out)
        }
        Commands::Cat { paths } => commands::cat::run(&client, &paths, &mut out),
        Commands::Mkdir { paths } => commands::mkdir::run(&client, &paths),
        Commands::Mv { src, dst } => commands::mv::run(&client, &src, &dst),
        Commands::Rm { recursive, paths } => commands::rm::run(&client, &paths, recursive),
        Commands::Cp { force, src, dst } => commands::cp::run(&client, &src, &dst, force),
    }
}

mod commands;
mod common;
