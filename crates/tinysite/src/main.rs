use clap::Parser;
use std::path::PathBuf;
use tinysite_engine::{Engine, EngineConfig};

#[derive(Debug, Parser)]
#[command(
    name = "tinysite",
    version,
    about = "Minimal page server",
    disable_help_subcommand = true
)]
struct Cli {
    /// Start the HTTP server at HOST:PORT
    #[arg(short = 'S', value_name = "HOST:PORT")]
    serve: Option<String>,

    /// Set the document root holding the page template
    #[arg(short = 't', long = "docroot", value_name = "DIR")]
    docroot: Option<PathBuf>,

    /// Load settings from a TOML config file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// SQLite database path
    #[arg(short = 'd', long = "database", value_name = "FILE")]
    database: Option<String>,
}

fn parse_host_port(s: &str) -> Result<(String, u16), String> {
    if let Some(rest) = s.strip_prefix('[') {
        // bracketed IPv6: [host]:port
        if let Some(end) = rest.find(']') {
            let host = &rest[..end];
            let remain = &rest[end + 1..];
            let port = remain
                .strip_prefix(':')
                .ok_or("missing port after IPv6 host")?;
            let port: u16 = port.parse().map_err(|_| "invalid port".to_string())?;
            return Ok((host.to_string(), port));
        }
        return Err("invalid bracketed IPv6 address".to_string());
    }
    let mut parts = s.rsplitn(2, ':');
    let port_str = parts.next().ok_or("missing port")?;
    let host = parts.next().ok_or("missing host")?;
    let port: u16 = port_str.parse().map_err(|_| "invalid port".to_string())?;
    Ok((host.to_string(), port))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => match EngineConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(2);
            }
        },
        None => EngineConfig::default(),
    };

    if let Some(addr) = cli.serve.as_deref() {
        match parse_host_port(addr) {
            Ok((host, port)) => {
                config.host = host;
                config.port = port;
            }
            Err(e) => {
                eprintln!("-S expects HOST:PORT (e.g. 127.0.0.1:3000), error: {}", e);
                std::process::exit(2);
            }
        }
    }

    if let Some(docroot) = cli.docroot {
        config = config.set_document_root(docroot);
    }

    if let Some(database) = cli.database {
        config = config.set_database_path(database);
    }

    // Startup faults are fatal here, at the boundary: bad database path or
    // schema failure means there is nothing to serve.
    let engine = match Engine::new(config).await {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            std::process::exit(1);
        }
    };

    if let Err(e) = engine.run().await {
        tracing::error!(error = %e, "server exited");
        std::process::exit(1);
    }
}
