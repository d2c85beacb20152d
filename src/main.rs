//! mc-ping — query a Minecraft server for its status JSON

use clap::Parser;
use rust_mc_ping::{MCConnTcp, ProtocolError};
use tracing_subscriber::{fmt, EnvFilter};

/// Minecraft Server List Ping client
#[derive(Parser, Debug)]
#[command(name = "mc-ping")]
#[command(about = "Query a Minecraft server for its status JSON")]
#[command(version)]
struct Args {
    /// Server hostname or address
    hostname: String,

    /// Server port
    #[arg(default_value_t = 25565)]
    port: u16,

    /// Protocol version sent in the handshake
    #[arg(default_value_t = 0)]
    protocol_version: i32,

    /// Re-render the status JSON with indentation
    #[arg(short, long)]
    pretty: bool,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(status) => println!("{status}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<String, ProtocolError> {
    let mut conn = MCConnTcp::connect((args.hostname.as_str(), args.port))?;
    let status = conn.status(args.protocol_version, &args.hostname, args.port)?;
    conn.close();

    if args.pretty {
        // the payload is treated as opaque; if it turns out not to be JSON,
        // the raw string is still the most useful thing to print
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&status) {
            if let Ok(pretty) = serde_json::to_string_pretty(&value) {
                return Ok(pretty);
            }
        }
    }

    Ok(status)
}
