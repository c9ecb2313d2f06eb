use chnroute_dns_domain::{CliOverrides, PacketError};
use clap::{Parser, Subcommand};
use inspect::{Inspector, PacketFormat};
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::{error, info};

mod bootstrap;
mod inspect;

#[derive(Parser)]
#[command(name = "chnroute-dns")]
#[command(version)]
#[command(about = "Validate captured DNS packets and classify replies against chnroute lists")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// IPv4 chnroute list
    #[arg(long, value_name = "FILE")]
    chnroute: Option<String>,

    /// IPv6 chnroute list
    #[arg(long, value_name = "FILE")]
    chnroute6: Option<String>,

    /// Accept replies that carry no A/AAAA answer
    #[arg(long)]
    noip_as_chnip: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate client queries
    Query {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long, value_enum, default_value_t = PacketFormat::Binary)]
        format: PacketFormat,
    },

    /// Validate upstream replies and classify their first address
    Reply {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long, value_enum, default_value_t = PacketFormat::Binary)]
        format: PacketFormat,
    },

    /// Test addresses against the loaded chnroute set
    Lookup {
        #[arg(required = true)]
        addrs: Vec<IpAddr>,
    },

    /// Rewrite a packet into an empty NOERROR reply
    Strip {
        input: PathBuf,

        /// Where to write the rewritten packet (raw bytes)
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, value_enum, default_value_t = PacketFormat::Binary)]
        format: PacketFormat,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        chnroute_file: cli.chnroute.clone(),
        chnroute6_file: cli.chnroute6.clone(),
        noip_as_chnip: cli.noip_as_chnip,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config.logging);

    info!("Starting chnroute-dns v{}", env!("CARGO_PKG_VERSION"));

    let routes = match &cli.command {
        Command::Query { .. } | Command::Strip { .. } => Default::default(),
        Command::Reply { .. } | Command::Lookup { .. } => {
            bootstrap::load_chnroute(&config.chnroute)?
        }
    };
    let inspector = Inspector::new(&routes, &config.inspect);

    match cli.command {
        Command::Query { files, format } => {
            run_batch(&files, format, |buf| inspector.query(buf))
        }
        Command::Reply { files, format } => {
            run_batch(&files, format, |buf| inspector.reply(buf))
        }
        Command::Lookup { addrs } => {
            for addr in addrs {
                let verdict = if routes.contains_ip(addr) { "chnip" } else { "not chnip" };
                println!("{} {}", addr, verdict);
            }
            Ok(())
        }
        Command::Strip {
            input,
            output,
            format,
        } => {
            let mut buf = inspect::read_packet(&input, format)?;
            let stripped = inspector.strip(&mut buf)?;
            std::fs::write(&output, stripped)?;
            info!(
                input = %input.display(),
                output = %output.display(),
                len = stripped.len(),
                "Wrote empty reply"
            );
            Ok(())
        }
    }
}

fn run_batch<F>(files: &[PathBuf], format: PacketFormat, check: F) -> anyhow::Result<()>
where
    F: Fn(&[u8]) -> Result<String, PacketError>,
{
    let mut rejected = 0usize;

    for path in files {
        let buf = inspect::read_packet(path, format)?;
        match check(&buf) {
            Ok(line) => println!("{}: {}", path.display(), line),
            Err(e) => {
                rejected += 1;
                error!(path = %path.display(), error = %e, "Packet rejected");
                println!("{}: rejected ({})", path.display(), e);
            }
        }
    }

    if rejected > 0 {
        anyhow::bail!("{} of {} packet(s) rejected", rejected, files.len());
    }
    Ok(())
}
