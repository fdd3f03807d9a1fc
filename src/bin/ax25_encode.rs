use anyhow::{Context, Result};
use ax25_codec::{codec::Ax25Codec, config::Config};
use clap::Parser;
use std::fs::File;
use std::io::{self, Read, Write};

#[derive(Parser, Debug)]
#[command(author, version, about = "Encode a payload into a single AX.25 UI frame.")]
struct Args {
    #[arg(help = "Path to the payload file, or '-' for stdin")]
    input: String,

    #[arg(long, help = "Satellite (source) callsign", default_value = "PARSAT")]
    sat_callsign: String,

    #[arg(long, help = "Ground (destination) callsign", default_value = "ABCD")]
    grd_callsign: String,

    #[arg(long, help = "Output path for the wire frame (default: stdout)")]
    output: Option<String>,

    #[arg(long, help = "Wrap the wire frame in a KISS data frame (port 0)")]
    kiss: bool,

    #[arg(short, long, help = "Enable verbose (DEBUG level) logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new().filter(None, level).format_timestamp(None).init();

    let mut payload = Vec::new();
    if args.input == "-" {
        io::stdin().read_to_end(&mut payload).context("failed to read stdin")?;
    } else {
        File::open(&args.input)
            .context("failed to open input file")?
            .read_to_end(&mut payload)
            .context("failed to read input file")?;
    }

    let config = Config::new(args.sat_callsign, args.grd_callsign);
    let codec = Ax25Codec::new(config);
    let wire = codec.encode(&payload).context("failed to encode AX.25 frame")?;
    let wire = if args.kiss { ax25_codec::kiss::encode_frame(&wire) } else { wire };

    match args.output {
        Some(path) => {
            File::create(&path).context("failed to create output file")?.write_all(&wire)?;
            println!("Wrote {} wire bytes to {path}", wire.len());
        }
        None => {
            io::stdout().write_all(&wire)?;
        }
    }

    Ok(())
}
