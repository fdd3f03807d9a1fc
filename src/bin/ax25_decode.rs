use anyhow::{Context, Result};
use ax25_codec::{codec::Ax25Codec, config::Config};
use clap::Parser;
use std::fs::File;
use std::io::{self, Read, Write};

#[derive(Parser, Debug)]
#[command(author, version, about = "Decode a single AX.25 UI wire frame.")]
struct Args {
    #[arg(help = "Path to the wire frame file, or '-' for stdin")]
    input: String,

    #[arg(long, help = "Output path for the raw payload (default: print a summary)")]
    output: Option<String>,

    #[arg(long, help = "Input is a KISS data frame (port 0) wrapping the wire frame")]
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

    let mut wire = Vec::new();
    if args.input == "-" {
        io::stdin().read_to_end(&mut wire).context("failed to read stdin")?;
    } else {
        File::open(&args.input)
            .context("failed to open input file")?
            .read_to_end(&mut wire)
            .context("failed to read input file")?;
    }

    let wire = if args.kiss {
        let mut deframer = ax25_codec::kiss::Deframer::new();
        let frame = wire
            .iter()
            .find_map(|&b| deframer.process_byte(b))
            .context("no complete KISS frame found in input")?;
        frame
    } else {
        wire
    };

    let codec = Ax25Codec::new(Config::default());
    let decoded = codec.decode(&wire).context("failed to decode AX.25 frame")?;

    match args.output {
        Some(path) => {
            File::create(&path)
                .context("failed to create output file")?
                .write_all(&decoded.payload)?;
            println!("Wrote {} payload bytes to {path}", decoded.payload.len());
        }
        None => {
            println!(
                "{}-{} -> {}-{}: {} payload bytes",
                String::from_utf8_lossy(&decoded.src_callsign),
                decoded.src_ssid,
                String::from_utf8_lossy(&decoded.dst_callsign),
                decoded.dst_ssid,
                decoded.payload.len(),
            );
            println!("{}", hex::encode(&decoded.payload));
        }
    }

    Ok(())
}
