use anyhow::{Context, Result};
use ax25_codec::{codec::Ax25Codec, config::Config};
use clap::Parser;
use std::fs::File;
use std::io::{Read, Write};

#[derive(Parser, Debug)]
#[command(author, version, about = "Reassemble an AX.25 matrix fragment stream into a flat image.")]
struct Args {
    #[arg(help = "Path to the fragment stream file")]
    input: String,

    #[arg(long, help = "Number of fragments in the stream")]
    chunks: u16,

    #[arg(long, help = "Output path for the reassembled image")]
    output: String,

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

    let mut stream = Vec::new();
    File::open(&args.input)
        .context("failed to open fragment stream")?
        .read_to_end(&mut stream)
        .context("failed to read fragment stream")?;

    let codec = Ax25Codec::new(Config::default());
    let (image, shape) = ax25_codec::matrix::reassemble(&codec, &stream, args.chunks)
        .context("failed to reassemble matrix")?;

    File::create(&args.output)
        .context("failed to create output file")?
        .write_all(&image)?;

    println!(
        "Reassembled {}x{}x{} ({} bytes) -> {}",
        shape.rows, shape.cols, shape.element_size, image.len(), args.output
    );
    Ok(())
}
