use anyhow::{bail, Context, Result};
use ax25_codec::{codec::Ax25Codec, config::Config};
use clap::Parser;
use std::fs::File;
use std::io::{Read, Write};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fragment a flat byte image into an AX.25 matrix fragment stream.")]
struct Args {
    #[arg(help = "Path to the flat image file")]
    input: String,

    #[arg(long)]
    rows: u16,

    #[arg(long)]
    cols: u16,

    #[arg(long, default_value_t = 1)]
    element_size: u8,

    #[arg(long, help = "Output path for the fragment stream")]
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

    let mut image = Vec::new();
    File::open(&args.input)
        .context("failed to open input image")?
        .read_to_end(&mut image)
        .context("failed to read input image")?;

    let expected = args.rows as usize * args.cols as usize * args.element_size as usize;
    if image.len() != expected {
        bail!(
            "image is {} bytes, expected {expected} for {}x{}x{}",
            image.len(),
            args.rows,
            args.cols,
            args.element_size
        );
    }

    let codec = Ax25Codec::new(Config::default());
    let (stream, chunks) = ax25_codec::matrix::fragment(&codec, &image, args.rows, args.cols, args.element_size)
        .context("failed to fragment matrix")?;

    File::create(&args.output)
        .context("failed to create output file")?
        .write_all(&stream)?;

    println!(
        "Fragmented {} bytes into {chunks} chunks ({} bytes) -> {}",
        image.len(),
        stream.len(),
        args.output
    );
    Ok(())
}
