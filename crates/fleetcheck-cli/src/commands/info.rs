use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use fleetcheck_core::io::{open_video, SerReader, SourceFormat};

#[derive(Args)]
pub struct InfoArgs {
    /// SER file, animated GIF or directory of images
    pub path: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let source = open_video(&args.path)?;
    let info = source.describe();

    println!("Source:      {}", info.path.display());
    println!("Format:      {}", info.format);
    println!("Dimensions:  {}x{}", info.width, info.height);
    match info.frame_count {
        Some(count) => println!("Frames:      {count}"),
        None => println!("Frames:      unknown until decoded"),
    }

    if info.format == SourceFormat::Ser {
        let reader = SerReader::open(&args.path)?;
        println!("Bit depth:   {}", reader.header.pixel_depth);
        println!("Color mode:  {:?}", reader.header.color_mode());
        if !reader.header.observer.is_empty() {
            println!("Observer:    {}", reader.header.observer);
        }
        if !reader.header.instrument.is_empty() {
            println!("Instrument:  {}", reader.header.instrument);
        }
        if let Some(frame_bytes) = reader.header.frame_byte_size() {
            let total_mb = (frame_bytes * reader.frame_count()) as f64 / (1024.0 * 1024.0);
            println!("Data size:   {:.1} MB", total_mb);
        }
    }

    Ok(())
}
