//! Render JSON scene (or the built-in demo scene) into a PPM image
#![deny(warnings)]

use scanconv::*;
use std::{
    env,
    fs::File,
    io::{BufReader, BufWriter},
};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let (input, output) = match (args.next(), args.next()) {
        (Some(input), Some(output)) => (input, output),
        _ => {
            eprintln!("Usage: scene <scene.json | demo> <out.ppm>");
            std::process::exit(1);
        }
    };

    let scene = if input == "demo" {
        Scene::demo()
    } else {
        Scene::from_json(BufReader::new(File::open(input)?))?
    };
    let canvas = scene.render();
    canvas.write_ppm(BufWriter::new(File::create(output)?))?;
    Ok(())
}
