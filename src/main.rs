#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod cli;
mod comparator;
mod core;
mod country;
mod demand;
mod emissions;
mod error;
mod export;
mod loader;
mod prelude;
mod quantity;
mod scenario;
mod series;
mod tables;

use clap::{Parser, crate_version};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Args, Command, analyse, compare},
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Analyse(args) => analyse(&args)?,
        Command::Compare(args) => compare(&args)?,
    }

    info!("done!");
    Ok(())
}
