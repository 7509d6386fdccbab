use std::error::Error;

use clap::ArgMatches;
use log::{debug, info};

mod args;
mod config;
mod file;
mod generators;
mod order;
mod render;

use crate::{
    args::get_command,
    config::{GenerateSettings, RenderSettings},
    generators::get_sample_generator,
};

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = get_command().get_matches();

    let result = match args.subcommand() {
        Some(("render", sub)) => run_render(sub),
        Some(("generate", sub)) => run_generate(sub),
        _ => unreachable!("subcommand is required by the parser"),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_render(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let settings = RenderSettings::from_args(args)?;
    debug!("{:?}", settings);

    render::render_volume(&settings)
}

fn run_generate(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let settings = GenerateSettings::from_args(args)?;
    info!("Generating volume...");
    debug!("{:?}", settings);

    let generator = get_sample_generator(&settings);
    file::write_fld_file(
        &settings.file_name,
        settings.dims,
        settings.data_type,
        generator.as_ref(),
    )?;

    info!("Generating finished, result in {}", settings.file_name.display());
    Ok(())
}
