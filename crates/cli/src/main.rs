mod cli;
mod logging;
mod output;
mod stages;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use domsieve::Document;
use tracing::{debug, error};

use crate::cli::Cli;

fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	if let Err(err) = run(&cli) {
		error!(target = "domsieve", error = %err, "reduction failed");
		std::process::exit(1);
	}
}

fn run(cli: &Cli) -> Result<()> {
	let html = read_input(cli.file.as_deref())?;
	let mut doc = if cli.fragment { Document::parse_fragment(&html) } else { Document::parse(&html) };

	let pipeline = stages::build_pipeline(&cli.stages)?;
	debug!(target = "domsieve", stages = pipeline.len(), input_bytes = html.len(), "running pipeline");

	let nodes = pipeline.run_document(&mut doc)?;
	debug!(target = "domsieve", selected = nodes.len(), "pipeline finished");

	let rendered = output::render(&doc, &nodes, cli.output)?;
	if !rendered.is_empty() {
		println!("{rendered}");
	}
	Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
	match file {
		Some(path) if path.as_os_str() != "-" => {
			std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
		}
		_ => {
			let mut html = String::new();
			std::io::stdin().read_to_string(&mut html).context("failed to read stdin")?;
			Ok(html)
		}
	}
}
