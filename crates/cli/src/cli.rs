//! Command-line definition for the `domsieve` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "domsieve")]
#[command(about = "Reduce an HTML document to the nodes that matter")]
#[command(version)]
pub struct Cli {
	/// HTML file to process (reads stdin when omitted or "-")
	pub file: Option<PathBuf>,

	/// Pipeline stage, in execution order (repeatable).
	///
	/// Accepted forms: "clean", "clean:tag1,tag2" (extra tags to strip),
	/// "xpath:EXPR", "css:SELECTOR".
	#[arg(short = 's', long = "stage", value_name = "SPEC", required = true)]
	pub stages: Vec<String>,

	/// Output format for the selected nodes
	#[arg(short, long, value_enum, default_value = "html")]
	pub output: OutputFormat,

	/// Parse the input as a fragment instead of a full document
	#[arg(long)]
	pub fragment: bool,

	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, action = clap::ArgAction::Count)]
	pub verbose: u8,
}

/// Output format for selected nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Outer HTML of each node, one per line
	#[default]
	Html,
	/// Trimmed text content of each node, one per line
	Text,
	/// JSON array of outer HTML strings
	Json,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_stages_in_order() {
		let cli = Cli::try_parse_from(["domsieve", "-s", "clean", "-s", "xpath://div", "page.html"]).unwrap();
		assert_eq!(cli.stages, vec!["clean", "xpath://div"]);
		assert_eq!(cli.file, Some(PathBuf::from("page.html")));
	}

	#[test]
	fn defaults_to_html_output_and_stdin() {
		let cli = Cli::try_parse_from(["domsieve", "-s", "css:p"]).unwrap();
		assert_eq!(cli.output, OutputFormat::Html);
		assert!(cli.file.is_none());
		assert!(!cli.fragment);
	}

	#[test]
	fn requires_at_least_one_stage() {
		assert!(Cli::try_parse_from(["domsieve", "page.html"]).is_err());
	}

	#[test]
	fn counts_verbosity_flags() {
		let cli = Cli::try_parse_from(["domsieve", "-vv", "-s", "clean"]).unwrap();
		assert_eq!(cli.verbose, 2);
	}
}
