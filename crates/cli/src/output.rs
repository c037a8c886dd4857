//! Rendering of selected nodes to the requested output format.

use anyhow::Result;
use domsieve::{Document, NodeId};

use crate::cli::OutputFormat;

/// Renders the final node list; one node per line for html/text, a JSON
/// array of outer HTML strings for json.
pub fn render(doc: &Document, nodes: &[NodeId], format: OutputFormat) -> Result<String> {
	let rendered = match format {
		OutputFormat::Html => nodes.iter().map(|&id| doc.outer_html(id)).collect::<Vec<_>>().join("\n"),
		OutputFormat::Text => nodes
			.iter()
			.map(|&id| doc.text(id).trim().to_string())
			.collect::<Vec<_>>()
			.join("\n"),
		OutputFormat::Json => {
			let items: Vec<String> = nodes.iter().map(|&id| doc.outer_html(id)).collect();
			serde_json::to_string_pretty(&items)?
		}
	};
	Ok(rendered)
}

#[cfg(test)]
mod tests {
	use super::*;
	use domsieve::{Css, Pipeline};

	fn selected() -> (Document, Vec<NodeId>) {
		let mut doc = Document::parse("<html><body><p>one</p><p>two</p></body></html>");
		let nodes = Pipeline::new()
			.with_stage(Css::new("p"))
			.run_document(&mut doc)
			.expect("selector is valid");
		(doc, nodes)
	}

	#[test]
	fn html_output_is_one_node_per_line() {
		let (doc, nodes) = selected();
		let out = render(&doc, &nodes, OutputFormat::Html).unwrap();
		assert_eq!(out, "<p>one</p>\n<p>two</p>");
	}

	#[test]
	fn text_output_strips_markup() {
		let (doc, nodes) = selected();
		let out = render(&doc, &nodes, OutputFormat::Text).unwrap();
		assert_eq!(out, "one\ntwo");
	}

	#[test]
	fn json_output_is_an_array_of_html_strings() {
		let (doc, nodes) = selected();
		let out = render(&doc, &nodes, OutputFormat::Json).unwrap();
		let parsed: Vec<String> = serde_json::from_str(&out).unwrap();
		assert_eq!(parsed, vec!["<p>one</p>", "<p>two</p>"]);
	}

	#[test]
	fn empty_selection_renders_empty_output() {
		let doc = Document::parse("<html><body></body></html>");
		let out = render(&doc, &[], OutputFormat::Html).unwrap();
		assert!(out.is_empty());
	}
}
