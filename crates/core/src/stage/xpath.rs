//! Structural-query selecting stage.

use ego_tree::NodeId;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::query;
use crate::stage::Stage;

/// Selecting stage configured with a structural query.
///
/// The query string is stored verbatim and parsed on every application;
/// malformed syntax surfaces as a query error at evaluation time.
#[derive(Debug, Clone)]
pub struct XPath {
	query: String,
}

impl XPath {
	pub fn new(query: impl Into<String>) -> Self {
		Self { query: query.into() }
	}

	/// The configured query string.
	pub fn query(&self) -> &str {
		&self.query
	}
}

impl Stage for XPath {
	fn apply(&self, doc: &mut Document, node: NodeId) -> Result<Vec<NodeId>> {
		let path = query::parse(&self.query).map_err(|err| Error::Query {
			stage: self.label(),
			message: err.to_string(),
		})?;
		Ok(query::evaluate(&path, doc, node))
	}

	fn label(&self) -> String {
		format!("XPath({})", self.query)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn selects_matching_descendants() {
		let mut doc = Document::parse("<html><body><div id='a'>x</div><div id='b'>y</div></body></html>");
		let root = doc.root();
		let stage = XPath::new("//div");
		let matches = stage.apply(&mut doc, root).expect("query is valid");
		assert_eq!(matches.len(), 2);
		assert!(doc.outer_html(matches[0]).contains("id=\"a\""));
	}

	#[test]
	fn malformed_query_is_a_query_error() {
		let mut doc = Document::parse("<html><body></body></html>");
		let root = doc.root();
		let err = XPath::new("[invalid").apply(&mut doc, root).expect_err("query is malformed");
		assert!(matches!(err, Error::Query { .. }));
	}

	#[test]
	fn selection_does_not_mutate_the_tree() {
		let mut doc = Document::parse("<html><body><p class='x'>text</p></body></html>");
		let root = doc.root();
		let before = doc.outer_html(root);
		XPath::new("//p[@class='x']").apply(&mut doc, root).expect("query is valid");
		assert_eq!(doc.outer_html(root), before);
	}

	#[test]
	fn label_includes_the_query() {
		assert_eq!(XPath::new("//div").label(), "XPath(//div)");
	}
}
