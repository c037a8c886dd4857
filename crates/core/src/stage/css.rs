//! Shorthand-selector selecting stage.

use ego_tree::NodeId;
use scraper::{ElementRef, Selector};

use crate::document::Document;
use crate::error::{Error, Result};
use crate::stage::Stage;

/// Selecting stage configured with a CSS selector.
///
/// Selection covers the context element itself (when it matches) followed
/// by matching descendants in document order. The selector string is
/// stored verbatim and compiled on every application.
#[derive(Debug, Clone)]
pub struct Css {
	selector: String,
}

impl Css {
	pub fn new(selector: impl Into<String>) -> Self {
		Self { selector: selector.into() }
	}

	/// The configured selector string.
	pub fn selector(&self) -> &str {
		&self.selector
	}
}

impl Stage for Css {
	fn apply(&self, doc: &mut Document, node: NodeId) -> Result<Vec<NodeId>> {
		let selector = Selector::parse(&self.selector).map_err(|err| Error::Query {
			stage: self.label(),
			message: err.to_string(),
		})?;

		let Some(node_ref) = doc.tree().get(node) else {
			return Ok(Vec::new());
		};

		let mut matches = Vec::new();
		match ElementRef::wrap(node_ref) {
			Some(element) => collect(element, &selector, &mut matches),
			// Document and fragment roots are not elements; match from
			// their element children instead.
			None => {
				for child in node_ref.children().filter_map(ElementRef::wrap) {
					collect(child, &selector, &mut matches);
				}
			}
		}
		Ok(matches)
	}

	fn label(&self) -> String {
		format!("CSS({})", self.selector)
	}
}

fn collect(element: ElementRef<'_>, selector: &Selector, matches: &mut Vec<NodeId>) {
	if selector.matches(&element) {
		matches.push(element.id());
	}
	for descendant in element.select(selector) {
		matches.push(descendant.id());
	}
}
