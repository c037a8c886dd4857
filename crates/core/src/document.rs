//! Thin facade over the parsed HTML tree.
//!
//! Stages operate on [`ego_tree::NodeId`] handles into one shared tree.
//! Handles stay valid for the document's lifetime, including across the
//! in-place mutation performed by the sanitizing stage.

use ego_tree::{NodeId, Tree};
use scraper::{ElementRef, Html, Node};

/// A parsed HTML document (or fragment) owning the node tree.
pub struct Document {
	html: Html,
}

impl Document {
	/// Parses a full HTML document.
	pub fn parse(html: &str) -> Self {
		Self { html: Html::parse_document(html) }
	}

	/// Parses an HTML fragment (content without a surrounding document).
	pub fn parse_fragment(html: &str) -> Self {
		Self { html: Html::parse_fragment(html) }
	}

	/// Handle to the document's root element.
	pub fn root(&self) -> NodeId {
		self.html.root_element().id()
	}

	pub(crate) fn tree(&self) -> &Tree<Node> {
		&self.html.tree
	}

	pub(crate) fn tree_mut(&mut self) -> &mut Tree<Node> {
		&mut self.html.tree
	}

	/// Serializes a node (element tag included) back to HTML.
	///
	/// Non-element nodes serialize as the concatenation of their element
	/// children; an unknown handle serializes as the empty string.
	pub fn outer_html(&self, node: NodeId) -> String {
		let Some(node_ref) = self.html.tree.get(node) else {
			return String::new();
		};
		match ElementRef::wrap(node_ref) {
			Some(element) => element.html(),
			None => node_ref.children().filter_map(ElementRef::wrap).map(|el| el.html()).collect(),
		}
	}

	/// Serializes a node's children back to HTML.
	pub fn inner_html(&self, node: NodeId) -> String {
		self.html
			.tree
			.get(node)
			.and_then(ElementRef::wrap)
			.map(|element| element.inner_html())
			.unwrap_or_default()
	}

	/// Concatenated text content of a node's subtree.
	pub fn text(&self, node: NodeId) -> String {
		self.html
			.tree
			.get(node)
			.and_then(ElementRef::wrap)
			.map(|element| element.text().collect())
			.unwrap_or_default()
	}
}

impl std::fmt::Debug for Document {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Document").finish_non_exhaustive()
	}
}
