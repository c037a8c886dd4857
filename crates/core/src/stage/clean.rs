//! In-place sanitization of a node's subtree.

use std::collections::HashSet;

use ego_tree::NodeId;
use scraper::Node;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::stage::Stage;

const SCRIPT_TAGS: &[&str] = &["script", "noscript"];
const EMBEDDED_TAGS: &[&str] = &["applet", "embed", "frame", "iframe", "object", "svg"];
const FORM_TAGS: &[&str] = &["button", "form", "input", "select", "textarea"];

/// Which construct classes [`CleanHtml`] strips.
#[derive(Debug, Clone)]
pub struct CleanOptions {
	/// Remove `<script>` and `<noscript>` elements.
	pub scripts: bool,
	/// Remove `<style>` elements and `style` attributes.
	pub styles: bool,
	/// Remove comment nodes.
	pub comments: bool,
	/// Remove `on*` event-handler attributes and `javascript:` URLs.
	pub javascript: bool,
	/// Remove embedded content (`iframe`, `object`, `embed`, `svg`, ...).
	pub embedded: bool,
	/// Remove form controls (`form`, `input`, `button`, ...).
	pub forms: bool,
	/// Additional element names to remove wholesale.
	pub kill_tags: Vec<String>,
}

impl Default for CleanOptions {
	fn default() -> Self {
		Self {
			scripts: true,
			styles: true,
			comments: true,
			javascript: true,
			embedded: true,
			forms: false,
			kill_tags: Vec::new(),
		}
	}
}

impl CleanOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Toggles script element removal.
	pub fn with_scripts(mut self, scripts: bool) -> Self {
		self.scripts = scripts;
		self
	}

	/// Toggles style element and attribute removal.
	pub fn with_styles(mut self, styles: bool) -> Self {
		self.styles = styles;
		self
	}

	/// Toggles comment node removal.
	pub fn with_comments(mut self, comments: bool) -> Self {
		self.comments = comments;
		self
	}

	/// Toggles event-handler and `javascript:` URL removal.
	pub fn with_javascript(mut self, javascript: bool) -> Self {
		self.javascript = javascript;
		self
	}

	/// Toggles embedded content removal.
	pub fn with_embedded(mut self, embedded: bool) -> Self {
		self.embedded = embedded;
		self
	}

	/// Toggles form control removal.
	pub fn with_forms(mut self, forms: bool) -> Self {
		self.forms = forms;
		self
	}

	/// Adds an extra element name to remove wholesale.
	pub fn with_kill_tag(mut self, tag: impl Into<String>) -> Self {
		self.kill_tags.push(tag.into());
		self
	}
}

/// Sanitizing stage: strips configured constructs from the subtree in
/// place and passes the same node through.
#[derive(Debug)]
pub struct CleanHtml {
	options: CleanOptions,
	kill: HashSet<String>,
}

impl CleanHtml {
	/// Builds a cleaner with default options.
	pub fn new() -> Self {
		let options = CleanOptions::default();
		let kill = Self::kill_set(&options);
		Self { options, kill }
	}

	/// Builds a cleaner from explicit options.
	///
	/// Option validation is eager: an ill-formed `kill_tags` entry is a
	/// configuration error at construction, not at first use.
	pub fn with_options(options: CleanOptions) -> Result<Self> {
		for tag in &options.kill_tags {
			if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
				return Err(Error::Configuration {
					stage: "CleanHTML".to_string(),
					message: format!("invalid kill tag {tag:?}"),
				});
			}
		}
		let kill = Self::kill_set(&options);
		Ok(Self { options, kill })
	}

	fn kill_set(options: &CleanOptions) -> HashSet<String> {
		let mut kill = HashSet::new();
		if options.scripts {
			kill.extend(SCRIPT_TAGS.iter().map(|t| t.to_string()));
		}
		if options.styles {
			kill.insert("style".to_string());
		}
		if options.embedded {
			kill.extend(EMBEDDED_TAGS.iter().map(|t| t.to_string()));
		}
		if options.forms {
			kill.extend(FORM_TAGS.iter().map(|t| t.to_string()));
		}
		kill.extend(options.kill_tags.iter().map(|t| t.to_ascii_lowercase()));
		kill
	}

	fn keep_attribute(&self, name: &str, value: &str) -> bool {
		if self.options.javascript {
			if name.starts_with("on") {
				return false;
			}
			if value.trim_start().to_ascii_lowercase().starts_with("javascript:") {
				return false;
			}
		}
		if self.options.styles && name == "style" {
			return false;
		}
		true
	}
}

impl Default for CleanHtml {
	fn default() -> Self {
		Self::new()
	}
}

impl Stage for CleanHtml {
	fn apply(&self, doc: &mut Document, node: NodeId) -> Result<Vec<NodeId>> {
		let mut doomed = Vec::new();
		let mut elements = Vec::new();

		if let Some(root) = doc.tree().get(node) {
			// The input node itself is never removed, but its attributes
			// are still cleaned.
			if root.value().is_element() {
				elements.push(node);
			}
			for descendant in root.descendants().skip(1) {
				match descendant.value() {
					Node::Comment(_) if self.options.comments => doomed.push(descendant.id()),
					Node::Element(element) if self.kill.contains(element.name()) => doomed.push(descendant.id()),
					Node::Element(_) => elements.push(descendant.id()),
					_ => {}
				}
			}
		}

		let tree = doc.tree_mut();
		for id in doomed {
			if let Some(mut doomed_node) = tree.get_mut(id) {
				doomed_node.detach();
			}
		}

		if self.options.javascript || self.options.styles {
			for id in elements {
				if let Some(mut element_node) = tree.get_mut(id) {
					if let Node::Element(element) = element_node.value() {
						element.attrs.retain(|(name, value)| self.keep_attribute(&name.local, &**value));
					}
				}
			}
		}

		Ok(vec![node])
	}

	fn label(&self) -> String {
		"CleanHTML".to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::stage::Css;

	fn clean(html: &str, cleaner: &CleanHtml) -> String {
		let mut doc = Document::parse(html);
		let root = doc.root();
		let out = cleaner.apply(&mut doc, root).expect("clean should not fail");
		assert_eq!(out, vec![root], "cleaner must pass its input node through");
		doc.outer_html(root)
	}

	#[test]
	fn strips_scripts_styles_and_comments_by_default() {
		let html = "<html><body><script>alert(1)</script><style>p{}</style><!-- note --><p>kept</p></body></html>";
		let cleaned = clean(html, &CleanHtml::new());
		assert!(!cleaned.contains("alert"));
		assert!(!cleaned.contains("p{}"));
		assert!(!cleaned.contains("note"));
		assert!(cleaned.contains("<p>kept</p>"));
	}

	#[test]
	fn strips_event_handlers_and_javascript_urls() {
		let html = r#"<html><body><a href="javascript:run()" onclick="run()" title="x">go</a></body></html>"#;
		let cleaned = clean(html, &CleanHtml::new());
		assert!(!cleaned.contains("onclick"));
		assert!(!cleaned.contains("javascript:"));
		assert!(cleaned.contains(r#"title="x""#));
	}

	#[test]
	fn keeps_comments_when_disabled() {
		let options = CleanOptions::new().with_comments(false);
		let cleaner = CleanHtml::with_options(options).expect("options are valid");
		let cleaned = clean("<html><body><!-- keep me --><p>x</p></body></html>", &cleaner);
		assert!(cleaned.contains("keep me"));
	}

	#[test]
	fn removes_forms_when_enabled() {
		let options = CleanOptions::new().with_forms(true);
		let cleaner = CleanHtml::with_options(options).expect("options are valid");
		let cleaned = clean("<html><body><form><input></form><p>x</p></body></html>", &cleaner);
		assert!(!cleaned.contains("<form"));
		assert!(cleaned.contains("<p>x</p>"));
	}

	#[test]
	fn kill_tags_remove_whole_subtrees() {
		let options = CleanOptions::new().with_kill_tag("aside");
		let cleaner = CleanHtml::with_options(options).expect("options are valid");
		let cleaned = clean("<html><body><aside><p>advert</p></aside><p>main</p></body></html>", &cleaner);
		assert!(!cleaned.contains("<aside"));
		assert!(!cleaned.contains("advert"));
		assert!(cleaned.contains("main"));
	}

	#[test]
	fn invalid_kill_tag_is_a_configuration_error() {
		let options = CleanOptions::new().with_kill_tag("not a tag");
		let err = CleanHtml::with_options(options).expect_err("spaces are not valid in tag names");
		assert!(matches!(err, Error::Configuration { .. }));
	}

	#[test]
	fn cleans_attributes_on_the_input_node_itself() {
		let mut doc = Document::parse(
			r#"<html><body><div onclick="run()" href="javascript:x()" title="kept">hi</div></body></html>"#,
		);
		let root = doc.root();
		let div = Css::new("div").apply(&mut doc, root).expect("selector is valid")[0];
		let out = CleanHtml::new().apply(&mut doc, div).expect("clean should not fail");
		assert_eq!(out, vec![div]);
		let cleaned = doc.outer_html(div);
		assert!(!cleaned.contains("onclick"));
		assert!(!cleaned.contains("javascript:"));
		assert!(cleaned.contains(r#"title="kept""#));
	}

	#[test]
	fn cleaning_twice_is_a_no_op() {
		let cleaner = CleanHtml::new();
		let mut doc = Document::parse("<html><body><script>x</script><div onclick='y'>hi</div></body></html>");
		let root = doc.root();
		cleaner.apply(&mut doc, root).expect("first clean");
		let once = doc.outer_html(root);
		cleaner.apply(&mut doc, root).expect("second clean");
		assert_eq!(doc.outer_html(root), once);
	}
}
