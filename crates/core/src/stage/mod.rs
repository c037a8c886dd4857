//! Transformation stages: one node in, zero or more nodes out.

mod clean;
mod css;
mod xpath;

pub use clean::{CleanHtml, CleanOptions};
pub use css::Css;
pub use xpath::XPath;

use ego_tree::NodeId;

use crate::document::Document;
use crate::error::Result;

/// A single document-reduction step.
///
/// Stages are configured once and hold no per-run state; any variant
/// exposing this contract participates in a [`crate::Pipeline`]
/// interchangeably. Selecting stages must not mutate the tree; the
/// sanitizing stage mutates in place and returns the node it was given.
pub trait Stage: std::fmt::Debug + Send + Sync {
	/// Maps one node to an ordered, possibly empty list of nodes.
	fn apply(&self, doc: &mut Document, node: NodeId) -> Result<Vec<NodeId>>;

	/// Short descriptive label used in logs and error context.
	fn label(&self) -> String;
}
