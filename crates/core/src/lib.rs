//! Composable HTML document-reduction pipeline.
//!
//! A [`Pipeline`] is an ordered list of [`Stage`]s, each mapping one node of
//! a parsed HTML tree to zero or more nodes. Selecting stages ([`XPath`],
//! [`Css`]) narrow the working set to matching subtrees; the sanitizing
//! stage ([`CleanHtml`]) strips unwanted markup in place and passes its
//! node through. Running a pipeline threads nodes through the stages in
//! order, flattening between stages, and yields one final ordered node
//! list for a downstream consumer.

mod document;
mod error;
mod pipeline;
mod query;
mod stage;

pub use document::Document;
pub use error::{Error, Result};
pub use pipeline::Pipeline;
pub use stage::{CleanHtml, CleanOptions, Css, Stage, XPath};

/// Stable handle to one node of a parsed document tree.
pub use ego_tree::NodeId;
