//! Ordered stage composition with fan-out/flatten semantics.

use ego_tree::NodeId;
use tracing::debug;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::stage::Stage;

/// An ordered sequence of stages.
///
/// Configuration order is execution order; stages are never deduplicated
/// or reordered. A pipeline holds no per-run state and can be reused
/// across many documents.
#[derive(Debug, Default)]
pub struct Pipeline {
	stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
	pub fn new() -> Self {
		Self { stages: Vec::new() }
	}

	/// Appends a stage, preserving insertion order.
	pub fn with_stage(mut self, stage: impl Stage + 'static) -> Self {
		self.stages.push(Box::new(stage));
		self
	}

	/// Appends an already boxed stage.
	pub fn push(&mut self, stage: Box<dyn Stage>) {
		self.stages.push(stage);
	}

	pub fn len(&self) -> usize {
		self.stages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.stages.is_empty()
	}

	/// Threads `initial` through every stage in order.
	///
	/// Each stage is applied to every current node in order and the
	/// per-node results are concatenated; the concatenation becomes the
	/// next stage's input. An empty working set does not short-circuit:
	/// remaining stages still run, each over zero nodes. The first stage
	/// error aborts the run with no partial output, wrapped with the
	/// failing stage's position and label.
	pub fn run(&self, doc: &mut Document, initial: &[NodeId]) -> Result<Vec<NodeId>> {
		let mut current = initial.to_vec();
		for (index, stage) in self.stages.iter().enumerate() {
			let mut next = Vec::new();
			for &node in &current {
				let produced = stage.apply(doc, node).map_err(|source| Error::Stage {
					index,
					label: stage.label(),
					source: Box::new(source),
				})?;
				next.extend(produced);
			}
			debug!(
				target = "domsieve",
				index,
				stage = %stage.label(),
				input = current.len(),
				output = next.len(),
				"stage applied"
			);
			current = next;
		}
		Ok(current)
	}

	/// Runs the pipeline seeded with the document's root element.
	pub fn run_document(&self, doc: &mut Document) -> Result<Vec<NodeId>> {
		let root = doc.root();
		self.run(doc, &[root])
	}
}
