//! Evaluation of parsed location paths against the document tree.

use std::collections::{HashMap, HashSet};

use ego_tree::{NodeId, NodeRef};
use scraper::Node;

use crate::document::Document;
use crate::query::{Axis, NameTest, Path, Predicate, Step};

/// Evaluates `path` rooted at `context`, returning matches in evaluation
/// order with duplicates removed.
///
/// Absolute paths evaluate from the document root regardless of the
/// context node, matching lxml semantics.
pub(crate) fn evaluate(path: &Path, doc: &Document, context: NodeId) -> Vec<NodeId> {
	let tree = doc.tree();
	let start = if path.absolute { tree.root().id() } else { context };

	let mut current = vec![start];
	for step in &path.steps {
		let mut next = Vec::new();
		let mut seen = HashSet::new();
		for &ctx in &current {
			let Some(ctx_ref) = tree.get(ctx) else { continue };
			let mut candidates = collect_candidates(ctx_ref, step);
			for predicate in &step.predicates {
				candidates = apply_predicate(doc, candidates, predicate);
			}
			for id in candidates {
				if seen.insert(id) {
					next.push(id);
				}
			}
		}
		current = next;
	}
	current
}

fn collect_candidates(ctx: NodeRef<'_, Node>, step: &Step) -> Vec<NodeId> {
	match step.axis {
		Axis::SelfNode => vec![ctx.id()],
		Axis::Child => ctx.children().filter(|n| matches_test(n, &step.test)).map(|n| n.id()).collect(),
		Axis::Descendant => {
			ctx.descendants().skip(1).filter(|n| matches_test(n, &step.test)).map(|n| n.id()).collect()
		}
	}
}

fn matches_test(node: &NodeRef<'_, Node>, test: &NameTest) -> bool {
	let Node::Element(element) = node.value() else {
		return false;
	};
	match test {
		NameTest::Any => true,
		NameTest::Name(name) => element.name() == name,
	}
}

fn apply_predicate(doc: &Document, candidates: Vec<NodeId>, predicate: &Predicate) -> Vec<NodeId> {
	match predicate {
		// Position counts within each parent's node list, so a descendant
		// query like `//li[2]` keeps the second `li` of every parent.
		Predicate::Position(position) => {
			let mut per_parent: HashMap<Option<NodeId>, usize> = HashMap::new();
			candidates
				.into_iter()
				.filter(|&id| {
					let parent = doc.tree().get(id).and_then(|n| n.parent()).map(|p| p.id());
					let count = per_parent.entry(parent).or_insert(0);
					*count += 1;
					*count == *position
				})
				.collect()
		}
		Predicate::HasAttr(attr) => {
			candidates.into_iter().filter(|&id| attribute(doc, id, attr).is_some()).collect()
		}
		Predicate::AttrEq(attr, value) => candidates
			.into_iter()
			.filter(|&id| attribute(doc, id, attr).is_some_and(|v| v == *value))
			.collect(),
		Predicate::AttrContains(attr, value) => candidates
			.into_iter()
			.filter(|&id| attribute(doc, id, attr).is_some_and(|v| v.contains(value.as_str())))
			.collect(),
	}
}

fn attribute(doc: &Document, id: NodeId, attr: &str) -> Option<String> {
	let node = doc.tree().get(id)?;
	let Node::Element(element) = node.value() else {
		return None;
	};
	element.attr(attr).map(ToString::to_string)
}
