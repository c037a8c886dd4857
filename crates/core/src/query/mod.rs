//! Structural query engine: an XPath subset evaluated over the HTML tree.
//!
//! Supported syntax: absolute (`/a/b`, `//a`) and relative location paths,
//! `/` (child) and `//` (descendant) separators, `.` self steps, `*` and
//! name node tests, and the predicates `[n]`, `[@attr]`, `[@attr='v']`,
//! and `[contains(@attr,'v')]`. Results are element handles; attribute
//! and text selection are not part of the dialect.

mod eval;
mod parser;

pub(crate) use eval::evaluate;
pub(crate) use parser::parse;

/// A parsed location path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Path {
	pub(crate) absolute: bool,
	pub(crate) steps: Vec<Step>,
}

/// One location step: axis, node test, and predicates applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Step {
	pub(crate) axis: Axis,
	pub(crate) test: NameTest,
	pub(crate) predicates: Vec<Predicate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
	Child,
	Descendant,
	SelfNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NameTest {
	Any,
	Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Predicate {
	Position(usize),
	HasAttr(String),
	AttrEq(String, String),
	AttrContains(String, String),
}
