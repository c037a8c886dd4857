//! Parsing of command-line stage specifiers into pipeline stages.

use anyhow::{Result, anyhow};
use domsieve::{CleanHtml, CleanOptions, Css, Pipeline, Stage, XPath};

/// Builds a pipeline from stage specifiers, preserving their order.
pub fn build_pipeline(specs: &[String]) -> Result<Pipeline> {
	let mut pipeline = Pipeline::new();
	for spec in specs {
		pipeline.push(parse_stage(spec)?);
	}
	Ok(pipeline)
}

/// Parses one stage specifier.
///
/// Forms: `clean`, `clean:tag1,tag2`, `xpath:EXPR`, `css:SELECTOR`.
pub fn parse_stage(spec: &str) -> Result<Box<dyn Stage>> {
	let (kind, rest) = match spec.split_once(':') {
		Some((kind, rest)) => (kind, Some(rest)),
		None => (spec, None),
	};

	match kind {
		"clean" => {
			let mut options = CleanOptions::new();
			if let Some(tags) = rest {
				for tag in tags.split(',').map(str::trim).filter(|t| !t.is_empty()) {
					options = options.with_kill_tag(tag);
				}
			}
			let stage = CleanHtml::with_options(options)?;
			Ok(Box::new(stage))
		}
		"xpath" => match rest {
			Some(query) if !query.is_empty() => Ok(Box::new(XPath::new(query))),
			_ => Err(anyhow!("xpath stage needs a query, e.g. xpath://div")),
		},
		"css" => match rest {
			Some(selector) if !selector.is_empty() => Ok(Box::new(Css::new(selector))),
			_ => Err(anyhow!("css stage needs a selector, e.g. css:div.content")),
		},
		other => Err(anyhow!("unknown stage kind {other:?} (expected clean, xpath, or css)")),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_each_stage_kind() {
		assert_eq!(parse_stage("clean").unwrap().label(), "CleanHTML");
		assert_eq!(parse_stage("xpath://div").unwrap().label(), "XPath(//div)");
		assert_eq!(parse_stage("css:div.content").unwrap().label(), "CSS(div.content)");
	}

	#[test]
	fn clean_accepts_extra_kill_tags() {
		assert!(parse_stage("clean:nav,footer").is_ok());
	}

	#[test]
	fn clean_rejects_invalid_kill_tags() {
		assert!(parse_stage("clean:not a tag").is_err());
	}

	#[test]
	fn rejects_unknown_and_incomplete_specs() {
		assert!(parse_stage("sort").is_err());
		assert!(parse_stage("xpath:").is_err());
		assert!(parse_stage("css:").is_err());
	}

	#[test]
	fn pipeline_preserves_spec_order() {
		let specs = vec!["clean".to_string(), "css:p".to_string()];
		let pipeline = build_pipeline(&specs).unwrap();
		assert_eq!(pipeline.len(), 2);
	}
}
