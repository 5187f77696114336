//! Text serialization of the adjacency map, one line per source node:
//! `NAME: TARGET(WEIGHT), TARGET(WEIGHT), ...`

use thiserror::Error;

use super::model::{Graph, Node};

/// Failure to parse the graph editor text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
	#[error("line {line}: missing `:` after node name")]
	MissingColon { line: usize },
	#[error("line {line}: edge `{edge}` is missing a `(WEIGHT)` suffix")]
	MissingWeight { line: usize, edge: String },
	#[error("line {line}: `{weight}` is not a valid edge weight")]
	BadWeight { line: usize, weight: String },
	#[error("line {line}: edge weight must be positive, got {weight}")]
	NonPositiveWeight { line: usize, weight: i64 },
}

/// Parse editor text into a [`Graph`].
///
/// Lines are trimmed and blank lines skipped. Weights must be positive
/// base-10 integers; the traversals rely on every cycle having positive
/// total weight to terminate. Each node's edges come out sorted ascending
/// by weight, so a serialize→parse→serialize cycle is a fixed point even
/// though the first serialization emits insertion order.
pub fn parse(text: &str) -> Result<Graph, ParseError> {
	let mut graph = Graph::new();

	for (idx, raw) in text.lines().enumerate() {
		let line = raw.trim();
		if line.is_empty() {
			continue;
		}
		let lineno = idx + 1;

		let (key, rest) = line
			.split_once(':')
			.ok_or(ParseError::MissingColon { line: lineno })?;
		let key = key.trim();

		let mut edges = Vec::new();
		for segment in rest.split(',') {
			let segment = segment.trim();
			if segment.is_empty() {
				continue;
			}
			let (name, weight) =
				segment
					.split_once('(')
					.ok_or_else(|| ParseError::MissingWeight {
						line: lineno,
						edge: segment.to_string(),
					})?;
			let weight = weight.trim().trim_end_matches(')').trim();
			let distance = weight
				.parse::<i64>()
				.map_err(|_| ParseError::BadWeight {
					line: lineno,
					weight: weight.to_string(),
				})?;
			// A cycle of zero or negative total weight would keep the
			// shortest-path relaxation improving forever.
			if distance <= 0 {
				return Err(ParseError::NonPositiveWeight {
					line: lineno,
					weight: distance,
				});
			}
			edges.push(Node::new(name.trim(), distance));
		}
		edges.sort_by_key(|node| node.distance);

		graph.insert(key, edges);
	}

	Ok(graph)
}

/// Serialize a [`Graph`] back to editor text, edges in stored order.
pub fn serialize(graph: &Graph) -> String {
	let mut text = String::new();
	for (key, edges) in graph.iter() {
		let line = edges
			.iter()
			.map(|node| format!("{}({})", node.name, node.distance))
			.collect::<Vec<_>>()
			.join(", ");
		text.push_str(&format!("{key}: {line}\n"));
	}
	text
}
