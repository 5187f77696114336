//! Stack-based graph walks. All three produce replayable step sequences and
//! never touch shared state; the animator owns pacing and cancellation.

use thiserror::Error;

use super::model::{Graph, Node};

/// A search-phase step: a node the moment it is popped, with the cumulative
/// distance resolved for it at that point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Visit {
	pub name: String,
	pub distance: i64,
}

/// A base-render step: one edge draw of the full-graph sweep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeVisit {
	pub from: String,
	pub to: String,
	pub weight: i64,
	/// The target was already drawn once; the sweep re-draws the edge but
	/// does not expand the node again (and the animator does not pause).
	pub revisit: bool,
}

/// Everything a finished traversal leaves behind: the visit order for the
/// search-phase animation, the start→end path for the replay phase, and
/// whether the search stopped early because it popped the end node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraversalRun {
	pub visits: Vec<Visit>,
	pub path: Vec<String>,
	pub halted_on_end: bool,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TraverseError {
	#[error("no path from `{start}` to `{end}`")]
	NoPath { start: String, end: String },
}

struct Frame {
	last: String,
	current: String,
	distance: i64,
}

/// Neighbours sorted descending by edge weight, so that the stack pops the
/// cheapest edge first. Sorts a copy; the adjacency list itself keeps its
/// stored order.
fn descending(edges: &[Node]) -> Vec<Node> {
	let mut edges = edges.to_vec();
	edges.sort_by(|a, b| b.distance.cmp(&a.distance));
	edges
}

/// Targets with no adjacency entry of their own are treated as leaves.
fn leaves(graph: &Graph, name: &str) -> Vec<Node> {
	descending(graph.neighbours(name).unwrap_or(&[]))
}

/// The full-graph sweep behind the base render: depth-first from the first
/// key, emitting every edge as it is popped. Already-drawn targets still get
/// their edge emitted (marked `revisit`) but are not expanded.
pub fn walk_edges(graph: &Graph) -> Vec<EdgeVisit> {
	let mut steps = Vec::new();
	let Some(root) = graph.first_key() else {
		return steps;
	};

	let mut stack = vec![Frame {
		last: root.to_string(),
		current: root.to_string(),
		distance: 0,
	}];
	let mut visited: Vec<String> = Vec::new();

	while let Some(frame) = stack.pop() {
		let revisit = visited.contains(&frame.current);
		steps.push(EdgeVisit {
			from: frame.last,
			to: frame.current.clone(),
			weight: frame.distance,
			revisit,
		});
		if revisit {
			continue;
		}
		visited.push(frame.current.clone());

		for node in leaves(graph, &frame.current) {
			stack.push(Frame {
				last: frame.current.clone(),
				current: node.name,
				distance: node.distance,
			});
		}
	}
	steps
}

/// Depth-first search for *some* path from `start` to `end`.
///
/// The first pop of a node fixes its cumulative distance for good, even when
/// a cheaper route exists later; this search does not optimize for shortest
/// path. The current branch is tracked on a path stack: backtracking to a
/// node already on it pops the stack down to that node before the new branch
/// is appended, which reconstructs the walked path without parent pointers.
/// Never fails on an unreachable end; the run simply finishes having visited
/// everything reachable.
pub fn dfs_path(graph: &Graph, start: &str, end: &str) -> TraversalRun {
	let mut visits: Vec<Visit> = Vec::new();
	let mut path: Vec<String> = Vec::new();
	let mut halted_on_end = false;

	let mut stack = vec![Frame {
		last: start.to_string(),
		current: start.to_string(),
		distance: 0,
	}];

	while let Some(frame) = stack.pop() {
		let Frame {
			last,
			current,
			distance,
		} = frame;
		if visits.iter().any(|v| v.name == current) {
			continue;
		}

		let base = visits
			.iter()
			.find(|v| v.name == last)
			.map_or(0, |v| v.distance);
		visits.push(Visit {
			name: current.clone(),
			distance: base + distance,
		});

		if path.contains(&last) {
			while path.contains(&last) {
				path.pop();
			}
			path.push(last);
		}
		path.push(current.clone());

		for node in leaves(graph, &current) {
			stack.push(Frame {
				last: current.clone(),
				current: node.name,
				distance: node.distance,
			});
		}
		if current == end {
			halted_on_end = true;
			break;
		}
	}

	TraversalRun {
		visits,
		path,
		halted_on_end,
	}
}

struct RelaxFrame {
	last: Option<String>,
	current: String,
	distance: i64,
}

struct Record {
	name: String,
	distance: i64,
	parent: Option<String>,
}

/// Shortest path by total edge weight, computed with a stack-based
/// relaxation rather than a priority queue.
///
/// A popped frame is skipped only when the node's recorded distance is
/// strictly better than the incoming one; otherwise the record is
/// overwritten and the node re-expanded, so a node can be visited and
/// improved several times before the stack drains. The result is exact,
/// the work bound is not. Termination relies on every cycle having positive
/// total weight, which the text parser enforces. The path is recovered by
/// walking parent pointers
/// back from `end`; an end that was never reached is an explicit
/// [`TraverseError::NoPath`].
pub fn shortest_dfs(graph: &Graph, start: &str, end: &str) -> Result<TraversalRun, TraverseError> {
	let mut visits: Vec<Visit> = Vec::new();
	let mut records: Vec<Record> = Vec::new();

	let mut stack = vec![RelaxFrame {
		last: None,
		current: start.to_string(),
		distance: 0,
	}];

	while let Some(frame) = stack.pop() {
		let RelaxFrame {
			last,
			current,
			distance,
		} = frame;
		if let Some(record) = records.iter_mut().find(|r| r.name == current) {
			if record.distance < distance {
				continue;
			}
			record.distance = distance;
			record.parent = last;
		} else {
			records.push(Record {
				name: current.clone(),
				distance,
				parent: last,
			});
		}
		visits.push(Visit {
			name: current.clone(),
			distance,
		});

		for node in leaves(graph, &current) {
			stack.push(RelaxFrame {
				last: Some(current.clone()),
				current: node.name,
				distance: distance + node.distance,
			});
		}
	}

	let mut path = Vec::new();
	let mut key = Some(end.to_string());
	while let Some(name) = key {
		let record = records
			.iter()
			.find(|r| r.name == name)
			.ok_or_else(|| TraverseError::NoPath {
				start: start.to_string(),
				end: end.to_string(),
			})?;
		path.push(record.name.clone());
		key = record.parent.clone();
	}
	path.reverse();

	Ok(TraversalRun {
		visits,
		path,
		halted_on_end: false,
	})
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;
	use crate::graph::text::parse;

	fn names(visits: &[Visit]) -> Vec<&str> {
		visits.iter().map(|v| v.name.as_str()).collect()
	}

	/// Exhaustive reference: plain Bellman-Ford over every stored edge.
	fn bellman_ford(graph: &Graph, start: &str) -> HashMap<String, i64> {
		let mut dist = HashMap::new();
		dist.insert(start.to_string(), 0i64);
		for _ in 0..graph.len() {
			for (from, edges) in graph.iter() {
				let Some(&d) = dist.get(from) else { continue };
				for edge in edges {
					let next = d + edge.distance;
					let entry = dist.entry(edge.name.clone()).or_insert(next);
					if next < *entry {
						*entry = next;
					}
				}
			}
		}
		dist
	}

	fn path_weight(graph: &Graph, path: &[String]) -> i64 {
		path.windows(2)
			.map(|pair| {
				graph
					.neighbours(&pair[0])
					.unwrap()
					.iter()
					.find(|n| n.name == pair[1])
					.unwrap()
					.distance
			})
			.sum()
	}

	#[test]
	fn walk_edges_covers_the_graph_once() {
		let graph = parse("A: B(2), C(1)\nB: A(2)\nC:\n").unwrap();
		let steps = walk_edges(&graph);
		assert_eq!(
			steps,
			vec![
				EdgeVisit {
					from: "A".into(),
					to: "A".into(),
					weight: 0,
					revisit: false
				},
				EdgeVisit {
					from: "A".into(),
					to: "C".into(),
					weight: 1,
					revisit: false
				},
				EdgeVisit {
					from: "A".into(),
					to: "B".into(),
					weight: 2,
					revisit: false
				},
				EdgeVisit {
					from: "B".into(),
					to: "A".into(),
					weight: 2,
					revisit: true
				},
			]
		);
	}

	#[test]
	fn walk_edges_on_empty_graph_is_empty() {
		assert!(walk_edges(&Graph::default()).is_empty());
	}

	#[test]
	fn dfs_pops_the_cheapest_neighbour_first() {
		let graph = parse("A: B(5), C(1)\nB:\nC:\n").unwrap();
		let run = dfs_path(&graph, "A", "B");
		assert_eq!(names(&run.visits), vec!["A", "C", "B"]);
		assert!(run.halted_on_end);
	}

	#[test]
	fn dfs_path_through_the_sample_graph() {
		let run = dfs_path(&Graph::sample(), "S", "D");
		assert_eq!(names(&run.visits), vec!["S", "A", "B", "C", "D"]);
		assert_eq!(run.path, vec!["S", "A", "B", "D"]);
		assert!(run.halted_on_end);

		// The first pop fixes D's distance via B even though S→A→D (8) and
		// S→D (10) are both cheaper. Known-suboptimal, by contract.
		assert_eq!(run.visits.last().unwrap(), &Visit {
			name: "D".into(),
			distance: 13,
		});
	}

	#[test]
	fn dfs_replayed_path_always_begins_at_start() {
		let graph = Graph::sample();
		for end in ["A", "C", "G", "S"] {
			let run = dfs_path(&graph, "S", end);
			assert_eq!(run.path.first().map(String::as_str), Some("S"));
			assert!(run.visits.iter().any(|v| v.name == end));
		}
	}

	#[test]
	fn dfs_with_unreachable_end_visits_everything_and_keeps_going() {
		let graph = parse("A: B(1)\nB:\nQ: A(1)\n").unwrap();
		let run = dfs_path(&graph, "A", "Q");
		assert_eq!(names(&run.visits), vec!["A", "B"]);
		assert!(!run.halted_on_end);
		assert_eq!(run.path, vec!["A", "B"]);
	}

	#[test]
	fn shortest_dfs_finds_the_cheaper_indirect_route() {
		let graph = parse("A: S(3), B(4), D(5)\nS: A(3), D(10)\nD: A(5)\n").unwrap();
		let run = shortest_dfs(&graph, "S", "D").unwrap();
		assert_eq!(run.path, vec!["S", "A", "D"]);
		assert_eq!(path_weight(&graph, &run.path), 8);

		let final_d = run.visits.iter().rev().find(|v| v.name == "D").unwrap();
		assert_eq!(final_d.distance, 8);
	}

	#[test]
	fn shortest_dfs_matches_bellman_ford_on_the_sample_graph() {
		let graph = Graph::sample();
		let reference = bellman_ford(&graph, "S");
		for end in ["A", "B", "C", "D", "E", "F", "G"] {
			let run = shortest_dfs(&graph, "S", end).unwrap();
			assert_eq!(
				path_weight(&graph, &run.path),
				reference[end],
				"shortest S→{end}"
			);
			assert_eq!(run.path.first().map(String::as_str), Some("S"));
			assert_eq!(run.path.last().map(String::as_str), Some(end));
		}
	}

	#[test]
	fn shortest_dfs_improves_an_early_overestimate() {
		// A (edge 1) is popped before B (edge 2), so B is first reached
		// through A at distance 11 and corrected to 2 afterwards.
		let graph = parse("S: A(1), B(2)\nA: B(10)\nB:\n").unwrap();
		let run = shortest_dfs(&graph, "S", "B").unwrap();

		let b_visits: Vec<i64> = run
			.visits
			.iter()
			.filter(|v| v.name == "B")
			.map(|v| v.distance)
			.collect();
		assert_eq!(b_visits, vec![11, 2]);
		assert_eq!(run.path, vec!["S", "B"]);
	}

	#[test]
	fn shortest_dfs_reports_no_path_explicitly() {
		let graph = parse("A: B(1)\nB:\nQ: A(1)\n").unwrap();
		assert_eq!(
			shortest_dfs(&graph, "A", "Q"),
			Err(TraverseError::NoPath {
				start: "A".into(),
				end: "Q".into(),
			})
		);
	}
}
