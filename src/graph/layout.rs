//! Row-based layout: nodes are grouped into horizontal rows by breadth-first
//! distance from the graph's first key and spaced evenly across the width.

use std::collections::{HashMap, HashSet, VecDeque};

use indexmap::IndexMap;

use super::model::Graph;

/// Vertical distance between rows, and the bottom margin below the last row.
pub const ROW_OFFSET: f64 = 100.0;

/// A node's canvas position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pos {
	pub x: f64,
	pub y: f64,
}

/// Canvas positions for every node reachable from the layout root.
#[derive(Clone, Debug, Default)]
pub struct Layout {
	positions: IndexMap<String, Pos>,
	width: f64,
	height: f64,
}

impl Layout {
	/// Lay out `graph` across `width` pixels, expanding breadth-first from
	/// the first key.
	///
	/// A node's row is one past its discoverer's row, bumped an extra step
	/// when an earlier-queued sibling of the same parent can itself reach
	/// the node (reduces edge crossings when a node is reachable through
	/// multiple branches). Nodes unreachable from the root get no position.
	pub fn build(graph: &Graph, width: f64) -> Self {
		let mut positions = IndexMap::new();
		let mut height = 0.0;

		let Some(root) = graph.first_key() else {
			return Self {
				positions,
				width,
				height,
			};
		};

		let mut queue: VecDeque<(String, usize)> = VecDeque::new();
		queue.push_back((root.to_string(), 0));
		let mut visited: HashSet<String> = HashSet::new();
		let mut per_row: HashMap<usize, usize> = HashMap::new();
		let mut placed: Vec<(String, usize, usize)> = Vec::new();

		while let Some((key, row)) = queue.pop_front() {
			if !visited.insert(key.clone()) {
				continue;
			}
			let slot = *per_row.entry(row).and_modify(|n| *n += 1).or_insert(1) - 1;
			placed.push((key.clone(), row, slot));

			// Dangling edge targets have no adjacency of their own.
			let neighbours = graph.neighbours(&key).unwrap_or(&[]);
			let mut added: Vec<&str> = Vec::new();
			for node in neighbours {
				let crossing = added.iter().any(|sibling| {
					graph
						.neighbours(sibling)
						.unwrap_or(&[])
						.iter()
						.any(|n| n.name == node.name)
				});
				queue.push_back((node.name.clone(), row + 1 + usize::from(crossing)));
				added.push(&node.name);
			}
		}

		for (key, row, slot) in placed {
			let y = (row as f64 + 1.0) * ROW_OFFSET;
			let in_row = per_row[&row] as f64;
			let x = width / (in_row + 1.0) * (slot as f64 + 1.0);
			positions.insert(key, Pos { x, y });
			if y > height {
				height = y;
			}
		}
		if !positions.is_empty() {
			height += ROW_OFFSET;
		}

		Self {
			positions,
			width,
			height,
		}
	}

	pub fn get(&self, name: &str) -> Option<Pos> {
		self.positions.get(name).copied()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.positions.contains_key(name)
	}

	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}

	pub fn len(&self) -> usize {
		self.positions.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, Pos)> {
		self.positions.iter().map(|(k, p)| (k.as_str(), *p))
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	/// Canvas height needed to fit the deepest row plus a bottom margin.
	pub fn height(&self) -> f64 {
		self.height
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;
	use crate::graph::text::parse;

	#[test]
	fn empty_graph_has_no_positions() {
		let layout = Layout::build(&Graph::default(), 800.0);
		assert!(layout.is_empty());
		assert_eq!(layout.height(), 0.0);
	}

	#[test]
	fn sample_graph_places_every_reachable_node() {
		let graph = Graph::sample();
		let layout = Layout::build(&graph, 800.0);
		assert_eq!(layout.len(), graph.len());

		// Root sits alone on the first row, centered.
		assert_eq!(layout.get("A"), Some(Pos { x: 400.0, y: 100.0 }));

		// All positions stay inside the canvas.
		for (_, pos) in layout.iter() {
			assert!(pos.x > 0.0 && pos.x < 800.0);
			assert!(pos.y >= 100.0 && pos.y <= layout.height() - ROW_OFFSET + 1.0);
		}
		assert_eq!(layout.height(), 700.0);
	}

	#[test]
	fn nodes_in_a_row_never_share_an_x() {
		let layout = Layout::build(&Graph::sample(), 800.0);
		let mut by_row: HashMap<i64, Vec<f64>> = HashMap::new();
		for (_, pos) in layout.iter() {
			by_row.entry(pos.y as i64).or_default().push(pos.x);
		}
		for xs in by_row.values() {
			let mut sorted = xs.clone();
			sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
			sorted.dedup();
			assert_eq!(sorted.len(), xs.len());
		}
	}

	#[test]
	fn sibling_reachable_target_drops_an_extra_row() {
		// C is a neighbour of A but also reachable through B, which was
		// queued first, so C lands two rows below A instead of one.
		let graph = parse("A: B(1), C(2)\nB: C(5)\nC:\n").unwrap();
		let layout = Layout::build(&graph, 600.0);
		assert_eq!(layout.get("A").unwrap().y, 100.0);
		assert_eq!(layout.get("B").unwrap().y, 200.0);
		assert_eq!(layout.get("C").unwrap().y, 300.0);
	}

	#[test]
	fn unreachable_nodes_are_omitted() {
		let graph = parse("A: B(1)\nB:\nZ: A(1)\n").unwrap();
		let layout = Layout::build(&graph, 600.0);
		assert_eq!(layout.len(), 2);
		assert!(!layout.contains("Z"));
	}

	#[test]
	fn self_loops_are_deduplicated() {
		let graph = parse("A: A(1), B(2)\nB:\n").unwrap();
		let layout = Layout::build(&graph, 600.0);
		assert_eq!(layout.len(), 2);
	}

	#[test]
	fn dangling_targets_are_placed_but_not_expanded() {
		let graph = parse("A: X(1)\n").unwrap();
		let layout = Layout::build(&graph, 600.0);
		assert_eq!(layout.len(), 2);
		assert!(layout.contains("X"));
	}
}
