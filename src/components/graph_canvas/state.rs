use crate::graph::{Graph, Layout};

/// The canvas-side view state: the current graph and the layout computed
/// for the current canvas width. Rebuilt wholesale on resize and on every
/// editor save; traversal runs snapshot both before they start animating.
pub struct GraphView {
	pub graph: Graph,
	pub layout: Layout,
}

impl GraphView {
	pub fn new(graph: Graph, width: f64) -> Self {
		let layout = Layout::build(&graph, width);
		Self { graph, layout }
	}

	/// Recompute positions for a new canvas width.
	pub fn resize(&mut self, width: f64) {
		self.layout = Layout::build(&self.graph, width);
	}

	/// Full graph replacement (editor save), relaid out at the current width.
	pub fn replace(&mut self, graph: Graph) {
		let width = self.layout.width();
		self.graph = graph;
		self.layout = Layout::build(&self.graph, width);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::text::parse;

	#[test]
	fn replace_relayouts_at_the_current_width() {
		let mut view = GraphView::new(Graph::sample(), 900.0);
		assert_eq!(view.layout.len(), 8);

		view.replace(parse("A: B(1)\nB:\n").unwrap());
		assert_eq!(view.layout.len(), 2);
		assert_eq!(view.layout.width(), 900.0);
		assert_eq!(view.layout.get("A").unwrap().x, 450.0);
	}

	#[test]
	fn replace_with_empty_graph_clears_the_layout() {
		let mut view = GraphView::new(Graph::sample(), 800.0);
		view.replace(Graph::default());
		assert!(view.layout.is_empty());
	}
}
