use indexmap::IndexMap;

/// A named graph vertex paired with a numeric distance.
///
/// Inside an adjacency list the distance is the weight of the edge leading to
/// `name`; inside a traversal record it is a cumulative path distance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
	pub name: String,
	pub distance: i64,
}

impl Node {
	pub fn new(name: impl Into<String>, distance: i64) -> Self {
		Self {
			name: name.into(),
			distance,
		}
	}
}

/// Directed weighted adjacency, keyed by node name.
///
/// Insertion order is significant: the first key is the layout root and
/// serialization emits nodes in stored order. Edges are not required to be
/// symmetric, and an edge target is not required to exist as a key: layout
/// and traversal treat such dangling targets as leaves with no outgoing
/// edges.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	nodes: IndexMap<String, Vec<Node>>,
}

impl Graph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert (or fully replace) a node's outgoing edge list.
	pub fn insert(&mut self, name: impl Into<String>, edges: Vec<Node>) {
		self.nodes.insert(name.into(), edges);
	}

	/// Outgoing edges of `name`, or `None` if it is not a key.
	pub fn neighbours(&self, name: &str) -> Option<&[Node]> {
		self.nodes.get(name).map(Vec::as_slice)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.nodes.contains_key(name)
	}

	/// The arbitrary traversal root: the first key in insertion order.
	pub fn first_key(&self) -> Option<&str> {
		self.nodes.keys().next().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &[Node])> {
		self.nodes
			.iter()
			.map(|(k, v)| (k.as_str(), v.as_slice()))
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// The default demo graph seeded into the editor on startup.
	pub fn sample() -> Self {
		let mut graph = Self::new();
		graph.insert(
			"A",
			vec![Node::new("S", 3), Node::new("B", 4), Node::new("D", 5)],
		);
		graph.insert(
			"B",
			vec![Node::new("C", 2), Node::new("A", 4), Node::new("D", 6)],
		);
		graph.insert("C", vec![Node::new("B", 2)]);
		graph.insert(
			"D",
			vec![
				Node::new("E", 2),
				Node::new("A", 5),
				Node::new("B", 6),
				Node::new("S", 10),
			],
		);
		graph.insert("E", vec![Node::new("D", 2), Node::new("F", 4)]);
		graph.insert("F", vec![Node::new("G", 3), Node::new("E", 4)]);
		graph.insert("G", vec![Node::new("F", 3)]);
		graph.insert("S", vec![Node::new("A", 3), Node::new("D", 10)]);
		graph
	}
}
