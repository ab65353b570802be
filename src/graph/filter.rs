use std::collections::HashSet;
use std::ops::Deref;

use super::snapshot::GraphSnapshot;

/// Read-only subgraph of a snapshot matching a search query.
///
/// Dereferences to [`GraphSnapshot`] so it can be rendered or filtered again.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilteredSnapshot(GraphSnapshot);

impl FilteredSnapshot {
	/// The filtered graph as a plain snapshot.
	pub fn snapshot(&self) -> &GraphSnapshot {
		&self.0
	}
}

impl Deref for FilteredSnapshot {
	type Target = GraphSnapshot;

	fn deref(&self) -> &GraphSnapshot {
		&self.0
	}
}

/// Nodes whose id contains `query` (case-insensitive) and the links between them.
///
/// An empty query keeps everything. Ordering follows the input snapshot.
pub fn filter(snapshot: &GraphSnapshot, query: &str) -> FilteredSnapshot {
	let needle = query.to_lowercase();
	let nodes: Vec<_> = snapshot
		.nodes
		.iter()
		.filter(|node| needle.is_empty() || node.id.to_lowercase().contains(&needle))
		.cloned()
		.collect();

	let kept: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
	let links = snapshot
		.links
		.iter()
		.filter(|link| kept.contains(link.source.as_str()) && kept.contains(link.target.as_str()))
		.cloned()
		.collect();

	FilteredSnapshot(GraphSnapshot { nodes, links })
}
