use super::error::LookupMiss;
use super::snapshot::{Edge, GraphSnapshot, Node};

/// Exact-id node lookup.
pub fn select_node<'a>(snapshot: &'a GraphSnapshot, id: &str) -> Result<&'a Node, LookupMiss> {
	snapshot.node(id).ok_or_else(|| LookupMiss::Node(id.to_string()))
}

/// Exact ordered-pair link lookup.
pub fn select_edge<'a>(
	snapshot: &'a GraphSnapshot,
	source: &str,
	target: &str,
) -> Result<&'a Edge, LookupMiss> {
	snapshot
		.link(source, target)
		.ok_or_else(|| LookupMiss::Link(source.to_string(), target.to_string()))
}

/// The node and the link currently under inspection.
///
/// The two slots are independent: picking a node keeps the last link and vice
/// versa. Entries are copies taken from the unfiltered snapshot, so they stay
/// inspectable after a search hides them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
	node: Option<Node>,
	edge: Option<Edge>,
}

impl Selection {
	/// Selected node, if any.
	pub fn node(&self) -> Option<&Node> {
		self.node.as_ref()
	}

	/// Selected link, if any.
	pub fn edge(&self) -> Option<&Edge> {
		self.edge.as_ref()
	}

	/// Looks `id` up in `snapshot`; on a miss the selection is left as is.
	pub fn pick_node(&mut self, snapshot: &GraphSnapshot, id: &str) -> Result<&Node, LookupMiss> {
		let node = select_node(snapshot, id)?;
		Ok(&*self.node.insert(node.clone()))
	}

	/// Looks the `(source, target)` link up in `snapshot`; on a miss the selection is left as is.
	pub fn pick_edge(
		&mut self,
		snapshot: &GraphSnapshot,
		source: &str,
		target: &str,
	) -> Result<&Edge, LookupMiss> {
		let edge = select_edge(snapshot, source, target)?;
		Ok(&*self.edge.insert(edge.clone()))
	}

	/// Drops both slots.
	pub fn clear(&mut self) {
		self.node = None;
		self.edge = None;
	}

	/// Nothing selected.
	pub fn is_empty(&self) -> bool {
		self.node.is_none() && self.edge.is_none()
	}
}
