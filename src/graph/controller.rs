use log::{debug, info};

use super::encoding::{Rgb, ServiceIcon, border_color_for, icon_for, parse_percentage};
use super::error::GraphError;
use super::filter::{FilteredSnapshot, filter};
use super::selection::Selection;
use super::snapshot::{Edge, GraphSnapshot, ServiceType};

/// Outcome of the current search, for user-facing messaging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterStatus {
	/// Empty query; the whole graph is shown.
	Unfiltered,
	/// Non-empty query with at least one matching node.
	Matches {
		/// Surviving nodes.
		nodes: usize,
		/// Surviving links.
		links: usize,
	},
	/// Non-empty query that matched nothing.
	NoMatches,
}

/// One metric row in the node inspector.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricRow {
	/// Metric name, e.g. `cpu`.
	pub name: String,
	/// Value as supplied.
	pub value: String,
	/// Parsed percentage, `None` when the value is not a percentage.
	pub percent: Option<f64>,
}

/// Inspector content for the selected node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDetails {
	/// Node id.
	pub id: String,
	/// Service type as decoded.
	pub service_type: ServiceType,
	/// Icon for the service type.
	pub icon: ServiceIcon,
	/// Error rate as supplied.
	pub error_rate: String,
	/// Encoded border color, or why the error rate was rejected.
	pub border: Result<Rgb, GraphError>,
	/// Every metric, in source order.
	pub metrics: Vec<MetricRow>,
}

/// Inspector content for the selected link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeDetails {
	/// Calling node id.
	pub source: String,
	/// Called node id.
	pub target: String,
	/// Number of calls.
	pub invocation_count: u64,
	/// Latency, verbatim.
	pub latency: String,
}

impl From<&Edge> for EdgeDetails {
	fn from(edge: &Edge) -> Self {
		Self {
			source: edge.source.clone(),
			target: edge.target.clone(),
			invocation_count: edge.invocation_count,
			latency: edge.latency.clone(),
		}
	}
}

/// Owns the live query and selection over an injected snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewController {
	snapshot: GraphSnapshot,
	query: String,
	filtered: FilteredSnapshot,
	selection: Selection,
}

impl ViewController {
	/// Controller showing the whole of `snapshot`.
	pub fn new(snapshot: GraphSnapshot) -> Self {
		info!(
			"view controller mounted with {} nodes and {} links",
			snapshot.nodes.len(),
			snapshot.links.len()
		);
		let filtered = filter(&snapshot, "");
		Self {
			snapshot,
			query: String::new(),
			filtered,
			selection: Selection::default(),
		}
	}

	/// The unfiltered snapshot.
	pub fn snapshot(&self) -> &GraphSnapshot {
		&self.snapshot
	}

	/// Current search text.
	pub fn query(&self) -> &str {
		&self.query
	}

	/// Subgraph currently handed to the rendering surface.
	pub fn filtered(&self) -> &FilteredSnapshot {
		&self.filtered
	}

	/// Current selection.
	pub fn selection(&self) -> &Selection {
		&self.selection
	}

	/// Replaces the search text and recomputes the filtered graph.
	pub fn set_query(&mut self, query: &str) -> FilterStatus {
		if query != self.query {
			self.query = query.to_string();
			self.filtered = filter(&self.snapshot, &self.query);
		}
		let status = self.status();
		debug!("query {:?}: {:?}", self.query, status);
		status
	}

	/// Match summary for the current query.
	pub fn status(&self) -> FilterStatus {
		if self.query.is_empty() {
			FilterStatus::Unfiltered
		} else if self.filtered.is_empty() {
			FilterStatus::NoMatches
		} else {
			FilterStatus::Matches {
				nodes: self.filtered.nodes.len(),
				links: self.filtered.links.len(),
			}
		}
	}

	/// Node click from the rendering surface. Returns whether the selection changed.
	pub fn click_node(&mut self, id: &str) -> bool {
		match self.selection.pick_node(&self.snapshot, id) {
			Ok(node) => {
				debug!("selected node {}", node.id);
				true
			}
			Err(miss) => {
				debug!("ignoring click: {}", miss);
				false
			}
		}
	}

	/// Link click from the rendering surface. Returns whether the selection changed.
	pub fn click_link(&mut self, source: &str, target: &str) -> bool {
		match self.selection.pick_edge(&self.snapshot, source, target) {
			Ok(edge) => {
				debug!("selected link {} -> {}", edge.source, edge.target);
				true
			}
			Err(miss) => {
				debug!("ignoring click: {}", miss);
				false
			}
		}
	}

	/// Drops the current selection.
	pub fn clear_selection(&mut self) {
		self.selection.clear();
	}

	/// Swaps in a new snapshot from the provider, keeping the live query.
	pub fn replace_snapshot(&mut self, snapshot: GraphSnapshot) {
		info!(
			"snapshot replaced: {} nodes and {} links",
			snapshot.nodes.len(),
			snapshot.links.len()
		);
		self.filtered = filter(&snapshot, &self.query);
		self.snapshot = snapshot;
		self.selection.clear();
	}

	/// Inspector content for the selected node.
	pub fn node_details(&self) -> Option<NodeDetails> {
		let node = self.selection.node()?;
		let metrics = node
			.metrics
			.iter()
			.map(|(name, value)| MetricRow {
				name: name.clone(),
				value: value.clone(),
				percent: parse_percentage(value).ok(),
			})
			.collect();
		Some(NodeDetails {
			id: node.id.clone(),
			service_type: node.service_type.clone(),
			icon: icon_for(&node.service_type),
			error_rate: node.error_rate.clone(),
			border: border_color_for(&node.error_rate),
			metrics,
		})
	}

	/// Inspector content for the selected link.
	pub fn edge_details(&self) -> Option<EdgeDetails> {
		self.selection.edge().map(EdgeDetails::from)
	}

	/// Id of the selected node, for canvas highlighting.
	pub fn selected_node_id(&self) -> Option<String> {
		self.selection.node().map(|node| node.id.clone())
	}

	/// `(source, target)` of the selected link, for canvas highlighting.
	pub fn selected_link(&self) -> Option<(String, String)> {
		self.selection
			.edge()
			.map(|edge| (edge.source.clone(), edge.target.clone()))
	}
}
