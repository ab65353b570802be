use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::error::GraphError;

/// Kind of service a node represents. Drives the icon lookup only.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceType {
	/// HTTP/RPC entry point.
	Api,
	/// Persistent store.
	Database,
	/// In-memory cache.
	Cache,
	/// Background job runner.
	Worker,
	/// User-facing client.
	Frontend,
	/// Anything the lookup table does not know about; keeps the wire name.
	Unknown(String),
}

impl ServiceType {
	/// Every known service type, in display order.
	pub const ALL: [Self; 5] = [
		Self::Api,
		Self::Database,
		Self::Cache,
		Self::Worker,
		Self::Frontend,
	];

	/// Wire name, as it appears in the `serviceType` field.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Api => "API",
			Self::Database => "Database",
			Self::Cache => "Cache",
			Self::Worker => "Worker",
			Self::Frontend => "Frontend",
			Self::Unknown(name) => name,
		}
	}

	/// Lenient parse; unrecognised names become [`ServiceType::Unknown`].
	pub fn from_name(name: &str) -> Self {
		Self::known(name).unwrap_or_else(|| Self::Unknown(name.to_string()))
	}

	fn known(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|ty| ty.as_str() == name)
	}
}

impl From<String> for ServiceType {
	fn from(name: String) -> Self {
		Self::known(&name).unwrap_or(Self::Unknown(name))
	}
}

impl From<ServiceType> for String {
	fn from(ty: ServiceType) -> Self {
		match ty {
			ServiceType::Unknown(name) => name,
			known => known.as_str().to_string(),
		}
	}
}

impl fmt::Display for ServiceType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A service in the dependency graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
	/// Unique, stable key within a snapshot.
	pub id: String,
	/// Metric name to percentage string, e.g. `"cpu" -> "80%"`, in source order.
	#[serde(default)]
	pub metrics: IndexMap<String, String>,
	/// Percentage string, e.g. `"5%"`.
	pub error_rate: String,
	/// Selects the icon.
	pub service_type: ServiceType,
}

impl Node {
	/// Node with no metrics.
	pub fn new(id: impl Into<String>, service_type: ServiceType, error_rate: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			metrics: IndexMap::new(),
			error_rate: error_rate.into(),
			service_type,
		}
	}

	/// Builder-style metric insertion.
	pub fn with_metric(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.metrics.insert(name.into(), value.into());
		self
	}
}

/// A directed call from `source` to `target`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
	/// Calling node id.
	pub source: String,
	/// Called node id.
	pub target: String,
	/// Number of calls observed.
	pub invocation_count: u64,
	/// Latency with its unit suffix, e.g. `"200ms"`. Displayed verbatim.
	pub latency: String,
}

impl Edge {
	/// Edge between two node ids.
	pub fn new(
		source: impl Into<String>,
		target: impl Into<String>,
		invocation_count: u64,
		latency: impl Into<String>,
	) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			invocation_count,
			latency: latency.into(),
		}
	}

	/// True if this edge goes from `source` to `target`.
	pub fn connects(&self, source: &str, target: &str) -> bool {
		self.source == source && self.target == target
	}
}

/// Immutable point-in-time graph. Field names match the rendering wire shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
	/// Services, ids unique.
	pub nodes: Vec<Node>,
	/// Directed calls; endpoints may dangle.
	pub links: Vec<Edge>,
}

impl GraphSnapshot {
	/// Builds a snapshot, rejecting duplicate node ids.
	pub fn new(nodes: Vec<Node>, links: Vec<Edge>) -> Result<Self, GraphError> {
		let snapshot = Self { nodes, links };
		snapshot.validate()?;
		Ok(snapshot)
	}

	/// Decodes the `{ nodes, links }` JSON shape.
	pub fn from_json(json: &str) -> Result<Self, GraphError> {
		let snapshot: Self = serde_json::from_str(json)?;
		snapshot.validate()?;
		Ok(snapshot)
	}

	/// Encodes back into the wire shape.
	pub fn to_json(&self) -> Result<String, GraphError> {
		Ok(serde_json::to_string(self)?)
	}

	/// Node by exact identifier.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|node| node.id == id)
	}

	/// Link by exact ordered `(source, target)` pair.
	pub fn link(&self, source: &str, target: &str) -> Option<&Edge> {
		self.links.iter().find(|link| link.connects(source, target))
	}

	/// No nodes (and therefore nothing displayable).
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	fn validate(&self) -> Result<(), GraphError> {
		let mut seen = HashSet::with_capacity(self.nodes.len());
		for node in &self.nodes {
			if !seen.insert(node.id.as_str()) {
				return Err(GraphError::DuplicateNode(node.id.clone()));
			}
		}
		// Dangling links are tolerated; the filter never displays them.
		let dangling = self
			.links
			.iter()
			.filter(|l| !seen.contains(l.source.as_str()) || !seen.contains(l.target.as_str()))
			.count();
		if dangling > 0 {
			warn!("snapshot has {} dangling link(s)", dangling);
		}
		Ok(())
	}
}

/// Source of graph snapshots handed to the view controller.
pub trait SnapshotProvider {
	/// Produces a complete snapshot; partially loaded graphs are never returned.
	fn snapshot(&self) -> Result<GraphSnapshot, GraphError>;
}

/// The built-in five-service demo topology.
#[derive(Clone, Copy, Debug, Default)]
pub struct SampleTopology;

impl SnapshotProvider for SampleTopology {
	fn snapshot(&self) -> Result<GraphSnapshot, GraphError> {
		let nodes = vec![
			Node::new("Node1", ServiceType::Api, "5%")
				.with_metric("cpu", "80%")
				.with_metric("memory", "65%"),
			Node::new("Node2", ServiceType::Database, "20%")
				.with_metric("cpu", "45%")
				.with_metric("memory", "70%"),
			Node::new("Node3", ServiceType::Cache, "0%")
				.with_metric("cpu", "30%")
				.with_metric("memory", "40%"),
			Node::new("Node4", ServiceType::Worker, "50%")
				.with_metric("cpu", "60%")
				.with_metric("memory", "55%"),
			Node::new("Node5", ServiceType::Frontend, "100%")
				.with_metric("cpu", "90%")
				.with_metric("memory", "85%"),
		];
		let links = vec![
			Edge::new("Node1", "Node2", 10, "200ms"),
			Edge::new("Node1", "Node3", 5, "50ms"),
			Edge::new("Node2", "Node4", 20, "300ms"),
			Edge::new("Node4", "Node5", 8, "120ms"),
		];
		GraphSnapshot::new(nodes, links)
	}
}

/// Snapshot decoded from a JSON document in the wire shape.
#[derive(Clone, Debug)]
pub struct JsonSnapshot<'a> {
	json: &'a str,
}

impl<'a> JsonSnapshot<'a> {
	/// Wraps a JSON document; decoding happens on each [`SnapshotProvider::snapshot`].
	pub fn new(json: &'a str) -> Self {
		Self { json }
	}
}

impl SnapshotProvider for JsonSnapshot<'_> {
	fn snapshot(&self) -> Result<GraphSnapshot, GraphError> {
		let snapshot = GraphSnapshot::from_json(self.json)?;
		info!(
			"decoded snapshot with {} nodes and {} links",
			snapshot.nodes.len(),
			snapshot.links.len()
		);
		Ok(snapshot)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const WIRE: &str = r#"{
		"nodes": [
			{"id": "gateway", "metrics": {"cpu": "12%", "disk": "3%"}, "errorRate": "1%", "serviceType": "API"},
			{"id": "jobs", "metrics": {}, "errorRate": "0%", "serviceType": "Scheduler"}
		],
		"links": [
			{"source": "gateway", "target": "jobs", "invocationCount": 42, "latency": "15ms"}
		]
	}"#;

	#[test]
	fn test_decode_wire_shape() {
		let snapshot = JsonSnapshot::new(WIRE).snapshot().unwrap();
		assert_eq!(snapshot.nodes.len(), 2);
		assert_eq!(snapshot.nodes[0].service_type, ServiceType::Api);
		assert_eq!(snapshot.nodes[0].metrics["disk"], "3%");
		assert_eq!(
			snapshot.nodes[1].service_type,
			ServiceType::Unknown("Scheduler".into())
		);
		assert_eq!(snapshot.links[0].invocation_count, 42);
		assert_eq!(snapshot.links[0].latency, "15ms");
	}

	#[test]
	fn test_encode_uses_wire_field_names() {
		let json = SampleTopology.snapshot().unwrap().to_json().unwrap();
		for field in ["\"errorRate\"", "\"serviceType\"", "\"invocationCount\"", "\"links\""] {
			assert!(json.contains(field), "missing {field} in {json}");
		}
		assert!(json.contains("\"serviceType\":\"Frontend\""));
	}

	#[test]
	fn test_json_round_trip_is_exact() {
		let wire = concat!(
			r#"{"nodes":[{"id":"jobs","metrics":{"zeta":"1%","alpha":"2%"},"#,
			r#""errorRate":"3%","serviceType":"Scheduler"}],"#,
			r#""links":[{"source":"jobs","target":"jobs","invocationCount":7,"latency":"9ms"}]}"#
		);
		let snapshot = GraphSnapshot::from_json(wire).unwrap();
		let names: Vec<_> = snapshot.nodes[0].metrics.keys().map(String::as_str).collect();
		assert_eq!(names, ["zeta", "alpha"]);
		assert_eq!(snapshot.to_json().unwrap(), wire);
	}

	#[test]
	fn test_service_type_names() {
		assert_eq!(ServiceType::from_name("Cache"), ServiceType::Cache);
		assert_eq!(ServiceType::from_name("cache"), ServiceType::Unknown("cache".into()));
		assert_eq!(String::from(ServiceType::Unknown("Batch".into())), "Batch");
		assert_eq!(ServiceType::Api.to_string(), "API");
	}

	#[test]
	fn test_duplicate_ids_rejected() {
		let err = GraphSnapshot::new(
			vec![
				Node::new("a", ServiceType::Api, "0%"),
				Node::new("a", ServiceType::Cache, "0%"),
			],
			vec![],
		)
		.unwrap_err();
		assert_eq!(err, GraphError::DuplicateNode("a".into()));
	}

	#[test]
	fn test_malformed_json_rejected() {
		let err = JsonSnapshot::new(r#"{"nodes": 3}"#).snapshot().unwrap_err();
		assert!(matches!(err, GraphError::MalformedSnapshot(_)));
	}

	#[test]
	fn test_dangling_links_tolerated() {
		let snapshot = GraphSnapshot::new(
			vec![Node::new("a", ServiceType::Api, "0%")],
			vec![Edge::new("a", "ghost", 1, "1ms")],
		)
		.unwrap();
		assert_eq!(snapshot.links.len(), 1);
		assert!(snapshot.link("a", "ghost").is_some());
		assert!(snapshot.link("ghost", "a").is_none());
	}

	#[test]
	fn test_sample_topology_shape() {
		let snapshot = SampleTopology.snapshot().unwrap();
		assert_eq!(snapshot.nodes.len(), 5);
		assert_eq!(snapshot.links.len(), 4);
		assert_eq!(snapshot.node("Node5").unwrap().service_type, ServiceType::Frontend);
	}
}
