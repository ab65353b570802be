//! Interaction scenarios against the five-service sample topology.

use service_graph_inspector::graph::{
	FilterStatus, GraphSnapshot, Rgb, SampleTopology, ServiceIcon, ServiceType, SnapshotProvider,
	ViewController, filter,
};

fn sample() -> GraphSnapshot {
	SampleTopology.snapshot().expect("sample topology is valid")
}

fn visible_ids(view: &ViewController) -> Vec<String> {
	view.filtered().nodes.iter().map(|n| n.id.clone()).collect()
}

#[test]
fn test_search_scenarios() {
	let mut view = ViewController::new(sample());

	view.set_query("Node1");
	assert_eq!(visible_ids(&view), ["Node1"]);
	assert!(view.filtered().links.is_empty());

	view.set_query("Node");
	assert_eq!(view.filtered().nodes.len(), 5);
	assert_eq!(view.filtered().links.len(), 4);

	assert_eq!(view.set_query("zzz"), FilterStatus::NoMatches);
	assert!(view.filtered().is_empty());
	assert!(view.filtered().links.is_empty());
}

#[test]
fn test_inspect_frontend_node() {
	let mut view = ViewController::new(sample());
	assert!(view.click_node("Node5"));

	let details = view.node_details().expect("node selected");
	assert_eq!(details.service_type, ServiceType::Frontend);
	assert_eq!(details.icon, ServiceIcon::Glyph("🌐"));
	assert_eq!(details.border, Ok(Rgb::new(255, 0, 0)));
	assert_eq!(details.error_rate, "100%");
	assert_eq!(details.metrics.len(), 2);
}

#[test]
fn test_inspect_link() {
	let mut view = ViewController::new(sample());
	assert!(view.click_link("Node1", "Node2"));

	let edge = view.edge_details().expect("link selected");
	assert_eq!(edge.invocation_count, 10);
	assert_eq!(edge.latency, "200ms");
}

#[test]
fn test_selection_survives_search() {
	let mut view = ViewController::new(sample());
	view.click_node("Node2");
	let before = view.node_details();

	view.set_query("Node4");
	assert_eq!(visible_ids(&view), ["Node4"]);
	assert_eq!(view.node_details(), before);
	assert_eq!(view.selected_node_id().as_deref(), Some("Node2"));
}

#[test]
fn test_click_on_filtered_out_node_uses_full_graph() {
	let mut view = ViewController::new(sample());
	view.set_query("Node3");
	assert!(view.click_node("Node1"));
	assert!(view.click_link("Node2", "Node4"));
	assert_eq!(view.node_details().unwrap().id, "Node1");
	assert_eq!(view.edge_details().unwrap().latency, "300ms");
}

#[test]
fn test_filter_properties() {
	let snapshot = sample();
	assert_eq!(filter(&snapshot, "").snapshot(), &snapshot);
	for query in ["", "1", "node", "NODE5", "x"] {
		let once = filter(&snapshot, query);
		assert_eq!(filter(&once, query), once);
		for link in &once.links {
			assert!(once.node(&link.source).is_some());
			assert!(once.node(&link.target).is_some());
		}
	}
}
