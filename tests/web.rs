//! Browser mount tests; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use leptos::prelude::*;
use service_graph_inspector::components::inspector::{EdgeInspector, NodeInspector};
use service_graph_inspector::components::search::MatchSummary;
use service_graph_inspector::graph::{FilterStatus, SampleTopology, SnapshotProvider, ViewController};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn body_html() -> String {
	document().body().map(|b| b.inner_html()).unwrap_or_default()
}

#[wasm_bindgen_test]
fn test_inspectors_render_selection() {
	let mut view = ViewController::new(SampleTopology.snapshot().unwrap());
	view.click_node("Node5");
	view.click_link("Node1", "Node2");
	let (node, edge) = (view.node_details(), view.edge_details());

	let _handle = leptos::mount::mount_to_body(move || {
		view! {
			<NodeInspector details=Signal::derive(move || node.clone()) />
			<EdgeInspector details=Signal::derive(move || edge.clone()) />
		}
	});

	let html = body_html();
	assert!(html.contains("Node5"));
	assert!(html.contains("Frontend"));
	assert!(html.contains("rgb(255, 0, 0)"));
	assert!(html.contains("200ms"));
}

#[wasm_bindgen_test]
fn test_no_matches_notice() {
	let _handle = leptos::mount::mount_to_body(|| {
		view! { <MatchSummary status=Signal::derive(|| FilterStatus::NoMatches) /> }
	});
	assert!(body_html().contains("No services match"));
}
