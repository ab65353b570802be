use leptos::prelude::*;
use log::error;

use crate::components::force_graph::ForceGraphCanvas;
use crate::components::inspector::{EdgeInspector, NodeInspector};
use crate::components::search::{MatchSummary, SearchField};
use crate::graph::{GraphSnapshot, SampleTopology, SnapshotProvider, ViewController};

/// Search box, inspector cards and canvas wired to one [`ViewController`].
#[component]
pub fn ServiceGraphView(snapshot: GraphSnapshot) -> impl IntoView {
	let controller = RwSignal::new(ViewController::new(snapshot));

	// Memo so selection changes do not re-layout the canvas.
	let filtered = Memo::new(move |_| controller.with(|c| c.filtered().snapshot().clone()));
	let query = Signal::derive(move || controller.with(|c| c.query().to_string()));
	let status = Signal::derive(move || controller.with(ViewController::status));
	let node_details = Signal::derive(move || controller.with(ViewController::node_details));
	let edge_details = Signal::derive(move || controller.with(ViewController::edge_details));
	let selected_node = Signal::derive(move || controller.with(ViewController::selected_node_id));
	let selected_link = Signal::derive(move || controller.with(ViewController::selected_link));

	let on_query = Callback::new(move |text: String| {
		controller.maybe_update(|c| {
			let changed = c.query() != text;
			c.set_query(&text);
			changed
		});
	});
	let on_click_node = Callback::new(move |id: String| {
		controller.maybe_update(|c| c.click_node(&id));
	});
	let on_click_link = Callback::new(move |(source, target): (String, String)| {
		controller.maybe_update(|c| c.click_link(&source, &target));
	});

	view! {
		<div class="service-graph">
			<aside class="sidebar">
				<h1>"Service dependencies"</h1>
				<SearchField value=query on_input=on_query />
				<MatchSummary status=status />
				<NodeInspector details=node_details />
				<EdgeInspector details=edge_details />
				<button
					class="clear-selection"
					on:click=move |_| controller.update(ViewController::clear_selection)
				>
					"Clear selection"
				</button>
			</aside>
			<div class="graph-pane">
				<ForceGraphCanvas
					data=filtered
					selected_node=selected_node
					selected_link=selected_link
					on_click_node=on_click_node
					on_click_link=on_click_link
				/>
			</div>
		</div>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let snapshot = SampleTopology.snapshot().inspect_err(|err| error!("sample topology: {}", err));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{snapshot.map(|snapshot| view! { <ServiceGraphView snapshot=snapshot /> })}
		</ErrorBoundary>
	}
}
