use leptos::prelude::*;

use crate::graph::{EdgeDetails, MetricRow, NodeDetails};

/// Card showing the selected service.
#[component]
pub fn NodeInspector(#[prop(into)] details: Signal<Option<NodeDetails>>) -> impl IntoView {
	view! {
		<section class="inspector-card node-inspector">
			<h2>"Service details"</h2>
			{move || match details.get() {
				Some(details) => node_fields(details).into_any(),
				None => view! { <p class="inspector-empty">"Click a service to inspect it."</p> }
					.into_any(),
			}}
		</section>
	}
}

fn node_fields(details: NodeDetails) -> impl IntoView {
	let border = match details.border {
		Ok(color) => {
			let css = color.to_string();
			view! {
				<span class="swatch" style:background-color=css.clone()></span>
				<span>{css}</span>
			}
			.into_any()
		}
		Err(err) => view! { <span class="metric-error">{err.to_string()}</span> }.into_any(),
	};
	let metrics = details.metrics.into_iter().map(metric_row).collect_view();

	view! {
		<dl class="inspector-fields">
			<dt>"ID"</dt>
			<dd>{details.id}</dd>
			<dt>"Service type"</dt>
			<dd>
				<span class="service-icon">{details.icon.as_str()}</span>
				" "
				{details.service_type.to_string()}
			</dd>
			<dt>"Error rate"</dt>
			<dd>{details.error_rate}</dd>
			<dt>"Border"</dt>
			<dd>{border}</dd>
			{metrics}
		</dl>
	}
}

fn metric_row(metric: MetricRow) -> impl IntoView {
	let bar = metric
		.percent
		.map(|p| view! { <meter min="0" max="100" value=p.clamp(0.0, 100.0)></meter> });
	view! {
		<dt>{metric.name}</dt>
		<dd>{metric.value} " " {bar}</dd>
	}
}

/// Card showing the selected link.
#[component]
pub fn EdgeInspector(#[prop(into)] details: Signal<Option<EdgeDetails>>) -> impl IntoView {
	view! {
		<section class="inspector-card edge-inspector">
			<h2>"Link details"</h2>
			{move || match details.get() {
				Some(edge) => view! {
					<dl class="inspector-fields">
						<dt>"Call"</dt>
						<dd>{format!("{} → {}", edge.source, edge.target)}</dd>
						<dt>"Invocation count"</dt>
						<dd>{edge.invocation_count}</dd>
						<dt>"Latency"</dt>
						<dd>{edge.latency}</dd>
					</dl>
				}
				.into_any(),
				None => view! { <p class="inspector-empty">"Click a link to inspect it."</p> }
					.into_any(),
			}}
		</section>
	}
}
