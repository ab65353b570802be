use leptos::prelude::*;

use crate::graph::FilterStatus;

/// Free-text search box; every keystroke is forwarded to `on_input`.
#[component]
pub fn SearchField(
	#[prop(into)] value: Signal<String>,
	#[prop(into)] on_input: Callback<String>,
	#[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
	let placeholder = placeholder.unwrap_or_else(|| "Search services by id".to_string());
	view! {
		<input
			type="search"
			class="search-field"
			placeholder=placeholder
			prop:value=move || value.get()
			on:input=move |ev| on_input.run(event_target_value(&ev))
		/>
	}
}

/// One-line summary under the search box, including the "no matches" notice.
#[component]
pub fn MatchSummary(#[prop(into)] status: Signal<FilterStatus>) -> impl IntoView {
	move || match status.get() {
		FilterStatus::Unfiltered => view! { <p class="match-summary"></p> }.into_any(),
		FilterStatus::Matches { nodes, links } => view! {
			<p class="match-summary">{format!("{} services, {} links", nodes, links)}</p>
		}
		.into_any(),
		FilterStatus::NoMatches => {
			view! { <p class="match-summary no-matches">"No services match your search."</p> }
				.into_any()
		}
	}
}
