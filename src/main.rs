use leptos::prelude::*;
use service_graph_inspector::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
