use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::graph_view::GraphView;

const GRAPH_API_PREFIX: &str = "/api/graph/";

/// Graph page: picks the document id from the `doc` query parameter and
/// points the panel at the matching graph endpoint.
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let document_id =
		Signal::derive(move || query.with(|q| q.get("doc").unwrap_or_default()));
	let api_path = Signal::derive(move || format!("{GRAPH_API_PREFIX}{}", document_id.get()));

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

			<div class="container">
				<div class="panel panel-default">
					<GraphView document_id=document_id api_path=api_path />
				</div>
			</div>
		</ErrorBoundary>
	}
}
