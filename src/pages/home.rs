use leptos::prelude::*;

use crate::components::graph_canvas::GraphCanvas;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
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

			<div class="page">
				<h1>"DFS Graph Traversal"</h1>
				<p class="subtitle">
					"Edit the graph below, pick a start and end node, then watch a "
					"depth-first search or a DFS-based shortest path unfold."
				</p>
				<GraphCanvas />
			</div>
		</ErrorBoundary>
	}
}
