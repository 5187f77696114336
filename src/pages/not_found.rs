use leptos::prelude::*;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="page">
			<h1>"404: Page Not Found"</h1>
			<a href="/">"Back to the visualizer"</a>
		</div>
	}
}
