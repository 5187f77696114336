//! Binary entrypoint: set up logging and mount the app to the body.

use dfs_graph_canvas::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
