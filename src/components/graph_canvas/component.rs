use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::animate::{self, Generation};
use super::state::GraphView;
use crate::graph::{Graph, text, traverse};

fn context_of(canvas: &HtmlCanvasElement) -> CanvasRenderingContext2d {
	canvas
		.get_context("2d")
		.unwrap()
		.unwrap()
		.dyn_into()
		.unwrap()
}

/// A non-negative step delay in milliseconds; anything unparsable is zero.
fn step_delay(raw: &str) -> u32 {
	raw.trim().parse().unwrap_or(0)
}

/// Fresh render: size the canvas to its CSS width, rebuild the layout, grow
/// the canvas to fit the deepest row, bump the generation (cancelling any
/// in-flight run) and replay the edge sweep at `delay` ms per step.
fn rerender(
	view: &Rc<RefCell<Option<GraphView>>>,
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
	generation: &Generation,
	delay: u32,
) {
	let width = canvas.client_width() as f64;
	canvas.set_width(width as u32);

	let (layout, walk) = {
		let mut borrow = view.borrow_mut();
		let Some(ref mut v) = *borrow else {
			return;
		};
		v.resize(width);
		if !v.layout.is_empty() {
			let height = v.layout.height();
			canvas.set_height(height as u32);
			// Qualified: leptos' prelude pulls in a blanket `style(S)` that
			// would otherwise shadow the inherent zero-arg accessor.
			let _ = web_sys::HtmlElement::style(canvas)
				.set_property("height", &format!("{height}px"));
		}
		(v.layout.clone(), traverse::walk_edges(&v.graph))
	};

	let token = generation.begin();
	let ctx = ctx.clone();
	spawn_local(async move {
		let _ = animate::play_graph(&ctx, &layout, &walk, delay, &token).await;
	});
}

/// The interactive DFS visualizer: canvas, endpoint/timestep inputs, the two
/// run triggers and the graph text editor.
#[component]
pub fn GraphCanvas() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let view: Rc<RefCell<Option<GraphView>>> = Rc::new(RefCell::new(None));
	let generation = Generation::new();
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	let start = RwSignal::new("S".to_string());
	let end = RwSignal::new("D".to_string());
	let timestep = RwSignal::new("100".to_string());
	let editor = RwSignal::new(text::serialize(&Graph::sample()));
	let start_error = RwSignal::new(false);
	let end_error = RwSignal::new(false);
	let editor_error = RwSignal::new(false);

	let (view_init, generation_init, resize_cb_init) =
		(view.clone(), generation.clone(), resize_cb.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let width = canvas.client_width() as f64;
		canvas.set_width(width as u32);
		*view_init.borrow_mut() = Some(GraphView::new(Graph::sample(), width));
		let ctx = context_of(&canvas);

		let (view_resize, canvas_resize, ctx_resize, generation_resize) = (
			view_init.clone(),
			canvas.clone(),
			ctx.clone(),
			generation_init.clone(),
		);
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			rerender(
				&view_resize,
				&canvas_resize,
				&ctx_resize,
				&generation_resize,
				step_delay(&timestep.get_untracked()),
			);
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		rerender(
			&view_init,
			&canvas,
			&ctx,
			&generation_init,
			step_delay(&timestep.get_untracked()),
		);
	});

	let (view_save, generation_save) = (view.clone(), generation.clone());
	let on_save = move |_| {
		match text::parse(&editor.get()) {
			Ok(graph) => {
				editor_error.set(false);
				// Re-serialize so the editor shows the stored (weight-sorted)
				// edge order.
				editor.set(text::serialize(&graph));
				if let Some(ref mut v) = *view_save.borrow_mut() {
					v.replace(graph);
				}
				let Some(canvas) = canvas_ref.get() else {
					return;
				};
				let canvas: HtmlCanvasElement = canvas.into();
				let ctx = context_of(&canvas);
				rerender(
					&view_save,
					&canvas,
					&ctx,
					&generation_save,
					step_delay(&timestep.get()),
				);
			}
			Err(err) => {
				error!("graph text rejected: {err}");
				editor_error.set(true);
			}
		}
	};

	let (view_dfs, generation_dfs) = (view.clone(), generation.clone());
	let on_run_dfs = move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let ctx = context_of(&canvas);

		let (from, to) = (start.get(), end.get());
		let (layout, walk, run) = {
			let borrow = view_dfs.borrow();
			let Some(ref v) = *borrow else {
				return;
			};

			let from_ok = v.layout.contains(&from);
			let to_ok = v.layout.contains(&to);
			start_error.set(!from_ok);
			end_error.set(!to_ok);
			if !from_ok || !to_ok {
				return;
			}

			(
				v.layout.clone(),
				traverse::walk_edges(&v.graph),
				traverse::dfs_path(&v.graph, &from, &to),
			)
		};

		let delay = step_delay(&timestep.get());
		let token = generation_dfs.begin();
		spawn_local(async move {
			if animate::play_graph(&ctx, &layout, &walk, 0, &token).await.is_err() {
				return;
			}
			let _ = animate::play_run(&ctx, &layout, &run, delay, &token).await;
		});
	};

	let (view_sp, generation_sp) = (view.clone(), generation.clone());
	let on_run_shortest = move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let ctx = context_of(&canvas);

		let (from, to) = (start.get(), end.get());
		let (layout, walk, run) = {
			let borrow = view_sp.borrow();
			let Some(ref v) = *borrow else {
				return;
			};

			let from_ok = v.layout.contains(&from);
			let to_ok = v.layout.contains(&to);
			start_error.set(!from_ok);
			end_error.set(!to_ok);
			if !from_ok || !to_ok {
				return;
			}

			let run = match traverse::shortest_dfs(&v.graph, &from, &to) {
				Ok(run) => run,
				Err(err) => {
					error!("shortest path run aborted: {err}");
					return;
				}
			};
			(v.layout.clone(), traverse::walk_edges(&v.graph), run)
		};

		let delay = step_delay(&timestep.get());
		let token = generation_sp.begin();
		spawn_local(async move {
			if animate::play_graph(&ctx, &layout, &walk, 0, &token).await.is_err() {
				return;
			}
			let _ = animate::play_run(&ctx, &layout, &run, delay, &token).await;
		});
	};

	view! {
		<div class="graph-tool">
			<div class="controls">
				<label>
					"Start"
					<input
						prop:value=start
						class:error=move || start_error.get()
						on:input=move |ev| start.set(event_target_value(&ev))
					/>
				</label>
				<label>
					"End"
					<input
						prop:value=end
						class:error=move || end_error.get()
						on:input=move |ev| end.set(event_target_value(&ev))
					/>
				</label>
				<label>
					"Step (ms)"
					<input
						prop:value=timestep
						on:input=move |ev| timestep.set(event_target_value(&ev))
					/>
				</label>
				<button on:click=on_run_dfs>"Run DFS"</button>
				<button on:click=on_run_shortest>"Run shortest DFS"</button>
			</div>

			<canvas node_ref=canvas_ref class="graph-canvas" />

			<div class="editor">
				<textarea
					prop:value=editor
					class:error=move || editor_error.get()
					on:input=move |ev| editor.set(event_target_value(&ev))
				></textarea>
				<button on:click=on_save>"Save"</button>
			</div>
		</div>
	}
}
