//! Step replay with a configurable inter-step pause, cancelled through a
//! render generation counter.
//!
//! There is no locking anywhere: a run that went stale simply stops issuing
//! draw calls, and the newest render generation owns the canvas.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use web_sys::CanvasRenderingContext2d;

use super::render::{self, WeightLabels};
use crate::graph::{EdgeVisit, Layout, TraversalRun};

/// The run's render generation went stale while it was sleeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cancelled;

/// Monotonic render generation counter shared by every run on one canvas.
#[derive(Clone, Debug, Default)]
pub struct Generation(Rc<Cell<u64>>);

impl Generation {
	pub fn new() -> Self {
		Self::default()
	}

	/// Bump the counter and hand out a token pinned to the new value. Every
	/// run started earlier observes the bump at its next pause and aborts.
	pub fn begin(&self) -> RunToken {
		self.0.set(self.0.get() + 1);
		RunToken {
			counter: self.0.clone(),
			seen: self.0.get(),
		}
	}
}

/// Cancellation token held by one in-flight animation.
#[derive(Clone, Debug)]
pub struct RunToken {
	counter: Rc<Cell<u64>>,
	seen: u64,
}

impl RunToken {
	pub fn is_stale(&self) -> bool {
		self.counter.get() != self.seen
	}

	/// Sleep for the step delay, then fail if a newer render started in the
	/// meantime. A zero delay still yields once before the check.
	pub async fn pause(&self, ms: u32) -> Result<(), Cancelled> {
		TimeoutFuture::new(ms).await;
		if self.is_stale() { Err(Cancelled) } else { Ok(()) }
	}
}

/// Replay the base sweep: black edges, white discs, red weight labels.
///
/// Pauses follow first-visit pops only, and a zero delay draws the whole
/// pass without yielding at all (the initial-render fast path).
pub async fn play_graph(
	ctx: &CanvasRenderingContext2d,
	layout: &Layout,
	walk: &[EdgeVisit],
	delay: u32,
	token: &RunToken,
) -> Result<(), Cancelled> {
	if let Some(canvas) = ctx.canvas() {
		render::clear(ctx, canvas.width() as f64, canvas.height() as f64);
	}
	if layout.is_empty() {
		return Ok(());
	}

	let mut labels = WeightLabels::default();
	for step in walk {
		let (Some(from), Some(to)) = (layout.get(&step.from), layout.get(&step.to)) else {
			continue;
		};

		render::draw_link(ctx, to, from, "black", 1.0);
		render::draw_node(ctx, to, &step.to, "white", "black");
		render::draw_node(ctx, from, &step.from, "white", "black");

		let at = labels.position(&step.from, &step.to, from, to);
		render::draw_weight(ctx, step.weight, at);

		if delay != 0 && !step.revisit {
			token.pause(delay).await?;
		}
	}
	Ok(())
}

/// Replay a finished traversal: the search phase paints visited nodes red,
/// then the reconstructed path is walked start→end in green with thick red
/// connecting edges.
pub async fn play_run(
	ctx: &CanvasRenderingContext2d,
	layout: &Layout,
	run: &TraversalRun,
	delay: u32,
	token: &RunToken,
) -> Result<(), Cancelled> {
	for (i, visit) in run.visits.iter().enumerate() {
		let Some(pos) = layout.get(&visit.name) else {
			continue;
		};
		render::draw_node(ctx, pos, &visit.name, "red", "white");

		// The pop that found the end breaks out of the search before its
		// pause, going straight into the path replay.
		let terminal = i + 1 == run.visits.len() && run.halted_on_end;
		if !terminal {
			token.pause(delay).await?;
		}
	}

	for (i, name) in run.path.iter().enumerate() {
		let Some(pos) = layout.get(name) else {
			continue;
		};
		if i != 0 {
			let parent = &run.path[i - 1];
			if let Some(parent_pos) = layout.get(parent) {
				render::draw_link(ctx, pos, parent_pos, "red", 3.0);
				render::draw_node(ctx, parent_pos, parent, "green", "white");
			}
		}
		render::draw_node(ctx, pos, name, "green", "white");

		token.pause(delay).await?;
	}
	Ok(())
}
