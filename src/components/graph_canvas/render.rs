//! Canvas drawing primitives shared by the base render and the traversal
//! replay passes.

use std::collections::HashMap;
use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use crate::graph::Pos;

pub const NODE_RADIUS: f64 = 40.0;

const NODE_FONT: &str = "30px Comic Sans MS";
const WEIGHT_FONT: &str = "15px Comic Sans MS";

pub fn clear(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
	ctx.set_fill_style_str("#FFFFFF");
	ctx.fill_rect(0.0, 0.0, width, height);
}

/// A filled node disc with its name centered on it. The outline uses the
/// context's current stroke style.
pub fn draw_node(ctx: &CanvasRenderingContext2d, pos: Pos, name: &str, fill: &str, text: &str) {
	ctx.set_fill_style_str(fill);
	ctx.begin_path();
	let _ = ctx.arc(pos.x, pos.y, NODE_RADIUS, 0.0, 2.0 * PI);
	ctx.fill();
	ctx.stroke();

	ctx.set_font(NODE_FONT);
	ctx.set_fill_style_str(text);
	ctx.set_text_align("center");
	let _ = ctx.fill_text(name, pos.x, pos.y + 10.0);
}

/// A straight edge between two node centers. Restores the default black
/// hairline stroke afterwards so node outlines stay consistent.
pub fn draw_link(ctx: &CanvasRenderingContext2d, a: Pos, b: Pos, style: &str, width: f64) {
	ctx.set_stroke_style_str(style);
	ctx.set_line_width(width);
	ctx.begin_path();
	ctx.move_to(a.x, a.y);
	ctx.line_to(b.x, b.y);
	ctx.stroke();
	ctx.set_line_width(1.0);
	ctx.set_stroke_style_str("black");
}

pub fn draw_weight(ctx: &CanvasRenderingContext2d, weight: i64, at: (f64, f64)) {
	ctx.set_font(WEIGHT_FONT);
	ctx.set_fill_style_str("red");
	ctx.set_text_align("center");
	let _ = ctx.fill_text(&weight.to_string(), at.0, at.1);
}

/// Weight labels are placed once per undirected node pair and re-drawn at
/// the same spot when the opposite edge comes around, so the two directions
/// of a symmetric edge never fight over label placement.
#[derive(Default)]
pub struct WeightLabels {
	placed: HashMap<(String, String), (f64, f64)>,
}

impl WeightLabels {
	fn key(a: &str, b: &str) -> (String, String) {
		if a <= b {
			(a.to_string(), b.to_string())
		} else {
			(b.to_string(), a.to_string())
		}
	}

	/// Label position for the edge `parent → current`. Short edges get a
	/// nudged midpoint; long edges put the label three quarters of the way
	/// toward the parent so stacked rows stay readable.
	pub fn position(&mut self, parent: &str, current: &str, a: Pos, b: Pos) -> (f64, f64) {
		let key = Self::key(parent, current);
		if let Some(&at) = self.placed.get(&key) {
			return at;
		}

		let len = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
		let at = if len < 101.0 {
			((a.x + b.x) / 2.0 + 10.0, (a.y + b.y) / 2.0 + 5.0)
		} else {
			let (hx, hy) = ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
			((hx + a.x) / 2.0, (hy + a.y) / 2.0 - 5.0)
		};
		self.placed.insert(key, at);
		at
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn label_position_is_stable_across_edge_direction() {
		let mut labels = WeightLabels::default();
		let (a, b) = (Pos { x: 100.0, y: 100.0 }, Pos { x: 400.0, y: 200.0 });
		let first = labels.position("A", "B", a, b);
		let second = labels.position("B", "A", b, a);
		assert_eq!(first, second);
	}

	#[test]
	fn short_edges_use_the_midpoint() {
		let mut labels = WeightLabels::default();
		let (a, b) = (Pos { x: 100.0, y: 100.0 }, Pos { x: 140.0, y: 100.0 });
		assert_eq!(labels.position("A", "B", a, b), (130.0, 105.0));
	}
}
