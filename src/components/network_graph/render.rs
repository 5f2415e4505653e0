//! Canvas drawing of the network diagram. Pure presentation: everything
//! drawn here comes out of the [`RenderModel`] projection, so redrawing the
//! same state twice produces the same pixels.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::layout::{CANVAS_HEIGHT, CANVAS_WIDTH};
use super::model::GraphSnapshot;
use super::state::{NetworkState, RenderModel};

const ARROW_SIZE: f64 = 8.0;
const LABEL_MAX_CHARS: usize = 16;

pub fn render(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let model = state.render_model();

	ctx.set_fill_style_str("#0f172a");
	ctx.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);

	ctx.save();
	// Zoom about the canvas center, the inverse of NetworkState::canvas_to_layout.
	let k = model.viewport.zoom;
	let (mx, my) = (CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
	let _ = ctx.translate(mx, my);
	let _ = ctx.scale(k, k);
	let _ = ctx.translate(-mx, -my);

	draw_edges(state.snapshot(), &model, ctx);
	draw_nodes(state.snapshot(), &model, ctx);
	ctx.restore();
}

fn draw_edges(snapshot: &GraphSnapshot, model: &RenderModel<'_>, ctx: &CanvasRenderingContext2d) {
	ctx.set_global_alpha(0.7);

	for (edge, class) in snapshot.edges.iter().zip(model.edge_classes) {
		// Dangling endpoints were already flagged skippable by the classifier.
		let Some(class) = class else {
			continue;
		};
		let (Some(from), Some(to)) = (
			model.positions.get(&edge.source),
			model.positions.get(&edge.target),
		) else {
			continue;
		};

		let (dx, dy) = (to.x - from.x, to.y - from.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let target_radius = model
			.node_styles
			.get(&edge.target)
			.map(|s| s.display_radius)
			.unwrap_or(0.0);

		ctx.set_stroke_style_str(class.stroke_color());
		ctx.set_line_width(class.stroke_width());
		match class.dash() {
			Some((dash, gap)) => {
				let _ = ctx.set_line_dash(&js_sys::Array::of2(
					&JsValue::from_f64(dash),
					&JsValue::from_f64(gap),
				));
			}
			None => {
				let _ = ctx.set_line_dash(&js_sys::Array::new());
			}
		}

		ctx.begin_path();
		ctx.move_to(from.x, from.y);
		ctx.line_to(
			to.x - ux * (target_radius + ARROW_SIZE),
			to.y - uy * (target_radius + ARROW_SIZE),
		);
		ctx.stroke();

		// Arrowhead at the target end.
		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(class.arrow_color());
		let (tip_x, tip_y) = (to.x - ux * target_radius, to.y - uy * target_radius);
		let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}

	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.set_global_alpha(1.0);
}

fn truncate_label(name: &str) -> String {
	if name.chars().count() > LABEL_MAX_CHARS {
		let short: String = name.chars().take(LABEL_MAX_CHARS - 2).collect();
		format!("{short}…")
	} else {
		name.to_string()
	}
}

fn draw_nodes(snapshot: &GraphSnapshot, model: &RenderModel<'_>, ctx: &CanvasRenderingContext2d) {
	for node in &snapshot.nodes {
		let Some(pos) = model.positions.get(&node.id) else {
			continue;
		};
		let Some(style) = model.node_styles.get(&node.id) else {
			continue;
		};
		let radius = style.display_radius;
		let is_selected = model.viewport.selected == Some(node.id);

		if style.glow {
			ctx.set_global_alpha(0.4);
			ctx.set_stroke_style_str(style.glow_color);
			ctx.set_line_width(2.0);
			ctx.begin_path();
			let _ = ctx.arc(pos.x, pos.y, radius + 6.0, 0.0, 2.0 * PI);
			ctx.stroke();
			ctx.set_global_alpha(1.0);
		}

		ctx.set_global_alpha(0.9);
		ctx.begin_path();
		let _ = ctx.arc(pos.x, pos.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(style.base_color);
		ctx.fill();
		ctx.set_global_alpha(1.0);

		if is_selected {
			ctx.set_stroke_style_str("#fff");
			ctx.set_line_width(3.0);
			ctx.begin_path();
			let _ = ctx.arc(pos.x, pos.y, radius, 0.0, 2.0 * PI);
			ctx.stroke();
		}

		ctx.set_fill_style_str("#94a3b8");
		ctx.set_font("500 9px sans-serif");
		ctx.set_text_align("center");
		let _ = ctx.fill_text(&truncate_label(&node.name), pos.x, pos.y + radius + 14.0);

		if node.risk_score > 0.0 {
			ctx.set_fill_style_str("white");
			ctx.set_font("700 10px sans-serif");
			let _ = ctx.fill_text(&format!("{}", node.risk_score.round() as i64), pos.x, pos.y + 4.0);
		}
	}
	ctx.set_text_align("start");
}
