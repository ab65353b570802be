use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::CanvasState;
use crate::graph::ServiceIcon;

pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(state.config.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_links(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let radius = state.config.node_radius;
	let (r, g, b) = state.config.link_rgb;
	let (dash, gap, arrow_size) = (8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let positions = state.positions();
	let any_selected = state.selected_link.is_some();

	for link in state.links() {
		let (Some(&(x1, y1)), Some(&(x2, y2))) = (positions.get(&link.src), positions.get(&link.tgt))
		else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let selected = state.is_selected_link(link);
		let (alpha, width) = match (selected, any_selected) {
			(true, _) => (0.95, 3.0 / k),
			(false, true) => (0.35, 1.5 / k),
			(false, false) => (0.6, 1.5 / k),
		};
		let stroke = if selected {
			state.config.selection_color.to_string()
		} else {
			format!("rgba({}, {}, {}, {})", r, g, b, alpha)
		};

		ctx.set_stroke_style_str(&stroke);
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * radius, y1 + uy * radius);
		ctx.line_to(
			x2 - ux * (radius + arrow_size),
			y2 - uy * (radius + arrow_size),
		);
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&stroke);
		let (tip_x, tip_y) = (x2 - ux * radius, y2 - uy * radius);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let config = &state.config;
	let (k, radius) = (state.transform.k, config.node_radius);

	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		let info = &node.data.user_data;

		if state.is_selected_node(&info.id) {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + config.border_width + 4.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(config.selection_color);
			ctx.set_line_width(2.0 / k);
			ctx.stroke();
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(config.node_fill);
		ctx.fill();

		ctx.set_line_width(config.border_width);
		match &info.paint.border {
			Ok(color) => ctx.set_stroke_style_str(&color.to_string()),
			Err(_) => {
				// Rejected error rate: dashed outline, never a substitute color.
				ctx.set_stroke_style_str(config.invalid_border);
				let _ = ctx.set_line_dash(&js_sys::Array::of2(
					&JsValue::from_f64(3.0),
					&JsValue::from_f64(3.0),
				));
			}
		}
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		if let ServiceIcon::Glyph(glyph) = info.paint.icon {
			ctx.set_text_align("center");
			ctx.set_text_baseline("middle");
			ctx.set_font(&format!("{}px sans-serif", radius));
			let _ = ctx.fill_text(glyph, x, y + 1.0);
		}

		ctx.set_text_align("center");
		ctx.set_text_baseline("top");
		ctx.set_fill_style_str(config.label_color);
		ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));
		let _ = ctx.fill_text(&info.paint.label, x, y + radius + config.border_width + 2.0);
	});
	ctx.set_text_align("start");
	ctx.set_text_baseline("alphabetic");
}
