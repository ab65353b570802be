use crate::graph::{Node, NodePaint, paint_node};

/// Canvas tuning: sizes in graph-space units, colors as CSS strings.
#[derive(Clone, Debug)]
pub struct GraphConfig {
	/// Radius of a node circle.
	pub node_radius: f64,
	/// Stroke width of the error-rate border.
	pub border_width: f64,
	/// Pointer distance that still counts as a node hit.
	pub hit_radius: f64,
	/// Pointer distance from a link's segment that still counts as a link hit.
	pub link_hit_width: f64,
	/// Screen pixels a press may travel and still be a click.
	pub click_tolerance: f64,
	/// Repulsion between every pair of nodes.
	pub force_charge: f32,
	/// Spring stiffness along links.
	pub force_spring: f32,
	/// Upper bound on the force applied to one node per step.
	pub force_max: f32,
	/// Velocity cap for simulated nodes.
	pub node_speed: f32,
	/// Velocity kept per step, in 0-1.
	pub damping_factor: f32,
	/// Canvas fill behind the graph.
	pub background: &'static str,
	/// Fill inside node circles.
	pub node_fill: &'static str,
	/// RGB triple; alpha varies with selection.
	pub link_rgb: (u8, u8, u8),
	/// Node label text.
	pub label_color: &'static str,
	/// Ring around the selected node and stroke of the selected link.
	pub selection_color: &'static str,
	/// Outline for nodes whose error rate was rejected.
	pub invalid_border: &'static str,
	/// Custom node-drawing function.
	pub paint: fn(&Node) -> NodePaint,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			node_radius: 14.0,
			border_width: 3.0,
			hit_radius: 18.0,
			link_hit_width: 6.0,
			click_tolerance: 4.0,
			force_charge: 400.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			background: "#1a1a2e",
			node_fill: "#f5f5f5",
			link_rgb: (100, 180, 255),
			label_color: "rgba(255, 255, 255, 0.85)",
			selection_color: "rgba(255, 215, 0, 0.9)",
			invalid_border: "#9e9e9e",
			paint: paint_node,
		}
	}
}
