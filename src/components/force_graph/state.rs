use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::{debug, error};

use super::types::GraphConfig;
use crate::graph::{GraphSnapshot, NodePaint};

#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: String,
	pub paint: NodePaint,
}

#[derive(Clone, Debug)]
pub struct LinkInfo {
	pub src: DefaultNodeIdx,
	pub tgt: DefaultNodeIdx,
	pub source: String,
	pub target: String,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// What a press-and-release without movement landed on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Click {
	Node(String),
	Link(String, String),
}

pub struct CanvasState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub config: GraphConfig,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	/// Set once the current press travels beyond the click tolerance.
	pub moved: bool,
	pub selected_node: Option<String>,
	pub selected_link: Option<(String, String)>,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	links: Vec<LinkInfo>,
}

impl CanvasState {
	pub fn new(data: &GraphSnapshot, config: GraphConfig, width: f64, height: f64) -> Self {
		let (graph, links) = build_graph(data, &config, &HashMap::new());
		Self {
			graph,
			links,
			config,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			moved: false,
			selected_node: None,
			selected_link: None,
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		}
	}

	/// Swaps in a new snapshot; nodes that survive keep their position.
	pub fn rebuild(&mut self, data: &GraphSnapshot) {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(
				node.data.user_data.id.clone(),
				(node.x(), node.y(), node.data.is_anchor),
			);
		});
		let (graph, links) = build_graph(data, &self.config, &positions);
		self.graph = graph;
		self.links = links;
		self.drag = DragState::default();
		self.pan = PanState::default();
		debug!(
			"canvas rebuilt with {} nodes and {} links",
			data.nodes.len(),
			self.links.len()
		);
	}

	pub fn links(&self) -> &[LinkInfo] {
		&self.links
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < self.config.hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Closest link whose segment passes within `link_hit_width` of the point.
	pub fn link_at_position(&self, sx: f64, sy: f64) -> Option<&LinkInfo> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let positions = self.positions();
		self.links
			.iter()
			.filter_map(|link| {
				let a = positions.get(&link.src)?;
				let b = positions.get(&link.tgt)?;
				Some((link, distance_to_segment((gx, gy), *a, *b)))
			})
			.filter(|(_, dist)| *dist < self.config.link_hit_width)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(link, _)| link)
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	pub fn is_selected_node(&self, id: &str) -> bool {
		self.selected_node.as_deref() == Some(id)
	}

	pub fn is_selected_link(&self, link: &LinkInfo) -> bool {
		self.selected_link
			.as_ref()
			.is_some_and(|(s, t)| *s == link.source && *t == link.target)
	}

	/// Starts a press: a node drag when over a node, otherwise a pan.
	pub fn press(&mut self, sx: f64, sy: f64) {
		self.moved = false;
		if let Some(idx) = self.node_at_position(sx, sy) {
			self.drag.active = true;
			self.drag.node_idx = Some(idx);
			self.drag.start_x = sx;
			self.drag.start_y = sy;
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					self.drag.node_start_x = node.x();
					self.drag.node_start_y = node.y();
				}
			});
		} else {
			self.pan.active = true;
			self.pan.start_x = sx;
			self.pan.start_y = sy;
			self.pan.transform_start_x = self.transform.x;
			self.pan.transform_start_y = self.transform.y;
		}
	}

	/// Pointer moved while pressed. Nothing moves until the click tolerance is exceeded.
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		if self.drag.active {
			self.track_motion(sx - self.drag.start_x, sy - self.drag.start_y);
			if let (Some(idx), true) = (self.drag.node_idx, self.moved) {
				let (dx, dy) = (
					(sx - self.drag.start_x) / self.transform.k,
					(sy - self.drag.start_y) / self.transform.k,
				);
				let (nx, ny) = (
					self.drag.node_start_x + dx as f32,
					self.drag.node_start_y + dy as f32,
				);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
		} else if self.pan.active {
			self.track_motion(sx - self.pan.start_x, sy - self.pan.start_y);
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	fn track_motion(&mut self, dx: f64, dy: f64) {
		if (dx * dx + dy * dy).sqrt() > self.config.click_tolerance {
			self.moved = true;
		}
	}

	/// Ends the current press, returning the clicked element if it never moved.
	pub fn release(&mut self, sx: f64, sy: f64) -> Option<Click> {
		let click = if self.moved {
			None
		} else if let Some(idx) = self.drag.node_idx.filter(|_| self.drag.active) {
			self.node_id(idx).map(Click::Node)
		} else if self.pan.active {
			self.link_at_position(sx, sy)
				.map(|link| Click::Link(link.source.clone(), link.target.clone()))
		} else {
			None
		};

		if self.drag.active && self.moved {
			if let Some(idx) = self.drag.node_idx {
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.is_anchor = true;
					}
				});
			}
		}
		self.drag.active = false;
		self.drag.node_idx = None;
		self.pan.active = false;
		self.moved = false;
		click
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;
	}

	/// New canvas size; the view shifts so the graph stays centred.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}

	/// Where a node currently sits on screen.
	pub fn screen_position(&self, id: &str) -> Option<(f64, f64)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				found = Some((
					node.x() as f64 * self.transform.k + self.transform.x,
					node.y() as f64 * self.transform.k + self.transform.y,
				));
			}
		});
		found
	}
}

fn build_graph(
	data: &GraphSnapshot,
	config: &GraphConfig,
	previous: &HashMap<String, (f32, f32, bool)>,
) -> (ForceGraph<NodeInfo, ()>, Vec<LinkInfo>) {
	let mut graph = ForceGraph::new(SimulationParameters {
		force_charge: config.force_charge,
		force_spring: config.force_spring,
		force_max: config.force_max,
		node_speed: config.node_speed,
		damping_factor: config.damping_factor,
	});
	let mut id_to_idx = HashMap::new();

	for (i, node) in data.nodes.iter().enumerate() {
		let paint = (config.paint)(node);
		if let Err(err) = &paint.border {
			error!("node {}: {}", node.id, err);
		}
		let ((x, y), is_anchor) = match previous.get(&node.id) {
			Some(&(x, y, anchor)) => ((x, y), anchor),
			// Graph space is centred on the origin; the view transform centres it on screen.
			None => {
				let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
				(
					(
						(100.0 * angle.cos()) as f32,
						(100.0 * angle.sin()) as f32,
					),
					false,
				)
			}
		};

		let idx = graph.add_node(NodeData {
			x,
			y,
			mass: 10.0,
			is_anchor,
			user_data: NodeInfo {
				id: node.id.clone(),
				paint,
			},
		});
		id_to_idx.insert(node.id.as_str(), idx);
	}

	let mut links = Vec::new();
	for link in &data.links {
		if let (Some(&src), Some(&tgt)) = (
			id_to_idx.get(link.source.as_str()),
			id_to_idx.get(link.target.as_str()),
		) {
			graph.add_edge(src, tgt, EdgeData::default());
			links.push(LinkInfo {
				src,
				tgt,
				source: link.source.clone(),
				target: link.target.clone(),
			});
		}
	}

	(graph, links)
}

fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (abx, aby) = (b.0 - a.0, b.1 - a.1);
	let len_sq = abx * abx + aby * aby;
	let t = if len_sq < f64::EPSILON {
		0.0
	} else {
		(((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len_sq).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.0 + t * abx, a.1 + t * aby);
	((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{SampleTopology, SnapshotProvider, filter};

	const W: f64 = 800.0;
	const H: f64 = 600.0;

	fn sample_state() -> CanvasState {
		CanvasState::new(&SampleTopology.snapshot().unwrap(), GraphConfig::default(), W, H)
	}

	fn on_screen(state: &CanvasState, id: &str) -> (f64, f64) {
		state.screen_position(id).unwrap()
	}

	fn midpoint(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
		((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
	}

	#[test]
	fn test_distance_to_segment() {
		assert_eq!(distance_to_segment((5.0, 3.0), (0.0, 0.0), (10.0, 0.0)), 3.0);
		assert_eq!(distance_to_segment((-4.0, 3.0), (0.0, 0.0), (10.0, 0.0)), 5.0);
		assert_eq!(distance_to_segment((1.0, 1.0), (1.0, 1.0), (1.0, 1.0)), 0.0);
	}

	#[test]
	fn test_every_node_starts_on_screen() {
		let state = sample_state();
		for id in ["Node1", "Node2", "Node3", "Node4", "Node5"] {
			let (x, y) = on_screen(&state, id);
			assert!((0.0..=W).contains(&x) && (0.0..=H).contains(&y), "{id} at ({x}, {y})");
		}
	}

	#[test]
	fn test_click_on_node() {
		let mut state = sample_state();
		let (x, y) = on_screen(&state, "Node5");
		state.press(x, y);
		state.drag_to(x + 1.0, y);
		assert_eq!(state.release(x + 1.0, y), Some(Click::Node("Node5".into())));
	}

	#[test]
	fn test_drag_is_not_a_click() {
		let mut state = sample_state();
		let (x, y) = on_screen(&state, "Node3");
		state.press(x, y);
		state.drag_to(x + 20.0, y);
		assert_eq!(state.release(x + 20.0, y), None);

		let (nx, ny) = on_screen(&state, "Node3");
		assert!((nx - (x + 20.0)).abs() < 1e-3 && (ny - y).abs() < 1e-3);
	}

	#[test]
	fn test_click_near_link() {
		let mut state = sample_state();
		let (x, y) = midpoint(on_screen(&state, "Node1"), on_screen(&state, "Node2"));
		state.press(x, y + 2.0);
		assert_eq!(
			state.release(x, y + 2.0),
			Some(Click::Link("Node1".into(), "Node2".into()))
		);
	}

	#[test]
	fn test_click_on_empty_background() {
		let mut state = sample_state();
		state.press(5.0, 5.0);
		assert_eq!(state.release(5.0, 5.0), None);
	}

	#[test]
	fn test_pan_is_not_a_click() {
		let mut state = sample_state();
		let (x, y) = midpoint(on_screen(&state, "Node1"), on_screen(&state, "Node2"));
		state.press(x, y);
		state.drag_to(x + 50.0, y);
		assert_eq!(state.release(x + 50.0, y), None);
		assert!((state.transform.x - (W / 2.0 + 50.0)).abs() < 1e-9);
	}

	#[test]
	fn test_rebuild_keeps_positions_and_selection() {
		let snapshot = SampleTopology.snapshot().unwrap();
		let mut state = sample_state();
		state.selected_link = Some(("Node1".into(), "Node2".into()));
		let before = on_screen(&state, "Node2");

		state.rebuild(&filter(&snapshot, "Node"));
		assert_eq!(on_screen(&state, "Node2"), before);
		let selected: Vec<_> = state
			.links()
			.iter()
			.filter(|link| state.is_selected_link(link))
			.map(|link| (link.source.as_str(), link.target.as_str()))
			.collect();
		assert_eq!(selected, [("Node1", "Node2")]);

		state.rebuild(&filter(&snapshot, "Node2"));
		assert!(state.links().is_empty());
		assert_eq!(on_screen(&state, "Node2"), before);
		assert!(state.screen_position("Node1").is_none());
	}

	#[test]
	fn test_resize_keeps_graph_centred() {
		let mut state = sample_state();
		state.resize(1200.0, 900.0);
		assert_eq!((state.transform.x, state.transform.y), (600.0, 450.0));
		for id in ["Node1", "Node2", "Node3", "Node4", "Node5"] {
			let (x, y) = on_screen(&state, id);
			assert!((0.0..=1200.0).contains(&x) && (0.0..=900.0).contains(&y), "{id}");
		}
	}
}
