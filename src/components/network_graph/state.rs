//! Viewport state and the per-snapshot derived data the renderer consumes.

use std::collections::HashMap;

use super::classify::{Annotations, EdgeClass, NodeStyle, classify};
use super::layout::{CANVAS_HEIGHT, CANVAS_WIDTH, Position, layout};
use super::model::{GraphSnapshot, NetworkNode, NodeId};

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.0;
pub const ZOOM_STEP: f64 = 0.2;

/// Zoom factor and current selection. Every operation is total: zoom
/// saturates at its bounds and selection never fails.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
	pub zoom: f64,
	pub selected: Option<NodeId>,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			zoom: 1.0,
			selected: None,
		}
	}
}

impl Viewport {
	pub fn zoom_in(&mut self) {
		self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
	}

	pub fn zoom_out(&mut self) {
		self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
	}

	pub fn select(&mut self, id: NodeId) {
		self.selected = Some(id);
	}

	pub fn clear_selection(&mut self) {
		self.selected = None;
	}
}

/// Read-only projection handed to the renderer each cycle.
pub struct RenderModel<'a> {
	pub positions: &'a HashMap<NodeId, Position>,
	pub edge_classes: &'a [Option<EdgeClass>],
	pub node_styles: &'a HashMap<NodeId, NodeStyle>,
	pub viewport: &'a Viewport,
}

/// Owns one snapshot plus everything derived from it.
///
/// Positions and annotations are recomputed only when a snapshot is loaded;
/// viewport operations never touch them. Loading a snapshot resets the
/// viewport, since the previous framing no longer applies.
pub struct NetworkState {
	snapshot: GraphSnapshot,
	positions: HashMap<NodeId, Position>,
	annotations: Annotations,
	viewport: Viewport,
}

impl NetworkState {
	pub fn new(snapshot: GraphSnapshot) -> Self {
		let positions = layout(&snapshot);
		let annotations = classify(&snapshot);
		Self {
			snapshot,
			positions,
			annotations,
			viewport: Viewport::default(),
		}
	}

	/// Replace the snapshot wholesale; last snapshot wins, nothing is merged.
	pub fn load_snapshot(&mut self, snapshot: GraphSnapshot) {
		*self = Self::new(snapshot);
	}

	pub fn snapshot(&self) -> &GraphSnapshot {
		&self.snapshot
	}

	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	pub fn zoom_in(&mut self) {
		self.viewport.zoom_in();
	}

	pub fn zoom_out(&mut self) {
		self.viewport.zoom_out();
	}

	pub fn select(&mut self, id: NodeId) {
		self.viewport.select(id);
	}

	pub fn clear_selection(&mut self) {
		self.viewport.clear_selection();
	}

	pub fn selected_node(&self) -> Option<&NetworkNode> {
		self.viewport.selected.and_then(|id| self.snapshot.node(id))
	}

	pub fn render_model(&self) -> RenderModel<'_> {
		RenderModel {
			positions: &self.positions,
			edge_classes: &self.annotations.edge_classes,
			node_styles: &self.annotations.node_styles,
			viewport: &self.viewport,
		}
	}

	/// Canvas coordinates to layout coordinates; zoom scales about the
	/// canvas center, matching the render transform.
	pub fn canvas_to_layout(&self, cx: f64, cy: f64) -> (f64, f64) {
		let (mx, my) = (CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
		let k = self.viewport.zoom;
		(mx + (cx - mx) / k, my + (cy - my) / k)
	}

	/// Topmost node under a canvas point, if any. Nodes draw in input
	/// order, so the last hit wins.
	pub fn node_at(&self, cx: f64, cy: f64) -> Option<NodeId> {
		let (x, y) = self.canvas_to_layout(cx, cy);
		let mut found = None;
		for node in &self.snapshot.nodes {
			let Some(pos) = self.positions.get(&node.id) else {
				continue;
			};
			let radius = self
				.annotations
				.node_styles
				.get(&node.id)
				.map(|s| s.display_radius)
				.unwrap_or(0.0);
			let (dx, dy) = (pos.x - x, pos.y - y);
			if (dx * dx + dy * dy).sqrt() <= radius {
				found = Some(node.id);
			}
		}
		found
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::model::EntityType;

	fn snapshot(ids: &[NodeId]) -> GraphSnapshot {
		GraphSnapshot {
			nodes: ids
				.iter()
				.map(|&id| NetworkNode {
					id,
					name: format!("N{id}"),
					entity_type: EntityType::Buyer,
					tier: None,
					risk_score: 0.0,
					size: 20.0,
				})
				.collect(),
			..GraphSnapshot::default()
		}
	}

	#[test]
	fn zoom_saturates_at_both_ends() {
		let mut state = NetworkState::new(snapshot(&[1]));
		for _ in 0..20 {
			state.zoom_in();
		}
		assert_eq!(state.viewport().zoom, MAX_ZOOM);
		for _ in 0..40 {
			state.zoom_out();
		}
		assert_eq!(state.viewport().zoom, MIN_ZOOM);
	}

	#[test]
	fn selection_is_idempotent_and_clearable() {
		let mut state = NetworkState::new(snapshot(&[1, 2]));
		state.select(2);
		state.select(2);
		assert_eq!(state.viewport().selected, Some(2));
		assert_eq!(state.selected_node().map(|n| n.id), Some(2));
		state.clear_selection();
		assert_eq!(state.viewport().selected, None);
	}

	#[test]
	fn selecting_unknown_id_yields_no_node() {
		let mut state = NetworkState::new(snapshot(&[1]));
		state.select(99);
		assert!(state.selected_node().is_none());
	}

	#[test]
	fn loading_new_snapshot_resets_viewport() {
		let mut state = NetworkState::new(snapshot(&[1, 2]));
		state.zoom_in();
		state.select(1);
		state.load_snapshot(snapshot(&[3]));
		assert_eq!(state.viewport().zoom, 1.0);
		assert_eq!(state.viewport().selected, None);
		assert_eq!(state.snapshot().nodes.len(), 1);
	}

	#[test]
	fn viewport_changes_leave_layout_untouched() {
		let mut state = NetworkState::new(snapshot(&[1, 2, 3]));
		let before = state.render_model().positions.clone();
		state.zoom_in();
		state.select(2);
		assert_eq!(*state.render_model().positions, before);
	}

	#[test]
	fn hit_test_honors_zoom() {
		// Two buyers land at x=360 and x=540, y=70, radius 20.
		let mut state = NetworkState::new(snapshot(&[1, 2]));
		assert_eq!(state.node_at(360.0, 70.0), Some(1));
		assert_eq!(state.node_at(360.0, 120.0), None);

		// At 2x zoom about the center (450, 280) node 1 appears at (270, -140)
		// on the canvas; the old canvas point no longer hits it.
		for _ in 0..5 {
			state.zoom_in();
		}
		assert_eq!(state.node_at(360.0, 70.0), None);
		assert_eq!(state.node_at(270.0, -140.0), Some(1));
	}

	#[test]
	fn render_model_is_stable_across_reads() {
		let state = NetworkState::new(snapshot(&[1, 2]));
		let a = state.render_model();
		let b = state.render_model();
		assert_eq!(a.positions, b.positions);
		assert_eq!(a.edge_classes, b.edge_classes);
		assert_eq!(a.viewport, b.viewport);
	}
}
