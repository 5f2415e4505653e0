//! Deterministic tiered layout.
//!
//! Nodes are placed by role/tier band, never by a physics simulation:
//! position is a pure function of band membership and index within the
//! band, so re-running on the same snapshot yields identical coordinates.
//! Edges play no part in placement.

use std::collections::HashMap;

use super::model::{EntityType, GraphSnapshot, NetworkNode, NodeId, SupplierTier};

/// Logical canvas size in design units; scaling to pixels happens at render.
pub const CANVAS_WIDTH: f64 = 900.0;
pub const CANVAS_HEIGHT: f64 = 560.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Band {
	Buyers,
	Tier1,
	Tier2,
	Tier3,
	Lenders,
}

/// First matching predicate wins: buyer, then supplier tiers, then lender.
/// A node matching none is left out of the layout entirely.
fn band_of(node: &NetworkNode) -> Option<Band> {
	if node.entity_type == EntityType::Buyer {
		return Some(Band::Buyers);
	}
	match node.tier {
		Some(SupplierTier::Tier1) => return Some(Band::Tier1),
		Some(SupplierTier::Tier2) => return Some(Band::Tier2),
		Some(SupplierTier::Tier3) => return Some(Band::Tier3),
		None => {}
	}
	if node.entity_type == EntityType::Lender {
		return Some(Band::Lenders);
	}
	None
}

/// Even spread across a fixed span. The `max(count - 1, 1)` denominator
/// places a single node at `left` rather than dividing by zero.
fn spread(left: f64, span: f64, count: usize, i: usize) -> f64 {
	left + (i as f64) * span / (count.saturating_sub(1).max(1) as f64)
}

/// Assign a position to every node that falls in a layout band.
///
/// Recomputed only when a new snapshot is loaded; viewport changes never
/// touch positions.
pub fn layout(snapshot: &GraphSnapshot) -> HashMap<NodeId, Position> {
	let mut buyers = Vec::new();
	let mut tier1 = Vec::new();
	let mut tier2 = Vec::new();
	let mut tier3 = Vec::new();
	let mut lenders = Vec::new();

	for node in &snapshot.nodes {
		match band_of(node) {
			Some(Band::Buyers) => buyers.push(node.id),
			Some(Band::Tier1) => tier1.push(node.id),
			Some(Band::Tier2) => tier2.push(node.id),
			Some(Band::Tier3) => tier3.push(node.id),
			Some(Band::Lenders) => lenders.push(node.id),
			None => log::debug!("node {} matches no layout band, omitted", node.id),
		}
	}

	let mut positions = HashMap::with_capacity(snapshot.nodes.len());
	let center_x = CANVAS_WIDTH / 2.0;

	// Buyers across the top, centered with fixed 180-unit spacing.
	for (i, id) in buyers.iter().enumerate() {
		let x = center_x + (i as f64 - (buyers.len() as f64 - 1.0) / 2.0) * 180.0;
		positions.insert(*id, Position { x, y: 70.0 });
	}
	for (i, id) in tier1.iter().enumerate() {
		let x = spread(100.0, CANVAS_WIDTH - 200.0, tier1.len(), i);
		positions.insert(*id, Position { x, y: 190.0 });
	}
	for (i, id) in tier2.iter().enumerate() {
		let x = spread(120.0, CANVAS_WIDTH - 240.0, tier2.len(), i);
		positions.insert(*id, Position { x, y: 320.0 });
	}
	for (i, id) in tier3.iter().enumerate() {
		let x = spread(150.0, CANVAS_WIDTH - 300.0, tier3.len(), i);
		positions.insert(*id, Position { x, y: 440.0 });
	}
	// Lenders run down the right edge.
	for (i, id) in lenders.iter().enumerate() {
		positions.insert(
			*id,
			Position {
				x: CANVAS_WIDTH - 60.0,
				y: 150.0 + (i as f64) * 130.0,
			},
		);
	}

	positions
}
