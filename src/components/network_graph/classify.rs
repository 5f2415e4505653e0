//! Render annotations derived from the snapshot: edge stroke classes,
//! node glow and radius, and the shared risk-band palette.

use std::collections::{HashMap, HashSet};

use super::model::{EntityType, GraphSnapshot, NetworkNode, NodeId};

pub const MIN_NODE_RADIUS: f64 = 14.0;
pub const MAX_NODE_RADIUS: f64 = 28.0;

/// Edge risk above this renders as high-risk.
pub const HIGH_RISK_EDGE_THRESHOLD: f64 = 60.0;
/// Node risk above this gets a glow ring.
pub const NODE_GLOW_THRESHOLD: f64 = 50.0;

/// Coarse bucketing of a continuous risk score, shared by node glow,
/// selection badges and the ranked-entities panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskBand {
	Low,
	Medium,
	High,
	Critical,
}

impl RiskBand {
	pub fn from_score(score: f64) -> Self {
		if score >= 75.0 {
			RiskBand::Critical
		} else if score >= 50.0 {
			RiskBand::High
		} else if score >= 25.0 {
			RiskBand::Medium
		} else {
			RiskBand::Low
		}
	}

	pub fn color(self) -> &'static str {
		match self {
			RiskBand::Low => "#10b981",
			RiskBand::Medium => "#f59e0b",
			RiskBand::High => "#f97316",
			RiskBand::Critical => "#ef4444",
		}
	}

	pub fn badge_class(self) -> &'static str {
		match self {
			RiskBand::Low => "low",
			RiskBand::Medium => "medium",
			RiskBand::High => "high",
			RiskBand::Critical => "critical",
		}
	}
}

/// Stroke class for one edge, chosen in priority order:
/// carousel, then high-risk, then normal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeClass {
	Carousel,
	HighRisk,
	Normal,
}

impl EdgeClass {
	pub fn stroke_color(self) -> &'static str {
		match self {
			EdgeClass::Carousel => "#ef4444",
			EdgeClass::HighRisk => "#f97316",
			EdgeClass::Normal => "#334155",
		}
	}

	pub fn stroke_width(self) -> f64 {
		match self {
			EdgeClass::Carousel => 2.5,
			EdgeClass::HighRisk => 1.8,
			EdgeClass::Normal => 1.0,
		}
	}

	/// Dash pattern; carousel edges are dashed to stand out.
	pub fn dash(self) -> Option<(f64, f64)> {
		match self {
			EdgeClass::Carousel => Some((6.0, 3.0)),
			_ => None,
		}
	}

	pub fn arrow_color(self) -> &'static str {
		match self {
			EdgeClass::Carousel => "#ef4444",
			_ => "#475569",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeStyle {
	pub display_radius: f64,
	pub glow: bool,
	pub glow_color: &'static str,
	pub base_color: &'static str,
}

/// Per-edge and per-node render attributes for one snapshot.
///
/// `edge_classes` stays aligned with `snapshot.edges`; an edge whose
/// endpoint is unknown carries `None` and is skipped by the renderer.
#[derive(Clone, Debug, Default)]
pub struct Annotations {
	pub edge_classes: Vec<Option<EdgeClass>>,
	pub node_styles: HashMap<NodeId, NodeStyle>,
}

/// Lenders always render amber; suppliers take their tier color when they
/// have one, otherwise the entity-type color.
fn base_color(node: &NetworkNode) -> &'static str {
	if node.entity_type == EntityType::Lender {
		return EntityType::Lender.color();
	}
	node.tier
		.map(|t| t.color())
		.unwrap_or_else(|| node.entity_type.color())
}

pub fn classify(snapshot: &GraphSnapshot) -> Annotations {
	let known: HashSet<NodeId> = snapshot.nodes.iter().map(|n| n.id).collect();

	let edge_classes = snapshot
		.edges
		.iter()
		.map(|edge| {
			if !known.contains(&edge.source) || !known.contains(&edge.target) {
				log::debug!("edge {} -> {} references unknown node, skipped", edge.source, edge.target);
				return None;
			}
			// Carousel membership is pairwise, not adjacency: both endpoints
			// co-occurring in any one cycle list is enough, so chords of a
			// cycle get highlighted too.
			let in_cycle = snapshot
				.carousel_cycles
				.iter()
				.any(|cycle| cycle.contains(&edge.source) && cycle.contains(&edge.target));
			Some(if in_cycle {
				EdgeClass::Carousel
			} else if edge.risk_score > HIGH_RISK_EDGE_THRESHOLD {
				EdgeClass::HighRisk
			} else {
				EdgeClass::Normal
			})
		})
		.collect();

	let node_styles = snapshot
		.nodes
		.iter()
		.map(|node| {
			let style = NodeStyle {
				display_radius: node.size.clamp(MIN_NODE_RADIUS, MAX_NODE_RADIUS),
				glow: node.risk_score > NODE_GLOW_THRESHOLD,
				glow_color: RiskBand::from_score(node.risk_score).color(),
				base_color: base_color(node),
			};
			(node.id, style)
		})
		.collect();

	Annotations {
		edge_classes,
		node_styles,
	}
}
