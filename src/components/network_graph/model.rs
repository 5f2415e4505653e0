//! Typed snapshot of the supply-chain relationship graph.
//!
//! The snapshot arrives pre-computed from the analytics backend: nodes,
//! directed edges, carousel cycles and communities are all external inputs.
//! Once decoded a snapshot is immutable; everything downstream (layout,
//! styles, panels) is re-derived from it.

use serde::Deserialize;
use thiserror::Error;

/// Opaque entity identifier assigned by the backend.
pub type NodeId = i64;

/// Snapshot decoding failure. Only structurally invalid input is an error;
/// inconsistencies like dangling edge references are tolerated downstream.
#[derive(Debug, Error)]
pub enum SnapshotError {
	#[error("malformed snapshot: {0}")]
	Malformed(String),
}

/// Role of an entity in the financing program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
	Buyer,
	Supplier,
	Lender,
}

impl EntityType {
	pub fn label(self) -> &'static str {
		match self {
			EntityType::Buyer => "Buyer",
			EntityType::Supplier => "Supplier",
			EntityType::Lender => "Lender",
		}
	}

	pub fn color(self) -> &'static str {
		match self {
			EntityType::Buyer => "#3b82f6",
			EntityType::Supplier => "#10b981",
			EntityType::Lender => "#f59e0b",
		}
	}
}

/// Supplier depth in the chain; only suppliers carry a tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum SupplierTier {
	#[serde(rename = "tier_1")]
	Tier1,
	#[serde(rename = "tier_2")]
	Tier2,
	#[serde(rename = "tier_3")]
	Tier3,
}

impl SupplierTier {
	pub fn label(self) -> &'static str {
		match self {
			SupplierTier::Tier1 => "Tier 1",
			SupplierTier::Tier2 => "Tier 2",
			SupplierTier::Tier3 => "Tier 3",
		}
	}

	pub fn color(self) -> &'static str {
		match self {
			SupplierTier::Tier1 => "#10b981",
			SupplierTier::Tier2 => "#06b6d4",
			SupplierTier::Tier3 => "#8b5cf6",
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct NetworkNode {
	pub id: NodeId,
	pub name: String,
	pub entity_type: EntityType,
	#[serde(default)]
	pub tier: Option<SupplierTier>,
	#[serde(default)]
	pub risk_score: f64,
	#[serde(default = "default_node_size")]
	pub size: f64,
}

fn default_node_size() -> f64 {
	10.0
}

/// Directed trade/financing relationship. Duplicate (source, target) pairs
/// are allowed; the graph is a multigraph.
#[derive(Clone, Debug, Deserialize)]
pub struct NetworkEdge {
	pub source: NodeId,
	pub target: NodeId,
	#[serde(default)]
	pub relationship_type: Option<String>,
	#[serde(default)]
	pub volume: f64,
	#[serde(default)]
	pub risk_score: f64,
}

/// One immutable fetch of the full relationship graph.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphSnapshot {
	pub nodes: Vec<NetworkNode>,
	pub edges: Vec<NetworkEdge>,
	#[serde(default)]
	pub carousel_cycles: Vec<Vec<NodeId>>,
	#[serde(default)]
	pub communities: Vec<Vec<NodeId>>,
}

impl GraphSnapshot {
	/// Decode a snapshot from the analytics API payload. Missing required
	/// fields or an unknown `entity_type` fail here; an empty node list is
	/// legal and simply produces an empty layout.
	pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
		serde_json::from_str(raw).map_err(|e| SnapshotError::Malformed(e.to_string()))
	}

	pub fn node(&self, id: NodeId) -> Option<&NetworkNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Display name for panels; falls back to the raw id when the member
	/// reference dangles.
	pub fn node_name(&self, id: NodeId) -> String {
		self.node(id)
			.map(|n| n.name.clone())
			.unwrap_or_else(|| format!("#{id}"))
	}
}

/// Ranked-entity listing row from the analytics API, used only by the
/// "highest risk entities" panel.
#[derive(Clone, Debug, Deserialize)]
pub struct EntityProfile {
	pub id: NodeId,
	pub name: String,
	pub entity_type: EntityType,
	#[serde(default)]
	pub tier: Option<SupplierTier>,
	#[serde(default)]
	pub risk_score: f64,
	#[serde(default)]
	pub country: Option<String>,
}

/// Entities with risk above 30, highest first, capped at 8 rows.
pub fn top_risk_entities(entities: &[EntityProfile]) -> Vec<&EntityProfile> {
	let mut ranked: Vec<&EntityProfile> =
		entities.iter().filter(|e| e.risk_score > 30.0).collect();
	ranked.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
	ranked.truncate(8);
	ranked
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_full_snapshot() {
		let raw = r#"{
			"nodes": [
				{"id": 1, "name": "MegaCorp", "entity_type": "buyer", "risk_score": 12.5, "size": 30},
				{"id": 2, "name": "Acme Parts", "entity_type": "supplier", "tier": "tier_1", "risk_score": 61.0, "size": 18},
				{"id": 3, "name": "First Capital", "entity_type": "lender", "risk_score": 5.0, "size": 22}
			],
			"edges": [
				{"source": 2, "target": 1, "relationship_type": "supplies", "volume": 120000.0, "risk_score": 40.0}
			],
			"carousel_cycles": [[1, 2]],
			"communities": [[1, 2, 3]]
		}"#;
		let snap = GraphSnapshot::from_json(raw).unwrap();
		assert_eq!(snap.nodes.len(), 3);
		assert_eq!(snap.nodes[1].tier, Some(SupplierTier::Tier1));
		assert_eq!(snap.edges[0].relationship_type.as_deref(), Some("supplies"));
		assert_eq!(snap.carousel_cycles, vec![vec![1, 2]]);
		assert_eq!(snap.node_name(2), "Acme Parts");
		assert_eq!(snap.node_name(99), "#99");
	}

	#[test]
	fn optional_fields_default() {
		let raw = r#"{
			"nodes": [{"id": 7, "name": "N", "entity_type": "supplier"}],
			"edges": [{"source": 7, "target": 7}]
		}"#;
		let snap = GraphSnapshot::from_json(raw).unwrap();
		assert_eq!(snap.nodes[0].tier, None);
		assert_eq!(snap.nodes[0].risk_score, 0.0);
		assert_eq!(snap.nodes[0].size, 10.0);
		assert!(snap.carousel_cycles.is_empty());
		assert!(snap.communities.is_empty());
	}

	#[test]
	fn empty_node_list_is_legal() {
		let snap = GraphSnapshot::from_json(r#"{"nodes": [], "edges": []}"#).unwrap();
		assert!(snap.nodes.is_empty());
	}

	#[test]
	fn rejects_unknown_entity_type() {
		let raw = r#"{"nodes": [{"id": 1, "name": "X", "entity_type": "broker"}], "edges": []}"#;
		assert!(matches!(
			GraphSnapshot::from_json(raw),
			Err(SnapshotError::Malformed(_))
		));
	}

	#[test]
	fn rejects_missing_required_fields() {
		let raw = r#"{"nodes": [{"id": 1, "entity_type": "buyer"}], "edges": []}"#;
		assert!(GraphSnapshot::from_json(raw).is_err());
		assert!(GraphSnapshot::from_json("not json").is_err());
	}

	fn profile(id: NodeId, risk: f64) -> EntityProfile {
		EntityProfile {
			id,
			name: format!("E{id}"),
			entity_type: EntityType::Supplier,
			tier: Some(SupplierTier::Tier2),
			risk_score: risk,
			country: Some("DE".into()),
		}
	}

	#[test]
	fn top_risk_filters_sorts_and_caps() {
		let entities: Vec<EntityProfile> = (0..12).map(|i| profile(i, i as f64 * 10.0)).collect();
		let ranked = top_risk_entities(&entities);
		assert_eq!(ranked.len(), 8);
		assert_eq!(ranked[0].id, 11);
		assert!(ranked.windows(2).all(|w| w[0].risk_score >= w[1].risk_score));
		assert!(ranked.iter().all(|e| e.risk_score > 30.0));
	}
}
