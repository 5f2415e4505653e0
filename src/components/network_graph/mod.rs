mod classify;
mod component;
mod layout;
mod model;
mod render;
mod state;

pub use classify::RiskBand;
pub use component::NetworkCanvas;
pub use model::{
	EntityProfile, EntityType, GraphSnapshot, NetworkEdge, NetworkNode, NodeId, SnapshotError,
	SupplierTier, top_risk_entities,
};
