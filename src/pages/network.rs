use leptos::prelude::*;

use crate::components::network_graph::{
	EntityProfile, EntityType, GraphSnapshot, NetworkCanvas, NetworkEdge, NetworkNode, NodeId,
	RiskBand, SupplierTier, top_risk_entities,
};

/// Demo snapshot standing in for the analytics API response.
fn sample_snapshot() -> GraphSnapshot {
	let node = |id: NodeId,
	            name: &str,
	            entity_type: EntityType,
	            tier: Option<SupplierTier>,
	            risk_score: f64,
	            size: f64| NetworkNode {
		id,
		name: name.to_string(),
		entity_type,
		tier,
		risk_score,
		size,
	};
	let edge = |source: NodeId, target: NodeId, risk_score: f64| NetworkEdge {
		source,
		target,
		relationship_type: Some("supplies".to_string()),
		volume: 0.0,
		risk_score,
	};

	GraphSnapshot {
		nodes: vec![
			node(1, "Atlas Retail Group", EntityType::Buyer, None, 22.0, 32.0),
			node(2, "Northwind Commerce", EntityType::Buyer, None, 35.0, 26.0),
			node(10, "Vector Components", EntityType::Supplier, Some(SupplierTier::Tier1), 78.0, 20.0),
			node(11, "Helio Fabrication", EntityType::Supplier, Some(SupplierTier::Tier1), 41.0, 16.0),
			node(12, "Crestline Textiles", EntityType::Supplier, Some(SupplierTier::Tier1), 12.0, 14.0),
			node(20, "Oriole Metalworks", EntityType::Supplier, Some(SupplierTier::Tier2), 66.0, 15.0),
			node(21, "Basalt Polymers", EntityType::Supplier, Some(SupplierTier::Tier2), 28.0, 12.0),
			node(30, "Juniper Raw Goods", EntityType::Supplier, Some(SupplierTier::Tier3), 9.0, 10.0),
			node(31, "Tidewater Mining", EntityType::Supplier, Some(SupplierTier::Tier3), 52.0, 11.0),
			node(40, "Meridian Capital", EntityType::Lender, None, 55.0, 24.0),
			node(41, "First Trade Finance", EntityType::Lender, None, 18.0, 18.0),
		],
		edges: vec![
			edge(10, 1, 72.0),
			edge(11, 1, 30.0),
			edge(12, 2, 15.0),
			edge(20, 10, 64.0),
			edge(21, 11, 20.0),
			edge(30, 21, 5.0),
			edge(31, 20, 48.0),
			edge(40, 10, 80.0),
			edge(10, 40, 75.0),
			edge(41, 12, 10.0),
		],
		carousel_cycles: vec![vec![10, 20, 40]],
		communities: vec![vec![1, 10, 11, 20, 40], vec![2, 12, 21, 30, 41]],
	}
}

/// Demo ranked-entity listing for the highest-risk panel.
fn sample_entities() -> Vec<EntityProfile> {
	let snap = sample_snapshot();
	let countries = ["DE", "PL", "VN", "US", "TR", "IN", "GB", "BR", "MX", "CZ", "NL"];
	snap.nodes
		.into_iter()
		.enumerate()
		.map(|(i, n)| EntityProfile {
			id: n.id,
			name: n.name,
			entity_type: n.entity_type,
			tier: n.tier,
			risk_score: n.risk_score,
			country: Some(countries[i % countries.len()].to_string()),
		})
		.collect()
}

/// Supply-chain network page: tiered graph canvas plus the carousel,
/// community and risk panels derived from the same snapshot.
#[component]
pub fn NetworkPage() -> impl IntoView {
	let snapshot = Signal::derive(sample_snapshot);
	let selected: RwSignal<Option<NodeId>> = RwSignal::new(None);

	let selected_card = move || {
		let snap = snapshot.get();
		selected
			.get()
			.and_then(|id| snap.node(id).cloned())
			.map(|node| {
				let band = RiskBand::from_score(node.risk_score);
				view! {
					<div class="card selected-entity">
						<div class="card-header">
							<h3>{node.name.clone()}</h3>
							<span class=format!("badge {}", band.badge_class())>
								{format!("Risk: {}", node.risk_score.round() as i64)}
							</span>
						</div>
						<p><strong>"Type: "</strong>{node.entity_type.label()}</p>
						{node.tier.map(|t| view! { <p><strong>"Tier: "</strong>{t.label()}</p> })}
					</div>
				}
			})
	};

	let cycle_list = move || {
		let snap = snapshot.get();
		if snap.carousel_cycles.is_empty() {
			return view! { <p class="muted">"No carousel cycles detected"</p> }.into_any();
		}
		snap.carousel_cycles
			.iter()
			.enumerate()
			.map(|(i, cycle)| {
				let path = cycle
					.iter()
					.map(|&id| snap.node_name(id))
					.collect::<Vec<_>>()
					.join(" → ");
				view! {
					<div class="cycle-row">
						<div class="cycle-title">{format!("Cycle #{}", i + 1)}</div>
						<div class="cycle-path">{format!("{path} → ↻")}</div>
					</div>
				}
			})
			.collect_view()
			.into_any()
	};

	let community_list = move || {
		let snap = snapshot.get();
		snap.communities
			.iter()
			.take(5)
			.enumerate()
			.map(|(i, members)| {
				let names = members
					.iter()
					.take(6)
					.map(|&id| snap.node_name(id))
					.collect::<Vec<_>>()
					.join(", ");
				let overflow = if members.len() > 6 {
					format!(" +{} more", members.len() - 6)
				} else {
					String::new()
				};
				view! {
					<div class="community-row">
						<div class="community-title">
							{format!("Cluster #{} ({} entities)", i + 1, members.len())}
						</div>
						<div class="community-members">{format!("{names}{overflow}")}</div>
					</div>
				}
			})
			.collect_view()
	};

	let risk_rows = move || {
		let entities = sample_entities();
		top_risk_entities(&entities)
			.into_iter()
			.map(|entity| {
				let band = RiskBand::from_score(entity.risk_score);
				let detail = format!(
					"{} · {} · {}",
					entity.entity_type.label(),
					entity.tier.map(|t| t.label()).unwrap_or("N/A"),
					entity.country.clone().unwrap_or_default(),
				);
				view! {
					<div class="risk-row">
						<div>
							<div class="risk-name">{entity.name.clone()}</div>
							<div class="risk-detail">{detail}</div>
						</div>
						<span class=format!("risk-score {}", band.badge_class())>
							{format!("{}", entity.risk_score.round() as i64)}
						</span>
					</div>
				}
			})
			.collect_view()
	};

	let legend = [
		("Buyer", EntityType::Buyer.color()),
		("Tier 1 Supplier", SupplierTier::Tier1.color()),
		("Tier 2 Supplier", SupplierTier::Tier2.color()),
		("Tier 3 Supplier", SupplierTier::Tier3.color()),
		("Lender", EntityType::Lender.color()),
	];

	view! {
		<div class="network-page">
			<div class="page-header">
				<h2>"Supply Chain Network"</h2>
				<p>"Graph topology with carousel detection & community analysis"</p>
			</div>

			<div class="network-layout">
				<div class="card network-card">
					<NetworkCanvas snapshot=snapshot selected=selected />
					<div class="network-legend">
						{legend
							.into_iter()
							.map(|(label, color)| {
								view! {
									<span class="legend-item">
										<span
											class="legend-dot"
											style=format!("background: {color};")
										/>
										{label}
									</span>
								}
							})
							.collect_view()}
					</div>
				</div>

				<div class="network-panels">
					{selected_card}
					<div class="card">
						<div class="card-header">
							<h3>"Carousel Cycles"</h3>
							<span class="badge critical">
								{move || snapshot.get().carousel_cycles.len()}
							</span>
						</div>
						{cycle_list}
					</div>
					<div class="card">
						<div class="card-header">
							<h3>"Communities"</h3>
							<span class="badge">
								{move || snapshot.get().communities.len()}
							</span>
						</div>
						{community_list}
					</div>
					<div class="card">
						<div class="card-header">
							<h3>"Highest Risk Entities"</h3>
						</div>
						{risk_rows}
					</div>
				</div>
			</div>
		</div>
	}
}
