use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::layout::{CANVAS_HEIGHT, CANVAS_WIDTH};
use super::model::GraphSnapshot;
use super::render;
use super::state::NetworkState;

fn draw(state: &NetworkState, canvas: &HtmlCanvasElement) {
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")
		.unwrap()
		.unwrap()
		.dyn_into()
		.unwrap();
	render::render(state, &ctx);
}

/// Interactive network canvas. The layout is static, so there is no
/// animation loop; the canvas redraws only when the snapshot changes or an
/// interaction mutates the viewport.
#[component]
pub fn NetworkCanvas(
	#[prop(into)] snapshot: Signal<GraphSnapshot>,
	/// Written on click so the page can show the selected-entity card.
	selected: RwSignal<Option<super::model::NodeId>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<NetworkState>> =
		Rc::new(RefCell::new(NetworkState::new(GraphSnapshot::default())));

	let state_load = state.clone();
	Effect::new(move |_| {
		let snap = snapshot.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(CANVAS_WIDTH as u32);
		canvas.set_height(CANVAS_HEIGHT as u32);

		let mut s = state_load.borrow_mut();
		// A new snapshot invalidates the previous framing and selection.
		s.load_snapshot(snap);
		selected.set(None);
		draw(&s, &canvas);
	});

	let state_click = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		// The canvas may be CSS-scaled; map back into logical units.
		let x = (ev.client_x() as f64 - rect.left()) * CANVAS_WIDTH / rect.width();
		let y = (ev.client_y() as f64 - rect.top()) * CANVAS_HEIGHT / rect.height();

		let mut s = state_click.borrow_mut();
		match s.node_at(x, y) {
			Some(id) => s.select(id),
			None => s.clear_selection(),
		}
		selected.set(s.viewport().selected);
		draw(&s, &canvas);
	};

	let state_in = state.clone();
	let on_zoom_in = move |_: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let mut s = state_in.borrow_mut();
		s.zoom_in();
		draw(&s, &canvas.into());
	};

	let state_out = state.clone();
	let on_zoom_out = move |_: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let mut s = state_out.borrow_mut();
		s.zoom_out();
		draw(&s, &canvas.into());
	};

	view! {
		<div class="network-canvas" style="position: relative;">
			<canvas
				node_ref=canvas_ref
				class="network-graph-canvas"
				on:mousedown=on_mousedown
				style="display: block; width: 100%; cursor: pointer;"
			/>
			<div class="zoom-controls" style="position: absolute; top: 8px; right: 8px; display: flex; gap: 4px;">
				<button class="btn btn-ghost" on:click=on_zoom_in>"+"</button>
				<button class="btn btn-ghost" on:click=on_zoom_out>"\u{2212}"</button>
			</div>
		</div>
	}
}
