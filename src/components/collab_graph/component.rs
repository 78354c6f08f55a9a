//! Leptos component wrapping the collaboration graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel
//! event handlers for node dragging, panning, zooming, hover tooltips, and
//! click selection. An animation loop runs via `requestAnimationFrame`,
//! ticking the simulation and renderer each frame; the filter bar, legend,
//! tooltip, and detail panel are DOM overlays layered on top.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::filter::FilterState;
use super::panels::{DetailPanel, FilterBar, Legend, NodeTooltip};
use super::render;
use super::simulation::DRAG_ALPHA_TARGET;
use super::state::{CLICK_SLOP, GraphState};
use super::theme::Theme;
use super::types::{GraphData, GraphNode};

/// Bundles graph state with the visual theme for the animation loop and
/// event handlers.
struct GraphContext {
	state: GraphState,
	theme: Theme,
}

/// Renders the interactive collaboration network on a canvas element.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport. Explicit `width`/`height`
/// override automatic sizing. The graph is taken as loaded data: it is
/// never refetched or structurally changed after mount.
#[component]
pub fn CollabGraphCanvas(
	data: GraphData,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	// Selector options and legend entries, computed once from the loaded
	// graph.
	let departments = data.distinct_departments();
	let archetypes = data.distinct_archetypes();
	let legend_archetypes = archetypes.clone();

	let search = RwSignal::new(String::new());
	let department = RwSignal::new(String::new());
	let archetype = RwSignal::new(String::new());
	// Hovered node plus the pointer position that revealed it.
	let hovered: RwSignal<Option<(GraphNode, f64, f64)>> = RwSignal::new(None);
	let selected: RwSignal<Option<GraphNode>> = RwSignal::new(None);
	let viewport = RwSignal::new((0.0_f64, 0.0_f64));

	let measure = move |canvas: &HtmlCanvasElement, window: &Window| -> (f64, f64) {
		if fullscreen {
			(
				window
					.inner_width()
					.ok()
					.and_then(|w| w.as_f64())
					.unwrap_or(800.0),
				window
					.inner_height()
					.ok()
					.and_then(|h| h.as_f64())
					.unwrap_or(600.0),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		}
	};

	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = measure(&canvas, &window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		viewport.set((w, h));

		let ctx: Option<CanvasRenderingContext2d> = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok());
		let Some(ctx) = ctx else {
			error!("collab-graph: canvas 2d context unavailable");
			return;
		};

		let theme = Theme::default();
		let state = match GraphState::new(&data, w, h, &theme) {
			Ok(state) => state,
			Err(e) => {
				// Fatal dataset error: leave the visualization unrendered.
				error!("collab-graph: {e}");
				return;
			}
		};
		*context_init.borrow_mut() = Some(GraphContext { state, theme });

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = measure(&canvas_resize, &win);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			viewport.set((nw, nh));
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.state.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		let last_frame = RefCell::new(js_sys::Date::now());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = ((now - last_frame.replace(now)) / 1000.0).clamp(0.0, 0.1);
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick(dt);
				render::render(&c.state, &ctx, &c.theme);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Rebuild the filter snapshot on every input change and recompute the
	// per-node visibility targets from it.
	let context_filter = context.clone();
	Effect::new(move |_| {
		let filter = FilterState {
			search: search.get(),
			department: department.get(),
			archetype: archetype.get(),
		};
		if let Some(ref mut c) = *context_filter.borrow_mut() {
			c.state.apply_filter(&filter, &c.theme);
		}
	});

	let pointer_position = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some((
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(&ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			if let Some(idx) = c.state.node_at_position(x, y) {
				let body = &c.state.sim.nodes()[idx];
				let (nx, ny) = (body.x, body.y);
				c.state.drag.active = true;
				c.state.drag.node = Some(idx);
				c.state.drag.start_x = x;
				c.state.drag.start_y = y;
				c.state.drag.node_start_x = nx;
				c.state.drag.node_start_y = ny;
				c.state.drag.moved = false;
				// Pin to the grab point and keep the simulation warm for
				// the gesture's duration.
				c.state.sim.pin(idx, nx, ny);
				c.state.sim.reheat_target(DRAG_ALPHA_TARGET);
				hovered.set(None);
			} else {
				c.state.pan.active = true;
				c.state.pan.start_x = x;
				c.state.pan.start_y = y;
				c.state.pan.transform_start_x = c.state.transform.x;
				c.state.pan.transform_start_y = c.state.transform.y;
				c.state.pan.moved = false;
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(&ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.state.drag.active {
				if (x - c.state.drag.start_x).hypot(y - c.state.drag.start_y) > CLICK_SLOP {
					c.state.drag.moved = true;
				}
				if let Some(idx) = c.state.drag.node {
					let k = c.state.transform.k;
					let nx = c.state.drag.node_start_x + (x - c.state.drag.start_x) / k;
					let ny = c.state.drag.node_start_y + (y - c.state.drag.start_y) / k;
					c.state.sim.pin(idx, nx, ny);
				}
			} else if c.state.pan.active {
				if (x - c.state.pan.start_x).hypot(y - c.state.pan.start_y) > CLICK_SLOP {
					c.state.pan.moved = true;
				}
				c.state.transform.x = c.state.pan.transform_start_x + (x - c.state.pan.start_x);
				c.state.transform.y = c.state.pan.transform_start_y + (y - c.state.pan.start_y);
			} else {
				match c.state.node_at_position(x, y) {
					Some(idx) => hovered.set(Some((c.state.nodes[idx].clone(), x, y))),
					None => {
						if hovered.with_untracked(|h| h.is_some()) {
							hovered.set(None);
						}
					}
				}
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			if c.state.drag.active {
				if let Some(idx) = c.state.drag.node {
					// Release the pin so the simulation resumes free
					// placement, and let it cool back down.
					c.state.sim.unpin(idx);
					c.state.sim.cool();
					if !c.state.drag.moved {
						// A stationary press-release on a node opens the
						// detail panel. Hit-testing resolved the node
						// first, so this never falls through to the
						// background close below.
						selected.set(Some(c.state.nodes[idx].clone()));
					}
				}
				c.state.drag = Default::default();
			} else if c.state.pan.active {
				if !c.state.pan.moved {
					// Click on empty canvas closes the open panel.
					selected.set(None);
				}
				c.state.pan = Default::default();
			}
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			if c.state.drag.active {
				if let Some(idx) = c.state.drag.node {
					c.state.sim.unpin(idx);
				}
				c.state.sim.cool();
			}
			c.state.drag = Default::default();
			c.state.pan = Default::default();
		}
		hovered.set(None);
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(&ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.zoom_at(x, y, factor);
		}
	};

	view! {
		<div class="collab-graph-container">
			<canvas
				node_ref=canvas_ref
				class="collab-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<FilterBar
				search=search
				department=department
				archetype=archetype
				departments=departments
				archetypes=archetypes
			/>
			<Legend archetypes=legend_archetypes />
			{move || {
				hovered
					.get()
					.map(|(node, px, py)| {
						let (w, h) = viewport.get();
						view! {
							<NodeTooltip
								node=node
								pointer_x=px
								pointer_y=py
								container_width=w
								container_height=h
							/>
						}
					})
			}}
			{move || {
				selected
					.get()
					.map(|node| {
						view! {
							<DetailPanel
								node=node
								on_close=Callback::new(move |()| selected.set(None))
							/>
						}
					})
			}}
		</div>
	}
}
