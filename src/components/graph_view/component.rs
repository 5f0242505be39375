use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use super::fetch::fetch_graph;
use super::state::{Geometry, RenderState};
use super::svg;

/// Force-directed graph panel for one document. Fetches the graph payload
/// from `api_path`, renders it into an owned SVG surface and animates the
/// layout until it settles. Re-runs whenever `document_id` or `api_path`
/// change; each run rebuilds everything from scratch.
///
/// Overlapping runs are not coordinated: if the endpoint is slow and the
/// props change meanwhile, both completions write independently. The later
/// clear detaches the earlier run's elements, so only its banner state can
/// interleave.
#[component]
pub fn GraphView(
	/// Identifier of the document the graph belongs to; used to tag the
	/// surface for later reference, not transmitted in the request.
	#[prop(into)]
	document_id: Signal<String>,
	/// Endpoint returning the graph payload JSON.
	#[prop(into)]
	api_path: Signal<String>,
	#[prop(default = 600.0)] width: f64,
	#[prop(default = 500.0)] height: f64,
	/// Opt-in axis pulls toward the center, off by default.
	#[prop(default = false)]
	axis_pull: bool,
) -> impl IntoView {
	let svg_ref = NodeRef::<leptos::svg::Svg>::new();
	let (backend_error, set_backend_error) = signal(false);

	Effect::new(move |_| {
		let Some(surface) = svg_ref.get() else {
			return;
		};
		let surface: Element = surface.into();
		let doc_id = document_id.get();
		let path = api_path.get();

		// A render starts from an empty surface; whatever a previous call
		// drew is discarded here, before the fetch suspends.
		svg::clear(&surface);
		let _ = surface.set_attribute("data-docid", &doc_id);
		let geometry = Geometry::from_surface(width, height);

		spawn_local(async move {
			let payload = match fetch_graph(&path).await {
				Ok(payload) => {
					set_backend_error.set(false);
					payload
				}
				Err(err) => {
					set_backend_error.set(true);
					log::error!("graph render for document {doc_id} failed: {err}");
					return;
				}
			};
			log::debug!(
				"document {doc_id}: {} nodes, {} links",
				payload.nodes.len(),
				payload.links.len()
			);

			let Some(document) = web_sys::window().and_then(|w| w.document()) else {
				return;
			};
			let mut state = RenderState::new(&payload, &geometry, axis_pull);
			let Some(layers) = svg::build(&document, &surface, &payload, &state) else {
				return;
			};
			svg::reposition(&layers, &state);

			// Free-running animation loop; stops rescheduling once the
			// simulation settles.
			let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
				Rc::new(RefCell::new(None));
			let animate_inner = animate.clone();
			*animate.borrow_mut() = Some(Closure::new(move || {
				let active = state.tick();
				svg::reposition(&layers, &state);
				if active {
					if let Some(ref cb) = *animate_inner.borrow() {
						let _ = web_sys::window()
							.unwrap()
							.request_animation_frame(cb.as_ref().unchecked_ref());
					}
				}
			}));
			if let Some(ref cb) = *animate.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		});
	});

	view! {
		<div class="graph-panel">
			<div class="graph-info bg-danger" class:hidden=move || !backend_error.get()>
				"Backend-Error"
			</div>
			<svg node_ref=svg_ref width=width height=height></svg>
		</div>
	}
}
