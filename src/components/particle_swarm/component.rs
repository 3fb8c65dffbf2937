//! Leptos component wrapping the particle swarm canvas.
//!
//! The component renders a canvas and, once it is mounted, hands it to a
//! [`SwarmHost`]. The host lives in a local stored value owned by the
//! component, so unmounting disposes it: listeners are removed and the
//! animation loop is cancelled.

use leptos::prelude::*;
use log::warn;
use web_sys::HtmlCanvasElement;

use super::config::SwarmConfig;
use super::host::SwarmHost;

/// Renders an animated particle swarm filling its positioned parent.
///
/// Pass a [`SwarmConfig`] to pick a look; the default is the widget preset.
/// Mount failures (no 2D context, invalid config) are logged and leave an
/// empty canvas.
#[component]
pub fn ParticleSwarm(
	#[prop(default = SwarmConfig::default())] config: SwarmConfig,
	#[prop(into, default = "swarm-canvas".to_string())] class: String,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let host = StoredValue::new_local(None::<SwarmHost>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if host.with_value(Option::is_some) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		match SwarmHost::mount(canvas, config.clone()) {
			Ok(mounted) => host.set_value(Some(mounted)),
			Err(e) => warn!("swarm: failed to mount: {e}"),
		}
	});

	on_cleanup(move || {
		host.try_update_value(|slot| {
			if let Some(mut mounted) = slot.take() {
				mounted.dispose();
			}
		});
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class=class
			style="position: absolute; inset: 0; display: block; cursor: none;"
		/>
	}
}
