//! Browser host for a particle field.
//!
//! Owns everything with a browser-managed lifetime: DOM listeners, the
//! `requestAnimationFrame` loop, and the resize debounce timer. Every
//! listener is registered through [`Listeners`] so `dispose` removes exactly
//! what was added.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::WasmClosure;
use wasm_bindgen::prelude::*;
use web_sys::{
	AddEventListenerOptions, Event, EventTarget, HtmlCanvasElement, MouseEvent, TouchEvent, Window,
};

use super::canvas::CanvasSurface;
use super::config::{ListenTarget, SwarmConfig};
use super::error::SwarmError;
use super::field::ParticleField;
use super::input::{InputEvent, InputQueue, scroll_progress};
use super::types::Viewport;

type SharedField = Rc<RefCell<ParticleField<CanvasSurface>>>;
type SharedQueue = Rc<RefCell<InputQueue>>;

fn window() -> Result<Window, SwarmError> {
	web_sys::window().ok_or_else(|| SwarmError::Environment("no window".into()))
}

fn as_function<T: ?Sized + WasmClosure>(closure: &Closure<T>) -> &js_sys::Function {
	closure.as_ref().unchecked_ref()
}

/// Viewport size the swarm fills. Uses the document's client height so
/// mobile address bars collapsing do not resize the canvas.
fn viewport_size(window: &Window) -> Viewport {
	let width = window
		.inner_width()
		.ok()
		.and_then(|v| v.as_f64())
		.unwrap_or(0.0);
	let height = window
		.document()
		.and_then(|d| d.document_element())
		.map(|e| e.client_height() as f64)
		.filter(|h| *h > 0.0)
		.or_else(|| window.inner_height().ok().and_then(|v| v.as_f64()))
		.unwrap_or(0.0);
	Viewport::new(width, height)
}

/// Converts client coordinates to coordinates relative to the canvas.
fn canvas_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> InputEvent {
	let rect = canvas.get_bounding_client_rect();
	InputEvent::PointerMove {
		x: client_x as f64 - rect.left(),
		y: client_y as f64 - rect.top(),
	}
}

struct Registration {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

/// Listener registry with symmetric add/remove.
#[derive(Default)]
pub struct Listeners {
	registered: Vec<Registration>,
}

impl Listeners {
	/// Attaches `handler` to `target` and records it for removal.
	pub fn add(
		&mut self,
		target: &EventTarget,
		event: &'static str,
		passive: bool,
		handler: impl FnMut(Event) + 'static,
	) -> Result<(), SwarmError> {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		let options = AddEventListenerOptions::new();
		options.set_passive(passive);
		target
			.add_event_listener_with_callback_and_add_event_listener_options(
				event,
				as_function(&callback),
				&options,
			)
			.map_err(|e| SwarmError::Environment(super::error::describe_js(&e)))?;
		self.registered.push(Registration {
			target: target.clone(),
			event,
			callback,
		});
		Ok(())
	}

	/// Detaches every recorded listener.
	pub fn remove_all(&mut self) {
		for r in self.registered.drain(..) {
			let _ = r
				.target
				.remove_event_listener_with_callback(r.event, as_function(&r.callback));
		}
	}

	pub fn len(&self) -> usize {
		self.registered.len()
	}
}

/// Trailing-edge debounce around `setTimeout`. Re-arming cancels the
/// pending timer.
struct Debounce {
	delay_ms: i32,
	handle: Rc<Cell<Option<i32>>>,
	fire: Closure<dyn FnMut()>,
}

impl Debounce {
	fn new(delay_ms: u32, mut action: impl FnMut() + 'static) -> Self {
		let handle = Rc::new(Cell::new(None));
		let handle_fire = handle.clone();
		let fire = Closure::<dyn FnMut()>::new(move || {
			handle_fire.set(None);
			action();
		});
		Self {
			delay_ms: delay_ms.min(i32::MAX as u32) as i32,
			handle,
			fire,
		}
	}

	fn arm(&self) {
		let Ok(window) = window() else {
			return;
		};
		self.cancel();
		match window.set_timeout_with_callback_and_timeout_and_arguments_0(
			as_function(&self.fire),
			self.delay_ms,
		) {
			Ok(id) => self.handle.set(Some(id)),
			Err(_) => warn!("swarm: could not arm resize timer"),
		}
	}

	fn cancel(&self) {
		if let (Some(id), Ok(window)) = (self.handle.take(), window()) {
			window.clear_timeout_with_handle(id);
		}
	}
}

/// The `requestAnimationFrame` loop. The callback re-schedules itself only
/// while the field reports it should keep running.
struct FrameLoop {
	callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	handle: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
	fn start(field: SharedField, queue: SharedQueue) -> Result<Self, SwarmError> {
		let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
		let handle = Rc::new(Cell::new(None));
		let (callback_inner, handle_inner) = (Rc::downgrade(&callback), handle.clone());

		*callback.borrow_mut() = Some(Closure::new(move || {
			handle_inner.set(None);
			let events = queue.borrow_mut().drain();
			let keep_going = {
				let mut field = field.borrow_mut();
				match field.frame(events) {
					Ok(running) => running,
					Err(e) => {
						warn!("swarm: frame failed, stopping animation: {e}");
						field.dispose();
						false
					}
				}
			};
			if !keep_going {
				return;
			}
			let Some(callback) = callback_inner.upgrade() else {
				return;
			};
			if let (Some(cb), Ok(window)) = (callback.borrow().as_ref(), window()) {
				match window.request_animation_frame(as_function(cb)) {
					Ok(id) => handle_inner.set(Some(id)),
					Err(_) => warn!("swarm: requestAnimationFrame rejected"),
				}
			}
		}));

		if let Some(cb) = callback.borrow().as_ref() {
			let id = window()?
				.request_animation_frame(as_function(cb))
				.map_err(|e| SwarmError::Environment(super::error::describe_js(&e)))?;
			handle.set(Some(id));
		}
		Ok(Self { callback, handle })
	}

	fn stop(&self) {
		if let (Some(id), Ok(window)) = (self.handle.take(), window()) {
			let _ = window.cancel_animation_frame(id);
		}
		self.callback.borrow_mut().take();
	}
}

/// A running swarm bound to one canvas for its mounted lifetime.
pub struct SwarmHost {
	field: SharedField,
	frames: Option<FrameLoop>,
	listeners: Listeners,
	resize: Option<Rc<Debounce>>,
}

impl SwarmHost {
	/// Builds the field against `canvas`, wires listeners, and schedules the
	/// first frame.
	pub fn mount(canvas: HtmlCanvasElement, config: SwarmConfig) -> Result<Self, SwarmError> {
		let window = window()?;
		let surface = CanvasSurface::new(canvas.clone(), window.device_pixel_ratio())?;
		let mut rng = StdRng::from_entropy();
		let field = ParticleField::new(surface, viewport_size(&window), config.clone(), &mut rng)?;
		let field: SharedField = Rc::new(RefCell::new(field));
		let queue: SharedQueue = Rc::new(RefCell::new(InputQueue::default()));

		let mut host = Self {
			field: field.clone(),
			frames: None,
			listeners: Listeners::default(),
			resize: None,
		};
		// On failure `host` drops here, which removes what was registered.
		host.listen(&window, &canvas, &config, &queue)?;
		host.frames = Some(FrameLoop::start(field, queue)?);

		info!(
			"swarm: mounted with {} listeners ({:?} touch)",
			host.listeners.len(),
			config.touch
		);
		Ok(host)
	}

	fn listen(
		&mut self,
		win: &Window,
		canvas: &HtmlCanvasElement,
		config: &SwarmConfig,
		queue: &SharedQueue,
	) -> Result<(), SwarmError> {
		let window_target: &EventTarget = win.as_ref();
		let canvas_target: &EventTarget = canvas.as_ref();
		let resolve = |target: ListenTarget| -> Result<EventTarget, SwarmError> {
			match target {
				ListenTarget::Canvas => Ok(canvas_target.clone()),
				ListenTarget::Window => Ok(window_target.clone()),
				ListenTarget::DocumentElement => win
					.document()
					.and_then(|d| d.document_element())
					.map(EventTarget::from)
					.ok_or_else(|| SwarmError::Environment("no document element".into())),
			}
		};
		let move_target = resolve(config.pointer_scope.move_target())?;
		let leave_target = resolve(config.pointer_scope.leave_target())?;

		let (q, c) = (queue.clone(), canvas.clone());
		self.listeners.add(&move_target, "mousemove", true, move |ev| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				q.borrow_mut()
					.push(canvas_point(&c, ev.client_x(), ev.client_y()));
			}
		})?;
		let q = queue.clone();
		self.listeners.add(&leave_target, "mouseleave", true, move |_| {
			q.borrow_mut().push(InputEvent::PointerLeave);
		})?;

		let passive = config.touch.passive();
		for event in ["touchstart", "touchmove"] {
			let (q, c) = (queue.clone(), canvas.clone());
			self.listeners.add(canvas_target, event, passive, move |ev| {
				if !passive {
					ev.prevent_default();
				}
				let touch = ev
					.dyn_ref::<TouchEvent>()
					.and_then(|t| t.touches().get(0));
				if let Some(touch) = touch {
					q.borrow_mut()
						.push(canvas_point(&c, touch.client_x(), touch.client_y()));
				}
			})?;
		}
		let q = queue.clone();
		self.listeners.add(canvas_target, "touchend", passive, move |ev| {
			if !passive {
				ev.prevent_default();
			}
			q.borrow_mut().push(InputEvent::PointerLeave);
		})?;

		let q = queue.clone();
		let push_resize = move || {
			let Ok(window) = window() else {
				return;
			};
			let viewport = viewport_size(&window);
			debug!(
				"swarm: resize to {}x{} queued",
				viewport.width, viewport.height
			);
			q.borrow_mut().push(InputEvent::Resize(viewport));
		};
		match config.resize_debounce_ms {
			Some(delay) => {
				let debounce = Rc::new(Debounce::new(delay, push_resize));
				let armed = debounce.clone();
				self.listeners
					.add(window_target, "resize", true, move |_| armed.arm())?;
				self.resize = Some(debounce);
			}
			None => {
				self.listeners
					.add(window_target, "resize", true, move |_| push_resize())?;
			}
		}

		if config.scroll_drift.is_some() {
			let q = queue.clone();
			let push_scroll = move || {
				let Ok(window) = window() else {
					return;
				};
				let scroll_y = window.scroll_y().unwrap_or(0.0);
				let scroll_height = window
					.document()
					.and_then(|d| d.document_element())
					.map_or(0.0, |e| e.scroll_height() as f64);
				let inner_height = window
					.inner_height()
					.ok()
					.and_then(|v| v.as_f64())
					.unwrap_or(0.0);
				q.borrow_mut().push(InputEvent::Scroll {
					progress: scroll_progress(scroll_y, scroll_height, inner_height),
				});
			};
			push_scroll();
			self.listeners
				.add(window_target, "scroll", true, move |_| push_scroll())?;
		}

		Ok(())
	}

	/// Cancels the pending frame and resize timer, removes every listener,
	/// and clears the canvas. Safe to call more than once.
	pub fn dispose(&mut self) {
		if let Some(frames) = self.frames.take() {
			frames.stop();
		}
		if let Some(resize) = self.resize.take() {
			resize.cancel();
		}
		self.listeners.remove_all();
		// An in-flight frame holds the borrow; it completes and sees Disposed next time.
		if let Ok(mut field) = self.field.try_borrow_mut() {
			field.dispose();
		}
	}
}

impl Drop for SwarmHost {
	fn drop(&mut self) {
		self.dispose();
	}
}
