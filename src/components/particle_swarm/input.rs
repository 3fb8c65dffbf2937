//! Input handoff between DOM listeners and the frame tick.
//!
//! Listeners never touch the field directly. They push plain events onto a
//! shared queue, and the next frame drains the queue in arrival order before
//! updating.

use std::collections::VecDeque;

use super::types::Viewport;

/// An environment signal recorded by a listener.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
	/// Pointer or touch position in surface CSS pixels.
	PointerMove { x: f64, y: f64 },
	/// Mouse left the surface or the touch ended.
	PointerLeave,
	/// Page scroll as a fraction of the scrollable height.
	Scroll { progress: f64 },
	/// New viewport size, delivered after any debounce.
	Resize(Viewport),
}

/// FIFO of pending events, shared as `Rc<RefCell<InputQueue>>`.
#[derive(Debug, Default)]
pub struct InputQueue {
	events: VecDeque<InputEvent>,
}

impl InputQueue {
	/// Enqueues an event. Consecutive pointer moves and scrolls collapse
	/// into the latest one so a burst between frames stays bounded.
	pub fn push(&mut self, event: InputEvent) {
		let replaces_last = matches!(
			(self.events.back(), &event),
			(
				Some(InputEvent::PointerMove { .. }),
				InputEvent::PointerMove { .. }
			) | (Some(InputEvent::Scroll { .. }), InputEvent::Scroll { .. })
		);
		if replaces_last {
			self.events.pop_back();
		}
		self.events.push_back(event);
	}

	/// Takes every pending event, oldest first.
	pub fn drain(&mut self) -> Vec<InputEvent> {
		self.events.drain(..).collect()
	}
}

/// Scroll progress from the window's scroll offset and document metrics.
/// Pages that cannot scroll report zero.
pub fn scroll_progress(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
	let max_scroll = scroll_height - viewport_height;
	if max_scroll > 0.0 {
		(scroll_y / max_scroll).clamp(0.0, 1.0)
	} else {
		0.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn drain_preserves_arrival_order() {
		let mut queue = InputQueue::default();
		queue.push(InputEvent::PointerMove { x: 1.0, y: 2.0 });
		queue.push(InputEvent::PointerLeave);
		queue.push(InputEvent::Resize(Viewport::new(10.0, 20.0)));
		assert_eq!(
			queue.drain(),
			vec![
				InputEvent::PointerMove { x: 1.0, y: 2.0 },
				InputEvent::PointerLeave,
				InputEvent::Resize(Viewport::new(10.0, 20.0)),
			]
		);
		assert!(queue.drain().is_empty());
	}

	#[test]
	fn bursts_of_moves_collapse_to_latest() {
		let mut queue = InputQueue::default();
		for i in 0..50 {
			queue.push(InputEvent::PointerMove {
				x: i as f64,
				y: 0.0,
			});
		}
		queue.push(InputEvent::Scroll { progress: 0.1 });
		queue.push(InputEvent::Scroll { progress: 0.2 });
		assert_eq!(
			queue.drain(),
			vec![
				InputEvent::PointerMove { x: 49.0, y: 0.0 },
				InputEvent::Scroll { progress: 0.2 },
			]
		);
	}

	#[test]
	fn leave_is_never_collapsed_into_a_move() {
		let mut queue = InputQueue::default();
		queue.push(InputEvent::PointerMove { x: 0.0, y: 0.0 });
		queue.push(InputEvent::PointerLeave);
		queue.push(InputEvent::PointerMove { x: 5.0, y: 5.0 });
		assert_eq!(queue.drain().len(), 3);
	}

	#[test]
	fn scroll_progress_handles_short_pages() {
		assert_eq!(scroll_progress(300.0, 1600.0, 1000.0), 0.5);
		assert_eq!(scroll_progress(50.0, 800.0, 1000.0), 0.0);
		assert_eq!(scroll_progress(900.0, 1600.0, 1000.0), 1.0);
	}
}
