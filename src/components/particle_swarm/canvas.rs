//! `Surface` backed by an HTML canvas 2D context.

use std::f64::consts::PI;

use glam::DVec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::error::{SwarmError, describe_js};
use super::surface::Surface;
use super::theme::Color;
use super::types::Viewport;

/// A canvas element and its 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	dpr: f64,
}

impl CanvasSurface {
	/// Acquires the 2D context. Fails with [`SwarmError::SurfaceUnavailable`]
	/// when the browser refuses one.
	pub fn new(canvas: HtmlCanvasElement, dpr: f64) -> Result<Self, SwarmError> {
		let ctx = canvas
			.get_context("2d")
			.map_err(|e| SwarmError::SurfaceUnavailable(describe_js(&e)))?
			.ok_or_else(|| SwarmError::SurfaceUnavailable("no 2d context".into()))?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| SwarmError::SurfaceUnavailable("context is not 2d".into()))?;
		let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
		Ok(Self { canvas, ctx, dpr })
	}

	fn circle(&self, center: DVec2, radius: f64) -> Result<(), SwarmError> {
		self.ctx.begin_path();
		self.ctx
			.arc(center.x, center.y, radius.max(0.0), 0.0, PI * 2.0)
			.map_err(SwarmError::from_js)
	}
}

impl Surface for CanvasSurface {
	fn device_pixel_ratio(&self) -> f64 {
		self.dpr
	}

	fn configure(&mut self, viewport: Viewport) -> Result<(), SwarmError> {
		let (w, h) = viewport.backing_size(self.dpr);
		self.canvas.set_width(w);
		self.canvas.set_height(h);

		let style = self.canvas.style();
		style
			.set_property("width", &format!("{}px", viewport.width))
			.map_err(SwarmError::from_js)?;
		style
			.set_property("height", &format!("{}px", viewport.height))
			.map_err(SwarmError::from_js)?;

		self.ctx.reset_transform().map_err(SwarmError::from_js)?;
		self.ctx
			.scale(self.dpr, self.dpr)
			.map_err(SwarmError::from_js)?;
		self.ctx.set_image_smoothing_enabled(true);
		// Not exposed by the pinned web-sys; set the property directly.
		js_sys::Reflect::set(
			&self.ctx,
			&"imageSmoothingQuality".into(),
			&"high".into(),
		)
		.map_err(SwarmError::from_js)?;
		Ok(())
	}

	fn clear(&mut self) {
		self.ctx.clear_rect(
			0.0,
			0.0,
			self.canvas.width() as f64,
			self.canvas.height() as f64,
		);
	}

	fn fill_circle(
		&mut self,
		center: DVec2,
		radius: f64,
		color: Color,
	) -> Result<(), SwarmError> {
		self.ctx.set_fill_style_str(&color.to_css());
		self.circle(center, radius)?;
		self.ctx.fill();
		Ok(())
	}

	fn fill_radial(
		&mut self,
		center: DVec2,
		inner_radius: f64,
		outer_radius: f64,
		inner: Color,
		outer: Color,
	) -> Result<(), SwarmError> {
		let gradient = self
			.ctx
			.create_radial_gradient(
				center.x,
				center.y,
				inner_radius.max(0.0),
				center.x,
				center.y,
				outer_radius.max(0.0),
			)
			.map_err(SwarmError::from_js)?;
		gradient
			.add_color_stop(0.0, &inner.to_css())
			.map_err(SwarmError::from_js)?;
		gradient
			.add_color_stop(1.0, &outer.to_css())
			.map_err(SwarmError::from_js)?;

		#[allow(deprecated)]
		self.ctx.set_fill_style(&gradient);
		self.circle(center, outer_radius)?;
		self.ctx.fill();
		Ok(())
	}

	fn stroke_line(
		&mut self,
		from: DVec2,
		to: DVec2,
		width: f64,
		color: Color,
	) -> Result<(), SwarmError> {
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(from.x, from.y);
		self.ctx.line_to(to.x, to.y);
		self.ctx.stroke();
		Ok(())
	}

	fn stroke_gradient_line(
		&mut self,
		from: DVec2,
		to: DVec2,
		width: f64,
		start: Color,
		end: Color,
	) -> Result<(), SwarmError> {
		let gradient = self.ctx.create_linear_gradient(from.x, from.y, to.x, to.y);
		gradient
			.add_color_stop(0.0, &start.to_css())
			.map_err(SwarmError::from_js)?;
		gradient
			.add_color_stop(1.0, &end.to_css())
			.map_err(SwarmError::from_js)?;

		#[allow(deprecated)]
		self.ctx.set_stroke_style(&gradient);
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(from.x, from.y);
		self.ctx.line_to(to.x, to.y);
		self.ctx.stroke();
		Ok(())
	}
}
