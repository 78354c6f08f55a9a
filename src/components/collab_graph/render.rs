//! Canvas rendering for the collaboration graph.
//!
//! Draws the scene back to front in a fixed order: links first, then for
//! each node its translucent outer ring, filled body, and first-name
//! label. Each frame consumes only the current simulation positions and
//! the smoothed visual state; colors and sizes are fixed at load time and
//! never change on tick.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::encoding::archetype_color;
use super::state::GraphState;
use super::theme::{Color, Theme};

/// Vertical gap between the node edge and its label baseline.
const LABEL_OFFSET: f64 = 12.0;
const LABEL_FONT: &str = "11px sans-serif";

/// Renders the complete scene for the current frame.
pub fn render(state: &GraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_links(state, ctx, theme);
	draw_nodes(state, ctx, theme);

	ctx.restore();
}

fn draw_links(state: &GraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	// One opacity for every link: dimming is filter-wide, not per endpoint.
	let alpha = state.visual.link_alpha();
	ctx.set_stroke_style_str(&theme.link.with_alpha(alpha).to_css());

	for link in state.sim.links() {
		let source = &state.sim.nodes()[link.source];
		let target = &state.sim.nodes()[link.target];
		ctx.set_line_width(link.width);
		ctx.begin_path();
		ctx.move_to(source.x, source.y);
		ctx.line_to(target.x, target.y);
		ctx.stroke();
	}
}

fn draw_nodes(state: &GraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	for (index, body) in state.sim.nodes().iter().enumerate() {
		let node = &state.nodes[index];
		let group_alpha = state.visual.node_alpha(index);
		let emphasis = state.visual.ring_emphasis(index);
		let color = Color::parse(archetype_color(&node.archetype));

		// Outer ring: archetype color at low opacity, widening and
		// brightening with the search-highlight emphasis.
		let ring_alpha =
			theme.ring_alpha + (theme.ring_highlight_alpha - theme.ring_alpha) * emphasis;
		let ring_width =
			theme.ring_width + (theme.ring_highlight_width - theme.ring_width) * emphasis;
		ctx.begin_path();
		let _ = ctx.arc(body.x, body.y, body.radius + theme.ring_offset, 0.0, TAU);
		ctx.set_stroke_style_str(&color.with_alpha(ring_alpha * group_alpha).to_css());
		ctx.set_line_width(ring_width);
		ctx.stroke();

		// Main body: same color, higher opacity, visible stroke.
		ctx.begin_path();
		let _ = ctx.arc(body.x, body.y, body.radius, 0.0, TAU);
		ctx.set_fill_style_str(&color.with_alpha(theme.body_alpha * group_alpha).to_css());
		ctx.fill();
		ctx.set_stroke_style_str(
			&theme
				.body_stroke
				.with_alpha(theme.body_stroke.a * group_alpha)
				.to_css(),
		);
		ctx.set_line_width(theme.body_stroke_width);
		ctx.stroke();

		// First name only, centered below the node, offset by its radius.
		let label = node.first_name();
		if !label.is_empty() {
			ctx.set_fill_style_str(&theme.label.with_alpha(group_alpha).to_css());
			ctx.set_font(LABEL_FONT);
			ctx.set_text_align("center");
			let _ = ctx.fill_text(label, body.x, body.y + body.radius + LABEL_OFFSET);
		}
	}
}
