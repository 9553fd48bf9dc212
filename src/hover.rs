use glam::Vec2;

use crate::graph::NodeId;
use crate::palette::{HIGHLIGHT_COLOR, HIGHLIGHT_SCALE, Rgba};
use crate::pick::{BodyVisual, PickableBody};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(NodeId),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorStyle {
    #[default]
    Default,
    Interactive,
}

/// Receives the visible side effects of hover transitions.
pub trait HoverSink {
    fn highlight_applied(&mut self, body: &PickableBody);
    fn highlight_reverted(&mut self, body: &PickableBody);
    fn tooltip_show(&mut self, text: &str, at: Vec2);
    fn tooltip_hide(&mut self);
    fn cursor_changed(&mut self, cursor: CursorStyle);

    /// Pointer moved while staying on the same body.
    fn tooltip_moved(&mut self, _at: Vec2) {}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightStyle {
    pub color: Rgba,
    /// Multiplies the body's original scale.
    pub scale: f32,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            color: HIGHLIGHT_COLOR,
            scale: HIGHLIGHT_SCALE,
        }
    }
}

#[derive(Debug, Default)]
pub struct HoverController {
    state: HoverState,
    style: HighlightStyle,
    last_pointer: Option<Vec2>,
}

impl HoverController {
    pub fn new(style: HighlightStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn hovered(&self) -> Option<NodeId> {
        match self.state {
            HoverState::Idle => None,
            HoverState::Hovering(id) => Some(id),
        }
    }

    /// Feeds one pick result. A pick that names no body in `bodies` counts as a miss.
    pub fn update<S: HoverSink + ?Sized>(
        &mut self,
        pick: Option<NodeId>,
        pointer: Vec2,
        bodies: &mut [PickableBody],
        sink: &mut S,
    ) {
        let next = pick.and_then(|id| body_index(bodies, id));

        match (self.state, next) {
            (HoverState::Idle, None) => {}
            (HoverState::Hovering(current), Some(index)) if bodies[index].id() == current => {
                if self.last_pointer != Some(pointer) {
                    sink.tooltip_moved(pointer);
                }
            }
            (HoverState::Idle, Some(index)) => {
                self.apply(&mut bodies[index], pointer, sink);
                sink.cursor_changed(CursorStyle::Interactive);
            }
            (HoverState::Hovering(current), Some(index)) => {
                self.revert(current, bodies, sink);
                self.apply(&mut bodies[index], pointer, sink);
            }
            (HoverState::Hovering(current), None) => {
                self.revert(current, bodies, sink);
                self.leave(sink);
            }
        }

        self.last_pointer = Some(pointer);
    }

    /// Drops any highlight, e.g. when the pointer leaves the canvas.
    pub fn clear<S: HoverSink + ?Sized>(&mut self, bodies: &mut [PickableBody], sink: &mut S) {
        if let HoverState::Hovering(current) = self.state {
            self.revert(current, bodies, sink);
            self.leave(sink);
        }
        self.last_pointer = None;
    }

    fn apply<S: HoverSink + ?Sized>(
        &mut self,
        body: &mut PickableBody,
        pointer: Vec2,
        sink: &mut S,
    ) {
        body.visual = BodyVisual {
            color: self.style.color,
            scale: body.original().scale * self.style.scale,
        };
        self.state = HoverState::Hovering(body.id());
        tracing::trace!(node = %body.id(), name = %body.name, "hover highlight applied");

        sink.highlight_applied(body);
        sink.tooltip_show(&body.name, pointer);
    }

    fn revert<S: HoverSink + ?Sized>(
        &mut self,
        current: NodeId,
        bodies: &mut [PickableBody],
        sink: &mut S,
    ) {
        self.state = HoverState::Idle;
        let Some(index) = body_index(bodies, current) else {
            return;
        };

        let body = &mut bodies[index];
        body.restore();
        tracing::trace!(node = %body.id(), "hover highlight reverted");
        sink.highlight_reverted(body);
    }

    fn leave<S: HoverSink + ?Sized>(&mut self, sink: &mut S) {
        self.state = HoverState::Idle;
        sink.tooltip_hide();
        sink.cursor_changed(CursorStyle::Default);
    }
}

fn body_index(bodies: &[PickableBody], id: NodeId) -> Option<usize> {
    // bodies are normally built in node order
    if bodies.get(id.index()).is_some_and(|body| body.id() == id) {
        return Some(id.index());
    }
    bodies.iter().position(|body| body.id() == id)
}
