use eframe::egui::{self, Color32, Pos2, Vec2};
use std::f32::consts::PI;

use crate::geometry::{is_near_point, is_on_segment, BODY_TOLERANCE, HIT_RADIUS};
use crate::input::{InputHandle, InputId, TextInputHost};
use crate::surface::Surface;

const SHAFT_WIDTH: f32 = 3.0;
const ARROWHEAD_LEN: f32 = 10.0;
const HANDLE_RADIUS: f32 = 3.0;
const HANDLE_COLOR: Color32 = Color32::RED;

/// Where a label's text sits relative to the tail.
pub const LABEL_OFFSET: Vec2 = Vec2::new(10.0, -20.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    Plain,
    Labeled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    Head,
    Tail,
    Body,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LabelCommit {
    Stored,
    /// Nothing was typed; the owner should delete the marker.
    Discard,
}

/// Text attached to a labeled marker. While `text` is `None` the user is
/// still typing into `input`.
#[derive(Debug)]
pub struct Label {
    text: Option<String>,
    input: Option<InputHandle>,
}

impl Label {
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn input_id(&self) -> Option<InputId> {
        self.input.as_ref().map(InputHandle::id)
    }

    pub fn commit(&mut self, inputs: &mut impl TextInputHost) -> LabelCommit {
        let Some(handle) = self.input.as_ref() else {
            return LabelCommit::Stored;
        };
        let value = inputs.value(handle);
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return LabelCommit::Discard;
        }
        self.text = Some(trimmed.to_string());
        self.release(inputs);
        LabelCommit::Stored
    }

    fn release(&mut self, inputs: &mut impl TextInputHost) {
        if let Some(handle) = self.input.take() {
            inputs.destroy(handle);
        }
    }
}

#[derive(Debug)]
pub struct Marker {
    id: MarkerId,
    pub tail: Pos2,
    pub head: Pos2,
    color: Color32,
    label: Option<Label>,
}

impl Marker {
    pub fn plain(id: MarkerId, tail: Pos2, head: Pos2, color: Color32) -> Self {
        Self {
            id,
            tail,
            head,
            color,
            label: None,
        }
    }

    /// A labeled marker opens its text field next to the tail straight away.
    pub fn labeled(
        id: MarkerId,
        tail: Pos2,
        head: Pos2,
        color: Color32,
        inputs: &mut impl TextInputHost,
    ) -> Self {
        let input = inputs.create(tail + LABEL_OFFSET);
        Self {
            id,
            tail,
            head,
            color,
            label: Some(Label {
                text: None,
                input: Some(input),
            }),
        }
    }

    pub fn id(&self) -> MarkerId {
        self.id
    }

    #[allow(dead_code)]
    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn kind(&self) -> MarkerKind {
        if self.label.is_some() {
            MarkerKind::Labeled
        } else {
            MarkerKind::Plain
        }
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub fn label_mut(&mut self) -> Option<&mut Label> {
        self.label.as_mut()
    }

    pub fn hit_head(&self, p: Pos2) -> bool {
        is_near_point(p, self.head, HIT_RADIUS)
    }

    pub fn hit_tail(&self, p: Pos2) -> bool {
        is_near_point(p, self.tail, HIT_RADIUS)
    }

    pub fn hit_body(&self, p: Pos2) -> bool {
        is_on_segment(p, self.tail, self.head, BODY_TOLERANCE)
    }

    pub fn hit(&self, p: Pos2, region: Hit) -> bool {
        match region {
            Hit::Head => self.hit_head(p),
            Hit::Tail => self.hit_tail(p),
            Hit::Body => self.hit_body(p),
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.tail += delta;
        self.head += delta;
    }

    /// Move the pending text field back next to the tail. Call after every
    /// change to `tail`.
    pub fn sync_input_position(&self, inputs: &mut impl TextInputHost) {
        if let Some(handle) = self.label.as_ref().and_then(|l| l.input.as_ref()) {
            inputs.set_position(handle, self.tail + LABEL_OFFSET);
        }
    }

    pub fn set_visible(&self, visible: bool, inputs: &mut impl TextInputHost) {
        if let Some(handle) = self.label.as_ref().and_then(|l| l.input.as_ref()) {
            if visible {
                inputs.set_position(handle, self.tail + LABEL_OFFSET);
            }
            inputs.set_visible(handle, visible);
        }
    }

    /// Give back any text field this marker still owns.
    pub fn release(&mut self, inputs: &mut impl TextInputHost) {
        if let Some(label) = self.label.as_mut() {
            label.release(inputs);
        }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) {
        surface.line(self.tail, self.head, SHAFT_WIDTH, self.color);
        surface.fill_triangle(self.arrowhead(), self.color);
        surface.fill_circle(self.tail, HANDLE_RADIUS, HANDLE_COLOR);
        surface.fill_circle(self.head, HANDLE_RADIUS, HANDLE_COLOR);
        if let Some(text) = self.label.as_ref().and_then(Label::text) {
            surface.text(self.tail + LABEL_OFFSET, text, self.color);
        }
    }

    fn arrowhead(&self) -> [Pos2; 3] {
        let d = self.head - self.tail;
        let angle = d.y.atan2(d.x);
        let side = |a: f32| self.head - ARROWHEAD_LEN * egui::vec2(a.cos(), a.sin());
        [self.head, side(angle - PI / 6.0), side(angle + PI / 6.0)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::testing::RecordingInputs;
    use crate::surface::testing::{Op, RecordingSurface};
    use egui::pos2;

    fn arrow() -> Marker {
        Marker::plain(MarkerId(1), pos2(0.0, 0.0), pos2(100.0, 0.0), Color32::BLUE)
    }

    #[test]
    fn test_hit_regions() {
        let m = arrow();
        assert!(m.hit_head(pos2(95.0, 3.0)));
        assert!(m.hit_tail(pos2(4.0, -4.0)));
        assert!(!m.hit_tail(pos2(50.0, 0.0)));
        assert!(m.hit_body(pos2(50.0, 0.0)));
        assert!(!m.hit_body(pos2(50.0, 20.0)));
        assert!(!m.hit_body(pos2(104.0, 0.0)));
    }

    #[test]
    fn test_draw_shaft_head_and_handles() {
        let m = arrow();
        let mut surface = RecordingSurface::default();
        m.draw(&mut surface);

        assert_eq!(
            surface.ops[0],
            Op::Line(pos2(0.0, 0.0), pos2(100.0, 0.0), 3.0, Color32::BLUE)
        );
        let Op::Triangle(tri, color) = &surface.ops[1] else {
            panic!("expected arrowhead, got {:?}", surface.ops[1]);
        };
        assert_eq!(*color, Color32::BLUE);
        assert_eq!(tri[0], pos2(100.0, 0.0));
        // 10 long at +-30 degrees from the shaft
        let back = 100.0 - 10.0 * (PI / 6.0).cos();
        let spread = 10.0 * (PI / 6.0).sin();
        assert!((tri[1].x - back).abs() < 1e-3 && (tri[1].y - spread).abs() < 1e-3);
        assert!((tri[2].x - back).abs() < 1e-3 && (tri[2].y + spread).abs() < 1e-3);

        assert_eq!(surface.ops[2], Op::Circle(pos2(0.0, 0.0), 3.0, Color32::RED));
        assert_eq!(surface.ops[3], Op::Circle(pos2(100.0, 0.0), 3.0, Color32::RED));
        assert_eq!(surface.ops.len(), 4);
    }

    #[test]
    fn test_zero_length_marker_draws_and_hits() {
        let p = pos2(30.0, 30.0);
        let m = Marker::plain(MarkerId(2), p, p, Color32::GREEN);
        let mut surface = RecordingSurface::default();
        m.draw(&mut surface);
        assert_eq!(surface.ops.len(), 4);
        assert!(m.hit_body(pos2(31.0, 31.0)));
    }

    #[test]
    fn test_labeled_opens_input_near_tail() {
        let mut inputs = RecordingInputs::default();
        let m = Marker::labeled(
            MarkerId(3),
            pos2(40.0, 50.0),
            pos2(90.0, 50.0),
            Color32::BLUE,
            &mut inputs,
        );
        assert_eq!(m.kind(), MarkerKind::Labeled);
        let id = m.label().and_then(Label::input_id).unwrap();
        let field = inputs.field(id).unwrap();
        assert_eq!(field.pos, pos2(50.0, 30.0));
        assert!(field.visible);
    }

    #[test]
    fn test_commit_label_stores_trimmed_text_and_releases_input() {
        let mut inputs = RecordingInputs::default();
        let mut m = Marker::labeled(
            MarkerId(4),
            pos2(0.0, 0.0),
            pos2(50.0, 50.0),
            Color32::BLUE,
            &mut inputs,
        );
        let id = m.label().and_then(Label::input_id).unwrap();
        inputs.type_text(id, "  hello ");

        let label = m.label_mut().unwrap();
        assert_eq!(label.commit(&mut inputs), LabelCommit::Stored);
        assert_eq!(label.text(), Some("hello"));
        assert_eq!(label.input_id(), None);
        assert_eq!(inputs.destroyed, vec![id]);

        let mut surface = RecordingSurface::default();
        m.draw(&mut surface);
        assert_eq!(
            surface.ops.last(),
            Some(&Op::Text(pos2(10.0, -20.0), "hello".to_string()))
        );
    }

    #[test]
    fn test_commit_blank_label_discards() {
        let mut inputs = RecordingInputs::default();
        let mut m = Marker::labeled(
            MarkerId(5),
            pos2(0.0, 0.0),
            pos2(50.0, 50.0),
            Color32::BLUE,
            &mut inputs,
        );
        let id = m.label().and_then(Label::input_id).unwrap();
        inputs.type_text(id, "   ");
        assert_eq!(m.label_mut().unwrap().commit(&mut inputs), LabelCommit::Discard);
        // the caller decides when to release
        assert!(inputs.destroyed.is_empty());
        m.release(&mut inputs);
        m.release(&mut inputs);
        assert_eq!(inputs.destroyed, vec![id]);
    }

    #[test]
    fn test_sync_and_visibility_follow_tail() {
        let mut inputs = RecordingInputs::default();
        let mut m = Marker::labeled(
            MarkerId(6),
            pos2(0.0, 0.0),
            pos2(50.0, 50.0),
            Color32::BLUE,
            &mut inputs,
        );
        let id = m.label().and_then(Label::input_id).unwrap();

        m.translate(egui::vec2(5.0, 5.0));
        m.sync_input_position(&mut inputs);
        assert_eq!(inputs.field(id).unwrap().pos, pos2(15.0, -15.0));

        m.set_visible(false, &mut inputs);
        assert!(!inputs.field(id).unwrap().visible);
        m.tail = pos2(100.0, 100.0);
        m.set_visible(true, &mut inputs);
        let field = inputs.field(id).unwrap();
        assert!(field.visible);
        assert_eq!(field.pos, pos2(110.0, 80.0));
    }
}
