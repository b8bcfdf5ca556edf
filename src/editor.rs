use eframe::egui::{self, Color32, Pos2};
use std::f32::consts::SQRT_2;

use crate::geometry::distance;
use crate::input::{InputId, TextInputHost};
use crate::marker::{Hit, LabelCommit, Marker, MarkerId, MarkerKind};
use crate::store::AnnotationStore;

/// Pointer travel beyond which a click is the tail end of a drag.
pub const CLICK_MOVE_THRESHOLD: f32 = 5.0;

/// Shaft length of a freshly created marker.
pub const DEFAULT_LENGTH: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    None,
    Head,
    Tail,
    Body,
}

/// Everything the canvas edits during a session: the per-image markers plus
/// the transient pointer state.
pub struct EditorState {
    pub(crate) store: AnnotationStore,
    pub(crate) image_count: usize,
    pub(crate) current_image: usize,
    dragging: DragMode,
    selected: Option<MarkerId>,
    drag_anchor: Option<Pos2>,
    pointer_down: Option<Pos2>,
    next_id: u64,
}

impl EditorState {
    pub fn new(image_count: usize) -> Self {
        Self {
            store: AnnotationStore::default(),
            image_count,
            current_image: 0,
            dragging: DragMode::None,
            selected: None,
            drag_anchor: None,
            pointer_down: None,
            next_id: 0,
        }
    }

    pub fn current_image(&self) -> usize {
        self.current_image
    }

    pub fn dragging(&self) -> DragMode {
        self.dragging
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging() != DragMode::None
    }

    pub fn markers(&self) -> &[Marker] {
        self.store.get(self.current_image)
    }

    /// Search the active image: heads first, then tails, then bodies. Within
    /// each pass the earliest marker wins.
    pub fn hit_test(&self, pos: Pos2) -> Option<(MarkerId, Hit)> {
        let markers = self.markers();
        [Hit::Head, Hit::Tail, Hit::Body].into_iter().find_map(|region| {
            markers
                .iter()
                .find(|m| m.hit(pos, region))
                .map(|m| (m.id(), region))
        })
    }

    // ── Pointer events ─────────────────────────────────────────────────────

    pub fn pointer_pressed(&mut self, pos: Pos2) {
        self.pointer_down = Some(pos);
        let Some((id, region)) = self.hit_test(pos) else {
            return;
        };
        self.selected = Some(id);
        self.dragging = match region {
            Hit::Head => DragMode::Head,
            Hit::Tail => DragMode::Tail,
            Hit::Body => {
                self.drag_anchor = Some(pos);
                DragMode::Body
            }
        };
    }

    /// Returns true when a marker moved and the canvas needs repainting.
    pub fn pointer_moved(&mut self, pos: Pos2, inputs: &mut impl TextInputHost) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let mode = self.dragging;
        let anchor = self.drag_anchor;
        let Some(marker) = self.store.find_mut(self.current_image, id) else {
            return false;
        };
        match mode {
            DragMode::None => return false,
            DragMode::Head => marker.head = pos,
            DragMode::Tail => marker.tail = pos,
            DragMode::Body => {
                let Some(anchor) = anchor else {
                    return false;
                };
                marker.translate(pos - anchor);
                self.drag_anchor = Some(pos);
            }
        }
        marker.sync_input_position(inputs);
        true
    }

    pub fn pointer_released(&mut self) {
        self.dragging = DragMode::None;
        self.selected = None;
        self.drag_anchor = None;
    }

    /// Create a marker ending at `pos` unless the click is really the end of
    /// a drag or lands on an existing marker. Returns true when one was made.
    pub fn primary_click(
        &mut self,
        pos: Pos2,
        tool: Option<MarkerKind>,
        color: Color32,
        inputs: &mut impl TextInputHost,
    ) -> bool {
        let Some(kind) = tool else {
            return false;
        };
        if let Some(down) = self.pointer_down {
            if distance(down, pos) > CLICK_MOVE_THRESHOLD {
                return false;
            }
        }
        if self.hit_test(pos).is_some() {
            return false;
        }

        let id = MarkerId(self.next_id);
        self.next_id += 1;
        let offset = DEFAULT_LENGTH / SQRT_2;
        let tail = pos - egui::vec2(offset, offset);
        let marker = match kind {
            MarkerKind::Plain => Marker::plain(id, tail, pos, color),
            MarkerKind::Labeled => Marker::labeled(id, tail, pos, color, inputs),
        };
        log::debug!(
            "created {:?} marker {id:?} on image {}",
            marker.kind(),
            self.current_image
        );
        self.store.list_for(self.current_image).push(marker);
        true
    }

    /// Delete the first marker under `pos`, if any.
    pub fn secondary_click(&mut self, pos: Pos2, inputs: &mut impl TextInputHost) -> bool {
        let Some((id, _)) = self.hit_test(pos) else {
            return false;
        };
        if self.selected == Some(id) {
            self.pointer_released();
        }
        match self.store.remove(self.current_image, id) {
            Some(mut marker) => {
                marker.release(inputs);
                log::debug!("deleted marker {id:?} from image {}", self.current_image);
                true
            }
            None => false,
        }
    }

    /// The text field `input` lost focus: keep its text as the label, or
    /// drop the whole marker when nothing was typed.
    pub fn commit_label(&mut self, input: InputId, inputs: &mut impl TextInputHost) -> bool {
        let found = self.store.iter_mut().find_map(|(image, list)| {
            list.iter_mut()
                .find(|m| m.label().and_then(|l| l.input_id()) == Some(input))
                .map(|m| (image, m))
        });
        let Some((image, marker)) = found else {
            return false;
        };
        let Some(label) = marker.label_mut() else {
            return false;
        };
        match label.commit(inputs) {
            LabelCommit::Stored => {
                log::debug!("label committed on marker {:?}", marker.id());
            }
            LabelCommit::Discard => {
                let id = marker.id();
                marker.release(inputs);
                self.store.remove(image, id);
                log::debug!("empty label, discarded marker {id:?}");
            }
        }
        true
    }

    pub(crate) fn cancel_drag(&mut self) {
        self.pointer_released();
        self.pointer_down = None;
    }
}
