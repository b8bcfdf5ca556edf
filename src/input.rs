use eframe::egui;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InputId(u64);

/// Owned token for one text-input field. Not `Clone`: the single owner gives
/// it back through [`TextInputHost::destroy`], which consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct InputHandle(InputId);

impl InputHandle {
    pub fn id(&self) -> InputId {
        self.0
    }
}

/// Whatever hosts the on-screen fields used to type a label.
///
/// Fields are created visible with keyboard focus requested. The host reports
/// a field losing focus out of band (see [`EguiTextInputs::show`]); the core
/// only reads the value at that point.
pub trait TextInputHost {
    fn create(&mut self, pos: egui::Pos2) -> InputHandle;
    fn set_visible(&mut self, handle: &InputHandle, visible: bool);
    fn set_position(&mut self, handle: &InputHandle, pos: egui::Pos2);
    fn value(&self, handle: &InputHandle) -> String;
    fn destroy(&mut self, handle: InputHandle);
}

// ── egui host ──────────────────────────────────────────────────────────────

struct InputField {
    pos: egui::Pos2,
    buffer: String,
    visible: bool,
    wants_focus: bool,
}

#[derive(Default)]
pub struct EguiTextInputs {
    next_id: u64,
    fields: HashMap<InputId, InputField>,
}

impl EguiTextInputs {
    /// Draw every visible field over the canvas whose top-left corner is
    /// `origin`, returning the fields that lost focus this frame.
    pub fn show(&mut self, ctx: &egui::Context, origin: egui::Pos2) -> Vec<InputId> {
        let mut committed = Vec::new();
        for (id, field) in self.fields.iter_mut().filter(|(_, f)| f.visible) {
            egui::Area::new(egui::Id::new(("label_input", id.0)))
                .fixed_pos(origin + field.pos.to_vec2())
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    let te = ui.add(
                        egui::TextEdit::singleline(&mut field.buffer)
                            .desired_width(140.0)
                            .hint_text("label"),
                    );
                    if field.wants_focus {
                        te.request_focus();
                        field.wants_focus = false;
                    } else if te.lost_focus() {
                        committed.push(*id);
                    }
                });
        }
        committed
    }
}

impl TextInputHost for EguiTextInputs {
    fn create(&mut self, pos: egui::Pos2) -> InputHandle {
        let id = InputId(self.next_id);
        self.next_id += 1;
        self.fields.insert(
            id,
            InputField {
                pos,
                buffer: String::new(),
                visible: true,
                wants_focus: true,
            },
        );
        InputHandle(id)
    }

    fn set_visible(&mut self, handle: &InputHandle, visible: bool) {
        if let Some(field) = self.fields.get_mut(&handle.0) {
            field.visible = visible;
        }
    }

    fn set_position(&mut self, handle: &InputHandle, pos: egui::Pos2) {
        if let Some(field) = self.fields.get_mut(&handle.0) {
            field.pos = pos;
        }
    }

    fn value(&self, handle: &InputHandle) -> String {
        self.fields
            .get(&handle.0)
            .map(|f| f.buffer.clone())
            .unwrap_or_default()
    }

    fn destroy(&mut self, handle: InputHandle) {
        self.fields.remove(&handle.0);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_egui_inputs_lifecycle() {
        let mut inputs = EguiTextInputs::default();
        let a = inputs.create(egui::pos2(10.0, 10.0));
        let b = inputs.create(egui::pos2(20.0, 20.0));
        assert_ne!(a.id(), b.id());

        inputs.set_position(&a, egui::pos2(30.0, 40.0));
        inputs.set_visible(&a, false);
        let field = &inputs.fields[&a.id()];
        assert_eq!(field.pos, egui::pos2(30.0, 40.0));
        assert!(!field.visible);
        assert_eq!(inputs.value(&a), "");

        let a_id = a.id();
        inputs.destroy(a);
        assert!(!inputs.fields.contains_key(&a_id));
        assert!(inputs.fields.contains_key(&b.id()));
    }
}
