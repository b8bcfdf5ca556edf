use eframe::egui;
use std::path::PathBuf;

use crate::backgrounds::Backgrounds;
use crate::editor::EditorState;
use crate::input::EguiTextInputs;
use crate::marker::MarkerKind;
use crate::surface::EguiSurface;

pub struct AnnotatorApp {
    editor: EditorState,
    inputs: EguiTextInputs,
    backgrounds: Backgrounds,
    canvas_size: egui::Vec2,

    // toolbar state
    tool: Option<MarkerKind>,
    color: [f32; 3],
    image_position: usize,
}

impl AnnotatorApp {
    pub fn new(ctx: &egui::Context, paths: &[PathBuf], canvas_size: egui::Vec2) -> Self {
        let backgrounds = Backgrounds::spawn(paths, ctx);
        Self {
            editor: EditorState::new(backgrounds.len()),
            inputs: EguiTextInputs::default(),
            backgrounds,
            canvas_size,
            tool: Some(MarkerKind::Plain),
            color: [0.0, 0.0, 1.0],
            image_position: 1,
        }
    }

    fn current_color(&self) -> egui::Color32 {
        egui::Color32::from_rgb(
            (self.color[0] * 255.0) as u8,
            (self.color[1] * 255.0) as u8,
            (self.color[2] * 255.0) as u8,
        )
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.tool, None, "None");
            ui.selectable_value(&mut self.tool, Some(MarkerKind::Plain), "Arrow");
            ui.selectable_value(&mut self.tool, Some(MarkerKind::Labeled), "Labeled arrow");
            ui.separator();
            ui.label("Color:");
            ui.color_edit_button_rgb(&mut self.color);
            ui.separator();

            let count = self.backgrounds.len();
            let changed = ui
                .add(egui::Slider::new(&mut self.image_position, 1..=count).text("Image"))
                .changed();
            if changed {
                self.editor
                    .select_image_position(self.image_position, &mut self.inputs);
            }
            let index = self.editor.current_image();
            if let Some(name) = self.backgrounds.name(index) {
                ui.label(name);
            }
        });
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let (rect, response) =
            ui.allocate_exact_size(self.canvas_size, egui::Sense::click_and_drag());
        let to_canvas = |p: egui::Pos2| (p - rect.min).to_pos2();

        let (pressed, released, moving, pointer) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.is_moving(),
                i.pointer.interact_pos(),
            )
        });

        if pressed {
            if let Some(pos) = pointer.filter(|p| response.hovered() && rect.contains(*p)) {
                self.editor.pointer_pressed(to_canvas(pos));
            }
        }
        if moving && self.editor.is_dragging() {
            if let Some(pos) = pointer {
                self.editor.pointer_moved(to_canvas(pos), &mut self.inputs);
            }
        }
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let color = self.current_color();
                self.editor
                    .primary_click(to_canvas(pos), self.tool, color, &mut self.inputs);
            }
        }
        if response.secondary_clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.editor.secondary_click(to_canvas(pos), &mut self.inputs);
            }
        }
        if released {
            self.editor.pointer_released();
        }

        let painter = ui.painter_at(rect);
        let mut surface = EguiSurface::new(&painter, rect);
        let background = self.backgrounds.texture(self.editor.current_image());
        self.editor.repaint(&mut surface, background.as_ref());

        for input in self.inputs.show(ui.ctx(), rect.min) {
            self.editor.commit_label(input, &mut self.inputs);
        }
    }
}

impl eframe::App for AnnotatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.backgrounds.poll(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.backgrounds.all_settled() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading images…");
                });
                return;
            }
            self.canvas(ui);
        });
    }
}
