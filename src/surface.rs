use eframe::egui;

/// Drawing target for the canvas. All coordinates are canvas-space.
pub trait Surface {
    type Image;

    fn clear(&mut self);
    /// Stretch `image` over the whole canvas.
    fn draw_image(&mut self, image: &Self::Image);
    fn line(&mut self, from: egui::Pos2, to: egui::Pos2, width: f32, color: egui::Color32);
    fn fill_triangle(&mut self, points: [egui::Pos2; 3], color: egui::Color32);
    fn fill_circle(&mut self, center: egui::Pos2, radius: f32, color: egui::Color32);
    fn text(&mut self, pos: egui::Pos2, text: &str, color: egui::Color32);
}

pub struct EguiSurface<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a egui::Painter, rect: egui::Rect) -> Self {
        Self { painter, rect }
    }

    fn to_screen(&self, p: egui::Pos2) -> egui::Pos2 {
        self.rect.min + p.to_vec2()
    }
}

impl Surface for EguiSurface<'_> {
    type Image = egui::TextureId;

    fn clear(&mut self) {
        self.painter
            .rect_filled(self.rect, 0.0, egui::Color32::from_gray(40));
    }

    fn draw_image(&mut self, image: &egui::TextureId) {
        self.painter.image(
            *image,
            self.rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    fn line(&mut self, from: egui::Pos2, to: egui::Pos2, width: f32, color: egui::Color32) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            egui::Stroke::new(width, color),
        );
    }

    fn fill_triangle(&mut self, points: [egui::Pos2; 3], color: egui::Color32) {
        let points = points.iter().map(|p| self.to_screen(*p)).collect();
        self.painter.add(egui::Shape::convex_polygon(
            points,
            color,
            egui::Stroke::NONE,
        ));
    }

    fn fill_circle(&mut self, center: egui::Pos2, radius: f32, color: egui::Color32) {
        self.painter
            .circle_filled(self.to_screen(center), radius, color);
    }

    fn text(&mut self, pos: egui::Pos2, text: &str, color: egui::Color32) {
        self.painter.text(
            self.to_screen(pos),
            egui::Align2::LEFT_TOP,
            text,
            egui::FontId::proportional(16.0),
            color,
        );
    }
}
