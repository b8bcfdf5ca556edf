use crate::editor::EditorState;
use crate::input::TextInputHost;
use crate::surface::Surface;

impl EditorState {
    /// Make `index` the active image. Text fields are hidden on every other
    /// image and shown, next to their tails, on the new one. Out-of-range
    /// indices are ignored.
    pub fn switch_to_image(&mut self, index: usize, inputs: &mut impl TextInputHost) {
        if index >= self.image_count {
            log::debug!("ignoring switch to image {index}, only {} loaded", self.image_count);
            return;
        }
        self.cancel_drag();

        for (image, list) in self.store.iter_mut() {
            if image == index {
                continue;
            }
            for marker in list.iter() {
                marker.set_visible(false, inputs);
            }
        }

        if self.current_image != index {
            log::debug!("switching image {} -> {index}", self.current_image);
        }
        self.current_image = index;

        for marker in self.store.list_for(index).iter() {
            marker.set_visible(true, inputs);
        }
    }

    /// Entry point for the 1-based image switcher.
    pub fn select_image_position(&mut self, position: usize, inputs: &mut impl TextInputHost) {
        if position == 0 {
            return;
        }
        self.switch_to_image(position - 1, inputs);
    }

    /// Paint the background (when it has loaded) and then every marker of the
    /// active image in list order.
    pub fn repaint<S: Surface>(&self, surface: &mut S, background: Option<&S::Image>) {
        surface.clear();
        if let Some(image) = background {
            surface.draw_image(image);
        }
        for marker in self.markers() {
            marker.draw(surface);
        }
    }
}
