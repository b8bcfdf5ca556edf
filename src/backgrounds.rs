use anyhow::Context as _;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use std::path::{Path, PathBuf};

enum Slot {
    Loading,
    Ready(egui::TextureHandle),
    Failed,
}

type Decoded = (usize, anyhow::Result<egui::ColorImage>);

/// The fixed, ordered set of background images. Each file is decoded on its
/// own thread; [`Backgrounds::poll`] picks up finished decodes and uploads
/// them as textures.
pub struct Backgrounds {
    slots: Vec<Slot>,
    names: Vec<String>,
    rx: Receiver<Decoded>,
    announced: bool,
}

impl Backgrounds {
    pub fn spawn(paths: &[PathBuf], ctx: &egui::Context) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        for (index, path) in paths.iter().enumerate() {
            spawn_decode(index, path.clone(), tx.clone(), ctx.clone());
        }
        Self {
            slots: paths.iter().map(|_| Slot::Loading).collect(),
            names: paths.iter().map(|p| p.display().to_string()).collect(),
            rx,
            announced: false,
        }
    }

    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok((index, result)) = self.rx.try_recv() {
            let Some(slot) = self.slots.get_mut(index) else {
                continue;
            };
            *slot = match result {
                Ok(image) => {
                    log::info!("loaded {}", self.names[index]);
                    Slot::Ready(ctx.load_texture(
                        format!("background-{index}"),
                        image,
                        egui::TextureOptions::LINEAR,
                    ))
                }
                Err(err) => {
                    log::warn!("{err:#}");
                    Slot::Failed
                }
            };
        }

        if !self.announced && self.all_settled() {
            self.announced = true;
            log::info!("{} background image(s) ready", self.ready_count());
            ctx.request_repaint();
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// No image is still being decoded.
    pub fn all_settled(&self) -> bool {
        self.slots.iter().all(|s| !matches!(s, Slot::Loading))
    }

    pub fn ready_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Ready(_)))
            .count()
    }

    /// The texture for `index` if it decoded successfully.
    pub fn texture(&self, index: usize) -> Option<egui::TextureId> {
        match self.slots.get(index)? {
            Slot::Ready(handle) => Some(handle.id()),
            Slot::Loading | Slot::Failed => None,
        }
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }
}

fn spawn_decode(index: usize, path: PathBuf, tx: Sender<Decoded>, ctx: egui::Context) {
    std::thread::spawn(move || {
        let result = decode(&path);
        // receiver gone means the window closed
        if tx.send((index, result)).is_ok() {
            ctx.request_repaint();
        }
    });
}

pub fn decode(path: &Path) -> anyhow::Result<egui::ColorImage> {
    let img = image::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.as_flat_samples();
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        pixels.as_slice(),
    ))
}
