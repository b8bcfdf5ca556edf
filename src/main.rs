mod app;
mod backgrounds;
mod editor;
mod geometry;
mod input;
mod marker;
mod store;
mod surface;
mod view;

use anyhow::{bail, Context as _};
use eframe::egui;
use std::path::PathBuf;

const DEFAULT_CANVAS: (f32, f32) = (800.0, 600.0);

// ── Options ─────────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
struct Options {
    images: Vec<PathBuf>,
    canvas: (f32, f32),
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Options> {
    let mut images = Vec::new();
    let mut canvas = DEFAULT_CANVAS;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--canvas" => {
                let value = args.next().context("--canvas needs a WxH value")?;
                canvas = parse_size(&value)?;
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            _ => images.push(PathBuf::from(arg)),
        }
    }
    Ok(Options { images, canvas })
}

fn parse_size(value: &str) -> anyhow::Result<(f32, f32)> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .with_context(|| format!("expected WxH, got {value:?}"))?;
    let w: f32 = w.trim().parse().with_context(|| format!("bad width in {value:?}"))?;
    let h: f32 = h.trim().parse().with_context(|| format!("bad height in {value:?}"))?;
    if w <= 0.0 || h <= 0.0 {
        bail!("canvas size must be positive, got {value:?}");
    }
    Ok((w, h))
}

fn pick_images() -> Vec<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Choose background images")
        .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif", "webp"])
        .pick_files()
        .unwrap_or_default()
}

// ── Main ────────────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut options = parse_args(std::env::args().skip(1))
        .context("Usage: arrow-annotate [--canvas WxH] <image>...")?;
    if options.images.is_empty() {
        options.images = pick_images();
    }
    if options.images.is_empty() {
        bail!("no background images given");
    }
    for path in &options.images {
        if !path.exists() {
            bail!("File not found: {}", path.display());
        }
    }
    log::info!(
        "annotating {} image(s) on a {}x{} canvas",
        options.images.len(),
        options.canvas.0,
        options.canvas.1
    );

    let (w, h) = options.canvas;
    let native = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([w + 40.0, h + 80.0])
            .with_title("arrow-annotate"),
        ..Default::default()
    };

    let images = options.images;
    eframe::run_native(
        "arrow-annotate",
        native,
        Box::new(move |cc| {
            Ok(Box::new(app::AnnotatorApp::new(
                &cc.egui_ctx,
                &images,
                egui::vec2(w, h),
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to run eframe: {e}"))
}
