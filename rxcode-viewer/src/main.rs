//! rxcode viewer - desktop form for pharmacy barcode generation.

mod app;
mod panels;
mod surfaces;
mod theme;

use app::RxcodeApp;
use std::path::PathBuf;

/// History directory used when none is given on the command line.
const DEFAULT_DATA_DIR: &str = ".rxcode";

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Optional history directory argument
    let data_dir: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("Barcode Generator"),
        ..Default::default()
    };

    eframe::run_native(
        "Barcode Generator",
        options,
        Box::new(move |cc| {
            // Fetches Data Matrix images from their URL in the background
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(RxcodeApp::new(cc, data_dir)))
        }),
    )
}
