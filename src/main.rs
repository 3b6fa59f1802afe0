#![warn(clippy::all, rust_2018_idioms)]

fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1180.0, 720.0])
            .with_title("roomsketch"),
        ..Default::default()
    };
    eframe::run_native(
        "roomsketch",
        native_options,
        Box::new(|cc| Ok(Box::new(roomsketch::SketchApp::new(cc)))),
    )
}
