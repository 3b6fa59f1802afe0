use crate::app::SketchApp;
use crate::components::ToolButton;
use crate::tools::Tool;
use egui::Slider;
use log::info;

/// The left-hand panel: tool rail, stroke controls, background controls,
/// the furniture list and the export button.
pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            ui.horizontal_wrapped(|ui| {
                for tool in Tool::ALL {
                    let selected = app.tool() == tool;
                    if ToolButton::new(tool, selected).show(ui).clicked() {
                        info!("tool selected from UI: {}", tool.label());
                        app.set_tool(tool);
                    }
                }
            });
            ui.separator();

            let tool = app.tool();
            if tool.shows_color_control() {
                ui.horizontal(|ui| {
                    ui.label("Color:");
                    egui::color_picker::color_edit_button_srgba(
                        ui,
                        &mut app.style_mut().color,
                        egui::color_picker::Alpha::Opaque,
                    );
                });
            }
            if tool.shows_width_control() {
                ui.horizontal(|ui| {
                    ui.label("Width:");
                    ui.add(Slider::new(&mut app.style_mut().width, 1.0..=32.0));
                });
            }
            if tool.is_drawing() {
                ui.separator();
            }

            ui.heading("Background");
            ui.horizontal(|ui| {
                ui.label("Fill:");
                let mut color = app.background_color();
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    app.set_background_color(color);
                }
            });
            ui.separator();

            ui.heading("Furniture");
            ui.label("Drop photos onto the window to add them.");
            ui.add_space(4.0);
            furniture_list(app, ctx, ui);
            ui.separator();

            if ui.button("Export composition").clicked() {
                app.export();
            }
            if let Some(status) = app.status() {
                ui.label(status.to_owned());
            }
        });
}

fn furniture_list(app: &mut SketchApp, ctx: &egui::Context, ui: &mut egui::Ui) {
    let rows = app.library_rows();
    if rows.is_empty() {
        ui.weak("No photos yet.");
        return;
    }
    egui::ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
        for row in rows {
            ui.horizontal(|ui| {
                if row.pending {
                    ui.spinner();
                } else if row.failed {
                    ui.colored_label(egui::Color32::LIGHT_RED, "✖");
                } else if let Some(texture) = app.thumbnail_texture(ctx, row.id) {
                    let thumb = egui::Image::from_texture(egui::load::SizedTexture::new(
                        texture,
                        egui::vec2(36.0, 36.0),
                    ));
                    if ui
                        .add(egui::ImageButton::new(thumb))
                        .on_hover_text("Place on canvas")
                        .clicked()
                    {
                        app.place_item(row.id);
                    }
                }
                ui.vertical(|ui| {
                    ui.label(&row.name);
                    if !row.pending && !row.failed {
                        ui.horizontal(|ui| {
                            if ui.small_button("Place").clicked() {
                                app.place_item(row.id);
                            }
                            if ui.small_button("Backdrop").clicked() {
                                app.set_backdrop(row.id);
                            }
                        });
                    }
                });
            });
            ui.add_space(2.0);
        }
    });
}
