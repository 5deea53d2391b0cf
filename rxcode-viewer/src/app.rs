//! Main application state and eframe integration.

use std::path::PathBuf;

use egui::{CentralPanel, Context, Key, ScrollArea, SidePanel, TopBottomPanel, Vec2};
use rxcode_core::{
    apply_render_plan, validate_fields, BarcodeId, FieldSet, FileStore, Generator, GeneratorConfig,
    HistoryRecord, KeyValueStore, MemoryStore,
};

use crate::panels;
use crate::surfaces::BarcodeSurfaces;
use crate::theme;

/// Main application state.
pub struct RxcodeApp {
    /// Form contents, edited in place
    form: FieldSet,
    /// Pipeline, selection and history
    generator: Generator<Box<dyn KeyValueStore>>,
    /// Linear barcode drawing surfaces
    surfaces: BarcodeSurfaces,

    /// Status message
    status_message: String,
    /// Error message to display
    error_message: Option<String>,
}

impl RxcodeApp {
    /// Create the application, loading history from `data_dir`.
    pub fn new(_cc: &eframe::CreationContext<'_>, data_dir: PathBuf) -> Self {
        let mut error_message = None;
        let store: Box<dyn KeyValueStore> = match FileStore::open(&data_dir) {
            Ok(store) => {
                tracing::info!("History directory: {}", data_dir.display());
                Box::new(store)
            }
            Err(e) => {
                tracing::error!("Failed to open {}: {}", data_dir.display(), e);
                error_message = Some(format!(
                    "Cannot open history directory {}: {}\nEntries will not be saved.",
                    data_dir.display(),
                    e
                ));
                Box::new(MemoryStore::new())
            }
        };

        let generator = Generator::new(store, GeneratorConfig::default());
        let status_message = format!("{} saved entries", generator.history().len());

        Self {
            form: FieldSet::default(),
            generator,
            surfaces: BarcodeSurfaces::default(),
            status_message,
            error_message,
        }
    }

    /// Generate from the form and save it to history.
    fn generate(&mut self) {
        for warning in validate_fields(&self.form).warnings {
            tracing::warn!("{}", warning);
        }

        match self.generator.generate(self.form.clone()) {
            Ok(generation) => {
                let element = &generation.outputs.gs1_element_string;
                self.status_message = format!("Generated {}", element);
                self.redraw_surfaces();
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Load a history entry into the form and regenerate it.
    fn recall(&mut self, record: HistoryRecord) {
        self.form = record.fields.clone();

        match self.generator.recall_record(&record) {
            Ok(generation) => {
                let element = &generation.outputs.gs1_element_string;
                self.status_message = format!("Recalled {}", element);
                self.redraw_surfaces();
            }
            // Incomplete entries only fill the form.
            Err(e) if e.is_validation() => {
                self.status_message = "Loaded entry without Rx/NDC".to_string();
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Handle a click on a barcode panel.
    fn toggle(&mut self, id: BarcodeId) {
        let selection = self.generator.toggle(id);
        self.status_message = format!("Showing: {}", selection);
        self.redraw_surfaces();
    }

    /// Clear every surface and redraw the visible barcodes.
    fn redraw_surfaces(&mut self) {
        if let Some(plan) = self.generator.render_plan() {
            apply_render_plan(&plan, &mut self.surfaces);
        }
    }

    /// Render the input form.
    fn render_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("Barcode Generator");
        ui.add_space(8.0);

        let form = &mut self.form;
        egui::Grid::new("form_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                form_row(ui, "Rx", "Rx", &mut form.rx);
                form_row(ui, "NDC", "NDC (10 digits)", &mut form.ndc);
                form_row(ui, "Lot", "Lot Number (optional)", &mut form.lot_number);
                form_row(
                    ui,
                    "Serial",
                    "Serial Number (optional)",
                    &mut form.serial_number,
                );
                form_row(
                    ui,
                    "Expiration",
                    "YYYY-MM-DD (optional)",
                    &mut form.expiration_date,
                );
            });

        ui.separator();

        egui::Grid::new("extra_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                form_row(ui, "Barcode 1", "Barcode 1", &mut form.barcode1);
                form_row(ui, "Barcode 2", "Barcode 2", &mut form.barcode2);
            });

        ui.add_space(8.0);
        if ui.button("Generate (Ctrl+Enter)").clicked() {
            self.generate();
        }
    }

    /// Render the barcode panels for the current generation.
    fn render_barcodes(&mut self, ui: &mut egui::Ui) {
        let Some(generation) = self.generator.current() else {
            ui.colored_label(theme::DIM_TEXT, "Fill in Rx and NDC, then Generate");
            return;
        };
        let Some(plan) = self.generator.render_plan() else {
            return;
        };

        let focused = generation.selection.focused();
        let panel_ids: Vec<BarcodeId> = BarcodeId::ALL
            .into_iter()
            .filter(|id| generation.fields.has_payload(*id))
            .collect();

        let mut clicked = None;
        ui.horizontal_wrapped(|ui| {
            for id in panel_ids {
                let selected = focused == Some(id);
                let was_clicked = panels::panel(ui, id, selected, |ui| {
                    if id == BarcodeId::Gs1 {
                        if plan.gs1_text.visible {
                            let url = if plan.data_matrix.visible {
                                plan.data_matrix.value.as_str()
                            } else {
                                ""
                            };
                            panels::paint_data_matrix(ui, url, &plan.gs1_text.value);
                        }
                    } else if let Some(barcode) = self.surfaces.get(id) {
                        panels::paint_linear(ui, barcode);
                    } else if plan.draws(id) {
                        ui.colored_label(theme::ERROR_TEXT, "Cannot encode as CODE128");
                    }
                });
                if was_clicked {
                    clicked = Some(id);
                }
            }
        });

        if let Some(id) = clicked {
            self.toggle(id);
        }
    }

    /// Render the saved-entries side panel.
    fn render_history(&mut self, ctx: &Context) {
        let mut recalled = None;

        SidePanel::right("history")
            .exact_width(theme::HISTORY_PANEL_WIDTH)
            .show(ctx, |ui| {
                ui.heading("Saved");
                ui.separator();

                let records = self.generator.history().records();
                if records.is_empty() {
                    ui.colored_label(theme::DIM_TEXT, "No saved entries");
                }

                ScrollArea::vertical().show(ui, |ui| {
                    for record in records {
                        let label = egui::RichText::new(record.fields.summary()).size(12.0);
                        let saved_at = record
                            .created_at()
                            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                            .unwrap_or_default();
                        let button = egui::Button::new(label).wrap();
                        if ui.add(button).on_hover_text(saved_at).clicked() {
                            recalled = Some(record.clone());
                        }
                    }
                });
            });

        if let Some(record) = recalled {
            self.recall(record);
        }
    }

    /// Render the status bar.
    fn render_status_bar(&self, ctx: &Context) {
        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Focus: {}", self.generator.selection()));
                });
            });
        });
    }

    /// Handle keyboard shortcuts.
    fn handle_keyboard(&mut self, ctx: &Context) {
        let generate = ctx.input(|i| i.modifiers.command && i.key_pressed(Key::Enter));
        let escape = ctx.input(|i| i.key_pressed(Key::Escape));

        if generate {
            self.generate();
        }
        if escape {
            // Escape: show all barcodes again
            if let Some(id) = self.generator.selection().focused() {
                self.toggle(id);
            }
            self.error_message = None;
        }
    }

    /// Show error dialog if there's an error.
    fn show_error_dialog(&mut self, ctx: &Context) {
        if let Some(error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(&error);
                    ui.separator();
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }
    }
}

/// One labelled text field in a two-column grid.
fn form_row(ui: &mut egui::Ui, label: &str, hint: &str, value: &mut String) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).hint_text(hint));
    ui.end_row();
}

impl eframe::App for RxcodeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard(ctx);
        self.render_history(ctx);
        self.render_status_bar(ctx);

        CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                self.render_form(ui);
                ui.add_space(16.0);
                self.render_barcodes(ui);
            });
        });

        self.show_error_dialog(ctx);
    }
}
