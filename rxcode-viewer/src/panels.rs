//! Barcode panel painting.

use egui::{Align2, FontId, Rect, Sense, Stroke, Ui, Vec2};
use rxcode_core::BarcodeId;

use crate::surfaces::EncodedBarcode;
use crate::theme;

/// Paint a CODE128 symbol with its text underneath.
pub fn paint_linear(ui: &mut Ui, barcode: &EncodedBarcode) {
    let total_modules = barcode.modules.len() + 2 * theme::QUIET_ZONE_MODULES;
    let text_height = 18.0;
    let size = Vec2::new(
        total_modules as f32 * theme::MODULE_WIDTH,
        theme::BAR_HEIGHT + text_height,
    );

    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, theme::LABEL_BG);

    let origin_x = rect.left() + theme::QUIET_ZONE_MODULES as f32 * theme::MODULE_WIDTH;
    for (start, len) in bar_runs(&barcode.modules) {
        let x = origin_x + start as f32 * theme::MODULE_WIDTH;
        let bar = Rect::from_min_size(
            egui::pos2(x, rect.top()),
            Vec2::new(len as f32 * theme::MODULE_WIDTH, theme::BAR_HEIGHT),
        );
        painter.rect_filled(bar, 0.0, theme::BAR);
    }

    painter.text(
        egui::pos2(rect.center().x, rect.top() + theme::BAR_HEIGHT + 2.0),
        Align2::CENTER_TOP,
        &barcode.text,
        FontId::monospace(14.0),
        theme::BAR_TEXT,
    );
}

/// Contiguous runs of bar modules as `(start, length)`.
fn bar_runs(modules: &[u8]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;

    for (i, &m) in modules.iter().enumerate() {
        match (m != 0, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i - s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, modules.len() - s));
    }

    runs
}

/// Paint the Data Matrix image and the GS1 element string.
pub fn paint_data_matrix(ui: &mut Ui, url: &str, element_string: &str) {
    if !url.is_empty() {
        ui.add(
            egui::Image::new(url.to_string())
                .fit_to_exact_size(Vec2::splat(theme::DATA_MATRIX_SIZE))
                .show_loading_spinner(true),
        );
    }
    let text = egui::RichText::new(element_string).monospace().size(12.0);
    ui.add(egui::Label::new(text).wrap());
}

/// Draw a clickable framed panel and report whether it was clicked.
pub fn panel(
    ui: &mut Ui,
    id: BarcodeId,
    selected: bool,
    add_contents: impl FnOnce(&mut Ui),
) -> bool {
    let stroke = if selected {
        Stroke::new(
            theme::PANEL_SELECTED_STROKE_WIDTH,
            theme::PANEL_SELECTED_BORDER,
        )
    } else {
        Stroke::new(theme::PANEL_STROKE_WIDTH, theme::PANEL_BORDER)
    };

    let response = egui::Frame::none()
        .stroke(stroke)
        .inner_margin(theme::PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.heading(format!("{}:", id.label()));
                add_contents(ui);
            });
        })
        .response
        .interact(Sense::click());

    if response.hovered() && !selected {
        ui.painter().rect_stroke(
            response.rect,
            0.0,
            Stroke::new(theme::PANEL_STROKE_WIDTH, theme::PANEL_HOVER_BORDER),
        );
    }

    response
        .on_hover_cursor(egui::CursorIcon::PointingHand)
        .clicked()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_runs() {
        assert_eq!(
            bar_runs(&[1, 1, 0, 1, 0, 0, 1, 1, 1]),
            vec![(0, 2), (3, 1), (6, 3)]
        );
        assert!(bar_runs(&[0, 0]).is_empty());
        assert!(bar_runs(&[]).is_empty());
    }
}
