use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – date range filter
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter by Date Range");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let Some(range) = state.range else {
        return;
    };

    let first = dataset.first_date;
    let last = dataset.last_date;

    ui.label(format!("Data span: {first} – {last}"));
    ui.add_space(8.0);

    let mut start = range.start();
    let mut end = range.end();
    let mut changed = false;

    ui.label("Start date");
    changed |= ui
        .add(DatePickerButton::new(&mut start).id_salt("start_date"))
        .changed();

    ui.label("End date");
    changed |= ui
        .add(DatePickerButton::new(&mut end).id_salt("end_date"))
        .changed();

    if changed {
        state.set_range(start, end);
    }

    ui.add_space(4.0);
    if ui.button("Reset to full span").clicked() {
        state.reset_range();
    }

    ui.separator();
    ui.strong("Selection");
    ui.label(format!(
        "{} of {} records",
        state.visible_indices.len(),
        state.dataset.as_ref().map_or(0, |ds| ds.len())
    ));
    ui.label(format!("{} total rentals", state.summaries.total_rentals));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} in range",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open rental data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rental records spanning {} – {}",
                    dataset.len(),
                    dataset.first_date,
                    dataset.last_date
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}
