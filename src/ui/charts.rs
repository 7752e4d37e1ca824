use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::state::{AppState, HourlyTab};

const HOURLY_COLOR: Color32 = Color32::from_rgb(96, 146, 222);
const TOP_HOURS_COLOR: Color32 = Color32::from_rgb(222, 146, 64);

// ---------------------------------------------------------------------------
// Central panel – the dashboard charts
// ---------------------------------------------------------------------------

/// Render the full chart area: weather section (bar | pie) on top, the
/// hourly section (bar / line / top-5 tabs) below.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset to begin  (File → Open…)");
        });
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Total Bike Rentals by Weather");
            if state.summaries.by_weather.is_empty() {
                ui.label("No rentals in the selected date range.");
            } else {
                ui.columns(2, |cols: &mut [Ui]| {
                    weather_bar_chart(&mut cols[0], state);
                    weather_pie_chart(&mut cols[1], state);
                });
            }

            ui.separator();
            ui.heading("Rentals per Hour");

            ui.horizontal(|ui: &mut Ui| {
                for tab in [HourlyTab::Bar, HourlyTab::Line, HourlyTab::Top5] {
                    if ui
                        .selectable_label(state.hourly_tab == tab, tab.title())
                        .clicked()
                    {
                        state.hourly_tab = tab;
                    }
                }
            });

            if state.summaries.by_hour.is_empty() {
                ui.label("No rentals in the selected date range.");
            } else {
                match state.hourly_tab {
                    HourlyTab::Bar => hourly_bar_chart(ui, state),
                    HourlyTab::Line => hourly_line_chart(ui, state),
                    HourlyTab::Top5 => top_hours_chart(ui, state),
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Weather section
// ---------------------------------------------------------------------------

fn weather_bar_chart(ui: &mut Ui, state: &AppState) {
    let bars: Vec<Bar> = state
        .summaries
        .by_weather
        .iter()
        .map(|row| {
            Bar::new(f64::from(row.weather.code()), row.total as f64)
                .width(0.6)
                .fill(state.weather_colors.color_for(row.weather))
                .name(row.weather.label())
        })
        .collect();

    Plot::new("weather_bar")
        .height(280.0)
        .x_axis_label("Weather situation code")
        .y_axis_label("Rentals")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for row in &state.summaries.by_weather {
            let color = state.weather_colors.color_for(row.weather);
            ui.colored_label(color, format!("{} = {}", row.weather.code(), row.weather.label()));
        }
    });
}

/// Pie chart of rental share per weather situation, drawn with the painter
/// as a fan of thin triangles with percentage labels at each slice centre.
fn weather_pie_chart(ui: &mut Ui, state: &AppState) {
    let total: u64 = state.summaries.by_weather.iter().map(|r| r.total).sum();
    if total == 0 {
        return;
    }

    let side = ui.available_width().min(280.0);
    let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
    let center = response.rect.center();
    let radius = side * 0.42;

    // Start at 12 o'clock, sweep clockwise.
    let mut angle = -FRAC_PI_2;
    for row in &state.summaries.by_weather {
        let frac = row.total as f32 / total as f32;
        let sweep = frac * TAU;
        let color = state.weather_colors.color_for(row.weather);

        let steps = ((sweep / 0.05).ceil() as usize).max(2);
        for step in 0..steps {
            let a0 = angle + sweep * step as f32 / steps as f32;
            let a1 = angle + sweep * (step + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![
                    center,
                    center + Vec2::angled(a0) * radius,
                    center + Vec2::angled(a1) * radius,
                ],
                color,
                Stroke::NONE,
            ));
        }

        // Percentage label at the slice centre, skipped for slivers.
        if frac >= 0.04 {
            let mid = angle + sweep / 2.0;
            painter.text(
                center + Vec2::angled(mid) * (radius * 0.6),
                Align2::CENTER_CENTER,
                format!("{:.1}%", frac * 100.0),
                FontId::proportional(12.0),
                Color32::WHITE,
            );
        }

        angle += sweep;
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for row in &state.summaries.by_weather {
            let color = state.weather_colors.color_for(row.weather);
            ui.colored_label(color, format!("■ {} ({})", row.weather.label(), row.total));
        }
    });
}

// ---------------------------------------------------------------------------
// Hourly section
// ---------------------------------------------------------------------------

fn hourly_bar_chart(ui: &mut Ui, state: &AppState) {
    let bars: Vec<Bar> = state
        .summaries
        .by_hour
        .iter()
        .map(|row| {
            Bar::new(f64::from(row.hour), row.total as f64)
                .width(0.7)
                .fill(HOURLY_COLOR)
        })
        .collect();

    Plot::new("hourly_bar")
        .height(300.0)
        .x_axis_label("Hour of day")
        .y_axis_label("Rentals")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Rentals"));
        });
}

fn hourly_line_chart(ui: &mut Ui, state: &AppState) {
    let points: Vec<[f64; 2]> = state
        .summaries
        .by_hour
        .iter()
        .map(|row| [f64::from(row.hour), row.total as f64])
        .collect();

    Plot::new("hourly_line")
        .height(300.0)
        .legend(Legend::default())
        .x_axis_label("Hour of day")
        .y_axis_label("Rentals")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name("Rentals")
                    .color(HOURLY_COLOR)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .color(HOURLY_COLOR)
                    .radius(3.5),
            );
        });
}

fn top_hours_chart(ui: &mut Ui, state: &AppState) {
    let bars: Vec<Bar> = state
        .summaries
        .top_hours
        .iter()
        .map(|row| {
            Bar::new(f64::from(row.hour), row.total as f64)
                .width(0.7)
                .fill(TOP_HOURS_COLOR)
                .name(format!("{:02}:00", row.hour))
        })
        .collect();

    Plot::new("top_hours_bar")
        .height(300.0)
        .x_axis_label("Hour of day")
        .y_axis_label("Rentals")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Busiest hours"));
        });
}
