use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::WeatherSituation;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.50);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: weather situation → Color32
// ---------------------------------------------------------------------------

/// Fixed colour assignment for the weather situation codes, shared by the
/// weather bar chart, the pie chart and the legend so a code always renders
/// in the same colour regardless of which codes the current view contains.
#[derive(Debug, Clone)]
pub struct WeatherColors {
    mapping: BTreeMap<WeatherSituation, Color32>,
    default_color: Color32,
}

impl Default for WeatherColors {
    fn default() -> Self {
        let palette = generate_palette(WeatherSituation::ALL.len());
        let mapping = WeatherSituation::ALL
            .iter()
            .copied()
            .zip(palette)
            .collect();

        WeatherColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }
}

impl WeatherColors {
    /// Look up the colour for a weather situation.
    pub fn color_for(&self, weather: WeatherSituation) -> Color32 {
        self.mapping
            .get(&weather)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colors() {
        let palette = generate_palette(4);
        assert_eq!(palette.len(), 4);
        for (i, a) in palette.iter().enumerate() {
            for b in palette.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn every_weather_code_has_a_stable_color() {
        let colors = WeatherColors::default();
        for situation in WeatherSituation::ALL {
            assert_ne!(colors.color_for(situation), Color32::GRAY);
            assert_eq!(colors.color_for(situation), colors.color_for(situation));
        }
    }
}
