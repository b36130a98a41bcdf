// Effect configuration, loaded from a TOML file. Values are applied through
// the compositor/controller setters, which clamp; a config file can degrade
// the effect but never error it out.

use serde::{Deserialize, Serialize};
use std::fs;

use crate::compositor::{BackdropCompositor, DEFAULT_INTERVAL_MS};
use crate::error::Error;
use crate::interaction::{DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH, WindowInteractionController};
use crate::pixel::Rgba;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EffectConfig {
    pub blur_radius: i32,
    /// Tint as [r, g, b, a].
    pub tint: [u8; 4],
    pub update_interval_ms: u64,
    pub hardware_accel: bool,
    pub min_width: i32,
    pub min_height: i32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            blur_radius: 8,
            tint: [30, 30, 30, 150],
            update_interval_ms: DEFAULT_INTERVAL_MS,
            hardware_accel: true,
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
        }
    }
}

impl EffectConfig {
    pub fn load(path: &str) -> Result<Self, Error> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {path}: {e}")))?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("parse {path}: {e}")))
    }

    pub fn save(&self, path: &str) -> Result<(), Error> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("serialize: {e}")))?;
        fs::write(path, content).map_err(|e| Error::Config(format!("write {path}: {e}")))
    }

    #[inline]
    pub fn tint_color(&self) -> Rgba {
        Rgba::new(self.tint[0], self.tint[1], self.tint[2], self.tint[3])
    }

    /// Push every setting into the compositor (each setter clamps).
    pub fn apply_to_compositor(&self, compositor: &mut BackdropCompositor) {
        compositor.set_blur_radius(self.blur_radius);
        compositor.set_tint_color(self.tint_color());
        compositor.set_update_interval(self.update_interval_ms);
        compositor.set_hardware_accel(self.hardware_accel);
    }

    pub fn apply_to_controller(&self, controller: &mut WindowInteractionController) {
        controller.set_min_size(self.min_width, self.min_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_effect_defaults() {
        let cfg = EffectConfig::default();
        assert_eq!(cfg.blur_radius, 8);
        assert_eq!(cfg.tint, [30, 30, 30, 150]);
        assert_eq!(cfg.update_interval_ms, 50);
        assert!(cfg.hardware_accel);
    }

    #[test]
    fn toml_round_trip() {
        let cfg = EffectConfig {
            blur_radius: 12,
            tint: [40, 40, 40, 180],
            update_interval_ms: 30,
            hardware_accel: false,
            min_width: 500,
            min_height: 350,
        };
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: EffectConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn out_of_range_values_clamp_when_applied() {
        let cfg = EffectConfig { blur_radius: 99, update_interval_ms: 5, ..Default::default() };
        let mut comp = BackdropCompositor::new();
        cfg.apply_to_compositor(&mut comp);
        assert_eq!(comp.blur_radius(), 20);
        assert_eq!(comp.interval().as_millis(), 10);
    }

    #[test]
    fn load_missing_file_reports_config_error() {
        let err = EffectConfig::load("/nonexistent/acrylic.toml").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
