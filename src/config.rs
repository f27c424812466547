//! View configuration.
//!
//! Every layout constant, style value and timing used by the view lives here so
//! the browser shell, the CLI snapshot and the tests agree on one set of numbers.
//! All groups deserialize with defaults, so a config file only needs the fields
//! it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geom::Size;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ViewConfig {
    pub layout: LayoutConfig,
    pub markers: MarkerStyle,
    pub zoom: ZoomConfig,
    pub timing: TimingConfig,
    pub tooltip: TooltipConfig,
    pub sidebar: SidebarLabels,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Pixel inset from each surface edge to the plotted range.
    pub inset_px: f64,
    /// Fraction of each axis span added on both ends of the domain.
    pub domain_margin: f64,
    /// Surface size used when the container reports zero width/height.
    pub fallback_width: f64,
    pub fallback_height: f64,
    /// Height reserved below the plot for the control bar.
    pub controls_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            inset_px: 50.0,
            domain_margin: 0.1,
            fallback_width: 800.0,
            fallback_height: 600.0,
            controls_height: 40.0,
        }
    }
}

impl LayoutConfig {
    /// Drawing-surface size for a container of the given client size.
    pub fn surface_size(&self, container_width: f64, container_height: f64) -> Size {
        let width = if container_width > 0.0 {
            container_width
        } else {
            self.fallback_width
        };
        let height = if container_height > 0.0 {
            container_height
        } else {
            self.fallback_height
        };
        Size::new(width, (height - self.controls_height).max(0.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub radius: f64,
    pub hover_radius: f64,
    /// Radius of the transparent hit-target stacked on each marker.
    pub hit_radius: f64,
    pub dimmed_marker_opacity: f64,
    pub dimmed_label_opacity: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 5.0,
            hover_radius: 8.0,
            hit_radius: 12.0,
            dimmed_marker_opacity: 0.2,
            dimmed_label_opacity: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Wheel delta multiplier for pixel-mode wheel events.
    pub wheel_pixel_factor: f64,
    /// Wheel delta multiplier for line-mode wheel events.
    pub wheel_line_factor: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.2,
            max_scale: 5.0,
            wheel_pixel_factor: 0.002,
            wheel_line_factor: 0.05,
        }
    }
}

impl ZoomConfig {
    pub fn clamp_scale(&self, k: f64) -> f64 {
        k.clamp(self.min_scale, self.max_scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub hover_ms: f64,
    pub zoom_reset_ms: f64,
    pub resize_debounce_ms: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            hover_ms: 150.0,
            zoom_reset_ms: 750.0,
            resize_debounce_ms: 250.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    pub offset_x: f64,
    pub offset_y: f64,
    /// Minimum distance kept from the right and top viewport edges.
    pub edge_padding: f64,
    /// Gap between pointer and tooltip when flipped to the left.
    pub flip_gap: f64,
    /// Offset below the pointer when the tooltip would leave the top edge.
    pub drop_offset: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            offset_x: 2.0,
            offset_y: -25.0,
            edge_padding: 10.0,
            flip_gap: 2.0,
            drop_offset: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarLabels {
    pub show_all: String,
    /// Count caption; `{count}` is replaced by the number of arguments.
    pub count_template: String,
}

impl Default for SidebarLabels {
    fn default() -> Self {
        Self {
            show_all: "Show all".to_string(),
            count_template: "{count} opinions".to_string(),
        }
    }
}

impl SidebarLabels {
    pub fn count_caption(&self, count: usize) -> String {
        self.count_template.replace("{count}", &count.to_string())
    }
}

impl ViewConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        let l = &self.layout;
        if !l.inset_px.is_finite() || l.inset_px < 0.0 {
            return Err("layout.inset_px must be finite and >= 0");
        }
        if !l.domain_margin.is_finite() || l.domain_margin < 0.0 {
            return Err("layout.domain_margin must be finite and >= 0");
        }
        if l.fallback_width <= 0.0 || l.fallback_height <= 0.0 {
            return Err("layout fallback size must be > 0");
        }
        if l.controls_height < 0.0 {
            return Err("layout.controls_height must be >= 0");
        }

        let m = &self.markers;
        if m.radius <= 0.0 || m.hover_radius <= 0.0 || m.hit_radius <= 0.0 {
            return Err("marker radii must be > 0");
        }
        for o in [m.dimmed_marker_opacity, m.dimmed_label_opacity] {
            if !(0.0..=1.0).contains(&o) {
                return Err("dimmed opacities must be in [0, 1]");
            }
        }

        let z = &self.zoom;
        if !(z.min_scale > 0.0 && z.min_scale <= 1.0 && z.max_scale >= 1.0) {
            return Err("zoom extent must satisfy 0 < min_scale <= 1 <= max_scale");
        }
        if !z.max_scale.is_finite() {
            return Err("zoom.max_scale must be finite");
        }

        let t = &self.timing;
        for d in [t.hover_ms, t.zoom_reset_ms, t.resize_debounce_ms] {
            if !d.is_finite() || d < 0.0 {
                return Err("timings must be finite and >= 0");
            }
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate().map_err(ConfigError::Invalid)?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
