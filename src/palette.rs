//! Cluster color palette.

/// Fixed 24-entry palette; clusters cycle through it by load order.
pub const PALETTE: [&str; 24] = [
    "#2563eb", // blue
    "#dc2626", // red
    "#16a34a", // green
    "#ca8a04", // dark yellow
    "#9333ea", // purple
    "#0891b2", // cyan
    "#c026d3", // fuchsia
    "#0d9488", // teal
    "#ea580c", // orange
    "#4f46e5", // indigo
    "#84cc16", // lime
    "#f59e0b", // amber
    "#ec4899", // pink
    "#06b6d4", // light cyan
    "#8b5cf6", // violet
    "#10b981", // emerald
    "#f97316", // light orange
    "#6366f1", // light indigo
    "#a3e635", // light lime
    "#f43f5e", // rose
    "#14b8a6", // light teal
    "#a855f7", // light purple
    "#22c55e", // bright green
    "#ef4444", // light red
];

/// Color for the cluster at `index` in dataset order.
pub fn cluster_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    /// Parse `#rrggbb` or `#rgb`.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).ok().map(f64::from);
        match hex.len() {
            6 => Some(Self {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17.0);
                Some(Self {
                    r: expand(0)?,
                    g: expand(1)?,
                    b: expand(2)?,
                })
            }
            _ => None,
        }
    }

    /// Darken by `k` steps of 0.7, the same curve d3-color uses.
    pub fn darker(self, k: f64) -> Self {
        let f = 0.7_f64.powf(k);
        Self {
            r: self.r * f,
            g: self.g * f,
            b: self.b * f,
        }
    }

    pub fn to_hex(self) -> String {
        let c = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b))
    }
}

/// Label fill for a cluster color: one step darker. Unparseable input is
/// returned unchanged.
pub fn label_color(color: &str) -> String {
    match Rgb::parse_hex(color) {
        Some(rgb) => rgb.darker(1.0).to_hex(),
        None => color.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_cycle_every_24() {
        for i in 0..100 {
            assert_eq!(cluster_color(i), PALETTE[i % 24]);
        }
        assert_eq!(cluster_color(24), cluster_color(0));
        assert_eq!(cluster_color(25), "#dc2626");
    }

    #[test]
    fn palette_entries_parse() {
        for c in PALETTE {
            assert!(Rgb::parse_hex(c).is_some(), "{c}");
        }
    }

    #[test]
    fn darker_scales_channels_by_point_seven() {
        // 220 -> 154.0, 38 -> 26.6
        assert_eq!(label_color("#dc2626"), "#9a1b1b");
        // 0x88=136 -> 95.2
        assert_eq!(label_color("#888"), "#5f5f5f");
        assert_eq!(label_color("not-a-color"), "not-a-color");
        assert_eq!(label_color("#€abc"), "#€abc");
        assert!(Rgb::parse_hex("#€").is_none());
    }
}
