// File: crates/plot-core/src/theme.rs
// Summary: Light/Dark theming for chart rendering colors.

use plotters::style::RGBColor;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: RGBColor,
    pub grid: RGBColor,
    pub axis_line: RGBColor,
    pub axis_label: RGBColor,
    pub title: RGBColor,
    pub line_stroke: RGBColor,
    pub bar_fill: RGBColor,
    /// Segment colors for stacked bars, cycled when categories outnumber it.
    pub stack: [RGBColor; 8],
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: RGBColor(250, 250, 252),
            grid: RGBColor(230, 230, 235),
            axis_line: RGBColor(60, 60, 70),
            axis_label: RGBColor(20, 20, 30),
            title: RGBColor(20, 20, 30),
            line_stroke: RGBColor(32, 120, 200),
            bar_fill: RGBColor(40, 120, 200),
            stack: STACK_PALETTE,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: RGBColor(18, 18, 20),
            grid: RGBColor(40, 40, 45),
            axis_line: RGBColor(180, 180, 190),
            axis_label: RGBColor(235, 235, 245),
            title: RGBColor(235, 235, 245),
            line_stroke: RGBColor(64, 160, 255),
            bar_fill: RGBColor(96, 156, 255),
            stack: STACK_PALETTE,
        }
    }

    pub fn stack_color(&self, category: usize) -> RGBColor {
        self.stack[category % self.stack.len()]
    }
}

// Saturated hues that stay distinguishable on both presets.
const STACK_PALETTE: [RGBColor; 8] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
];

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() {
        if t.name.eq_ignore_ascii_case(name) {
            return t;
        }
    }
    Theme::light()
}
