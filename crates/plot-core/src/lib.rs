// File: crates/plot-core/src/lib.rs
// Summary: Core plotting library: table model, CSV loading, month parsing, chart rendering.

pub mod axis;
pub mod chart;
pub mod error;
pub mod load;
pub mod month;
pub mod reshape;
pub mod table;
pub mod theme;

pub use chart::{render_bar, render_line, render_stacked_shares, RenderOptions};
pub use error::PlotError;
pub use load::load_csv;
pub use month::parse_month;
pub use reshape::{pivot, Pivot};
pub use table::{Table, Value};
pub use theme::Theme;
