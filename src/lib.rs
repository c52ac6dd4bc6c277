//! chart-geometry: pure layout engine for small dashboard charts.
//!
//! Each chart kind has one pure function turning data plus a config into a
//! serializable draw plan (paths, rects, ticks and hit regions). Plans are
//! handed to a [`render::Renderer`]; interactive plans also answer pointer
//! hit tests that drive [`interaction::HoverState`].

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartPlayground, ChartSlot, PlaygroundConfig};
pub use core::{
    compute_bar_chart, compute_gauge, compute_line_chart, compute_pie, compute_stacked_bar_chart,
};
pub use error::{ChartError, ChartResult};
pub use render::DrawPlan;
