mod null_renderer;
mod plan;
mod style;
mod svg;

pub use null_renderer::NullRenderer;
pub use plan::{DrawPlan, PlanStats};
pub use style::{ChartStyle, Color};
pub use svg::{SvgRenderer, escape_xml};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully computed, deterministic `DrawPlan` so drawing
/// code stays isolated from chart geometry and hover logic.
pub trait Renderer {
    fn render(&mut self, plan: &DrawPlan) -> ChartResult<()>;
}
