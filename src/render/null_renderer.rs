use crate::error::ChartResult;
use crate::render::{DrawPlan, PlanStats, Renderer};

/// No-op renderer used by tests and headless runs.
///
/// It still validates plan content so tests can catch invalid geometry before
/// it reaches a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub rendered_plans: usize,
    pub last_stats: PlanStats,
}

impl Renderer for NullRenderer {
    fn render(&mut self, plan: &DrawPlan) -> ChartResult<()> {
        plan.validate()?;
        self.rendered_plans += 1;
        self.last_stats = plan.stats();
        Ok(())
    }
}
