pub mod arc;
pub mod band_scale;
pub mod bar_chart;
pub mod gauge;
pub mod label_format;
pub mod line_chart;
pub mod path;
pub mod pie;
pub mod primitives;
pub mod scale;
pub mod stacked_bar_chart;
pub mod time_scale;
pub mod types;

pub use arc::{ArcGenerator, pointer_angle};
pub use band_scale::BandScale;
pub use bar_chart::{Bar, BarChartConfig, BarChartPlan, BarPointer, compute_bar_chart};
pub use gauge::{GaugeConfig, GaugePlan, GaugeStatus, compute_gauge};
pub use label_format::{LabelLocale, format_number, format_value, time_tick_labels};
pub use line_chart::{
    LineChartConfig, LineChartPlan, LineMarker, LineSeries, MarkerGroup, compute_line_chart,
};
pub use path::{PathBuilder, line_path};
pub use pie::{PieConfig, PiePlan, PieSlice, compute_pie};
pub use primitives::{AxisTick, GuideLine, Rect, TooltipContent, TooltipRow};
pub use scale::{LinearScale, tick_increment, ticks};
pub use stacked_bar_chart::{
    StackedBarChartConfig, StackedBarChartPlan, StackedCell, StackedColumn,
    compute_stacked_bar_chart,
};
pub use time_scale::TimeScale;
pub use types::{
    Category, CategoryValue, Margins, Period, StackedBarPoint, TimeSeriesPoint, Viewport,
};
