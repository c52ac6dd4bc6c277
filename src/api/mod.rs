pub mod mock_data;
mod playground;

pub use mock_data::default_period;
pub use playground::{ChartPlayground, ChartSlot, PlaygroundConfig, PlaygroundData};
