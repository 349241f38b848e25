pub mod chart;
pub mod formatting;
pub mod table_renderer;

pub use chart::{budget_chart, share_chart, ChartStyle};
pub use formatting::{format_amount, format_percent, terminal_width};
pub use table_renderer::{Alignment, Table, TableColumn};
