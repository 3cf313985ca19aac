pub mod dispatch;
pub mod request;
pub mod validate;

pub use dispatch::render_chart;
pub use request::{ChartRequest, RequestEncoding};
pub use validate::ValidatedChart;
