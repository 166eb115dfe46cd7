pub use self::axes::{Axes, AxesBuilder};
pub use self::histogram::{Histogram, HistogramOptions};

mod axes;
mod histogram;
