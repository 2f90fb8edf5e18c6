pub mod renderer;
pub mod timezone;
pub mod writer;

pub use renderer::{ReportBlock, ReportRenderer};
pub use timezone::ReportZone;
pub use writer::{ReportFile, ReportHandle, ReportSink, ReportWriter, WriterStats};
