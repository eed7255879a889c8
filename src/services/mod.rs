pub mod classifier;
pub mod report_writer;
pub mod validator;

pub use classifier::classify;
pub use report_writer::{summarize, ReportWriter};
pub use validator::validate;
