pub mod analyzer;
pub mod citations;
pub mod error;
pub mod input;
pub mod model;
pub mod prompt;
pub mod schema;
pub mod wire;

pub use analyzer::{GeminiAnalyzer, ReportSource};
pub use error::{AnalysisError, ErrorKind};
pub use input::AnalysisInput;
pub use model::SeoReport;
