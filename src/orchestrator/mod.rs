//! Orchestration layer
//!
//! ```text
//! batch_processor (Vec<String> of raw plates, owns the session)
//!     ↓
//! services::validator (raw → PlateQuery)
//!     ↓
//! workflow::PlateCheckFlow (one PlateQuery)
//!     ↓
//! infrastructure (PageActions on a ChromePage)
//! ```

pub mod batch_processor;

pub use batch_processor::{App, BatchOutcome, BatchProcessor};
