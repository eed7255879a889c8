//! # Plate Search
//!
//! Checks personalised plate availability on the EzyPlates portal by
//! driving a headless Chrome: type the plate, press the button, read what
//! the page says.
//!
//! ## Layers
//!
//! ### ① Infrastructure
//! - `infrastructure/` - `PageActions`, the primitives a tab offers, and
//!   `ChromePage`, the only holder of a chromiumoxide `Page`
//! - `browser/` - launching/attaching Chrome and releasing it (`BrowserSession`)
//!
//! ### ② Services
//! - `validator` - plate format rules, no network
//! - `classifier` - result text → available / unavailable / unknown
//! - `report_writer` - CSV report and console summary
//!
//! ### ③ Workflow
//! - `PlateCheckFlow` - navigate → fill → submit → read → classify for one plate
//! - `PageContract` - the portal's URL and element selectors
//!
//! ### ④ Orchestration
//! - `BatchProcessor` - sequential checks with pacing over one session
//! - `App` - acquires the session for a batch or a single check

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

pub use browser::{BrowserSession, SessionHandle};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ChromePage, PageActions};
pub use models::{PlateQuery, ResultSet, SearchResult, Status};
pub use orchestrator::{App, BatchOutcome, BatchProcessor};
pub use workflow::{CheckCtx, PageContract, PlateCheckFlow};
