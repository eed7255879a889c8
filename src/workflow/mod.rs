pub mod check_ctx;
pub mod page_contract;
pub mod plate_check;

pub use check_ctx::CheckCtx;
pub use page_contract::PageContract;
pub use plate_check::PlateCheckFlow;
