pub mod chrome_page;
pub mod page_actions;
pub mod wait;

pub use chrome_page::ChromePage;
pub use page_actions::PageActions;
