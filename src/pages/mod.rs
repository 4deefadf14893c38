pub mod core;
pub mod error;
pub mod handlers;
pub mod types;

pub use core::{PageRegistry, render_page};
pub use error::PageError;
pub use handlers::page_handler;
pub use types::{Page, PageBehavior};
