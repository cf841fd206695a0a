pub mod category;
pub mod common;
pub mod entry;
pub mod portfolio;

pub use category::Category;
pub use common::Displayable;
pub use entry::Entry;
pub use portfolio::Portfolio;
