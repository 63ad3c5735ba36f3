pub mod filter;
pub mod page;
pub mod submission;
