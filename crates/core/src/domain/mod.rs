pub mod report;
pub mod ticker;
