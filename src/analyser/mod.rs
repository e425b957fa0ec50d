pub mod logic;
pub mod report;
