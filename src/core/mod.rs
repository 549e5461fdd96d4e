pub mod log;
pub mod mutations;
pub mod persistent;
pub mod records;
