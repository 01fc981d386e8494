pub mod format;
pub mod highlight;
