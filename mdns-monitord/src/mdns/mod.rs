pub mod decode;
pub mod listener;
