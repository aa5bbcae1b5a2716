pub mod core;
pub mod parse;
pub mod store;
