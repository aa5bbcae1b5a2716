pub mod action;
pub mod category;
pub mod filter;
pub mod task;
pub mod view;
