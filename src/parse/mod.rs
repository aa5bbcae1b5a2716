pub mod dates;
pub mod keywords;
pub mod parser;

pub use parser::{ParsedTask, TaskParser, neutral_title};
