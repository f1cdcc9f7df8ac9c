//! Structured view of provider replies

mod block;
mod parser;

pub use block::{ContentBlock, ParsedResponse};
pub use parser::parse_response;
