pub mod answer_parser;
pub mod forwarder;

pub use answer_parser::parse_answer;
pub use forwarder::{ForwardedResponse, UpstreamForwarder};
