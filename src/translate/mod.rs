//! API translation between `OpenAI` and Anthropic formats.
//!
//! The core of the gateway: converts requests and responses between the two
//! wire formats. All translation functions are pure (no I/O).

pub mod anthropic_types;
pub mod openai_types;
pub mod request;
pub mod response;
