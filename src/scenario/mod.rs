//! Request generation for the howlite-resources scenario.
//!
//! Every iteration produces one `POST <target>/<random token>` carrying a
//! fixed JSON payload. Generation is stateless: the generator can be shared
//! across any number of virtual users without synchronization.
mod generator;
mod options;
mod payload;
mod token;


pub use generator::{JSON_CONTENT_TYPE, RequestDescriptor, RequestGenerator};
pub use options::Options;
pub use payload::RequestPayload;
pub use token::random_token;
