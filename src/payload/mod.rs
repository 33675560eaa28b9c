//! Request bodies loaded from a folder of `*.json` files.
mod source;


pub use source::{JSON_CONTENT_TYPE, Payload, PayloadSource, discover_json_files};
