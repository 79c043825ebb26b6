//! Text codec for the `name=value` configuration format.

pub mod text;

pub use text::{decode_properties, encode_properties, is_key_char, is_valid_name, CodecError, MalformedReason};
