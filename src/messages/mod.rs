//! Hand-written message types in the shape the code generator emits.
//!
//! Each type is a plain struct with documented defaults and a [`Message`](crate::Message) impl:
//! `encode_raw` writes non-default fields in field-number order and `merge_field` is the body of
//! the shared decode loop. They double as fixtures for the codec's own tests and benchmarks.

pub mod clob;
pub mod delaymsg;
pub mod ics23;
