pub mod config;
pub mod error;
pub mod logging;
pub mod util;

pub mod fragment;
pub mod pin;
pub mod samples;
pub mod source;
pub mod types;

pub use error::Result;
pub use fragment::{Fragment, snapshot_at};
pub use pin::Pin;
pub use samples::RuntimeSamples;
pub use source::{Construct, PlainSource, SourceBuffer, Span, SpanSet};
pub use types::ComplexType;
