//! Declarative request engine
//!
//! Endpoint descriptors are compiled at call time into concrete requests and
//! dispatched through the transport.
//!
//! # Module Structure
//!
//! - [`descriptor`] - Static description of one remote operation
//! - [`path`] - `{name}` placeholder substitution with percent-encoding
//! - [`keys`] - Input field name to wire field name renaming
//! - [`compiler`] - Descriptor + call input -> [`ResolvedRequest`]
//! - [`executor`] - Dispatch and response interpretation
//!
//! Nothing in this module logs or retries; both belong to the transport and
//! the consuming application.

pub mod compiler;
pub mod descriptor;
pub mod executor;
pub mod keys;
pub mod path;

pub use compiler::{compile, compile_update, to_call_input, ResolvedRequest};
pub use descriptor::{EndpointDescriptor, Method};
pub use executor::execute;
