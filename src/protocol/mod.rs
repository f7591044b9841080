//! Wire protocol.
//!
//! JSON request and event types exchanged with clients, the line codec the
//! server binary uses on stdin/stdout, and the text diagram notation for
//! boards.

pub mod diagram;
pub mod message;
pub mod parser;

pub use diagram::{encode_diagram, parse_diagram, DiagramError};
pub use message::{Event, Inbound, MoveData, Outbound, Request};
pub use parser::{encode_outbound, parse_request, ParseError};
