//! Admin console BFF: state, requests, and handlers behind the sidebar and
//! the role editing screen.
//!
//! - `state/`: types stored in the flux state tree (`auth/state`,
//!   `app/route`, `nav/state`, `nav/menu`, `role/editor`).
//! - `request/`: request payloads with their routing path.
//! - `handlers/`: handler implementations and [`register_handlers`].
//! - [`source`]: the backend collaborators handlers call, always with an
//!   explicit [`campus_core::Session`].

pub mod error;
pub mod handlers;
pub mod request;
pub mod source;
pub mod state;

pub use error::ConsoleError;
pub use handlers::{register_handlers, ConsoleContext};
pub use source::{MenuSource, RoleSink};

#[cfg(test)]
pub(crate) mod testkit;
