//! Flux: the path-addressed state engine behind the campus console.
//!
//! All state and requests live in one `/`-separated namespace:
//! `auth/state`, `app/route`, `nav/state`, `role/editor`.
//! Handlers and subscriptions match with MQTT-style wildcards
//! (`+` one segment, `#` the rest).
//!
//! Types declare their path with `#[state("..")]` / `#[request("..")]`,
//! which add a `PATH` constant.

pub mod app;
pub mod store;
pub mod topic;
pub mod value;

pub use app::{BoxFuture, Flux, Payload};
pub use campus_flux_derive::{request, state};
pub use store::{ChangeHandler, StateStore};
pub use value::{StateValue, SubscriptionId};
