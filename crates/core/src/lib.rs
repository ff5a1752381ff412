//! Domain logic for post revision history.
//!
//! Everything in this crate is pure: it takes revisions already loaded by the
//! repository layer and turns them into diffed, attributed display records.
//! Nothing here touches the database or the network.

pub mod access;
pub mod censor;
pub mod diff;
pub mod error;
pub mod history;
pub mod paging;
pub mod presentation;
pub mod revert;
pub mod revision;
pub mod roles;
pub mod slug;
pub mod types;
