// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! State containers wrapping the REST API.
//!
//! Every operation follows the same shape: set loading, clear the error,
//! make one call, reconcile local state, clear loading. Reads swallow
//! failures into `error` and return an empty result; writes record the
//! error and hand it back to the caller.

pub mod auth;
pub mod collection;
pub mod fitbit;
pub mod message_content;
pub mod messages;
pub mod participants;
pub mod state;

pub use auth::AuthStore;
pub use collection::{Operation, RemoteCollection, Resource};
pub use fitbit::FitbitStore;
pub use message_content::{MessageContentResource, MessageContentStore};
pub use messages::MessagesStore;
pub use participants::{ParticipantResource, ParticipantStore};
pub use state::StoreState;
