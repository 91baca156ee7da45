//! Shared test fixtures and fakes.

mod helpers;

pub(crate) use fakes::GatedApi;
pub(crate) use helpers::{NOW, booking, draft_for_tonight, room, session};
