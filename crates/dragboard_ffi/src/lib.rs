//! Flutter bridge for the Dragboard core.

pub mod api;
