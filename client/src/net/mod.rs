//! Network layer for the browser client.

pub mod api;
