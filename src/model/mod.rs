pub mod access;
pub mod auth;
pub mod candidate;
pub mod common;
pub mod election;
pub mod event;
pub mod platform;
pub mod reserve;
pub mod votes;
pub mod whitelist;
