//! Playlist transfer between music-streaming accounts.
//!
//! Holds the OAuth connection lifecycle (CSRF state tokens, per-provider
//! credentials, token rotation) and the two-party transfer orchestrator.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod services;
