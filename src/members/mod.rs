//! Membership directory
//!
//! Fetches active membership packages from the admin backend (with a 24h
//! JSON cache and offline mode) so enriched sessions can show "7 of 20".

mod cache;
mod db;
mod fetcher;
mod types;

pub(crate) use db::MemberDb;
pub(crate) use types::Membership;
