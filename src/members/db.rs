use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::engine::ScheduleKind;

use super::cache::{load_raw_cache, load_raw_cache_if_fresh, save_raw_cache};
use super::fetcher::fetch_members_raw;
use super::types::Membership;

const MEMBERS_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Membership directory loaded from the admin backend or cache. Used only
/// to annotate enriched sessions with purchased totals; an empty directory
/// never blocks the engine.
#[derive(Debug, Default)]
pub(crate) struct MemberDb {
    by_member: HashMap<String, Vec<Membership>>,
}

impl MemberDb {
    pub(crate) fn from_memberships(memberships: Vec<Membership>) -> Self {
        let mut by_member: HashMap<String, Vec<Membership>> = HashMap::new();
        for membership in memberships {
            by_member
                .entry(membership.member_id.clone())
                .or_default()
                .push(membership);
        }
        Self { by_member }
    }

    fn from_raw_data(data: Vec<serde_json::Value>) -> Self {
        // Skip rows the backend sends in a shape we don't know
        let memberships = data
            .into_iter()
            .filter_map(|value| serde_json::from_value::<Membership>(value).ok())
            .collect();
        Self::from_memberships(memberships)
    }

    fn load_from_cache() -> Option<Self> {
        let raw_data = load_raw_cache()?;
        Some(Self::from_raw_data(raw_data))
    }

    fn load_from_cache_if_fresh(ttl: Duration) -> Option<(Self, Duration)> {
        let (raw_data, age) = load_raw_cache_if_fresh(ttl)?;
        Some((Self::from_raw_data(raw_data), age))
    }

    pub(crate) fn load(url: Option<&str>, offline: bool) -> Self {
        Self::load_internal(url, offline, false)
    }

    fn load_internal(url: Option<&str>, offline: bool, quiet: bool) -> Self {
        let start = Instant::now();

        if offline {
            if let Some(db) = Self::load_from_cache() {
                if !quiet {
                    eprintln!(
                        "Using cached memberships ({:.2}ms)",
                        start.elapsed().as_secs_f64() * 1000.0
                    );
                }
                return db;
            }
            if !quiet {
                eprintln!("No cached memberships, session totals unavailable");
            }
            return Self::default();
        }

        let Some(url) = url else {
            // No endpoint configured; the enricher just leaves totals unset
            return Self::default();
        };

        if let Some((db, age)) = Self::load_from_cache_if_fresh(MEMBERS_CACHE_TTL) {
            if !quiet {
                eprintln!(
                    "Using cached memberships ({:.1}h old)",
                    age.as_secs_f64() / 3600.0
                );
            }
            return db;
        }

        if !quiet {
            eprint!("Fetching memberships...");
        }
        if let Some(raw_data) = fetch_members_raw(url) {
            let fetch_time = start.elapsed();
            let db = Self::from_raw_data(raw_data.clone());
            save_raw_cache(&raw_data);
            if !quiet {
                eprintln!(
                    " {} members ({:.2}ms)",
                    db.by_member.len(),
                    fetch_time.as_secs_f64() * 1000.0
                );
            }
            return db;
        }

        if !quiet {
            eprintln!(" failed, trying cache...");
        }
        if let Some(db) = Self::load_from_cache() {
            if !quiet {
                eprintln!(
                    "Using cached memberships ({:.2}ms)",
                    start.elapsed().as_secs_f64() * 1000.0
                );
            }
            return db;
        }

        if !quiet {
            eprintln!("No membership data, session totals unavailable");
        }
        Self::default()
    }

    /// Purchased session count for the member's active package of the
    /// given modality: the active membership whose name contains the
    /// modality token, case-insensitively. Several matches take the
    /// largest package.
    pub(crate) fn total_sessions(&self, member_id: &str, kind: ScheduleKind) -> Option<u32> {
        let token = kind.membership_token()?;
        self.by_member
            .get(member_id)?
            .iter()
            .filter(|m| m.active && m.name.to_lowercase().contains(token))
            .map(|m| m.total_sessions)
            .max()
    }
}
