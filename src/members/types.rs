use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// One purchased session package, as returned by the admin backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Membership {
    pub(crate) member_id: String,
    /// Package name; matched against modality tokens ("PT 30", "OT 패키지")
    pub(crate) name: String,
    pub(crate) total_sessions: u32,
    #[serde(default = "default_active")]
    pub(crate) active: bool,
}
