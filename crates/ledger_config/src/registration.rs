use serde::{Deserialize, Serialize};

/// Whether an account must register a credential before it may vote.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RegistrationPolicy {
    /// Votes from accounts without a registered credential are rejected
    #[default]
    Required,

    /// Any account may vote; registration is still available
    Optional,
}

impl RegistrationPolicy {
    pub fn is_required(&self) -> bool {
        matches!(self, RegistrationPolicy::Required)
    }
}
