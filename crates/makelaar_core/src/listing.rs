//! A single listing record from the feed.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One listing as delivered in a feed page's `Objects` array.
///
/// Only the agent fields are interpreted; every other field the feed sends
/// is kept verbatim in [`Listing::extra`].
///
/// # Examples
///
/// ```
/// use makelaar_core::Listing;
///
/// let listing: Listing = serde_json::from_str(
///     r#"{"MakelaarId": 24648, "MakelaarNaam": "Hoekstra Makelaardij", "Woonplaats": "Amsterdam"}"#,
/// )
/// .unwrap();
///
/// assert_eq!(*listing.agent_id(), 24648);
/// assert_eq!(listing.agent_name().as_deref(), Some("Hoekstra Makelaardij"));
/// assert_eq!(listing.extra()["Woonplaats"], "Amsterdam");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters)]
pub struct Listing {
    /// Agent identifier, 0 when the listing has no agent
    #[serde(rename = "MakelaarId", default)]
    agent_id: i64,
    /// Agent display name, possibly absent or empty
    #[serde(rename = "MakelaarNaam", default)]
    agent_name: Option<String>,
    /// Remaining listing fields, untouched
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Listing {
    /// Creates a listing attributed to the given agent.
    pub fn new(agent_id: i64, agent_name: impl Into<String>) -> Self {
        Self {
            agent_id,
            agent_name: Some(agent_name.into()),
            extra: Map::new(),
        }
    }

    /// Creates a listing whose agent name is absent.
    pub fn without_agent_name(agent_id: i64) -> Self {
        Self {
            agent_id,
            agent_name: None,
            extra: Map::new(),
        }
    }

    /// Agent name if it is present and not blank.
    pub fn named_agent(&self) -> Option<&str> {
        self.agent_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }
}
