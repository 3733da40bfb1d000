//! Aggregate region filter
//!
//! A region is a single filter option that stands for several sub-region
//! communities (the six Bucharest sectors by default). It can be used as a
//! feed filter and as a shortcut inside an event's targeted communities.

use crate::value_objects::{CommunityId, CountryId, IdParseError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRegion {
    /// Value used in query strings and forms, e.g. `bucharest`
    pub token: String,
    /// Human label shown in filter lists
    pub label: String,
    /// Names of the communities the region expands to
    pub community_names: Vec<String>,
}

impl Default for AggregateRegion {
    fn default() -> Self {
        Self::bucharest()
    }
}

impl AggregateRegion {
    pub fn new(token: String, label: String, community_names: Vec<String>) -> Self {
        Self {
            token,
            label,
            community_names,
        }
    }

    pub fn bucharest() -> Self {
        Self {
            token: "bucharest".to_string(),
            label: "Bucharest (all sectors)".to_string(),
            community_names: (1..=6).map(|n| format!("Sector {n}")).collect(),
        }
    }

    /// Case-insensitive match against the region token
    pub fn matches(&self, raw: &str) -> bool {
        raw.trim().eq_ignore_ascii_case(&self.token)
    }
}

/// Parsed `community` feed filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunityFilter {
    Community(CommunityId),
    Region,
}

impl CommunityFilter {
    /// Parse a raw query value. Empty or unparseable values mean "no filter".
    pub fn parse(raw: Option<&str>, region: &AggregateRegion) -> Option<Self> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }
        if region.matches(raw) {
            return Some(Self::Region);
        }
        CommunityId::parse(raw).ok().map(Self::Community)
    }
}

/// Parse a raw `country` query value. Unparseable values mean "no filter".
pub fn parse_country_filter(raw: Option<&str>) -> Option<CountryId> {
    raw.and_then(|r| CountryId::parse(r).ok())
}

/// Resolve targeted-community form values into ids.
///
/// The region token expands to `region_ids`; every other value must be a
/// numeric id. Duplicates are dropped, first occurrence wins.
pub fn resolve_targets(
    raw: &[String],
    region: &AggregateRegion,
    region_ids: &[CommunityId],
) -> Result<Vec<CommunityId>, IdParseError> {
    let mut out: Vec<CommunityId> = Vec::with_capacity(raw.len());
    for value in raw {
        if region.matches(value) {
            for id in region_ids {
                if !out.contains(id) {
                    out.push(*id);
                }
            }
            continue;
        }
        let id = CommunityId::parse(value)?;
        if !out.contains(&id) {
            out.push(id);
        }
    }
    Ok(out)
}
