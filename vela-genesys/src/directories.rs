//! Directory adapters for Genesys Cloud entity listings
//!
//! One adapter per entity type the resolver can look up by name. All of
//! them share the same shape: one listing pass (filtered server-side
//! where the endpoint supports it), then an exact label match
//! client-side, skipping soft-deleted entries.

use std::sync::Arc;

use async_trait::async_trait;
use vela_core::{Directory, DirectoryRegistry, DirectoryResult, Entry, LookupKey};

use crate::client::GenesysClient;

/// How to list and match one entity type
#[derive(Debug, Clone, Copy)]
pub struct ListingSpec {
    /// Entity type name exposed through the registry
    pub entity: &'static str,
    /// Listing endpoint path
    pub path: &'static str,
    /// Server-side filter query parameter, when the endpoint has one
    pub filter_param: Option<&'static str>,
    /// Extract the label a key is matched against
    pub label: fn(&serde_json::Value) -> Option<&str>,
}

fn name_label(entity: &serde_json::Value) -> Option<&str> {
    entity.get("name")?.as_str()
}

fn start_number_label(entity: &serde_json::Value) -> Option<&str> {
    entity.get("startNumber")?.as_str()
}

/// Every entity type the Genesys registry serves
pub const ALL: [ListingSpec; 8] = [
    ListingSpec {
        entity: "routing_skill",
        path: "/api/v2/routing/skills",
        filter_param: Some("name"),
        label: name_label,
    },
    ListingSpec {
        entity: "routing_skill_group",
        path: "/api/v2/routing/skills/groups",
        filter_param: Some("name"),
        label: name_label,
    },
    ListingSpec {
        entity: "routing_wrapupcode",
        path: "/api/v2/routing/wrapupcodes",
        filter_param: Some("name"),
        label: name_label,
    },
    ListingSpec {
        entity: "outbound_callabletimeset",
        path: "/api/v2/outbound/callabletimesets",
        filter_param: Some("name"),
        label: name_label,
    },
    ListingSpec {
        entity: "outbound_dnclist",
        path: "/api/v2/outbound/dnclists",
        filter_param: Some("name"),
        label: name_label,
    },
    ListingSpec {
        entity: "flow",
        path: "/api/v2/flows",
        filter_param: Some("name"),
        label: name_label,
    },
    ListingSpec {
        entity: "edges_site",
        path: "/api/v2/telephony/providers/edges/sites",
        filter_param: Some("name.value"),
        label: name_label,
    },
    // Extension pools have no server-side name filter; the whole listing
    // is walked and pools are matched on their start number.
    ListingSpec {
        entity: "edges_extension_pool",
        path: "/api/v2/telephony/providers/edges/extensionpools",
        filter_param: None,
        label: start_number_label,
    },
];

/// Directory over one Genesys listing endpoint
pub struct ListingDirectory {
    client: Arc<GenesysClient>,
    spec: ListingSpec,
}

impl ListingDirectory {
    pub fn new(client: Arc<GenesysClient>, spec: ListingSpec) -> Self {
        Self { client, spec }
    }
}

#[async_trait]
impl Directory for ListingDirectory {
    fn entity_type(&self) -> &'static str {
        self.spec.entity
    }

    async fn find(&self, key: &LookupKey) -> DirectoryResult<Vec<Entry>> {
        let query: Vec<(&str, &str)> = match self.spec.filter_param {
            Some(param) => vec![(param, key.as_str())],
            None => vec![],
        };
        let raw = self.client.fetch_all(self.spec.path, &query).await?;
        Ok(matching_entries(&self.spec, key, raw))
    }
}

/// Apply the exact-match filter to a raw listing
///
/// Server-side name filters are substring searches, so "Support" would
/// also return "Support Tier 2"; only entries whose label equals the key
/// (ignoring ASCII case) survive. Soft-deleted entries linger in
/// listings for a while and are skipped.
fn matching_entries(
    spec: &ListingSpec,
    key: &LookupKey,
    raw: Vec<serde_json::Value>,
) -> Vec<Entry> {
    raw.into_iter()
        .filter_map(|entity| {
            if is_deleted(&entity) {
                return None;
            }
            let label = (spec.label)(&entity)?.to_string();
            if !label.eq_ignore_ascii_case(key.as_str()) {
                return None;
            }
            let id = entity.get("id")?.as_str()?.to_string();
            Some(Entry::new(id, label).with_attributes(entity))
        })
        .collect()
}

fn is_deleted(entity: &serde_json::Value) -> bool {
    entity.get("state").and_then(|s| s.as_str()) == Some("deleted")
}

/// Build the registry of every Genesys directory
pub fn registry(client: Arc<GenesysClient>) -> DirectoryRegistry {
    let mut registry = DirectoryRegistry::new();
    for spec in ALL {
        registry.register(Arc::new(ListingDirectory::new(client.clone(), spec)));
    }
    registry
}
