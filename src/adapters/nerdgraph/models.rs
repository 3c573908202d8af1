//! NerdGraph queries and response envelopes
//!
//! The query documents and the `data` shapes they return. These models are
//! separate from the domain models; only the entity outline and steps decode
//! straight into domain types.

use crate::domain::MonitorStep;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Entity search for synthetic monitors
pub const SEARCH_MONITORS_QUERY: &str = r#"query($query: String!) {
  actor {
    entitySearch(query: $query) {
      results {
        entities {
          ... on SyntheticMonitorEntityOutline {
            guid
            name
            monitorType
            monitoredUrl
            goldenTags {
              tags {
                key
              }
            }
            tags {
              key
              values
            }
          }
        }
      }
    }
  }
}"#;

/// Ordered steps of a step monitor
pub const MONITOR_STEPS_QUERY: &str = r#"query($accountID: Int!, $guid: EntityGuid!) {
  actor {
    account(id: $accountID) {
      synthetics {
        steps(monitorGuid: $guid) {
          ordinal
          type
          values
        }
      }
    }
  }
}"#;

/// Script text of a scripted monitor
pub const MONITOR_SCRIPT_QUERY: &str = r#"query($accountID: Int!, $guid: EntityGuid!) {
  actor {
    account(id: $accountID) {
      synthetics {
        script(monitorGuid: $guid) {
          text
        }
      }
    }
  }
}"#;

/// GraphQL HTTP request body
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
}

/// GraphQL HTTP response body
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlErrorMessage>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlErrorMessage {
    pub message: String,
}

/// `data` of [`SEARCH_MONITORS_QUERY`]
///
/// Entities are kept as raw JSON: entities that aren't synthetic monitors
/// come back as empty objects and are filtered out by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchMonitorsData {
    pub actor: SearchActor,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchActor {
    pub entity_search: EntitySearch,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntitySearch {
    pub results: SearchResults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub entities: Vec<Value>,
}

/// `data` of the per-account synthetics queries
#[derive(Debug, Clone, Deserialize)]
pub struct AccountData<T> {
    pub actor: AccountActor<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountActor<T> {
    pub account: AccountSynthetics<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountSynthetics<T> {
    pub synthetics: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StepsPayload {
    #[serde(default)]
    pub steps: Option<Vec<MonitorStep>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptPayload {
    #[serde(default)]
    pub script: Option<ScriptText>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptText {
    #[serde(default)]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_steps_payload_decodes() {
        let data: AccountData<StepsPayload> = serde_json::from_value(json!({
            "actor": { "account": { "synthetics": { "steps": [
                { "ordinal": 1, "type": "ASSERT_TEXT", "values": ["Welcome"] },
                { "ordinal": 0, "type": "NAVIGATE", "values": ["https://example.com"] }
            ]}}}
        }))
        .unwrap();

        let steps = data.actor.account.synthetics.steps.unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].step_type, "ASSERT_TEXT");
    }

    #[test]
    fn test_null_script_decodes_to_none() {
        let data: AccountData<ScriptPayload> = serde_json::from_value(json!({
            "actor": { "account": { "synthetics": { "script": null }}}
        }))
        .unwrap();

        assert!(data.actor.account.synthetics.script.is_none());
    }

    #[test]
    fn test_graphql_response_with_errors() {
        let response: GraphQlResponse = serde_json::from_value(json!({
            "errors": [{ "message": "Not authorized", "path": ["actor"] }]
        }))
        .unwrap();

        assert!(response.data.is_none());
        assert_eq!(response.errors.unwrap()[0].message, "Not authorized");
    }

    #[test]
    fn test_search_queries_name_expected_fields() {
        assert!(SEARCH_MONITORS_QUERY.contains("entitySearch"));
        assert!(MONITOR_STEPS_QUERY.contains("steps(monitorGuid: $guid)"));
        assert!(MONITOR_SCRIPT_QUERY.contains("script(monitorGuid: $guid)"));
    }
}
