//! Monitor discovery and per-monitor detail retrieval

use super::client::{query_as, GraphQlClient};
use super::models::{
    AccountData, ScriptPayload, SearchMonitorsData, StepsPayload, MONITOR_SCRIPT_QUERY,
    MONITOR_STEPS_QUERY, SEARCH_MONITORS_QUERY,
};
use crate::domain::{MonitorEntity, MonitorGuid, MonitorStep, RemoteQueryError};
use serde_json::json;
use std::sync::Arc;

/// Fetches step sequences and script text for individual monitors
///
/// Each call issues exactly one query. Failures are returned to the caller
/// as-is; nothing is retried here.
#[derive(Clone)]
pub struct DetailFetcher {
    client: Arc<dyn GraphQlClient>,
}

impl DetailFetcher {
    pub fn new(client: Arc<dyn GraphQlClient>) -> Self {
        Self { client }
    }

    /// Ordered steps of a step monitor, in the order NerdGraph returns them
    ///
    /// A monitor without steps yields an empty sequence.
    pub async fn fetch_steps(
        &self,
        account_id: i64,
        guid: &MonitorGuid,
    ) -> Result<Vec<MonitorStep>, RemoteQueryError> {
        let data: AccountData<StepsPayload> = query_as(
            self.client.as_ref(),
            MONITOR_STEPS_QUERY,
            json!({ "accountID": account_id, "guid": guid.as_str() }),
        )
        .await?;

        Ok(data.actor.account.synthetics.steps.unwrap_or_default())
    }

    /// Script text of a scripted monitor
    pub async fn fetch_script(
        &self,
        account_id: i64,
        guid: &MonitorGuid,
    ) -> Result<String, RemoteQueryError> {
        let data: AccountData<ScriptPayload> = query_as(
            self.client.as_ref(),
            MONITOR_SCRIPT_QUERY,
            json!({ "accountID": account_id, "guid": guid.as_str() }),
        )
        .await?;

        data.actor
            .account
            .synthetics
            .script
            .map(|script| script.text)
            .ok_or_else(|| {
                RemoteQueryError::InvalidResponse(format!("monitor {guid} has no script"))
            })
    }
}

/// Run the entity search and decode every synthetic monitor outline
///
/// Entities of other domains come back as empty objects; those, and any
/// outline that doesn't decode, are logged and dropped.
pub async fn search_monitors(
    client: &dyn GraphQlClient,
    locator_query: &str,
) -> Result<Vec<MonitorEntity>, RemoteQueryError> {
    let data: SearchMonitorsData =
        query_as(client, SEARCH_MONITORS_QUERY, json!({ "query": locator_query })).await?;

    let raw = data.actor.entity_search.results.entities;
    let total = raw.len();

    let monitors: Vec<MonitorEntity> = raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<MonitorEntity>(value) {
            Ok(monitor) => Some(monitor),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring search result that is not a synthetic monitor");
                None
            }
        })
        .collect();

    tracing::debug!(
        total = total,
        monitors = monitors.len(),
        query = locator_query,
        "Entity search completed"
    );

    Ok(monitors)
}

/// Keep only the monitors named in `ids`
///
/// An empty `ids` keeps everything. Selection stops as soon as every
/// requested identifier has matched; the order of `ids` is irrelevant.
pub fn select_monitors(monitors: Vec<MonitorEntity>, ids: &[MonitorGuid]) -> Vec<MonitorEntity> {
    if ids.is_empty() {
        return monitors;
    }

    let mut selected = Vec::with_capacity(ids.len());
    for monitor in monitors {
        if ids.contains(&monitor.guid) {
            selected.push(monitor);
            if selected.len() == ids.len() {
                break;
            }
        }
    }
    selected
}
