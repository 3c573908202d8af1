//! Step monitors (`STEP_MONITOR`)

use super::ResourceDraft;
use crate::adapters::nerdgraph::DetailFetcher;
use crate::core::hcl::{Block, Document, Value};
use crate::domain::{MonitorEntity, Result};

/// Fetch the monitor's steps and add one `step` block per step
///
/// Steps are written in the order they were fetched. A fetch failure fails
/// the whole monitor.
pub async fn render(
    mut draft: ResourceDraft,
    monitor: &MonitorEntity,
    fetcher: &DetailFetcher,
    account_id: i64,
) -> Result<Document> {
    let steps = fetcher.fetch_steps(account_id, &monitor.guid).await?;

    tracing::debug!(
        monitor_guid = %monitor.guid,
        steps = steps.len(),
        "Fetched monitor steps"
    );

    for step in steps {
        let mut block = Block::new("step", Vec::<String>::new());
        block.body_mut().set_attribute_value("ordinal", step.ordinal);
        block.body_mut().set_attribute_value("type", step.step_type);
        block
            .body_mut()
            .set_attribute_value("values", Value::string_list(step.values));
        draft.append_block(block);
    }

    Ok(draft.finish())
}
