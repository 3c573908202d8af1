//! Scripted browser monitors (`SCRIPT_BROWSER`)

use super::ResourceDraft;
use crate::adapters::nerdgraph::DetailFetcher;
use crate::core::hcl::{encode_heredoc, Document, HeredocLayout};
use crate::domain::{MonitorEntity, Result};

/// Heredoc terminator of the `script` attribute
pub const SCRIPT_MARKER: &str = "SCRIPT";

/// Fetch the monitor's script and embed it as a dedented heredoc
///
/// Template sequences in the script are escaped so Terraform reads the text
/// back literally. A fetch failure fails the whole monitor.
pub async fn render(
    mut draft: ResourceDraft,
    monitor: &MonitorEntity,
    fetcher: &DetailFetcher,
    account_id: i64,
) -> Result<Document> {
    let script = fetcher.fetch_script(account_id, &monitor.guid).await?;

    let attributes = draft.attributes_mut();
    if let Some(language) = monitor.tag_value("scriptLanguage") {
        attributes.set_attribute_value("script_language", language);
    }
    attributes.set_attribute_raw(
        "script",
        encode_heredoc(&script, SCRIPT_MARKER, HeredocLayout::Dedented, true),
    );

    Ok(draft.finish())
}
