//! Simple browser monitors (`BROWSER`)

use super::ResourceDraft;
use crate::core::hcl::Document;
use crate::domain::MonitorEntity;

/// Add the simple-monitor attributes and finish the document
///
/// The screenshot, HEAD-bypass and SSL flags are always on. The first
/// `responseValidationText` tag with a value becomes `validation_text`.
pub fn render(mut draft: ResourceDraft, monitor: &MonitorEntity) -> Document {
    let attributes = draft.attributes_mut();
    attributes.set_attribute_value("enable_screenshot_on_failure_and_script", true);
    attributes.set_attribute_value("bypass_head_request", true);
    attributes.set_attribute_value("verify_ssl", true);
    attributes.set_attribute_value("uri", monitor.monitored_url.clone().unwrap_or_default());

    if let Some(text) = monitor.tag_value("responseValidationText") {
        attributes.set_attribute_value("validation_text", text);
    }

    draft.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::nerdgraph::DetailFetcher;
    use crate::core::render::test_support::{monitor, StaticClient};
    use crate::core::render::{DocumentWriter, MonitorRenderer, RenderTables};
    use serde_json::json;
    use std::sync::Arc;

    fn draft_for(entity: &MonitorEntity) -> ResourceDraft {
        MonitorRenderer::new(
            Arc::new(RenderTables::default()),
            DetailFetcher::new(Arc::new(StaticClient(Ok(json!({}))))),
            DocumentWriter::new("unused", true),
            1,
        )
        .render_common("newrelic_synthetics_monitor", "login_check", entity)
        .unwrap()
    }

    #[test]
    fn test_simple_monitor_document() {
        let login = monitor(
            "Login Check",
            "BROWSER",
            json!([
                { "key": "publicLocation", "values": ["Washington, DC, USA"] },
                { "key": "period", "values": ["5"] },
                { "key": "monitorStatus", "values": ["enabled"] },
                { "key": "responseValidationText", "values": ["Welcome"] },
                { "key": "responseValidationText", "values": ["Ignored"] }
            ]),
        );

        let output = render(draft_for(&login), &login).to_string();

        let expected = concat!(
            "resource \"newrelic_synthetics_monitor\" \"login_check\" {\n",
            "  name             = \"Login Check\"\n",
            "  type             = \"BROWSER\"\n",
            "  locations_public = [\"US_EAST_1\"]\n",
            "\n",
            "  period = \"EVERY_5_MINUTES\"\n",
            "  status = \"ENABLED\"\n",
            "\n",
            "  enable_screenshot_on_failure_and_script = true\n",
            "  bypass_head_request                     = true\n",
            "  verify_ssl                              = true\n",
            "  uri                                     = \"https://example.com/login\"\n",
            "  validation_text                         = \"Welcome\"\n",
            "}\n",
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_simple_monitor_without_validation_text() {
        let login = monitor(
            "Login Check",
            "BROWSER",
            json!([{ "key": "publicLocation", "values": ["Washington, DC, USA"] }]),
        );

        let output = render(draft_for(&login), &login).to_string();

        assert!(!output.contains("validation_text"));
        assert!(output.contains("verify_ssl"));
    }
}
