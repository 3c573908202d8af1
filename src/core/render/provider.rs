//! Provider boilerplate written once per run

use crate::core::hcl::{reference as raw, Document, Value};
use crate::core::lookup::index_of;

const PROVIDER_COMMENT: &str = "# Configure the New Relic provider\n";

/// File name of the provider document for an account
pub fn provider_file_name(account_id: i64) -> String {
    format!("newrelic_provider_{account_id}.tf")
}

/// Render the `newrelic` provider block and its input variables
///
/// The account id becomes the default of `var.account_id`; the API key is
/// always left to the caller. Regions other than `US` and `EU` fall back to
/// `US`.
pub fn provider_document(account_id: i64, region: &str) -> String {
    let region = region.to_uppercase();
    let region = if index_of(&region.as_str(), &["US", "EU"]).is_some() {
        region
    } else {
        "US".to_string()
    };

    let mut document = Document::new();
    let body = document.body_mut();

    let provider = body.append_new_block("provider", ["newrelic"]);
    provider
        .body_mut()
        .set_attribute_raw("account_id", raw("var.account_id"));
    provider.body_mut().set_attribute_raw("api_key", raw("var.api_key"));
    provider.body_mut().set_attribute_value("region", region);

    body.append_newline();
    let account = body.append_new_block("variable", ["account_id"]);
    account.body_mut().set_attribute_raw("type", raw("number"));
    account
        .body_mut()
        .set_attribute_value("description", "The New Relic Account ID");
    account
        .body_mut()
        .set_attribute_value("default", Value::Number(account_id));

    body.append_newline();
    let api_key = body.append_new_block("variable", ["api_key"]);
    api_key.body_mut().set_attribute_raw("type", raw("string"));
    api_key
        .body_mut()
        .set_attribute_value("description", "The New Relic API Key");
    api_key.body_mut().set_attribute_raw("sensitive", raw("true"));

    format!("{PROVIDER_COMMENT}{document}")
}
