//! Spaces → reports → last run query chain
use crate::config::ModeDashboardConfig;
use dashmeta_core::data_model::record_from;
use dashmeta_core::ExtractError;
use dashmeta_restapi::{HttpClient, RestApiQuery, RestApiQuerySeed};
use std::sync::Arc;

pub const SPACES_PATH: &str = "/api/{organization}/spaces?filter=all";
pub const SPACES_JSON_PATH: &str = "_embedded.spaces[*].[token]";

pub const REPORTS_PATH: &str = "/api/{organization}/spaces/{dashboard_group_id}/reports";
pub const REPORTS_JSON_PATH: &str =
    "(_embedded.reports[*].token) | (_embedded.reports[*]._links.last_run.href)";

/// Run links are absolute paths on the API host.
pub const LAST_RUN_PATH: &str = "{last_run_resource_path}";
pub const LAST_RUN_JSON_PATH: &str = "[state,completed_at]";

/// Build the three-step query. No request is sent until it is pulled.
pub fn build_query(
    config: &ModeDashboardConfig,
    client: Arc<dyn HttpClient>,
) -> Result<RestApiQuery, ExtractError> {
    config.validate()?;
    let root = config.api_root();
    let auth = config.auth();

    let seed = RestApiQuerySeed::new(vec![record_from([(
        "organization",
        config.organization.as_str(),
    )])]);

    let spaces = RestApiQuery::new(
        Box::new(seed),
        client.clone(),
        &format!("{}{}", root, SPACES_PATH),
        SPACES_JSON_PATH,
        &["dashboard_group_id"],
    )?
    .with_auth(auth.clone());

    let reports = RestApiQuery::new(
        Box::new(spaces),
        client.clone(),
        &format!("{}{}", root, REPORTS_PATH),
        REPORTS_JSON_PATH,
        &["dashboard_id", "last_run_resource_path"],
    )?
    .with_auth(auth.clone())
    .skip_no_result(true);

    let last_run = RestApiQuery::new(
        Box::new(reports),
        client,
        &format!("{}{}", root, LAST_RUN_PATH),
        LAST_RUN_JSON_PATH,
        &["execution_state", "execution_timestamp"],
    )?
    .with_auth(auth)
    .skip_no_result(true);

    Ok(last_run)
}
