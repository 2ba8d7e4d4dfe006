//! Mode dashboard executions extractor
use crate::config::{ModeDashboardConfig, SCOPE};
use crate::query::build_query;
use dashmeta_core::data_model::record_from;
use dashmeta_core::{
    ChainedTransformer, DashboardExecution, ExtractError, ExtractionContext, Extractor,
};
use dashmeta_restapi::{HttpClient, ReqwestClient, RestApiExtractor};
use dashmeta_transform::{epoch_to_model, TimestampStringToEpoch};
use std::sync::Arc;

pub const PRODUCT: &str = "mode";
pub const TIMESTAMP_FIELD: &str = "execution_timestamp";

/// Yields one [`DashboardExecution`] per report with a last run.
///
/// Construction wires everything and sends no request. Each `extract` call
/// pulls one joined record, normalizes its timestamp and maps it to the
/// model. Once the chain is drained every later call returns `Ok(None)`.
pub struct ModeDashboardExecutionsExtractor {
    extractor: RestApiExtractor,
    transformer: ChainedTransformer<DashboardExecution>,
    context: ExtractionContext,
    emitted: u64,
    exhausted: bool,
}

impl ModeDashboardExecutionsExtractor {
    pub fn new(config: ModeDashboardConfig) -> Result<Self, ExtractError> {
        Self::with_client(config, Arc::new(ReqwestClient::new()?))
    }

    pub fn with_client(
        config: ModeDashboardConfig,
        client: Arc<dyn HttpClient>,
    ) -> Result<Self, ExtractError> {
        let context = ExtractionContext::new(SCOPE);
        let query = build_query(&config, client)?;

        let rest_api_config = config
            .extractor
            .restapi
            .clone()
            .with_fallback(&record_from([("product", PRODUCT)]));
        let extractor = RestApiExtractor::new(Box::new(query), rest_api_config);

        let timestamp_config = config
            .transformer
            .timestamp_str_to_epoch
            .clone()
            .with_fallback_field(TIMESTAMP_FIELD);
        let transformer =
            epoch_to_model::<DashboardExecution>(TimestampStringToEpoch::new(timestamp_config)?);

        tracing::info!(
            run_id = %context.run_id,
            organization = %config.organization,
            pipeline = transformer.pipeline_id(),
            "mode dashboard execution extractor ready"
        );

        Ok(Self {
            extractor,
            transformer,
            context,
            emitted: 0,
            exhausted: false,
        })
    }

    pub fn context(&self) -> &ExtractionContext {
        &self.context
    }

    /// Models returned so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl Extractor for ModeDashboardExecutionsExtractor {
    type Output = DashboardExecution;

    fn scope(&self) -> &'static str {
        SCOPE
    }

    fn extract(&mut self) -> Result<Option<DashboardExecution>, ExtractError> {
        if self.exhausted {
            return Ok(None);
        }

        let record = match self.extractor.extract()? {
            Some(record) => record,
            None => {
                self.exhausted = true;
                tracing::info!(
                    run_id = %self.context.run_id,
                    emitted = self.emitted,
                    "mode dashboard executions exhausted"
                );
                return Ok(None);
            }
        };

        let execution = self.transformer.transform(record)?;
        self.emitted += 1;
        tracing::debug!(
            run_id = %self.context.run_id,
            key = %execution.key(),
            state = %execution.execution_state,
            "dashboard execution"
        );
        Ok(Some(execution))
    }
}
