//! Bulk operation commands (`tickets`, `users`, `articles`, `posts`)

use super::{connect, print_report};
use crate::core::batch::{BatchExecutor, BatchPlan, BulkOperation, OperationPlan, Resource};
use crate::domain::IdList;
use clap::Args;

/// Arguments shared by every bulk operation command
#[derive(Args, Debug, Clone)]
pub struct BulkArgs {
    /// Operation to perform
    pub operation: String,

    /// Comma-separated list of identifiers
    pub ids: String,

    /// Items per request (defaults to the endpoint maximum)
    #[arg(long)]
    pub batch_size: Option<usize>,
}

/// Arguments for the posts command
#[derive(Args, Debug, Clone)]
pub struct PostsArgs {
    #[command(flatten)]
    pub bulk: BulkArgs,

    /// Destination community topic
    #[arg(long)]
    pub topic_id: Option<String>,
}

impl PostsArgs {
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        self.bulk
            .execute(config_path, Resource::Posts, self.topic_id.clone())
            .await
    }
}

impl BulkArgs {
    /// Execute a bulk operation against `resource`
    pub async fn execute(
        &self,
        config_path: &str,
        resource: Resource,
        topic_id: Option<String>,
    ) -> anyhow::Result<i32> {
        // Input errors are reported before any credentials are needed
        let operation = BulkOperation::parse(resource, &self.operation)?;
        let plan = OperationPlan::new(operation, topic_id)?;
        let ids = IdList::parse(&self.ids)?;

        tracing::info!(
            operation = %operation,
            items = ids.len(),
            "Starting bulk operation"
        );

        let (config, client) = connect(config_path)?;
        // The configured bound caps every endpoint; an explicit flag must fit the ceiling
        let ceiling = plan.endpoint().max_batch_size;
        let batch_size = self
            .batch_size
            .or(config.batch.max_batch_size.map(|max| max.min(ceiling)));

        println!("{}", plan.progress_message(ids.len()));

        let report = BatchExecutor::new(&client, config.batch.stagger())
            .run(ids.as_slice(), batch_size, &plan)
            .await?;

        print_report(&report);
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_operation_is_configuration_error() {
        let args = BulkArgs {
            operation: "purge".to_string(),
            ids: "1,2".to_string(),
            batch_size: None,
        };
        let err = args
            .execute("does-not-exist.toml", Resource::Tickets, None)
            .await
            .unwrap_err();
        let bulk = err.downcast_ref::<crate::domain::BulkError>().unwrap();
        assert!(bulk.is_configuration());
    }

    #[tokio::test]
    async fn test_ids_with_url_syntax_are_rejected() {
        for ids in ["../../users/5", "1&ids=999"] {
            let args = BulkArgs {
                operation: "archive".to_string(),
                ids: ids.to_string(),
                batch_size: None,
            };
            let err = args
                .execute("does-not-exist.toml", Resource::Articles, None)
                .await
                .unwrap_err();
            let bulk = err.downcast_ref::<crate::domain::BulkError>().unwrap();
            assert!(bulk.is_configuration(), "{ids} should be rejected");
        }
    }

    #[tokio::test]
    async fn test_empty_ids_is_configuration_error() {
        let args = BulkArgs {
            operation: "archive".to_string(),
            ids: String::new(),
            batch_size: None,
        };
        let err = args
            .execute("does-not-exist.toml", Resource::Articles, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("at least one identifier required"));
    }
}
