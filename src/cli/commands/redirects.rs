//! Redirects command implementation
//!
//! Creates one Guide redirect rule per entry of a YAML rule file.

use super::{connect, print_report};
use crate::core::batch::{BatchExecutor, BatchPlan, RedirectPlan};
use crate::domain::RuleSet;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the redirects command
#[derive(Args, Debug)]
pub struct RedirectsArgs {
    /// YAML file listing `redirect_from`, `redirect_status`, `redirect_to` entries
    pub file: PathBuf,
}

impl RedirectsArgs {
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let rules = RuleSet::load(&self.file)?;

        tracing::info!(
            file = %self.file.display(),
            rules = rules.len(),
            "Loaded redirect rules"
        );

        let (config, client) = connect(config_path)?;

        println!("{}", RedirectPlan.progress_message(rules.len()));

        let report = BatchExecutor::new(&client, config.batch.stagger())
            .run(rules.rules(), None, &RedirectPlan)
            .await?;

        print_report(&report);
        Ok(0)
    }
}
