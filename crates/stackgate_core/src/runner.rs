//! Batch validation across a project's configuration directory.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use stackgate_lint::TemplateLinter;
use tracing::{info, warn};

use crate::content::ContentLoader;
use crate::discovery::{discover, PathFilter, DEFAULT_INCLUDE};
use crate::error::CoreResult;
use crate::options::RunOptions;
use crate::processor::{ConfigProcessor, ProcessOutcome};
use crate::variables::Variables;

/// Summary of a validation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub project_home: PathBuf,
    /// False when the project has no `config/` directory
    pub config_dir_found: bool,
    pub outcomes: Vec<ProcessOutcome>,
    /// Worst exit code across all files, 0 when nothing failed
    pub exit_code: i32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn passed(&self) -> bool {
        self.exit_code == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ProcessOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }
}

/// Validates every configuration file of a project.
pub struct Validator {
    options: RunOptions,
    content: ContentLoader,
    processor: ConfigProcessor,
}

impl Validator {
    pub fn new(options: RunOptions, linter: Arc<dyn TemplateLinter>) -> CoreResult<Self> {
        let content = ContentLoader::new(options.fetch_timeout)?;
        let processor = ConfigProcessor::new(linter, &options);
        Ok(Self {
            options,
            content,
            processor,
        })
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Load the run's variables.
    ///
    /// An explicit source must load; the default `variables.yaml` is optional.
    pub async fn load_variables(&self) -> CoreResult<Variables> {
        match &self.options.variables_source {
            Some(source) => Variables::load(&self.content, source).await,
            None => Variables::load_optional(&self.content, &self.options.variables_file()).await,
        }
    }

    /// Configuration files in scope, relative to the config directory.
    ///
    /// Only YAML files are candidates; include globs narrow them further.
    pub fn discover(&self) -> CoreResult<Vec<PathBuf>> {
        let configs = discover(&self.options.config_dir(), DEFAULT_INCLUDE, &self.options.skip)?;
        let restrict = PathFilter::new(&self.options.include)?;
        if restrict.is_empty() {
            return Ok(configs);
        }
        Ok(configs.into_iter().filter(|path| restrict.matches(path)).collect())
    }

    pub async fn run(&self) -> CoreResult<RunSummary> {
        self.run_with(|_| {}).await
    }

    /// Run, calling `on_outcome` as each file finishes.
    ///
    /// Files are processed one at a time and every file is processed even
    /// after failures.
    pub async fn run_with<F>(&self, mut on_outcome: F) -> CoreResult<RunSummary>
    where
        F: FnMut(&ProcessOutcome),
    {
        let started_at = Utc::now();
        let config_dir = self.options.config_dir();

        if !config_dir.is_dir() {
            warn!("No config directory at {:?}", config_dir);
            return Ok(self.summary(false, Vec::new(), started_at));
        }

        let variables = self.load_variables().await?;
        let configs = self.discover()?;
        info!("Processing {} config files", configs.len());

        let mut outcomes = Vec::with_capacity(configs.len());
        for relative in configs {
            let path = config_dir.join(&relative);
            let outcome = self.processor.process_one(&path, &relative, &variables).await;
            on_outcome(&outcome);
            outcomes.push(outcome);
        }

        Ok(self.summary(true, outcomes, started_at))
    }

    fn summary(&self, config_dir_found: bool, outcomes: Vec<ProcessOutcome>, started_at: DateTime<Utc>) -> RunSummary {
        let exit_code = outcomes.iter().map(|o| o.exit_code).max().unwrap_or(0).max(0);
        let finished_at = Utc::now();
        let duration_ms = (finished_at - started_at).num_milliseconds().max(0) as u64;

        info!(
            "Validated {} config files, {} failed, exit code {}",
            outcomes.len(),
            outcomes.iter().filter(|o| !o.passed()).count(),
            exit_code
        );

        RunSummary {
            project_home: self.options.project_home.clone(),
            config_dir_found,
            outcomes,
            exit_code,
            started_at,
            finished_at,
            duration_ms,
        }
    }
}
