use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use tracing::debug;

type CheckFuture = Pin<Box<dyn Future<Output = bool> + Send>>;
type CheckFn = Box<dyn Fn() -> CheckFuture + Send + Sync>;

/// Aggregates named async boolean checks into one readiness report.
///
/// The HTTP binding is someone else's concern; this type only produces the
/// report and its JSON/plain-text renderings.
#[derive(Default)]
pub struct HealthMonitor {
    checks: Vec<(String, CheckFn)>,
}

impl HealthMonitor {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    pub fn register<F, Fut>(mut self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        self.checks
            .push((name.into(), Box::new(move || Box::pin(check()))));
        self
    }

    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// Evaluate every registered check.
    pub async fn run(&self) -> HealthReport {
        let mut results = BTreeMap::new();
        for (name, check) in &self.checks {
            let passed = check().await;
            debug!(check = %name, passed, "Health check evaluated");
            results.insert(name.clone(), passed);
        }

        HealthReport {
            healthy: results.values().all(|passed| *passed),
            bypassed: false,
            checks: results,
        }
    }

    /// Evaluate the checks unless `bypass` is set, in which case the report
    /// is healthy without running anything.
    pub async fn run_with_bypass(&self, bypass: bool) -> HealthReport {
        if bypass {
            return HealthReport {
                healthy: true,
                bypassed: true,
                checks: BTreeMap::new(),
            };
        }
        self.run().await
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub healthy: bool,
    pub bypassed: bool,
    pub checks: BTreeMap<String, bool>,
}

impl HealthReport {
    /// 200 when all checks pass, 503 otherwise.
    pub fn status_code(&self) -> u16 {
        if self.healthy {
            200
        } else {
            503
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        out.push_str(if self.healthy { "healthy" } else { "unhealthy" });
        if self.bypassed {
            out.push_str(" (bypassed)");
        }
        for (name, passed) in &self.checks {
            out.push('\n');
            out.push_str(name);
            out.push_str(": ");
            out.push_str(if *passed { "ok" } else { "failed" });
        }
        out
    }
}
