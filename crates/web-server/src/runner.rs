use crate::error::AnalysisError;
use configuration::AnalysisConfig;
use serde::Serialize;
use std::time::Instant;
use tokio::process::Command;
use tokio::sync::Mutex;

/// Keeps the tail of long script output; the full text stays in the logs.
const OUTPUT_TAIL_CHARS: usize = 4000;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRun {
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

/// Runs the external analysis pipeline that regenerates the backend's data.
pub struct AnalysisRunner {
    config: AnalysisConfig,
    guard: Mutex<()>,
}

impl AnalysisRunner {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            guard: Mutex::new(()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.guard.try_lock().is_err()
    }

    /// Spawns `<interpreter> <script>` and waits for it. Only one run at a time.
    pub async fn run(&self) -> Result<AnalysisRun, AnalysisError> {
        let _guard = self
            .guard
            .try_lock()
            .map_err(|_| AnalysisError::InProgress)?;

        let mut command = Command::new(&self.config.interpreter);
        command.arg(&self.config.script).kill_on_drop(true);
        if let Some(dir) = &self.config.working_dir {
            command.current_dir(dir);
        }

        tracing::info!(
            interpreter = %self.config.interpreter,
            script = %self.config.script.display(),
            "Starting analysis run."
        );
        let started = Instant::now();

        let output = command.output().await.map_err(|source| AnalysisError::Spawn {
            program: self.config.interpreter.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        tracing::debug!(%stdout, %stderr, "Analysis output.");

        if !output.status.success() {
            return Err(AnalysisError::Failed {
                code: output.status.code(),
                stderr: tail(&stderr),
            });
        }

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(duration_ms, "Analysis run finished.");
        Ok(AnalysisRun {
            stdout: tail(&stdout),
            stderr: tail(&stderr),
            duration_ms,
        })
    }
}

fn tail(text: &str) -> String {
    let count = text.chars().count();
    if count <= OUTPUT_TAIL_CHARS {
        text.to_string()
    } else {
        text.chars().skip(count - OUTPUT_TAIL_CHARS).collect()
    }
}
