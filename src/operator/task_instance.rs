//! Run-state values handed in by the orchestration runtime

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of a task instance at the moment lineage is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskInstanceState {
    Removed,
    Scheduled,
    Queued,
    Running,
    Success,
    Restarting,
    Failed,
    UpForRetry,
    UpForReschedule,
    UpstreamFailed,
    Skipped,
    Deferred,
}

impl TaskInstanceState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Removed => "removed",
            Self::Scheduled => "scheduled",
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Success => "success",
            Self::Restarting => "restarting",
            Self::Failed => "failed",
            Self::UpForRetry => "up_for_retry",
            Self::UpForReschedule => "up_for_reschedule",
            Self::UpstreamFailed => "upstream_failed",
            Self::Skipped => "skipped",
            Self::Deferred => "deferred",
        }
    }

    /// True for states a task instance does not leave on its own
    pub const fn is_finished(&self) -> bool {
        matches!(
            self,
            Self::Success | Self::Failed | Self::Skipped | Self::UpstreamFailed | Self::Removed
        )
    }
}

impl std::fmt::Display for TaskInstanceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskInstanceState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "removed" => Ok(Self::Removed),
            "scheduled" => Ok(Self::Scheduled),
            "queued" => Ok(Self::Queued),
            "running" => Ok(Self::Running),
            "success" => Ok(Self::Success),
            "restarting" => Ok(Self::Restarting),
            "failed" => Ok(Self::Failed),
            "up_for_retry" => Ok(Self::UpForRetry),
            "up_for_reschedule" => Ok(Self::UpForReschedule),
            "upstream_failed" => Ok(Self::UpstreamFailed),
            "skipped" => Ok(Self::Skipped),
            "deferred" => Ok(Self::Deferred),
            _ => Err(format!("unknown task instance state: {}", s)),
        }
    }
}

/// One execution attempt of a task within a DAG run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInstance {
    pub dag_id: String,
    pub task_id: String,
    pub run_id: String,
    pub try_number: u32,
    /// Index within a mapped task, -1 when the task is not mapped
    pub map_index: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<TaskInstanceState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl TaskInstance {
    pub fn new(
        dag_id: impl Into<String>,
        task_id: impl Into<String>,
        run_id: impl Into<String>,
    ) -> Self {
        Self {
            dag_id: dag_id.into(),
            task_id: task_id.into(),
            run_id: run_id.into(),
            try_number: 1,
            map_index: -1,
            state: None,
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_state(mut self, state: TaskInstanceState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_try_number(mut self, try_number: u32) -> Self {
        self.try_number = try_number;
        self
    }
}

/// The DAG run a task instance belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DagRun {
    pub dag_id: String,
    pub run_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_date: Option<DateTime<Utc>>,
}

impl DagRun {
    pub fn new(dag_id: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self {
            dag_id: dag_id.into(),
            run_id: run_id.into(),
            logical_date: None,
        }
    }

    pub fn with_logical_date(mut self, logical_date: DateTime<Utc>) -> Self {
        self.logical_date = Some(logical_date);
        self
    }
}
