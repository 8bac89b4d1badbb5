use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::lenient;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Poll {
    pub id: String,
    pub options: Vec<PollOption>,

    #[serde(default, deserialize_with = "lenient::optional")]
    pub duration_minutes: Option<u32>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub end_datetime: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub voting_status: Option<VotingStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PollOption {
    pub position: u32,
    pub label: String,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub votes: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotingStatus {
    Open,
    Closed,
}
