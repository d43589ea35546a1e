//! Leaderboard service - submissions ranked by rating

use std::{collections::HashMap, sync::Arc};

use serde::Serialize;
use tracker_types::Submission;

use crate::{ServiceContext, ServiceResult};

const UNKNOWN_TEAM: &str = "Unknown";
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSummary {
    pub team_name: String,
    pub college: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub name: String,
}

/// A submission joined with its team and event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    #[serde(flatten)]
    pub submission: Submission,
    pub team: TeamSummary,
    pub event: EventSummary,
}

/// Service for the public leaderboard
pub struct LeaderboardService {
    context: Arc<ServiceContext>,
}

impl LeaderboardService {
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }

    /// Every submission, highest rating first.
    ///
    /// Ties keep scan order. Submissions whose team or event no longer exists
    /// are listed with placeholder summaries.
    #[tracing::instrument(skip(self))]
    pub async fn leaderboard(&self) -> ServiceResult<Vec<LeaderboardEntry>> {
        let storage = &self.context.storage;
        let submissions = storage.submissions().list().await?;

        let teams: HashMap<String, TeamSummary> = storage
            .accounts()
            .list()
            .await?
            .into_iter()
            .map(|account| {
                let summary = TeamSummary {
                    team_name: account.team_name,
                    college: account.college.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                };
                (account.id, summary)
            })
            .collect();
        let events: HashMap<String, EventSummary> = storage
            .events()
            .list()
            .await?
            .into_iter()
            .map(|event| (event.id, EventSummary { name: event.name }))
            .collect();

        let mut entries: Vec<LeaderboardEntry> = submissions
            .into_iter()
            .map(|submission| LeaderboardEntry {
                team: teams.get(&submission.team_id).cloned().unwrap_or_else(|| TeamSummary {
                    team_name: UNKNOWN_TEAM.to_string(),
                    college: NOT_AVAILABLE.to_string(),
                }),
                event: events
                    .get(&submission.event_id)
                    .cloned()
                    .unwrap_or_else(|| EventSummary { name: NOT_AVAILABLE.to_string() }),
                submission,
            })
            .collect();

        entries.sort_by(|a, b| b.submission.rating.total_cmp(&a.submission.rating));
        Ok(entries)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use tracker_test_fixtures::{test_account, test_event, test_submission};

    use super::*;
    use crate::test_support::context;

    #[tokio::test]
    async fn test_sorted_by_rating_with_joins() {
        let context = context();
        let storage = &context.storage;
        let team = storage.accounts().save(test_account("team@x.com", "Crabs")).await.unwrap();
        let event = storage.events().save(test_event("team@x.com", "Jam")).await.unwrap();

        for (title, rating) in [("Low", 2.0), ("High", 9.5), ("Mid", 5.0)] {
            let mut submission = test_submission(&event.id, &team.id, title);
            submission.rating = rating;
            storage.submissions().save(submission).await.unwrap();
        }
        // Orphan: neither team nor event exists
        let mut orphan = test_submission("event_0", "user_0", "Orphan");
        orphan.rating = 7.0;
        storage.submissions().save(orphan).await.unwrap();

        let board = LeaderboardService::new(Arc::clone(&context)).leaderboard().await.unwrap();
        let titles: Vec<_> = board.iter().map(|e| e.submission.title.as_str()).collect();
        assert_eq!(titles, vec!["High", "Orphan", "Mid", "Low"]);

        assert_eq!(board[0].team.team_name, "Crabs");
        assert_eq!(board[0].team.college, "Ferris University");
        assert_eq!(board[0].event.name, "Jam");

        assert_eq!(board[1].team, TeamSummary {
            team_name: "Unknown".to_string(),
            college: "N/A".to_string()
        });
        assert_eq!(board[1].event.name, "N/A");
    }

    #[tokio::test]
    async fn test_equal_ratings_keep_scan_order() {
        let context = context();
        for title in ["A", "B", "C"] {
            context.storage.submissions().save(test_submission("event_1", "user_1", title)).await.unwrap();
        }

        let board = LeaderboardService::new(context).leaderboard().await.unwrap();
        let titles: Vec<_> = board.iter().map(|e| e.submission.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }
}
