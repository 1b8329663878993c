//! Filter model: loosely-populated request filters and their canonical form.
//!
//! An absent or empty id list never restricts its dimension. Code that turns a
//! filter into SQL must go through [`IdSet`], which has no way to express
//! "match nothing".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::primitives::{CompetitionId, EntityId, PlayerId, TeamId};

/// Filter exactly as supplied by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition_ids: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_ids: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_ids: Option<Vec<i64>>,
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid filter fields: {}", .fields.join(", "))]
pub struct FilterError {
    pub fields: Vec<&'static str>,
}

/// One filter dimension after canonicalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdSet<T> {
    Unrestricted,
    /// Sorted, deduplicated and never empty.
    AnyOf(Vec<T>),
}

impl<T: EntityId> IdSet<T> {
    fn from_raw(raw: Option<&[i64]>) -> Result<Self, ()> {
        let raw = raw.unwrap_or_default();
        if raw.iter().any(|&id| id <= 0) {
            return Err(());
        }

        let mut ids: Vec<T> = raw.iter().map(|&id| T::from_i64(id)).collect();
        ids.sort_unstable();
        ids.dedup();

        if ids.is_empty() {
            Ok(IdSet::Unrestricted)
        } else {
            Ok(IdSet::AnyOf(ids))
        }
    }

    pub fn ids(&self) -> &[T] {
        match self {
            IdSet::Unrestricted => &[],
            IdSet::AnyOf(ids) => ids.as_slice(),
        }
    }

    pub fn raw_ids(&self) -> Vec<i64> {
        self.ids().iter().map(|id| id.to_i64()).collect()
    }
}

/// Validated filter ready for predicate construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalFilter {
    pub competitions: IdSet<CompetitionId>,
    pub teams: IdSet<TeamId>,
    pub players: IdSet<PlayerId>,
    pub date: Option<NaiveDate>,
}

impl Filter {
    pub fn for_team(team_id: TeamId) -> Self {
        Filter {
            team_ids: Some(vec![team_id.as_i64()]),
            ..Filter::default()
        }
    }

    pub fn for_player(player_id: PlayerId) -> Self {
        Filter {
            player_ids: Some(vec![player_id.as_i64()]),
            ..Filter::default()
        }
    }

    pub fn for_competition(competition_id: CompetitionId) -> Self {
        Filter {
            competition_ids: Some(vec![competition_id.as_i64()]),
            ..Filter::default()
        }
    }

    /// Validate every dimension, reporting all offending fields at once.
    pub fn canonicalize(&self) -> Result<CanonicalFilter, FilterError> {
        let mut fields = Vec::new();

        let competitions = IdSet::from_raw(self.competition_ids.as_deref())
            .map_err(|_| fields.push("competitionIds"))
            .ok();
        let teams = IdSet::from_raw(self.team_ids.as_deref())
            .map_err(|_| fields.push("teamIds"))
            .ok();
        let players = IdSet::from_raw(self.player_ids.as_deref())
            .map_err(|_| fields.push("playerIds"))
            .ok();

        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    fields.push("date");
                    None
                }
            },
        };

        match (competitions, teams, players) {
            (Some(competitions), Some(teams), Some(players)) if fields.is_empty() => {
                Ok(CanonicalFilter {
                    competitions,
                    teams,
                    players,
                    date,
                })
            }
            _ => Err(FilterError { fields }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_is_unrestricted() {
        let canonical = Filter::default().canonicalize().unwrap();
        assert_eq!(canonical.competitions, IdSet::Unrestricted);
        assert_eq!(canonical.teams, IdSet::Unrestricted);
        assert_eq!(canonical.players, IdSet::Unrestricted);
        assert_eq!(canonical.date, None);
    }

    #[test]
    fn test_empty_lists_are_unrestricted_not_empty_sets() {
        let filter = Filter {
            competition_ids: Some(vec![]),
            team_ids: Some(vec![]),
            player_ids: None,
            date: Some(String::new()),
        };
        let canonical = filter.canonicalize().unwrap();
        assert_eq!(canonical.competitions, IdSet::Unrestricted);
        assert_eq!(canonical.teams, IdSet::Unrestricted);
        assert_eq!(canonical.date, None);
    }

    #[test]
    fn test_ids_are_sorted_and_deduplicated() {
        let filter = Filter {
            team_ids: Some(vec![9, 3, 9, 1]),
            ..Filter::default()
        };
        let canonical = filter.canonicalize().unwrap();
        assert_eq!(canonical.teams.raw_ids(), vec![1, 3, 9]);
    }

    #[test]
    fn test_date_is_parsed() {
        let filter = Filter {
            date: Some("2018-02-28".to_string()),
            ..Filter::default()
        };
        let canonical = filter.canonicalize().unwrap();
        assert_eq!(canonical.date, NaiveDate::from_ymd_opt(2018, 2, 28));
    }

    #[test]
    fn test_invalid_calendar_date_rejected() {
        let filter = Filter {
            date: Some("2018-02-30".to_string()),
            ..Filter::default()
        };
        let err = filter.canonicalize().unwrap_err();
        assert_eq!(err.fields, vec!["date"]);
    }

    #[test]
    fn test_all_offending_fields_reported() {
        let filter = Filter {
            competition_ids: Some(vec![1, 0]),
            player_ids: Some(vec![-3]),
            date: Some("yesterday".to_string()),
            ..Filter::default()
        };
        let err = filter.canonicalize().unwrap_err();
        assert_eq!(err.fields, vec!["competitionIds", "playerIds", "date"]);
        assert_eq!(
            err.to_string(),
            "invalid filter fields: competitionIds, playerIds, date"
        );
    }

    #[test]
    fn test_filter_json_accepts_missing_and_null_fields() {
        let filter: Filter = serde_json::from_str(r#"{"teamIds": null, "playerIds": [4]}"#).unwrap();
        assert_eq!(filter.team_ids, None);
        assert_eq!(filter.player_ids, Some(vec![4]));

        let echoed = serde_json::to_value(&filter).unwrap();
        assert_eq!(echoed, serde_json::json!({"playerIds": [4]}));
    }
}
