use serde::{Deserialize, Serialize};

use super::HeroBall;
use crate::domain::{Competition, Player, Team};
use crate::error::AppError;

/// Which reference lists to include. Each defaults to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MetadataRequest {
    pub competitions: bool,
    pub teams: bool,
    pub players: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitions: Option<Vec<Competition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<Team>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<Player>>,
}

impl HeroBall {
    pub async fn metadata(&self, request: MetadataRequest) -> Result<Metadata, AppError> {
        let competitions = async {
            if request.competitions {
                self.repo.all_competitions().await.map(Some)
            } else {
                Ok(None)
            }
        };
        let teams = async {
            if request.teams {
                self.repo.all_teams().await.map(Some)
            } else {
                Ok(None)
            }
        };
        let players = async {
            if request.players {
                self.repo.all_players().await.map(Some)
            } else {
                Ok(None)
            }
        };

        let (competitions, teams, players) = futures::try_join!(competitions, teams, players)?;
        Ok(Metadata {
            competitions,
            teams,
            players,
        })
    }
}
