//! Shared fixture: a small league with two competitions, one unplayed game,
//! one drawn game, a team with no games and a player with no appearances.
//!
//! Points per game (all competitions): Ada 14.5, Ed 35/3, Cy 11, Bo 4.5, Di 4.

#![allow(dead_code)]

use axum::http::StatusCode;
use heroball::api;
use heroball::config::Config;
use heroball::db::init_db;
use heroball::{HeroBall, Repository};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub struct TestApp {
    pub app: axum::Router,
    pub pool: SqlitePool,
    _temp: TempDir,
}

const SEED: &[&str] = &[
    "INSERT INTO Leagues (LeagueId, Name, Division) VALUES (1, 'City League', 'A')",
    "INSERT INTO Competitions (CompetitionId, LeagueId, Name, SubCompetition) VALUES \
     (1, 1, 'Spring 2018', NULL), (2, 1, 'Autumn 2018', 'Cup')",
    "INSERT INTO Teams (TeamId, Name) VALUES (1, 'Hawks'), (2, 'Owls'), (3, 'Crows'), (4, 'Idle')",
    "INSERT INTO Locations (LocationId, Name) VALUES (1, 'North Hall'), (2, 'South Hall')",
    "INSERT INTO Players (PlayerId, Name, Position, YearStarted, Description) VALUES \
     (1, 'Ada', 'Guard', 2015, 'Captain'), \
     (2, 'Bo', 'Forward', NULL, NULL), \
     (3, 'Cy', 'Centre', NULL, NULL), \
     (4, 'Di', 'Guard', NULL, NULL), \
     (5, 'Ed', 'Forward', NULL, NULL), \
     (6, 'Fay', 'Guard', NULL, NULL)",
    "INSERT INTO Games (GameId, CompetitionId, LocationId, HomeTeamId, AwayTeamId, GameTime) VALUES \
     (1, 1, 1, 1, 2, '2018-01-01 10:00:00'), \
     (2, 1, 2, 2, 3, '2018-01-08 10:00:00'), \
     (3, 1, 1, 3, 1, '2018-01-15 10:00:00'), \
     (4, 1, 2, 1, 2, '2018-01-22 10:00:00'), \
     (5, 2, 1, 2, 3, '2018-06-01 10:00:00')",
    // Game 1: Hawks 25 - 17 Owls. Game 2: Owls 14 - 17 Crows.
    // Game 3: Crows 8 - 13 Hawks. Game 4: unplayed. Game 5: Owls 10 - 10 Crows.
    "INSERT INTO PlayerGameStats (PlayerId, GameId, TeamId, JerseyNumber, \
     TwoPointFGA, TwoPointFGM, ThreePointFGA, ThreePointFGM, FreeThrowsAttempted, FreeThrowsMade, \
     OffensiveRebounds, DefensiveRebounds, Assists, Steals, Blocks, MinutesPlayed) VALUES \
     (1, 1, 1, 7,  8, 5, 4, 2, 2, 2,  1, 4, 3, 1, 0, 30), \
     (2, 1, 1, 9,  5, 3, 1, 0, 2, 1,  2, 6, 1, 0, 2, 25), \
     (3, 1, 2, 4,  7, 4, 3, 1, 0, 0,  0, 3, 5, 2, 0, 32), \
     (4, 1, 2, 5,  4, 2, 0, 0, 2, 2,  1, 1, 0, 0, 1, 20), \
     (3, 2, 2, 4,  9, 6, 2, 0, 0, 0,  0, 2, 4, 1, 0, 30), \
     (4, 2, 2, 5,  3, 1, 0, 0, 0, 0,  3, 3, 0, 0, 3, 22), \
     (5, 2, 3, 11, 8, 5, 5, 2, 1, 1,  1, 2, 2, 0, 0, 35), \
     (5, 3, 3, 11, 7, 4, 2, 0, 0, 0,  2, 2, 1, 0, 0, 33), \
     (1, 3, 1, 7,  6, 4, 3, 1, 0, 0,  0, 3, 2, 2, 0, 31), \
     (2, 3, 1, 10, 3, 1, 0, 0, 0, 0,  1, 5, 0, 0, 1, 18), \
     (3, 5, 2, 4,  8, 5, 0, 0, 0, 0,  0, 0, 0, 0, 0, 30), \
     (5, 5, 3, 11, 9, 5, 1, 0, 0, 0,  0, 0, 0, 0, 0, 30)",
];

pub async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");
    for sql in SEED {
        sqlx::query(sql).execute(&pool).await.unwrap();
    }

    let config = Config {
        port: 0,
        database_path: db_path,
        query_timeout: Duration::from_secs(5),
        recent_games_count: 10,
        leader_count: 1,
        leader_min_games_divisor: 3,
    };

    let repo = Arc::new(Repository::new(pool.clone()).with_query_timeout(config.query_timeout));
    let service = Arc::new(HeroBall::new(repo, &config));
    let app = api::create_router(api::AppState::new(service));

    TestApp {
        app,
        pool,
        _temp: temp_dir,
    }
}

pub async fn get(app: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn post(
    app: &axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

async fn send(
    app: &axum::Router,
    req: axum::http::Request<axum::body::Body>,
) -> (StatusCode, serde_json::Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

pub fn ids(items: &serde_json::Value, field: &str) -> Vec<i64> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item[field].as_i64().unwrap())
        .collect()
}
