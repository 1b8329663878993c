mod common;

use axum::http::StatusCode;
use common::{get, ids, setup_test_app};
use serde_json::json;

#[tokio::test]
async fn test_player_info() {
    let test_app = setup_test_app().await;
    let (status, body) = get(&test_app.app, "/v1/players/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["yearStarted"], 2015);
    assert_eq!(body["description"], "Captain");
    assert_eq!(body["stats"]["gameCount"], 2);
    assert_eq!(body["stats"]["totals"]["twoPointFgm"], 9);
    assert_eq!(body["stats"]["totals"]["threePointFgm"], 3);
    assert_eq!(body["stats"]["totals"]["freeThrowsMade"], 2);

    let teams = body["teams"].as_array().unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0]["team"]["name"], "Hawks");
    assert_eq!(teams[0]["jerseyNumbers"], json!([7]));
    assert_eq!(teams[0]["competitions"][0]["name"], "Spring 2018");
    assert_eq!(teams[0]["stats"]["gameCount"], 2);

    assert_eq!(body["recentGames"]["total"], 2);
    assert_eq!(ids(&body["recentGames"]["items"], "gameId"), vec![3, 1]);
}

#[tokio::test]
async fn test_player_with_changed_jersey() {
    let test_app = setup_test_app().await;
    let (_, body) = get(&test_app.app, "/v1/players/2").await;
    assert_eq!(body["teams"][0]["jerseyNumbers"], json!([9, 10]));
}

#[tokio::test]
async fn test_player_without_games_has_zero_stats() {
    let test_app = setup_test_app().await;
    let (status, body) = get(&test_app.app, "/v1/players/6").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["teams"], json!([]));
    assert_eq!(body["stats"]["gameCount"], 0);
    assert_eq!(body["recentGames"]["total"], 0);
    assert_eq!(body["recentGames"]["nextOffset"], 0);
    assert_eq!(body["recentGames"]["items"], json!([]));
}

#[tokio::test]
async fn test_unknown_and_invalid_ids() {
    let test_app = setup_test_app().await;
    for (uri, status, code) in [
        ("/v1/players/99", StatusCode::NOT_FOUND, "NOT_FOUND"),
        ("/v1/players/0", StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
        ("/v1/teams/99", StatusCode::NOT_FOUND, "NOT_FOUND"),
        ("/v1/teams/-3", StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
        ("/v1/competitions/99", StatusCode::NOT_FOUND, "NOT_FOUND"),
        ("/v1/games/99", StatusCode::NOT_FOUND, "NOT_FOUND"),
        ("/v1/games/0", StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
        ("/v1/games/4/players/1", StatusCode::NOT_FOUND, "NOT_FOUND"),
    ] {
        let (actual, body) = get(&test_app.app, uri).await;
        assert_eq!(actual, status, "uri {}", uri);
        assert_eq!(body["code"], code, "uri {}", uri);
    }
}

#[tokio::test]
async fn test_team_info() {
    let test_app = setup_test_app().await;
    let (status, body) = get(&test_app.app, "/v1/teams/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team"]["name"], "Hawks");
    assert_eq!(body["competition"]["competitionId"], 1);
    assert_eq!(body["stats"]["gameCount"], 2);

    let roster: Vec<i64> = body["players"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["player"]["playerId"].as_i64().unwrap())
        .collect();
    assert_eq!(roster, vec![1, 2]);

    assert_eq!(ids(&body["recentGames"]["items"], "gameId"), vec![4, 3, 1]);

    let leaders = body["leaders"].as_array().unwrap();
    assert_eq!(leaders.len(), 5);
    let points = leaders.iter().find(|b| b["category"] == "points").unwrap();
    assert_eq!(points["leaders"][0]["name"], "Ada");
    assert_eq!(points["leaders"][0]["perGame"].as_f64().unwrap(), 14.5);
    let blocks = leaders.iter().find(|b| b["category"] == "blocks").unwrap();
    assert_eq!(blocks["leaders"][0]["name"], "Bo");
}

#[tokio::test]
async fn test_team_with_zero_games() {
    let test_app = setup_test_app().await;
    let (status, body) = get(&test_app.app, "/v1/teams/4").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team"]["name"], "Idle");
    assert!(body["competition"].is_null());
    assert_eq!(body["players"], json!([]));
    assert_eq!(body["stats"]["gameCount"], 0);
    assert_eq!(body["recentGames"]["total"], 0);
    for board in body["leaders"].as_array().unwrap() {
        assert_eq!(board["leaders"], json!([]));
    }
}

#[tokio::test]
async fn test_competition_standings() {
    let test_app = setup_test_app().await;
    let (status, body) = get(&test_app.app, "/v1/competitions/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["competition"]["name"], "Spring 2018");
    assert_eq!(body["competition"]["league"]["division"], "A");

    let locations: Vec<i64> = ids(&body["locations"], "locationId");
    assert_eq!(locations, vec![1, 2]);

    let standings = body["standings"].as_array().unwrap();
    let table: Vec<(i64, i64, i64, i64)> = standings
        .iter()
        .map(|s| {
            (
                s["team"]["teamId"].as_i64().unwrap(),
                s["won"].as_i64().unwrap(),
                s["lost"].as_i64().unwrap(),
                s["drawn"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(table, vec![(1, 2, 0, 0), (3, 1, 1, 0), (2, 0, 2, 0)]);

    // Three played games, one unplayed.
    let won: i64 = table.iter().map(|t| t.1).sum();
    let lost: i64 = table.iter().map(|t| t.2).sum();
    assert_eq!(won, lost);
    assert_eq!(won, 3);

    assert_eq!(body["recentGames"]["total"], 4);
}

#[tokio::test]
async fn test_competition_leaders() {
    let test_app = setup_test_app().await;
    let (_, body) = get(&test_app.app, "/v1/competitions/1").await;

    let player_points = body["playerLeaders"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["category"] == "points")
        .unwrap()
        .clone();
    assert_eq!(player_points["leaders"][0]["playerId"], 1);
    assert_eq!(player_points["leaders"][0]["perGame"].as_f64().unwrap(), 14.5);

    let team_points = body["teamLeaders"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["category"] == "points")
        .unwrap()
        .clone();
    assert_eq!(team_points["leaders"][0]["teamId"], 1);
    assert_eq!(team_points["leaders"][0]["perGame"].as_f64().unwrap(), 19.0);
}

#[tokio::test]
async fn test_drawn_competition() {
    let test_app = setup_test_app().await;
    let (_, body) = get(&test_app.app, "/v1/competitions/2").await;

    let standings = body["standings"].as_array().unwrap();
    assert_eq!(standings.len(), 2);
    assert_eq!(standings[0]["team"]["teamId"], 2);
    assert_eq!(standings[1]["team"]["teamId"], 3);
    assert!(standings.iter().all(|s| s["drawn"] == 1 && s["won"] == 0));
}

#[tokio::test]
async fn test_game_info() {
    let test_app = setup_test_app().await;
    let (status, body) = get(&test_app.app, "/v1/games/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["game"]["gameTime"], "2018-01-01T10:00:00");
    assert_eq!(body["game"]["result"]["homePoints"], 25);

    let lines = body["players"].as_array().unwrap();
    let players: Vec<i64> = lines
        .iter()
        .map(|l| l["player"]["playerId"].as_i64().unwrap())
        .collect();
    assert_eq!(players, vec![1, 2, 3, 4]);

    // Each side's box scores add up to its half of the result.
    let team_points = |team_id: i64| -> i64 {
        lines
            .iter()
            .filter(|l| l["team"]["teamId"] == team_id)
            .map(|l| {
                let s = &l["stats"];
                3 * s["threePointFgm"].as_i64().unwrap()
                    + 2 * s["twoPointFgm"].as_i64().unwrap()
                    + s["freeThrowsMade"].as_i64().unwrap()
            })
            .sum()
    };
    assert_eq!(team_points(1), 25);
    assert_eq!(team_points(2), 17);
    assert_eq!(body["game"]["result"]["awayPoints"], team_points(2));
    assert_eq!(body["game"]["result"]["homePoints"], team_points(1));
}

#[tokio::test]
async fn test_unplayed_game_info() {
    let test_app = setup_test_app().await;
    let (status, body) = get(&test_app.app, "/v1/games/4").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["game"]["result"].is_null());
    assert_eq!(body["players"], json!([]));
}

#[tokio::test]
async fn test_player_game_stats() {
    let test_app = setup_test_app().await;
    let (status, body) = get(&test_app.app, "/v1/games/3/players/2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jerseyNumber"], 10);
    assert_eq!(body["team"]["name"], "Hawks");
    assert_eq!(body["stats"]["defensiveRebounds"], 5);
}

#[tokio::test]
async fn test_metadata_toggles() {
    let test_app = setup_test_app().await;
    let (status, body) = get(&test_app.app, "/v1/metadata?competitions=true&teams=true").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["competitions"].as_array().unwrap().len(), 2);
    assert_eq!(ids(&body["teams"], "teamId"), vec![1, 2, 3, 4]);
    assert!(body.get("players").is_none());

    let (_, body) = get(&test_app.app, "/v1/metadata").await;
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_health_and_ready() {
    let test_app = setup_test_app().await;
    let (status, body) = get(&test_app.app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(&test_app.app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}
