//! Integration tests for the admin surface: auth on writes, station slug
//! handling, rule updates over the wire, and tag lifecycle constraints.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use tagradio::db;
use tagradio::models::RuleKind;

#[tokio::test]
async fn writes_require_the_admin_token() {
    let pool = common::test_pool().await;
    let body = json!({ "name": "Rock", "slug": "rock" });

    let response = common::send(
        common::build_app(pool.clone()),
        Method::POST,
        "/api/v1/stations",
        None,
        Some(body.clone()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = common::send(
        common::build_app(pool),
        Method::POST,
        "/api/v1/stations",
        Some("wrong-token"),
        Some(body),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn station_slug_collisions_are_rejected() {
    let pool = common::test_pool().await;
    common::seed_station(&pool, "First", "the-slug", true).await;

    let response = common::send(
        common::build_app(pool),
        Method::POST,
        "/api/v1/stations",
        Some(common::ADMIN_TOKEN),
        Some(json!({ "name": "Second", "slug": "the-slug" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "Station slug already exists");
}

#[tokio::test]
async fn malformed_station_slugs_are_rejected() {
    let pool = common::test_pool().await;

    for slug in ["Rock Station", "rock_station", "ROCK", ""] {
        let response = common::send(
            common::build_app(pool.clone()),
            Method::POST,
            "/api/v1/stations",
            Some(common::ADMIN_TOKEN),
            Some(json!({ "name": "Rock", "slug": slug })),
        )
        .await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "slug {slug:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn rule_update_stores_kinds_and_skips_none_entries() {
    let pool = common::test_pool().await;
    let station = common::seed_station(&pool, "Curated", "curated", true).await;
    let rock = common::seed_tag(&pool, "Rock").await;
    let live = common::seed_tag(&pool, "Live").await;
    let pop = common::seed_tag(&pool, "Pop").await;

    let body = json!({
        "tag_rules": {
            (rock.id.to_string()): "require",
            (live.id.to_string()): "exclude",
            (pop.id.to_string()): "none",
        }
    });
    let response = common::send(
        common::build_app(pool.clone()),
        Method::PUT,
        &format!("/api/v1/stations/{}/rules", station.id),
        Some(common::ADMIN_TOKEN),
        Some(body),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = db::rules::for_station(&pool, station.id).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored
        .iter()
        .all(|r| r.tag_id != pop.id && matches!(r.kind, RuleKind::Require | RuleKind::Exclude)));
}

#[tokio::test]
async fn unknown_rule_kinds_are_rejected_not_stored() {
    let pool = common::test_pool().await;
    let station = common::seed_station(&pool, "Strict", "strict", true).await;
    let rock = common::seed_tag(&pool, "Rock").await;

    let body = json!({ "tag_rules": { (rock.id.to_string()): "boost" } });
    let response = common::send(
        common::build_app(pool.clone()),
        Method::PUT,
        &format!("/api/v1/stations/{}/rules", station.id),
        Some(common::ADMIN_TOKEN),
        Some(body),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let stored = db::rules::for_station(&pool, station.id).await.unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn renaming_a_tag_regenerates_its_slug() {
    let pool = common::test_pool().await;
    let tag = common::seed_tag(&pool, "Heavy Metal").await;
    assert_eq!(tag.slug, "heavy-metal");

    let response = common::send(
        common::build_app(pool.clone()),
        Method::PATCH,
        &format!("/api/v1/tags/{}", tag.id),
        Some(common::ADMIN_TOKEN),
        Some(json!({ "name": "Doom & Gloom" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["slug"], "doom-gloom");
}

#[tokio::test]
async fn deleting_a_referenced_tag_is_refused() {
    let pool = common::test_pool().await;
    let rock = common::seed_tag(&pool, "Rock").await;
    common::seed_track(&pool, "anthem", true, &[rock.id]).await;

    let response = common::send(
        common::build_app(pool.clone()),
        Method::DELETE,
        &format!("/api/v1/tags/{}", rock.id),
        Some(common::ADMIN_TOKEN),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Still present.
    assert!(db::tags::get(&pool, rock.id).await.unwrap().is_some());
}

#[tokio::test]
async fn deleting_an_unreferenced_tag_prunes_its_station_rules() {
    let pool = common::test_pool().await;
    let station = common::seed_station(&pool, "Pruned", "pruned", true).await;
    let fad = common::seed_tag(&pool, "Fad Genre").await;

    let rules = std::collections::HashMap::from([(fad.id, RuleKind::Include)]);
    db::rules::replace(&pool, station.id, &rules).await.unwrap();

    let response = common::send(
        common::build_app(pool.clone()),
        Method::DELETE,
        &format!("/api/v1/tags/{}", fad.id),
        Some(common::ADMIN_TOKEN),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = db::rules::for_station(&pool, station.id).await.unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn public_station_directory_lists_active_summaries_only() {
    let pool = common::test_pool().await;
    common::seed_station(&pool, "On Air", "on-air", true).await;
    common::seed_station(&pool, "Off Air", "off-air", false).await;

    let response = common::get(common::build_app(pool), "/api/v1/stations").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    let stations = body.as_array().unwrap();
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0]["slug"], "on-air");
    // Summary shape: no activation flag or timestamps on the public wire.
    assert!(stations[0].get("active").is_none());
    assert!(stations[0].get("created_at").is_none());
}

#[tokio::test]
async fn admin_reads_require_the_admin_token() {
    let pool = common::test_pool().await;
    let station = common::seed_station(&pool, "Private", "private", true).await;
    let tag = common::seed_tag(&pool, "Rock").await;

    for uri in [
        "/api/v1/tags".to_string(),
        format!("/api/v1/tags/{}", tag.id),
        format!("/api/v1/stations/{}", station.id),
        format!("/api/v1/stations/{}/rules", station.id),
    ] {
        let response = common::get(common::build_app(pool.clone()), &uri).await;
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{uri} should require the admin token"
        );

        let response = common::send(
            common::build_app(pool.clone()),
            Method::GET,
            &uri,
            Some(common::ADMIN_TOKEN),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK, "{uri} should serve admins");
    }
}

#[tokio::test]
async fn replacing_track_tags_is_a_full_replace() {
    let pool = common::test_pool().await;
    let rock = common::seed_tag(&pool, "Rock").await;
    let pop = common::seed_tag(&pool, "Pop").await;
    let track = common::seed_track(&pool, "crossover", true, &[rock.id]).await;

    let response = common::send(
        common::build_app(pool.clone()),
        Method::PUT,
        &format!("/api/v1/tracks/{}/tags", track.track.id),
        Some(common::ADMIN_TOKEN),
        Some(json!({ "tag_ids": [pop.id] })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = db::tracks::get(&pool, track.track.id).await.unwrap().unwrap();
    assert_eq!(stored.tag_ids, std::collections::HashSet::from([pop.id]));
}
