use axum::http::StatusCode;
use axum_test::TestServer;
use hero_tour::api::create_router;
use hero_tour::db::Database;
use hero_tour::models::*;
use serde_json::json;

fn setup() -> (TestServer, Database) {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    db.seed_mock_heroes().expect("Failed to seed");
    let server = TestServer::new(create_router(db.clone())).expect("Failed to create test server");
    (server, db)
}

fn ids(heroes: &[Hero]) -> Vec<HeroId> {
    heroes.iter().filter_map(|h| h.id).collect()
}

mod list_heroes {
    use super::*;

    #[tokio::test]
    async fn returns_the_seeded_roster_in_id_order() {
        let (server, _db) = setup();

        let response = server.get("/api/heroes").await;

        response.assert_status_ok();
        let heroes: Vec<Hero> = response.json();
        assert_eq!(ids(&heroes), (12..=20).collect::<Vec<_>>());
        assert_eq!(heroes[0].name, "Dr. Nice");
    }

    #[tokio::test]
    async fn filters_by_name_ignoring_case() {
        let (server, _db) = setup();

        let response = server
            .get("/api/heroes/")
            .add_query_param("name", "MA")
            .await;

        response.assert_status_ok();
        let heroes: Vec<Hero> = response.json();
        assert_eq!(ids(&heroes), vec![15, 16, 17, 19]);
    }

    #[tokio::test]
    async fn returns_empty_list_when_nothing_matches() {
        let (server, _db) = setup();

        let heroes: Vec<Hero> = server
            .get("/api/heroes/")
            .add_query_param("name", "zzz")
            .await
            .json();

        assert!(heroes.is_empty());
    }
}

mod get_hero {
    use super::*;

    #[tokio::test]
    async fn returns_the_hero_by_id() {
        let (server, _db) = setup();

        let response = server.get("/api/heroes/13").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Hero>(), Hero::with_id(13, "Bombasto"));
    }

    #[tokio::test]
    async fn returns_404_for_unknown_id() {
        let (server, _db) = setup();

        server.get("/api/heroes/99").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn returns_extension_fields_verbatim() {
        let (server, db) = setup();
        let stored: Hero = serde_json::from_value(json!({
            "id": 3,
            "name": "Nightcrawler",
            "power": "teleport"
        }))
        .unwrap();
        db.insert_hero(&stored).unwrap();

        let body: serde_json::Value = server.get("/api/heroes/3").await.json();

        assert_eq!(body, json!({ "id": 3, "name": "Nightcrawler", "power": "teleport" }));
    }
}

mod create_hero {
    use super::*;

    #[tokio::test]
    async fn assigns_the_next_id() {
        let (server, _db) = setup();

        let response = server.post("/api/heroes").json(&Hero::named("Storm")).await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Hero>(), Hero::with_id(21, "Storm"));
    }

    #[tokio::test]
    async fn starts_at_eleven_when_empty() {
        let db = Database::open_memory().unwrap();
        db.migrate().unwrap();
        let server = TestServer::new(create_router(db)).unwrap();

        let hero: Hero = server.post("/api/heroes").json(&Hero::named("Storm")).await.json();

        assert_eq!(hero.id, Some(11));
    }

    #[tokio::test]
    async fn ignores_a_client_supplied_id() {
        let (server, _db) = setup();

        let hero: Hero = server
            .post("/api/heroes")
            .json(&Hero::with_id(13, "Impostor"))
            .await
            .json();

        assert_eq!(hero.id, Some(21));
    }

    #[tokio::test]
    async fn rejects_a_blank_name() {
        let (server, db) = setup();

        server
            .post("/api/heroes")
            .json(&Hero::named("   "))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(db.count_heroes().unwrap(), 9);
    }
}

mod update_hero {
    use super::*;

    #[tokio::test]
    async fn replaces_the_stored_hero() {
        let (server, db) = setup();

        server
            .put("/api/heroes")
            .json(&Hero::with_id(13, "Bombastic"))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let stored = db.get_hero(13).unwrap().unwrap();
        assert_eq!(stored.name, "Bombastic");
    }

    #[tokio::test]
    async fn requires_an_id() {
        let (server, _db) = setup();

        server
            .put("/api/heroes")
            .json(&Hero::named("Nobody"))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn returns_404_for_unknown_id() {
        let (server, _db) = setup();

        server
            .put("/api/heroes")
            .json(&Hero::with_id(99, "Ghost"))
            .await
            .assert_status_not_found();
    }
}

mod delete_hero {
    use super::*;

    #[tokio::test]
    async fn removes_the_hero() {
        let (server, db) = setup();

        server
            .delete("/api/heroes/13")
            .await
            .assert_status(StatusCode::NO_CONTENT);

        assert!(db.get_hero(13).unwrap().is_none());
    }

    #[tokio::test]
    async fn succeeds_for_unknown_id() {
        let (server, db) = setup();

        server
            .delete("/api/heroes/99")
            .await
            .assert_status(StatusCode::NO_CONTENT);
        assert_eq!(db.count_heroes().unwrap(), 9);
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let (server, _db) = setup();

    let response = server.get("/api/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>(), json!({ "status": "ok" }));
}
