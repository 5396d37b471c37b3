//! Integration tests for the search log: best-effort writes and the statistics queries.

mod common;

use chrono::DateTime;
use cinesearch::db::ConnectionManager;
use cinesearch::db::repositories::SearchLogRepository;
use cinesearch::models::SearchParams;
use cinesearch::services::{SeaOrmSearchLogService, SearchLogService};
use common::{logged_searches, search_log_manager, temp_sqlite_url, unreachable_sqlite_url};

fn keyword(keyword: &str) -> SearchParams {
    SearchParams::Keyword {
        keyword: keyword.to_string(),
    }
}

/// Inserts records with fixed timestamps so ordering is deterministic.
async fn insert_raw(manager: &ConnectionManager, records: &[(&str, &str, &str)]) {
    manager
        .scoped(async |conn| {
            let repo = SearchLogRepository::new(conn.clone());
            for (timestamp, search_type, params) in records {
                repo.add(timestamp, search_type, params, 1).await?;
            }
            Ok(())
        })
        .await
        .expect("Failed to insert search log records");
}

#[tokio::test]
async fn test_record_search_stores_event() {
    let manager = search_log_manager(&temp_sqlite_url("log"));
    let service = SeaOrmSearchLogService::new(manager.clone());

    let genre = SearchParams::GenreYears {
        genre: "Comedy".to_string(),
        year_from: 2000,
        year_to: 2005,
    };
    assert!(service.record_search(&keyword("love"), 7).await);
    assert!(service.record_search(&genre, 3).await);

    let records = logged_searches(&manager).await;
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].search_type, "keyword");
    assert_eq!(records[0].params, r#"{"keyword":"love"}"#);
    assert_eq!(records[0].results_count, 7);
    assert!(DateTime::parse_from_rfc3339(&records[0].timestamp).is_ok());

    assert_eq!(records[1].search_type, "genre_years");
    assert_eq!(
        records[1].params,
        r#"{"genre":"Comedy","year_from":2000,"year_to":2005}"#
    );
    assert!(records[0].timestamp <= records[1].timestamp);
}

#[tokio::test]
async fn test_record_search_survives_unreachable_store() {
    let service = SeaOrmSearchLogService::new(search_log_manager(&unreachable_sqlite_url()));

    assert!(!service.record_search(&keyword("love"), 1).await);
    assert!(service.recent_searches().await.unwrap_err().is_connect());
    assert!(service.popular_searches().await.unwrap_err().is_connect());
}

fn sample_log() -> Vec<(&'static str, &'static str, &'static str)> {
    let comedy = r#"{"genre":"Comedy","year_from":2000,"year_to":2000}"#;
    vec![
        ("2026-01-01T00:00:01.000000Z", "keyword", r#"{"keyword":"alpha"}"#),
        ("2026-01-01T00:00:02.000000Z", "keyword", r#"{"keyword":"bravo"}"#),
        ("2026-01-01T00:00:03.000000Z", "keyword", r#"{"keyword":"alpha"}"#),
        ("2026-01-01T00:00:04.000000Z", "genre_years", comedy),
        ("2026-01-01T00:00:05.000000Z", "keyword", r#"{"keyword":"charlie"}"#),
        ("2026-01-01T00:00:06.000000Z", "keyword", r#"{"keyword":"delta"}"#),
        ("2026-01-01T00:00:07.000000Z", "keyword", r#"{"keyword":"echo"}"#),
        ("2026-01-01T00:00:08.000000Z", "keyword", r#"{"keyword":"alpha"}"#),
        ("2026-01-01T00:00:09.000000Z", "genre&years", comedy),
    ]
}

#[tokio::test]
async fn test_recent_searches_are_distinct_and_newest_first() {
    let manager = search_log_manager(&temp_sqlite_url("log"));
    insert_raw(&manager, &sample_log()).await;
    let service = SeaOrmSearchLogService::new(manager);

    let recent = service.recent_searches().await.unwrap();

    let summary: Vec<(String, String)> = recent
        .iter()
        .map(|g| (g.search_type.clone(), g.last_searched.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("genre_years".to_string(), "2026-01-01T00:00:09.000000Z".to_string()),
            ("keyword".to_string(), "2026-01-01T00:00:08.000000Z".to_string()),
            ("keyword".to_string(), "2026-01-01T00:00:07.000000Z".to_string()),
            ("keyword".to_string(), "2026-01-01T00:00:06.000000Z".to_string()),
            ("keyword".to_string(), "2026-01-01T00:00:05.000000Z".to_string()),
        ]
    );
    assert_eq!(recent[1].param("keyword"), "alpha");
    assert_eq!(recent[1].count, 3);
    assert_eq!(recent[0].param("genre"), "Comedy");
    assert!(recent.iter().all(|g| g.param("keyword") != "bravo"));
}

#[tokio::test]
async fn test_popular_searches_rank_by_count_then_recency() {
    let manager = search_log_manager(&temp_sqlite_url("log"));
    insert_raw(&manager, &sample_log()).await;
    let service = SeaOrmSearchLogService::new(manager);

    let popular = service.popular_searches().await.unwrap();

    let counts: Vec<i64> = popular.iter().map(|g| g.count).collect();
    assert_eq!(counts, vec![3, 2, 1, 1, 1]);
    assert_eq!(popular[0].param("keyword"), "alpha");
    assert_eq!(popular[1].search_type, "genre_years");
    assert_eq!(popular[1].param("year_from"), "2000");

    let tail: Vec<String> = popular[2..].iter().map(|g| g.param("keyword")).collect();
    assert_eq!(tail, vec!["echo", "delta", "charlie"]);
}

#[tokio::test]
async fn test_statistics_on_empty_log() {
    let service = SeaOrmSearchLogService::new(search_log_manager(&temp_sqlite_url("log")));

    assert!(service.recent_searches().await.unwrap().is_empty());
    assert!(service.popular_searches().await.unwrap().is_empty());
}
