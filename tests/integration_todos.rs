//! End-to-end tests against PostgreSQL.
//!
//! Run with `DATABASE_URL` pointing at a disposable server:
//! `cargo test --features db-tests`.
#![cfg(feature = "db-tests")]

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use common::{create_request, create_todo, fake_title, list_request, send, setup_app, token_for};
use todo_api::modules::todos::{PgTodoRepository, TodoRepository};
use todo_core::{Filter, OrderBy, QueryOptions, SortDirection};
use todo_models::NewTodo;

fn setup_test_app(pool: PgPool) -> axum::Router {
    setup_app(Arc::new(PgTodoRepository::new(pool)))
}

async fn insert_todo(pool: &PgPool, user_id: Uuid, title: &str, minutes_ago: i64) -> Uuid {
    let mut todo = NewTodo::new(user_id, title.to_string(), Utc::now());
    todo.created_at -= Duration::minutes(minutes_ago);
    todo.updated_at = todo.created_at;

    PgTodoRepository::new(pool.clone())
        .create(todo)
        .await
        .unwrap()
        .unwrap()
        .todo_id
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_todo_persists(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let user_id = Uuid::new_v4();
    let token = token_for(user_id);

    let (status, body) = send(
        &app,
        create_request(Some(&token), json!({ "title": "Buy milk" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let todo_id = Uuid::parse_str(body["data"]["todo_id"].as_str().unwrap()).unwrap();

    let (title, owner, is_completed, todo_status): (String, Uuid, bool, i16) = sqlx::query_as(
        "SELECT title, user_id, is_completed, status FROM todos WHERE todo_id = $1",
    )
    .bind(todo_id)
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(title, "Buy milk");
    assert_eq!(owner, user_id);
    assert!(!is_completed);
    assert_eq!(todo_status, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_defaults_newest_first(pool: PgPool) {
    let user_id = Uuid::new_v4();
    let older = insert_todo(&pool, user_id, "Older todo", 10).await;
    let newer = insert_todo(&pool, user_id, "Newer todo", 1).await;

    let app = setup_test_app(pool);
    let (status, body) = send(&app, list_request(Some(&token_for(user_id)), "")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["todo_id"], newer.to_string());
    assert_eq!(body["data"][1]["todo_id"], older.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_count_and_limit(pool: PgPool) {
    let app = setup_test_app(pool);
    let token = token_for(Uuid::new_v4());
    for _ in 0..15 {
        create_todo(&app, &token, &fake_title()).await;
    }

    let (_, body) = send(&app, list_request(Some(&token), "limit=4&page=4")).await;

    assert_eq!(body["count"], 15);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_scope_cannot_be_widened(pool: PgPool) {
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    insert_todo(&pool, alice, "Alice's todo", 0).await;
    insert_todo(&pool, bob, "Bob's todo", 0).await;

    let app = setup_test_app(pool);
    let query = format!("user_id={}", &bob.to_string()[..8]);
    let (status, body) = send(&app, list_request(Some(&token_for(alice)), &query)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_todo_id_like_filter_is_case_insensitive(pool: PgPool) {
    let user_id = Uuid::new_v4();
    let target = insert_todo(&pool, user_id, "Find this todo", 0).await;
    insert_todo(&pool, user_id, "Not this one", 0).await;

    let app = setup_test_app(pool);
    let needle = target.to_string()[..13].to_uppercase();
    let query = format!("todo_id={}", needle);
    let (_, body) = send(&app, list_request(Some(&token_for(user_id)), &query)).await;

    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["todo_id"], target.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sort_by_title(pool: PgPool) {
    let user_id = Uuid::new_v4();
    insert_todo(&pool, user_id, "bravo task", 0).await;
    insert_todo(&pool, user_id, "alpha task", 0).await;
    insert_todo(&pool, user_id, "charlie task", 0).await;

    let app = setup_test_app(pool);
    let (_, body) = send(
        &app,
        list_request(Some(&token_for(user_id)), "sort_by=title&order=asc"),
    )
    .await;

    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["alpha task", "bravo task", "charlie task"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_repository_window_and_tiebreak(pool: PgPool) {
    let user_id = Uuid::new_v4();
    for i in 0..5 {
        insert_todo(&pool, user_id, &format!("same instant {}", i), 0).await;
    }
    let repository = PgTodoRepository::new(pool);

    let options = |offset| QueryOptions {
        filters: vec![Filter::equals_uuid("user_id", user_id)],
        order: vec![
            OrderBy {
                column: "created_at",
                direction: SortDirection::Desc,
            },
            OrderBy {
                column: "todo_id",
                direction: SortDirection::Desc,
            },
        ],
        limit: 2,
        offset,
    };

    let first = repository.find_all(&options(0)).await.unwrap();
    let again = repository.find_all(&options(0)).await.unwrap();
    let second = repository.find_all(&options(2)).await.unwrap();

    assert_eq!(first, again);
    assert_eq!(second.len(), 2);
    assert!(second.iter().all(|t| !first.contains(t)));
    assert_eq!(
        repository.count(&options(0).filters).await.unwrap(),
        5
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_title_check_constraint(pool: PgPool) {
    let repository = PgTodoRepository::new(pool);
    let todo = NewTodo::new(Uuid::new_v4(), "abc".to_string(), Utc::now());

    let err = repository.create(todo).await.unwrap_err();
    assert_eq!(err.kind, todo_core::ErrorKind::PersistenceError);
}
