//! Todo seeding functionality.
//!
//! Provides functions for generating and inserting fake todos for a single
//! user into the database.

use chrono::Utc;
use fake::Fake;
use fake::faker::lorem::en::Sentence;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::time::Instant;
use uuid::Uuid;

use todo_models::NewTodo;

// Seven bound parameters per row keeps a chunk well under the protocol limit.
const BATCH_SIZE: usize = 500;

/// Generates `count` todos owned by `user_id`.
///
/// Titles are three to seven lorem words, which always satisfies the title
/// length bounds enforced by the API.
pub fn generate_todos(user_id: Uuid, count: usize) -> Vec<NewTodo> {
    (0..count)
        .map(|i| {
            let title: String = Sentence(3..8).fake();
            let mut todo = NewTodo::new(user_id, title, Utc::now());
            // Every third todo is already done so filters have something to show.
            todo.is_completed = i % 3 == 0;
            todo
        })
        .collect()
}

/// Seeds todos into the database for the given user
pub async fn seed_todos(
    db: &PgPool,
    user_id: Uuid,
    count: usize,
) -> Result<usize, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("📝 Seeding {} todos for user {}...", count, user_id);

    let todos = generate_todos(user_id, count);
    let inserted = insert_todos_batch(db, &todos).await?;

    println!(
        "   ✓ Inserted {} todos in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

/// Inserts todos in batches inside a single transaction
pub async fn insert_todos_batch(
    db: &PgPool,
    todos: &[NewTodo],
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in todos.chunks(BATCH_SIZE) {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO todos (todo_id, user_id, title, is_completed, status, created_at, updated_at) ",
        );

        query.push_values(chunk, |mut row, todo| {
            row.push_bind(todo.todo_id)
                .push_bind(todo.user_id)
                .push_bind(&todo.title)
                .push_bind(todo.is_completed)
                .push_bind(todo.status)
                .push_bind(todo.created_at)
                .push_bind(todo.updated_at);
        });

        let result = query.build().execute(&mut *tx).await?;
        inserted += result.rows_affected() as usize;
    }

    tx.commit().await?;
    Ok(inserted)
}

/// Deletes every todo owned by the given user
pub async fn clear_todos(db: &PgPool, user_id: Uuid) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing todos for user {}...", user_id);

    let result = sqlx::query("DELETE FROM todos WHERE user_id = $1")
        .bind(user_id)
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} todos in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_todos_count_and_owner() {
        let user_id = Uuid::new_v4();
        let todos = generate_todos(user_id, 12);

        assert_eq!(todos.len(), 12);
        assert!(todos.iter().all(|t| t.user_id == user_id));
        assert_eq!(todos.iter().filter(|t| t.is_completed).count(), 4);
    }

    #[test]
    fn test_generated_titles_within_bounds() {
        for todo in generate_todos(Uuid::new_v4(), 200) {
            let len = todo.title.chars().count();
            assert!((5..=2550).contains(&len), "title {:?} out of bounds", todo.title);
        }
    }

    #[test]
    fn test_generated_ids_unique() {
        let todos = generate_todos(Uuid::new_v4(), 100);
        let mut ids: Vec<_> = todos.iter().map(|t| t.todo_id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 100);
    }
}
