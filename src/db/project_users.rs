//! Queries over the `project_users` link table.

use sqlx::PgPool;

use crate::models::{Project, User};

pub async fn users_of<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    project_id: i64,
) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT u.id, u.name, u.email FROM users u
         JOIN project_users pu ON pu.user_id = u.id
         WHERE pu.project_id = $1
         ORDER BY pu.position",
    )
    .bind(project_id)
    .fetch_all(executor)
    .await
}

pub async fn user_ids_of<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    project_id: i64,
) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT user_id FROM project_users WHERE project_id = $1 ORDER BY position",
    )
    .bind(project_id)
    .fetch_all(executor)
    .await
}

pub async fn projects_of(pool: &PgPool, user_id: i64) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT p.id, p.name, p.description FROM projects p
         JOIN project_users pu ON pu.project_id = p.id
         WHERE pu.user_id = $1
         ORDER BY p.id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn insert<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    project_id: i64,
    user_id: i64,
    position: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO project_users (project_id, user_id, position) VALUES ($1, $2, $3)",
    )
    .bind(project_id)
    .bind(user_id)
    .bind(position)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn clear_project<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    project_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM project_users WHERE project_id = $1")
        .bind(project_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn clear_user<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM project_users WHERE user_id = $1")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
