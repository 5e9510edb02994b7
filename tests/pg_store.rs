//! `PgStore` against a throwaway database. Skipped when `DATABASE_URL` is unset.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use roster::error::AppError;
use roster::models::NewUser;
use roster::pagination::PageRequest;
use roster::service::{projects, users};
use roster::store::{PgStore, ProjectStore, StoreError, UserStore};

struct TestDb {
    store: PgStore,
    db_name: String,
    admin_url: String,
}

fn admin_url(base_url: &str) -> String {
    base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.to_string())
}

async fn spawn_db() -> Option<TestDb> {
    let _ = dotenvy::dotenv();
    let Ok(base_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping postgres store test");
        return None;
    };

    let db_name = format!("roster_test_{}", Uuid::now_v7().simple());
    let admin_url = admin_url(&base_url);

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect to postgres for test DB creation");
    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");
    admin_pool.close().await;

    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());
    let pool: PgPool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    Some(TestDb {
        store: PgStore::new(pool),
        db_name,
        admin_url,
    })
}

async fn cleanup(db: TestDb) {
    db.store.pool().close().await;

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&db.admin_url)
        .await
        .expect("Failed to connect for cleanup");
    let _ = sqlx::query(&format!(
        "DROP DATABASE IF EXISTS \"{}\" WITH (FORCE)",
        db.db_name
    ))
    .execute(&admin_pool)
    .await;
    admin_pool.close().await;
}

#[tokio::test]
async fn postgres_store_round_trip() {
    let Some(db) = spawn_db().await else {
        return;
    };
    let store = &db.store;

    let ada = users::create(store, Some("Ada"), Some("ada@example.com"))
        .await
        .unwrap();
    let grace = users::create(store, Some("Grace"), Some("grace@example.com"))
        .await
        .unwrap();

    // Unique constraint surfaces as a conflict even past the service check
    let dup = UserStore::create(
        store,
        NewUser {
            name: "Again".to_string(),
            email: "ada@example.com".to_string(),
        },
    )
    .await;
    assert!(matches!(dup, Err(StoreError::DuplicateEmail)));

    let page = UserStore::find_all_paged(store, PageRequest::new(0, 1))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total_items, 2);
    assert_eq!(page.total_pages(), 2);

    let found = UserStore::find_all_by_ids(store, &[grace.id, 9999, ada.id])
        .await
        .unwrap();
    assert_eq!(found.len(), 2);

    let project = projects::create(store, Some("Apollo"), Some("moon"))
        .await
        .unwrap();

    let detail = projects::assign_users(store, project.id, &[grace.id, ada.id])
        .await
        .unwrap();
    assert_eq!(detail.user_ids(), vec![grace.id, ada.id]);

    let err = projects::assign_users(store, project.id, &[ada.id, 9999])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AssignRejected(ref ids) if ids == "9999"));

    let detail = projects::unassign_users(store, project.id, &[grace.id])
        .await
        .unwrap();
    assert_eq!(detail.user_ids(), vec![ada.id]);

    let dto = users::find_by_id(store, ada.id).await.unwrap();
    assert_eq!(dto.projects.len(), 1);

    projects::assign_users(store, project.id, &[grace.id, ada.id])
        .await
        .unwrap();
    projects::delete(store, project.id).await.unwrap();
    assert!(UserStore::projects_of(store, ada.id).await.unwrap().is_empty());
    assert!(UserStore::projects_of(store, grace.id).await.unwrap().is_empty());
    assert!(ProjectStore::find_by_id(store, project.id).await.unwrap().is_none());

    let second = projects::create(store, Some("Gemini"), None).await.unwrap();
    projects::assign_users(store, second.id, &[ada.id, grace.id])
        .await
        .unwrap();
    users::delete(store, ada.id).await.unwrap();
    let detail = projects::find_by_id(store, second.id).await.unwrap();
    assert_eq!(detail.user_ids(), vec![grace.id]);

    // Concurrent assigns serialize on the project row: one list wins whole.
    let linus = users::create(store, Some("Linus"), Some("linus@example.com"))
        .await
        .unwrap();
    let grace_ids = [grace.id];
    let linus_ids = [linus.id];
    let (left, right) = tokio::join!(
        projects::assign_users(store, second.id, &grace_ids),
        projects::assign_users(store, second.id, &linus_ids),
    );
    left.unwrap();
    right.unwrap();
    let final_ids = projects::find_by_id(store, second.id)
        .await
        .unwrap()
        .user_ids();
    assert!(
        final_ids == vec![grace.id] || final_ids == vec![linus.id],
        "expected one whole list, got {final_ids:?}"
    );

    cleanup(db).await;
}
