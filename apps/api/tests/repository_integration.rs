//! Integration tests for the PostgreSQL repository layer
//!
//! These tests need a live database and are ignored by default:
//!
//! ```text
//! DATABASE_URL=postgres://... cargo test -- --ignored
//! ```
//!
//! Every test works on rows keyed by fresh UUIDs so runs can share a database.

use chrono::{Duration, Utc};
use podcast_api::auth::password::hash_password_with_cost;
use podcast_api::controllers::feed_url::{add_feed_urls, update_feed_url};
use podcast_api::domain::feed_url::{FeedUrlQuery, FeedUrlUpdate};
use podcast_api::domain::podcast::{PodcastQuery, PodcastSort};
use podcast_api::domain::purchase::{GooglePlayPurchase, GooglePlayPurchaseUpdate, NewGooglePlayPurchase};
use podcast_api::domain::repositories::{
    FeedUrlRepository, GooglePlayPurchaseRepository, PodcastRepository, UserRepository,
};
use podcast_api::domain::user::{Email, User};
use podcast_api::infrastructure::repositories::{
    PostgresFeedUrlRepository, PostgresGooglePlayPurchaseRepository, PostgresPodcastRepository,
    PostgresUserRepository,
};
use sqlx::PgPool;
use uuid::Uuid;

/// Set up a migrated test database connection pool
async fn setup_test_db() -> PgPool {
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for integration tests");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Insert a public podcast row and return its id
async fn create_test_podcast(pool: &PgPool, title: &str, is_explicit: bool, views: i64) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO podcasts (id, title, sortable_title, is_explicit, is_public, past_week_total_unique_page_views)
         VALUES ($1, $2, $3, $4, TRUE, $5)",
    )
    .bind(id)
    .bind(title)
    .bind(title.to_lowercase())
    .bind(is_explicit)
    .bind(views)
    .execute(pool)
    .await
    .expect("Failed to create test podcast");

    id
}

async fn create_test_user(pool: &PgPool) -> User {
    let repo = PostgresUserRepository::new(pool.clone());
    let email = Email::new(format!("repo-{}@test.com", Uuid::new_v4())).unwrap();
    let user = User::new(email, hash_password_with_cost("testpass", 4).unwrap());
    repo.create(user.clone()).await.expect("Failed to create user");
    user
}

async fn cleanup_podcast(pool: &PgPool, id: Uuid) {
    // CASCADE DELETE removes the podcast's feed urls
    sqlx::query("DELETE FROM podcasts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .expect("Failed to cleanup podcast");
}

async fn cleanup_user(pool: &PgPool, id: Uuid) {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .expect("Failed to cleanup user");
}

#[tokio::test]
#[ignore]
async fn test_add_feed_url_twice_stores_one_row() {
    let pool = setup_test_db().await;
    let repo = PostgresFeedUrlRepository::new(pool.clone());
    let url = format!("https://{}.example.com/feed.xml", Uuid::new_v4());

    let first = add_feed_urls(&repo, &[url.clone()]).await.unwrap();
    let second = add_feed_urls(&repo, &[url.clone()]).await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(first[0].url, second[0].url);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM feed_urls WHERE url = $1")
        .bind(&url)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    repo.remove(&url).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_update_feed_url_links_podcast() {
    let pool = setup_test_db().await;
    let repo = PostgresFeedUrlRepository::new(pool.clone());
    let podcast_id = create_test_podcast(&pool, "Linked Show", false, 0).await;
    let url = format!("https://{}.example.com/feed.xml", Uuid::new_v4());
    add_feed_urls(&repo, &[url.clone()]).await.unwrap();

    let update = FeedUrlUpdate {
        id: url.clone(),
        is_authority: Some(false),
        podcast_id: Some(Some(podcast_id)),
    };
    update_feed_url(&repo, &update).await.unwrap();

    let stored = repo.find_by_url(&url).await.unwrap().unwrap();
    assert_eq!(stored.podcast, Some(podcast_id));
    assert!(!stored.is_authority);

    let by_podcast = repo
        .find_all(&FeedUrlQuery {
            podcast_ids: vec![podcast_id],
            take: 20,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_podcast.len(), 1);

    cleanup_podcast(&pool, podcast_id).await;
    assert!(repo.find_by_url(&url).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn test_podcast_search_filters_and_sorts() {
    let pool = setup_test_db().await;
    let repo = PostgresPodcastRepository::new(pool.clone());
    let quiet = create_test_podcast(&pool, "Quiet Hours", false, 10).await;
    let popular = create_test_podcast(&pool, "Popular Hours", false, 500).await;
    let explicit = create_test_podcast(&pool, "Late Hours", true, 1000).await;

    let query = PodcastQuery {
        podcast_ids: vec![quiet, popular, explicit],
        sort: PodcastSort::TopPastWeek,
        take: 20,
        ..Default::default()
    };

    let safe = repo.search(&query, false).await.unwrap();
    let ids: Vec<Uuid> = safe.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![popular, quiet]);

    let all = repo.search(&query, true).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, explicit);

    let by_title = repo
        .search(
            &PodcastQuery {
                title: Some("quiet".to_string()),
                ..query.clone()
            },
            false,
        )
        .await
        .unwrap();
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].id, quiet);

    // Wildcards in the title match literally
    for wildcard in ["_", "%", "Quiet%Hours"] {
        let literal = repo
            .search(
                &PodcastQuery {
                    title: Some(wildcard.to_string()),
                    ..query.clone()
                },
                true,
            )
            .await
            .unwrap();
        assert!(literal.is_empty(), "{} matched a title", wildcard);
    }

    for id in [quiet, popular, explicit] {
        cleanup_podcast(&pool, id).await;
    }
}

#[tokio::test]
#[ignore]
async fn test_user_subscriptions_persist() {
    let pool = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool.clone());
    let mut user = create_test_user(&pool).await;
    let podcast_id = Uuid::new_v4();

    repo.update_subscribed_podcast_ids(user.id, &[podcast_id])
        .await
        .unwrap();
    user = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(user.subscribed_podcast_ids, vec![podcast_id]);

    let by_email = repo.find_by_email(&user.email).await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);

    let duplicate = User::new(user.email.clone(), "hash".to_string());
    assert!(repo.create(duplicate).await.is_err());

    cleanup_user(&pool, user.id).await;
}

#[tokio::test]
#[ignore]
async fn test_purchase_save_and_merge() {
    let pool = setup_test_db().await;
    let repo = PostgresGooglePlayPurchaseRepository::new(pool.clone());
    let owner = create_test_user(&pool).await;
    let order_id = format!("GPA.{}", Uuid::new_v4());

    let purchase = GooglePlayPurchase::new(
        NewGooglePlayPurchase {
            order_id: order_id.clone(),
            product_id: "plus_membership".to_string(),
            purchase_token: "token".to_string(),
            purchase_time_millis: Some((Utc::now() - Duration::minutes(1)).timestamp_millis().to_string()),
            ..Default::default()
        },
        Some(owner.id),
    );
    assert!(repo.create(&purchase).await.unwrap());

    let stored = repo.find_by_order_id(&order_id).await.unwrap().unwrap();
    assert!(stored.is_owned_by(owner.id));

    let mut claimed = purchase.clone();
    claimed.owner = None;
    assert!(!repo.create(&claimed).await.unwrap());
    repo.save(&claimed).await.unwrap();
    let stored = repo.find_by_order_id(&order_id).await.unwrap().unwrap();
    assert_eq!(stored.owner, Some(owner.id));

    let merged = stored.merge(&GooglePlayPurchaseUpdate {
        order_id: order_id.clone(),
        acknowledgement_state: Some(1),
        ..Default::default()
    });
    repo.save(&merged).await.unwrap();

    let stored = repo.find_by_order_id(&order_id).await.unwrap().unwrap();
    assert_eq!(stored.acknowledgement_state, Some(1));
    assert_eq!(stored.product_id, "plus_membership");

    // Deleting the owner keeps the purchase
    cleanup_user(&pool, owner.id).await;
    let orphaned = repo.find_by_order_id(&order_id).await.unwrap().unwrap();
    assert_eq!(orphaned.owner, None);

    sqlx::query("DELETE FROM google_play_purchases WHERE order_id = $1")
        .bind(&order_id)
        .execute(&pool)
        .await
        .unwrap();
}
