//! PostgreSQLアダプターの結合テスト
//!
//! DATABASE_URLで接続できるデータベースが必要なため既定では実行しない。
//! `cargo test -- --ignored` で実行する。

use chrono::{Duration, Utc};
use serial_test::serial;
use share_it_booking::adapters::postgres::{
    PostgresBookingRepository, PostgresCommentRepository, PostgresItemService,
    PostgresUserService,
};
use share_it_booking::application::booking::{
    BookingApplicationError, ServiceDependencies, create_booking, create_comment, decide_booking,
    get_item_details, list_for_booker,
};
use share_it_booking::domain::commands::*;
use share_it_booking::domain::*;
use share_it_booking::ports::{BookingRepository, ItemService, UserService};
use sqlx::PgPool;
use std::sync::Arc;

mod common;

/// テストの独立性を保つため、各テスト前にすべてのデータを削除する
async fn cleanup_database(pool: &PgPool) {
    sqlx::query("TRUNCATE TABLE comments, bookings, items, users CASCADE")
        .execute(pool)
        .await
        .expect("Failed to truncate tables");
}

async fn insert_user(pool: &PgPool, name: &str) -> UserId {
    let user_id = UserId::new();
    sqlx::query("INSERT INTO users (user_id, name, email) VALUES ($1, $2, $3)")
        .bind(user_id.value())
        .bind(name)
        .bind(format!("{}@example.com", user_id))
        .execute(pool)
        .await
        .expect("Failed to insert user");
    user_id
}

async fn insert_item(pool: &PgPool, owner_id: UserId, name: &str, available: bool) -> ItemId {
    let item_id = ItemId::new();
    sqlx::query(
        "INSERT INTO items (item_id, owner_id, name, description, available) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(item_id.value())
    .bind(owner_id.value())
    .bind(name)
    .bind(format!("{} for rent", name))
    .bind(available)
    .execute(pool)
    .await
    .expect("Failed to insert item");
    item_id
}

async fn setup() -> (PgPool, ServiceDependencies) {
    let pool = common::create_test_pool().await;
    cleanup_database(&pool).await;

    let deps = ServiceDependencies {
        booking_repository: Arc::new(PostgresBookingRepository::new(pool.clone())),
        item_service: Arc::new(PostgresItemService::new(pool.clone())),
        user_service: Arc::new(PostgresUserService::new(pool.clone())),
        comment_repository: Arc::new(PostgresCommentRepository::new(pool.clone())),
    };
    (pool, deps)
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_postgres_item_and_user_lookup() {
    let (pool, _) = setup().await;
    let owner = insert_user(&pool, "Owner").await;
    let item = insert_item(&pool, owner, "Drill", true).await;

    let items = PostgresItemService::new(pool.clone());
    let users = PostgresUserService::new(pool.clone());

    let found = items.find_by_id(item).await.unwrap().unwrap();
    assert_eq!(found.owner_id, owner);
    assert!(found.available);
    assert_eq!(items.find_by_owner(owner).await.unwrap().len(), 1);
    assert!(items.find_by_id(ItemId::new()).await.unwrap().is_none());

    assert!(users.exists(owner).await.unwrap());
    assert!(!users.exists(UserId::new()).await.unwrap());
    assert_eq!(users.find_by_id(owner).await.unwrap().unwrap().name, "Owner");
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_postgres_booking_lifecycle() {
    let (pool, deps) = setup().await;
    let owner = insert_user(&pool, "Owner").await;
    let booker = insert_user(&pool, "Booker").await;
    let item = insert_item(&pool, owner, "Drill", true).await;
    let now = Utc::now();

    let booking = create_booking(
        &deps,
        CreateBooking {
            item_id: item,
            booker_id: booker,
            start: now + Duration::hours(1),
            end: now + Duration::hours(2),
        },
    )
    .await
    .unwrap();

    let repository = PostgresBookingRepository::new(pool.clone());
    let stored = repository.get_by_id(booking.booking_id).await.unwrap().unwrap();
    assert_eq!(stored.item_owner_id, owner);
    assert_eq!(stored.status, BookingStatus::Waiting);

    // 既存の予約への保存は主キー違反となり、ステータスは変わらない
    let overwrite = Booking {
        status: BookingStatus::Approved,
        ..stored.clone()
    };
    assert!(repository.save(&overwrite).await.is_err());

    let cmd = DecideBooking {
        booking_id: booking.booking_id,
        owner_id: owner,
        approve: true,
    };
    let approved = decide_booking(&deps, cmd.clone()).await.unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);

    let result = decide_booking(&deps, cmd).await;
    assert!(matches!(
        result,
        Err(BookingApplicationError::InvalidStateTransition {
            from: BookingStatus::Approved,
            ..
        })
    ));

    // 古いステータスを前提とした更新は適用されない
    let applied = repository
        .update_status_if(
            booking.booking_id,
            BookingStatus::Waiting,
            BookingStatus::Rejected,
        )
        .await
        .unwrap();
    assert!(!applied);
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_postgres_bucket_queries_and_paging() {
    let (pool, deps) = setup().await;
    let owner = insert_user(&pool, "Owner").await;
    let booker = insert_user(&pool, "Booker").await;
    let item = insert_item(&pool, owner, "Drill", true).await;
    let now = Utc::now();

    let mut created = Vec::new();
    for days in [-3, -1, 1, 3] {
        let start = now + Duration::days(days);
        created.push(
            create_booking(
                &deps,
                CreateBooking {
                    item_id: item,
                    booker_id: booker,
                    start,
                    end: start + Duration::hours(1),
                },
            )
            .await
            .unwrap(),
        );
    }

    let future = list_for_booker(&deps, booker, "FUTURE", PageRequest::default(), now)
        .await
        .unwrap();
    assert_eq!(
        future.iter().map(|b| b.booking_id).collect::<Vec<_>>(),
        vec![created[3].booking_id, created[2].booking_id]
    );

    let past = list_for_booker(&deps, booker, "PAST", PageRequest::default(), now)
        .await
        .unwrap();
    assert_eq!(past.len(), 2);

    // from=2, size=2 はページ番号1
    let page = list_for_booker(&deps, booker, "ALL", PageRequest::new(2, 2).unwrap(), now)
        .await
        .unwrap();
    assert_eq!(
        page.iter().map(|b| b.booking_id).collect::<Vec<_>>(),
        vec![created[1].booking_id, created[0].booking_id]
    );
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_postgres_markers_and_comments() {
    let (pool, deps) = setup().await;
    let owner = insert_user(&pool, "Owner").await;
    let booker = insert_user(&pool, "Booker").await;
    let item = insert_item(&pool, owner, "Drill", true).await;
    let now = Utc::now();

    let mut approved = Vec::new();
    for days in [-2, -1, 1, 2] {
        let start = now + Duration::days(days);
        let booking = create_booking(
            &deps,
            CreateBooking {
                item_id: item,
                booker_id: booker,
                start,
                end: start + Duration::hours(1),
            },
        )
        .await
        .unwrap();
        approved.push(
            decide_booking(
                &deps,
                DecideBooking {
                    booking_id: booking.booking_id,
                    owner_id: owner,
                    approve: true,
                },
            )
            .await
            .unwrap(),
        );
    }

    let comment = create_comment(
        &deps,
        CreateComment {
            item_id: item,
            author_id: booker,
            text: "Solid drill".to_string(),
            created_at: now,
        },
    )
    .await
    .unwrap();

    let details = get_item_details(&deps, item, owner, now).await.unwrap();
    assert_eq!(
        details.markers.last.map(|b| b.booking_id),
        Some(approved[1].booking_id)
    );
    assert_eq!(
        details.markers.next.map(|b| b.booking_id),
        Some(approved[2].booking_id)
    );
    assert_eq!(details.comments.len(), 1);
    assert_eq!(details.comments[0].comment_id, comment.comment_id);
    assert_eq!(details.comments[0].author_name, "Booker");
}
