use crate::domain::{BookingMarkers, Comment, Item, ItemId, UserId, timeline};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::booking_service::{ServiceDependencies, load_item};
use super::errors::{BookingApplicationError, Result};

/// 予約情報付きのアイテム詳細
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetails {
    pub item: Item,
    /// 所有者以外には常に空
    pub markers: BookingMarkers,
    pub comments: Vec<Comment>,
}

/// アイテム詳細を組み立てる
///
/// 直近・次回の予約は閲覧者が所有者の場合のみ付与する。
/// 所有者以外にはReducerの結果に関わらず空のマーカーを返す。
pub async fn get_item_details(
    deps: &ServiceDependencies,
    item_id: ItemId,
    viewer_id: UserId,
    now: DateTime<Utc>,
) -> Result<ItemDetails> {
    let item = load_item(deps, item_id).await?;

    let comments = async {
        deps.comment_repository
            .find_by_item(item_id)
            .await
            .map_err(BookingApplicationError::CommentRepositoryError)
    };

    let (markers, comments) = if item.is_owned_by(viewer_id) {
        let bookings = async {
            deps.booking_repository
                .find_approved_for_item(item_id)
                .await
                .map_err(BookingApplicationError::BookingRepositoryError)
        };

        let (bookings, comments) = futures::try_join!(bookings, comments)?;
        (timeline::reduce_markers(&bookings, now), comments)
    } else {
        (BookingMarkers::hidden(), comments.await?)
    };

    tracing::debug!("Item with id={} was obtained for user id={}", item_id, viewer_id);

    Ok(ItemDetails {
        item,
        markers,
        comments,
    })
}

/// 所有者の全アイテムを予約情報付きで取得する
///
/// アイテムごとに問い合わせず、アイテム・承認済み予約・コメントを
/// それぞれ一括で取得してからメモリ上でアイテムごとにまとめる。
pub async fn list_owner_items(
    deps: &ServiceDependencies,
    owner_id: UserId,
    now: DateTime<Utc>,
) -> Result<Vec<ItemDetails>> {
    let items = async {
        deps.item_service
            .find_by_owner(owner_id)
            .await
            .map_err(BookingApplicationError::ItemServiceError)
    };
    let bookings = async {
        deps.booking_repository
            .find_approved_for_owner(owner_id)
            .await
            .map_err(BookingApplicationError::BookingRepositoryError)
    };
    let comments = async {
        deps.comment_repository
            .find_by_item_owner(owner_id)
            .await
            .map_err(BookingApplicationError::CommentRepositoryError)
    };

    let (items, bookings, comments) = futures::try_join!(items, bookings, comments)?;

    let mut markers = timeline::reduce_markers_by_item(&bookings, now);
    let mut comments_by_item: HashMap<ItemId, Vec<Comment>> = HashMap::new();
    for comment in comments {
        comments_by_item
            .entry(comment.item_id)
            .or_default()
            .push(comment);
    }

    let details: Vec<ItemDetails> = items
        .into_iter()
        .map(|item| ItemDetails {
            markers: markers.remove(&item.item_id).unwrap_or_default(),
            comments: comments_by_item.remove(&item.item_id).unwrap_or_default(),
            item,
        })
        .collect();

    tracing::debug!(
        "{} items for owner with id={} were obtained",
        details.len(),
        owner_id
    );
    Ok(details)
}
