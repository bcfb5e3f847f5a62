use crate::domain::{Comment, CommentId, ItemId, UserId, commands::CreateComment};
use chrono::{DateTime, Utc};

use super::booking_service::{ServiceDependencies, load_item, load_user};
use super::errors::{BookingApplicationError, Result};

/// コメント可否を判定する
///
/// ビジネスルール：
/// 次のいずれかの予約があればコメント可能
/// - 承認済みで、開始日時が現在より前
/// - キャンセル済み（開始日時は問わない）
///
/// 該当する予約がなければUserDidNotBookItemを返す。
pub async fn check_comment_eligibility(
    deps: &ServiceDependencies,
    user_id: UserId,
    item_id: ItemId,
    now: DateTime<Utc>,
) -> Result<()> {
    let eligible = deps
        .booking_repository
        .exists_for_comment_eligibility(user_id, item_id, now)
        .await
        .map_err(BookingApplicationError::BookingRepositoryError)?;

    if !eligible {
        return Err(BookingApplicationError::UserDidNotBookItem { user_id, item_id });
    }
    Ok(())
}

/// コメントを投稿する
///
/// 可否判定 → アイテムの存在確認 → 投稿者の存在確認の順で確認し、
/// すべて通過した場合のみ保存する。
pub async fn create_comment(deps: &ServiceDependencies, cmd: CreateComment) -> Result<Comment> {
    check_comment_eligibility(deps, cmd.author_id, cmd.item_id, cmd.created_at).await?;
    let item = load_item(deps, cmd.item_id).await?;
    let author = load_user(deps, cmd.author_id).await?;

    let comment = Comment {
        comment_id: CommentId::new(),
        item_id: item.item_id,
        author_id: author.user_id,
        author_name: author.name,
        text: cmd.text,
        created_at: cmd.created_at,
    };

    deps.comment_repository
        .save(&comment)
        .await
        .map_err(BookingApplicationError::CommentRepositoryError)?;

    tracing::debug!(
        "Comment saved with id={:?} for item id={}",
        comment.comment_id.value(),
        comment.item_id
    );
    Ok(comment)
}
