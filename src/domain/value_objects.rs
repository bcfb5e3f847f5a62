use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 予約ID - 予約集約の識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// アイテムID - アイテム管理コンテキストへの参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// ユーザーID - ユーザー管理コンテキストへの参照
///
/// 予約者とアイテム所有者の両方をこの型で表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// コメントID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentId(Uuid);

impl CommentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

/// ページング指定のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPage {
    /// ページサイズが0
    ZeroLimit,
}

/// ページング指定
///
/// 不変条件：ページサイズは1以上。
/// offsetは「何件目から」ではなくページ番号の算出に使われる
/// （ページ番号 = offset / limit）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    offset: u32,
    limit: u32,
}

impl PageRequest {
    /// 既定のページサイズ
    pub const DEFAULT_LIMIT: u32 = 100;

    pub fn new(offset: u32, limit: u32) -> Result<Self, InvalidPage> {
        if limit == 0 {
            return Err(InvalidPage::ZeroLimit);
        }
        Ok(Self { offset, limit })
    }

    /// ページ番号（0始まり）
    pub fn page_index(&self) -> u32 {
        self.offset / self.limit
    }

    /// 実際に読み飛ばす件数
    pub fn skip(&self) -> u64 {
        u64::from(self.page_index()) * u64::from(self.limit)
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_id_creation() {
        let id1 = BookingId::new();
        let id2 = BookingId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_item_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = ItemId::from_uuid(uuid);
        assert_eq!(id.value(), uuid);
    }

    #[test]
    fn test_user_id_display_matches_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(UserId::from_uuid(uuid).to_string(), uuid.to_string());
    }

    // ページング
    #[test]
    fn test_page_request_rejects_zero_limit() {
        assert_eq!(PageRequest::new(0, 0), Err(InvalidPage::ZeroLimit));
    }

    #[test]
    fn test_page_request_offset_is_rounded_down_to_page() {
        let page = PageRequest::new(25, 10).unwrap();
        assert_eq!(page.page_index(), 2);
        assert_eq!(page.skip(), 20);
        assert_eq!(page.limit(), 10);
    }

    #[test]
    fn test_page_request_default() {
        let page = PageRequest::default();
        assert_eq!(page.skip(), 0);
        assert_eq!(page.limit(), 100);
    }
}
