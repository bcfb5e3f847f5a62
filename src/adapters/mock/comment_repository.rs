use crate::domain::{Comment, ItemId, UserId};
use crate::ports::comment_repository::{CommentRepository as CommentRepositoryTrait, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::ItemService;

/// CommentRepositoryのインメモリ実装
///
/// 所有者での検索にはモックのItemServiceに登録されたアイテムを使う。
pub struct CommentRepository {
    comments: Mutex<Vec<Comment>>,
    items: Arc<ItemService>,
}

impl CommentRepository {
    pub fn new(items: Arc<ItemService>) -> Self {
        Self {
            comments: Mutex::new(Vec::new()),
            items,
        }
    }
}

#[async_trait]
impl CommentRepositoryTrait for CommentRepository {
    async fn save(&self, comment: &Comment) -> Result<()> {
        self.comments.lock().unwrap().push(comment.clone());
        Ok(())
    }

    async fn find_by_item(&self, item_id: ItemId) -> Result<Vec<Comment>> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.item_id == item_id)
            .cloned()
            .collect())
    }

    async fn find_by_item_owner(&self, owner_id: UserId) -> Result<Vec<Comment>> {
        let owners = self.items.owners();
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| owners.get(&c.item_id) == Some(&owner_id))
            .cloned()
            .collect())
    }
}
