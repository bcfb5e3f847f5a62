use crate::domain::{Item, ItemId, UserId};
use crate::ports::item_service::{ItemService as ItemServiceTrait, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// ItemServiceのモック実装
///
/// アイテムを登録順に保持し、状態を持ったテストをサポート。
pub struct ItemService {
    items: Mutex<Vec<Item>>,
}

impl ItemService {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    /// テスト用にアイテムを登録（同じIDは上書き）
    pub fn add_item(&self, item: Item) {
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|i| i.item_id == item.item_id) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
    }

    /// テスト用に貸出可否を変更
    pub fn set_available(&self, item_id: ItemId, available: bool) {
        if let Some(item) = self
            .items
            .lock()
            .unwrap()
            .iter_mut()
            .find(|i| i.item_id == item_id)
        {
            item.available = available;
        }
    }

    /// アイテムIDから所有者IDへの対応表
    pub(super) fn owners(&self) -> HashMap<ItemId, UserId> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .map(|item| (item.item_id, item.owner_id))
            .collect()
    }
}

impl Default for ItemService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemServiceTrait for ItemService {
    async fn find_by_id(&self, item_id: ItemId) -> Result<Option<Item>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.item_id == item_id)
            .cloned())
    }

    /// 登録順で返す
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Item>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| item.is_owned_by(owner_id))
            .cloned()
            .collect())
    }
}
