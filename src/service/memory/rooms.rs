//! 教室接入 token 兑换

use super::MemoryRecordService;
use crate::errors::{RecordBookError, Result};

impl MemoryRecordService {
    /// 为已存在的教室签发一次性接入 token
    ///
    /// token 每次兑换都重新生成，不做任何缓存。
    pub(super) async fn get_room_token_impl(&self, room_id: i64) -> Result<String> {
        if !self.rooms.contains_key(&room_id) {
            return Err(RecordBookError::not_found(format!(
                "Room {room_id} not found"
            )));
        }
        Ok(uuid::Uuid::new_v4().simple().to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::service::memory::MemoryRecordService;

    #[tokio::test]
    async fn test_token_minted_per_request() {
        let service = MemoryRecordService::new();
        let subject = service.add_subject("Mathematics");
        let room = service.add_room(subject.id, "Lecture hall 1");

        let first = service.get_room_token_impl(room.id).await.unwrap();
        let second = service.get_room_token_impl(room.id).await.unwrap();
        assert!(!first.is_empty());
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_unknown_room_rejected() {
        let service = MemoryRecordService::new();
        assert!(service.get_room_token_impl(42).await.is_err());
    }
}
