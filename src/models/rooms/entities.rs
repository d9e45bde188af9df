use serde::{Deserialize, Serialize};

// 教室实体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub id: i64,
    pub subject_id: i64,
    pub room_name: String,
}

// 一次性实时会话凭证
//
// 不可克隆，移交给实时客户端后即消耗；
// 不序列化、Debug 输出脱敏，防止凭证落入日志。
pub struct RoomToken(String);

impl RoomToken {
    /// 包装协作方返回的 token；空白 token 视为无效
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// 取出 token 内容，消耗凭证本身
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for RoomToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RoomToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_rejected() {
        assert!(RoomToken::new("").is_none());
        assert!(RoomToken::new("   ").is_none());
    }

    #[test]
    fn test_token_into_inner() {
        let token = RoomToken::new("tok123").unwrap();
        assert_eq!(token.into_inner(), "tok123");
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = RoomToken::new("tok123").unwrap();
        let debug = format!("{token:?}");
        assert!(!debug.contains("tok123"));
    }
}
