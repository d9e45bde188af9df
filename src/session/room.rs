//! 教室接入 broker
//!
//! 用教室 ID 向协作方兑换一次性接入 token，并把 token
//! 一次性移交给外部实时客户端。broker 不缓存、不记录、
//! 不重放 token；兑换失败或 token 为空时放弃加入。

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::Result;
use crate::models::identity::entities::Identity;
use crate::models::rooms::entities::RoomToken;
use crate::service::RecordService;

// 接入状态机：Idle -> Requesting -> {Granted, Denied}
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoomAccessState {
    #[default]
    Idle,
    Requesting,
    Granted,
    Denied,
}

/// 外部实时会话客户端
///
/// 消费 (服务器地址, 一次性 token)；token 的单次有效性由
/// 实时系统负责，本核心只保证绝不重放。
#[async_trait::async_trait]
pub trait RealtimeClient: Send + Sync {
    async fn join(&self, server_address: &str, token: RoomToken) -> Result<()>;
}

pub struct RoomAccessBroker {
    service: Arc<dyn RecordService>,
    realtime: Arc<dyn RealtimeClient>,
    server_address: String,
    state: Mutex<RoomAccessState>,
}

impl RoomAccessBroker {
    pub fn new(
        service: Arc<dyn RecordService>,
        realtime: Arc<dyn RealtimeClient>,
        server_address: impl Into<String>,
    ) -> Self {
        Self {
            service,
            realtime,
            server_address: server_address.into(),
            state: Mutex::new(RoomAccessState::Idle),
        }
    }

    pub fn state(&self) -> RoomAccessState {
        *self.state.lock().expect("room access state lock poisoned")
    }

    fn set_state(&self, state: RoomAccessState) {
        *self.state.lock().expect("room access state lock poisoned") = state;
    }

    /// 兑换 token 并加入教室
    ///
    /// 前置条件：身份已认证（具体教室权限由协作方裁决）。
    /// 空 token 视为致命前置失败，不尝试加入、不重试。
    pub async fn request_access(&self, identity: &Identity, room_id: i64) -> RoomAccessState {
        if !identity.authenticated {
            info!("Refusing room access for room {room_id}: caller is not authenticated");
            self.set_state(RoomAccessState::Denied);
            return RoomAccessState::Denied;
        }

        self.set_state(RoomAccessState::Requesting);

        let raw = match self.service.get_room_token(room_id).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Token exchange failed for room {room_id}: {e}");
                self.set_state(RoomAccessState::Denied);
                return RoomAccessState::Denied;
            }
        };
        let Some(token) = RoomToken::new(raw) else {
            warn!("Token exchange for room {room_id} returned an empty token, join aborted");
            self.set_state(RoomAccessState::Denied);
            return RoomAccessState::Denied;
        };

        // token 在此移交，broker 不再持有
        match self.realtime.join(&self.server_address, token).await {
            Ok(()) => {
                self.set_state(RoomAccessState::Granted);
                RoomAccessState::Granted
            }
            Err(e) => {
                warn!("Joining room {room_id} failed: {e}");
                self.set_state(RoomAccessState::Denied);
                RoomAccessState::Denied
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::errors::RecordBookError;
    use crate::models::identity::entities::{Identity, Role};
    use crate::service::memory::MemoryRecordService;
    use crate::session::testing::InstrumentedService;

    // 记录所有加入调用的实时客户端
    #[derive(Default)]
    struct RecordingRealtime {
        joins: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl RealtimeClient for RecordingRealtime {
        async fn join(&self, server_address: &str, token: RoomToken) -> crate::errors::Result<()> {
            self.joins
                .lock()
                .unwrap()
                .push((server_address.to_string(), token.into_inner()));
            if self.fail {
                return Err(RecordBookError::token_exchange("realtime server refused"));
            }
            Ok(())
        }
    }

    fn student_identity() -> Identity {
        Identity {
            role: Role::Student,
            authenticated: true,
        }
    }

    fn seeded_service() -> (Arc<InstrumentedService>, i64) {
        let inner = MemoryRecordService::new();
        let subject = inner.add_subject("Mathematics");
        let room = inner.add_room(subject.id, "Lecture hall 1");
        (Arc::new(InstrumentedService::new(inner)), room.id)
    }

    #[tokio::test]
    async fn test_unauthenticated_caller_denied_without_calls() {
        let (service, room_id) = seeded_service();
        let realtime = Arc::new(RecordingRealtime::default());
        let broker = RoomAccessBroker::new(service.clone(), realtime.clone(), "ws://localhost:7880");

        let state = broker.request_access(&Identity::guest(), room_id).await;
        assert_eq!(state, RoomAccessState::Denied);
        assert_eq!(service.token_calls.load(Ordering::SeqCst), 0);
        assert!(realtime.joins.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_token_denied_without_join() {
        let (service, room_id) = seeded_service();
        service.set_token_override("");
        let realtime = Arc::new(RecordingRealtime::default());
        let broker = RoomAccessBroker::new(service.clone(), realtime.clone(), "ws://localhost:7880");

        let state = broker.request_access(&student_identity(), room_id).await;
        assert_eq!(state, RoomAccessState::Denied);
        assert_eq!(broker.state(), RoomAccessState::Denied);
        assert!(realtime.joins.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_granted_token_joins_exactly_once() {
        let (service, room_id) = seeded_service();
        service.set_token_override("tok123");
        let realtime = Arc::new(RecordingRealtime::default());
        let broker = RoomAccessBroker::new(service.clone(), realtime.clone(), "ws://localhost:7880");

        let state = broker.request_access(&student_identity(), room_id).await;
        assert_eq!(state, RoomAccessState::Granted);
        assert_eq!(broker.state(), RoomAccessState::Granted);

        let joins = realtime.joins.lock().unwrap();
        assert_eq!(joins.len(), 1);
        assert_eq!(joins[0], ("ws://localhost:7880".to_string(), "tok123".to_string()));
    }

    #[tokio::test]
    async fn test_exchange_failure_denied() {
        let (service, _) = seeded_service();
        let realtime = Arc::new(RecordingRealtime::default());
        let broker = RoomAccessBroker::new(service.clone(), realtime.clone(), "ws://localhost:7880");

        // 不存在的教室：协作方返回错误
        let state = broker.request_access(&student_identity(), 4242).await;
        assert_eq!(state, RoomAccessState::Denied);
        assert!(realtime.joins.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_join_failure_denied() {
        let (service, room_id) = seeded_service();
        service.set_token_override("tok123");
        let realtime = Arc::new(RecordingRealtime {
            joins: Mutex::new(Vec::new()),
            fail: true,
        });
        let broker = RoomAccessBroker::new(service.clone(), realtime.clone(), "ws://localhost:7880");

        let state = broker.request_access(&student_identity(), room_id).await;
        assert_eq!(state, RoomAccessState::Denied);
        // 加入只尝试一次，token 不会被重放
        assert_eq!(realtime.joins.lock().unwrap().len(), 1);
    }
}
