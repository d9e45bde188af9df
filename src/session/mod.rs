//! 导航会话核心
//!
//! 一个 `NavigationSession` 对应一个逻辑页面的生命周期：
//! 身份解析一次缓存，选择游标单写者持有，级联拉取带过期丢弃，
//! 变更经守门校验，实时教室接入经独立的 broker。

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tokio::sync::OnceCell;

use crate::models::{
    groups::entities::Group, identity::entities::Identity, students::entities::Student,
    subjects::entities::Subject,
};
use crate::service::RecordService;

pub mod records;
pub mod room;
pub mod selection;

mod mutation;
mod navigator;
mod resolver;
#[cfg(test)]
pub(crate) mod testing;

pub use mutation::MutationOutcome;
pub use records::RecordStore;
pub use room::{RealtimeClient, RoomAccessBroker, RoomAccessState};
pub use selection::Selection;

use selection::LaneVersions;

// 会话内部状态：选择游标、层级列表、记录存储
//
// 单写者；所有临界区都不跨越 await 点。
#[derive(Debug, Default)]
pub(crate) struct NavState {
    pub selection: Selection,
    pub groups: Vec<Group>,
    pub students: Vec<Student>,
    pub subjects: Vec<Subject>,
    pub store: RecordStore,
    pub lanes: LaneVersions,
    // 最近一次列表拉取失败的描述（成功后清除）
    pub fetch_error: Option<String>,
}

/// 供读取方消费的不可变状态快照
#[derive(Debug, Clone, Serialize)]
pub struct NavSnapshot {
    pub selection: Selection,
    pub groups: Vec<Group>,
    pub students: Vec<Student>,
    pub subjects: Vec<Subject>,
    pub store: RecordStore,
    pub fetch_error: Option<String>,
}

/// 一个导航会话（一个逻辑页面）
pub struct NavigationSession {
    service: Arc<dyn RecordService>,
    identity: OnceCell<Identity>,
    state: Mutex<NavState>,
}

impl NavigationSession {
    pub fn new(service: Arc<dyn RecordService>) -> Self {
        Self {
            service,
            identity: OnceCell::new(),
            state: Mutex::new(NavState::default()),
        }
    }

    pub(crate) fn service(&self) -> &Arc<dyn RecordService> {
        &self.service
    }

    pub(crate) fn lock_state(&self) -> MutexGuard<'_, NavState> {
        self.state.lock().expect("navigation state lock poisoned")
    }

    pub(crate) fn identity_cell(&self) -> &OnceCell<Identity> {
        &self.identity
    }

    /// 当前状态快照
    pub fn snapshot(&self) -> NavSnapshot {
        let st = self.lock_state();
        NavSnapshot {
            selection: st.selection,
            groups: st.groups.clone(),
            students: st.students.clone(),
            subjects: st.subjects.clone(),
            store: st.store.clone(),
            fetch_error: st.fetch_error.clone(),
        }
    }
}
