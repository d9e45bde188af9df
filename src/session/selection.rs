//! 导航选择游标
//!
//! Selection 是驱动所有依赖拉取的可变游标，由导航会话独占持有，
//! 读取方只拿到不可变快照。

use serde::Serialize;

use crate::models::records::entities::ViewMode;

// 当前选择：组 → 学生 → 学科 → 视图模式
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct Selection {
    pub group_id: Option<i64>,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub view_mode: ViewMode,
}

impl Selection {
    /// 组、学生、学科是否全部就位（变更记录的前提）
    pub fn is_fully_resolved(&self) -> bool {
        self.group_id.is_some() && self.student_id.is_some() && self.subject_id.is_some()
    }

    /// 记录集合的坐标 (student_id, subject_id)
    pub fn record_coordinates(&self) -> Option<(i64, i64)> {
        match (self.student_id, self.subject_id) {
            (Some(student_id), Some(subject_id)) => Some((student_id, subject_id)),
            _ => None,
        }
    }
}

// 各依赖节点的拉取代号
//
// 祖先节点的写入会递增所有后代节点的代号；
// 拉取发出时记录代号，回来时代号已变则整个丢弃（过期回复丢弃规则）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct LaneVersions {
    pub students: u64,
    pub subjects: u64,
    pub records: u64,
}

impl LaneVersions {
    /// 组变更：三条通道全部失效
    pub fn bump_from_group(&mut self) {
        self.students += 1;
        self.subjects += 1;
        self.records += 1;
    }

    /// 学生变更：学科与记录通道失效
    pub fn bump_from_student(&mut self) {
        self.subjects += 1;
        self.records += 1;
    }

    /// 学科或视图变更：仅记录通道失效
    pub fn bump_from_subject(&mut self) {
        self.records += 1;
    }
}
