//! 记录存储
//!
//! 持有当前 (学生, 学科, 视图) 三元组已拉取的记录集合。

use serde::Serialize;

use crate::models::records::entities::RecordSet;

// 当前视图的记录集合与错误标志
//
// 安装整体替换旧集合；拉取失败保留旧集合、只竖起错误标志。
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct RecordStore {
    current: Option<RecordSet>,
    error: bool,
}

impl RecordStore {
    pub fn current(&self) -> Option<&RecordSet> {
        self.current.as_ref()
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    /// 原子替换当前集合并清除错误标志
    pub(crate) fn install(&mut self, set: RecordSet) {
        self.current = Some(set);
        self.error = false;
    }

    /// 拉取失败：保留旧集合，竖起错误标志
    pub(crate) fn mark_error(&mut self) {
        self.error = true;
    }

    /// 上游选择变更：整体作废
    pub(crate) fn clear(&mut self) {
        self.current = None;
        self.error = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::records::entities::GradeAttendance;

    fn attendance_set(grades: &[i32]) -> RecordSet {
        RecordSet::Attendance(
            grades
                .iter()
                .enumerate()
                .map(|(i, grade)| GradeAttendance {
                    id: i as i64 + 1,
                    student_id: 1,
                    subject_id: 1,
                    grade: *grade,
                    has_attended: true,
                })
                .collect(),
        )
    }

    #[test]
    fn test_install_replaces_wholesale() {
        let mut store = RecordStore::default();
        store.install(attendance_set(&[2, 3]));
        store.install(attendance_set(&[5]));
        assert_eq!(store.current().unwrap().len(), 1);
    }

    #[test]
    fn test_error_retains_prior_collection() {
        let mut store = RecordStore::default();
        store.install(attendance_set(&[4]));
        store.mark_error();
        assert!(store.has_error());
        assert_eq!(store.current().unwrap().len(), 1);
    }

    #[test]
    fn test_install_clears_error() {
        let mut store = RecordStore::default();
        store.mark_error();
        store.install(attendance_set(&[]));
        assert!(!store.has_error());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut store = RecordStore::default();
        store.install(attendance_set(&[1]));
        store.mark_error();
        store.clear();
        assert!(store.current().is_none());
        assert!(!store.has_error());
    }
}
