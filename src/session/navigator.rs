//! 级联导航控制器
//!
//! 维护 组 → 学生 → 学科 → 视图模式 的有序依赖链：
//! 写入某一节点时祖先不动，后代全部作废并重新拉取，
//! 新拉取的后代列表非空则自动选中首个元素。
//!
//! 正确性核心是过期回复丢弃：每次拉取携带发出时的通道代号，
//! 回来时代号已被更晚的选择变更顶掉，该回复整体丢弃，
//! 保证快速连续切换时记录数据绝不错挂到旧选择上。

use tracing::{debug, warn};

use super::NavigationSession;
use super::selection::LaneVersions;
use crate::errors::{RecordBookError, Result};
use crate::models::records::entities::{RecordSet, ViewMode};

impl NavigationSession {
    /// 拉取组列表（层级根，不自动选中）
    pub async fn load_groups(&self) {
        let fetched = self.service().list_groups().await;
        let mut st = self.lock_state();
        match fetched {
            Ok(groups) => {
                st.groups = groups;
                st.fetch_error = None;
            }
            Err(e) => {
                warn!("Failed to fetch group list: {e}");
                st.fetch_error = Some(e.to_string());
            }
        }
    }

    /// 选中学生组，级联刷新学生、学科与记录
    pub async fn select_group(&self, group_id: i64) -> Result<()> {
        let issue = {
            let mut st = self.lock_state();
            if !st.groups.iter().any(|g| g.id == group_id) {
                return Err(RecordBookError::validation(format!(
                    "Group {group_id} is not in the fetched group list"
                )));
            }
            st.selection.group_id = Some(group_id);
            st.selection.student_id = None;
            st.selection.subject_id = None;
            st.students.clear();
            st.subjects.clear();
            st.store.clear();
            st.lanes.bump_from_group();
            st.lanes
        };
        self.reload_students(group_id, issue).await;
        Ok(())
    }

    /// 选中学生，级联刷新学科与记录
    ///
    /// 学生必须出现在当前组的学生列表中（隶属不变量）。
    pub async fn select_student(&self, student_id: i64) -> Result<()> {
        let issue = {
            let mut st = self.lock_state();
            if !st.students.iter().any(|s| s.id == student_id) {
                return Err(RecordBookError::validation(format!(
                    "Student {student_id} does not belong to the selected group"
                )));
            }
            st.selection.student_id = Some(student_id);
            st.selection.subject_id = None;
            st.subjects.clear();
            st.store.clear();
            st.lanes.bump_from_student();
            st.lanes
        };
        self.reload_subjects(student_id, issue).await;
        Ok(())
    }

    /// 选中学科，仅刷新记录集合
    ///
    /// 学科必须出现在当前学生的选课列表中（选课不变量）。
    pub async fn select_subject(&self, subject_id: i64) -> Result<()> {
        let (student_id, mode, issue) = {
            let mut st = self.lock_state();
            if !st.subjects.iter().any(|s| s.id == subject_id) {
                return Err(RecordBookError::validation(format!(
                    "Subject {subject_id} is not in the selected student's enrollment"
                )));
            }
            let Some(student_id) = st.selection.student_id else {
                return Err(RecordBookError::validation(
                    "No student selected".to_string(),
                ));
            };
            st.selection.subject_id = Some(subject_id);
            st.store.clear();
            st.lanes.bump_from_subject();
            (student_id, st.selection.view_mode, st.lanes)
        };
        self.reload_records(student_id, subject_id, mode, issue)
            .await;
        Ok(())
    }

    /// 切换视图模式
    ///
    /// 不触碰任何上游选择，只作废并重拉当前记录集合。
    pub async fn set_view_mode(&self, mode: ViewMode) -> Result<()> {
        let work = {
            let mut st = self.lock_state();
            st.selection.view_mode = mode;
            st.store.clear();
            st.lanes.bump_from_subject();
            st.selection
                .record_coordinates()
                .map(|(student_id, subject_id)| (student_id, subject_id, st.lanes))
        };
        if let Some((student_id, subject_id, issue)) = work {
            self.reload_records(student_id, subject_id, mode, issue)
                .await;
        }
        Ok(())
    }

    /// 以当前选择重新拉取记录集合（选择未变，不作废任何通道）
    pub async fn refresh_records(&self) {
        let work = {
            let st = self.lock_state();
            st.selection
                .record_coordinates()
                .map(|(student_id, subject_id)| {
                    (student_id, subject_id, st.selection.view_mode, st.lanes)
                })
        };
        if let Some((student_id, subject_id, mode, issue)) = work {
            self.reload_records(student_id, subject_id, mode, issue)
                .await;
        }
    }

    /// 刷新学生列表并推进级联
    async fn reload_students(&self, group_id: i64, issue: LaneVersions) {
        let fetched = self.service().list_students_of_group(group_id).await;
        let next = {
            let mut st = self.lock_state();
            if st.lanes.students != issue.students {
                debug!("Discarding stale student list reply for group {group_id}");
                return;
            }
            match fetched {
                Ok(students) => {
                    st.fetch_error = None;
                    let first = students.first().map(|s| s.id);
                    st.students = students;
                    st.selection.student_id = first;
                    if first.is_none() {
                        // 空组：后代全部呈现为无数据
                        st.selection.subject_id = None;
                        st.subjects.clear();
                        st.store.clear();
                    }
                    first
                }
                Err(e) => {
                    warn!("Failed to fetch students of group {group_id}: {e}");
                    st.fetch_error = Some(e.to_string());
                    None
                }
            }
        };
        if let Some(student_id) = next {
            self.reload_subjects(student_id, issue).await;
        }
    }

    /// 刷新学科列表并推进级联
    async fn reload_subjects(&self, student_id: i64, issue: LaneVersions) {
        let fetched = self.service().list_subjects_of_student(student_id).await;
        let next = {
            let mut st = self.lock_state();
            if st.lanes.subjects != issue.subjects {
                debug!("Discarding stale subject list reply for student {student_id}");
                return;
            }
            match fetched {
                Ok(subjects) => {
                    st.fetch_error = None;
                    let first = subjects.first().map(|s| s.id);
                    st.subjects = subjects;
                    st.selection.subject_id = first;
                    if first.is_none() {
                        st.store.clear();
                    }
                    first.map(|subject_id| (subject_id, st.selection.view_mode))
                }
                Err(e) => {
                    warn!("Failed to fetch subjects of student {student_id}: {e}");
                    st.fetch_error = Some(e.to_string());
                    None
                }
            }
        };
        if let Some((subject_id, mode)) = next {
            self.reload_records(student_id, subject_id, mode, issue)
                .await;
        }
    }

    /// 拉取记录集合并按通道代号决定是否安装
    pub(crate) async fn reload_records(
        &self,
        student_id: i64,
        subject_id: i64,
        mode: ViewMode,
        issue: LaneVersions,
    ) {
        let fetched = match mode {
            ViewMode::GradesAndAttendance => self
                .service()
                .list_grades_attendance(student_id, subject_id)
                .await
                .map(RecordSet::Attendance),
            ViewMode::SemesterGrades => self
                .service()
                .list_semester_grades(student_id, subject_id)
                .await
                .map(RecordSet::Semester),
        };

        let mut st = self.lock_state();
        if st.lanes.records != issue.records {
            debug!(
                "Discarding stale {mode} reply for student {student_id}, subject {subject_id}"
            );
            return;
        }
        match fetched {
            Ok(set) => st.store.install(set),
            Err(e) => {
                warn!("Failed to fetch {mode} for student {student_id}, subject {subject_id}: {e}");
                st.store.mark_error();
            }
        }
    }
}
