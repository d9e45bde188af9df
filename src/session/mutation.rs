//! 记录变更守门
//!
//! 所有写路径的检查点：调用方角色必须是 professor，
//! 选择坐标必须完整，二者任一不满足就静默拒绝，
//! 绝不发出网络调用（独立于渲染层的按钮可见性规则）。
//!
//! 写成功后无条件按发起时的选择坐标重拉记录存储，
//! 刻意不做本地乐观补丁，始终以权威数据源回灌。

use serde::Serialize;
use tracing::{error, info, warn};

use super::NavigationSession;
use super::selection::LaneVersions;
use crate::models::records::entities::ViewMode;
use crate::models::records::requests::{
    CreateGradeAttendanceRequest, CreateSemesterGradeRequest, GradeAttendanceDraft,
    SemesterGradeDraft, UpdateGradeAttendanceRequest, UpdateSemesterGradeRequest,
};
use crate::utils::validate::{validate_grade_value, validate_semester_grade};

// 变更结果
//
// 守门拒绝与服务端拒绝都是普通状态值，不跨组件抛错。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MutationOutcome {
    Applied, // 已写入并重拉记录
    Refused, // 前置条件不满足，未发出调用
    Failed,  // 服务端拒绝，存储未动
}

// 发起时刻的变更坐标快照
//
// 回灌按发起时的视图模式拉取，变更的记录类别与当前视图
// 可以不同（例如学期视图下补录平时成绩），存储始终跟随视图。
struct MutationContext {
    student_id: i64,
    subject_id: i64,
    view_mode: ViewMode,
    issue: LaneVersions,
}

impl NavigationSession {
    /// 新增平时成绩与出勤
    pub async fn insert_grade_attendance(&self, draft: GradeAttendanceDraft) -> MutationOutcome {
        let Some(ctx) = self.mutation_context("insert-grade-attendance") else {
            return MutationOutcome::Refused;
        };
        if let Err(reason) = validate_grade_value(draft.grade) {
            info!("Refusing insert-grade-attendance: {reason}");
            return MutationOutcome::Refused;
        }

        let result = self
            .service()
            .insert_grade_attendance(CreateGradeAttendanceRequest {
                student_id: ctx.student_id,
                subject_id: ctx.subject_id,
                grade: draft.grade,
                has_attended: draft.has_attended,
            })
            .await;
        match result {
            Ok(_) => {
                self.resync_after_mutation(ctx).await;
                MutationOutcome::Applied
            }
            Err(e) => {
                error!("insert-grade-attendance rejected by record service: {e}");
                MutationOutcome::Failed
            }
        }
    }

    /// 更新平时成绩与出勤
    pub async fn update_grade_attendance(
        &self,
        id: i64,
        draft: GradeAttendanceDraft,
    ) -> MutationOutcome {
        let Some(ctx) = self.mutation_context("update-grade-attendance") else {
            return MutationOutcome::Refused;
        };
        if let Err(reason) = validate_grade_value(draft.grade) {
            info!("Refusing update-grade-attendance: {reason}");
            return MutationOutcome::Refused;
        }

        let result = self
            .service()
            .update_grade_attendance(UpdateGradeAttendanceRequest {
                id,
                student_id: ctx.student_id,
                subject_id: ctx.subject_id,
                grade: draft.grade,
                has_attended: draft.has_attended,
            })
            .await;
        match result {
            Ok(Some(_)) => {
                self.resync_after_mutation(ctx).await;
                MutationOutcome::Applied
            }
            Ok(None) => {
                warn!("update-grade-attendance: record {id} not found");
                MutationOutcome::Failed
            }
            Err(e) => {
                error!("update-grade-attendance rejected by record service: {e}");
                MutationOutcome::Failed
            }
        }
    }

    /// 删除平时成绩与出勤
    pub async fn delete_grade_attendance(&self, id: i64) -> MutationOutcome {
        let Some(ctx) = self.mutation_context("delete-grade-attendance") else {
            return MutationOutcome::Refused;
        };

        match self.service().delete_grade_attendance(id).await {
            Ok(true) => {
                self.resync_after_mutation(ctx).await;
                MutationOutcome::Applied
            }
            Ok(false) => {
                warn!("delete-grade-attendance: record {id} not found");
                MutationOutcome::Failed
            }
            Err(e) => {
                error!("delete-grade-attendance rejected by record service: {e}");
                MutationOutcome::Failed
            }
        }
    }

    /// 新增学期总评
    pub async fn insert_semester_grade(&self, draft: SemesterGradeDraft) -> MutationOutcome {
        let Some(ctx) = self.mutation_context("insert-semester-grade") else {
            return MutationOutcome::Refused;
        };
        if let Err(reason) = validate_semester_grade(&draft.grade) {
            info!("Refusing insert-semester-grade: {reason}");
            return MutationOutcome::Refused;
        }

        let result = self
            .service()
            .insert_semester_grade(CreateSemesterGradeRequest {
                student_id: ctx.student_id,
                subject_id: ctx.subject_id,
                grade: draft.grade,
            })
            .await;
        match result {
            Ok(_) => {
                self.resync_after_mutation(ctx).await;
                MutationOutcome::Applied
            }
            Err(e) => {
                error!("insert-semester-grade rejected by record service: {e}");
                MutationOutcome::Failed
            }
        }
    }

    /// 更新学期总评
    pub async fn update_semester_grade(
        &self,
        id: i64,
        draft: SemesterGradeDraft,
    ) -> MutationOutcome {
        let Some(ctx) = self.mutation_context("update-semester-grade") else {
            return MutationOutcome::Refused;
        };
        if let Err(reason) = validate_semester_grade(&draft.grade) {
            info!("Refusing update-semester-grade: {reason}");
            return MutationOutcome::Refused;
        }

        let result = self
            .service()
            .update_semester_grade(UpdateSemesterGradeRequest {
                id,
                student_id: ctx.student_id,
                subject_id: ctx.subject_id,
                grade: draft.grade,
            })
            .await;
        match result {
            Ok(Some(_)) => {
                self.resync_after_mutation(ctx).await;
                MutationOutcome::Applied
            }
            Ok(None) => {
                warn!("update-semester-grade: record {id} not found");
                MutationOutcome::Failed
            }
            Err(e) => {
                error!("update-semester-grade rejected by record service: {e}");
                MutationOutcome::Failed
            }
        }
    }

    /// 删除学期总评
    pub async fn delete_semester_grade(&self, id: i64) -> MutationOutcome {
        let Some(ctx) = self.mutation_context("delete-semester-grade") else {
            return MutationOutcome::Refused;
        };

        match self.service().delete_semester_grade(id).await {
            Ok(true) => {
                self.resync_after_mutation(ctx).await;
                MutationOutcome::Applied
            }
            Ok(false) => {
                warn!("delete-semester-grade: record {id} not found");
                MutationOutcome::Failed
            }
            Err(e) => {
                error!("delete-semester-grade rejected by record service: {e}");
                MutationOutcome::Failed
            }
        }
    }

    /// 守门检查：角色为 professor 且选择坐标完整
    ///
    /// 不满足时记录日志并返回 None，调用方据此静默拒绝。
    fn mutation_context(&self, operation: &str) -> Option<MutationContext> {
        match self.identity_if_resolved() {
            Some(identity) if identity.is_professor() => {}
            resolved => {
                info!(
                    "Refusing {operation}: caller is not a professor (role: {:?})",
                    resolved.map(|i| i.role)
                );
                return None;
            }
        }

        let st = self.lock_state();
        let Some((student_id, subject_id)) = st.selection.record_coordinates() else {
            info!("Refusing {operation}: selection is not fully resolved");
            return None;
        };
        Some(MutationContext {
            student_id,
            subject_id,
            view_mode: st.selection.view_mode,
            issue: st.lanes,
        })
    }

    /// 写成功后的确定性回灌：按发起时的坐标与视图重拉，落后于新选择则丢弃
    async fn resync_after_mutation(&self, ctx: MutationContext) {
        self.reload_records(ctx.student_id, ctx.subject_id, ctx.view_mode, ctx.issue)
            .await;
    }
}
