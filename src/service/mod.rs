use std::sync::Arc;

use crate::models::{
    groups::entities::Group,
    identity::responses::RoleFlagsResponse,
    records::{
        entities::{GradeAttendance, SemesterGrade},
        requests::{
            CreateGradeAttendanceRequest, CreateSemesterGradeRequest,
            UpdateGradeAttendanceRequest, UpdateSemesterGradeRequest,
        },
    },
    students::entities::Student,
    subjects::entities::Subject,
};

use crate::config::AppConfig;
use crate::errors::{RecordBookError, Result};

pub mod memory;

/// 外部记录服务的逻辑请求/响应契约
///
/// 具体传输与数据格式由协作方实现负责，本核心只依赖此边界。
#[async_trait::async_trait]
pub trait RecordService: Send + Sync {
    /// 身份解析
    // 检查当前凭证对应的角色标志
    async fn resolve_identity(&self) -> Result<RoleFlagsResponse>;

    /// 层级列表查询
    // 列出全部学生组
    async fn list_groups(&self) -> Result<Vec<Group>>;
    // 列出某组的学生
    async fn list_students_of_group(&self, group_id: i64) -> Result<Vec<Student>>;
    // 列出某学生选修的学科
    async fn list_subjects_of_student(&self, student_id: i64) -> Result<Vec<Subject>>;

    /// 记录集合查询
    // 列出某 (学生, 学科) 的平时成绩与出勤
    async fn list_grades_attendance(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Vec<GradeAttendance>>;
    // 列出某 (学生, 学科) 的学期总评
    async fn list_semester_grades(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Vec<SemesterGrade>>;

    /// 记录变更
    // 新增平时成绩与出勤
    async fn insert_grade_attendance(
        &self,
        request: CreateGradeAttendanceRequest,
    ) -> Result<GradeAttendance>;
    // 更新平时成绩与出勤
    async fn update_grade_attendance(
        &self,
        request: UpdateGradeAttendanceRequest,
    ) -> Result<Option<GradeAttendance>>;
    // 删除平时成绩与出勤
    async fn delete_grade_attendance(&self, id: i64) -> Result<bool>;
    // 新增学期总评
    async fn insert_semester_grade(
        &self,
        request: CreateSemesterGradeRequest,
    ) -> Result<SemesterGrade>;
    // 更新学期总评
    async fn update_semester_grade(
        &self,
        request: UpdateSemesterGradeRequest,
    ) -> Result<Option<SemesterGrade>>;
    // 删除学期总评
    async fn delete_semester_grade(&self, id: i64) -> Result<bool>;

    /// 实时会话
    // 兑换教室的一次性接入 token
    async fn get_room_token(&self, room_id: i64) -> Result<String>;
}

/// 按配置选择记录服务后端
pub fn create_service() -> Result<Arc<dyn RecordService>> {
    let config = AppConfig::get();
    create_service_by_name(&config.service.service_type)
}

fn create_service_by_name(name: &str) -> Result<Arc<dyn RecordService>> {
    match name {
        "memory" => Ok(Arc::new(memory::MemoryRecordService::new())),
        other => Err(RecordBookError::service_plugin_not_found(format!(
            "Unknown record service type: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_registered() {
        assert!(create_service_by_name("memory").is_ok());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let err = create_service_by_name("carrier-pigeon").err().unwrap();
        assert_eq!(err.code(), "E010");
    }
}
