use serde::{Deserialize, Serialize};

// 新增平时成绩与出勤请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGradeAttendanceRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub grade: i32,
    pub has_attended: bool,
}

// 更新平时成绩与出勤请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGradeAttendanceRequest {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub grade: i32,
    pub has_attended: bool,
}

// 新增学期总评请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSemesterGradeRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub grade: String,
}

// 更新学期总评请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSemesterGradeRequest {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub grade: String,
}

// 平时成绩与出勤的录入内容（坐标由当前选择补全）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeAttendanceDraft {
    pub grade: i32,
    pub has_attended: bool,
}

// 学期总评的录入内容（坐标由当前选择补全）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemesterGradeDraft {
    pub grade: String,
}
