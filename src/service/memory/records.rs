//! 成绩记录的存取操作

use super::MemoryRecordService;
use crate::errors::{RecordBookError, Result};
use crate::models::records::{
    entities::{GradeAttendance, SemesterGrade},
    requests::{
        CreateGradeAttendanceRequest, CreateSemesterGradeRequest, UpdateGradeAttendanceRequest,
        UpdateSemesterGradeRequest,
    },
};

impl MemoryRecordService {
    /// 列出某 (学生, 学科) 的平时成绩与出勤，按 ID 排序
    pub(super) async fn list_grades_attendance_impl(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Vec<GradeAttendance>> {
        let mut records: Vec<GradeAttendance> = self
            .grades
            .iter()
            .filter(|e| e.value().student_id == student_id && e.value().subject_id == subject_id)
            .map(|e| e.value().clone())
            .collect();
        records.sort_by_key(|r| r.id);
        Ok(records)
    }

    /// 列出某 (学生, 学科) 的学期总评，按 ID 排序
    pub(super) async fn list_semester_grades_impl(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Vec<SemesterGrade>> {
        let mut records: Vec<SemesterGrade> = self
            .semester_grades
            .iter()
            .filter(|e| e.value().student_id == student_id && e.value().subject_id == subject_id)
            .map(|e| e.value().clone())
            .collect();
        records.sort_by_key(|r| r.id);
        Ok(records)
    }

    /// 新增平时成绩与出勤
    pub(super) async fn insert_grade_attendance_impl(
        &self,
        request: CreateGradeAttendanceRequest,
    ) -> Result<GradeAttendance> {
        // 学生与学科必须存在
        if !self.students.contains_key(&request.student_id) {
            return Err(RecordBookError::not_found(format!(
                "Student {} not found",
                request.student_id
            )));
        }
        if !self.subjects.contains_key(&request.subject_id) {
            return Err(RecordBookError::not_found(format!(
                "Subject {} not found",
                request.subject_id
            )));
        }

        let record = GradeAttendance {
            id: self.alloc_id(),
            student_id: request.student_id,
            subject_id: request.subject_id,
            grade: request.grade,
            has_attended: request.has_attended,
        };
        self.grades.insert(record.id, record.clone());
        Ok(record)
    }

    /// 更新平时成绩与出勤
    pub(super) async fn update_grade_attendance_impl(
        &self,
        request: UpdateGradeAttendanceRequest,
    ) -> Result<Option<GradeAttendance>> {
        match self.grades.get_mut(&request.id) {
            Some(mut entry) => {
                let record = entry.value_mut();
                record.grade = request.grade;
                record.has_attended = request.has_attended;
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    /// 删除平时成绩与出勤
    pub(super) async fn delete_grade_attendance_impl(&self, id: i64) -> Result<bool> {
        Ok(self.grades.remove(&id).is_some())
    }

    /// 新增学期总评
    pub(super) async fn insert_semester_grade_impl(
        &self,
        request: CreateSemesterGradeRequest,
    ) -> Result<SemesterGrade> {
        if !self.students.contains_key(&request.student_id) {
            return Err(RecordBookError::not_found(format!(
                "Student {} not found",
                request.student_id
            )));
        }
        if !self.subjects.contains_key(&request.subject_id) {
            return Err(RecordBookError::not_found(format!(
                "Subject {} not found",
                request.subject_id
            )));
        }

        let record = SemesterGrade {
            id: self.alloc_id(),
            student_id: request.student_id,
            subject_id: request.subject_id,
            grade: request.grade,
        };
        self.semester_grades.insert(record.id, record.clone());
        Ok(record)
    }

    /// 更新学期总评
    pub(super) async fn update_semester_grade_impl(
        &self,
        request: UpdateSemesterGradeRequest,
    ) -> Result<Option<SemesterGrade>> {
        match self.semester_grades.get_mut(&request.id) {
            Some(mut entry) => {
                let record = entry.value_mut();
                record.grade = request.grade;
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    /// 删除学期总评
    pub(super) async fn delete_semester_grade_impl(&self, id: i64) -> Result<bool> {
        Ok(self.semester_grades.remove(&id).is_some())
    }
}
