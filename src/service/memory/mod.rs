//! 进程内记录服务实现
//!
//! 用 DashMap 保存完整层级数据，供演示入口与测试使用。
//! 传输层协作方就位前，本实现即是 `RecordService` 的参考后端。

use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;

use crate::errors::Result;
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
    rooms::entities::Room,
    students::entities::{Sex, Student},
    subjects::entities::Subject,
};

use super::RecordService;

mod records;
mod rooms;
mod roster;

pub struct MemoryRecordService {
    identity: RwLock<RoleFlagsResponse>,
    groups: DashMap<i64, Group>,
    students: DashMap<i64, Student>,
    subjects: DashMap<i64, Subject>,
    // 选课关系，键为 (student_id, subject_id)
    enrollments: DashMap<(i64, i64), ()>,
    grades: DashMap<i64, GradeAttendance>,
    semester_grades: DashMap<i64, SemesterGrade>,
    rooms: DashMap<i64, Room>,
    next_id: AtomicI64,
}

impl Default for MemoryRecordService {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRecordService {
    pub fn new() -> Self {
        Self {
            identity: RwLock::new(RoleFlagsResponse {
                authenticated: false,
                is_admin: false,
                is_professor: false,
            }),
            groups: DashMap::new(),
            students: DashMap::new(),
            subjects: DashMap::new(),
            enrollments: DashMap::new(),
            grades: DashMap::new(),
            semester_grades: DashMap::new(),
            rooms: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    fn alloc_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// 设置当前凭证对应的角色标志
    pub fn set_identity(&self, flags: RoleFlagsResponse) {
        *self
            .identity
            .write()
            .expect("identity lock poisoned") = flags;
    }

    // 数据填充方法（演示与测试用） //

    pub fn add_group(&self, group_name: impl Into<String>) -> Group {
        let group = Group {
            id: self.alloc_id(),
            group_name: group_name.into(),
        };
        self.groups.insert(group.id, group.clone());
        group
    }

    pub fn add_student(
        &self,
        group_id: i64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        sex: Sex,
        birthdate: chrono::NaiveDate,
    ) -> Student {
        let student = Student {
            id: self.alloc_id(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            group_id,
            sex,
            birthdate,
        };
        self.students.insert(student.id, student.clone());
        student
    }

    pub fn add_subject(&self, subject_name: impl Into<String>) -> Subject {
        let subject = Subject {
            id: self.alloc_id(),
            subject_name: subject_name.into(),
        };
        self.subjects.insert(subject.id, subject.clone());
        subject
    }

    pub fn enroll(&self, student_id: i64, subject_id: i64) {
        self.enrollments.insert((student_id, subject_id), ());
    }

    pub fn add_room(&self, subject_id: i64, room_name: impl Into<String>) -> Room {
        let room = Room {
            id: self.alloc_id(),
            subject_id,
            room_name: room_name.into(),
        };
        self.rooms.insert(room.id, room.clone());
        room
    }
}

#[async_trait::async_trait]
impl RecordService for MemoryRecordService {
    async fn resolve_identity(&self) -> Result<RoleFlagsResponse> {
        self.resolve_identity_impl().await
    }

    async fn list_groups(&self) -> Result<Vec<Group>> {
        self.list_groups_impl().await
    }

    async fn list_students_of_group(&self, group_id: i64) -> Result<Vec<Student>> {
        self.list_students_of_group_impl(group_id).await
    }

    async fn list_subjects_of_student(&self, student_id: i64) -> Result<Vec<Subject>> {
        self.list_subjects_of_student_impl(student_id).await
    }

    async fn list_grades_attendance(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Vec<GradeAttendance>> {
        self.list_grades_attendance_impl(student_id, subject_id)
            .await
    }

    async fn list_semester_grades(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Vec<SemesterGrade>> {
        self.list_semester_grades_impl(student_id, subject_id).await
    }

    async fn insert_grade_attendance(
        &self,
        request: CreateGradeAttendanceRequest,
    ) -> Result<GradeAttendance> {
        self.insert_grade_attendance_impl(request).await
    }

    async fn update_grade_attendance(
        &self,
        request: UpdateGradeAttendanceRequest,
    ) -> Result<Option<GradeAttendance>> {
        self.update_grade_attendance_impl(request).await
    }

    async fn delete_grade_attendance(&self, id: i64) -> Result<bool> {
        self.delete_grade_attendance_impl(id).await
    }

    async fn insert_semester_grade(
        &self,
        request: CreateSemesterGradeRequest,
    ) -> Result<SemesterGrade> {
        self.insert_semester_grade_impl(request).await
    }

    async fn update_semester_grade(
        &self,
        request: UpdateSemesterGradeRequest,
    ) -> Result<Option<SemesterGrade>> {
        self.update_semester_grade_impl(request).await
    }

    async fn delete_semester_grade(&self, id: i64) -> Result<bool> {
        self.delete_semester_grade_impl(id).await
    }

    async fn get_room_token(&self, room_id: i64) -> Result<String> {
        self.get_room_token_impl(room_id).await
    }
}
