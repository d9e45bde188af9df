//! 会话测试公用的记录服务探针
//!
//! 包装内存服务：统计调用次数、按需门控指定学生的记录拉取、
//! 覆写 token 响应，用于构造乱序回复与守门场景。

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use tokio::sync::Notify;

use crate::errors::{RecordBookError, Result};
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
use crate::service::{RecordService, memory::MemoryRecordService};

pub(crate) struct InstrumentedService {
    pub inner: MemoryRecordService,
    pub resolve_calls: AtomicUsize,
    pub fail_resolve: AtomicBool,
    pub record_fetches: AtomicUsize,
    pub mutation_calls: AtomicUsize,
    pub token_calls: AtomicUsize,
    // 门控学生：该学生的记录拉取会等待 gate 放行（0 表示不门控）
    pub gated_student: AtomicI64,
    pub gate: Notify,
    // 设置后 get_room_token 直接返回该值
    pub token_override: Mutex<Option<String>>,
}

impl InstrumentedService {
    pub fn new(inner: MemoryRecordService) -> Self {
        Self {
            inner,
            resolve_calls: AtomicUsize::new(0),
            fail_resolve: AtomicBool::new(false),
            record_fetches: AtomicUsize::new(0),
            mutation_calls: AtomicUsize::new(0),
            token_calls: AtomicUsize::new(0),
            gated_student: AtomicI64::new(0),
            gate: Notify::new(),
            token_override: Mutex::new(None),
        }
    }

    pub fn gate_student(&self, student_id: i64) {
        self.gated_student.store(student_id, Ordering::SeqCst);
    }

    pub fn release_gate(&self) {
        self.gate.notify_one();
    }

    pub fn set_token_override(&self, token: impl Into<String>) {
        *self.token_override.lock().unwrap() = Some(token.into());
    }

    async fn gate_if_needed(&self, student_id: i64) {
        if self.gated_student.load(Ordering::SeqCst) == student_id {
            self.gate.notified().await;
        }
    }
}

#[async_trait::async_trait]
impl RecordService for InstrumentedService {
    async fn resolve_identity(&self) -> Result<RoleFlagsResponse> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_resolve.load(Ordering::SeqCst) {
            return Err(RecordBookError::auth_resolution("connection refused"));
        }
        self.inner.resolve_identity().await
    }

    async fn list_groups(&self) -> Result<Vec<Group>> {
        self.inner.list_groups().await
    }

    async fn list_students_of_group(&self, group_id: i64) -> Result<Vec<Student>> {
        self.inner.list_students_of_group(group_id).await
    }

    async fn list_subjects_of_student(&self, student_id: i64) -> Result<Vec<Subject>> {
        self.inner.list_subjects_of_student(student_id).await
    }

    async fn list_grades_attendance(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Vec<GradeAttendance>> {
        self.record_fetches.fetch_add(1, Ordering::SeqCst);
        self.gate_if_needed(student_id).await;
        self.inner
            .list_grades_attendance(student_id, subject_id)
            .await
    }

    async fn list_semester_grades(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Vec<SemesterGrade>> {
        self.record_fetches.fetch_add(1, Ordering::SeqCst);
        self.gate_if_needed(student_id).await;
        self.inner
            .list_semester_grades(student_id, subject_id)
            .await
    }

    async fn insert_grade_attendance(
        &self,
        request: CreateGradeAttendanceRequest,
    ) -> Result<GradeAttendance> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.insert_grade_attendance(request).await
    }

    async fn update_grade_attendance(
        &self,
        request: UpdateGradeAttendanceRequest,
    ) -> Result<Option<GradeAttendance>> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.update_grade_attendance(request).await
    }

    async fn delete_grade_attendance(&self, id: i64) -> Result<bool> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_grade_attendance(id).await
    }

    async fn insert_semester_grade(
        &self,
        request: CreateSemesterGradeRequest,
    ) -> Result<SemesterGrade> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.insert_semester_grade(request).await
    }

    async fn update_semester_grade(
        &self,
        request: UpdateSemesterGradeRequest,
    ) -> Result<Option<SemesterGrade>> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.update_semester_grade(request).await
    }

    async fn delete_semester_grade(&self, id: i64) -> Result<bool> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_semester_grade(id).await
    }

    async fn get_room_token(&self, room_id: i64) -> Result<String> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(token) = self.token_override.lock().unwrap().clone() {
            return Ok(token);
        }
        self.inner.get_room_token(room_id).await
    }
}
