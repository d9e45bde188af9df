//! 身份与层级列表查询

use super::MemoryRecordService;
use crate::errors::Result;
use crate::models::{
    groups::entities::Group, identity::responses::RoleFlagsResponse, students::entities::Student,
    subjects::entities::Subject,
};

impl MemoryRecordService {
    /// 返回当前凭证的角色标志
    pub(super) async fn resolve_identity_impl(&self) -> Result<RoleFlagsResponse> {
        Ok(self
            .identity
            .read()
            .expect("identity lock poisoned")
            .clone())
    }

    /// 列出全部学生组，按 ID 排序
    pub(super) async fn list_groups_impl(&self) -> Result<Vec<Group>> {
        let mut groups: Vec<Group> = self.groups.iter().map(|e| e.value().clone()).collect();
        groups.sort_by_key(|g| g.id);
        Ok(groups)
    }

    /// 列出某组的学生，按 ID 排序
    pub(super) async fn list_students_of_group_impl(&self, group_id: i64) -> Result<Vec<Student>> {
        let mut students: Vec<Student> = self
            .students
            .iter()
            .filter(|e| e.value().group_id == group_id)
            .map(|e| e.value().clone())
            .collect();
        students.sort_by_key(|s| s.id);
        Ok(students)
    }

    /// 列出某学生选修的学科，按 ID 排序
    pub(super) async fn list_subjects_of_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Subject>> {
        let mut subjects: Vec<Subject> = self
            .enrollments
            .iter()
            .filter(|e| e.key().0 == student_id)
            .filter_map(|e| self.subjects.get(&e.key().1).map(|s| s.value().clone()))
            .collect();
        subjects.sort_by_key(|s| s.id);
        Ok(subjects)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::students::entities::Sex;
    use crate::service::memory::MemoryRecordService;

    #[tokio::test]
    async fn test_list_students_scoped_to_group() {
        let service = MemoryRecordService::new();
        let g1 = service.add_group("Group 571");
        let g2 = service.add_group("Group 572");
        let s1 = service.add_student(
            g1.id,
            "Ivan",
            "Petrov",
            Sex::Male,
            chrono::NaiveDate::from_ymd_opt(2003, 5, 14).unwrap(),
        );
        service.add_student(
            g2.id,
            "Anna",
            "Sidorova",
            Sex::Female,
            chrono::NaiveDate::from_ymd_opt(2004, 1, 2).unwrap(),
        );

        let students = service.list_students_of_group_impl(g1.id).await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].id, s1.id);
    }

    #[tokio::test]
    async fn test_subjects_follow_enrollment() {
        let service = MemoryRecordService::new();
        let group = service.add_group("Group 571");
        let student = service.add_student(
            group.id,
            "Ivan",
            "Petrov",
            Sex::Male,
            chrono::NaiveDate::from_ymd_opt(2003, 5, 14).unwrap(),
        );
        let math = service.add_subject("Mathematics");
        service.add_subject("Physics"); // 未选修
        service.enroll(student.id, math.id);

        let subjects = service
            .list_subjects_of_student_impl(student.id)
            .await
            .unwrap();
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].id, math.id);
    }
}
