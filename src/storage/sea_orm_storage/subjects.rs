use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::student_profiles::{self, Entity as StudentProfiles};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::entity::teacher_subjects::{self, Entity as TeacherSubjects};
use crate::entity::users;
use crate::errors::Result;
use crate::models::subjects::{
    entities::{Subject, TeacherSubject, TeachingAssignment},
    requests::{AssignTeacherRequest, CreateSubjectRequest, UpdateSubjectRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, sea_query::JoinType,
};

impl SeaOrmStorage {
    /// 创建科目
    pub async fn create_subject_impl(
        &self,
        school_id: i64,
        req: CreateSubjectRequest,
    ) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            school_id: Set(school_id),
            name: Set(req.name),
            code: Set(req.code),
            grade_level: Set(req.grade_level),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("创建科目失败"))?;
        Ok(result.into_subject())
    }

    pub async fn get_subject_impl(&self, school_id: i64, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询科目失败"))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn get_subject_by_code_impl(
        &self,
        school_id: i64,
        code: &str,
    ) -> Result<Option<Subject>> {
        let result = Subjects::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(db_error("查询科目失败"))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 列出科目，按年级筛选时包含不限年级的通用科目
    pub async fn list_subjects_impl(
        &self,
        school_id: i64,
        grade_level: Option<&str>,
        include_inactive: bool,
    ) -> Result<Vec<Subject>> {
        let mut select = Subjects::find().filter(Column::SchoolId.eq(school_id));

        if !include_inactive {
            select = select.filter(Column::IsActive.eq(true));
        }

        if let Some(grade_level) = grade_level {
            select = select.filter(
                Condition::any()
                    .add(Column::GradeLevel.eq(grade_level))
                    .add(Column::GradeLevel.is_null()),
            );
        }

        let rows = select
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(db_error("查询科目列表失败"))?;

        Ok(rows.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 更新科目
    pub async fn update_subject_impl(
        &self,
        school_id: i64,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        let Some(existing) = Subjects::find_by_id(id)
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询科目失败"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(grade_level) = update.grade_level {
            model.grade_level = Set(Some(grade_level));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model.update(&self.db).await.map_err(db_error("更新科目失败"))?;
        Ok(Some(result.into_subject()))
    }

    pub async fn count_subjects_impl(&self, school_id: i64) -> Result<u64> {
        Subjects::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(db_error("统计科目数量失败"))
    }

    /// 分配任课教师
    pub async fn assign_teacher_subject_impl(
        &self,
        school_id: i64,
        subject_id: i64,
        req: AssignTeacherRequest,
    ) -> Result<TeacherSubject> {
        let mut existing = TeacherSubjects::find()
            .filter(teacher_subjects::Column::SchoolId.eq(school_id))
            .filter(teacher_subjects::Column::SubjectId.eq(subject_id))
            .filter(teacher_subjects::Column::TeacherId.eq(req.teacher_id))
            .filter(teacher_subjects::Column::GradeLevel.eq(req.grade_level.as_str()));
        existing = match req.section.as_deref() {
            Some(section) => existing.filter(teacher_subjects::Column::Section.eq(section)),
            None => existing.filter(teacher_subjects::Column::Section.is_null()),
        };

        if let Some(found) = existing
            .one(&self.db)
            .await
            .map_err(db_error("查询任课安排失败"))?
        {
            return Ok(found.into_teacher_subject());
        }

        let model = teacher_subjects::ActiveModel {
            school_id: Set(school_id),
            teacher_id: Set(req.teacher_id),
            subject_id: Set(subject_id),
            grade_level: Set(req.grade_level),
            section: Set(req.section),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("分配任课教师失败"))?;
        Ok(result.into_teacher_subject())
    }

    /// 列出任课安排及对应学生人数，返回 (教师ID, 安排)
    pub async fn list_teaching_assignments_impl(
        &self,
        school_id: i64,
        teacher_id: Option<i64>,
    ) -> Result<Vec<(i64, TeachingAssignment)>> {
        let mut select = TeacherSubjects::find()
            .find_also_related(Subjects)
            .filter(teacher_subjects::Column::SchoolId.eq(school_id));
        if let Some(teacher_id) = teacher_id {
            select = select.filter(teacher_subjects::Column::TeacherId.eq(teacher_id));
        }

        let rows = select
            .order_by_asc(teacher_subjects::Column::GradeLevel)
            .order_by_asc(teacher_subjects::Column::Section)
            .all(&self.db)
            .await
            .map_err(db_error("查询任课安排失败"))?;

        // 每个班级的在读学生人数
        let class_sizes: Vec<(String, String, i64)> = StudentProfiles::find()
            .select_only()
            .column(student_profiles::Column::GradeLevel)
            .column(student_profiles::Column::Section)
            .column_as(student_profiles::Column::Id.count(), "count")
            .join(JoinType::InnerJoin, student_profiles::Relation::User.def())
            .filter(student_profiles::Column::SchoolId.eq(school_id))
            .filter(users::Column::IsActive.eq(true))
            .group_by(student_profiles::Column::GradeLevel)
            .group_by(student_profiles::Column::Section)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("统计班级人数失败"))?;

        let mut sizes: HashMap<(String, String), u64> = HashMap::new();
        for (grade, section, count) in class_sizes {
            sizes.insert((grade, section), count.max(0) as u64);
        }

        Ok(rows
            .into_iter()
            .filter_map(|(ts, subject)| {
                let subject = subject?;
                let student_count = match ts.section.as_deref() {
                    Some(section) => sizes
                        .get(&(ts.grade_level.clone(), section.to_string()))
                        .copied()
                        .unwrap_or(0),
                    None => sizes
                        .iter()
                        .filter(|((grade, _), _)| *grade == ts.grade_level)
                        .map(|(_, count)| *count)
                        .sum(),
                };
                Some((
                    ts.teacher_id,
                    TeachingAssignment {
                        id: ts.id,
                        subject_id: subject.id,
                        subject_name: subject.name,
                        subject_code: subject.code,
                        grade_level: ts.grade_level,
                        section: ts.section,
                        student_count,
                    },
                ))
            })
            .collect())
    }
}
