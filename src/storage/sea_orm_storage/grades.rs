use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::entity::subjects::{self, Entity as Subjects};
use crate::entity::users::{self, Entity as Users};
use crate::errors::Result;
use crate::models::grades::{
    entities::{GradeRecord, GradeView},
    requests::{GradeListQuery, NewGrade},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

impl SeaOrmStorage {
    /// 录入成绩
    pub async fn create_grade_impl(&self, req: NewGrade) -> Result<GradeRecord> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            school_id: Set(req.school_id),
            student_id: Set(req.student_id),
            subject_id: Set(req.subject_id),
            teacher_id: Set(req.teacher_id),
            term: Set(req.term),
            exam_type: Set(req.exam_type),
            marks_obtained: Set(req.marks_obtained),
            max_marks: Set(req.max_marks),
            remarks: Set(req.remarks),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("录入成绩失败"))?;
        Ok(result.into_grade())
    }

    /// 查询成绩（带学生和科目名称）
    pub async fn list_grades_impl(
        &self,
        school_id: i64,
        query: GradeListQuery,
    ) -> Result<Vec<GradeView>> {
        let mut select = Grades::find()
            .find_also_related(Subjects)
            .filter(Column::SchoolId.eq(school_id));

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(ref term) = query.term {
            select = select.filter(Column::Term.eq(term.as_str()));
        }

        let rows = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询成绩失败"))?;

        // 学生姓名单独查询
        let mut student_ids: Vec<i64> = rows.iter().map(|(g, _)| g.student_id).collect();
        student_ids.sort_unstable();
        student_ids.dedup();
        let names: HashMap<i64, String> = if student_ids.is_empty() {
            HashMap::new()
        } else {
            Users::find()
                .select_only()
                .column(users::Column::Id)
                .column(users::Column::Name)
                .filter(users::Column::Id.is_in(student_ids))
                .into_tuple::<(i64, String)>()
                .all(&self.db)
                .await
                .map_err(db_error("查询学生姓名失败"))?
                .into_iter()
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|(grade, subject)| {
                let grade = grade.into_grade();
                GradeView {
                    student_name: names.get(&grade.student_id).cloned().unwrap_or_default(),
                    subject_name: subject.map(|s: subjects::Model| s.name).unwrap_or_default(),
                    percentage: grade.percentage(),
                    grade,
                }
            })
            .collect())
    }

    pub async fn list_grades_for_students_impl(
        &self,
        school_id: i64,
        student_ids: &[i64],
    ) -> Result<Vec<GradeRecord>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = Grades::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::StudentId.is_in(student_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(db_error("查询成绩失败"))?;

        Ok(rows.into_iter().map(|m| m.into_grade()).collect())
    }
}
