//! 提交存储操作

use super::{SeaOrmStorage, db_error};
use crate::entity::assignment_submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::users::{self, Entity as Users};
use crate::errors::{CampusError, Result};
use crate::models::assignments::{
    entities::{Submission, SubmissionStatus},
    requests::NewSubmission,
    responses::SubmissionWithStudent,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 新建或覆盖学生的提交
    ///
    /// 覆盖时清空上一次的批改信息。是否允许覆盖由调用方判断。
    pub async fn upsert_submission_impl(&self, req: NewSubmission) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();
        let answers = serde_json::to_string(&req.answers)
            .map_err(|e| CampusError::serialization(format!("序列化答案失败: {e}")))?;

        let (score, graded_at) = match req.status {
            SubmissionStatus::Graded => (Some(req.auto_score), Some(now)),
            SubmissionStatus::PendingReview => (None, None),
        };

        let existing = Submissions::find()
            .filter(Column::SchoolId.eq(req.school_id))
            .filter(Column::AssignmentId.eq(req.assignment_id))
            .filter(Column::StudentId.eq(req.student_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询提交失败"))?;

        let mut model = match existing {
            Some(found) => found.into(),
            None => ActiveModel {
                school_id: Set(req.school_id),
                assignment_id: Set(req.assignment_id),
                student_id: Set(req.student_id),
                ..Default::default()
            },
        };
        model.answers = Set(answers);
        model.auto_score = Set(req.auto_score);
        model.score = Set(score);
        model.status = Set(req.status.to_string());
        model.is_late = Set(req.is_late);
        model.feedback = Set(None);
        model.submitted_at = Set(now);
        model.graded_at = Set(graded_at);
        model.reviewed_by = Set(None);

        let result = model.save(&self.db).await.map_err(db_error("保存提交失败"))?;
        let id = result
            .id
            .try_as_ref()
            .copied()
            .ok_or_else(|| CampusError::database_operation("保存提交后缺少 ID"))?;

        self.get_submission_impl(req.school_id, id)
            .await?
            .ok_or_else(|| CampusError::database_operation("保存提交后无法读取"))
    }

    pub async fn get_submission_impl(&self, school_id: i64, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询提交失败"))?;

        Ok(result.map(|m| m.into_submission()))
    }

    pub async fn get_student_submission_impl(
        &self,
        school_id: i64,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询提交失败"))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 某作业的全部提交（带学生姓名）
    pub async fn list_assignment_submissions_impl(
        &self,
        school_id: i64,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionWithStudent>> {
        let rows = Submissions::find()
            .find_also_related(Users)
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(users::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_error("查询提交列表失败"))?;

        Ok(rows
            .into_iter()
            .map(|(submission, student)| {
                let (student_name, student_email) = student
                    .map(|u| (u.name, u.email))
                    .unwrap_or_default();
                SubmissionWithStudent {
                    submission: submission.into_submission(),
                    student_name,
                    student_email,
                }
            })
            .collect())
    }

    pub async fn list_student_submissions_impl(
        &self,
        school_id: i64,
        student_id: i64,
    ) -> Result<Vec<Submission>> {
        let rows = Submissions::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(db_error("查询学生提交失败"))?;

        Ok(rows.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 一组作业的提交记录，返回 (作业ID, 学生ID)
    pub async fn list_submission_keys_impl(
        &self,
        school_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<(i64, i64)>> {
        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }
        Submissions::find()
            .select_only()
            .column(Column::AssignmentId)
            .column(Column::StudentId)
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::AssignmentId.is_in(assignment_ids.iter().copied()))
            .into_tuple::<(i64, i64)>()
            .all(&self.db)
            .await
            .map_err(db_error("查询提交记录失败"))
    }

    /// 教师人工批改
    pub async fn review_submission_impl(
        &self,
        school_id: i64,
        id: i64,
        reviewer_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        let Some(existing) = Submissions::find_by_id(id)
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询提交失败"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.score = Set(Some(score));
        model.feedback = Set(feedback);
        model.status = Set(SubmissionStatus::Graded.to_string());
        model.graded_at = Set(Some(chrono::Utc::now().timestamp()));
        model.reviewed_by = Set(Some(reviewer_id));

        let result = model.update(&self.db).await.map_err(db_error("批改提交失败"))?;
        Ok(Some(result.into_submission()))
    }
}
