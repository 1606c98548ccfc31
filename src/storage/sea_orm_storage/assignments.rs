//! 作业存储操作

use super::{SeaOrmStorage, db_error, page_and_size};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{CampusError, Result};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, AssignmentUpdate, NewAssignment},
        responses::AssignmentListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(&self, req: NewAssignment) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();
        let questions = serde_json::to_string(&req.questions)
            .map_err(|e| CampusError::serialization(format!("序列化题目失败: {e}")))?;

        let model = ActiveModel {
            school_id: Set(req.school_id),
            teacher_id: Set(req.teacher_id),
            subject_id: Set(req.subject_id),
            title: Set(req.title),
            description: Set(req.description),
            grade_level: Set(req.grade_level),
            section: Set(req.section),
            due_date: Set(req.due_date),
            total_marks: Set(req.total_marks),
            questions: Set(questions),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("创建作业失败"))?;
        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_impl(&self, school_id: i64, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询作业失败"))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 分页列出作业
    pub async fn list_assignments_impl(
        &self,
        school_id: i64,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let (page, size) = page_and_size(query.page, query.size);

        let mut select = Assignments::find().filter(Column::SchoolId.eq(school_id));

        if !query.include_inactive {
            select = select.filter(Column::IsActive.eq(true));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(ref grade_level) = query.grade_level {
            select = select.filter(Column::GradeLevel.eq(grade_level.as_str()));
        }
        // 面向整个年级的作业对所有班可见
        if let Some(ref section) = query.section {
            select = select.filter(
                Condition::any()
                    .add(Column::Section.eq(section.as_str()))
                    .add(Column::Section.is_null()),
            );
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_error("查询作业总数失败"))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_error("查询作业列表失败"))?;

        Ok(AssignmentListResponse {
            items: rows.into_iter().map(|m| m.into_assignment()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn list_active_assignments_impl(
        &self,
        school_id: i64,
        grade_level: Option<&str>,
    ) -> Result<Vec<Assignment>> {
        let mut select = Assignments::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::IsActive.eq(true));
        if let Some(grade_level) = grade_level {
            select = select.filter(Column::GradeLevel.eq(grade_level));
        }

        let rows = select
            .order_by_asc(Column::DueDate)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询作业列表失败"))?;

        Ok(rows.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 更新作业
    pub async fn update_assignment_impl(
        &self,
        school_id: i64,
        id: i64,
        update: AssignmentUpdate,
    ) -> Result<Option<Assignment>> {
        let Some(existing) = Assignments::find_by_id(id)
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询作业失败"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(due_date) = update.due_date {
            model.due_date = Set(Some(due_date));
        }
        if let Some(total_marks) = update.total_marks {
            model.total_marks = Set(total_marks);
        }
        if let Some(questions) = update.questions {
            let questions = serde_json::to_string(&questions)
                .map_err(|e| CampusError::serialization(format!("序列化题目失败: {e}")))?;
            model.questions = Set(questions);
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model.update(&self.db).await.map_err(db_error("更新作业失败"))?;
        Ok(Some(result.into_assignment()))
    }

    pub async fn count_active_assignments_impl(&self, school_id: i64) -> Result<u64> {
        Assignments::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(db_error("统计作业数量失败"))
    }
}
