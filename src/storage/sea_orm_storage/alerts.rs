use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::student_alerts::{ActiveModel, Column, Entity as StudentAlerts};
use crate::entity::student_profiles::{self, Entity as StudentProfiles};
use crate::entity::users::Entity as Users;
use crate::errors::Result;
use crate::models::alerts::{
    entities::{AlertSeverity, AlertView, StudentAlert},
    requests::{AlertListQuery, NewAlert},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn create_alert_impl(&self, req: NewAlert) -> Result<StudentAlert> {
        let model = ActiveModel {
            school_id: Set(req.school_id),
            student_id: Set(req.student_id),
            raised_by: Set(req.raised_by),
            alert_type: Set(req.alert_type.to_string()),
            severity: Set(req.severity.to_string()),
            message: Set(req.message),
            is_resolved: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            resolved_at: Set(None),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("创建预警失败"))?;
        Ok(result.into_alert())
    }

    /// 列出预警（带学生姓名和班级）
    pub async fn list_alerts_impl(
        &self,
        school_id: i64,
        query: AlertListQuery,
    ) -> Result<Vec<AlertView>> {
        let mut select = StudentAlerts::find()
            .find_also_related(Users)
            .filter(Column::SchoolId.eq(school_id));

        if let Some(resolved) = query.resolved {
            select = select.filter(Column::IsResolved.eq(resolved));
        }
        if let Some(severity) = query.severity {
            select = select.filter(Column::Severity.eq(severity.to_string()));
        }
        if let Some(student_ids) = query.student_ids {
            if student_ids.is_empty() {
                return Ok(Vec::new());
            }
            select = select.filter(Column::StudentId.is_in(student_ids));
        }

        let rows = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询预警失败"))?;

        let mut student_ids: Vec<i64> = rows.iter().map(|(a, _)| a.student_id).collect();
        student_ids.sort_unstable();
        student_ids.dedup();
        let classes: HashMap<i64, (String, String)> = if student_ids.is_empty() {
            HashMap::new()
        } else {
            StudentProfiles::find()
                .select_only()
                .column(student_profiles::Column::UserId)
                .column(student_profiles::Column::GradeLevel)
                .column(student_profiles::Column::Section)
                .filter(student_profiles::Column::UserId.is_in(student_ids))
                .into_tuple::<(i64, String, String)>()
                .all(&self.db)
                .await
                .map_err(db_error("查询学生班级失败"))?
                .into_iter()
                .map(|(id, grade, section)| (id, (grade, section)))
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|(alert, student)| {
                let class = classes.get(&alert.student_id);
                AlertView {
                    student_name: student.map(|u| u.name).unwrap_or_default(),
                    grade_level: class.map(|(g, _)| g.clone()),
                    section: class.map(|(_, s)| s.clone()),
                    alert: alert.into_alert(),
                }
            })
            .collect())
    }

    /// 标记预警为已处理（重复处理保持原处理时间）
    pub async fn resolve_alert_impl(
        &self,
        school_id: i64,
        id: i64,
    ) -> Result<Option<StudentAlert>> {
        let Some(existing) = StudentAlerts::find_by_id(id)
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询预警失败"))?
        else {
            return Ok(None);
        };

        if existing.is_resolved {
            return Ok(Some(existing.into_alert()));
        }

        let mut model: ActiveModel = existing.into();
        model.is_resolved = Set(true);
        model.resolved_at = Set(Some(chrono::Utc::now().timestamp()));

        let result = model.update(&self.db).await.map_err(db_error("处理预警失败"))?;
        Ok(Some(result.into_alert()))
    }

    /// 按严重程度统计未处理预警，没有预警的级别计为 0
    pub async fn count_open_alerts_impl(&self, school_id: i64) -> Result<Vec<(AlertSeverity, u64)>> {
        let rows: Vec<(String, i64)> = StudentAlerts::find()
            .select_only()
            .column(Column::Severity)
            .column_as(Column::Id.count(), "count")
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::IsResolved.eq(false))
            .group_by(Column::Severity)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("统计预警失败"))?;

        let counts: HashMap<String, i64> = rows.into_iter().collect();
        Ok(AlertSeverity::all()
            .into_iter()
            .map(|severity| {
                let count = counts.get(&severity.to_string()).copied().unwrap_or(0);
                (severity, count.max(0) as u64)
            })
            .collect())
    }
}
