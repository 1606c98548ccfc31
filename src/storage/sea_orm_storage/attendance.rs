//! 考勤存储操作

use super::{SeaOrmStorage, db_error};
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance};
use crate::errors::Result;
use crate::models::attendance::{
    entities::AttendanceRecord,
    requests::{AttendanceQuery, AttendanceUpsert},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 批量写入考勤（同一学生同一天只保留一条）
    pub async fn upsert_attendance_impl(
        &self,
        school_id: i64,
        date: &str,
        marked_by: i64,
        records: Vec<AttendanceUpsert>,
    ) -> Result<usize> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;

        let mut written = 0;
        for record in records {
            let existing = Attendance::find()
                .filter(Column::SchoolId.eq(school_id))
                .filter(Column::StudentId.eq(record.student_id))
                .filter(Column::Date.eq(date))
                .one(&txn)
                .await
                .map_err(db_error("查询考勤失败"))?;

            let mut model = match existing {
                Some(found) => found.into(),
                None => ActiveModel {
                    school_id: Set(school_id),
                    student_id: Set(record.student_id),
                    date: Set(date.to_string()),
                    created_at: Set(now),
                    ..Default::default()
                },
            };
            model.status = Set(record.status.to_string());
            model.marked_by = Set(marked_by);
            model.remarks = Set(record.remarks);
            model.updated_at = Set(now);

            model.save(&txn).await.map_err(db_error("保存考勤失败"))?;
            written += 1;
        }

        txn.commit().await.map_err(db_error("提交事务失败"))?;
        Ok(written)
    }

    /// 查询考勤（日期为闭区间）
    pub async fn list_attendance_impl(
        &self,
        school_id: i64,
        query: AttendanceQuery,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut select = Attendance::find().filter(Column::SchoolId.eq(school_id));

        if let Some(student_ids) = query.student_ids {
            if student_ids.is_empty() {
                return Ok(Vec::new());
            }
            select = select.filter(Column::StudentId.is_in(student_ids));
        }
        // YYYY-MM-DD 字符串按字典序即按日期排序
        if let Some(ref from) = query.from {
            select = select.filter(Column::Date.gte(from.as_str()));
        }
        if let Some(ref to) = query.to {
            select = select.filter(Column::Date.lte(to.as_str()));
        }

        let rows = select
            .order_by_desc(Column::Date)
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(db_error("查询考勤失败"))?;

        Ok(rows.into_iter().map(|m| m.into_record()).collect())
    }
}
