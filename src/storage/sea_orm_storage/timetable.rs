use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::subjects::Entity as Subjects;
use crate::entity::timetables::{ActiveModel, Column, Entity as Timetables};
use crate::entity::users::{self, Entity as Users};
use crate::errors::Result;
use crate::models::timetable::{entities::TimetableEntry, requests::TimetableSlotInput};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 获取班级课表（按星期、节次排序）
    pub async fn get_timetable_impl(
        &self,
        school_id: i64,
        grade_level: &str,
        section: &str,
    ) -> Result<Vec<TimetableEntry>> {
        load_timetable(&self.db, school_id, grade_level, section).await
    }

    /// 整体替换班级课表
    pub async fn replace_timetable_impl(
        &self,
        school_id: i64,
        grade_level: &str,
        section: &str,
        slots: Vec<TimetableSlotInput>,
    ) -> Result<Vec<TimetableEntry>> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;

        Timetables::delete_many()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::GradeLevel.eq(grade_level))
            .filter(Column::Section.eq(section))
            .exec(&txn)
            .await
            .map_err(db_error("清空课表失败"))?;

        for slot in slots {
            let model = ActiveModel {
                school_id: Set(school_id),
                grade_level: Set(grade_level.to_string()),
                section: Set(section.to_string()),
                day_of_week: Set(slot.day_of_week),
                period: Set(slot.period),
                subject_id: Set(slot.subject_id),
                teacher_id: Set(slot.teacher_id),
                start_time: Set(slot.start_time),
                end_time: Set(slot.end_time),
                room: Set(slot.room),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            model.insert(&txn).await.map_err(db_error("写入课表失败"))?;
        }

        let entries = load_timetable(&txn, school_id, grade_level, section).await?;
        txn.commit().await.map_err(db_error("提交事务失败"))?;

        Ok(entries)
    }
}

async fn load_timetable<C: ConnectionTrait>(
    db: &C,
    school_id: i64,
    grade_level: &str,
    section: &str,
) -> Result<Vec<TimetableEntry>> {
    let rows = Timetables::find()
        .find_also_related(Subjects)
        .filter(Column::SchoolId.eq(school_id))
        .filter(Column::GradeLevel.eq(grade_level))
        .filter(Column::Section.eq(section))
        .order_by_asc(Column::DayOfWeek)
        .order_by_asc(Column::Period)
        .all(db)
        .await
        .map_err(db_error("查询课表失败"))?;

    let mut teacher_ids: Vec<i64> = rows.iter().filter_map(|(s, _)| s.teacher_id).collect();
    teacher_ids.sort_unstable();
    teacher_ids.dedup();
    let names: HashMap<i64, String> = if teacher_ids.is_empty() {
        HashMap::new()
    } else {
        Users::find()
            .select_only()
            .column(users::Column::Id)
            .column(users::Column::Name)
            .filter(users::Column::Id.is_in(teacher_ids))
            .into_tuple::<(i64, String)>()
            .all(db)
            .await
            .map_err(db_error("查询教师姓名失败"))?
            .into_iter()
            .collect()
    };

    Ok(rows
        .into_iter()
        .map(|(slot, subject)| {
            let teacher_name = slot.teacher_id.and_then(|id| names.get(&id).cloned());
            TimetableEntry {
                slot: slot.into_slot(),
                subject_name: subject.map(|s| s.name).unwrap_or_default(),
                teacher_name,
            }
        })
        .collect())
}
