//! 最近动态查询
//!
//! 每种动态对应一张表，按创建时间倒序取前 `limit` 条。
//! 同一时间再按动态 ID 倒序，与合并时的排序一致。

use super::{SeaOrmStorage, db_error};
use crate::entity::prelude::*;
use crate::entity::{
    announcements, assignment_submissions, assignments, attendance, calendar_events, grades,
    student_alerts, student_profiles, teacher_profiles, to_datetime,
};
use crate::errors::Result;
use crate::models::activity::entities::{ActivityItem, ActivityKind};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

impl SeaOrmStorage {
    pub async fn recent_activity_impl(
        &self,
        school_id: i64,
        kind: ActivityKind,
        limit: u64,
    ) -> Result<Vec<ActivityItem>> {
        match kind {
            ActivityKind::StudentEnrolled => self.recent_students(school_id, limit).await,
            ActivityKind::TeacherJoined => self.recent_teachers(school_id, limit).await,
            ActivityKind::AssignmentCreated => self.recent_assignments(school_id, limit).await,
            ActivityKind::SubmissionReceived => self.recent_submissions(school_id, limit).await,
            ActivityKind::GradeRecorded => self.recent_grades(school_id, limit).await,
            ActivityKind::AttendanceMarked => self.recent_attendance(school_id, limit).await,
            ActivityKind::EventScheduled => self.recent_events(school_id, limit).await,
            ActivityKind::AnnouncementPosted => self.recent_announcements(school_id, limit).await,
            ActivityKind::AlertRaised => self.recent_alerts(school_id, limit).await,
        }
    }

    async fn recent_students(&self, school_id: i64, limit: u64) -> Result<Vec<ActivityItem>> {
        let rows = StudentProfiles::find()
            .find_also_related(Users)
            .filter(student_profiles::Column::SchoolId.eq(school_id))
            .order_by_desc(student_profiles::Column::CreatedAt)
            .order_by_desc(student_profiles::Column::UserId)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error("查询最近入学学生失败"))?;

        Ok(rows
            .into_iter()
            .map(|(profile, user)| ActivityItem {
                kind: ActivityKind::StudentEnrolled,
                id: profile.user_id,
                title: user.map(|u| u.name).unwrap_or_default(),
                description: Some(format!(
                    "Enrolled in grade {} section {}",
                    profile.grade_level, profile.section
                )),
                timestamp: to_datetime(profile.created_at),
            })
            .collect())
    }

    async fn recent_teachers(&self, school_id: i64, limit: u64) -> Result<Vec<ActivityItem>> {
        let rows = TeacherProfiles::find()
            .find_also_related(Users)
            .filter(teacher_profiles::Column::SchoolId.eq(school_id))
            .order_by_desc(teacher_profiles::Column::CreatedAt)
            .order_by_desc(teacher_profiles::Column::UserId)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error("查询最近入职教师失败"))?;

        Ok(rows
            .into_iter()
            .map(|(profile, user)| ActivityItem {
                kind: ActivityKind::TeacherJoined,
                id: profile.user_id,
                title: user.map(|u| u.name).unwrap_or_default(),
                description: Some(format!("Joined as {}", profile.department)),
                timestamp: to_datetime(profile.created_at),
            })
            .collect())
    }

    async fn recent_assignments(&self, school_id: i64, limit: u64) -> Result<Vec<ActivityItem>> {
        let rows = Assignments::find()
            .filter(assignments::Column::SchoolId.eq(school_id))
            .order_by_desc(assignments::Column::CreatedAt)
            .order_by_desc(assignments::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error("查询最近作业失败"))?;

        Ok(rows
            .into_iter()
            .map(|a| ActivityItem {
                kind: ActivityKind::AssignmentCreated,
                id: a.id,
                title: a.title,
                description: Some(match a.section {
                    Some(section) => format!("For grade {} section {}", a.grade_level, section),
                    None => format!("For grade {}", a.grade_level),
                }),
                timestamp: to_datetime(a.created_at),
            })
            .collect())
    }

    async fn recent_submissions(&self, school_id: i64, limit: u64) -> Result<Vec<ActivityItem>> {
        let rows = AssignmentSubmissions::find()
            .find_also_related(Users)
            .filter(assignment_submissions::Column::SchoolId.eq(school_id))
            .order_by_desc(assignment_submissions::Column::SubmittedAt)
            .order_by_desc(assignment_submissions::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error("查询最近提交失败"))?;

        Ok(rows
            .into_iter()
            .map(|(s, user)| ActivityItem {
                kind: ActivityKind::SubmissionReceived,
                id: s.id,
                title: user.map(|u| u.name).unwrap_or_default(),
                description: Some(format!(
                    "Submitted assignment #{} ({})",
                    s.assignment_id, s.status
                )),
                timestamp: to_datetime(s.submitted_at),
            })
            .collect())
    }

    async fn recent_grades(&self, school_id: i64, limit: u64) -> Result<Vec<ActivityItem>> {
        let rows = Grades::find()
            .find_also_related(Subjects)
            .filter(grades::Column::SchoolId.eq(school_id))
            .order_by_desc(grades::Column::CreatedAt)
            .order_by_desc(grades::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error("查询最近成绩失败"))?;

        Ok(rows
            .into_iter()
            .map(|(g, subject)| ActivityItem {
                kind: ActivityKind::GradeRecorded,
                id: g.id,
                title: subject.map(|s| s.name).unwrap_or_default(),
                description: Some(format!(
                    "{} {}: {}/{}",
                    g.term, g.exam_type, g.marks_obtained, g.max_marks
                )),
                timestamp: to_datetime(g.created_at),
            })
            .collect())
    }

    /// 考勤按日期聚合为一条动态
    async fn recent_attendance(&self, school_id: i64, limit: u64) -> Result<Vec<ActivityItem>> {
        let rows: Vec<(String, i64, i64, i64)> = Attendance::find()
            .select_only()
            .column(attendance::Column::Date)
            .column_as(attendance::Column::Id.max(), "last_id")
            .column_as(attendance::Column::UpdatedAt.max(), "last_updated")
            .column_as(attendance::Column::Id.count(), "records")
            .filter(attendance::Column::SchoolId.eq(school_id))
            .group_by(attendance::Column::Date)
            .order_by_desc(attendance::Column::UpdatedAt.max())
            .order_by_desc(attendance::Column::Id.max())
            .limit(limit)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("查询最近考勤失败"))?;

        Ok(rows
            .into_iter()
            .map(|(date, last_id, last_updated, records)| ActivityItem {
                kind: ActivityKind::AttendanceMarked,
                id: last_id,
                title: format!("Attendance for {date}"),
                description: Some(format!("{records} records")),
                timestamp: to_datetime(last_updated),
            })
            .collect())
    }

    async fn recent_events(&self, school_id: i64, limit: u64) -> Result<Vec<ActivityItem>> {
        let rows = CalendarEvents::find()
            .filter(calendar_events::Column::SchoolId.eq(school_id))
            .order_by_desc(calendar_events::Column::CreatedAt)
            .order_by_desc(calendar_events::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error("查询最近校历事件失败"))?;

        Ok(rows
            .into_iter()
            .map(|e| ActivityItem {
                kind: ActivityKind::EventScheduled,
                id: e.id,
                title: e.title,
                description: Some(format!("{} on {}", e.event_type, e.start_date)),
                timestamp: to_datetime(e.created_at),
            })
            .collect())
    }

    async fn recent_announcements(&self, school_id: i64, limit: u64) -> Result<Vec<ActivityItem>> {
        let rows = Announcements::find()
            .filter(announcements::Column::SchoolId.eq(school_id))
            .order_by_desc(announcements::Column::CreatedAt)
            .order_by_desc(announcements::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error("查询最近公告失败"))?;

        Ok(rows
            .into_iter()
            .map(|a| ActivityItem {
                kind: ActivityKind::AnnouncementPosted,
                id: a.id,
                title: a.title,
                description: Some(format!("Audience: {}", a.audience)),
                timestamp: to_datetime(a.created_at),
            })
            .collect())
    }

    async fn recent_alerts(&self, school_id: i64, limit: u64) -> Result<Vec<ActivityItem>> {
        let rows = StudentAlerts::find()
            .find_also_related(Users)
            .filter(student_alerts::Column::SchoolId.eq(school_id))
            .order_by_desc(student_alerts::Column::CreatedAt)
            .order_by_desc(student_alerts::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error("查询最近预警失败"))?;

        Ok(rows
            .into_iter()
            .map(|(a, user)| ActivityItem {
                kind: ActivityKind::AlertRaised,
                id: a.id,
                title: user.map(|u| u.name).unwrap_or_default(),
                description: Some(format!("{} alert ({})", a.alert_type, a.severity)),
                timestamp: to_datetime(a.created_at),
            })
            .collect())
    }
}
