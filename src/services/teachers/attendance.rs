use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::future::try_join_all;

use super::TeacherService;
use crate::errors::{CampusError, Result};
use crate::models::{
    ApiResponse,
    attendance::{
        entities::AttendanceSummary,
        requests::{AttendanceQuery, AttendanceSheetParams, AttendanceUpsert, MarkAttendanceRequest},
        responses::{AttendanceSheetResponse, AttendanceSheetRow, MarkAttendanceResponse},
    },
    students::entities::Student,
};
use crate::services::{current_user, invalid, today};
use crate::storage::Storage;
use crate::utils::validate::{normalize_grade_level, normalize_section, trim_optional, validate_date};

const MAX_RECORDS: usize = 500;

/// 考勤日期，缺省为今天
pub(crate) fn sheet_date(date: Option<String>) -> Result<String> {
    let date = trim_optional(date).unwrap_or_else(today);
    validate_date(&date).map_err(invalid)?;
    Ok(date)
}

/// 生成班级某天的考勤表，未登记的学生状态为空
pub(crate) async fn build_sheet(
    storage: &Arc<dyn Storage>,
    school_id: i64,
    date: String,
    students: Vec<Student>,
) -> Result<AttendanceSheetResponse> {
    let records = storage
        .list_attendance(
            school_id,
            AttendanceQuery {
                student_ids: Some(students.iter().map(Student::id).collect()),
                from: Some(date.clone()),
                to: Some(date.clone()),
            },
        )
        .await?;
    let mut by_student: HashMap<i64, _> = records
        .into_iter()
        .map(|r| (r.student_id, r))
        .collect();

    let rows: Vec<AttendanceSheetRow> = students
        .into_iter()
        .map(|student| {
            let record = by_student.remove(&student.id());
            AttendanceSheetRow {
                student_id: student.id(),
                student_name: student.user.name,
                grade_level: student.profile.grade_level,
                section: student.profile.section,
                roll_number: student.profile.roll_number,
                status: record.as_ref().map(|r| r.status),
                remarks: record.and_then(|r| r.remarks),
            }
        })
        .collect();

    let summary = AttendanceSummary::from_statuses(rows.iter().filter_map(|r| r.status.as_ref()));
    Ok(AttendanceSheetResponse {
        date,
        rows,
        summary,
    })
}

pub async fn mark_attendance(
    service: &TeacherService,
    request: &HttpRequest,
    body: MarkAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;

    let date = body.date.trim().to_string();
    validate_date(&date).map_err(invalid)?;
    if body.records.is_empty() {
        return Err(CampusError::validation("At least one attendance record is required").into());
    }
    if body.records.len() > MAX_RECORDS {
        return Err(CampusError::validation(format!(
            "At most {MAX_RECORDS} records can be marked at once"
        ))
        .into());
    }

    let mut seen = HashSet::new();
    if let Some(dup) = body.records.iter().find(|r| !seen.insert(r.student_id)) {
        return Err(CampusError::validation(format!(
            "Student {} appears more than once",
            dup.student_id
        ))
        .into());
    }

    // 学生必须属于本校
    let profiles = try_join_all(
        body.records
            .iter()
            .map(|r| storage.get_student_profile(teacher.school_id, r.student_id)),
    )
    .await?;
    if let Some(missing) = body
        .records
        .iter()
        .zip(&profiles)
        .find_map(|(r, p)| p.is_none().then_some(r.student_id))
    {
        return Err(CampusError::not_found(format!("Student {missing} not found")).into());
    }

    let records = body
        .records
        .into_iter()
        .map(|r| AttendanceUpsert {
            student_id: r.student_id,
            status: r.status,
            remarks: trim_optional(r.remarks),
        })
        .collect();
    let marked = storage
        .upsert_attendance(teacher.school_id, &date, teacher.id, records)
        .await?;

    tracing::info!("Teacher {} marked {} attendance records for {}", teacher.id, marked, date);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MarkAttendanceResponse { date, marked },
        "Attendance marked",
    )))
}

pub async fn attendance_sheet(
    service: &TeacherService,
    request: &HttpRequest,
    params: AttendanceSheetParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;

    let date = sheet_date(params.date)?;
    let grade_level = trim_optional(params.grade_level)
        .ok_or_else(|| CampusError::validation("grade_level is required"))?;
    let grade_level = normalize_grade_level(&grade_level).map_err(invalid)?;
    let section = match trim_optional(params.section) {
        Some(section) => Some(normalize_section(&section).map_err(invalid)?),
        None => None,
    };

    let students = storage
        .list_class_students(teacher.school_id, &grade_level, section.as_deref())
        .await?;
    let sheet = build_sheet(&storage, teacher.school_id, date, students).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(sheet, "Attendance sheet retrieved")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_date_defaults_to_today() {
        assert_eq!(sheet_date(None).unwrap(), today());
        assert_eq!(sheet_date(Some(" ".into())).unwrap(), today());
        assert_eq!(
            sheet_date(Some("2026-03-02".into())).unwrap(),
            "2026-03-02"
        );
        assert!(sheet_date(Some("02/03/2026".into())).is_err());
    }
}
