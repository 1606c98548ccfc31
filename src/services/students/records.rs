use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, own_profile};
use crate::errors::{CampusError, Result};
use crate::models::{
    ApiResponse,
    attendance::{
        entities::AttendanceSummary,
        requests::{AttendanceQuery, AttendanceRangeParams},
        responses::StudentAttendanceResponse,
    },
    grades::requests::{GradeListParams, GradeListQuery},
};
use crate::services::{current_user, invalid};
use crate::utils::validate::{parse_date, trim_optional};

/// 校验日期区间（闭区间，起止均可省略）
pub(crate) fn date_range(
    from: Option<String>,
    to: Option<String>,
) -> Result<(Option<String>, Option<String>)> {
    let from = trim_optional(from);
    let to = trim_optional(to);
    let start = from.as_deref().map(parse_date).transpose().map_err(invalid)?;
    let end = to.as_deref().map(parse_date).transpose().map_err(invalid)?;
    if let (Some(start), Some(end)) = (start, end)
        && end < start
    {
        return Err(CampusError::validation("'to' must not be before 'from'"));
    }
    Ok((from, to))
}

pub async fn my_grades(
    service: &StudentService,
    request: &HttpRequest,
    params: GradeListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student = current_user(request)?;

    let grades = storage
        .list_grades(
            student.school_id,
            GradeListQuery {
                student_id: Some(student.id),
                subject_id: params.subject_id,
                teacher_id: None,
                term: trim_optional(params.term),
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(grades, "Grades retrieved")))
}

pub async fn my_attendance(
    service: &StudentService,
    request: &HttpRequest,
    params: AttendanceRangeParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student = current_user(request)?;
    let (from, to) = date_range(params.from, params.to)?;

    let records = storage
        .list_attendance(
            student.school_id,
            AttendanceQuery {
                student_ids: Some(vec![student.id]),
                from,
                to,
            },
        )
        .await?;
    let summary = AttendanceSummary::from_statuses(records.iter().map(|r| &r.status));

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentAttendanceResponse { records, summary },
        "Attendance retrieved",
    )))
}

pub async fn my_timetable(service: &StudentService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student = current_user(request)?;
    let profile = own_profile(&storage, &student).await?;

    let timetable = storage
        .get_timetable(student.school_id, &profile.grade_level, &profile.section)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(timetable, "Timetable retrieved")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range() {
        assert_eq!(date_range(None, None).unwrap(), (None, None));
        let (from, to) = date_range(Some("2026-03-01".into()), Some("2026-03-31".into())).unwrap();
        assert_eq!(from.as_deref(), Some("2026-03-01"));
        assert_eq!(to.as_deref(), Some("2026-03-31"));
        assert!(date_range(Some("2026-03-31".into()), Some("2026-03-01".into())).is_err());
        assert!(date_range(Some("2026-3-1".into()), None).is_err());
    }
}
