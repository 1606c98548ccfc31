use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;
use std::collections::HashSet;

use super::AdminService;
use crate::errors::{CampusError, Result};
use crate::models::{
    ApiResponse,
    audit::entities::NewAuditLog,
    timetable::requests::{TimetableParams, TimetableSlotInput, UpsertTimetableRequest},
};
use crate::services::{current_user, invalid, record_audit};
use crate::utils::validate::{
    normalize_grade_level, normalize_section, trim_optional, validate_time,
};

/// 校验并规范化节次：星期 1-7、节次为正、时间合法且开始早于结束、同一时段不重复
///
/// 返回去掉首尾空白后的节次，入库的就是校验过的值。
fn normalize_slots(slots: Vec<TimetableSlotInput>) -> Result<Vec<TimetableSlotInput>> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::with_capacity(slots.len());
    for mut slot in slots {
        slot.start_time = slot.start_time.trim().to_string();
        slot.end_time = slot.end_time.trim().to_string();
        slot.room = trim_optional(slot.room);

        if !(1..=7).contains(&slot.day_of_week) {
            return Err(CampusError::validation("day_of_week must be between 1 and 7"));
        }
        if slot.period < 1 {
            return Err(CampusError::validation("period must be positive"));
        }
        validate_time(&slot.start_time).map_err(invalid)?;
        validate_time(&slot.end_time).map_err(invalid)?;
        // HH:MM 定长，字符串比较即时间比较
        if slot.start_time >= slot.end_time {
            return Err(CampusError::validation("start_time must be before end_time"));
        }
        if !seen.insert((slot.day_of_week, slot.period)) {
            return Err(CampusError::validation(format!(
                "Duplicate slot for day {} period {}",
                slot.day_of_week, slot.period
            )));
        }
        normalized.push(slot);
    }
    Ok(normalized)
}

pub async fn get_timetable(
    service: &AdminService,
    request: &HttpRequest,
    params: TimetableParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let grade_level = normalize_grade_level(&params.grade_level).map_err(invalid)?;
    let section = normalize_section(&params.section).map_err(invalid)?;
    let entries = storage
        .get_timetable(user.school_id, &grade_level, &section)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(entries, "Timetable retrieved")))
}

pub async fn upsert_timetable(
    service: &AdminService,
    request: &HttpRequest,
    body: UpsertTimetableRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    let grade_level = normalize_grade_level(&body.grade_level).map_err(invalid)?;
    let section = normalize_section(&body.section).map_err(invalid)?;
    let slots = normalize_slots(body.slots)?;

    // 科目与教师必须属于本校
    for subject_id in slots.iter().map(|s| s.subject_id).collect::<HashSet<_>>() {
        if storage
            .get_subject(admin.school_id, subject_id)
            .await?
            .is_none()
        {
            return Err(CampusError::validation(format!("Unknown subject {subject_id}")).into());
        }
    }
    for teacher_id in slots
        .iter()
        .filter_map(|s| s.teacher_id)
        .collect::<HashSet<_>>()
    {
        if storage
            .get_teacher_profile(admin.school_id, teacher_id)
            .await?
            .is_none()
        {
            return Err(CampusError::validation(format!("Unknown teacher {teacher_id}")).into());
        }
    }

    let slot_count = slots.len();
    let entries = storage
        .replace_timetable(admin.school_id, &grade_level, &section, slots)
        .await?;

    record_audit(
        &storage,
        NewAuditLog::new(admin.school_id, admin.id, "timetable.replace", "timetable").details(
            json!({ "grade_level": grade_level, "section": section, "slots": slot_count }),
        ),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(entries, "Timetable saved")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: i32, period: i32, start: &str, end: &str) -> TimetableSlotInput {
        TimetableSlotInput {
            day_of_week: day,
            period,
            subject_id: 1,
            teacher_id: None,
            start_time: start.into(),
            end_time: end.into(),
            room: None,
        }
    }

    #[test]
    fn test_valid_week() {
        let slots = vec![slot(1, 1, "08:00", "08:45"), slot(1, 2, "08:50", "09:35")];
        assert_eq!(normalize_slots(slots).unwrap().len(), 2);
    }

    #[test]
    fn test_times_and_room_are_trimmed() {
        let mut padded = slot(3, 4, " 10:00 ", "10:45\t");
        padded.room = Some("  ".into());
        let slots = normalize_slots(vec![padded]).unwrap();
        assert_eq!(slots[0].start_time, "10:00");
        assert_eq!(slots[0].end_time, "10:45");
        assert_eq!(slots[0].room, None);
    }

    #[test]
    fn test_rejects_bad_slots() {
        assert!(normalize_slots(vec![slot(8, 1, "08:00", "08:45")]).is_err());
        assert!(normalize_slots(vec![slot(1, 0, "08:00", "08:45")]).is_err());
        assert!(normalize_slots(vec![slot(1, 1, "09:00", "08:45")]).is_err());
        assert!(normalize_slots(vec![slot(1, 1, "8:00", "08:45")]).is_err());
        assert!(
            normalize_slots(vec![slot(2, 3, "08:00", "08:45"), slot(2, 3, "09:00", "09:45")]).is_err()
        );
    }
}
