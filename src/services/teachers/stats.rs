//! 看板统计的纯计算部分

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{
    alerts::entities::AlertSeverity,
    assignments::entities::Assignment,
    attendance::entities::{AttendanceRecord, AttendanceSummary},
    grades::entities::{GradeRecord, GradeView, average_percentage, percentage},
    reports::responses::{AlertCount, ClassOverview, RosterEntry, SubjectPerformance},
    students::entities::Student,
};

/// 统计窗口（天）
pub(crate) const WINDOW_DAYS: i64 = 30;

/// 统计窗口的起始日期（含今天共 `days` 天）
pub(crate) fn window_start(days: i64) -> String {
    (chrono::Utc::now().date_naive() - chrono::Duration::days(days - 1))
        .format("%Y-%m-%d")
        .to_string()
}

fn ratio(part: u64, whole: u64) -> Option<f64> {
    (whole > 0).then(|| percentage(part as f64, whole as f64))
}

/// 班主任名册
pub(crate) fn roster_entries(
    students: Vec<Student>,
    attendance: &[AttendanceRecord],
    grades: &[GradeRecord],
) -> Vec<RosterEntry> {
    let mut statuses: HashMap<i64, Vec<_>> = HashMap::new();
    for record in attendance {
        statuses.entry(record.student_id).or_default().push(record.status);
    }
    let mut by_student: HashMap<i64, Vec<&GradeRecord>> = HashMap::new();
    for grade in grades {
        by_student.entry(grade.student_id).or_default().push(grade);
    }

    students
        .into_iter()
        .map(|student| {
            let id = student.id();
            let attendance_rate = statuses
                .get(&id)
                .and_then(|s| AttendanceSummary::from_statuses(s.iter()).rate);
            let average_grade = by_student
                .get(&id)
                .and_then(|g| average_percentage(g.iter().copied()));
            RosterEntry {
                student_id: id,
                name: student.user.name,
                email: student.user.email,
                roll_number: student.profile.roll_number,
                attendance_rate,
                average_grade,
            }
        })
        .collect()
}

/// 按年级、班级汇总（协调员视图）
pub(crate) fn class_overviews(
    students: &[Student],
    attendance: &[AttendanceRecord],
    assignments: &[Assignment],
    submissions: &[(i64, i64)],
    grades: &[GradeRecord],
) -> Vec<ClassOverview> {
    let mut classes: BTreeMap<(String, String), HashSet<i64>> = BTreeMap::new();
    for student in students {
        classes
            .entry((
                student.profile.grade_level.clone(),
                student.profile.section.clone(),
            ))
            .or_default()
            .insert(student.id());
    }
    let submitted: HashSet<(i64, i64)> = submissions.iter().copied().collect();

    classes
        .into_iter()
        .map(|((grade_level, section), members)| {
            let statuses: Vec<_> = attendance
                .iter()
                .filter(|r| members.contains(&r.student_id))
                .map(|r| r.status)
                .collect();
            let targeted: Vec<i64> = assignments
                .iter()
                .filter(|a| a.targets(&grade_level, &section))
                .map(|a| a.id)
                .collect();
            let expected = targeted.len() as u64 * members.len() as u64;
            let done = targeted
                .iter()
                .flat_map(|aid| members.iter().map(move |sid| (*aid, *sid)))
                .filter(|key| submitted.contains(key))
                .count() as u64;

            ClassOverview {
                students: members.len() as u64,
                attendance_rate: AttendanceSummary::from_statuses(statuses.iter()).rate,
                assignments: targeted.len() as u64,
                submission_rate: ratio(done, expected),
                average_grade: average_percentage(
                    grades.iter().filter(|g| members.contains(&g.student_id)),
                ),
                grade_level,
                section,
            }
        })
        .collect()
}

/// 各科成绩表现，按科目名称排序
pub(crate) fn subject_performance(grades: &[GradeView]) -> Vec<SubjectPerformance> {
    let mut subjects: HashMap<i64, (String, Vec<&GradeRecord>)> = HashMap::new();
    for view in grades {
        subjects
            .entry(view.grade.subject_id)
            .or_insert_with(|| (view.subject_name.clone(), Vec::new()))
            .1
            .push(&view.grade);
    }

    let mut result: Vec<SubjectPerformance> = subjects
        .into_iter()
        .map(|(subject_id, (subject_name, records))| SubjectPerformance {
            subject_id,
            subject_name,
            grades_recorded: records.len() as u64,
            average_grade: average_percentage(records.iter().copied()),
        })
        .collect();
    result.sort_by(|a, b| {
        a.subject_name
            .cmp(&b.subject_name)
            .then(a.subject_id.cmp(&b.subject_id))
    });
    result
}

/// 未处理预警数，缺失的严重程度补 0
pub(crate) fn alert_counts(counts: &[(AlertSeverity, u64)]) -> Vec<AlertCount> {
    AlertSeverity::all()
        .into_iter()
        .map(|severity| AlertCount {
            severity,
            open: counts
                .iter()
                .filter(|(s, _)| *s == severity)
                .map(|(_, n)| *n)
                .sum(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::entities::AttendanceStatus;
    use crate::models::students::entities::StudentProfile;
    use crate::models::users::entities::{User, UserRole};
    use chrono::Utc;

    fn student(id: i64, grade: &str, section: &str) -> Student {
        let now = Utc::now();
        Student {
            user: User {
                id,
                school_id: 1,
                email: format!("s{id}@school.test"),
                password_hash: String::new(),
                role: UserRole::Student,
                name: format!("Student {id}"),
                is_active: true,
                last_login: None,
                created_at: now,
                updated_at: now,
            },
            profile: StudentProfile {
                id,
                user_id: id,
                school_id: 1,
                admission_number: None,
                grade_level: grade.into(),
                section: section.into(),
                roll_number: None,
                date_of_birth: None,
                guardian_name: None,
                guardian_phone: None,
                guardian_email: None,
                created_at: now,
                updated_at: now,
            },
        }
    }

    fn attendance(student_id: i64, status: AttendanceStatus) -> AttendanceRecord {
        let now = Utc::now();
        AttendanceRecord {
            id: student_id,
            school_id: 1,
            student_id,
            date: "2026-03-02".into(),
            status,
            marked_by: 9,
            remarks: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn grade(student_id: i64, subject_id: i64, obtained: f64) -> GradeRecord {
        let now = Utc::now();
        GradeRecord {
            id: student_id * 10 + subject_id,
            school_id: 1,
            student_id,
            subject_id,
            teacher_id: 9,
            term: "T1".into(),
            exam_type: "quiz".into(),
            marks_obtained: obtained,
            max_marks: 100.0,
            remarks: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn assignment(id: i64, grade: &str, section: Option<&str>) -> Assignment {
        let now = Utc::now();
        Assignment {
            id,
            school_id: 1,
            teacher_id: 9,
            subject_id: 1,
            title: "HW".into(),
            description: None,
            grade_level: grade.into(),
            section: section.map(str::to_string),
            due_date: None,
            total_marks: 10.0,
            questions: Vec::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_roster_rates() {
        let students = vec![student(1, "10", "A"), student(2, "10", "A")];
        let records = [
            attendance(1, AttendanceStatus::Present),
            attendance(1, AttendanceStatus::Absent),
        ];
        let grades = [grade(1, 1, 80.0), grade(1, 2, 60.0)];
        let roster = roster_entries(students, &records, &grades);
        assert_eq!(roster[0].attendance_rate, Some(50.0));
        assert_eq!(roster[0].average_grade, Some(70.0));
        assert_eq!(roster[1].attendance_rate, None);
        assert_eq!(roster[1].average_grade, None);
    }

    #[test]
    fn test_class_overview_submission_rate() {
        let students = vec![
            student(1, "10", "A"),
            student(2, "10", "A"),
            student(3, "10", "B"),
        ];
        // 一份面向整个年级，一份只给 A 班
        let assignments = [assignment(100, "10", None), assignment(101, "10", Some("A"))];
        let submissions = [(100, 1), (101, 1), (100, 3)];
        let overview = class_overviews(&students, &[], &assignments, &submissions, &[]);

        assert_eq!(overview.len(), 2);
        let a = &overview[0];
        assert_eq!((a.grade_level.as_str(), a.section.as_str()), ("10", "A"));
        assert_eq!(a.students, 2);
        assert_eq!(a.assignments, 2);
        assert_eq!(a.submission_rate, Some(50.0));
        assert_eq!(a.attendance_rate, None);

        let b = &overview[1];
        assert_eq!(b.assignments, 1);
        assert_eq!(b.submission_rate, Some(100.0));
    }

    #[test]
    fn test_alert_counts_fill_missing() {
        let counts = alert_counts(&[(AlertSeverity::High, 2)]);
        assert_eq!(counts.len(), 4);
        assert_eq!(counts[2].severity, AlertSeverity::High);
        assert_eq!(counts[2].open, 2);
        assert_eq!(counts[0].open, 0);
    }

    #[test]
    fn test_window_start_is_inclusive() {
        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(window_start(1), today);
    }
}
