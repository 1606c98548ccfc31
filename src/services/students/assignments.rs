use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::autograde::grade_submission;
use super::{StudentService, own_profile};
use crate::errors::{CampusError, Result};
use crate::models::{
    ApiResponse,
    assignments::{
        entities::{Assignment, Submission},
        requests::{AssignmentListParams, AssignmentListQuery, NewSubmission, SubmitAssignmentRequest},
        responses::{StudentAssignment, StudentAssignmentListResponse, SubmitAssignmentResponse},
    },
    students::entities::StudentProfile,
};
use crate::services::current_user;
use crate::storage::Storage;

fn student_view(assignment: Assignment, submission: Option<&Submission>) -> StudentAssignment {
    StudentAssignment {
        assignment: assignment.without_answers(),
        submission_status: submission.map(|s| s.status),
        score: submission.and_then(|s| s.score),
        is_late: submission.map(|s| s.is_late),
    }
}

/// 学生可见的作业：进行中且面向本班，否则视为不存在
async fn visible_assignment(
    storage: &Arc<dyn Storage>,
    profile: &StudentProfile,
    assignment_id: i64,
) -> Result<Assignment> {
    storage
        .get_assignment(profile.school_id, assignment_id)
        .await?
        .filter(|a| a.is_active && a.targets(&profile.grade_level, &profile.section))
        .ok_or_else(|| CampusError::not_found("Assignment not found"))
}

pub async fn list_assignments(
    service: &StudentService,
    request: &HttpRequest,
    params: AssignmentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student = current_user(request)?;
    let profile = own_profile(&storage, &student).await?;
    let (page, size) = params.pagination.normalized();

    let (listing, submissions) = futures_util::try_join!(
        storage.list_assignments(
            student.school_id,
            AssignmentListQuery {
                page: Some(page),
                size: Some(size),
                subject_id: params.subject_id,
                grade_level: Some(profile.grade_level.clone()),
                section: Some(profile.section.clone()),
                ..Default::default()
            },
        ),
        storage.list_student_submissions(student.school_id, student.id),
    )?;

    let by_assignment: HashMap<i64, &Submission> =
        submissions.iter().map(|s| (s.assignment_id, s)).collect();
    let items = listing
        .items
        .into_iter()
        .map(|a| {
            let submission = by_assignment.get(&a.id).copied();
            student_view(a, submission)
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentAssignmentListResponse {
            items,
            pagination: listing.pagination,
        },
        "Assignments retrieved",
    )))
}

pub async fn get_assignment(
    service: &StudentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student = current_user(request)?;
    let profile = own_profile(&storage, &student).await?;

    let assignment = visible_assignment(&storage, &profile, assignment_id).await?;
    let submission = storage
        .get_student_submission(student.school_id, assignment_id, student.id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        student_view(assignment, submission.as_ref()),
        "Assignment retrieved",
    )))
}

pub async fn submit_assignment(
    service: &StudentService,
    request: &HttpRequest,
    assignment_id: i64,
    body: SubmitAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student = current_user(request)?;
    let profile = own_profile(&storage, &student).await?;

    let assignment = visible_assignment(&storage, &profile, assignment_id).await?;

    // 教师人工批改后锁定
    if let Some(existing) = storage
        .get_student_submission(student.school_id, assignment_id, student.id)
        .await?
        && existing.is_locked()
    {
        return Err(CampusError::conflict("Submission has already been graded").into());
    }

    // 只保留题目对应的作答
    let mut answers = body.answers;
    answers.retain(|id, _| assignment.questions.iter().any(|q| &q.id == id));

    let outcome = grade_submission(&assignment.questions, &answers);
    let is_late = assignment.is_overdue_at(chrono::Utc::now());

    let submission = storage
        .upsert_submission(NewSubmission {
            school_id: student.school_id,
            assignment_id,
            student_id: student.id,
            answers,
            auto_score: outcome.auto_score,
            status: outcome.status,
            is_late,
        })
        .await?;

    tracing::info!(
        "Student {} submitted assignment {} (auto score {}, {})",
        student.id,
        assignment_id,
        outcome.auto_score,
        outcome.status
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        SubmitAssignmentResponse {
            submission,
            results: outcome.results,
        },
        "Assignment submitted",
    )))
}
