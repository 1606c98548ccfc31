#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{Value, json};

use campus_next::models::{subjects::requests::CreateSubjectRequest, teachers::entities::Department};
use common::{TestContext, auth_cookie};

async fn science_subject(ctx: &TestContext) -> i64 {
    ctx.storage
        .create_subject(
            ctx.school.id,
            CreateSubjectRequest {
                name: "Science".to_string(),
                code: "SCI".to_string(),
                grade_level: None,
            },
        )
        .await
        .expect("create subject")
        .id
}

#[actix_web::test]
async fn test_submit_grade_and_review_flow() {
    let ctx = TestContext::new("grading").await;
    let subject_id = science_subject(&ctx).await;
    let teacher = ctx
        .teacher(ctx.school.id, "sci@school.edu", Department::SubjectTeacher, None)
        .await;
    let student = ctx.student(ctx.school.id, "pupil@school.edu", "8", "B").await;
    let app = init_app!(ctx);

    // 教师布置作业：三道客观题加一道问答题，总分 10
    let req = test::TestRequest::post()
        .uri("/api/protected/teachers/assignments")
        .cookie(auth_cookie(&teacher.user))
        .set_json(json!({
            "subject_id": subject_id,
            "title": "Matter and energy",
            "grade_level": "8",
            "section": "b",
            "questions": [
                { "id": "q1", "type": "multiple_choice", "prompt": "Boiling point of water?",
                  "options": ["90", "100", "110"], "correct_answer": "100", "marks": 2 },
                { "id": "q2", "type": "multi_select", "prompt": "Which are gases?",
                  "options": ["Oxygen", "Iron", "Helium"], "correct_answer": ["Oxygen", "Helium"], "marks": 3 },
                { "id": "q3", "type": "fill_blank", "prompt": "2 + 3 = ?",
                  "correct_answer": "5", "marks": 1 },
                { "id": "q4", "type": "essay", "prompt": "Explain evaporation.", "marks": 4 }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total_marks"], 10.0);
    let assignment_id = body["data"]["id"].as_i64().expect("assignment id");

    // 学生作答，格式差异不影响判分，多余的作答被丢弃
    let req = test::TestRequest::post()
        .uri(&format!(
            "/api/protected/students/assignments/{assignment_id}/submit"
        ))
        .cookie(auth_cookie(&student.user))
        .set_json(json!({
            "answers": {
                "q1": " 100 ",
                "q2": "helium, oxygen",
                "q3": 5.0,
                "q4": "Water turns into vapour when heated.",
                "q9": "not a question"
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    let submission = &body["data"]["submission"];
    assert_eq!(submission["auto_score"], 6.0);
    assert_eq!(submission["status"], "pending_review");
    assert_eq!(submission["is_late"], false);
    assert!(submission["answers"].get("q9").is_none());

    let results = body["data"]["results"].as_array().expect("results");
    assert_eq!(results.len(), 4);
    assert_eq!(results[0]["correct"], true);
    assert_eq!(results[1]["correct"], true);
    assert_eq!(results[2]["correct"], true);
    assert!(results[3]["correct"].is_null());
    let submission_id = submission["id"].as_i64().expect("submission id");

    // 超出总分的批改被拒绝
    let req = test::TestRequest::put()
        .uri(&format!(
            "/api/protected/teachers/submissions/{submission_id}/review"
        ))
        .cookie(auth_cookie(&teacher.user))
        .set_json(json!({ "score": 11 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!(
            "/api/protected/teachers/submissions/{submission_id}/review"
        ))
        .cookie(auth_cookie(&teacher.user))
        .set_json(json!({ "score": 9, "feedback": "Good explanation" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "graded");
    assert_eq!(body["data"]["score"], 9.0);

    // 批改后不能再次提交
    let req = test::TestRequest::post()
        .uri(&format!(
            "/api/protected/students/assignments/{assignment_id}/submit"
        ))
        .cookie(auth_cookie(&student.user))
        .set_json(json!({ "answers": { "q1": "90" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_objective_only_assignment_is_graded_and_marked_late() {
    let ctx = TestContext::new("grading-late").await;
    let subject_id = science_subject(&ctx).await;
    let teacher = ctx
        .teacher(ctx.school.id, "late@school.edu", Department::SubjectTeacher, None)
        .await;
    let student = ctx.student(ctx.school.id, "slow@school.edu", "8", "B").await;
    let other_class = ctx.student(ctx.school.id, "elsewhere@school.edu", "8", "C").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/protected/teachers/assignments")
        .cookie(auth_cookie(&teacher.user))
        .set_json(json!({
            "subject_id": subject_id,
            "title": "Quick check",
            "grade_level": "8",
            "section": "B",
            "due_date": "2020-01-01T00:00:00Z",
            "questions": [
                { "id": "t1", "type": "true_false", "prompt": "Ice is solid water.",
                  "correct_answer": true, "marks": 1 },
                { "id": "t2", "type": "short_answer", "prompt": "Symbol for gold?",
                  "correct_answer": "Au", "marks": 1 }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let assignment_id = body["data"]["id"].as_i64().expect("assignment id");
    let submit_uri = format!("/api/protected/students/assignments/{assignment_id}/submit");

    // 其他班级的学生看不到这份作业
    let req = test::TestRequest::post()
        .uri(&submit_uri)
        .cookie(auth_cookie(&other_class.user))
        .set_json(json!({ "answers": { "t1": true } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri(&submit_uri)
        .cookie(auth_cookie(&student.user))
        .set_json(json!({ "answers": { "t1": "TRUE", "t2": "ag" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    let submission = &body["data"]["submission"];
    assert_eq!(submission["auto_score"], 1.0);
    assert_eq!(submission["status"], "graded");
    assert_eq!(submission["is_late"], true);

    // 未批改前可以重新提交，以最后一次为准
    let req = test::TestRequest::post()
        .uri(&submit_uri)
        .cookie(auth_cookie(&student.user))
        .set_json(json!({ "answers": { "t1": true, "t2": " au " } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["submission"]["auto_score"], 2.0);
}
