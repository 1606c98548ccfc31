use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdminService;
use crate::models::{
    ApiResponse,
    audit::entities::{AuditLogListParams, AuditLogListQuery},
};
use crate::services::current_user;
use crate::utils::validate::trim_optional;

pub async fn list_audit_logs(
    service: &AdminService,
    request: &HttpRequest,
    params: AuditLogListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let (page, size) = params.pagination.normalized();

    let response = storage
        .list_audit_logs(
            user.school_id,
            AuditLogListQuery {
                page: Some(page),
                size: Some(size),
                action: trim_optional(params.action),
                user_id: params.user_id,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Audit logs retrieved")))
}
