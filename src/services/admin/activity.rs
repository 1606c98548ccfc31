//! 最近动态
//!
//! 九类记录并发查询，合并后按时间倒序排序并截断。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::future::try_join_all;

use super::AdminService;
use crate::models::{
    ApiResponse,
    activity::entities::{ActivityFeedResponse, ActivityItem, ActivityKind, ActivityParams},
};
use crate::services::current_user;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

pub(crate) fn clamp_limit(limit: Option<i64>) -> u64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT) as u64
}

/// 合并各类动态：时间倒序，同一时间按类型、再按 ID 倒序
pub(crate) fn merge_activity(batches: Vec<Vec<ActivityItem>>, limit: usize) -> Vec<ActivityItem> {
    let mut items: Vec<ActivityItem> = batches.into_iter().flatten().collect();
    items.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.kind.cmp(&b.kind))
            .then_with(|| b.id.cmp(&a.id))
    });
    items.truncate(limit);
    items
}

pub async fn activity_feed(
    service: &AdminService,
    request: &HttpRequest,
    params: ActivityParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let limit = clamp_limit(params.limit);

    // 任一查询失败则整体失败
    let batches = try_join_all(
        ActivityKind::ALL
            .iter()
            .map(|kind| storage.recent_activity(user.school_id, *kind, limit)),
    )
    .await?;

    let items = merge_activity(batches, limit as usize);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ActivityFeedResponse { items },
        "Activity retrieved",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(kind: ActivityKind, id: i64, ts: i64) -> ActivityItem {
        ActivityItem {
            kind,
            id,
            title: format!("{kind:?} {id}"),
            description: None,
            timestamp: Utc.timestamp_opt(ts, 0).unwrap(),
        }
    }

    #[test]
    fn test_merge_sorts_newest_first_and_truncates() {
        let batches = vec![
            vec![item(ActivityKind::StudentEnrolled, 1, 100), item(ActivityKind::StudentEnrolled, 2, 300)],
            vec![item(ActivityKind::GradeRecorded, 7, 200)],
            vec![],
            vec![item(ActivityKind::AlertRaised, 3, 50)],
        ];
        let merged = merge_activity(batches, 3);
        let ids: Vec<i64> = merged.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 7, 1]);
    }

    #[test]
    fn test_ties_break_by_kind_then_id() {
        let batches = vec![
            vec![item(ActivityKind::AlertRaised, 1, 100)],
            vec![
                item(ActivityKind::StudentEnrolled, 4, 100),
                item(ActivityKind::StudentEnrolled, 9, 100),
            ],
        ];
        let merged = merge_activity(batches, 10);
        let order: Vec<(ActivityKind, i64)> = merged.iter().map(|i| (i.kind, i.id)).collect();
        assert_eq!(
            order,
            vec![
                (ActivityKind::StudentEnrolled, 9),
                (ActivityKind::StudentEnrolled, 4),
                (ActivityKind::AlertRaised, 1),
            ]
        );
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(clamp_limit(None), 20);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-5)), 1);
        assert_eq!(clamp_limit(Some(500)), 100);
        assert_eq!(clamp_limit(Some(42)), 42);
    }
}
