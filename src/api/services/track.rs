//! 计数端点
//!
//! `POST /views/count`，请求体 `{ "page_id": "<uuid>" }`。
//! 状态码约定：200（已处理，计或不计）、400（参数非法/来源不可识别）、
//! 404（页面缺失或未发布）、429（限流）、500（内部失败）。

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::errors::TrustPageError;
use crate::services::{CountOutcome, ViewTracker};
use crate::utils::ip::extract_client_ip;

#[derive(Debug, Deserialize)]
pub struct CountViewRequest {
    pub page_id: String,
}

#[derive(Debug, Serialize)]
pub struct CountViewResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CountViewResponse {
    fn counted() -> Self {
        Self {
            success: true,
            counted: Some(true),
            reason: None,
            error: None,
        }
    }

    fn not_counted(reason: &str) -> Self {
        Self {
            success: true,
            counted: Some(false),
            reason: Some(reason.to_string()),
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        Self {
            success: false,
            counted: None,
            reason: None,
            error: Some(error),
        }
    }
}

pub struct TrackService {}

impl TrackService {
    pub async fn count_view(
        req: HttpRequest,
        body: web::Json<CountViewRequest>,
        tracker: web::Data<Arc<ViewTracker>>,
    ) -> impl Responder {
        // 无法识别来源的请求不进限流器
        let Some(ip) = extract_client_ip(&req) else {
            debug!("Count request rejected: no identifiable origin");
            return HttpResponse::build(StatusCode::BAD_REQUEST).json(CountViewResponse::failed(
                "unable to determine request origin".to_string(),
            ));
        };

        match tracker.count_view(&body.page_id, &ip).await {
            Ok(CountOutcome::Counted) => HttpResponse::Ok().json(CountViewResponse::counted()),
            Ok(CountOutcome::Duplicate) => {
                HttpResponse::Ok().json(CountViewResponse::not_counted("duplicate_within_window"))
            }
            Err(e) => Self::error_response(e),
        }
    }

    fn error_response(err: TrustPageError) -> HttpResponse {
        let status = match &err {
            TrustPageError::Validation(_) => StatusCode::BAD_REQUEST,
            TrustPageError::NotFound(_) => StatusCode::NOT_FOUND,
            TrustPageError::RateLimitExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Count view failed: {}", err);
            // 内部细节不出网
            return HttpResponse::build(status)
                .json(CountViewResponse::failed("internal error".to_string()));
        }

        HttpResponse::build(status).json(CountViewResponse::failed(err.format_simple()))
    }
}

/// Track 路由配置
pub fn track_routes() -> actix_web::Scope {
    web::scope("/views").route("/count", web::post().to(TrackService::count_view))
}
