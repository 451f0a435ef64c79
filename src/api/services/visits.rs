//! 访问记录端点
//!
//! `POST /visits`。写入成功返回 204，失败记日志后返回 500。
//! 客户端的会话守卫只在 204 后落键，500 让同会话下次渲染时重试；
//! 访问统计的失败由客户端吞掉，永远不阻塞页面渲染。

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::Deserialize;
use tracing::warn;

use crate::services::build_visit_record;
use crate::storage::SeaOrmStorage;
use crate::utils::is_valid_page_id;

#[derive(Debug, Deserialize)]
pub struct RecordVisitRequest {
    pub page_id: String,
    #[serde(default)]
    pub referrer: Option<String>,
    /// 页面加载时的原始 query string（utm/ref 提取在服务端做）
    #[serde(default)]
    pub query: Option<String>,
    /// 客户端指纹哈希（base-36），原始特征不出浏览器
    #[serde(default)]
    pub fingerprint: Option<String>,
}

pub struct VisitsService {}

impl VisitsService {
    pub async fn record_visit(
        req: HttpRequest,
        body: web::Json<RecordVisitRequest>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> impl Responder {
        if !is_valid_page_id(&body.page_id) {
            return HttpResponse::BadRequest().finish();
        }

        let user_agent = req
            .headers()
            .get("user-agent")
            .and_then(|h| h.to_str().ok());

        // body 里没带 referrer 时回退 Referer header
        let referrer = body.referrer.as_deref().or_else(|| {
            req.headers()
                .get("referer")
                .and_then(|h| h.to_str().ok())
        });

        let record = build_visit_record(
            &body.page_id,
            referrer,
            body.query.as_deref(),
            user_agent,
            body.fingerprint.as_deref(),
        );

        if let Err(e) = storage.insert_visit(&record).await {
            // 失败吞掉，客户端会在同会话下次渲染时重试
            warn!("Visit insert failed (non-blocking): {}", e);
            return HttpResponse::InternalServerError().finish();
        }

        HttpResponse::NoContent().finish()
    }
}

/// Visits 路由配置
pub fn visits_routes() -> actix_web::Scope {
    web::scope("/visits").route("", web::post().to(VisitsService::record_visit))
}
