//! 页面渲染模式端点
//!
//! `GET /pages/{page_id}/render`。渲染层据此决定正常渲染还是
//! 展示不可关闭的超限遮罩。已认证的所有者账户 ID 由认证层写入
//! `x-account-id` header（认证内部不在本服务范围）。

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::Serialize;
use tracing::error;

use crate::services::quota::QuotaGate;
use crate::services::RenderMode;
use crate::storage::SeaOrmStorage;
use crate::utils::is_valid_page_id;

#[derive(Debug, Serialize)]
pub struct RenderModeResponse {
    pub mode: RenderMode,
    pub view_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_view_ceiling: Option<u64>,
}

pub struct PagesService {}

impl PagesService {
    pub async fn render_mode(
        req: HttpRequest,
        path: web::Path<String>,
        storage: web::Data<Arc<SeaOrmStorage>>,
        gate: web::Data<Arc<QuotaGate>>,
    ) -> impl Responder {
        let page_id = path.into_inner();
        if !is_valid_page_id(&page_id) {
            return HttpResponse::BadRequest().finish();
        }

        let viewer = req
            .headers()
            .get("x-account-id")
            .and_then(|h| h.to_str().ok());

        let lookup = match storage.get_page_with_owner(&page_id).await {
            Ok(found) => found,
            Err(e) => {
                error!("Render mode lookup failed: {}", e);
                return HttpResponse::InternalServerError().finish();
            }
        };

        let Some((page, owner)) = lookup else {
            return HttpResponse::NotFound().finish();
        };

        // 未发布页面只有所有者可见
        if !page.published && viewer != Some(page.account_id.as_str()) {
            return HttpResponse::NotFound().finish();
        }

        let mode = gate.render_mode(&page, owner.plan_tier, viewer).await;

        HttpResponse::Ok().json(RenderModeResponse {
            mode,
            view_count: page.view_count,
            monthly_view_ceiling: owner.plan_tier.capabilities().monthly_view_ceiling,
        })
    }
}

/// Pages 路由配置
pub fn pages_routes() -> actix_web::Scope {
    web::scope("/pages").route("/{page_id}/render", web::get().to(PagesService::render_mode))
}
