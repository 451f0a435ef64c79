//! 支付 webhook 端点
//!
//! `POST /webhooks/payment`。网关以 bearer token + JSON body 回调；
//! token 校验由部署层（网关密钥比对中间件）负责，这里消费事件本体。

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use tracing::error;

use crate::errors::TrustPageError;
use crate::services::{BillingService, PaymentWebhookEvent};

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct WebhookService {}

impl WebhookService {
    pub async fn payment(
        body: web::Json<PaymentWebhookEvent>,
        billing: web::Data<Arc<BillingService>>,
    ) -> impl Responder {
        match billing.apply_event(&body).await {
            Ok(change) => HttpResponse::Ok().json(WebhookResponse {
                success: true,
                account_id: Some(change.account_id),
                plan: Some(change.tier.to_string()),
                error: None,
            }),
            Err(e) => {
                let status = match &e {
                    TrustPageError::Upstream(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    TrustPageError::NotFound(_) => StatusCode::NOT_FOUND,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                error!("Payment webhook failed ({}): {}", body.event, e);
                HttpResponse::build(status).json(WebhookResponse {
                    success: false,
                    account_id: None,
                    plan: None,
                    error: Some(e.format_simple()),
                })
            }
        }
    }
}

/// Webhook 路由配置
pub fn webhook_routes() -> actix_web::Scope {
    web::scope("/webhooks").route("/payment", web::post().to(WebhookService::payment))
}
