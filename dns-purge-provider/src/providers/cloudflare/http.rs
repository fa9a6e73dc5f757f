//! Cloudflare HTTP 请求方法

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::{HttpUtils, status_text};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::{CloudflareProvider, CloudflareResponse};

impl CloudflareProvider {
    /// 添加认证头
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("X-Auth-Email", &self.email)
            .header("X-Auth-Key", &self.api_key)
            .header("Content-Type", "application/json")
    }

    /// 发送请求并解包 Cloudflare 响应
    ///
    /// `path` is appended to the base URL and may carry a query string.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        context: ErrorContext,
    ) -> Result<CloudflareResponse<T>> {
        let url = format!("{}{path}", self.base_url);
        let request = self.authorized(self.client.request(method.clone(), &url));
        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), method.as_str(), &url)
                .await?;

        if !(200..300).contains(&status) {
            return Err(self.failed_response(status, &response_text, context));
        }

        let cf_response: CloudflareResponse<T> =
            HttpUtils::parse_json(&response_text, self.provider_name())?;

        if !cf_response.success {
            return Err(self.envelope_error(cf_response.errors, context));
        }

        Ok(cf_response)
    }

    /// 执行 GET 请求 (带分页)，返回 (items, total_count)
    pub(crate) async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<(Vec<T>, u32)> {
        let cf_response: CloudflareResponse<Vec<T>> = self.send(Method::GET, path, context).await?;
        let total_count = cf_response.result_info.map_or(0, |i| i.total_count);
        Ok((cf_response.result.unwrap_or_default(), total_count))
    }

    /// 执行 DELETE 请求
    pub(crate) async fn delete(&self, path: &str, context: ErrorContext) -> Result<()> {
        let _: CloudflareResponse<serde_json::Value> =
            self.send(Method::DELETE, path, context).await?;
        Ok(())
    }

    /// Error for a non-2xx response.
    ///
    /// A Cloudflare error envelope wins over the bare status.
    fn failed_response(&self, status: u16, body: &str, context: ErrorContext) -> ProviderError {
        match serde_json::from_str::<CloudflareResponse<serde_json::Value>>(body) {
            Ok(envelope) if envelope.errors.as_ref().is_some_and(|e| !e.is_empty()) => {
                self.envelope_error(envelope.errors, context)
            }
            _ => self.status_error(status, body),
        }
    }

    fn envelope_error(
        &self,
        errors: Option<Vec<super::types::CloudflareError>>,
        context: ErrorContext,
    ) -> ProviderError {
        let (code, message) = errors
            .and_then(|errors| {
                errors
                    .into_iter()
                    .next()
                    .map(|e| (e.code.to_string(), e.message))
            })
            .unwrap_or_else(|| (String::new(), "Unknown error".to_string()));
        log::debug!("[{}] API 错误 {code}: {message}", self.provider_name());
        if code.is_empty() {
            return self.map_error(RawApiError::new(message), context);
        }
        self.map_error(RawApiError::with_code(code, message), context)
    }

    fn status_error(&self, status: u16, body: &str) -> ProviderError {
        let provider = self.provider_name().to_string();
        let raw_message = (!body.is_empty()).then(|| truncate_for_log(body));
        match status {
            401 => ProviderError::InvalidCredentials {
                provider,
                raw_message,
            },
            403 => ProviderError::PermissionDenied {
                provider,
                raw_message,
            },
            _ => ProviderError::HttpStatus {
                provider,
                status_code: status,
                status_text: StatusCode::from_u16(status)
                    .map_or_else(|_| "Unknown Status".to_string(), status_text),
                raw_message,
            },
        }
    }
}
