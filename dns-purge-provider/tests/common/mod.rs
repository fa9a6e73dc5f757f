//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use dns_purge_provider::CloudflareProvider;

pub const TEST_EMAIL: &str = "ops@example.com";
pub const TEST_API_KEY: &str = "test-global-key";

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Provider pointed at a mock server, with fixed test credentials.
pub fn mock_provider(base_url: &str) -> Option<CloudflareProvider> {
    CloudflareProvider::with_base_url(
        TEST_EMAIL.to_string(),
        TEST_API_KEY.to_string(),
        base_url,
    )
    .ok()
}

/// Provider built from `CLOUDFLARE_EMAIL` / `CLOUDFLARE_API_KEY`.
pub fn live_provider() -> Option<CloudflareProvider> {
    let email = env::var("CLOUDFLARE_EMAIL").ok()?;
    let api_key = env::var("CLOUDFLARE_API_KEY").ok()?;
    CloudflareProvider::new(email, api_key).ok()
}
