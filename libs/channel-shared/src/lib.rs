use serde::{Deserialize, Serialize};

pub mod api {
    use super::*;

    pub const DEFAULT_PAGE: i64 = 1;
    pub const DEFAULT_LIMIT: i64 = 10;

    /// Query string accepted by every list endpoint. Numbers arrive as raw
    /// strings so a malformed value falls back to its default instead of
    /// rejecting the request.
    #[derive(Debug, Default, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ListParams {
        pub q: Option<String>,
        pub page: Option<String>,
        pub limit: Option<String>,
        pub status: Option<String>,
        pub date_from: Option<String>,
        pub date_to: Option<String>,
        pub module: Option<String>,
        pub user: Option<String>,
        pub action: Option<String>,
        pub applicable_for: Option<String>,
        pub reference_type: Option<String>,
    }

    impl ListParams {
        pub fn page(&self) -> i64 {
            lenient_number(self.page.as_deref(), DEFAULT_PAGE)
        }

        pub fn limit(&self) -> i64 {
            lenient_number(self.limit.as_deref(), DEFAULT_LIMIT)
        }
    }

    /// Parses an integer, falling back to `default` when the value is
    /// missing, blank, non-numeric or zero.
    pub fn lenient_number(raw: Option<&str>, default: i64) -> i64 {
        raw.and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|n| *n != 0)
            .unwrap_or(default)
    }

    /// A categorical filter value, or `None` when it is blank or the `All`
    /// sentinel.
    pub fn selected(raw: Option<&str>) -> Option<&str> {
        raw.map(str::trim)
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ErrorResponse {
        pub error: String,
    }

    impl ErrorResponse {
        pub fn new(error: impl Into<String>) -> Self {
            Self {
                error: error.into(),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct DeleteResponse {
        pub success: bool,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct HealthResponse {
        pub status: String,
        pub version: String,
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct LoginRequest {
        #[serde(default)]
        pub username: String,
        #[serde(default)]
        pub password: String,
        #[serde(rename = "twoFA", default)]
        pub two_fa: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct LoginUser {
        pub name: String,
        pub role: String,
        pub email: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct LoginResponse {
        pub token: String,
        pub user: LoginUser,
    }
}

#[cfg(test)]
mod tests {
    use super::api::*;
    use super::auth::LoginRequest;

    #[test]
    fn page_and_limit_fall_back_leniently() {
        let params = ListParams {
            page: Some("abc".to_string()),
            limit: Some(" 25 ".to_string()),
            ..ListParams::default()
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 25);

        let params = ListParams::default();
        assert_eq!((params.page(), params.limit()), (1, 10));

        assert_eq!(lenient_number(Some("0"), 10), 10);
        assert_eq!(lenient_number(Some("-4"), 10), -4);
    }

    #[test]
    fn all_sentinel_and_blank_are_not_filters() {
        assert_eq!(selected(Some("All")), None);
        assert_eq!(selected(Some("all")), None);
        assert_eq!(selected(Some("  ")), None);
        assert_eq!(selected(None), None);
        assert_eq!(selected(Some(" Expired ")), Some("Expired"));
    }

    #[test]
    fn list_params_use_camel_case_keys() {
        let params: ListParams = serde_json::from_value(serde_json::json!({
            "dateFrom": "2025-10-26",
            "applicableFor": "Doctors",
            "referenceType": "Agent"
        }))
        .unwrap();
        assert_eq!(params.date_from.as_deref(), Some("2025-10-26"));
        assert_eq!(params.applicable_for.as_deref(), Some("Doctors"));
        assert_eq!(params.reference_type.as_deref(), Some("Agent"));
    }

    #[test]
    fn login_request_reads_two_fa_key() {
        let req: LoginRequest = serde_json::from_str(
            r#"{"username":"admin","password":"admin123","twoFA":"123456"}"#,
        )
        .unwrap();
        assert_eq!(req.two_fa, "123456");
    }
}
