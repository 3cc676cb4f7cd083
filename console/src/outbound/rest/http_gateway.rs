//! Reqwest-backed Gateway adapter.
//!
//! This adapter owns transport details only: PostgREST request shapes,
//! credential headers, timeout and HTTP error mapping, and JSON decoding into
//! domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{
    CourseFieldsDto, CourseRowDto, ErrorBodyDto, RoleChangeDto, StatsDto, UserRowDto,
};
use crate::domain::ports::{CourseGateway, GatewayError, StatsGateway, UserGateway};
use crate::domain::{Course, CourseDraft, CourseId, DashboardStats, User, UserId, UserRole};

const REST_PREFIX: &str = "rest/v1/";
const NEWEST_FIRST: [(&str, &str); 2] = [("select", "*"), ("order", "created_at.desc")];
const RETURN_REPRESENTATION: &str = "return=representation";

/// Credentials attached to every Gateway request.
#[derive(Clone)]
pub struct RestCredentials {
    /// Project API key sent as the `apikey` header.
    pub api_key: String,
    /// Session token for the signed-in operator. The API key is used as the
    /// bearer token when absent.
    pub access_token: Option<String>,
}

/// Gateway adapter speaking the hosted backend's REST dialect.
pub struct RestGateway {
    client: Client,
    base_url: Url,
    credentials: RestCredentials,
}

impl RestGateway {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        credentials: RestCredentials,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
            credentials,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(REST_PREFIX)
            .and_then(|rest| rest.join(path))
            .map_err(|err| GatewayError::transport(format!("invalid endpoint '{path}': {err}")))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, GatewayError> {
        let bearer = self
            .credentials
            .access_token
            .as_deref()
            .unwrap_or(self.credentials.api_key.as_str());
        Ok(self
            .client
            .request(method, self.endpoint(path)?)
            .header("apikey", self.credentials.api_key.as_str())
            .bearer_auth(bearer)
            .header(ACCEPT, HeaderValue::from_static("application/json")))
    }

    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Vec<u8>, GatewayError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(
            operation,
            status = status.as_u16(),
            bytes = body.len(),
            "gateway call finished"
        );
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }

    /// Send a write that asks for the affected rows back and return the first.
    async fn send_for_row<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        missing: impl FnOnce() -> String,
    ) -> Result<T, GatewayError> {
        let request = request.header("Prefer", RETURN_REPRESENTATION);
        let body = self.send(operation, request).await?;
        let rows: Vec<T> = decode(&body, operation)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| GatewayError::not_found(missing()))
    }
}

#[async_trait]
impl CourseGateway for RestGateway {
    async fn list_courses(&self) -> Result<Vec<Course>, GatewayError> {
        let request = self.request(Method::GET, "courses")?.query(&NEWEST_FIRST);
        let body = self.send("list_courses", request).await?;
        decode_rows("list_courses", &body, CourseRowDto::into_domain)
    }

    async fn create_course(&self, draft: &CourseDraft) -> Result<Course, GatewayError> {
        let request = self
            .request(Method::POST, "courses")?
            .json(&CourseFieldsDto::from(draft));
        let row: CourseRowDto = self
            .send_for_row("create_course", request, || {
                "created course was not returned".to_owned()
            })
            .await?;
        row.into_domain().map_err(GatewayError::decode)
    }

    async fn update_course(
        &self,
        id: &CourseId,
        draft: &CourseDraft,
    ) -> Result<Course, GatewayError> {
        let request = self
            .request(Method::PATCH, "courses")?
            .query(&[("id", id_filter(id))])
            .json(&CourseFieldsDto::from(draft));
        let row: CourseRowDto = self
            .send_for_row("update_course", request, || format!("course {id}"))
            .await?;
        row.into_domain().map_err(GatewayError::decode)
    }

    async fn delete_course(&self, id: &CourseId) -> Result<(), GatewayError> {
        let request = self
            .request(Method::DELETE, "courses")?
            .query(&[("id", id_filter(id))]);
        self.send("delete_course", request).await?;
        Ok(())
    }
}

#[async_trait]
impl UserGateway for RestGateway {
    async fn list_users(&self) -> Result<Vec<User>, GatewayError> {
        let request = self.request(Method::GET, "users")?.query(&NEWEST_FIRST);
        let body = self.send("list_users", request).await?;
        decode_rows("list_users", &body, UserRowDto::into_domain)
    }

    async fn update_user_role(&self, id: &UserId, role: UserRole) -> Result<(), GatewayError> {
        let request = self
            .request(Method::PATCH, "users")?
            .query(&[("id", id_filter(id))])
            .json(&RoleChangeDto { role });
        let _: UserRowDto = self
            .send_for_row("update_user_role", request, || format!("user {id}"))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl StatsGateway for RestGateway {
    async fn aggregate_stats(&self) -> Result<DashboardStats, GatewayError> {
        let request = self
            .request(Method::POST, "rpc/admin_stats")?
            .json(&serde_json::json!({}));
        let body = self.send("aggregate_stats", request).await?;
        let stats: StatsDto = decode(&body, "aggregate_stats")?;
        Ok(stats.into())
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn id_filter(id: &impl std::fmt::Display) -> String {
    format!("eq.{id}")
}

fn decode<T: DeserializeOwned>(body: &[u8], operation: &str) -> Result<T, GatewayError> {
    serde_json::from_slice(body).map_err(|error| {
        GatewayError::decode(format!("invalid {operation} payload: {error}"))
    })
}

/// Decode a list response row by row.
///
/// Only a body that is not a JSON array fails the call. A row that does not
/// decode or map into a domain record is logged and skipped, so one odd row
/// never hides the rest of the collection.
fn decode_rows<R, T>(
    operation: &'static str,
    body: &[u8],
    into_domain: impl Fn(R) -> Result<T, String>,
) -> Result<Vec<T>, GatewayError>
where
    R: DeserializeOwned,
{
    let rows: Vec<serde_json::Value> = decode(body, operation)?;
    let records = rows
        .into_iter()
        .filter_map(|row| {
            let row_id = row_id(&row);
            let record = serde_json::from_value::<R>(row)
                .map_err(|err| err.to_string())
                .and_then(&into_domain);
            match record {
                Ok(record) => Some(record),
                Err(error) => {
                    warn!(operation, row_id = %row_id, error = %error, "skipping unreadable row");
                    None
                }
            }
        })
        .collect();
    Ok(records)
}

fn row_id(row: &serde_json::Value) -> String {
    match row.get("id") {
        Some(serde_json::Value::String(id)) => id.clone(),
        Some(id) => id.to_string(),
        None => String::new(),
    }
}

fn map_transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::timeout(error.to_string())
    } else {
        GatewayError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GatewayError {
    let backend_message = serde_json::from_slice::<ErrorBodyDto>(body)
        .ok()
        .and_then(|dto| dto.message)
        .filter(|message| !message.trim().is_empty());
    let message = backend_message.unwrap_or_else(|| {
        let body_preview = body_preview(body);
        if body_preview.is_empty() {
            format!("status {}", status.as_u16())
        } else {
            format!("status {}: {}", status.as_u16(), body_preview)
        }
    });

    match status {
        StatusCode::UNAUTHORIZED => GatewayError::unauthorized(message),
        StatusCode::FORBIDDEN => GatewayError::forbidden(message),
        StatusCode::NOT_FOUND => GatewayError::not_found(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            GatewayError::timeout(message)
        }
        _ if status.is_client_error() => GatewayError::rejected(message),
        _ => GatewayError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
