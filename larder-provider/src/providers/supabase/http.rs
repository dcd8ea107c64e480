//! Supabase `PostgREST` request methods

use reqwest::{Method, RequestBuilder};
use serde_json::Value;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::common::{ensure_configured, from_native_list, send, to_native};
use crate::traits::{BackendService, ErrorContext, ProviderErrorMapper};
use crate::types::{Record, RecordKind};

use super::{REST_PATH, RETURN_REPRESENTATION, SupabaseService, fields};

impl SupabaseService {
    pub(crate) fn ensure_configured(&self) -> Result<()> {
        ensure_configured(
            self.provider_name(),
            &self.config,
            &Self::metadata().required_keys(),
        )
    }

    pub(crate) fn table_url(&self, kind: RecordKind) -> String {
        format!(
            "{}{REST_PATH}/{}",
            self.config.base_url(),
            urlencoding::encode(self.config.collection(kind))
        )
    }

    /// Row filter `?id=eq.{id}`.
    pub(crate) fn row_url(&self, kind: RecordKind, id: &str) -> String {
        format!("{}?id=eq.{}", self.table_url(kind), urlencoding::encode(id))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let key = self.config.api_key.trim();
        builder.header("apikey", key).bearer_auth(key)
    }

    pub(crate) async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        ctx: ErrorContext,
    ) -> Result<String> {
        self.ensure_configured()?;
        let client = self.client.get(self.provider_name())?;
        let mut builder = self
            .authorize(client.request(method.clone(), url))
            .header("Prefer", RETURN_REPRESENTATION);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let (_status, text) =
            send(self, builder, method.as_str(), url, self.max_retries, ctx).await?;
        Ok(text)
    }

    /// Writes answer with the affected rows as a JSON array.
    async fn rows<R: Record>(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        ctx: ErrorContext,
    ) -> Result<Vec<R>> {
        let text = self.request(method, url, body, ctx).await?;
        let rows: Vec<Value> = HttpUtils::parse_json(&text, self.provider_name())?;
        from_native_list(self.provider_name(), &rows, fields(R::KIND))
    }

    pub(crate) async fn list<R: Record>(&self) -> Result<Vec<R>> {
        let url = format!("{}?select=*", self.table_url(R::KIND));
        self.rows(Method::GET, &url, None, ErrorContext::default()).await
    }

    pub(crate) async fn create<R: Record>(&self, record: &R) -> Result<R> {
        let row = Value::Object(to_native(self.provider_name(), record, fields(R::KIND))?);
        self.rows(Method::POST, &self.table_url(R::KIND), Some(&row), ErrorContext::default())
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| self.parse_error("insert returned no rows"))
    }

    /// A filter that matches nothing is answered with `[]`, not 404.
    pub(crate) async fn update<R: Record>(&self, id: &str, record: &R) -> Result<R> {
        let row = Value::Object(to_native(self.provider_name(), record, fields(R::KIND))?);
        self.rows(
            Method::PATCH,
            &self.row_url(R::KIND, id),
            Some(&row),
            ErrorContext::record(id),
        )
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| self.record_not_found(id))
    }

    pub(crate) async fn delete(&self, kind: RecordKind, id: &str) -> Result<bool> {
        let text = self
            .request(Method::DELETE, &self.row_url(kind, id), None, ErrorContext::record(id))
            .await?;
        let deleted: Vec<Value> = HttpUtils::parse_json(&text, self.provider_name())?;
        Ok(!deleted.is_empty())
    }
}
