//! Parse REST request methods

use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::common::{ensure_configured, from_native_list, send, to_native};
use crate::traits::{BackendService, ErrorContext, ProviderErrorMapper};
use crate::types::{Record, RecordKind};

use super::{MAX_QUERY_LIMIT, ParseService, fields};

#[derive(Debug, Deserialize)]
struct QueryResults {
    #[serde(default)]
    results: Vec<Value>,
}

/// Create answers `{"objectId", "createdAt"}`; update answers `{"updatedAt"}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct WriteResult {
    pub object_id: Option<String>,
    #[serde(with = "crate::utils::datetime::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "crate::utils::datetime::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ParseService {
    pub(crate) fn ensure_configured(&self) -> Result<()> {
        ensure_configured(
            self.provider_name(),
            &self.config,
            &Self::metadata().required_keys(),
        )
    }

    pub(crate) fn class_url(&self, kind: RecordKind) -> String {
        format!(
            "{}/classes/{}",
            self.config.base_url(),
            urlencoding::encode(self.config.collection(kind))
        )
    }

    fn object_url(&self, kind: RecordKind, id: &str) -> String {
        format!("{}/{}", self.class_url(kind), urlencoding::encode(id))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("X-Parse-Application-Id", self.config.project_id.trim())
            .header("X-Parse-REST-API-Key", self.config.api_key.trim())
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
        let mut builder = self.authorize(client.request(method.clone(), url));
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let (_status, text) =
            send(self, builder, method.as_str(), url, self.max_retries, ctx).await?;
        Ok(text)
    }

    pub(crate) async fn list<R: Record>(&self) -> Result<Vec<R>> {
        let url = format!("{}?limit={MAX_QUERY_LIMIT}", self.class_url(R::KIND));
        let text = self.request(Method::GET, &url, None, ErrorContext::default()).await?;
        let query: QueryResults = HttpUtils::parse_json(&text, self.provider_name())?;
        from_native_list(self.provider_name(), &query.results, fields(R::KIND))
    }

    pub(crate) async fn create<R: Record>(&self, record: &R) -> Result<R> {
        let object = Value::Object(to_native(self.provider_name(), record, fields(R::KIND))?);
        let text = self
            .request(Method::POST, &self.class_url(R::KIND), Some(&object), ErrorContext::default())
            .await?;
        let written: WriteResult = HttpUtils::parse_json(&text, self.provider_name())?;
        let object_id = written
            .object_id
            .ok_or_else(|| self.parse_error("create response has no objectId"))?;

        let mut created = record.clone();
        created.set_id(object_id);
        if let Some(at) = written.created_at {
            created.set_created_at(at);
            created.set_updated_at(at);
        }
        Ok(created)
    }

    pub(crate) async fn update<R: Record>(&self, id: &str, record: &R) -> Result<R> {
        let object = Value::Object(to_native(self.provider_name(), record, fields(R::KIND))?);
        let text = self
            .request(
                Method::PUT,
                &self.object_url(R::KIND, id),
                Some(&object),
                ErrorContext::record(id),
            )
            .await?;
        let written: WriteResult = HttpUtils::parse_json(&text, self.provider_name())?;

        let mut updated = record.clone();
        updated.set_id(id.to_string());
        if let Some(at) = written.updated_at {
            updated.set_updated_at(at);
        }
        Ok(updated)
    }

    pub(crate) async fn delete(&self, kind: RecordKind, id: &str) -> Result<bool> {
        self.request(Method::DELETE, &self.object_url(kind, id), None, ErrorContext::record(id))
            .await?;
        Ok(true)
    }
}
