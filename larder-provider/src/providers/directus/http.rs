//! Directus HTTP request methods

use reqwest::Method;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::common::{ensure_configured, from_native, from_native_list, send, to_native};
use crate::traits::{BackendService, ErrorContext, ProviderErrorMapper};
use crate::types::{Record, RecordKind};

use super::{DirectusService, fields};

/// Every Directus response wraps its payload in `data`.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

impl DirectusService {
    pub(crate) fn ensure_configured(&self) -> Result<()> {
        ensure_configured(
            self.provider_name(),
            &self.config,
            &Self::metadata().required_keys(),
        )
    }

    pub(crate) fn items_url(&self, kind: RecordKind) -> String {
        format!(
            "{}/items/{}",
            self.config.base_url(),
            urlencoding::encode(self.config.collection(kind))
        )
    }

    fn item_url(&self, kind: RecordKind, id: &str) -> String {
        format!("{}/{}", self.items_url(kind), urlencoding::encode(id))
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
        let mut builder = client
            .request(method.clone(), url)
            .bearer_auth(self.config.api_key.trim());
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let (_status, text) =
            send(self, builder, method.as_str(), url, self.max_retries, ctx).await?;
        Ok(text)
    }

    pub(crate) async fn list<R: Record>(&self) -> Result<Vec<R>> {
        let url = format!("{}?limit=-1", self.items_url(R::KIND));
        let text = self.request(Method::GET, &url, None, ErrorContext::default()).await?;
        let envelope: DataEnvelope<Vec<Value>> =
            HttpUtils::parse_json(&text, self.provider_name())?;
        from_native_list(self.provider_name(), &envelope.data, fields(R::KIND))
    }

    pub(crate) async fn create<R: Record>(&self, record: &R) -> Result<R> {
        let item = Value::Object(to_native(self.provider_name(), record, fields(R::KIND))?);
        let text = self
            .request(Method::POST, &self.items_url(R::KIND), Some(&item), ErrorContext::default())
            .await?;
        self.parse_item(&text)
    }

    pub(crate) async fn update<R: Record>(&self, id: &str, record: &R) -> Result<R> {
        let item = Value::Object(to_native(self.provider_name(), record, fields(R::KIND))?);
        let text = self
            .request(
                Method::PATCH,
                &self.item_url(R::KIND, id),
                Some(&item),
                ErrorContext::record(id),
            )
            .await?;
        self.parse_item(&text)
    }

    pub(crate) async fn delete(&self, kind: RecordKind, id: &str) -> Result<bool> {
        self.request(Method::DELETE, &self.item_url(kind, id), None, ErrorContext::record(id))
            .await?;
        Ok(true)
    }

    fn parse_item<R: Record>(&self, text: &str) -> Result<R> {
        let envelope: DataEnvelope<Map<String, Value>> =
            HttpUtils::parse_json(text, self.provider_name())?;
        from_native(self.provider_name(), &envelope.data, fields(R::KIND))
    }
}
