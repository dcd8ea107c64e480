//! Firebase REST request methods

use reqwest::Method;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::common::{ensure_configured, from_native, send, to_native};
use crate::traits::{BackendService, ErrorContext, ProviderErrorMapper};
use crate::types::{Record, RecordKind};

use super::{FirebaseService, KEY_FIELD, fields};

/// Response of a push: `{"name": "-NxYz..."}`.
#[derive(Debug, Deserialize)]
struct PushResult {
    name: String,
}

fn encode_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

impl FirebaseService {
    pub(crate) fn ensure_configured(&self) -> Result<()> {
        ensure_configured(
            self.provider_name(),
            &self.config,
            &Self::metadata().required_keys(),
        )
    }

    /// `{url}/{collection}[/{id}].json?auth=...[&extra]`
    pub(crate) fn node_url(&self, kind: RecordKind, id: Option<&str>, extra: Option<&str>) -> String {
        let mut url = format!(
            "{}/{}",
            self.config.base_url(),
            encode_path(self.config.collection(kind))
        );
        if let Some(id) = id {
            url.push('/');
            url.push_str(&urlencoding::encode(id));
        }
        url.push_str(".json?auth=");
        url.push_str(&urlencoding::encode(self.config.api_key.trim()));
        if let Some(extra) = extra {
            url.push('&');
            url.push_str(extra);
        }
        url
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
        let mut builder = client.request(method.clone(), url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let (_status, text) =
            send(self, builder, method.as_str(), url, self.max_retries, ctx).await?;
        Ok(text)
    }

    pub(crate) async fn list<R: Record>(&self) -> Result<Vec<R>> {
        let url = self.node_url(R::KIND, None, None);
        let text = self.request(Method::GET, &url, None, ErrorContext::default()).await?;
        // An empty node reads as `null`.
        let children: Option<Map<String, Value>> =
            HttpUtils::parse_json(&text, self.provider_name())?;
        children
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Object(mut node) => {
                    node.insert(KEY_FIELD.to_string(), Value::String(key));
                    Some(node)
                }
                _ => None,
            })
            .map(|node| from_native(self.provider_name(), &node, fields(R::KIND)))
            .collect()
    }

    pub(crate) async fn create<R: Record>(&self, record: &R) -> Result<R> {
        let node = Value::Object(to_native(self.provider_name(), record, fields(R::KIND))?);
        let url = self.node_url(R::KIND, None, None);
        let text = self
            .request(Method::POST, &url, Some(&node), ErrorContext::default())
            .await?;
        let pushed: PushResult = HttpUtils::parse_json(&text, self.provider_name())?;
        let mut created = record.clone();
        created.set_id(pushed.name);
        Ok(created)
    }

    /// PATCH would create a missing child, so existence is checked first.
    pub(crate) async fn update<R: Record>(&self, id: &str, record: &R) -> Result<R> {
        if !self.exists(R::KIND, id).await? {
            return Err(self.record_not_found(id));
        }
        let node = Value::Object(to_native(self.provider_name(), record, fields(R::KIND))?);
        let url = self.node_url(R::KIND, Some(id), None);
        self.request(Method::PATCH, &url, Some(&node), ErrorContext::record(id))
            .await?;
        let mut updated = record.clone();
        updated.set_id(id.to_string());
        Ok(updated)
    }

    pub(crate) async fn delete(&self, kind: RecordKind, id: &str) -> Result<bool> {
        let url = self.node_url(kind, Some(id), None);
        self.request(Method::DELETE, &url, None, ErrorContext::record(id))
            .await?;
        Ok(true)
    }

    async fn exists(&self, kind: RecordKind, id: &str) -> Result<bool> {
        let url = self.node_url(kind, Some(id), Some("shallow=true"));
        let text = self
            .request(Method::GET, &url, None, ErrorContext::record(id))
            .await?;
        let node: Value = HttpUtils::parse_json(&text, self.provider_name())?;
        Ok(!node.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_collection_path_is_encoded_per_segment() {
        assert_eq!(encode_path("/users/u 1/foods/"), "users/u%201/foods");
    }
}
