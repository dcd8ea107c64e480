//! `CouchDB` HTTP request methods

use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::common::{ensure_configured, from_native, send, to_native};
use crate::traits::{BackendService, ErrorContext, ProviderErrorMapper};
use crate::types::{Record, RecordKind};

use super::{CouchDbService, DESIGN_DOC_PREFIX, fields};

#[derive(Debug, Deserialize)]
struct AllDocs {
    #[serde(default)]
    rows: Vec<AllDocsRow>,
}

#[derive(Debug, Deserialize)]
struct AllDocsRow {
    id: String,
    doc: Option<Map<String, Value>>,
}

/// Response of document writes: `{"ok": true, "id": "...", "rev": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct WriteResult {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct Revision {
    #[serde(rename = "_rev")]
    rev: String,
}

impl CouchDbService {
    pub(crate) fn ensure_configured(&self) -> Result<()> {
        ensure_configured(
            self.provider_name(),
            &self.config,
            &Self::metadata().required_keys(),
        )
    }

    pub(crate) fn database_url(&self, kind: RecordKind) -> String {
        format!(
            "{}/{}",
            self.config.base_url(),
            urlencoding::encode(self.config.collection(kind))
        )
    }

    fn document_url(&self, kind: RecordKind, id: &str) -> String {
        format!("{}/{}", self.database_url(kind), urlencoding::encode(id))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.basic_auth(
            self.config.project_id.trim(),
            Some(self.config.api_key.trim()),
        )
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
        let url = format!("{}/_all_docs?include_docs=true", self.database_url(R::KIND));
        let text = self.request(Method::GET, &url, None, ErrorContext::default()).await?;
        let all: AllDocs = HttpUtils::parse_json(&text, self.provider_name())?;
        all.rows
            .iter()
            .filter(|row| !row.id.starts_with(DESIGN_DOC_PREFIX))
            .filter_map(|row| row.doc.as_ref())
            .map(|doc| from_native(self.provider_name(), doc, fields(R::KIND)))
            .collect()
    }

    pub(crate) async fn create<R: Record>(&self, record: &R) -> Result<R> {
        let doc = Value::Object(to_native(self.provider_name(), record, fields(R::KIND))?);
        let text = self
            .request(Method::POST, &self.database_url(R::KIND), Some(&doc), ErrorContext::default())
            .await?;
        let written: WriteResult = HttpUtils::parse_json(&text, self.provider_name())?;
        let mut created = record.clone();
        created.set_id(written.id);
        Ok(created)
    }

    /// Updates need the current revision; a missing document fails the lookup.
    pub(crate) async fn update<R: Record>(&self, id: &str, record: &R) -> Result<R> {
        let rev = self.current_revision(R::KIND, id).await?;
        let mut doc = to_native(self.provider_name(), record, fields(R::KIND))?;
        doc.insert("_rev".to_string(), Value::String(rev));
        let text = self
            .request(
                Method::PUT,
                &self.document_url(R::KIND, id),
                Some(&Value::Object(doc)),
                ErrorContext::record(id),
            )
            .await?;
        let written: WriteResult = HttpUtils::parse_json(&text, self.provider_name())?;
        let mut updated = record.clone();
        updated.set_id(if written.id.is_empty() {
            id.to_string()
        } else {
            written.id
        });
        Ok(updated)
    }

    pub(crate) async fn delete(&self, kind: RecordKind, id: &str) -> Result<bool> {
        let rev = self.current_revision(kind, id).await?;
        let url = format!(
            "{}?rev={}",
            self.document_url(kind, id),
            urlencoding::encode(&rev)
        );
        let text = self
            .request(Method::DELETE, &url, None, ErrorContext::record(id))
            .await?;
        let written: WriteResult = HttpUtils::parse_json(&text, self.provider_name())?;
        Ok(written.ok)
    }

    async fn current_revision(&self, kind: RecordKind, id: &str) -> Result<String> {
        let text = self
            .request(Method::GET, &self.document_url(kind, id), None, ErrorContext::record(id))
            .await?;
        let revision: Revision = HttpUtils::parse_json(&text, self.provider_name())?;
        Ok(revision.rev)
    }
}
