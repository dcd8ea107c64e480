//! Appwrite HTTP request methods

use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::common::{
    ensure_configured, from_native, from_native_list, parse_object, send, to_native,
};
use crate::traits::{BackendService, ErrorContext, ProviderErrorMapper};
use crate::types::{Record, RecordKind};

use super::{AppwriteService, LIST_LIMIT, UNIQUE_ID, fields};

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<Value>,
}

impl AppwriteService {
    pub(crate) fn ensure_configured(&self) -> Result<()> {
        ensure_configured(
            self.provider_name(),
            &self.config,
            &Self::metadata().required_keys(),
        )
    }

    pub(crate) fn database_url(&self) -> String {
        format!(
            "{}/databases/{}",
            self.config.base_url(),
            urlencoding::encode(self.config.database_id.trim())
        )
    }

    pub(crate) fn documents_url(&self, kind: RecordKind) -> String {
        format!(
            "{}/collections/{}/documents",
            self.database_url(),
            urlencoding::encode(self.config.collection(kind))
        )
    }

    fn document_url(&self, kind: RecordKind, id: &str) -> String {
        format!("{}/{}", self.documents_url(kind), urlencoding::encode(id))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("X-Appwrite-Project", self.config.project_id.trim())
            .header("X-Appwrite-Key", self.config.api_key.trim())
    }

    /// Sends an authenticated request and returns the response body.
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
        let url = format!(
            "{}?queries[]={}",
            self.documents_url(R::KIND),
            urlencoding::encode(&format!(r#"{{"method":"limit","values":[{LIST_LIMIT}]}}"#))
        );
        let text = self.request(Method::GET, &url, None, ErrorContext::default()).await?;
        let list: DocumentList = HttpUtils::parse_json(&text, self.provider_name())?;
        from_native_list(self.provider_name(), &list.documents, fields(R::KIND))
    }

    pub(crate) async fn create<R: Record>(&self, record: &R) -> Result<R> {
        let data = to_native(self.provider_name(), record, fields(R::KIND))?;
        let body = json!({ "documentId": UNIQUE_ID, "data": data });
        let text = self
            .request(Method::POST, &self.documents_url(R::KIND), Some(&body), ErrorContext::default())
            .await?;
        self.parse_document(&text)
    }

    pub(crate) async fn update<R: Record>(&self, id: &str, record: &R) -> Result<R> {
        let data = to_native(self.provider_name(), record, fields(R::KIND))?;
        let body = json!({ "data": data });
        let text = self
            .request(
                Method::PATCH,
                &self.document_url(R::KIND, id),
                Some(&body),
                ErrorContext::record(id),
            )
            .await?;
        self.parse_document(&text)
    }

    pub(crate) async fn delete(&self, kind: RecordKind, id: &str) -> Result<bool> {
        self.request(Method::DELETE, &self.document_url(kind, id), None, ErrorContext::record(id))
            .await?;
        Ok(true)
    }

    fn parse_document<R: Record>(&self, text: &str) -> Result<R> {
        let document: Map<String, Value> = parse_object(self, text)?;
        from_native(self.provider_name(), &document, fields(R::KIND))
    }
}
