use crate::config::EtherpadSettings;
use crate::error::{DocupadError, Result};
use serde::Deserialize;
use std::time::Duration;

/// Pinned Etherpad HTTP API protocol version for all structured calls.
pub const API_VERSION: &str = "1.2.13";

/// The surface of the remote collaborative-editing service needed by the
/// session logic: capability probe, pad lifecycle, content push/pull in
/// plain-text and rich-text form, and the raw interchange export.
///
/// Abstracted behind a trait so session logic is testable without a network,
/// the same way [`crate::store::DocumentStore`] decouples commands from the
/// filesystem.
pub trait PadService {
    /// Capability/authorization probe.
    fn check_token(&self) -> Result<()>;

    /// Identifiers of every pad currently known to the service.
    fn list_pad_ids(&self) -> Result<Vec<String>>;

    /// Create a pad bound to `pad_id`, with a human-readable name.
    fn create_pad(&self, pad_id: &str, name: &str) -> Result<()>;

    fn delete_pad(&self, pad_id: &str) -> Result<()>;

    fn set_text(&self, pad_id: &str, text: &str) -> Result<()>;

    fn set_html(&self, pad_id: &str, html: &str) -> Result<()>;

    fn get_text(&self, pad_id: &str) -> Result<String>;

    fn get_html(&self, pad_id: &str) -> Result<String>;

    /// Raw bytes of the pad in a named interchange format, fetched from
    /// `{root}/p/{id}/export/{type}` under the client's configured timeout.
    fn export(&self, pad_id: &str, export_type: &str) -> Result<Vec<u8>>;
}

/// Every structured Etherpad response wraps its payload in this envelope.
/// `code` 0 is success; anything else is an explicit rejection.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    code: i64,
    message: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct PadIds {
    #[serde(rename = "padIDs")]
    pad_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PadText {
    text: String,
}

#[derive(Debug, Deserialize)]
struct PadHtml {
    html: String,
}

/// Blocking HTTP client for one Etherpad instance. The API key rides along
/// on every call; the timeout bounds structured calls and export fetches
/// alike.
pub struct EtherpadClient {
    base_url: String,
    api_key: String,
    http: reqwest::blocking::Client,
}

impl EtherpadClient {
    pub fn new(settings: &EtherpadSettings) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| {
                DocupadError::Connectivity(format!("failed to build HTTP client: {}", e))
            })?;
        Ok(Self {
            base_url: settings.url.trim_end_matches('/').to_string(),
            api_key: settings.apikey.clone(),
            http,
        })
    }

    /// Read/write URL of a pad, as embedded by the iframe fragment.
    pub fn pad_url(&self, pad_id: &str) -> String {
        format!("{}/p/{}", self.base_url, pad_id)
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/api/{}/{}", self.base_url, API_VERSION, method)
    }

    fn export_url(&self, pad_id: &str, export_type: &str) -> String {
        format!("{}/p/{}/export/{}", self.base_url, pad_id, export_type)
    }

    fn call(&self, method: &str, params: &[(&str, &str)]) -> Result<serde_json::Value> {
        let mut form: Vec<(&str, &str)> = vec![("apikey", self.api_key.as_str())];
        form.extend_from_slice(params);

        tracing::debug!(method, "etherpad api call");
        let response = self
            .http
            .post(self.api_url(method))
            .form(&form)
            .send()
            .map_err(connectivity)?;
        let body = response.text().map_err(connectivity)?;

        let envelope: ApiEnvelope = serde_json::from_str(&body).map_err(|e| {
            DocupadError::Connectivity(format!("malformed response from {}: {}", method, e))
        })?;
        if envelope.code != 0 {
            return Err(DocupadError::ServiceRejection(format!(
                "{}: {}",
                method, envelope.message
            )));
        }
        Ok(envelope.data)
    }

    fn call_data<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let data = self.call(method, params)?;
        serde_json::from_value(data).map_err(|e| {
            DocupadError::Connectivity(format!("malformed response from {}: {}", method, e))
        })
    }
}

impl PadService for EtherpadClient {
    fn check_token(&self) -> Result<()> {
        self.call("checkToken", &[])?;
        Ok(())
    }

    fn list_pad_ids(&self) -> Result<Vec<String>> {
        let ids: PadIds = self.call_data("listAllPads", &[])?;
        Ok(ids.pad_ids)
    }

    fn create_pad(&self, pad_id: &str, name: &str) -> Result<()> {
        self.call("createPad", &[("padID", pad_id), ("padName", name)])?;
        Ok(())
    }

    fn delete_pad(&self, pad_id: &str) -> Result<()> {
        self.call("deletePad", &[("padID", pad_id)])?;
        Ok(())
    }

    fn set_text(&self, pad_id: &str, text: &str) -> Result<()> {
        self.call("setText", &[("padID", pad_id), ("text", text)])?;
        Ok(())
    }

    fn set_html(&self, pad_id: &str, html: &str) -> Result<()> {
        self.call("setHTML", &[("padID", pad_id), ("html", html)])?;
        Ok(())
    }

    fn get_text(&self, pad_id: &str) -> Result<String> {
        let data: PadText = self.call_data("getText", &[("padID", pad_id)])?;
        Ok(data.text)
    }

    fn get_html(&self, pad_id: &str) -> Result<String> {
        let data: PadHtml = self.call_data("getHTML", &[("padID", pad_id)])?;
        Ok(data.html)
    }

    fn export(&self, pad_id: &str, export_type: &str) -> Result<Vec<u8>> {
        let url = self.export_url(pad_id, export_type);
        tracing::debug!(url = url.as_str(), "etherpad export fetch");
        let response = self.http.get(&url).send().map_err(connectivity)?;
        if !response.status().is_success() {
            return Err(DocupadError::ServiceRejection(format!(
                "export returned HTTP {}",
                response.status()
            )));
        }
        let bytes = response.bytes().map_err(connectivity)?;
        Ok(bytes.to_vec())
    }
}

fn connectivity(err: reqwest::Error) -> DocupadError {
    if err.is_timeout() {
        DocupadError::Connectivity(format!("request timed out: {}", err))
    } else {
        DocupadError::Connectivity(err.to_string())
    }
}
