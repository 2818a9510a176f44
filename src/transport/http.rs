use super::{TransportClient, TransportError, TransportResponse, UploadForm, FILE_FIELD};
use crate::upload::request::VideoSource;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;

/// Posts upload forms to the dashboard backend over HTTP.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn build_form(&self, form: UploadForm) -> Result<Form, TransportError> {
        let UploadForm { file, fields } = form;
        let bytes = match file.source {
            VideoSource::Path(path) => tokio::fs::read(&path).await?,
            VideoSource::Memory(data) => data,
        };

        let part = Part::bytes(bytes)
            .file_name(file.name)
            .mime_str(&file.mime_type)
            .map_err(|e| TransportError::Request(format!("Invalid MIME type: {}", e)))?;

        Ok(fields
            .into_iter()
            .fold(Form::new().part(FILE_FIELD, part), |form, (name, value)| {
                form.text(name, value)
            }))
    }

    fn map_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout.as_secs())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl TransportClient for HttpTransport {
    async fn post(&self, endpoint: &str, form: UploadForm) -> Result<TransportResponse, TransportError> {
        let url = self.build_url(endpoint);
        info!("[Upload] POST {} file={} ({} bytes)", url, form.file.name, form.file.size_bytes);

        let body = self.build_form(form).await?;
        let response = self
            .client
            .post(&url)
            .multipart(body)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        debug!("[Upload] {} responded with status {}", url, status);

        let body = response.text().await.map_err(|e| {
            warn!("[Upload] {} body could not be read: {}", url, e);
            e.to_string()
        });
        Ok(TransportResponse { status, body })
    }
}
