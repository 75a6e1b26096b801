//! Models API surface.

use std::sync::Arc;

use gemini_quickstart_types::content::Content;
use gemini_quickstart_types::models::{
    GenerateContentConfig, GenerateContentRequest, ListModelsConfig, ListModelsResponse, Model,
};
use gemini_quickstart_types::response::GenerateContentResponse;
use serde::de::DeserializeOwned;

use crate::client::ClientInner;
use crate::error::{Error, Result};

#[derive(Clone)]
pub struct Models {
    pub(crate) inner: Arc<ClientInner>,
}

impl Models {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// 生成内容（默认配置）。
    ///
    /// # Errors
    /// 当网络请求失败、服务返回非 2xx 状态或响应无法解析时返回错误。
    pub async fn generate_content(
        &self,
        model: impl Into<String>,
        contents: Vec<Content>,
    ) -> Result<GenerateContentResponse> {
        self.generate_content_with_config(model, contents, GenerateContentConfig::default())
            .await
    }

    /// 生成内容（自定义配置）。
    ///
    /// # Errors
    /// 当网络请求失败、服务返回非 2xx 状态或响应无法解析时返回错误。
    pub async fn generate_content_with_config(
        &self,
        model: impl Into<String>,
        contents: Vec<Content>,
        config: GenerateContentConfig,
    ) -> Result<GenerateContentResponse> {
        let model = model.into();
        let request = GenerateContentRequest::new(contents, config);
        let url = build_model_method_url(&self.inner, &model, "generateContent");

        let request = self.inner.http.post(url).json(&request);
        let response = ensure_success(self.inner.send(request).await?).await?;
        decode_json(response).await
    }

    /// 列出模型（只取第一页）。
    ///
    /// # Errors
    /// 当网络请求失败、服务返回非 2xx 状态或响应无法解析时返回错误。
    pub async fn list(&self) -> Result<ListModelsResponse> {
        self.list_with_config(ListModelsConfig::default()).await
    }

    /// 列出模型（带分页参数）。
    ///
    /// # Errors
    /// 当 URL 无效、网络请求失败、服务返回非 2xx 状态或响应无法解析时返回错误。
    pub async fn list_with_config(&self, config: ListModelsConfig) -> Result<ListModelsResponse> {
        let url = build_models_list_url(&self.inner, &config)?;
        let request = self.inner.http.get(url);
        let response = ensure_success(self.inner.send(request).await?).await?;
        decode_json(response).await
    }

    /// 获取单个模型信息。
    ///
    /// # Errors
    /// 当网络请求失败、服务返回非 2xx 状态（如模型不存在）或响应无法解析时返回错误。
    pub async fn get(&self, model: impl Into<String>) -> Result<Model> {
        let url = build_model_get_url(&self.inner, &model.into());
        let request = self.inner.http.get(url);
        let response = ensure_success(self.inner.send(request).await?).await?;
        decode_json(response).await
    }
}

/// 绑定到单个模型的句柄。
#[derive(Clone)]
pub struct GenerativeModel {
    models: Models,
    name: String,
}

impl GenerativeModel {
    pub(crate) fn new(models: Models, name: impl Into<String>) -> Self {
        Self {
            models,
            name: name.into(),
        }
    }

    /// 绑定的模型名。
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 发送一条用户文本并等待完整响应。
    ///
    /// # Errors
    /// 同 [`Models::generate_content`]。
    pub async fn generate_content(
        &self,
        prompt: impl Into<String>,
    ) -> Result<GenerateContentResponse> {
        self.models
            .generate_content(&self.name, vec![Content::user(prompt)])
            .await
    }

    /// 以显式内容与配置生成。
    ///
    /// # Errors
    /// 同 [`Models::generate_content_with_config`]。
    pub async fn generate_content_with_config(
        &self,
        contents: Vec<Content>,
        config: GenerateContentConfig,
    ) -> Result<GenerateContentResponse> {
        self.models
            .generate_content_with_config(&self.name, contents, config)
            .await
    }
}

/// 取出响应文本；没有文本时给出拦截或结束原因。
///
/// # Errors
/// 当首个候选不含文本 part 时返回 [`Error::EmptyResponse`]。
pub fn text_or_err(response: &GenerateContentResponse) -> Result<String> {
    if let Some(text) = response.text() {
        return Ok(text);
    }
    let message = if let Some(reason) = response.block_reason() {
        format!("prompt blocked: {reason:?}")
    } else if let Some(reason) = response.finish_reason() {
        format!("no text in first candidate (finish reason {reason:?})")
    } else if response.candidates.is_empty() {
        "no candidates returned".to_string()
    } else {
        "no text in first candidate".to_string()
    };
    Err(Error::EmptyResponse { message })
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!(error = %err, "failed to read error body");
            String::new()
        }
    };
    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or_default().to_string()
    } else {
        body
    };
    tracing::warn!(status = status.as_u16(), "request failed");
    Err(Error::ApiError {
        status: status.as_u16(),
        message,
    })
}

async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

fn transform_model_name(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

fn build_model_method_url(inner: &ClientInner, model: &str, method: &str) -> String {
    let model = transform_model_name(model);
    let base = &inner.api_client.base_url;
    let version = &inner.api_client.api_version;
    format!("{base}{version}/{model}:{method}")
}

fn build_model_get_url(inner: &ClientInner, model: &str) -> String {
    let model = transform_model_name(model);
    let base = &inner.api_client.base_url;
    let version = &inner.api_client.api_version;
    format!("{base}{version}/{model}")
}

fn build_models_list_url(inner: &ClientInner, config: &ListModelsConfig) -> Result<String> {
    let base = &inner.api_client.base_url;
    let version = &inner.api_client.api_version;
    add_list_query_params(&format!("{base}{version}/models"), config)
}

fn add_list_query_params(url: &str, config: &ListModelsConfig) -> Result<String> {
    let mut url = reqwest::Url::parse(url).map_err(|err| Error::InvalidConfig {
        message: err.to_string(),
    })?;
    if config.page_size.is_some() || config.page_token.is_some() {
        let mut pairs = url.query_pairs_mut();
        if let Some(page_size) = config.page_size {
            pairs.append_pair("pageSize", &page_size.to_string());
        }
        if let Some(page_token) = &config.page_token {
            pairs.append_pair("pageToken", page_token);
        }
    }
    Ok(url.to_string())
}
