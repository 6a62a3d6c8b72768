use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum APIErrorVariant {
    Network,
    MalformedResponse,
    BadClientData,
    NotFound,
    InternalError,
    UnexpectedStatusCode,
}

#[derive(Debug)]
pub struct APIError {
    pub variant: APIErrorVariant,
    pub message: String,
}

pub type APIResponse<T> = Result<T, APIError>;

pub(crate) struct BaseClient {
    client: Client,
    address: String,
}

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            client: Client::new(),
            address: format!("{}/api/v1/", address.trim_end_matches('/')),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    async fn send(&self, request: RequestBuilder) -> APIResponse<Response> {
        request.send().await.map_err(|e| APIError {
            variant: APIErrorVariant::Network,
            message: e.to_string(),
        })
    }

    async fn handle_api_response<T: DeserializeOwned>(
        &self,
        res: Response,
        expected_statuses: &[StatusCode],
    ) -> APIResponse<T> {
        let status = res.status();
        if expected_statuses.contains(&status) {
            return res.json::<T>().await.map_err(|e| APIError {
                variant: APIErrorVariant::MalformedResponse,
                message: e.to_string(),
            });
        }

        let variant = match status {
            StatusCode::BAD_REQUEST => APIErrorVariant::BadClientData,
            StatusCode::NOT_FOUND => APIErrorVariant::NotFound,
            StatusCode::INTERNAL_SERVER_ERROR => APIErrorVariant::InternalError,
            _ => APIErrorVariant::UnexpectedStatusCode,
        };
        let message = res.text().await.unwrap_or_default();
        Err(APIError { variant, message })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: String,
        expected_status: StatusCode,
    ) -> APIResponse<T> {
        let res = self.send(self.client.get(&self.url(&path))).await?;
        self.handle_api_response(res, &[expected_status]).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: String,
        expected_status: StatusCode,
    ) -> APIResponse<T> {
        let res = self.send(self.client.delete(&self.url(&path))).await?;
        self.handle_api_response(res, &[expected_status]).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        body: impl Serialize,
        path: String,
        expected_status: StatusCode,
    ) -> APIResponse<T> {
        self.post_expecting_any(body, path, &[expected_status])
            .await
    }

    /// For endpoints that respond with different success codes
    pub async fn post_expecting_any<T: DeserializeOwned>(
        &self,
        body: impl Serialize,
        path: String,
        expected_statuses: &[StatusCode],
    ) -> APIResponse<T> {
        let res = self
            .send(self.client.post(&self.url(&path)).json(&body))
            .await?;
        self.handle_api_response(res, expected_statuses).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        body: impl Serialize,
        path: String,
        expected_status: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .send(self.client.put(&self.url(&path)).json(&body))
            .await?;
        self.handle_api_response(res, &[expected_status]).await
    }
}
