use crate::http_handler::http_client::HTTPClient;
use crate::http_handler::http_response::response_common::{HTTPError, HTTPResponseType};
use strum_macros::Display;

#[derive(Debug, Copy, Clone)]
pub(crate) enum HTTPRequestMethod {
    Get,
    Post,
    Put,
}

#[derive(Debug, Display)]
pub enum RequestError {
    FailedToSend,
}

impl std::error::Error for RequestError {}

pub(crate) trait HTTPRequestType {
    type Response: HTTPResponseType;
    fn endpoint(&self) -> &str;
    fn request_method(&self) -> HTTPRequestMethod;

    fn build(&self, client: &HTTPClient) -> reqwest::RequestBuilder {
        let url = format!("{}{}", client.url(), self.endpoint());
        match self.request_method() {
            HTTPRequestMethod::Get => client.client().get(url),
            HTTPRequestMethod::Post => client.client().post(url),
            HTTPRequestMethod::Put => client.client().put(url),
        }
    }
}

pub(crate) trait NoBodyHTTPRequestType: HTTPRequestType {
    async fn send_request(
        &self,
        client: &HTTPClient,
    ) -> Result<<Self::Response as HTTPResponseType>::ParsedResponseType, HTTPError> {
        let response = self
            .build(client)
            .send()
            .await
            .map_err(|_| HTTPError::HTTPRequestError(RequestError::FailedToSend))?;
        Self::Response::read_response(response).await.map_err(HTTPError::HTTPResponseError)
    }
}

pub(crate) trait JSONBodyHTTPRequestType: HTTPRequestType {
    type Body: serde::Serialize;
    fn body(&self) -> &Self::Body;

    async fn send_request(
        &self,
        client: &HTTPClient,
    ) -> Result<<Self::Response as HTTPResponseType>::ParsedResponseType, HTTPError> {
        let response = self
            .build(client)
            .json(self.body())
            .send()
            .await
            .map_err(|_| HTTPError::HTTPRequestError(RequestError::FailedToSend))?;
        Self::Response::read_response(response).await.map_err(HTTPError::HTTPResponseError)
    }
}
