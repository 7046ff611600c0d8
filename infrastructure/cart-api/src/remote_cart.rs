use async_trait::async_trait;
use reqwest::RequestBuilder;

use business::domain::auth::token::AuthToken;
use business::domain::cart::remote::{
    AddItemRequest, RemoteCart, RemoteCartService, RemoveItemRequest, UpdateItemRequest,
};
use business::domain::errors::RemoteCartError;

use crate::client::CartApiClient;
use crate::envelope::decode_envelope;

/// Remote cart service reached over the backend's REST API.
pub struct RemoteCartHttp {
    api: CartApiClient,
}

impl RemoteCartHttp {
    pub fn new(api: CartApiClient) -> Self {
        Self { api }
    }

    async fn send(
        &self,
        request: RequestBuilder,
        token: &AuthToken,
    ) -> Result<RemoteCart, RemoteCartError> {
        let response = request
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(RemoteCartError::transport)?;

        let status = response.status().as_u16();
        let url = response.url().clone();
        let body = response
            .bytes()
            .await
            .map_err(RemoteCartError::transport)?;

        tracing::debug!(%url, status, bytes = body.len(), "remote cart response");
        decode_envelope(status, &body)
    }
}

#[async_trait]
impl RemoteCartService for RemoteCartHttp {
    async fn fetch_cart(&self, token: &AuthToken) -> Result<RemoteCart, RemoteCartError> {
        let request = self.api.client.get(self.api.cart_url().clone());
        self.send(request, token).await
    }

    async fn add_item(
        &self,
        token: &AuthToken,
        request: &AddItemRequest,
    ) -> Result<RemoteCart, RemoteCartError> {
        let request = self
            .api
            .client
            .post(self.api.items_url().clone())
            .json(request);
        self.send(request, token).await
    }

    async fn update_item(
        &self,
        token: &AuthToken,
        request: &UpdateItemRequest,
    ) -> Result<RemoteCart, RemoteCartError> {
        let request = self
            .api
            .client
            .put(self.api.items_url().clone())
            .json(request);
        self.send(request, token).await
    }

    async fn remove_item(
        &self,
        token: &AuthToken,
        request: &RemoveItemRequest,
    ) -> Result<RemoteCart, RemoteCartError> {
        let request = self
            .api
            .client
            .delete(self.api.items_url().clone())
            .json(request);
        self.send(request, token).await
    }

    async fn clear_cart(&self, token: &AuthToken) -> Result<RemoteCart, RemoteCartError> {
        let request = self.api.client.delete(self.api.cart_url().clone());
        self.send(request, token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::DEFAULT_TIMEOUT;
    use business::domain::shared::value_objects::ProductId;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;
    use url::Url;

    /// Serves exactly one HTTP response and hands back the raw request text.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }

            let response = format!(
                "{}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).to_string()
        });

        (Url::parse(&format!("http://{}/api", addr)).unwrap(), handle)
    }

    fn remote(base: Url) -> RemoteCartHttp {
        RemoteCartHttp::new(CartApiClient::new(base, DEFAULT_TIMEOUT).unwrap())
    }

    fn token() -> AuthToken {
        AuthToken::parse("tok-123").unwrap()
    }

    #[tokio::test]
    async fn should_post_item_with_bearer_token_and_decode_snapshot() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"statusCode":200,"success":true,"data":{"items":[{"productId":"p1","qty":3,"price":500,"title":"Kettle"}],"total":1500}}"#,
        )
        .await;

        let snapshot = remote(base)
            .add_item(
                &token(),
                &AddItemRequest {
                    product_id: ProductId::from("p1"),
                    qty: 1,
                    variant_id: None,
                },
            )
            .await
            .unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/cart/items "));
        assert!(request.to_lowercase().contains("authorization: bearer tok-123"));
        assert!(request.contains(r#"{"productId":"p1","qty":1}"#));
        assert_eq!(snapshot.items[0].qty, 3);
    }

    #[tokio::test]
    async fn should_fetch_cart_with_get() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"statusCode":200,"success":true,"data":{"items":[],"total":0}}"#,
        )
        .await;

        let snapshot = remote(base).fetch_cart(&token()).await.unwrap();

        assert!(server.await.unwrap().starts_with("GET /api/cart "));
        assert!(snapshot.items.is_empty());
    }

    #[tokio::test]
    async fn should_report_unauthorized_response() {
        let (base, server) = serve_once(
            "HTTP/1.1 401 Unauthorized",
            r#"{"statusCode":401,"success":false,"error":"jwt expired"}"#,
        )
        .await;

        let result = remote(base).clear_cart(&token()).await;

        assert!(server.await.unwrap().starts_with("DELETE /api/cart "));
        assert!(matches!(result, Err(RemoteCartError::Unauthorized)));
    }

    #[tokio::test]
    async fn should_report_transport_error_when_nothing_listens() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let base = Url::parse(&format!("http://{}/api", addr)).unwrap();

        let result = remote(base).fetch_cart(&token()).await;

        assert!(matches!(result, Err(RemoteCartError::Transport(_))));
    }
}
