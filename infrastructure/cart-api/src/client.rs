use std::time::Duration;

use reqwest::Client;
use url::Url;

/// Default request timeout for remote cart calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared HTTP client configuration for the remote cart service.
pub struct CartApiClient {
    pub client: Client,
    cart_url: Url,
    items_url: Url,
}

impl CartApiClient {
    /// `base_url` is the API root, e.g. `https://api.example.com/v1`; the
    /// cart endpoints are resolved beneath it.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, url::ParseError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        let mut root = base_url;
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }

        Ok(Self {
            client,
            cart_url: root.join("cart")?,
            items_url: root.join("cart/items")?,
        })
    }

    /// Returns the cart endpoint URL.
    pub fn cart_url(&self) -> &Url {
        &self.cart_url
    }

    /// Returns the cart items endpoint URL.
    pub fn items_url(&self) -> &Url {
        &self.items_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_resolve_endpoints_under_base_path() {
        let base = Url::parse("https://api.kitchenkettles.test/v1").unwrap();

        let client = CartApiClient::new(base, DEFAULT_TIMEOUT).unwrap();

        assert_eq!(
            client.cart_url().as_str(),
            "https://api.kitchenkettles.test/v1/cart"
        );
        assert_eq!(
            client.items_url().as_str(),
            "https://api.kitchenkettles.test/v1/cart/items"
        );
    }

    #[test]
    fn should_accept_base_with_trailing_slash() {
        let base = Url::parse("http://localhost:4000/").unwrap();

        let client = CartApiClient::new(base, DEFAULT_TIMEOUT).unwrap();

        assert_eq!(client.cart_url().as_str(), "http://localhost:4000/cart");
    }
}
