use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};

use business::domain::cart::manager::CartManager;

use crate::api::cart::dto::{
    AddCartItemRequest, CartResponse, UpdateQuantityRequest, validate_id,
};
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::tags::ApiTags;

pub struct CartApi {
    cart: Arc<dyn CartManager>,
}

impl CartApi {
    pub fn new(cart: Arc<dyn CartManager>) -> Self {
        Self { cart }
    }

    fn current(&self) -> Json<CartResponse> {
        Json(self.cart.snapshot().into())
    }
}

/// Shopping cart API
///
/// Every mutation answers with the local cart right away. When a session
/// token is stored the server cart is updated in the background and may
/// revise the cart shortly after.
#[OpenApi]
impl CartApi {
    /// Get the cart
    #[oai(path = "/cart", method = "get", tag = "ApiTags::Cart")]
    async fn get(&self) -> Json<CartResponse> {
        self.current()
    }

    /// Add an item
    ///
    /// Increments the quantity when the product is already in the cart.
    #[oai(path = "/cart/items", method = "post", tag = "ApiTags::Cart")]
    async fn add_item(&self, body: Json<AddCartItemRequest>) -> CartMutationResponse {
        match body.0.into_product() {
            Ok((product, qty)) => {
                self.cart.add_item(product, qty);
                CartMutationResponse::Ok(self.current())
            }
            Err(err) => CartMutationResponse::BadRequest(err.into_error_response().1),
        }
    }

    /// Set an item's quantity
    ///
    /// Sets the absolute quantity; 0 removes the item.
    #[oai(path = "/cart/items/:id", method = "put", tag = "ApiTags::Cart")]
    async fn update_quantity(
        &self,
        id: Path<String>,
        body: Json<UpdateQuantityRequest>,
    ) -> CartMutationResponse {
        match validate_id(&id.0) {
            Ok(id) => {
                self.cart.update_qty(&id.into(), body.0.qty);
                CartMutationResponse::Ok(self.current())
            }
            Err(err) => CartMutationResponse::BadRequest(err.into_error_response().1),
        }
    }

    /// Remove an item
    #[oai(path = "/cart/items/:id", method = "delete", tag = "ApiTags::Cart")]
    async fn remove_item(&self, id: Path<String>) -> CartMutationResponse {
        match validate_id(&id.0) {
            Ok(id) => {
                self.cart.remove_item(&id.into());
                CartMutationResponse::Ok(self.current())
            }
            Err(err) => CartMutationResponse::BadRequest(err.into_error_response().1),
        }
    }

    /// Empty the cart
    #[oai(path = "/cart", method = "delete", tag = "ApiTags::Cart")]
    async fn clear(&self) -> Json<CartResponse> {
        self.cart.clear_cart();
        self.current()
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CartMutationResponse {
    #[oai(status = 200)]
    Ok(Json<CartResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
}
