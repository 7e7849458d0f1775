//! Conversion from the upstream search response to [`ProductResult`]s.
//!
//! Missing upstream data degrades to empty strings or `None`. The one hard
//! failure is a selected price that cannot be read as a number.

use serde_json::Value;
use storefront_search_core::{Money, MoneyError, ProductResult};

use super::ShopifyError;
use super::types::{
    Connection, GraphQLResponse, ImageNode, JsonObject, MoneyNode, ProductEdge, ProductNode,
    VariantNode,
};

/// Convert every product edge of a search response, preserving order.
///
/// # Errors
///
/// Returns [`ShopifyError::InvalidPrice`] if any product's price is malformed.
pub fn convert_search_response(
    response: &GraphQLResponse,
) -> Result<Vec<ProductResult>, ShopifyError> {
    response
        .product_edges()
        .iter()
        .map(convert_product_edge)
        .collect()
}

/// Convert one edge. An edge without a node becomes an all-default product.
///
/// # Errors
///
/// Returns [`ShopifyError::InvalidPrice`] if the product's price is malformed.
pub fn convert_product_edge(edge: &ProductEdge) -> Result<ProductResult, ShopifyError> {
    let default_node = ProductNode::default();
    let node = edge.node.as_ref().unwrap_or(&default_node);
    let id = node.id.clone().unwrap_or_default();

    let price = resolve_price(node.variants.as_ref())
        .map(convert_money)
        .transpose()
        .map_err(|source| ShopifyError::InvalidPrice {
            product_id: id.clone(),
            source,
        })?;

    let image = resolve_image(node.featured_image.as_ref(), node.images.as_ref());

    Ok(ProductResult {
        id,
        title: node.title.clone().unwrap_or_default(),
        handle: node.handle.clone().unwrap_or_default(),
        url: node.online_store_url.clone(),
        price,
        image: image.and_then(|i| i.url.clone()),
        image_alt: image.and_then(|i| i.alt_text.clone()),
    })
}

/// Pick the price node of the first variant.
///
/// Order: `price`, then `priceV2`. A missing, null or `{}` field is skipped;
/// any other object is selected even if its members are null.
#[must_use]
pub fn resolve_price(variants: Option<&Connection<VariantNode>>) -> Option<&MoneyNode> {
    let variant = variants?.first_node()?;

    [variant.price.as_ref(), variant.price_v2.as_ref()]
        .into_iter()
        .flatten()
        .find(|money| !money.is_empty())
        .map(JsonObject::inner)
}

/// Pick the image to show for a product.
///
/// Order: `featuredImage`, then the first gallery image. The gallery is only
/// used when `featuredImage` is missing, null or `{}`.
#[must_use]
pub fn resolve_image<'a>(
    featured: Option<&'a JsonObject<ImageNode>>,
    gallery: Option<&'a Connection<ImageNode>>,
) -> Option<&'a ImageNode> {
    featured
        .filter(|image| !image.is_empty())
        .map(JsonObject::inner)
        .or_else(|| gallery?.first_node())
}

/// Convert a selected price node into [`Money`].
///
/// # Errors
///
/// Returns [`MoneyError`] if the amount is missing or not numeric, or if the
/// currency code is missing.
pub fn convert_money(money: &MoneyNode) -> Result<Money, MoneyError> {
    let currency_code = money
        .currency_code
        .clone()
        .ok_or(MoneyError::MissingCurrencyCode)?;
    let amount = money.amount.as_ref().unwrap_or(&Value::Null);

    Money::from_json_amount(amount, currency_code)
}
