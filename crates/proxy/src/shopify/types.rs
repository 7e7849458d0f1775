//! Upstream response shape of the `ProductSearch` query.
//!
//! Mirrors the query document with every level optional, so a store that
//! omits or nulls any field still deserializes. Absent levels are read as
//! empty through the accessor methods.

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Top-level GraphQL response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphQLResponse {
    pub data: Option<ProductSearchData>,
    /// Raw `errors` member; any non-null value marks the response as failed.
    pub errors: Option<Value>,
}

impl GraphQLResponse {
    /// Product edges in upstream order, empty when any level is missing.
    #[must_use]
    pub fn product_edges(&self) -> &[ProductEdge] {
        self.data
            .as_ref()
            .and_then(|d| d.products.as_ref())
            .and_then(|p| p.edges.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductSearchData {
    pub products: Option<Connection<ProductNode>>,
}

/// A cursor-paginated list of nodes.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    pub edges: Option<Vec<Edge<T>>>,
}

impl<T> Connection<T> {
    /// The first edge's node, if the first edge has one.
    #[must_use]
    pub fn first_node(&self) -> Option<&T> {
        self.edges.as_deref()?.first()?.node.as_ref()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: Option<T>,
}

pub type ProductEdge = Edge<ProductNode>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    pub id: Option<String>,
    pub title: Option<String>,
    pub handle: Option<String>,
    pub online_store_url: Option<String>,
    pub featured_image: Option<JsonObject<ImageNode>>,
    pub images: Option<Connection<ImageNode>>,
    pub variants: Option<Connection<VariantNode>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    pub url: Option<String>,
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariantNode {
    pub price: Option<JsonObject<MoneyNode>>,
    #[serde(rename = "priceV2")]
    pub price_v2: Option<JsonObject<MoneyNode>>,
}

/// A `MoneyV2` object. The amount is kept loosely typed until conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyNode {
    pub amount: Option<Value>,
    pub currency_code: Option<String>,
}

/// A JSON object field that remembers whether it had any keys.
///
/// `{}` and `{"url": null}` deserialize to the same `T`, but only the first
/// counts as empty for the fallback rules in [`super::conversions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonObject<T> {
    inner: T,
    empty: bool,
}

impl<T> JsonObject<T> {
    /// The typed object.
    #[must_use]
    pub const fn inner(&self) -> &T {
        &self.inner
    }

    /// True for a literal `{}`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.empty
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for JsonObject<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let empty = map.is_empty();
        let inner = T::deserialize(Value::Object(map)).map_err(D::Error::custom)?;
        Ok(Self { inner, empty })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: Value) -> GraphQLResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_levels_yield_no_edges() {
        for body in [
            json!({}),
            json!({"data": null}),
            json!({"data": {}}),
            json!({"data": {"products": null}}),
            json!({"data": {"products": {}}}),
            json!({"data": {"products": {"edges": null}}}),
        ] {
            assert!(parse(body.clone()).product_edges().is_empty(), "{body}");
        }
    }

    #[test]
    fn test_errors_member_is_kept_raw() {
        let response = parse(json!({"errors": [{"message": "boom"}], "data": null}));
        assert_eq!(response.errors, Some(json!([{"message": "boom"}])));

        let response = parse(json!({"errors": null, "data": {}}));
        assert!(response.errors.is_none());
    }

    #[test]
    fn test_first_node_is_only_the_first_edge() {
        let connection: Connection<ImageNode> =
            serde_json::from_value(json!({"edges": [{}, {"node": {"url": "b"}}]})).unwrap();
        assert!(connection.first_node().is_none());

        let connection: Connection<ImageNode> =
            serde_json::from_value(json!({"edges": [{"node": {"url": "a"}}, {"node": {"url": "b"}}]}))
                .unwrap();
        assert_eq!(connection.first_node().unwrap().url.as_deref(), Some("a"));

        let connection: Connection<ImageNode> = serde_json::from_value(json!({})).unwrap();
        assert!(connection.first_node().is_none());
    }

    #[test]
    fn test_product_node_field_names() {
        let node: ProductNode = serde_json::from_value(json!({
            "id": "gid://shopify/Product/1",
            "onlineStoreUrl": "https://shop.com/products/hat",
            "featuredImage": {"url": "https://cdn/hat.png", "altText": "Hat", "width": 100},
            "variants": {"edges": [{"node": {"priceV2": {"amount": "1.00", "currencyCode": "USD"}}}]}
        }))
        .unwrap();

        assert_eq!(node.online_store_url.as_deref(), Some("https://shop.com/products/hat"));
        let image = node.featured_image.unwrap();
        assert_eq!(image.inner().alt_text.as_deref(), Some("Hat"));
        assert!(!image.is_empty());
        let variant = node.variants.unwrap();
        let price = variant.first_node().unwrap().price_v2.as_ref().unwrap();
        assert_eq!(price.inner().currency_code.as_deref(), Some("USD"));
    }

    #[test]
    fn test_json_object_tracks_key_presence() {
        let variant: VariantNode = serde_json::from_value(json!({
            "price": {},
            "priceV2": {"amount": null, "currencyCode": null}
        }))
        .unwrap();

        let price = variant.price.unwrap();
        assert!(price.is_empty());
        assert_eq!(price.inner(), &MoneyNode::default());

        let price_v2 = variant.price_v2.unwrap();
        assert!(!price_v2.is_empty());
        assert_eq!(price_v2.inner(), &MoneyNode::default());

        let variant: VariantNode = serde_json::from_value(json!({"price": null})).unwrap();
        assert!(variant.price.is_none());
        assert!(variant.price_v2.is_none());
    }

    #[test]
    fn test_json_object_rejects_non_objects() {
        let result = serde_json::from_value::<VariantNode>(json!({"price": "1.00"}));
        assert!(result.is_err());
    }
}
