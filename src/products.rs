//! Products

use std::{borrow::Borrow, fmt};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product identifier, owned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Unit price, in no particular currency
    pub price: Decimal,

    /// Image reference
    pub image_url: String,
}

impl Product {
    /// Creates a product without an image.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image_url: String::new(),
        }
    }

    /// Sets the image reference.
    #[must_use]
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }
}

/// Anything the cart can match against a line item.
///
/// Matching is by product id alone; name, price and image are ignored.
pub trait ProductRef {
    /// Id of the referenced product.
    fn product_id(&self) -> &ProductId;
}

impl ProductRef for ProductId {
    fn product_id(&self) -> &ProductId {
        self
    }
}

impl AsRef<Product> for Product {
    fn as_ref(&self) -> &Product {
        self
    }
}

impl ProductRef for Product {
    fn product_id(&self) -> &ProductId {
        &self.id
    }
}

impl<T: ProductRef + ?Sized> ProductRef for &T {
    fn product_id(&self) -> &ProductId {
        (**self).product_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_ref_ignores_everything_but_id() {
        let a = Product::new("widget-a", "Widget A", Decimal::new(1000, 2));
        let b = Product::new("widget-a", "Renamed", Decimal::new(1, 0)).with_image("/a.png");

        assert_eq!(a.product_id(), b.product_id());
        assert_ne!(a, b);
    }

    #[test]
    fn product_serializes_with_camel_case_fields() -> Result<(), serde_json::Error> {
        let product = Product::new("p1", "Mug", Decimal::new(499, 2)).with_image("/mug.png");

        let json = serde_json::to_value(&product)?;

        assert_eq!(json["id"], "p1");
        assert_eq!(json["imageUrl"], "/mug.png");

        Ok(())
    }

    #[test]
    fn product_id_displays_raw_value() {
        assert_eq!(ProductId::new("sku-9").to_string(), "sku-9");
    }
}
