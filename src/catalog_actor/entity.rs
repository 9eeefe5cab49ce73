//! [`ActorEntity`] implementation for [`Product`].

use super::{CatalogError, CatalogQuery};
use crate::framework::ActorEntity;
use crate::model::{Product, ProductCreate, ProductUpdate};

fn validated_name(name: String) -> Result<String, CatalogError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::ValidationError(
            "product name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn validated_price(price: f64) -> Result<f64, CatalogError> {
    if !price.is_finite() || price < 0.0 {
        return Err(CatalogError::ValidationError(format!(
            "invalid price: {price}"
        )));
    }
    Ok(price)
}

impl ActorEntity for Product {
    type Id = String;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Query = CatalogQuery;
    type Error = CatalogError;

    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, CatalogError> {
        Ok(Self::new(
            id,
            validated_name(params.name)?,
            params.description,
            validated_price(params.price)?,
        ))
    }

    /// Validates every field before touching any, so a rejected update changes nothing.
    fn on_update(&mut self, update: ProductUpdate) -> Result<(), CatalogError> {
        let name = update.name.map(validated_name).transpose()?;
        let price = update.price.map(validated_price).transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = price {
            self.price = price;
        }
        Ok(())
    }

    fn matches(&self, query: &CatalogQuery) -> bool {
        match query {
            CatalogQuery::ByIds(ids) => ids.contains(&self.id),
            CatalogQuery::Search { needle, .. } => {
                self.name.to_lowercase().contains(needle.as_str())
                    || self.description.to_lowercase().contains(needle.as_str())
            }
            CatalogQuery::List(_) => true,
        }
    }

    fn window(query: &CatalogQuery) -> (usize, Option<usize>) {
        match query {
            CatalogQuery::ByIds(_) => (0, None),
            CatalogQuery::Search { page, .. } | CatalogQuery::List(page) => page.window(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;

    fn lamp() -> Product {
        Product::new("p1", "Desk Lamp", "Warm LED light", 30.0)
    }

    #[test]
    fn test_search_matches_name_or_description() {
        let product = lamp();
        assert!(product.matches(&CatalogQuery::search("LAMP", Page::default())));
        assert!(product.matches(&CatalogQuery::search("led", Page::default())));
        assert!(!product.matches(&CatalogQuery::search("chair", Page::default())));
    }

    #[test]
    fn test_rejected_update_changes_nothing() {
        let mut product = lamp();
        let err = product
            .on_update(ProductUpdate {
                name: Some("Floor Lamp".into()),
                description: None,
                price: Some(-1.0),
            })
            .unwrap_err();
        assert!(matches!(err, CatalogError::ValidationError(_)));
        assert_eq!(product, lamp());
    }

    #[test]
    fn test_create_rejects_non_finite_price() {
        let result = Product::from_create_params(
            "p2".into(),
            ProductCreate {
                name: "Ghost".into(),
                description: String::new(),
                price: f64::NAN,
            },
        );
        assert!(result.is_err());
    }
}
