use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

/// Body of `POST /products`. Every field is optional at the decoding level so
/// that presence can be checked explicitly by the service.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_price")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<f64>,
    pub stock: Option<i32>,
}

/// Body of `PUT /products/{id}`. Absent or `null` fields keep their stored value.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_price")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<f64>,
    pub stock: Option<i32>,
}

impl UpdateProductRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
    }
}

/// Body of `PATCH /products/{id}/stock`. Negative quantities take stock away.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AdjustStockRequest {
    pub quantity: Option<i32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceInput {
    Number(f64),
    Text(String),
}

/// Accepts either a JSON number or a numeric string such as `"9.99"`.
fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let input = Option::<PriceInput>::deserialize(deserializer)?;
    match input {
        None => Ok(None),
        Some(PriceInput::Number(value)) => Ok(Some(value)),
        Some(PriceInput::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("price `{text}` is not a number"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_accepts_numbers_and_numeric_strings() {
        let req: CreateProductRequest =
            serde_json::from_str(r#"{"name":"Widget","price":9.99}"#).unwrap();
        assert_eq!(req.price, Some(9.99));

        let req: CreateProductRequest =
            serde_json::from_str(r#"{"name":"Widget","price":"12.5"}"#).unwrap();
        assert_eq!(req.price, Some(12.5));
    }

    #[test]
    fn price_rejects_non_numeric_strings() {
        let err = serde_json::from_str::<CreateProductRequest>(r#"{"name":"W","price":"abc"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("not a number"));
    }

    #[test]
    fn absent_and_null_fields_decode_as_none() {
        let req: UpdateProductRequest =
            serde_json::from_str(r#"{"stock":0,"price":null}"#).unwrap();
        assert_eq!(req.stock, Some(0));
        assert_eq!(req.price, None);
        assert!(req.name.is_none());
        assert!(!req.is_empty());

        let req: UpdateProductRequest = serde_json::from_str("{}").unwrap();
        assert!(req.is_empty());
    }
}
