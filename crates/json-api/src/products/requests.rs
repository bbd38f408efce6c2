//! Product request bodies.

use storefront_app::domain::products::{
    data::{NewProduct, validate_price},
    rating::RatingSubmission,
};

use crate::{
    errors::ApiError,
    payload::{self, Payload},
    products::errors::into_api_error,
};

const REQUIRED_FIELDS: [&str; 4] = ["title", "price", "description", "category"];

/// Translate a creation body, rejecting it before any storage access.
pub(crate) fn new_product(body: &Payload) -> Result<NewProduct, ApiError> {
    if REQUIRED_FIELDS
        .iter()
        .any(|field| payload::present(body, field).is_none())
    {
        return Err(ApiError::needs_all_data());
    }

    let (Some(title), Some(description), Some(category)) = (
        payload::text(body, "title"),
        payload::text(body, "description"),
        payload::text(body, "category"),
    ) else {
        return Err(ApiError::needs_all_data());
    };

    let price = payload::present(body, "price")
        .and_then(payload::number)
        .ok_or_else(|| ApiError::bad_request("invalid price"))
        .and_then(|price| validate_price(price).map_err(into_api_error))?;

    Ok(NewProduct {
        title,
        price,
        description,
        category,
    })
}

/// Translate a rating body. `rate` must be a JSON number.
pub(crate) fn rating_submission(body: &Payload) -> Result<RatingSubmission, ApiError> {
    body.get("rate")
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| ApiError::bad_request("invalid rating"))
        .and_then(|rate| RatingSubmission::new(rate).map_err(into_api_error))
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use serde_json::{Value, json};

    use super::*;

    fn body(value: Value) -> Payload {
        match value {
            Value::Object(fields) => fields,
            _ => Payload::new(),
        }
    }

    fn bad_request(msg: &str) -> ApiError {
        ApiError::new(StatusCode::BAD_REQUEST, msg)
    }

    #[test]
    fn new_product_reads_all_fields() {
        let product = new_product(&body(json!({
            "title": "t",
            "price": 10,
            "description": "d",
            "category": "electronics",
            "image": "/img/evil.jpg",
            "rating": { "rate": 5, "count": 1000 },
        })));

        assert_eq!(
            product,
            Ok(NewProduct {
                title: "t".to_string(),
                price: 10.0,
                description: "d".to_string(),
                category: "electronics".to_string(),
            })
        );
    }

    #[test]
    fn new_product_requires_truthy_fields() {
        let complete = json!({
            "title": "t",
            "price": 10,
            "description": "d",
            "category": "c",
        });

        for field in REQUIRED_FIELDS {
            for falsy in [Value::Null, json!(""), json!(0), json!(false)] {
                let mut fields = body(complete.clone());
                fields.insert(field.to_string(), falsy.clone());

                assert_eq!(
                    new_product(&fields),
                    Err(bad_request("needs all data")),
                    "{field} = {falsy}"
                );
            }

            let mut fields = body(complete.clone());
            fields.remove(field);

            assert_eq!(
                new_product(&fields),
                Err(bad_request("needs all data")),
                "{field} missing"
            );
        }
    }

    #[test]
    fn new_product_rejects_structured_text_fields() {
        let fields = body(json!({
            "title": ["t"],
            "price": 10,
            "description": "d",
            "category": "c",
        }));

        assert_eq!(new_product(&fields), Err(bad_request("needs all data")));
    }

    #[test]
    fn new_product_converts_scalar_text_fields() -> Result<(), ApiError> {
        let product = new_product(&body(json!({
            "title": 123,
            "price": "9.99",
            "description": true,
            "category": "c",
        })))?;

        assert_eq!(product.title, "123");
        assert_eq!(product.description, "true");
        assert!((product.price - 9.99).abs() < f64::EPSILON);

        Ok(())
    }

    #[test]
    fn new_product_rejects_invalid_prices() {
        for price in [json!(-1), json!(0.001), json!("abc"), json!(true), json!("0")] {
            let fields = body(json!({
                "title": "t",
                "price": price,
                "description": "d",
                "category": "c",
            }));

            assert_eq!(
                new_product(&fields),
                Err(bad_request("invalid price")),
                "price = {price}"
            );
        }
    }

    #[test]
    fn new_product_accepts_minimum_price() -> Result<(), ApiError> {
        let product = new_product(&body(json!({
            "title": "t",
            "price": 0.01,
            "description": "d",
            "category": "c",
        })))?;

        assert!((product.price - 0.01).abs() < f64::EPSILON);

        Ok(())
    }

    #[test]
    fn rating_submission_accepts_bounds() -> Result<(), ApiError> {
        let lowest = rating_submission(&body(json!({ "rate": 1 })))?;
        let highest = rating_submission(&body(json!({ "rate": 5 })))?;

        assert!((lowest.value() - 1.0).abs() < f64::EPSILON);
        assert!((highest.value() - 5.0).abs() < f64::EPSILON);

        Ok(())
    }

    #[test]
    fn rating_submission_requires_a_number() {
        for value in [json!({}), json!({ "rate": "4" }), json!({ "rate": null })] {
            assert_eq!(
                rating_submission(&body(value.clone())).map(RatingSubmission::value),
                Err(bad_request("invalid rating")),
                "{value}"
            );
        }
    }

    #[test]
    fn rating_submission_rejects_out_of_range() {
        for rate in [0.99, 5.01, 0.0, -3.0] {
            assert_eq!(
                rating_submission(&body(json!({ "rate": rate }))).map(RatingSubmission::value),
                Err(bad_request("rating must be between 1 and 5")),
                "rate = {rate}"
            );
        }
    }
}
