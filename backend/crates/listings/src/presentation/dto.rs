//! Request and View DTOs
//!
//! The create/edit forms arrive as `multipart/form-data` because of the
//! image file; reviews are plain urlencoded forms. View structs are the
//! serializable shapes handed to the renderer.

use axum::extract::multipart::{Field, Multipart};
use serde::{Deserialize, Serialize};

use crate::domain::entity::listing::{Listing, UpdateListingFields};
use crate::domain::repository::ReviewWithAuthor;
use crate::domain::storage::ImageUpload;
use crate::domain::value_object::price::Price;
use crate::error::{ListingsError, ListingsResult};

// ============================================================================
// Requests
// ============================================================================

/// Fields of the create/edit listing form
#[derive(Debug)]
pub struct ListingForm {
    pub title: String,
    pub description: String,
    pub price: Price,
    pub location: String,
    /// File part, present only when the client actually chose a file
    pub image: Option<ImageUpload>,
}

impl ListingForm {
    /// Split into the entity update shape and the optional upload
    pub fn into_update(self) -> (UpdateListingFields, Option<ImageUpload>) {
        (
            UpdateListingFields {
                title: self.title,
                description: self.description,
                price: self.price,
                location: self.location,
            },
            self.image,
        )
    }
}

/// Walk the multipart stream and collect the listing form fields.
///
/// Browsers submit an `image` part even when no file was picked; an
/// empty filename or empty body counts as "no upload".
pub async fn parse_listing_form(mut multipart: Multipart) -> ListingsResult<ListingForm> {
    let mut title = None;
    let mut description = None;
    let mut price = None;
    let mut location = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ListingsError::Validation(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "title" => title = Some(text_field(field).await?),
            "description" => description = Some(text_field(field).await?),
            "price" => price = Some(text_field(field).await?.parse::<Price>()?),
            "location" => location = Some(text_field(field).await?),
            "image" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ListingsError::Validation(e.to_string()))?;
                if !filename.is_empty() && !bytes.is_empty() {
                    image = Some(ImageUpload::new(filename, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(ListingForm {
        title: title.ok_or_else(|| missing_field("title"))?,
        description: description.ok_or_else(|| missing_field("description"))?,
        price: price.ok_or_else(|| missing_field("price"))?,
        location: location.ok_or_else(|| missing_field("location"))?,
        image,
    })
}

async fn text_field(field: Field<'_>) -> ListingsResult<String> {
    field
        .text()
        .await
        .map_err(|e| ListingsError::Validation(e.to_string()))
}

fn missing_field(name: &str) -> ListingsError {
    ListingsError::Validation(format!("Missing form field: {name}"))
}

/// Review form body (urlencoded)
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub rating: i16,
    pub comment: String,
}

// ============================================================================
// Views
// ============================================================================

/// Listing shape handed to the renderer
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub location: String,
    pub image_url: Option<String>,
}

impl ListingView {
    pub fn from_listing(listing: &Listing) -> Self {
        Self {
            id: listing.listing_id.to_string(),
            title: listing.title.clone(),
            description: listing.description.clone(),
            price: listing.price.amount(),
            location: listing.location.clone(),
            image_url: listing.image.as_ref().map(|i| i.url.clone()),
        }
    }
}

/// Review shape handed to the renderer
#[derive(Debug, Clone, Serialize)]
pub struct ReviewView {
    pub id: String,
    pub rating: i16,
    pub comment: String,
    pub author_name: String,
}

impl ReviewView {
    pub fn from_review(entry: &ReviewWithAuthor) -> Self {
        Self {
            id: entry.review.review_id.to_string(),
            rating: entry.review.rating.value(),
            comment: entry.review.comment.clone(),
            author_name: entry.author_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequest;
    use axum::http::{header, Request};

    const BOUNDARY: &str = "test-boundary";

    fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<axum::body::Body> {
        let mut body = Vec::new();
        for (name, filename, content) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match filename {
                Some(filename) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(axum::body::Body::from(body))
            .unwrap()
    }

    async fn parse(parts: &[(&str, Option<&str>, &[u8])]) -> ListingsResult<ListingForm> {
        let multipart = Multipart::from_request(multipart_request(parts), &())
            .await
            .unwrap();
        parse_listing_form(multipart).await
    }

    #[tokio::test]
    async fn test_parses_full_form_with_file() {
        let form = parse(&[
            ("title", None, b"Canal house"),
            ("description", None, b"Leans a little"),
            ("price", None, b"20000"),
            ("location", None, b"Ring canal"),
            ("image", Some("house.jpg"), &[0xFF, 0xD8]),
        ])
        .await
        .unwrap();

        assert_eq!(form.title, "Canal house");
        assert_eq!(form.price.amount(), 20_000);
        let image = form.image.unwrap();
        assert_eq!(image.filename, "house.jpg");
        assert_eq!(image.bytes, vec![0xFF, 0xD8]);
    }

    #[tokio::test]
    async fn test_empty_file_part_means_no_upload() {
        let form = parse(&[
            ("title", None, b"Canal house"),
            ("description", None, b"Leans"),
            ("price", None, b"1"),
            ("location", None, b"Here"),
            ("image", Some(""), b""),
        ])
        .await
        .unwrap();

        assert!(form.image.is_none());
    }

    #[tokio::test]
    async fn test_missing_text_field_is_rejected() {
        let err = parse(&[
            ("title", None, b"Canal house"),
            ("price", None, b"1"),
            ("location", None, b"Here"),
        ])
        .await
        .unwrap_err();

        assert!(matches!(err, ListingsError::Validation(_)));
        assert!(err.to_string().contains("description"));
    }

    #[tokio::test]
    async fn test_bad_price_is_rejected() {
        let err = parse(&[
            ("title", None, b"Canal house"),
            ("description", None, b"Leans"),
            ("price", None, b"cheap"),
            ("location", None, b"Here"),
        ])
        .await
        .unwrap_err();

        assert!(matches!(err, ListingsError::Validation(_)));
    }
}
