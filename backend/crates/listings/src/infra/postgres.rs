//! PostgreSQL Repository Implementations

use auth::models::UserId;
use chrono::{DateTime, Utc};
use kernel::id::{ListingId, ReviewId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{listing::Listing, review::Review};
use crate::domain::repository::{
    ListingDetail, ListingRepository, ReviewRepository, ReviewWithAuthor,
};
use crate::domain::value_object::{image::ListingImage, price::Price, rating::Rating};
use crate::error::{ListingsError, ListingsResult};

/// PostgreSQL-backed listings repository
#[derive(Clone)]
pub struct PgListingsRepository {
    pool: PgPool,
}

impl PgListingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Listing Repository Implementation
// ============================================================================

impl ListingRepository for PgListingsRepository {
    async fn create(&self, listing: &Listing) -> ListingsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO listings (
                listing_id,
                owner_id,
                title,
                description,
                price,
                location,
                image_url,
                image_filename,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(listing.listing_id.as_uuid())
        .bind(listing.owner_id.as_uuid())
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.price.amount())
        .bind(&listing.location)
        .bind(listing.image.as_ref().map(|i| i.url.as_str()))
        .bind(listing.image.as_ref().map(|i| i.filename.as_str()))
        .bind(listing.created_at)
        .bind(listing.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, listing_id: ListingId) -> ListingsResult<Option<Listing>> {
        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT
                listing_id,
                owner_id,
                title,
                description,
                price,
                location,
                image_url,
                image_filename,
                created_at,
                updated_at
            FROM listings
            WHERE listing_id = $1
            "#,
        )
        .bind(listing_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_listing()))
    }

    async fn find_detail(&self, listing_id: ListingId) -> ListingsResult<Option<ListingDetail>> {
        let Some(row) = sqlx::query_as::<_, ListingDetailRow>(
            r#"
            SELECT
                l.listing_id,
                l.owner_id,
                l.title,
                l.description,
                l.price,
                l.location,
                l.image_url,
                l.image_filename,
                l.created_at,
                l.updated_at,
                u.user_name AS owner_name
            FROM listings l
            JOIN users u ON u.user_id = l.owner_id
            WHERE l.listing_id = $1
            "#,
        )
        .bind(listing_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let reviews = sqlx::query_as::<_, ReviewWithAuthorRow>(
            r#"
            SELECT
                r.review_id,
                r.listing_id,
                r.author_id,
                r.rating,
                r.comment,
                r.created_at,
                r.updated_at,
                u.user_name AS author_name
            FROM reviews r
            JOIN users u ON u.user_id = r.author_id
            WHERE r.listing_id = $1
            ORDER BY r.created_at ASC
            "#,
        )
        .bind(listing_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let (listing, owner_name) = row.into_parts();
        Ok(Some(ListingDetail {
            listing,
            owner_name,
            reviews: reviews.into_iter().map(|r| r.into_with_author()).collect(),
        }))
    }

    async fn list_all(&self) -> ListingsResult<Vec<Listing>> {
        let rows = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT
                listing_id,
                owner_id,
                title,
                description,
                price,
                location,
                image_url,
                image_filename,
                created_at,
                updated_at
            FROM listings
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_listing()).collect())
    }

    async fn update(&self, listing: &Listing) -> ListingsResult<()> {
        // owner_id is never part of the SET list
        let updated = sqlx::query(
            r#"
            UPDATE listings SET
                title = $2,
                description = $3,
                price = $4,
                location = $5,
                image_url = $6,
                image_filename = $7,
                updated_at = $8
            WHERE listing_id = $1
            "#,
        )
        .bind(listing.listing_id.as_uuid())
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.price.amount())
        .bind(&listing.location)
        .bind(listing.image.as_ref().map(|i| i.url.as_str()))
        .bind(listing.image.as_ref().map(|i| i.filename.as_str()))
        .bind(listing.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(ListingsError::ListingNotFound);
        }

        Ok(())
    }

    async fn delete(&self, listing_id: ListingId) -> ListingsResult<()> {
        // Reviews go with the listing via ON DELETE CASCADE
        sqlx::query("DELETE FROM listings WHERE listing_id = $1")
            .bind(listing_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Review Repository Implementation
// ============================================================================

impl ReviewRepository for PgListingsRepository {
    async fn create_review(&self, review: &Review) -> ListingsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reviews (
                review_id,
                listing_id,
                author_id,
                rating,
                comment,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(review.review_id.as_uuid())
        .bind(review.listing_id.as_uuid())
        .bind(review.author_id.as_uuid())
        .bind(review.rating.value())
        .bind(&review.comment)
        .bind(review.created_at)
        .bind(review.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_review(&self, review_id: ReviewId) -> ListingsResult<Option<Review>> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT
                review_id,
                listing_id,
                author_id,
                rating,
                comment,
                created_at,
                updated_at
            FROM reviews
            WHERE review_id = $1
            "#,
        )
        .bind(review_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_review()))
    }

    async fn delete_review(&self, review_id: ReviewId) -> ListingsResult<()> {
        sqlx::query("DELETE FROM reviews WHERE review_id = $1")
            .bind(review_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

fn image_from_columns(url: Option<String>, filename: Option<String>) -> Option<ListingImage> {
    match (url, filename) {
        (Some(url), Some(filename)) => Some(ListingImage { url, filename }),
        _ => None,
    }
}

#[derive(sqlx::FromRow)]
struct ListingRow {
    listing_id: Uuid,
    owner_id: Uuid,
    title: String,
    description: String,
    price: i64,
    location: String,
    image_url: Option<String>,
    image_filename: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ListingRow {
    fn into_listing(self) -> Listing {
        Listing {
            listing_id: ListingId::from_uuid(self.listing_id),
            owner_id: UserId::from_uuid(self.owner_id),
            title: self.title,
            description: self.description,
            price: Price::from_db(self.price),
            location: self.location,
            image: image_from_columns(self.image_url, self.image_filename),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ListingDetailRow {
    listing_id: Uuid,
    owner_id: Uuid,
    title: String,
    description: String,
    price: i64,
    location: String,
    image_url: Option<String>,
    image_filename: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner_name: String,
}

impl ListingDetailRow {
    fn into_parts(self) -> (Listing, String) {
        let listing = Listing {
            listing_id: ListingId::from_uuid(self.listing_id),
            owner_id: UserId::from_uuid(self.owner_id),
            title: self.title,
            description: self.description,
            price: Price::from_db(self.price),
            location: self.location,
            image: image_from_columns(self.image_url, self.image_filename),
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        (listing, self.owner_name)
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    review_id: Uuid,
    listing_id: Uuid,
    author_id: Uuid,
    rating: i16,
    comment: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ReviewRow {
    fn into_review(self) -> Review {
        Review {
            review_id: ReviewId::from_uuid(self.review_id),
            listing_id: ListingId::from_uuid(self.listing_id),
            author_id: UserId::from_uuid(self.author_id),
            rating: Rating::from_db(self.rating),
            comment: self.comment,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ReviewWithAuthorRow {
    review_id: Uuid,
    listing_id: Uuid,
    author_id: Uuid,
    rating: i16,
    comment: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_name: String,
}

impl ReviewWithAuthorRow {
    fn into_with_author(self) -> ReviewWithAuthor {
        ReviewWithAuthor {
            review: Review {
                review_id: ReviewId::from_uuid(self.review_id),
                listing_id: ListingId::from_uuid(self.listing_id),
                author_id: UserId::from_uuid(self.author_id),
                rating: Rating::from_db(self.rating),
                comment: self.comment,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            author_name: self.author_name,
        }
    }
}
