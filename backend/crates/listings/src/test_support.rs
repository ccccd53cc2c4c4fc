//! In-memory fakes for use case and router tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use auth::models::UserId;
use kernel::id::{ListingId, ReviewId};

use crate::domain::entity::{listing::Listing, review::Review};
use crate::domain::repository::{
    ListingDetail, ListingRepository, ReviewRepository, ReviewWithAuthor,
};
use crate::domain::storage::{ImageStore, ImageUpload};
use crate::domain::value_object::{image::ListingImage, price::Price, rating::Rating};
use crate::error::{ListingsError, ListingsResult};

#[derive(Default)]
struct Store {
    listings: Vec<Listing>,
    reviews: Vec<Review>,
    user_names: HashMap<UserId, String>,
}

/// Shared in-memory store implementing both repository traits.
#[derive(Clone, Default)]
pub(crate) struct InMemoryListingsRepo {
    store: Arc<Mutex<Store>>,
}

impl InMemoryListingsRepo {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn listing_count(&self) -> usize {
        self.store.lock().unwrap().listings.len()
    }

    pub(crate) fn review_count(&self) -> usize {
        self.store.lock().unwrap().reviews.len()
    }

    pub(crate) fn listings(&self) -> Vec<Listing> {
        self.store.lock().unwrap().listings.clone()
    }

    pub(crate) fn listing(&self, listing_id: ListingId) -> Option<Listing> {
        self.store
            .lock()
            .unwrap()
            .listings
            .iter()
            .find(|l| l.listing_id == listing_id)
            .cloned()
    }

    pub(crate) fn review(&self, review_id: ReviewId) -> Option<Review> {
        self.store
            .lock()
            .unwrap()
            .reviews
            .iter()
            .find(|r| r.review_id == review_id)
            .cloned()
    }

    pub(crate) fn reviews(&self) -> Vec<Review> {
        self.store.lock().unwrap().reviews.clone()
    }

    /// Register the display name joined into read models.
    pub(crate) fn name_user(&self, user_id: UserId, name: &str) {
        self.store
            .lock()
            .unwrap()
            .user_names
            .insert(user_id, name.to_string());
    }

    /// Insert a ready-made listing directly into the store.
    pub(crate) fn seed_listing(&self, owner_id: UserId) -> Listing {
        let listing = Listing::new(
            owner_id,
            "Harbor loft".to_string(),
            "Gull noises at no extra charge".to_string(),
            Price::new(9_500).unwrap(),
            "Old port".to_string(),
            ListingImage::new("/uploads/loft.jpg", "loft.jpg"),
        );
        self.store.lock().unwrap().listings.push(listing.clone());
        listing
    }

    pub(crate) fn seed_review(&self, listing_id: ListingId, author_id: UserId) -> Review {
        let review = Review::new(
            listing_id,
            author_id,
            Rating::new(3).unwrap(),
            "Loud gulls".to_string(),
        );
        self.store.lock().unwrap().reviews.push(review.clone());
        review
    }

    fn display_name(store: &Store, user_id: &UserId) -> String {
        store
            .user_names
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| "unknown".to_string())
    }
}

impl ListingRepository for InMemoryListingsRepo {
    async fn create(&self, listing: &Listing) -> ListingsResult<()> {
        self.store.lock().unwrap().listings.push(listing.clone());
        Ok(())
    }

    async fn find_by_id(&self, listing_id: ListingId) -> ListingsResult<Option<Listing>> {
        Ok(self.listing(listing_id))
    }

    async fn find_detail(&self, listing_id: ListingId) -> ListingsResult<Option<ListingDetail>> {
        let store = self.store.lock().unwrap();
        let Some(listing) = store
            .listings
            .iter()
            .find(|l| l.listing_id == listing_id)
            .cloned()
        else {
            return Ok(None);
        };

        let mut reviews: Vec<ReviewWithAuthor> = store
            .reviews
            .iter()
            .filter(|r| r.listing_id == listing_id)
            .map(|r| ReviewWithAuthor {
                review: r.clone(),
                author_name: Self::display_name(&store, &r.author_id),
            })
            .collect();
        reviews.sort_by_key(|r| r.review.created_at);

        let owner_name = Self::display_name(&store, &listing.owner_id);
        Ok(Some(ListingDetail {
            listing,
            owner_name,
            reviews,
        }))
    }

    async fn list_all(&self) -> ListingsResult<Vec<Listing>> {
        let mut listings = self.store.lock().unwrap().listings.clone();
        listings.sort_by_key(|l| l.created_at);
        Ok(listings)
    }

    async fn update(&self, listing: &Listing) -> ListingsResult<()> {
        let mut store = self.store.lock().unwrap();
        let Some(slot) = store
            .listings
            .iter_mut()
            .find(|l| l.listing_id == listing.listing_id)
        else {
            return Err(ListingsError::ListingNotFound);
        };
        *slot = listing.clone();
        Ok(())
    }

    async fn delete(&self, listing_id: ListingId) -> ListingsResult<()> {
        let mut store = self.store.lock().unwrap();
        store.listings.retain(|l| l.listing_id != listing_id);
        store.reviews.retain(|r| r.listing_id != listing_id);
        Ok(())
    }
}

impl ReviewRepository for InMemoryListingsRepo {
    async fn create_review(&self, review: &Review) -> ListingsResult<()> {
        self.store.lock().unwrap().reviews.push(review.clone());
        Ok(())
    }

    async fn find_review(&self, review_id: ReviewId) -> ListingsResult<Option<Review>> {
        Ok(self.review(review_id))
    }

    async fn delete_review(&self, review_id: ReviewId) -> ListingsResult<()> {
        self.store
            .lock()
            .unwrap()
            .reviews
            .retain(|r| r.review_id != review_id);
        Ok(())
    }
}

/// Image store that remembers what was uploaded and never touches disk.
#[derive(Clone, Default)]
pub(crate) struct StubImageStore {
    uploads: Arc<Mutex<Vec<ImageUpload>>>,
    fail: Arc<AtomicBool>,
}

impl StubImageStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub(crate) fn uploaded_filenames(&self) -> Vec<String> {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .map(|u| u.filename.clone())
            .collect()
    }

    /// Make every subsequent store call fail.
    pub(crate) fn fail_uploads(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

impl ImageStore for StubImageStore {
    async fn store(&self, upload: ImageUpload) -> ListingsResult<ListingImage> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ListingsError::Storage("stub store offline".to_string()));
        }
        let image = ListingImage::new(format!("/uploads/{}", upload.filename), &upload.filename);
        self.uploads.lock().unwrap().push(upload);
        Ok(image)
    }
}

/// Renderer that echoes the view name and data bag for assertions.
pub(crate) struct StubRenderer;

impl kernel::render::Renderer for StubRenderer {
    fn render(&self, view: &str, data: serde_json::Value) -> kernel::error::app_error::AppResult<String> {
        Ok(format!("view={view} data={data}"))
    }
}
