//! Review and image operations.

use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use crate::{
    error::{ConflictReason, DatabaseResultExt, Entity, Result, TrekError},
    guard,
    models::{Image, Review},
    params::{AddImage, ReviewDraft},
};

const SELECT_REVIEW_SQL: &str =
    "SELECT id, rating, private_notes, public_notes FROM reviews WHERE id = ?1";
const SELECT_IMAGES_SQL: &str = "SELECT id, review_id, url FROM images WHERE review_id = ?1 ORDER BY id";
const SELECT_REVIEW_OWNER_SQL: &str = "SELECT t.owner FROM reviews r JOIN steps s ON s.id = r.id JOIN trips t ON t.id = s.trip_id WHERE r.id = ?1";
const SELECT_IMAGE_SQL: &str = "SELECT i.id, i.review_id, i.url, t.owner FROM images i JOIN steps s ON s.id = i.review_id JOIN trips t ON t.id = s.trip_id WHERE i.id = ?1";
const INSERT_REVIEW_SQL: &str =
    "INSERT INTO reviews (id, rating, private_notes, public_notes) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_REVIEW_SQL: &str =
    "UPDATE reviews SET rating = ?1, private_notes = ?2, public_notes = ?3 WHERE id = ?4";
const INSERT_IMAGE_SQL: &str = "INSERT INTO images (review_id, url) VALUES (?1, ?2)";
const DELETE_IMAGE_SQL: &str = "DELETE FROM images WHERE id = ?1";

impl super::Database {
    /// Loads the review of a step with its images.
    pub(super) fn load_review(conn: &Connection, step_id: u64) -> Result<Option<Review>> {
        let review = conn
            .query_row(SELECT_REVIEW_SQL, params![step_id as i64], |row| {
                Ok(Review {
                    id: row.get::<_, i64>(0)? as u64,
                    rating: row.get(1)?,
                    private_notes: row.get(2)?,
                    public_notes: row.get(3)?,
                    images: Vec::new(),
                })
            })
            .optional()
            .db_context("Failed to query review")?;

        let Some(mut review) = review else {
            return Ok(None);
        };

        let mut stmt = conn
            .prepare(SELECT_IMAGES_SQL)
            .db_context("Failed to prepare image query")?;
        review.images = stmt
            .query_map(params![step_id as i64], |row| {
                Ok(Image {
                    id: row.get::<_, i64>(0)? as u64,
                    review_id: row.get::<_, i64>(1)? as u64,
                    url: row.get(2)?,
                })
            })
            .db_context("Failed to query images")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch images")?;

        Ok(Some(review))
    }

    fn load_review_owner(conn: &Connection, review_id: u64) -> Result<Option<String>> {
        conn.query_row(SELECT_REVIEW_OWNER_SQL, params![review_id as i64], |row| {
            row.get(0)
        })
        .optional()
        .db_context("Failed to query review owner")
    }

    /// Writes the review of a step. A step has at most one review.
    pub fn create_review(&mut self, actor: &str, draft: &ReviewDraft) -> Result<Review> {
        draft.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let step = guard::ensure_owned_step(draft.step_id, Self::load_step(&tx, draft.step_id)?, actor)?;
        if Self::load_review(&tx, step.id)?.is_some() {
            return Err(TrekError::conflict(
                Entity::Step,
                step.id,
                ConflictReason::AlreadyReviewed,
            ));
        }

        tx.execute(
            INSERT_REVIEW_SQL,
            params![
                step.id as i64,
                draft.rating,
                draft.private_notes.as_deref(),
                draft.public_notes.as_deref()
            ],
        )
        .db_context("Failed to insert review")?;

        let review = Self::load_review(&tx, step.id)?.ok_or(TrekError::NotFound {
            entity: Entity::Review,
            id: step.id,
        })?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Reviewed step {} with rating {}", step.id, draft.rating);

        Ok(review)
    }

    /// Replaces the rating and notes of an existing review.
    pub fn update_review(&mut self, actor: &str, draft: &ReviewDraft) -> Result<Review> {
        draft.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let owner = Self::load_review_owner(&tx, draft.step_id)?;
        guard::ensure_owned(Entity::Review, draft.step_id, owner.map(|o| ((), o)), actor)?;

        tx.execute(
            UPDATE_REVIEW_SQL,
            params![
                draft.rating,
                draft.private_notes.as_deref(),
                draft.public_notes.as_deref(),
                draft.step_id as i64
            ],
        )
        .db_context("Failed to update review")?;

        let review = Self::load_review(&tx, draft.step_id)?.ok_or(TrekError::NotFound {
            entity: Entity::Review,
            id: draft.step_id,
        })?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(review)
    }

    /// Attaches an uploaded image to a review.
    pub fn add_image(&mut self, actor: &str, request: &AddImage) -> Result<Image> {
        request.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let owner = Self::load_review_owner(&tx, request.review_id)?;
        guard::ensure_owned(Entity::Review, request.review_id, owner.map(|o| ((), o)), actor)?;

        let url = request.url.trim();
        tx.execute(INSERT_IMAGE_SQL, params![request.review_id as i64, url])
            .db_context("Failed to insert image")?;
        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Image {
            id,
            review_id: request.review_id,
            url: url.to_string(),
        })
    }

    /// Detaches an image from its review and returns it.
    pub fn remove_image(&mut self, actor: &str, image_id: u64) -> Result<Image> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let found = tx
            .query_row(SELECT_IMAGE_SQL, params![image_id as i64], |row| {
                let image = Image {
                    id: row.get::<_, i64>(0)? as u64,
                    review_id: row.get::<_, i64>(1)? as u64,
                    url: row.get(2)?,
                };
                Ok((image, row.get::<_, String>(3)?))
            })
            .optional()
            .db_context("Failed to query image")?;
        let image = guard::ensure_owned(Entity::Image, image_id, found, actor)?;

        tx.execute(DELETE_IMAGE_SQL, params![image_id as i64])
            .db_context("Failed to delete image")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(image)
    }

    /// Retrieves the review of a step.
    pub fn get_review(&self, step_id: u64) -> Result<Option<Review>> {
        Self::load_review(&self.connection, step_id)
    }
}
