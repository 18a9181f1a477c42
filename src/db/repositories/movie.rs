use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait, QueryOrder, Set,
};

use crate::entities::movies;

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// List all movies in insertion order
    pub async fn list(&self) -> Result<Vec<movies::Model>> {
        movies::Entity::find()
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list movies")
    }

    /// Get movie by ID
    pub async fn get(&self, id: i32) -> Result<Option<movies::Model>> {
        movies::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query movie by ID")
    }

    /// Insert a new movie. Input is validated at the form boundary.
    pub async fn add(&self, title: &str, year: &str) -> Result<movies::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        movies::ActiveModel {
            title: Set(title.to_string()),
            year: Set(year.to_string()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert movie")
    }

    /// Update title and year in place. Returns false when the row does
    /// not exist.
    pub async fn update(&self, id: i32, title: &str, year: &str) -> Result<bool> {
        let Some(movie) = movies::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query movie for update")?
        else {
            return Ok(false);
        };

        let mut active: movies::ActiveModel = movie.into();
        active.title = Set(title.to_string());
        active.year = Set(year.to_string());
        active
            .update(&self.conn)
            .await
            .context("Failed to update movie")?;

        Ok(true)
    }

    /// Delete by ID. Returns false when the row does not exist.
    pub async fn remove(&self, id: i32) -> Result<bool> {
        let Some(movie) = movies::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query movie for removal")?
        else {
            return Ok(false);
        };

        movie
            .delete(&self.conn)
            .await
            .context("Failed to delete movie")?;

        Ok(true)
    }

    pub async fn count(&self) -> Result<u64> {
        movies::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count movies")
    }
}
