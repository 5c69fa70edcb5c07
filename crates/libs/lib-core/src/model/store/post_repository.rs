//! # Post Repository
//!
//! SQLite persistence for posts. Same contract as the user repository;
//! `author_id` is stored as given.

use super::models::{Post, PostForCreate, PostForUpdate};
use super::{DbPool, PostStore, Repository, POST_NOT_FOUND};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::query_as;

#[derive(Clone)]
pub struct PostRepository {
    pool: DbPool,
}

impl PostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: i64) -> Result<Post> {
        query_as::<_, Post>("SELECT * FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found)
    }
}

#[async_trait]
impl Repository for PostRepository {
    type Entity = Post;
    type ForCreate = PostForCreate;
    type ForUpdate = PostForUpdate;

    async fn find_all(&self) -> Result<Vec<Post>> {
        let posts = query_as::<_, Post>("SELECT * FROM posts ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>> {
        let post = query_as::<_, Post>("SELECT * FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn create(&self, post_data: PostForCreate) -> Result<Post> {
        let result = sqlx::query("INSERT INTO posts (title, content, author_id) VALUES (?, ?, ?)")
            .bind(&post_data.title)
            .bind(&post_data.content)
            .bind(post_data.author_id)
            .execute(&self.pool)
            .await?;

        self.fetch(result.last_insert_rowid()).await
    }

    /// Only `Some` fields of `post_data` are written.
    async fn update(&self, post: &Post, post_data: PostForUpdate) -> Result<Post> {
        if post_data.is_empty() {
            return self.fetch(post.id).await;
        }

        let mut updates = Vec::new();

        if post_data.title.is_some() {
            updates.push("title = ?");
        }
        if post_data.content.is_some() {
            updates.push("content = ?");
        }
        if post_data.author_id.is_some() {
            updates.push("author_id = ?");
        }

        let query_str = format!("UPDATE posts SET {} WHERE id = ?", updates.join(", "));

        let mut query = sqlx::query(&query_str);

        if let Some(ref title) = post_data.title {
            query = query.bind(title);
        }
        if let Some(ref content) = post_data.content {
            query = query.bind(content);
        }
        if let Some(author_id) = post_data.author_id {
            query = query.bind(author_id);
        }

        let result = query.bind(post.id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(not_found());
        }

        self.fetch(post.id).await
    }

    async fn delete(&self, post: &Post) -> Result<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(post.id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}

impl PostStore for PostRepository {}

fn not_found() -> AppError {
    AppError::NotFound(POST_NOT_FOUND.to_string())
}
