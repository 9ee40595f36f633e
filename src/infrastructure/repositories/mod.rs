// src/infrastructure/repositories/mod.rs
mod postgres_content;

pub use postgres_content::{PostgresContentReadRepository, PostgresContentWriteRepository};

use crate::domain::errors::DomainError;

const CNT_CONTENT_SLUG: &str = "contents_slug_key";
const CNT_CONTENT_AUTHOR: &str = "contents_author_id_fkey";
const CNT_MEDIA_CONTENT: &str = "media_content_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_CONTENT_SLUG => DomainError::Conflict("slug already exists".into()),
                    CNT_CONTENT_AUTHOR => DomainError::NotFound("author not found".into()),
                    CNT_MEDIA_CONTENT => DomainError::NotFound("content not found".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
