//! SurrealDB implementation of [`SessionRepository`].

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;
use wellspring_core::error::WellspringResult;
use wellspring_core::models::session::{CreateSession, Session, SessionStatus, UpdateSession};
use wellspring_core::repository::SessionRepository;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct SessionRow {
    owner_id: String,
    title: String,
    tags: Vec<String>,
    json_file_url: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, SurrealValue)]
struct SessionRowWithId {
    record_id: String,
    owner_id: String,
    title: String,
    tags: Vec<String>,
    json_file_url: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    published_at: Option<DateTime<Utc>>,
}

fn parse_status(s: &str) -> Result<SessionStatus, DbError> {
    s.parse().map_err(DbError::InvalidRecord)
}

fn row_to_session(row: SessionRow, id: Uuid) -> Result<Session, DbError> {
    let owner_id = Uuid::parse_str(&row.owner_id)
        .map_err(|e| DbError::InvalidRecord(format!("invalid owner UUID: {e}")))?;
    Ok(Session {
        id,
        owner_id,
        title: row.title,
        tags: row.tags,
        json_file_url: row.json_file_url,
        status: parse_status(&row.status)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
        published_at: row.published_at,
    })
}

impl SessionRowWithId {
    fn try_into_session(self) -> Result<Session, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::InvalidRecord(format!("invalid UUID: {e}")))?;
        row_to_session(
            SessionRow {
                owner_id: self.owner_id,
                title: self.title,
                tags: self.tags,
                json_file_url: self.json_file_url,
                status: self.status,
                created_at: self.created_at,
                updated_at: self.updated_at,
                published_at: self.published_at,
            },
            id,
        )
    }
}

fn rows_to_sessions(rows: Vec<SessionRowWithId>) -> Result<Vec<Session>, DbError> {
    rows.into_iter()
        .map(SessionRowWithId::try_into_session)
        .collect()
}

/// SurrealDB implementation of the Session repository.
#[derive(Clone)]
pub struct SurrealSessionRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSessionRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

/// Decode the single row returned by a write on `session:$id`.
fn single_row(rows: Vec<SessionRow>, id: Uuid) -> Result<Session, DbError> {
    let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
        entity: "session".into(),
        id: id.to_string(),
    })?;
    row_to_session(row, id)
}

impl<C: Connection> SessionRepository for SurrealSessionRepository<C> {
    async fn create(&self, input: CreateSession) -> WellspringResult<Session> {
        let id = Uuid::new_v4();

        let result = self
            .db
            .query(
                "CREATE type::record('session', $id) SET \
                 owner_id = $owner_id, \
                 title = $title, \
                 tags = $tags, \
                 json_file_url = $json_file_url, \
                 status = 'draft', \
                 published_at = NONE",
            )
            .bind(("id", id.to_string()))
            .bind(("owner_id", input.owner_id.to_string()))
            .bind(("title", input.title))
            .bind(("tags", input.tags))
            .bind(("json_file_url", input.json_file_url))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_write("session", e))?;

        let rows: Vec<SessionRow> = result.take(0).map_err(DbError::from)?;
        Ok(single_row(rows, id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> WellspringResult<Session> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('session', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SessionRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "session".into(),
            id: id_str,
        })?;

        row_to_session(row, id).map_err(Into::into)
    }

    async fn update(&self, id: Uuid, input: UpdateSession) -> WellspringResult<Session> {
        let mut sets = Vec::new();
        if input.title.is_some() {
            sets.push("title = $title");
        }
        if input.tags.is_some() {
            sets.push("tags = $tags");
        }
        if input.json_file_url.is_some() {
            sets.push("json_file_url = $json_file_url");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('session', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id.to_string()));

        if let Some(title) = input.title {
            builder = builder.bind(("title", title));
        }
        if let Some(tags) = input.tags {
            builder = builder.bind(("tags", tags));
        }
        if let Some(json_file_url) = input.json_file_url {
            builder = builder.bind(("json_file_url", json_file_url));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::from_write("session", e))?;

        let rows: Vec<SessionRow> = result.take(0).map_err(DbError::from)?;
        Ok(single_row(rows, id)?)
    }

    async fn mark_published(&self, id: Uuid) -> WellspringResult<Session> {
        let result = self
            .db
            .query(
                "UPDATE type::record('session', $id) SET \
                 status = 'published', \
                 published_at = time::now(), \
                 updated_at = time::now()",
            )
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_write("session", e))?;

        let rows: Vec<SessionRow> = result.take(0).map_err(DbError::from)?;
        Ok(single_row(rows, id)?)
    }

    async fn delete(&self, id: Uuid) -> WellspringResult<()> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("DELETE type::record('session', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SessionRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "session".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> WellspringResult<Vec<Session>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM session \
                 WHERE owner_id = $owner_id \
                 ORDER BY updated_at DESC",
            )
            .bind(("owner_id", owner_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SessionRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows_to_sessions(rows)?)
    }

    async fn list_published(&self) -> WellspringResult<Vec<Session>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM session \
                 WHERE status = 'published' \
                 ORDER BY created_at DESC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SessionRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows_to_sessions(rows)?)
    }
}
