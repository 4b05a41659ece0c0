use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, ErrorCode};
use tokio::sync::{Mutex, MutexGuard};
use tracing::warn;

use super::domain::{Candidate, JobOffer, NewCandidate, RecruitmentStatus};
use super::notifier::{LegacyCandidate, LegacyNotifier};
use super::store::{CandidatePage, CandidateStore, PageParams, StoreError};

const SCHEMA: &str = r#"
PRAGMA journal_mode=WAL;
CREATE TABLE IF NOT EXISTS Candidate (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    firstName         TEXT NOT NULL,
    lastName          TEXT NOT NULL,
    email             TEXT NOT NULL UNIQUE,
    phone             TEXT NOT NULL,
    experience        INTEGER NOT NULL,
    notes             TEXT NOT NULL,
    recruitmentStatus TEXT NOT NULL,
    consentDate       TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS JobOffer (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS CandidateJobOffer (
    candidateId INTEGER NOT NULL,
    jobOfferId  INTEGER NOT NULL
);
"#;

/// SQLite-backed candidate store. The connection is serialized behind an
/// async mutex; the guard may be held across the in-transaction await of
/// the legacy notification.
///
/// Foreign keys are deliberately not enforced: a submitted job-offer id
/// with no matching `JobOffer` row is accepted silently.
pub struct SqliteCandidateStore<N> {
    conn: Mutex<Connection>,
    notifier: Arc<N>,
}

impl<N: LegacyNotifier> SqliteCandidateStore<N> {
    /// Open (or create) the database at `path` and apply the schema.
    /// `:memory:` is honored for throwaway stores.
    pub fn open(path: &str, notifier: Arc<N>) -> Result<Self, StoreError> {
        if path != ":memory:" {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .map_err(|err| StoreError::Unavailable(err.to_string()))?;
                }
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
            notifier,
        })
    }

    /// Insert a job offer row. Offers are owned externally in production;
    /// this exists for seeding and tests.
    pub async fn add_job_offer(&self, title: &str) -> Result<i64, StoreError> {
        let conn = self.conn.lock().await;
        conn.execute("INSERT INTO JobOffer (title) VALUES (?1)", params![title])?;
        Ok(conn.last_insert_rowid())
    }
}

#[async_trait]
impl<N: LegacyNotifier> CandidateStore for SqliteCandidateStore<N> {
    async fn create(
        &self,
        candidate: NewCandidate,
        job_offer_ids: &[i64],
    ) -> Result<i64, StoreError> {
        let tx = TxGuard::begin(self.conn.lock().await)?;

        tx.execute(
            "INSERT INTO Candidate
             (firstName, lastName, email, phone, experience, notes, recruitmentStatus, consentDate)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                candidate.first_name,
                candidate.last_name,
                candidate.email,
                candidate.phone,
                candidate.experience,
                candidate.notes,
                candidate.recruitment_status,
                candidate.consent_date,
            ],
        )?;
        let candidate_id = tx.last_insert_rowid();

        for job_offer_id in job_offer_ids {
            tx.execute(
                "INSERT INTO CandidateJobOffer (candidateId, jobOfferId) VALUES (?1, ?2)",
                params![candidate_id, job_offer_id],
            )?;
        }

        // Best-effort mirror to the legacy system: attempted only once the
        // transaction's own work has succeeded, and never allowed to decide
        // the commit/rollback outcome.
        let notification = LegacyCandidate {
            first_name: candidate.first_name.clone(),
            last_name: candidate.last_name.clone(),
            email: candidate.email.clone(),
        };
        if let Err(err) = self.notifier.notify(notification).await {
            warn!(error = %err, candidate_id, "legacy system notification failed");
        }

        tx.commit()?;
        Ok(candidate_id)
    }

    async fn list(&self, params: PageParams) -> Result<CandidatePage, StoreError> {
        let conn = self.conn.lock().await;

        let total: i64 = conn.query_row("SELECT COUNT(*) FROM Candidate", [], |row| row.get(0))?;

        let mut stmt = conn.prepare(
            "SELECT id, firstName, lastName, email, phone, experience, notes,
                    recruitmentStatus, consentDate
             FROM Candidate LIMIT ?1 OFFSET ?2",
        )?;
        let rows = stmt.query_map(
            rusqlite::params![params.limit as i64, params.offset() as i64],
            |row| {
                Ok(Candidate {
                    id: row.get(0)?,
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    email: row.get(3)?,
                    phone: row.get(4)?,
                    experience: row.get(5)?,
                    notes: row.get(6)?,
                    recruitment_status: row.get(7)?,
                    consent_date: row.get(8)?,
                    job_offers: Vec::new(),
                })
            },
        )?;

        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        drop(stmt);

        // Per-row join fetch; acceptable at this system's scale.
        let mut offer_stmt = conn.prepare(
            "SELECT JobOffer.id, JobOffer.title FROM JobOffer
             JOIN CandidateJobOffer ON JobOffer.id = CandidateJobOffer.jobOfferId
             WHERE CandidateJobOffer.candidateId = ?1",
        )?;
        for candidate in &mut data {
            let offers = offer_stmt.query_map(params![candidate.id], |row| {
                Ok(JobOffer {
                    id: row.get(0)?,
                    title: row.get(1)?,
                })
            })?;
            for offer in offers {
                candidate.job_offers.push(offer?);
            }
        }

        Ok(CandidatePage {
            data,
            total: total as u64,
            page: params.page,
        })
    }
}

/// Scoped transaction over the locked connection: `BEGIN` on construction,
/// `ROLLBACK` on every exit path that is not an explicit `commit()`.
/// Owning the mutex guard keeps the transaction `Send`, so it can be held
/// across the notification await.
struct TxGuard<'a> {
    conn: MutexGuard<'a, Connection>,
    committed: bool,
}

impl<'a> TxGuard<'a> {
    fn begin(conn: MutexGuard<'a, Connection>) -> Result<Self, StoreError> {
        conn.execute_batch("BEGIN")?;
        Ok(Self {
            conn,
            committed: false,
        })
    }

    fn commit(mut self) -> Result<(), StoreError> {
        self.conn.execute_batch("COMMIT")?;
        self.committed = true;
        Ok(())
    }
}

impl Deref for TxGuard<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.conn
    }
}

impl Drop for TxGuard<'_> {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(err) = self.conn.execute_batch("ROLLBACK") {
                tracing::error!(error = %err, "transaction rollback failed");
            }
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, _)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                StoreError::EmailConflict
            }
            _ => StoreError::Unavailable(err.to_string()),
        }
    }
}

impl ToSql for RecruitmentStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.label()))
    }
}

impl FromSql for RecruitmentStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        RecruitmentStatus::parse(text)
            .ok_or_else(|| FromSqlError::Other(format!("unknown recruitment status '{text}'").into()))
    }
}
