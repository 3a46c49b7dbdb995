use crate::db::pool::DbPool;
use crate::db::queries::{find_student, load_students, upsert_student};
use crate::errors::{AppError, AppResult, StoreError};
use crate::models::StudentRecord;

pub struct RegistryLogic;

impl RegistryLogic {
    /// Insert or overwrite every record keyed by `student_id`.
    ///
    /// Running the same batch twice leaves the same rows. Returns the number
    /// of records processed (duplicates inside the batch are counted, the last
    /// one wins).
    pub fn upsert_batch(pool: &mut DbPool, records: &[StudentRecord]) -> AppResult<usize> {
        let tx = pool.conn.transaction().map_err(StoreError::WriteFailed)?;

        for r in records {
            upsert_student(&tx, r).map_err(StoreError::WriteFailed)?;
        }

        tx.commit().map_err(StoreError::WriteFailed)?;
        Ok(records.len())
    }

    pub fn get(pool: &DbPool, student_id: &str) -> AppResult<StudentRecord> {
        find_student(&pool.conn, student_id)?
            .ok_or_else(|| AppError::StudentNotFound(student_id.to_string()))
    }

    pub fn contains(pool: &DbPool, student_id: &str) -> AppResult<bool> {
        Ok(find_student(&pool.conn, student_id)?.is_some())
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<StudentRecord>> {
        Ok(load_students(&pool.conn)?)
    }
}
