use crate::core::registry::RegistryLogic;
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::StudentRecord;
use crate::qr::QrRenderer;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct RegisterSummary {
    pub registered: usize,
    pub qr_files: Vec<PathBuf>,
}

pub struct RegisterLogic;

impl RegisterLogic {
    /// Upsert the batch, then (re)generate one badge per student.
    pub fn apply(
        pool: &mut DbPool,
        records: &[StudentRecord],
        renderer: Option<&QrRenderer>,
        source: &str,
    ) -> AppResult<RegisterSummary> {
        let registered = RegistryLogic::upsert_batch(pool, records)?;

        let mut qr_files = Vec::new();
        if let Some(r) = renderer {
            for s in records {
                qr_files.push(r.render_student(s)?);
            }
        }

        ttlog_or_warn(
            &pool.conn,
            "register",
            source,
            &format!(
                "Registered {} students, generated {} QR codes",
                registered,
                qr_files.len()
            ),
        );

        Ok(RegisterSummary {
            registered,
            qr_files,
        })
    }

    /// Regenerate badges for the given ids, or for the whole registry when
    /// `ids` is empty.
    pub fn regenerate_qr(
        pool: &DbPool,
        renderer: &QrRenderer,
        ids: &[String],
    ) -> AppResult<Vec<PathBuf>> {
        let students = if ids.is_empty() {
            RegistryLogic::list(pool)?
        } else {
            ids.iter()
                .map(|id| RegistryLogic::get(pool, id))
                .collect::<AppResult<Vec<_>>>()?
        };

        students.iter().map(|s| renderer.render_student(s)).collect()
    }
}
