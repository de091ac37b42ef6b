//! CSV-backed announcement store.
//!
//! The whole file is the unit of storage: every operation reads it in full,
//! and every mutation rewrites it in full through a sibling temporary file
//! that is renamed over the original. A process-wide lock serializes each
//! read-modify-write cycle so concurrent creates cannot hand out the same id.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Deserializer};
use tb_core::{Announcement, AnnouncementDraft, AnnouncementId, Error, Page, PageRequest, Result};

/// Column header of the backing file, in order.
pub const HEADER: [&str; 4] = ["id", "titulo", "descripcion", "fecha"];

/// Durable list of announcements kept in a single CSV file.
#[derive(Debug)]
pub struct AnnouncementStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl AnnouncementStore {
    /// Open the store at `path`, creating a header-only file (and any missing
    /// parent directories) if nothing exists there yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                tracing::info!("Created store directory {}", parent.display());
            }
        }

        let store = Self {
            path,
            lock: Mutex::new(()),
        };

        if store.path.exists() {
            tracing::info!("Announcement store opened (existing) at {}", store.path.display());
        } else {
            store.write_all(&[])?;
            tracing::info!("Announcement store created (new) at {}", store.path.display());
        }

        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every record, in file order.
    pub fn all(&self) -> Result<Vec<Announcement>> {
        let _guard = self.lock.lock();
        self.read_all()
    }

    /// One page of records in file order, with totals over the whole file.
    pub fn list(&self, request: PageRequest) -> Result<Page<Announcement>> {
        let records = self.all()?;
        Ok(request.paginate(&records))
    }

    /// Look up a single record.
    pub fn get(&self, id: AnnouncementId) -> Result<Option<Announcement>> {
        Ok(self.all()?.into_iter().find(|a| a.id == id))
    }

    /// Append a new record with id `max(existing) + 1`, or 1 on an empty store.
    ///
    /// Deleting the highest record frees its id for the next create.
    pub fn create(&self, draft: AnnouncementDraft) -> Result<Announcement> {
        let _guard = self.lock.lock();
        let mut records = self.read_all()?;

        let id = next_id(&records)?;
        let created = Announcement::from_draft(id, draft);
        records.push(created.clone());
        self.write_all(&records)?;

        tracing::info!(id, "Created announcement");
        Ok(created)
    }

    /// Overwrite the mutable fields of record `id`.
    ///
    /// A hand-edited file may repeat an id; every row carrying it is updated.
    /// Returns `None` and leaves the file untouched when no such record exists.
    pub fn update(&self, id: AnnouncementId, draft: AnnouncementDraft) -> Result<Option<Announcement>> {
        let _guard = self.lock.lock();
        let mut records = self.read_all()?;

        let mut updated = None;
        for record in records.iter_mut().filter(|a| a.id == id) {
            record.apply(draft.clone());
            updated.get_or_insert_with(|| record.clone());
        }
        let Some(updated) = updated else {
            tracing::debug!(id, "Update of unknown announcement");
            return Ok(None);
        };
        self.write_all(&records)?;

        tracing::info!(id, "Updated announcement");
        Ok(Some(updated))
    }

    /// Remove every row carrying `id` and no other.
    ///
    /// Returns the first removed row, or `None` with the file untouched when
    /// no such record exists.
    pub fn delete(&self, id: AnnouncementId) -> Result<Option<Announcement>> {
        let _guard = self.lock.lock();
        let records = self.read_all()?;

        let (removed, kept): (Vec<_>, Vec<_>) = records.into_iter().partition(|a| a.id == id);
        let Some(first) = removed.into_iter().next() else {
            tracing::debug!(id, "Delete of unknown announcement");
            return Ok(None);
        };
        self.write_all(&kept)?;

        tracing::info!(id, "Deleted announcement");
        Ok(Some(first))
    }

    fn read_all(&self) -> Result<Vec<Announcement>> {
        let mut reader = csv::Reader::from_path(&self.path).map_err(Error::storage)?;
        reader
            .deserialize::<CsvRow>()
            .map(|row| row.map(Announcement::from).map_err(Error::storage))
            .collect()
    }

    fn write_all(&self, records: &[Announcement]) -> Result<()> {
        let tmp = temp_path(&self.path);

        let result = write_rows(&tmp, records)
            .and_then(|()| std::fs::rename(&tmp, &self.path).map_err(Error::from));
        if result.is_err() {
            if let Err(e) = std::fs::remove_file(&tmp) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to remove {}: {}", tmp.display(), e);
                }
            }
        }
        result
    }
}

fn write_rows(path: &Path, records: &[Announcement]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(Error::storage)?;
    writer.write_record(HEADER).map_err(Error::storage)?;
    for record in records {
        writer.serialize(record).map_err(Error::storage)?;
    }
    writer.flush()?;
    Ok(())
}

fn next_id(records: &[Announcement]) -> Result<AnnouncementId> {
    match records.iter().map(|a| a.id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| Error::storage(format!("no id left above {max}"))),
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// On-disk row. Ids written as whole floats (`3.0`) by other tools are
/// coerced to integers.
#[derive(Deserialize)]
struct CsvRow {
    #[serde(deserialize_with = "coerce_id")]
    id: AnnouncementId,
    titulo: String,
    descripcion: String,
    fecha: String,
}

impl From<CsvRow> for Announcement {
    fn from(row: CsvRow) -> Self {
        Self {
            id: row.id,
            title: row.titulo,
            description: row.descripcion,
            date: row.fecha,
        }
    }
}

fn coerce_id<'de, D>(deserializer: D) -> std::result::Result<AnnouncementId, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<AnnouncementId>() {
        return Ok(id);
    }
    // `i64::MAX as f64` rounds up to 2^63, which is itself out of range.
    match raw.parse::<f64>() {
        Ok(f)
            if f.fract() == 0.0
                && f >= AnnouncementId::MIN as f64
                && f < AnnouncementId::MAX as f64 =>
        {
            Ok(f as AnnouncementId)
        }
        _ => Err(serde::de::Error::custom(format!("invalid id '{raw}'"))),
    }
}
