use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{params, Connection, Row};

use crate::error::{CoreError, StorageError};
use crate::migrations::MIGRATIONS;
use crate::models::MessageRecord;
use crate::store::MessageStore;

const SELECT_COLUMNS: &str = "id, address, date, date_sent, type, body, contact_name, readable_date, \
     protocol, subject, toa, sc_toa, service_center, read, status, locked, sub_id";

pub struct ArchiveDb {
    pub path: PathBuf,
    pub conn: Connection,
}

pub fn open_archive(path: impl AsRef<Path>) -> Result<ArchiveDb, CoreError> {
    let path = path.as_ref().to_path_buf();
    let conn = Connection::open(&path)?;
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.execute_batch(
        "PRAGMA journal_mode = WAL; \
         PRAGMA synchronous = NORMAL; \
         PRAGMA journal_size_limit = 67108864; \
         PRAGMA temp_store = MEMORY;",
    )?;
    apply_migrations(&conn)?;
    Ok(ArchiveDb { path, conn })
}

pub fn open_in_memory() -> Result<ArchiveDb, CoreError> {
    let conn = Connection::open_in_memory()?;
    apply_migrations(&conn)?;
    Ok(ArchiveDb {
        path: PathBuf::from(":memory:"),
        conn,
    })
}

pub fn apply_migrations(conn: &Connection) -> Result<(), CoreError> {
    let current_version: i64 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let mut version = current_version as usize;
    for (idx, sql) in MIGRATIONS.iter().enumerate() {
        let next_version = idx + 1;
        if next_version <= version {
            continue;
        }
        conn.execute_batch(sql)?;
        conn.execute_batch(&format!("PRAGMA user_version = {};", next_version))?;
        version = next_version;
    }
    Ok(())
}

fn record_from_row(row: &Row) -> rusqlite::Result<MessageRecord> {
    Ok(MessageRecord {
        id: Some(row.get(0)?),
        address: row.get(1)?,
        date: row.get(2)?,
        date_sent: row.get(3)?,
        message_type: row.get(4)?,
        body: row.get(5)?,
        contact_name: row.get(6)?,
        readable_date: row.get(7)?,
        protocol: row.get(8)?,
        subject: row.get(9)?,
        toa: row.get(10)?,
        sc_toa: row.get(11)?,
        service_center: row.get(12)?,
        read: row.get(13)?,
        status: row.get(14)?,
        locked: row.get(15)?,
        sub_id: row.get(16)?,
    })
}

impl MessageStore for ArchiveDb {
    fn count(&self) -> Result<i64, StorageError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(1) FROM sms;", [], |row| row.get(0))?;
        Ok(count)
    }

    fn get_all(&self) -> Result<Vec<MessageRecord>, StorageError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM sms ORDER BY id ASC;", SELECT_COLUMNS))?;
        let rows = stmt.query_map([], record_from_row)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    fn bulk_append(&mut self, records: &[MessageRecord]) -> Result<Vec<i64>, StorageError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }
        // dropping the transaction on error rolls it back
        let tx = self.conn.transaction()?;
        let mut ids = Vec::with_capacity(records.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO sms (address, date, date_sent, type, body, contact_name, readable_date, \
                 protocol, subject, toa, sc_toa, service_center, read, status, locked, sub_id) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16);",
            )?;
            for record in records {
                stmt.execute(params![
                    record.address,
                    record.date,
                    record.date_sent,
                    record.message_type,
                    record.body,
                    record.contact_name,
                    record.readable_date,
                    record.protocol,
                    record.subject,
                    record.toa,
                    record.sc_toa,
                    record.service_center,
                    record.read,
                    record.status,
                    record.locked,
                    record.sub_id,
                ])?;
                ids.push(tx.last_insert_rowid());
            }
        }
        tx.commit()?;
        Ok(ids)
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.conn.execute("DELETE FROM sms;", [])?;
        Ok(())
    }
}
