pub const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS sms (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      address TEXT NOT NULL,
      date INTEGER NOT NULL DEFAULT 0,
      date_sent INTEGER NOT NULL DEFAULT 0,
      type INTEGER NOT NULL DEFAULT 0,
      body TEXT NOT NULL DEFAULT '',
      contact_name TEXT NOT NULL DEFAULT '(Unknown)',
      readable_date TEXT NOT NULL DEFAULT '',
      protocol TEXT NOT NULL DEFAULT '',
      subject TEXT NOT NULL DEFAULT '',
      toa TEXT NOT NULL DEFAULT '',
      sc_toa TEXT NOT NULL DEFAULT '',
      service_center TEXT NOT NULL DEFAULT '',
      read TEXT NOT NULL DEFAULT '0',
      status TEXT NOT NULL DEFAULT '',
      locked TEXT NOT NULL DEFAULT '0',
      sub_id TEXT NOT NULL DEFAULT ''
    );

    CREATE INDEX IF NOT EXISTS idx_sms_identity ON sms(address, date, body);
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_sms_date ON sms(date DESC, id ASC);
    "#,
];
