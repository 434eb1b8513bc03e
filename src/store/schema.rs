pub(crate) const CURRENT_VERSION: i32 = 1;

pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS expenses (
    id       INTEGER PRIMARY KEY,
    date     TEXT,
    category TEXT NOT NULL DEFAULT '',
    amount   TEXT NOT NULL
);
"#;
