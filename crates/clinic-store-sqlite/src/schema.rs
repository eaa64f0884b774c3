//! SQL schema for the clinic SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Money columns hold decimal text; timestamps hold RFC 3339 UTC text.
/// List order everywhere is `rowid` order, i.e. insertion order.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS customers (
    customer_id        TEXT PRIMARY KEY,
    first_name         TEXT NOT NULL,
    last_name          TEXT NOT NULL DEFAULT '',
    email              TEXT NOT NULL UNIQUE COLLATE NOCASE,
    phone              TEXT,
    address            TEXT,
    hearing_loss_level TEXT NOT NULL,   -- 'mild' | 'moderate' | 'severe'
    budget             TEXT NOT NULL,
    has_insurance      INTEGER NOT NULL DEFAULT 0,
    created_at         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS products (
    product_id           TEXT PRIMARY KEY,
    brand                TEXT NOT NULL,
    model                TEXT NOT NULL,
    kind                 TEXT NOT NULL,   -- 'BTE' | 'ITE' | 'CIC'
    price                TEXT NOT NULL,
    features             TEXT NOT NULL DEFAULT '[]',
    suitable_loss_levels TEXT NOT NULL DEFAULT '[]',
    in_stock             INTEGER NOT NULL DEFAULT 0,
    created_at           TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS orders (
    order_id           TEXT PRIMARY KEY,
    customer_id        TEXT NOT NULL REFERENCES customers(customer_id),
    status             TEXT NOT NULL DEFAULT 'ordered',
    total_amount       TEXT NOT NULL,
    insurance_discount TEXT NOT NULL,
    final_amount       TEXT NOT NULL,
    delivery_date      TEXT,
    tracking_number    TEXT,
    notes              TEXT,
    created_at         TEXT NOT NULL
);

-- Written once together with the owning order; never updated.
CREATE TABLE IF NOT EXISTS line_items (
    line_item_id TEXT PRIMARY KEY,
    order_id     TEXT NOT NULL REFERENCES orders(order_id),
    product_id   TEXT NOT NULL REFERENCES products(product_id),
    position     INTEGER NOT NULL,
    quantity     INTEGER NOT NULL CHECK (quantity > 0),
    unit_price   TEXT NOT NULL,      -- snapshot of products.price
    ear_side     TEXT NOT NULL,      -- 'left' | 'right' | 'both'
    UNIQUE (order_id, position)
);

CREATE TABLE IF NOT EXISTS appointments (
    appointment_id   TEXT PRIMARY KEY,
    customer_id      TEXT NOT NULL REFERENCES customers(customer_id),
    order_id         TEXT REFERENCES orders(order_id),
    appointment_type TEXT NOT NULL,
    scheduled_at     TEXT NOT NULL,
    status           TEXT NOT NULL DEFAULT 'scheduled',
    notes            TEXT,
    created_at       TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS orders_customer_idx       ON orders(customer_id);
CREATE INDEX IF NOT EXISTS line_items_order_idx      ON line_items(order_id);
CREATE INDEX IF NOT EXISTS appointments_customer_idx ON appointments(customer_id);

PRAGMA user_version = 1;
";
