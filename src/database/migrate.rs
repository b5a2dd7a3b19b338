use sqlx::PgPool;
use tracing::info;

use super::manager::DatabaseError;

/// Postgres has no CREATE TYPE IF NOT EXISTS; each enum gets a guarded block.
const ENUM_TYPES: &[&str] = &[
    "DO $$ BEGIN
        CREATE TYPE record_status AS ENUM ('Active', 'Inactive');
    EXCEPTION WHEN duplicate_object THEN NULL; END $$",
    "DO $$ BEGIN
        CREATE TYPE property_type AS ENUM ('Shop', 'Booth', 'Canteen');
    EXCEPTION WHEN duplicate_object THEN NULL; END $$",
    "DO $$ BEGIN
        CREATE TYPE admin_role AS ENUM ('Super Admin', 'Admin');
    EXCEPTION WHEN duplicate_object THEN NULL; END $$",
    "DO $$ BEGIN
        CREATE TYPE recipient_type AS ENUM
            ('individual', 'all_shops', 'all_booths', 'all_canteens', 'all_properties');
    EXCEPTION WHEN duplicate_object THEN NULL; END $$",
    "DO $$ BEGIN
        CREATE TYPE communication_status AS ENUM ('sent', 'delivered', 'read');
    EXCEPTION WHEN duplicate_object THEN NULL; END $$",
    "DO $$ BEGIN
        CREATE TYPE uploader_role AS ENUM ('admin', 'occupant');
    EXCEPTION WHEN duplicate_object THEN NULL; END $$",
    "DO $$ BEGIN
        CREATE TYPE file_status AS ENUM ('active', 'inactive');
    EXCEPTION WHEN duplicate_object THEN NULL; END $$",
];

const TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS properties (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        property_code VARCHAR(10) NOT NULL UNIQUE,
        property_type property_type NOT NULL,
        status record_status NOT NULL DEFAULT 'Active',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS occupants (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
        name VARCHAR(100) NOT NULL,
        email VARCHAR(100) NOT NULL,
        contact VARCHAR(20),
        password_hash VARCHAR(255) NOT NULL,
        is_first_login BOOLEAN NOT NULL DEFAULT TRUE,
        status record_status NOT NULL DEFAULT 'Active',
        start_date DATE NOT NULL,
        end_date DATE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS admin_users (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        email VARCHAR(100) NOT NULL UNIQUE,
        password_hash VARCHAR(255) NOT NULL,
        name VARCHAR(100) NOT NULL,
        role admin_role NOT NULL DEFAULT 'Admin',
        status record_status NOT NULL DEFAULT 'Active',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS communications (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        sender_id UUID NOT NULL,
        recipient_type recipient_type NOT NULL,
        recipient_property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
        file_title VARCHAR(255) NOT NULL,
        message TEXT,
        file_path VARCHAR(500),
        file_name VARCHAR(255),
        file_size BIGINT,
        status communication_status NOT NULL DEFAULT 'sent',
        sent_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS file_uploads (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
        uploaded_by uploader_role NOT NULL,
        uploaded_by_id UUID NOT NULL,
        file_title VARCHAR(255) NOT NULL,
        description TEXT,
        file_path VARCHAR(500) NOT NULL,
        file_name VARCHAR(255) NOT NULL,
        file_size BIGINT NOT NULL,
        status file_status NOT NULL DEFAULT 'active',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_occupants_property ON occupants(property_id)",
    "CREATE INDEX IF NOT EXISTS idx_communications_property ON communications(recipient_property_id)",
    "CREATE INDEX IF NOT EXISTS idx_file_uploads_property ON file_uploads(property_id)",
];

/// Apply the schema idempotently. Safe to run on every startup.
pub async fn apply(pool: &PgPool) -> Result<(), DatabaseError> {
    for stmt in ENUM_TYPES.iter().chain(TABLES).chain(INDEXES) {
        sqlx::query(stmt).execute(pool).await?;
    }

    info!("Database schema is up to date");
    Ok(())
}
