//! SurrealDB schema definitions

/// Complete farmbase schema
///
/// Enumerated status fields carry ASSERT constraints; phone numbers are
/// unique per tenant. Nested shapes (coordinates, boundaries, the
/// credential blob) are FLEXIBLE so their structure is owned by the
/// entity types rather than the schema.
pub const FARM_SCHEMA: &str = r#"
-- ============================================
-- Farmer Table
-- ============================================
DEFINE TABLE farm_farmer SCHEMAFULL;
DEFINE FIELD tenant_id ON farm_farmer TYPE string;
DEFINE FIELD farmer_id ON farm_farmer TYPE string;
DEFINE FIELD phone ON farm_farmer TYPE string;
DEFINE FIELD name ON farm_farmer TYPE string;
DEFINE FIELD location ON farm_farmer TYPE string;
DEFINE FIELD coordinates ON farm_farmer FLEXIBLE TYPE option<object>;
DEFINE FIELD language ON farm_farmer TYPE string;
DEFINE FIELD crops ON farm_farmer TYPE array<string>;
DEFINE FIELD field_boundaries ON farm_farmer FLEXIBLE TYPE array;
DEFINE FIELD created_at ON farm_farmer TYPE datetime;
DEFINE FIELD updated_at ON farm_farmer TYPE datetime;
DEFINE INDEX idx_farmer_id ON farm_farmer FIELDS farmer_id UNIQUE;
DEFINE INDEX idx_farmer_phone ON farm_farmer FIELDS tenant_id, phone UNIQUE;
DEFINE INDEX idx_farmer_tenant ON farm_farmer FIELDS tenant_id;

-- ============================================
-- Call Log Table (append-only)
-- ============================================
DEFINE TABLE farm_call SCHEMAFULL;
DEFINE FIELD tenant_id ON farm_call TYPE string;
DEFINE FIELD call_id ON farm_call TYPE string;
DEFINE FIELD farmer_id ON farm_call TYPE string;
DEFINE FIELD channel ON farm_call TYPE string ASSERT $value IN ['ivr', 'sms', 'whatsapp', 'voice_ai'];
DEFINE FIELD direction ON farm_call TYPE string ASSERT $value IN ['inbound', 'outbound'];
DEFINE FIELD call_status ON farm_call TYPE string ASSERT $value IN ['initiated', 'in_progress', 'completed', 'failed'];
DEFINE FIELD vendor_ref ON farm_call TYPE option<string>;
DEFINE FIELD transcript ON farm_call TYPE option<string>;
DEFINE FIELD summary ON farm_call TYPE option<string>;
DEFINE FIELD duration_secs ON farm_call TYPE option<int>;
DEFINE FIELD started_at ON farm_call TYPE datetime;
DEFINE FIELD updated_at ON farm_call TYPE datetime;
DEFINE INDEX idx_call_id ON farm_call FIELDS call_id UNIQUE;
DEFINE INDEX idx_call_farmer ON farm_call FIELDS farmer_id, started_at;
DEFINE INDEX idx_call_tenant ON farm_call FIELDS tenant_id;

-- ============================================
-- Satellite Insight Table
-- ============================================
DEFINE TABLE farm_insight SCHEMAFULL;
DEFINE FIELD tenant_id ON farm_insight TYPE string;
DEFINE FIELD insight_id ON farm_insight TYPE string;
DEFINE FIELD farmer_id ON farm_insight TYPE string;
DEFINE FIELD ndvi_score ON farm_insight TYPE string;
DEFINE FIELD moisture_score ON farm_insight TYPE string;
DEFINE FIELD health_status ON farm_insight TYPE string ASSERT $value IN ['bare', 'stressed', 'moderate', 'healthy'];
DEFINE FIELD recommendation ON farm_insight TYPE string;
DEFINE FIELD source ON farm_insight TYPE string ASSERT $value IN ['live', 'synthetic'];
DEFINE FIELD observed_on ON farm_insight TYPE string;
DEFINE FIELD created_at ON farm_insight TYPE datetime;
DEFINE INDEX idx_insight_id ON farm_insight FIELDS insight_id UNIQUE;
DEFINE INDEX idx_insight_farmer ON farm_insight FIELDS farmer_id, created_at;
DEFINE INDEX idx_insight_tenant ON farm_insight FIELDS tenant_id;

-- ============================================
-- Carbon Credit Table
-- ============================================
DEFINE TABLE farm_credit SCHEMAFULL;
DEFINE FIELD tenant_id ON farm_credit TYPE string;
DEFINE FIELD credit_id ON farm_credit TYPE string;
DEFINE FIELD farmer_id ON farm_credit TYPE string;
DEFINE FIELD practices ON farm_credit TYPE array<string>;
DEFINE FIELD acreage ON farm_credit TYPE string;
DEFINE FIELD crop ON farm_credit TYPE string;
DEFINE FIELD credits_tco2e ON farm_credit TYPE string;
DEFINE FIELD value_usd ON farm_credit TYPE string;
DEFINE FIELD verification_status ON farm_credit TYPE string ASSERT $value IN ['pending', 'verified', 'rejected'];
DEFINE FIELD methodology_version ON farm_credit TYPE string;
DEFINE FIELD registry_ref ON farm_credit TYPE option<string>;
DEFINE FIELD enrolled_at ON farm_credit TYPE datetime;
DEFINE FIELD updated_at ON farm_credit TYPE datetime;
DEFINE INDEX idx_credit_id ON farm_credit FIELDS credit_id UNIQUE;
DEFINE INDEX idx_credit_farmer ON farm_credit FIELDS farmer_id;
DEFINE INDEX idx_credit_status ON farm_credit FIELDS verification_status;
DEFINE INDEX idx_credit_tenant ON farm_credit FIELDS tenant_id;

-- ============================================
-- Vendor Credentials Table (one row per tenant)
-- ============================================
DEFINE TABLE farm_credentials SCHEMAFULL;
DEFINE FIELD tenant_id ON farm_credentials TYPE string;
DEFINE FIELD payload ON farm_credentials FLEXIBLE TYPE object;
DEFINE FIELD updated_at ON farm_credentials TYPE datetime;
DEFINE INDEX idx_credentials_tenant ON farm_credentials FIELDS tenant_id UNIQUE;
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_contains_all_tables() {
        assert!(FARM_SCHEMA.contains("DEFINE TABLE farm_farmer"));
        assert!(FARM_SCHEMA.contains("DEFINE TABLE farm_call"));
        assert!(FARM_SCHEMA.contains("DEFINE TABLE farm_insight"));
        assert!(FARM_SCHEMA.contains("DEFINE TABLE farm_credit"));
        assert!(FARM_SCHEMA.contains("DEFINE TABLE farm_credentials"));
    }

    #[test]
    fn test_schema_enforces_status_enums() {
        assert!(FARM_SCHEMA.contains("ASSERT $value IN ['initiated', 'in_progress', 'completed', 'failed']"));
        assert!(FARM_SCHEMA.contains("ASSERT $value IN ['pending', 'verified', 'rejected']"));
    }

    #[test]
    fn test_schema_has_unique_phone_index() {
        assert!(FARM_SCHEMA.contains("FIELDS tenant_id, phone UNIQUE"));
    }
}
