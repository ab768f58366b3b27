//! Command handlers for the CLI

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

use farm_core::credit;
use farm_core::insight;
use farm_core::types::{FarmerId, InsightSource, TenantId};
use farm_db::{
    CreditFilter, CreditService, Datastore, FarmDatabase, FarmerFilter, FarmerService,
    InsightService, NewFarmer, SurrealConfig,
};

use crate::{CreditCommands, FarmerCommands, InsightCommands};

type CmdResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Create database config from URL
pub(crate) fn create_db_config(url: &str) -> SurrealConfig {
    SurrealConfig {
        endpoint: url.to_string(),
        namespace: "farm".to_string(),
        database: "farm".to_string(),
        username: None,
        password: None,
    }
}

async fn open_database(db_url: &str) -> Result<Arc<FarmDatabase>, Box<dyn std::error::Error + Send + Sync>> {
    let datastore = Arc::new(Datastore::connect(create_db_config(db_url)).await?);
    let database = Arc::new(FarmDatabase::new(datastore));
    database.init_schema().await?;
    Ok(database)
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn parse_acreage(s: &str) -> Result<Decimal, String> {
    s.parse()
        .map_err(|_| format!("Invalid acreage: {s}"))
}

/// Handle farmer commands
pub async fn handle_farmer_command(
    action: FarmerCommands,
    db_url: &str,
    tenant: &str,
) -> CmdResult {
    let database = open_database(db_url).await?;
    let tenant_id = TenantId(tenant.to_string());
    let farmers = FarmerService::new(database, tenant_id);

    match action {
        FarmerCommands::Register {
            phone,
            name,
            location,
            language,
            crops,
        } => {
            let record = farmers
                .register_farmer(NewFarmer {
                    phone,
                    name,
                    location,
                    coordinates: None,
                    language,
                    crops: crops.as_deref().map(split_list).unwrap_or_default(),
                    field_boundaries: Vec::new(),
                })
                .await?;

            println!("Farmer registered successfully!");
            println!("  Farmer ID: {}", record.farmer_id.0);
            println!("  Phone: {}", record.phone);
            println!("  Name: {}", record.name);
            println!("  Language: {}", record.language);
            println!("  Created: {}", record.created_at);
        }

        FarmerCommands::Get { farmer_id } => {
            let farmer = farmers
                .get_farmer(&FarmerId(farmer_id.clone()))
                .await?
                .ok_or_else(|| format!("Farmer {} not found", farmer_id))?;

            println!("Farmer: {}", farmer.farmer_id.0);
            println!("  Phone: {}", farmer.phone);
            println!("  Name: {}", farmer.name);
            println!("  Location: {}", farmer.location);
            println!("  Language: {}", farmer.language);
            println!("  Crops: {:?}", farmer.crops);
            println!("  Total Acres: {:.2}", farmer.total_acres());
            println!("  Created: {}", farmer.created_at);
            println!("  Updated: {}", farmer.updated_at);
        }

        FarmerCommands::List { crop, limit } => {
            let records = farmers
                .list_farmers(
                    FarmerFilter {
                        crop,
                        language: None,
                    },
                    limit,
                    0,
                )
                .await?;

            println!("Found {} farmers:", records.len());
            for farmer in records {
                println!(
                    "  {} - {} ({}, crops: {:?})",
                    farmer.farmer_id.0, farmer.name, farmer.phone, farmer.crops
                );
            }
        }
    }

    Ok(())
}

/// Handle credit commands
pub async fn handle_credit_command(
    action: CreditCommands,
    db_url: &str,
    tenant: &str,
) -> CmdResult {
    match action {
        CreditCommands::Estimate {
            practices,
            acreage,
            crop,
        } => {
            // Pure calculation, no database needed
            let acreage = parse_acreage(&acreage)?;
            let estimate = credit::estimate(&split_list(&practices), acreage, &crop)?;

            println!("Credit estimate:");
            println!("  Crop multiplier: {}", estimate.crop_multiplier);
            for item in &estimate.breakdown {
                println!(
                    "  {} @ {} tCO2e/acre -> {} tCO2e",
                    item.practice, item.rate, item.credits_tco2e
                );
            }
            println!("  Total: {} tCO2e", estimate.credits_tco2e);
            println!("  Value: {} USD", estimate.value_usd);
        }

        CreditCommands::Enroll {
            farmer_id,
            practices,
            acreage,
            crop,
        } => {
            let database = open_database(db_url).await?;
            let tenant_id = TenantId(tenant.to_string());
            let credits = CreditService::new(database, tenant_id);

            let acreage = parse_acreage(&acreage)?;
            let record = credits
                .enroll(&FarmerId(farmer_id), split_list(&practices), acreage, crop)
                .await?;

            println!("Enrollment persisted!");
            println!("  Credit ID: {}", record.credit_id.0);
            println!("  Farmer: {}", record.farmer_id.0);
            println!("  Credits: {} tCO2e", record.credits_tco2e);
            println!("  Value: {} USD", record.value_usd);
            println!("  Status: {}", record.verification_status.as_str());
            println!("  Enrolled: {}", record.enrolled_at);
        }

        CreditCommands::List { status, limit } => {
            let database = open_database(db_url).await?;
            let tenant_id = TenantId(tenant.to_string());
            let credits = CreditService::new(database, tenant_id);

            let records = credits
                .list_credits(
                    CreditFilter {
                        farmer_id: None,
                        verification_status: status,
                    },
                    limit,
                    0,
                )
                .await?;

            println!("Found {} enrollments:", records.len());
            for record in records {
                println!(
                    "  {} - {} tCO2e ({}, farmer: {})",
                    record.credit_id.0,
                    record.credits_tco2e,
                    record.verification_status.as_str(),
                    record.farmer_id.0
                );
            }
        }
    }

    Ok(())
}

/// Handle insight commands
pub async fn handle_insight_command(
    action: InsightCommands,
    db_url: &str,
    tenant: &str,
) -> CmdResult {
    let database = open_database(db_url).await?;
    let tenant_id = TenantId(tenant.to_string());
    let insights = InsightService::new(database, tenant_id);

    match action {
        InsightCommands::Generate { farmer_id, date } => {
            let observed_on = match date {
                Some(d) => NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                    .map_err(|e| format!("Invalid date '{}': {}", d, e))?,
                None => Utc::now().date_naive(),
            };

            let farmer_id = FarmerId(farmer_id);
            let observation = insight::generate(&farmer_id, observed_on);
            let record = insights
                .record_observation(&farmer_id, observation, InsightSource::Synthetic, observed_on)
                .await?;

            println!("Insight generated!");
            println!("  Insight ID: {}", record.insight_id.0);
            println!("  NDVI: {}", record.ndvi_score);
            println!("  Moisture: {}", record.moisture_score);
            println!("  Health: {}", record.health_status.as_str());
            println!("  Recommendation: {}", record.recommendation);
            println!("  Observed On: {}", record.observed_on);
        }

        InsightCommands::List { farmer_id, limit } => {
            let records = insights
                .list_for_farmer(&FarmerId(farmer_id.clone()), limit)
                .await?;

            println!("Insights for farmer {} ({} entries):", farmer_id, records.len());
            for record in records {
                println!(
                    "  {} - NDVI {} ({}, {}, observed {})",
                    record.insight_id.0,
                    record.ndvi_score,
                    record.health_status.as_str(),
                    record.source.as_str(),
                    record.observed_on
                );
            }
        }
    }

    Ok(())
}
