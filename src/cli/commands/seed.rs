use anyhow::Context;
use chrono::NaiveDate;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::database::models::property::PropertyType;
use crate::database::{manager::DatabaseManager, migrate};
use crate::services::admin_service::AdminService;
use crate::services::property_service::{NewProperty, PropertyService};
use crate::services::ServiceError;

struct SampleProperty {
    code: &'static str,
    property_type: PropertyType,
    occupant_name: &'static str,
    occupant_email: &'static str,
    occupant_contact: &'static str,
}

const SAMPLE_PROPERTIES: &[SampleProperty] = &[
    SampleProperty {
        code: "SHOP001",
        property_type: PropertyType::Shop,
        occupant_name: "Occupant SHOP001",
        occupant_email: "occupant.shop001@example.com",
        occupant_contact: "9876543211",
    },
    SampleProperty {
        code: "SHOP002",
        property_type: PropertyType::Shop,
        occupant_name: "Occupant SHOP002",
        occupant_email: "occupant.shop002@example.com",
        occupant_contact: "9876543212",
    },
    SampleProperty {
        code: "BOOTH001",
        property_type: PropertyType::Booth,
        occupant_name: "Occupant BOOTH001",
        occupant_email: "occupant.booth001@example.com",
        occupant_contact: "9876543213",
    },
    SampleProperty {
        code: "CANT001",
        property_type: PropertyType::Canteen,
        occupant_name: "Occupant CANT001",
        occupant_email: "occupant.cant001@example.com",
        occupant_contact: "9876543214",
    },
];

/// Idempotent sample data: existing rows are skipped, not duplicated.
pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::pool()
        .await
        .context("failed to connect to the database")?;
    migrate::apply(&pool)
        .await
        .context("failed to apply schema")?;

    let properties = PropertyService::new().await?;
    let admins = AdminService::new().await?;

    let mut created_properties = 0usize;
    let start_date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid seed date");

    for sample in SAMPLE_PROPERTIES {
        if properties.find_active_by_code(sample.code).await?.is_some() {
            continue;
        }

        properties
            .create_with_occupant(NewProperty {
                property_type: sample.property_type,
                property_code: sample.code.to_string(),
                occupant_name: sample.occupant_name.to_string(),
                occupant_email: sample.occupant_email.to_string(),
                occupant_contact: Some(sample.occupant_contact.to_string()),
                start_date,
            })
            .await
            .with_context(|| format!("failed to seed property {}", sample.code))?;

        created_properties += 1;
    }

    let admin_created = match admins
        .create(
            "admin@nithshop.example.com",
            "admin123",
            "System Administrator",
            crate::database::models::admin_user::AdminRole::Admin,
        )
        .await
    {
        Ok(_) => true,
        Err(ServiceError::Conflict(_)) => false,
        Err(e) => return Err(e).context("failed to seed admin"),
    };

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            json!({
                "properties_created": created_properties,
                "admin_created": admin_created,
            })
        ),
        OutputFormat::Text => {
            println!("Seeded {} properties", created_properties);
            if admin_created {
                println!("Created admin admin@nithshop.example.com (password: admin123)");
            } else {
                println!("Admin already present, skipped");
            }
            println!("Occupants start on the default password and must change it at first login");
        }
    }

    Ok(())
}
