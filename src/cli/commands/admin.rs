use anyhow::{bail, Context};
use clap::Subcommand;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::database::models::admin_user::AdminRole;
use crate::services::admin_service::AdminService;

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "Create an admin account")]
    Create {
        #[arg(long, help = "Admin email address")]
        email: String,

        #[arg(long, help = "Admin display name")]
        name: String,

        #[arg(long, help = "Plaintext password (hashed before storage)")]
        password: String,

        #[arg(long, default_value = "Admin", help = "Role: Admin or 'Super Admin'")]
        role: String,
    },

    #[command(about = "List admin accounts")]
    List,
}

fn parse_role(raw: &str) -> anyhow::Result<AdminRole> {
    match raw {
        "Admin" | "admin" => Ok(AdminRole::Admin),
        "Super Admin" | "SuperAdmin" | "super-admin" => Ok(AdminRole::SuperAdmin),
        other => bail!("unknown role: {other} (expected Admin or 'Super Admin')"),
    }
}

pub async fn handle(cmd: AdminCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let admins = AdminService::new()
        .await
        .context("failed to connect to the database")?;

    match cmd {
        AdminCommands::Create {
            email,
            name,
            password,
            role,
        } => {
            let role = parse_role(&role)?;
            let admin = admins
                .create(&email, &password, &name, role)
                .await
                .context("failed to create admin")?;

            match output_format {
                OutputFormat::Json => println!(
                    "{}",
                    json!({ "id": admin.id, "email": admin.email, "role": admin.role })
                ),
                OutputFormat::Text => {
                    println!("Created admin {} ({})", admin.email, admin.id);
                }
            }
        }
        AdminCommands::List => {
            let all = admins.list().await.context("failed to list admins")?;

            match output_format {
                OutputFormat::Json => {
                    let rows: Vec<_> = all
                        .iter()
                        .map(|a| {
                            json!({
                                "id": a.id,
                                "email": a.email,
                                "name": a.name,
                                "role": a.role,
                                "status": a.status,
                            })
                        })
                        .collect();
                    println!("{}", json!(rows));
                }
                OutputFormat::Text => {
                    if all.is_empty() {
                        println!("No admin accounts");
                    }
                    for a in all {
                        println!("{}  {}  {:?}  {:?}", a.id, a.email, a.role, a.status);
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roles() {
        assert_eq!(parse_role("Admin").unwrap(), AdminRole::Admin);
        assert_eq!(parse_role("Super Admin").unwrap(), AdminRole::SuperAdmin);
        assert!(parse_role("root").is_err());
    }
}
