//! Lekgotla membership portal CLI
//!
//! Command-line interface for applicants and administrators.

#![allow(clippy::print_stdout)]

use std::{io::Write as _, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use application::{
    ports::{DocumentEncoder as _, KeyValueStore},
    services::{
        AdminAuthService, ApplicantRegistry, AssistantService, BrandingService, dashboard_service,
    },
};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use domain::{Applicant, ApplicantId, ApplicationStatus, ContactDetails, EmailAddress,
    IdentityNumber, PhoneNumber};
use futures::StreamExt;
use infrastructure::{
    AppConfig, DataUrlEncoder, HttpAssistant, SqliteKeyValueStore, create_pool, init_telemetry,
};

/// Lekgotla membership portal CLI
#[derive(Parser)]
#[command(name = "lekgotla")]
#[command(author, version, about = "Lekgotla Membership Portal CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusFilter {
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl From<StatusFilter> for ApplicationStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Draft => Self::Draft,
            StatusFilter::Pending => Self::Pending,
            StatusFilter::Approved => Self::Approved,
            StatusFilter::Rejected => Self::Rejected,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a membership application
    Submit {
        /// 13-digit South African identity number
        #[arg(long)]
        identity: String,

        /// Applicant full name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Phone number
        #[arg(long)]
        phone: String,

        /// Street address
        #[arg(long)]
        address: String,

        /// Province
        #[arg(long)]
        province: String,

        /// Municipality
        #[arg(long)]
        municipality: String,

        /// Path to the identity photo
        #[arg(long)]
        id_photo: PathBuf,

        /// Path to the proof of payment
        #[arg(long)]
        payment_proof: PathBuf,
    },

    /// Retrieve the submitted application for an identity number
    Retrieve {
        /// 13-digit South African identity number
        identity: String,
    },

    /// List applications, optionally filtered by status
    List {
        /// Only show applications with this status
        #[arg(short, long)]
        status: Option<StatusFilter>,
    },

    /// Approve a pending or rejected application
    Approve {
        /// Applicant identifier
        id: String,
    },

    /// Reject a pending or approved application
    Reject {
        /// Applicant identifier
        id: String,

        /// Reason shown to the applicant
        #[arg(short, long)]
        reason: String,
    },

    /// Delete one or more applications
    Delete {
        /// Applicant identifiers
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Show application statistics and membership growth
    Dashboard,

    /// List memberships expiring within the next 30 days
    Expiring,

    /// Check administrator credentials
    Login {
        /// Administrator username
        username: String,

        /// Administrator password
        password: String,
    },

    /// Request a password reset token
    RequestReset {
        /// Administrator username
        username: String,
    },

    /// Complete a password reset with an issued token
    ResetPassword {
        /// The 8-character reset token
        token: String,

        /// The replacement password
        new_password: String,
    },

    /// Print the portal logo as a data URL
    Logo,

    /// Replace the portal logo from an image file
    SetLogo {
        /// Image file to install as the new logo
        path: PathBuf,
    },

    /// Ask the portal assistant a question
    Chat {
        /// Message to send
        message: String,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn print_applicant(applicant: &Applicant) {
    println!("🪪 {} ({})", applicant.contact.full_name, applicant.id);
    println!("   Identity:     {}", applicant.identity_number.as_str());
    println!("   Born:         {}", applicant.date_of_birth);
    println!("   Email:        {}", applicant.contact.email);
    println!(
        "   Phone:        {}",
        applicant.contact.phone.as_str()
    );
    println!(
        "   Location:     {}, {}, {}",
        applicant.contact.address, applicant.contact.municipality, applicant.contact.province
    );
    println!("   Status:       {}", applicant.status);
    if let Some(reason) = &applicant.rejection_reason {
        println!("   Reason:       {reason}");
    }
    if let Some(at) = applicant.submitted_at {
        println!("   Submitted:    {}", at.format("%Y-%m-%d %H:%M UTC"));
    }
    if let Some(at) = applicant.approved_at {
        println!("   Approved:     {}", at.format("%Y-%m-%d"));
    }
    if let Some(at) = applicant.expires_at {
        println!("   Expires:      {}", at.format("%Y-%m-%d"));
    }
    println!("   Role:         {}", applicant.membership_role);
}

fn parse_applicant_id(raw: &str) -> anyhow::Result<ApplicantId> {
    ApplicantId::parse(raw).with_context(|| format!("'{raw}' is not a valid applicant id"))
}

#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_telemetry(log_filter_from_verbosity(cli.verbose))
        .context("failed to initialize logging")?;

    let config = AppConfig::load().context("failed to load configuration")?;
    let pool = Arc::new(create_pool(&config.database).context("failed to open database")?);
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteKeyValueStore::new(pool));

    match cli.command {
        Commands::Submit {
            identity,
            name,
            email,
            phone,
            address,
            province,
            municipality,
            id_photo,
            payment_proof,
        } => {
            let now = Utc::now();
            let identity = IdentityNumber::parse(&identity)?;
            let date_of_birth = identity.date_of_birth()?;

            let contact = ContactDetails {
                full_name: name,
                email: EmailAddress::new(email)?,
                phone: PhoneNumber::new(phone)?,
                address,
                province,
                municipality,
            };

            let encoder = DataUrlEncoder::new();
            let draft = Applicant::draft(identity, date_of_birth, contact)
                .with_id_photo(encoder.encode(&id_photo).await?)
                .with_payment_proof(encoder.encode(&payment_proof).await?);

            let registry = ApplicantRegistry::load(store).await?;
            let stored = registry.upsert(draft, now).await;
            let submitted = registry.submit(&stored.id, now).await?;

            println!("✅ Application submitted");
            print_applicant(&submitted);
        },

        Commands::Retrieve { identity } => {
            let identity = IdentityNumber::parse(&identity)?;
            let registry = ApplicantRegistry::load(store).await?;
            let applicant = registry.find_by_identity(identity.as_str())?;
            print_applicant(&applicant);
        },

        Commands::List { status } => {
            let registry = ApplicantRegistry::load(store).await?;
            let filter: Option<ApplicationStatus> = status.map(Into::into);
            let applicants: Vec<_> = registry
                .list()
                .into_iter()
                .filter(|a| filter.is_none_or(|wanted| a.status == wanted))
                .collect();

            if applicants.is_empty() {
                println!("No applications found");
            }
            for applicant in &applicants {
                print_applicant(applicant);
                println!();
            }
        },

        Commands::Approve { id } => {
            let id = parse_applicant_id(&id)?;
            let registry = ApplicantRegistry::load(store).await?;
            let outcome = registry.approve(&id, Utc::now()).await?;

            println!("✅ Application approved");
            if let Some(stamp) = &outcome.stamp {
                println!(
                    "   Membership as {} runs until {}",
                    stamp.role,
                    stamp.expires_at.format("%Y-%m-%d")
                );
            }
            print_applicant(&outcome.applicant);
        },

        Commands::Reject { id, reason } => {
            let id = parse_applicant_id(&id)?;
            let registry = ApplicantRegistry::load(store).await?;
            let applicant = registry.reject(&id, reason, Utc::now()).await?;

            println!("🚫 Application rejected");
            print_applicant(&applicant);
        },

        Commands::Delete { ids } => {
            let ids = ids
                .iter()
                .map(|raw| parse_applicant_id(raw))
                .collect::<anyhow::Result<Vec<_>>>()?;

            let registry = ApplicantRegistry::load(store).await?;
            let removed = registry.delete_many(&ids).await;
            println!("🗑️  Removed {removed} of {} application(s)", ids.len());
        },

        Commands::Dashboard => {
            let registry = ApplicantRegistry::load(store).await?;
            let applicants = registry.list();
            let stats = dashboard_service::stats(&applicants);

            println!("📊 Applications:");
            println!("   Total:    {}", stats.total);
            println!("   Pending:  {}", stats.pending);
            println!("   Approved: {}", stats.approved);
            println!("   Rejected: {}", stats.rejected);

            let growth = dashboard_service::growth_series(&applicants);
            if !growth.is_empty() {
                println!();
                println!("📈 Membership growth:");
                for point in growth {
                    println!("   {}  +{:<3} (total {})", point.date, point.new, point.total);
                }
            }
        },

        Commands::Expiring => {
            let registry = ApplicantRegistry::load(store).await?;
            let expiring = registry.expiring_soon(Utc::now());

            if expiring.is_empty() {
                println!("No memberships expire within the next 30 days");
            }
            for applicant in &expiring {
                print_applicant(applicant);
                println!();
            }
        },

        Commands::Login { username, password } => {
            let auth = AdminAuthService::load(
                store,
                &config.admin.default_username,
                &config.admin.default_password,
            )
            .await?;

            if auth.login(&username, &password) {
                println!("✅ Login successful");
            } else {
                println!("❌ Invalid username or password");
                std::process::exit(1);
            }
        },

        Commands::RequestReset { username } => {
            let auth = AdminAuthService::load(
                store,
                &config.admin.default_username,
                &config.admin.default_password,
            )
            .await?;

            let token = auth.request_password_reset(&username, Utc::now()).await?;
            println!("🔑 Reset token (valid for 15 minutes): {token}");
        },

        Commands::ResetPassword {
            token,
            new_password,
        } => {
            let auth = AdminAuthService::load(
                store,
                &config.admin.default_username,
                &config.admin.default_password,
            )
            .await?;

            auth.complete_password_reset(&token, &new_password, Utc::now())
                .await?;
            println!("✅ Password updated");
        },

        Commands::Logo => {
            let branding = BrandingService::new(store, Arc::new(DataUrlEncoder::new()));
            println!("{}", branding.logo().await?);
        },

        Commands::SetLogo { path } => {
            let branding = BrandingService::new(store, Arc::new(DataUrlEncoder::new()));
            branding.set_logo(&path).await?;
            println!("✅ Logo updated from {}", path.display());
        },

        Commands::Chat { message } => {
            let assistant = AssistantService::new(Arc::new(HttpAssistant::new(config.assistant)));
            let mut stream = assistant.send(message).await?;

            print!("🤖 ");
            std::io::stdout().flush()?;
            while let Some(delta) = stream.next().await {
                let delta = delta?;
                print!("{}", delta.content);
                std::io::stdout().flush()?;
                if delta.done {
                    break;
                }
            }
            println!();
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn log_filter_verbosity_levels() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(3), "trace");
        assert_eq!(log_filter_from_verbosity(10), "trace");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn status_filter_maps_onto_domain_statuses() {
        assert_eq!(
            ApplicationStatus::from(StatusFilter::Pending),
            ApplicationStatus::Pending
        );
        assert_eq!(
            ApplicationStatus::from(StatusFilter::Rejected),
            ApplicationStatus::Rejected
        );
    }

    #[test]
    fn reject_requires_a_reason_argument() {
        let parsed = Cli::try_parse_from(["lekgotla", "reject", "some-id"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn delete_requires_at_least_one_id() {
        let parsed = Cli::try_parse_from(["lekgotla", "delete"]);
        assert!(parsed.is_err());
    }
}
