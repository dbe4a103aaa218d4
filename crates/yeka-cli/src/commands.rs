//! Command handlers for the CLI

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use yeka_client::{
    ApiClient, ClientConfig, CorruptionTypeLookup, HttpSubmissionGateway, REPORTS_ENDPOINT,
};
use yeka_core::{EvidenceFile, PlaceType};
use yeka_form::{
    content_type_for, CloseRequest, DialogView, FormKind, FormSession, Submitter, TicketDialog,
};
use yeka_i18n::{catalog, routes, Locale, MessageCatalog};

#[derive(Parser)]
#[command(name = "yeka")]
#[command(about = "Yeka sub-city corruption report portal CLI")]
#[command(version)]
pub struct Cli {
    /// Interface locale (en or am)
    #[arg(short, long, default_value = "en")]
    pub locale: String,

    /// API root, overriding the YEKA_API_BASE environment variable
    #[arg(long)]
    pub api_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a corruption report
    Report(SubmitArgs),

    /// Submit a service complaint
    Complaint(SubmitArgs),

    /// List corruption types for the report form
    Types,

    /// Look up a submitted report by ticket number
    Status {
        /// Ticket number, as printed on submission
        ticket: String,
    },

    /// Rewrite a route path to another locale
    LocalePath {
        /// Current path, such as /en/report/YK-2024-0001
        path: String,
        /// Target locale
        to: String,
    },
}

#[derive(Args)]
pub struct SubmitArgs {
    /// Reporter name (optional)
    #[arg(long)]
    name: Option<String>,

    /// Contact phone number
    #[arg(long)]
    phone: Option<String>,

    /// Contact email (optional)
    #[arg(long)]
    email: Option<String>,

    /// Reporter address (optional)
    #[arg(long)]
    address: Option<String>,

    /// Incident date, yyyy-mm-dd
    #[arg(long)]
    date: Option<String>,

    /// Whether the place code names a subcity or a woreda
    #[arg(long, value_enum, default_value = "woreda")]
    place_type: PlaceArg,

    /// Place code, such as 09
    #[arg(long)]
    place: Option<String>,

    /// Office or bureau the submission concerns
    #[arg(long)]
    office: Option<String>,

    /// Corruption type id from `yeka types` (reports only)
    #[arg(long)]
    corruption_type: Option<String>,

    /// What happened
    #[arg(long)]
    description: Option<String>,

    /// Evidence file, repeatable (reports only)
    #[arg(long = "evidence")]
    evidences: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlaceArg {
    Subcity,
    Woreda,
}

impl From<PlaceArg> for PlaceType {
    fn from(arg: PlaceArg) -> Self {
        match arg {
            PlaceArg::Subcity => PlaceType::Subcity,
            PlaceArg::Woreda => PlaceType::Woreda,
        }
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let locale: Locale = cli.locale.parse()?;
    let config = client_config(cli.api_base, cli.timeout_secs);

    match cli.command {
        Commands::Report(args) => submit(FormKind::Report, args, locale, config).await,
        Commands::Complaint(args) => submit(FormKind::Complaint, args, locale, config).await,
        Commands::Types => list_types(locale, config).await,
        Commands::Status { ticket } => status(&ticket, config).await,
        Commands::LocalePath { path, to } => {
            let to: Locale = to.parse()?;
            println!("{}", routes::switch_locale(&path, to));
            Ok(())
        }
    }
}

fn client_config(api_base: Option<String>, timeout_secs: Option<u64>) -> ClientConfig {
    let mut config = match api_base {
        Some(base) => ClientConfig::new(base),
        None => ClientConfig::from_env(),
    };
    if let Some(secs) = timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    config
}

/// Fill a session from the arguments and run the submission flow.
async fn submit(kind: FormKind, args: SubmitArgs, locale: Locale, config: ClientConfig) -> Result<()> {
    let mut session = match kind {
        FormKind::Report => FormSession::report(locale),
        FormKind::Complaint => FormSession::complaint(locale),
    };

    session.set_place_type(args.place_type.into());
    session.name = args.name.unwrap_or_default();
    session.phone = args.phone.unwrap_or_default();
    session.email = args.email.unwrap_or_default();
    session.address = args.address.unwrap_or_default();
    session.place = args.place.unwrap_or_default();
    session.office = args.office.unwrap_or_default();
    session.corruption_type_id = args.corruption_type.unwrap_or_default();
    session.description = args.description.unwrap_or_default();

    if let Some(date) = &args.date {
        let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("invalid date: {}", date))?;
        session.pick_date(parsed);
    }

    for path in &args.evidences {
        let bytes = std::fs::read(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("evidence")
            .to_string();
        let content_type = content_type_for(&file_name);
        session.add_evidence(vec![EvidenceFile::new(file_name, content_type, bytes)]);
    }

    let messages = session.catalog();
    if !session.evidence().is_empty() {
        println!("Attached files:");
        for staged in session.evidence().iter() {
            let badge = staged
                .kind
                .badge_key()
                .map(|key| messages.text(key))
                .unwrap_or("IMG");
            println!("  [{}] {}", badge, staged.file.file_name);
        }
    }
    tracing::debug!(
        session = %session.id(),
        files = session.evidence().len(),
        "prepared submission"
    );

    let api = Arc::new(ApiClient::new(config)?);
    let gateway = Arc::new(HttpSubmissionGateway::new(api));
    let submitter = Submitter::new(gateway);
    let dialog = TicketDialog::new();

    dialog.open_for_upload();
    let watcher = spawn_progress_watcher(dialog.clone(), messages);

    let result = submitter
        .submit(session.payload(), &session.schema_messages(), &dialog)
        .await;
    let _ = watcher.await;

    match result {
        Ok(ticket) => {
            println!();
            println!("{}", messages.text("dialog.successTitle"));
            println!("{}", messages.text("dialog.successDescription"));
            println!("  {}: {}", messages.text("dialog.ticketLabel"), ticket);
            println!(
                "  {}: {}",
                messages.text("dialog.checkStatus"),
                routes::localized(locale, &ticket.status_path())
            );
            dialog.request_close(CloseRequest::CloseButton);
            session.reset();
            Ok(())
        }
        Err(e) => {
            let toast = e.toast(messages);
            eprintln!("{}: {}", toast.title, toast.body);
            bail!("submission was not accepted")
        }
    }
}

/// Echo upload progress while the dialog shows it.
fn spawn_progress_watcher(
    dialog: TicketDialog,
    messages: &'static MessageCatalog,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut last = None;
        loop {
            match dialog.view() {
                DialogView::Progress { percent } => {
                    if percent > 0 && last != Some(percent) {
                        let line = messages
                            .render("dialog.uploading", &serde_json::json!({ "percent": percent }))
                            .unwrap_or_else(|_| format!("{}%", percent));
                        print!("\r{}", line);
                        let _ = std::io::stdout().flush();
                        last = Some(percent);
                    }
                }
                _ => break,
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    })
}

async fn list_types(locale: Locale, config: ClientConfig) -> Result<()> {
    let messages = catalog(locale);
    println!("{}", messages.text("lookup.loading"));

    let api = Arc::new(ApiClient::new(config)?);
    let lookup = CorruptionTypeLookup::over_api(api);

    match lookup.get(locale).await {
        Ok(types) => {
            for corruption_type in types.iter() {
                println!("{:>4}  {}", corruption_type.id, corruption_type.name);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", messages.text("lookup.error"));
            Err(e.into())
        }
    }
}

async fn status(ticket: &str, config: ClientConfig) -> Result<()> {
    let api = ApiClient::new(config)?;
    let report: serde_json::Value = api
        .resource::<serde_json::Value>(REPORTS_ENDPOINT)
        .get_by_id(ticket)
        .await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
