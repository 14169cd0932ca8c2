mod receipt;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use epri_registration::{init_logging, AppConfig, RegistrationApp};
use reg_core::{RecordStore, SubmissionRecord, Wizard, WizardError};
use reg_domain::fields::*;
use reg_domain::{payment_choices, Locale, PaymentMethod};
use reg_persistence::{open_stores, JsonFileRecordStore, JsonlEventStore};

const EXIT_SETUP: i32 = 1;
const EXIT_REJECTED: i32 = 2;
const EXIT_SUBMISSION: i32 = 3;
const EXIT_NOT_FOUND: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Inscripción a la conferencia desde la línea de comandos.
#[derive(Parser)]
#[command(name = "reg", version, about = "Conference registration wizard")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Language for labels (en or ar)
    #[arg(long, global = true, default_value = "en")]
    locale: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the three steps and submit the registration
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        organization: String,
        #[arg(long)]
        job_title: String,
        /// bank, cash or online
        #[arg(long)]
        payment: String,
        /// Payment receipt (jpeg, png or pdf, up to 10 MiB)
        #[arg(long)]
        receipt: PathBuf,
    },

    /// Show a stored registration by ticket
    Show { ticket: String },

    /// List stored registrations
    List,

    /// List payment methods and their instructions
    PaymentMethods,
}

fn fail(code: i32, message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    process::exit(code);
}

fn print_rejection(wizard: &Wizard<JsonlEventStore>, err: &WizardError) {
    eprintln!("step {} rejected: {err}", wizard.current_step());
    for issue in err.issues() {
        eprintln!("  {}: {}", issue.field, issue.message);
    }
}

fn print_record(record: &SubmissionRecord, output: OutputFormat) {
    match output {
        OutputFormat::Json => match serde_json::to_string_pretty(record) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(EXIT_SETUP, e),
        },
        OutputFormat::Text => {
            println!("{}  {:?}  attempts={}  {}",
                     record.ticket().unwrap_or("-"),
                     record.status,
                     record.attempts,
                     record.fields.text(FULL_NAME).unwrap_or_default());
        }
    }
}

fn open(config: &AppConfig) -> (JsonFileRecordStore, JsonlEventStore) {
    open_stores(&config.store_config()).unwrap_or_else(|e| fail(EXIT_SETUP, e))
}

async fn register(config: &AppConfig,
                  locale: Locale,
                  output: OutputFormat,
                  personal: [(&str, String); 5],
                  payment: &str,
                  receipt: &std::path::Path) {
    let (records, events) = open(config);
    let mut app = RegistrationApp::new(config, locale, records).unwrap_or_else(|e| fail(EXIT_SETUP, e));
    let mut wizard = app.start_with(events);

    let steps = |wizard: &mut Wizard<JsonlEventStore>| -> Result<(), WizardError> {
        for (field, value) in &personal {
            wizard.set_field(field, value.as_str())?;
        }
        wizard.next()?;
        wizard.select_option(PAYMENT_METHOD, payment)?;
        wizard.next()?;
        Ok(())
    };
    if let Err(e) = steps(&mut wizard) {
        print_rejection(&wizard, &e);
        process::exit(EXIT_REJECTED);
    }

    let attachment = receipt::attachment_from_path(receipt).unwrap_or_else(|e| {
                                                               fail(EXIT_SETUP, format!("{}: {e}", receipt.display()))
                                                           });
    if let Err(e) = wizard.set_field(RECEIPT, attachment) {
        print_rejection(&wizard, &e);
        process::exit(EXIT_REJECTED);
    }

    match app.submit(&mut wizard).await {
        Ok(record) => print_record(&record, output),
        Err(e @ WizardError::Validation { .. }) => {
            print_rejection(&wizard, &e);
            process::exit(EXIT_REJECTED);
        }
        Err(e) => fail(EXIT_SUBMISSION, format!("{e} (your answers were kept; run the command again to retry)")),
    }
}

fn payment_methods(config: &AppConfig, locale: Locale, output: OutputFormat) {
    let context = config.event_context().unwrap_or_else(|e| fail(EXIT_SETUP, e));
    match output {
        OutputFormat::Json => match serde_json::to_string_pretty(&payment_choices(locale)) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(EXIT_SETUP, e),
        },
        OutputFormat::Text => {
            for method in PaymentMethod::ALL {
                let state = if method.is_available() { "" } else { " (unavailable)" };
                println!("{:<8} {}{state}", method.key(), method.label().resolve(locale));
                for line in method.instructions(&context) {
                    println!("         {}: {}", line.label.resolve(locale), line.value);
                }
            }
        }
    }
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();
    let locale: Locale = cli.locale.parse().unwrap_or_else(|e| fail(EXIT_SETUP, e));
    let config = AppConfig::from_env().unwrap_or_else(|e| fail(EXIT_SETUP, e));

    match cli.command {
        Commands::Register { name,
                             email,
                             phone,
                             organization,
                             job_title,
                             payment,
                             receipt } => {
            let personal = [(FULL_NAME, name),
                            (EMAIL, email),
                            (PHONE, phone),
                            (ORGANIZATION, organization),
                            (JOB_TITLE, job_title)];
            register(&config, locale, cli.output, personal, &payment, &receipt).await;
        }
        Commands::Show { ticket } => {
            let (records, _) = open(&config);
            match records.find_by_ticket(&ticket) {
                Ok(Some(record)) => print_record(&record, cli.output),
                Ok(None) => fail(EXIT_NOT_FOUND, format!("no registration with ticket {ticket}")),
                Err(e) => fail(EXIT_SETUP, e),
            }
        }
        Commands::List => {
            let (records, _) = open(&config);
            let all = records.list().unwrap_or_else(|e| fail(EXIT_SETUP, e));
            for record in &all {
                print_record(record, cli.output);
            }
            log::info!("{} registration(s) in {}", all.len(), records.dir().display());
        }
        Commands::PaymentMethods => payment_methods(&config, locale, cli.output),
    }
}
