// Command line entry point.
//
// This file's job is to:
// 1. Load configuration (.env, environment, flags)
// 2. Obtain a credential (cache or interactive OAuth flow)
// 3. Run a short demo against one spreadsheet or presentation

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use gsuite_bridge::infra::logging::init_logging;
use gsuite_bridge::{
    acquire_credential, load_cached_credential, object_to_string, with_document, AccessMode,
    Credential, CredentialKind, CredentialOptions, ElementOptions, ScopeType, SheetsApi,
    SlidesApi,
};

const LOGO_URL: &str =
    "http://www.google.com/images/branding/googlelogo/1x/googlelogo_color_272x92dp.png";

#[derive(Parser, Debug)]
#[command(name = "gsuite_bridge", version, about = "Edit Google Sheets and Slides documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append and overwrite a small grid of values in a spreadsheet.
    Sheets {
        #[arg(long)]
        sheet_id: String,
        #[command(flatten)]
        auth: AuthArgs,
    },
    /// Add a text box and an image to the first slide of a presentation.
    Slides {
        #[arg(long)]
        presentation_id: String,
        #[command(flatten)]
        auth: AuthArgs,
    },
}

#[derive(Args, Debug)]
struct AuthArgs {
    /// Client secrets JSON downloaded from the Cloud console.
    #[arg(long)]
    credential: PathBuf,

    /// `read` or `edit`.
    #[arg(long, default_value = "edit")]
    scope: AccessMode,

    /// Try the token cache before running the OAuth flow.
    #[arg(long)]
    use_cache: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging("info");

    let cli = Cli::parse();

    match cli.command {
        Command::Sheets { sheet_id, auth } => {
            let credential = credential_or_exit(&auth, ScopeType::for_sheets(auth.scope)).await;
            run_sheets(&credential, sheet_id).await?;
        }
        Command::Slides {
            presentation_id,
            auth,
        } => {
            let credential =
                credential_or_exit(&auth, ScopeType::for_presentation(auth.scope)).await;
            run_slides(&credential, presentation_id).await?;
        }
    }

    Ok(())
}

/// Any credential failure ends the process with status 1.
async fn credential_or_exit(auth: &AuthArgs, scope: ScopeType) -> Credential {
    let options = CredentialOptions::from_env();
    tracing::debug!("Credential options: {}", object_to_string(&options, None, false));

    if auth.use_cache {
        match load_cached_credential(&options.token_cache_path, scope).await {
            Ok(credential) => return credential,
            Err(e) => tracing::warn!("Token cache unusable, falling back to OAuth: {}", e),
        }
    }

    match acquire_credential(&auth.credential, CredentialKind::OAuth, scope, &options).await {
        Ok(credential) => credential,
        Err(e) => {
            tracing::error!("Could not obtain a credential: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run_sheets(credential: &Credential, sheet_id: String) -> Result<()> {
    let api = SheetsApi::open(credential, sheet_id)?;

    let appended = to_rows(&[["1", "2"], ["[3, 4]", "(5, 6)"], ["G", "H"]]);
    let overwritten = to_rows(&[["F", "B"], ["C", "D"]]);

    let (ok_append, ok_overwrite) = with_document(api, move |api| {
        Box::pin(async move {
            let a = api.append_values(&appended, "A1:C3", None, None).await;
            let o = api.overwrite_values(&overwritten, "A1:C2", None, None).await;
            (a, o)
        })
    })
    .await;

    tracing::info!("append: {}, overwrite: {}", ok_append, ok_overwrite);
    Ok(())
}

async fn run_slides(credential: &Credential, presentation_id: String) -> Result<()> {
    let api = SlidesApi::open(credential, presentation_id)?;

    let (ok_text, ok_image) = with_document(api, |api| {
        Box::pin(async move {
            let t = api.add_text("Hello world!", ElementOptions::default()).await;
            let i = api.add_image(LOGO_URL, ElementOptions::default()).await;
            (t, i)
        })
    })
    .await;

    tracing::info!("text: {}, image: {}", ok_text, ok_image);
    Ok(())
}

fn to_rows<const N: usize>(rows: &[[&str; N]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}
