//! Session commands: sign in, sign out, and inspect the stored session.

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use eduadmin_lib::{Client, Session, SessionStore};

use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct LoginArgs {
    /// Admin account name
    #[arg(long)]
    pub username: String,

    /// Password; prompted interactively when omitted
    #[arg(long)]
    pub password: Option<String>,
}

pub async fn login(args: &LoginArgs, client: &Arc<Client>, store: &SessionStore) -> Result<()> {
    let password = match &args.password {
        Some(given) => given.clone(),
        None => rpassword::prompt_password("Password: ")?,
    };
    if password.is_empty() {
        bail!("password must not be empty");
    }

    let resp = client.login(&args.username, &password).await?;
    let session = Session {
        token: resp.token,
        user: resp.user,
    };
    store.save(&session)?;
    eprintln!(
        "Signed in as {} ({}). Session stored in {}.",
        session.user.username,
        session.user.role,
        store.path().display()
    );
    Ok(())
}

pub fn logout(store: &SessionStore) -> Result<()> {
    store.clear()?;
    eprintln!("Session cleared.");
    Ok(())
}

pub async fn whoami(
    client: &Arc<Client>,
    store: &SessionStore,
    format: &OutputFormat,
) -> Result<()> {
    if store.load()?.is_none() {
        bail!("not signed in. Run `eduadmin login` first");
    }
    match client.validate_session().await? {
        Some(user) => {
            match format {
                OutputFormat::Json => print_json(&user),
                _ => println!("{} ({})", user.username, user.role),
            }
            Ok(())
        }
        None => bail!("the backend did not recognize the stored session"),
    }
}
