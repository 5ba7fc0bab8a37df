use std::io;

use clap::Args;
use eventiverse::{
    context::AppContext,
    session::{Credentials, ProfileUpdate, Registration},
};

use crate::cli::{CliError, render};

#[derive(Debug, Args)]
pub(crate) struct SignInArgs {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "EVENTIVERSE_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
pub(crate) struct SignUpArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "EVENTIVERSE_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
pub(crate) struct ProfileArgs {
    /// New display name
    #[arg(long)]
    name: Option<String>,

    /// New contact email
    #[arg(long)]
    email: Option<String>,

    /// New avatar image URL
    #[arg(long)]
    avatar: Option<String>,
}

pub(crate) fn sign_in(
    args: SignInArgs,
    app: &mut AppContext,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let user = app.sign_in(&Credentials::new(args.email, args.password))?;

    render::user(out, &user)
}

pub(crate) fn sign_up(
    args: SignUpArgs,
    app: &mut AppContext,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let user = app.sign_up(&Registration::new(args.name, args.email, args.password))?;

    render::user(out, &user)
}

pub(crate) fn whoami(app: &AppContext, out: &mut impl io::Write) -> Result<(), CliError> {
    match app.session().user() {
        Some(user) if app.session().is_authenticated() => render::user(out, user),
        _ => {
            writeln!(out, "not signed in")?;

            Ok(())
        }
    }
}

pub(crate) fn update_profile(
    args: ProfileArgs,
    app: &mut AppContext,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let update = ProfileUpdate {
        name: args.name,
        email: args.email,
        avatar: args.avatar,
    };

    if update.is_empty() {
        return Err(CliError::EmptyProfileUpdate);
    }

    let user = app.update_profile(update)?;

    render::user(out, &user)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eventiverse::notifier::MockNotifier;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn profile_without_fields_is_refused() -> TestResult {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let mut app = AppContext::in_memory(Arc::new(notifier))?;
        let mut out = Vec::new();

        let args = ProfileArgs {
            name: None,
            email: None,
            avatar: None,
        };

        let result = update_profile(args, &mut app, &mut out);

        assert!(
            matches!(result, Err(CliError::EmptyProfileUpdate)),
            "got {result:?}"
        );
        assert!(out.is_empty());

        Ok(())
    }
}
