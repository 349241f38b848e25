use tally_domain::{Credentials, PasswordChange, Registration};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

const LOGIN_USAGE: &str = "login <username> [password]";
const REGISTER_USAGE: &str =
    "register <username> <password> <confirm-password> <full-name> <email> <village> [phone]";
const PASSWD_USAGE: &str = "passwd [<current> <new> <confirm>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("login", "Sign in to the budget service", LOGIN_USAGE, cmd_login),
        CommandEntry::new("register", "Create an account and sign in", REGISTER_USAGE, cmd_register),
        CommandEntry::new("logout", "Sign out and forget the saved token", "logout", cmd_logout),
        CommandEntry::new("passwd", "Change your password", PASSWD_USAGE, cmd_passwd).protected(),
    ]
}

/// Argument at `idx`, or a prompt for it when a terminal is attached.
fn arg_or_prompt(
    context: &ShellContext,
    args: &[&str],
    idx: usize,
    usage: &str,
    label: &str,
    secret: bool,
) -> Result<String, CommandError> {
    if let Some(value) = args.get(idx) {
        return Ok((*value).to_string());
    }
    context.require_interactive(usage)?;
    if secret {
        io::prompt_password(&context.theme, label)
    } else {
        io::prompt_text(&context.theme, label, None, false)
    }
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 2 {
        return Err(CommandError::InvalidArguments(format!("usage: {LOGIN_USAGE}")));
    }
    let username = arg_or_prompt(context, args, 0, LOGIN_USAGE, "Username", false)?;
    let password = arg_or_prompt(context, args, 1, LOGIN_USAGE, "Password", true)?;
    let credentials = Credentials::new(username.trim(), password);

    match context.session.login(&credentials) {
        Ok(()) => {}
        Err(err) if err.is_auth_failure() => {
            return Err(CommandError::Message("Invalid username or password.".into()));
        }
        Err(err) => return Err(err.into()),
    }

    io::print_success(format!("Signed in as {}.", credentials.username));
    load_dashboard(context);
    Ok(())
}

fn cmd_register(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (registration, confirm) = match args.len() {
        0 => {
            context.require_interactive(REGISTER_USAGE)?;
            prompt_registration(context)?
        }
        6 | 7 => (
            Registration {
                username: args[0].trim().to_string(),
                password: args[1].to_string(),
                full_name: args[3].trim().to_string(),
                email: args[4].trim().to_string(),
                village: args[5].trim().to_string(),
                phone_number: args.get(6).map(|p| p.trim().to_string()).unwrap_or_default(),
            },
            args[2].to_string(),
        ),
        _ => {
            return Err(CommandError::InvalidArguments(format!(
                "usage: {REGISTER_USAGE}"
            )))
        }
    };

    context.session.register(&registration, &confirm)?;
    io::print_success(format!(
        "Account created. Signed in as {}.",
        registration.username
    ));
    load_dashboard(context);
    Ok(())
}

fn prompt_registration(context: &ShellContext) -> Result<(Registration, String), CommandError> {
    let theme = &context.theme;
    let registration = Registration {
        username: io::prompt_text(theme, "Username", None, false)?,
        password: io::prompt_password(theme, "Password")?,
        ..Registration::default()
    };
    let confirm = io::prompt_password(theme, "Confirm password")?;
    let registration = Registration {
        full_name: io::prompt_text(theme, "Full name", None, false)?,
        email: io::prompt_text(theme, "Email", None, false)?,
        village: io::prompt_text(theme, "Village", None, false)?,
        phone_number: io::prompt_text(theme, "Phone (optional)", None, true)?,
        ..registration
    };
    Ok((registration, confirm))
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.session.is_signed_in() {
        io::print_info("Already signed out.");
        return Ok(());
    }
    context.session.logout()?;
    io::print_success("Signed out.");
    Ok(())
}

fn cmd_passwd(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !matches!(args.len(), 0 | 3) {
        return Err(CommandError::InvalidArguments(format!("usage: {PASSWD_USAGE}")));
    }
    let change = PasswordChange {
        current_password: arg_or_prompt(context, args, 0, PASSWD_USAGE, "Current password", true)?,
        new_password: arg_or_prompt(context, args, 1, PASSWD_USAGE, "New password", true)?,
        confirmation_password: arg_or_prompt(
            context,
            args,
            2,
            PASSWD_USAGE,
            "Confirm new password",
            true,
        )?,
    };

    let message = context.session.change_password(&change)?;
    io::print_success(message);
    Ok(())
}

/// Fetches the dashboard right after sign-in; failure here does not undo it.
fn load_dashboard(context: &mut ShellContext) {
    match context.session.refresh() {
        Ok(()) => {
            let count = context.session.dashboard().view().len();
            io::print_info(format!("Loaded {count} expense(s)."));
        }
        Err(err) => {
            io::print_warning(format!("Signed in, but the dashboard could not be loaded: {err}"));
        }
    }
}
