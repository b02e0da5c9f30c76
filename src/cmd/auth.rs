//! Account commands: `taskboard login | signup | logout | whoami`.

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, Password};
use taskboard::ui::icons::{CHECK, USER};
use taskboard::ui::with_spinner;
use taskboard::validation::{FieldError, Strength, validate_login, validate_signup};
use taskboard_common::Identity;

use super::app::App;

fn prompt_text(prompt: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("Failed to read {}", prompt.to_lowercase())),
    }
}

fn prompt_password(value: Option<String>) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .context("Failed to read password"),
    }
}

fn report_field_errors(errors: &[FieldError]) -> Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    for err in errors {
        eprintln!("  {} {}", style("-").red(), err);
    }
    anyhow::bail!("Please fix the fields above")
}

pub async fn cmd_login(
    app: &mut App,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = prompt_text("Email", email)?;
    let password = prompt_password(password)?;
    report_field_errors(&validate_login(&email, &password))?;

    let resp = with_spinner("Signing in...", app.api.login(&email, &password))
        .await
        .context("Login failed")?;

    let identity = Identity {
        email: Some(email),
        username: None,
    };
    let route = app
        .session
        .login(&resp.access_token, identity)
        .context("Failed to save session")?
        .clone();
    println!(
        "{}Logged in as {} ({})",
        CHECK,
        style(app.session.user().and_then(|u| u.display_name()).unwrap_or("?")).bold(),
        route
    );
    Ok(())
}

pub async fn cmd_signup(
    app: &mut App,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let name = prompt_text("Name", name)?;
    let email = prompt_text("Email", email)?;
    let password = prompt_password(password)?;

    let strength = Strength::of(&password);
    println!("Password strength: {} ({}/5)", strength.label(), strength.score());
    report_field_errors(&validate_signup(&name, &email, &password))?;

    with_spinner(
        "Creating account...",
        app.api.signup(name.trim(), &email, &password),
    )
    .await
    .context("Signup failed")?;

    println!("{}Account created for {}", CHECK, style(&email).bold());
    println!("Run `taskboard login` to sign in.");
    Ok(())
}

pub fn cmd_logout(app: &mut App) -> Result<()> {
    let route = app.session.logout().context("Failed to clear session")?;
    println!("Logged out ({})", route);
    Ok(())
}

pub fn cmd_whoami(app: &App) -> Result<()> {
    match app.session.user() {
        Some(user) => {
            println!(
                "{}{}",
                USER,
                style(user.display_name().unwrap_or("?")).bold()
            );
            if let (Some(email), Some(_)) = (&user.email, &user.username) {
                println!("  email: {}", email);
            }
            println!(
                "  session: {}",
                style(app.config.session_path.display()).dim()
            );
        }
        None => println!("Not logged in."),
    }
    Ok(())
}
