use super::{guarded, require_session};
use crate::cli::{Credentials, MerchantCommand};
use crate::error::{ConsoleError, Result};
use crate::output;
use kft_client::{format_amount, MerchantClient, ProductInput, SignupRequest};
use std::io::Write;

pub(super) async fn run(
    client: &MerchantClient,
    cmd: MerchantCommand,
    out: &mut impl Write,
) -> Result<()> {
    match cmd {
        MerchantCommand::Signup {
            email,
            password,
            username,
            first_name,
            last_name,
        } => {
            let request = SignupRequest {
                username: username.unwrap_or_else(|| email.clone()),
                email,
                password,
                first_name,
                last_name,
            };
            signup(client, &request, out).await
        }
        MerchantCommand::VerifyOtp { code, email } => verify_otp(client, email, &code, out).await,
        MerchantCommand::Login(credentials) => login(client, &credentials, out).await,
        MerchantCommand::Logout => {
            client.logout();
            writeln!(out, "Logged out.")?;
            Ok(())
        }
        MerchantCommand::Whoami => {
            require_session(client)?;
            if let Some(user) = client.user() {
                output::render_user(out, &user)?;
            }
            Ok(())
        }
        MerchantCommand::Dashboard => guarded(client, dashboard(client, out)).await,
        MerchantCommand::Products => guarded(client, products(client, out)).await,
        MerchantCommand::Product { id } => guarded(client, product(client, id, out)).await,
        MerchantCommand::AddProduct {
            name,
            price,
            description,
        } => guarded(client, add_product(client, name, price, description, out)).await,
        MerchantCommand::UpdateProduct {
            id,
            name,
            price,
            description,
        } => {
            let changes = ProductChanges {
                name,
                price,
                description,
            };
            guarded(client, update_product(client, id, changes, out)).await
        }
        MerchantCommand::DeleteProduct { id } => {
            guarded(client, delete_product(client, id, out)).await
        }
        MerchantCommand::Transactions => guarded(client, transactions(client, out)).await,
        MerchantCommand::Profile => guarded(client, profile(client, out)).await,
        MerchantCommand::ChangePassword { old, new, confirm } => {
            guarded(client, change_password(client, &old, &new, &confirm, out)).await
        }
    }
}

/// Fields to change on an existing product; `None` keeps the current value.
struct ProductChanges {
    name: Option<String>,
    price: Option<String>,
    description: Option<String>,
}

async fn dashboard(client: &MerchantClient, out: &mut impl Write) -> Result<()> {
    let products = client.list_products().await?;
    let profile = client.profile().await?;
    writeln!(out, "Balance: {}", format_amount(&profile.balance))?;
    writeln!(out)?;
    output::render_products(out, &products)?;
    Ok(())
}

async fn products(client: &MerchantClient, out: &mut impl Write) -> Result<()> {
    let products = client.list_products().await?;
    output::render_products(out, &products)?;
    Ok(())
}

async fn product(client: &MerchantClient, id: i64, out: &mut impl Write) -> Result<()> {
    let product = client.get_product(id).await?;
    output::render_product(out, &product)?;
    Ok(())
}

async fn add_product(
    client: &MerchantClient,
    name: String,
    price: String,
    description: String,
    out: &mut impl Write,
) -> Result<()> {
    let input = ProductInput {
        name,
        description,
        price: validated_price(price)?,
    };
    let product = client.create_product(&input).await?;
    writeln!(out, "Product {} created.", product.id)?;
    Ok(())
}

async fn update_product(
    client: &MerchantClient,
    id: i64,
    changes: ProductChanges,
    out: &mut impl Write,
) -> Result<()> {
    let current = client.get_product(id).await?;
    let mut input = ProductInput::from(&current);
    if let Some(name) = changes.name {
        input.name = name;
    }
    if let Some(description) = changes.description {
        input.description = description;
    }
    if let Some(price) = changes.price {
        input.price = validated_price(price)?;
    }
    let product = client.update_product(id, &input).await?;
    writeln!(out, "Product {} updated.", product.id)?;
    Ok(())
}

async fn delete_product(client: &MerchantClient, id: i64, out: &mut impl Write) -> Result<()> {
    client.delete_product(id).await?;
    writeln!(out, "Product {id} deleted.")?;
    Ok(())
}

async fn transactions(client: &MerchantClient, out: &mut impl Write) -> Result<()> {
    let transactions = client.list_transactions().await?;
    output::render_transactions(out, &transactions)?;
    Ok(())
}

async fn profile(client: &MerchantClient, out: &mut impl Write) -> Result<()> {
    let profile = client.profile().await?;
    output::render_profile(out, &profile)?;
    Ok(())
}

async fn change_password(
    client: &MerchantClient,
    old: &str,
    new: &str,
    confirm: &str,
    out: &mut impl Write,
) -> Result<()> {
    let response = client.change_password(old, new, confirm).await?;
    let message = response
        .message
        .unwrap_or_else(|| "Password changed.".to_string());
    writeln!(out, "{message}")?;
    Ok(())
}

async fn signup(client: &MerchantClient, request: &SignupRequest, out: &mut impl Write) -> Result<()> {
    let response = client.signup(request).await?;
    let message = response
        .message
        .unwrap_or_else(|| "Signup successful. Check your email for the OTP.".to_string());
    writeln!(out, "{message}")?;
    writeln!(out, "Run `kft merchant verify-otp --code <CODE>` to finish.")?;
    Ok(())
}

async fn verify_otp(
    client: &MerchantClient,
    email: Option<String>,
    code: &str,
    out: &mut impl Write,
) -> Result<()> {
    let email = email
        .filter(|e| !e.is_empty())
        .or_else(|| client.pending_signup_email())
        .ok_or(ConsoleError::MissingSignupEmail)?;

    let response = client.verify_otp(&email, code).await?;
    client.clear_signup_email();

    let message = response
        .message
        .unwrap_or_else(|| "OTP Verified! Account created and logged in.".to_string());
    writeln!(out, "{message}")?;
    Ok(())
}

async fn login(client: &MerchantClient, credentials: &Credentials, out: &mut impl Write) -> Result<()> {
    let response = client
        .login(&credentials.username, &credentials.password)
        .await?;

    match response.session() {
        Some((_, _, user)) => writeln!(out, "Logged in as {}.", user.username)?,
        None => {
            let note = response
                .message
                .or(response.detail)
                .unwrap_or_else(|| "Login response carried no session.".to_string());
            writeln!(out, "{note}")?;
        }
    }
    Ok(())
}

/// Prices stay decimal strings; only check that one parses.
fn validated_price(price: String) -> Result<String> {
    let trimmed = price.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(trimmed.to_string()),
        _ => Err(ConsoleError::InvalidInput(format!(
            "price must be a non-negative decimal, got {:?}",
            price
        ))),
    }
}
