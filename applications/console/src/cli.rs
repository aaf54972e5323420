//! Command-line interface definition.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kft")]
#[command(about = "Operator console for the KFT admin and merchant portals", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file path (defaults to ./kft.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, overriding configuration and environment
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory holding the session file
    #[arg(long, global = true)]
    pub session_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Admin portal
    #[command(subcommand)]
    Admin(AdminCommand),

    /// Merchant portal
    #[command(subcommand)]
    Merchant(MerchantCommand),

    /// Password reset for either portal
    #[command(subcommand)]
    Password(PasswordCommand),
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Log in as an administrator
    Login(Credentials),
    /// Drop the stored admin session
    Logout,
    /// Show the logged-in administrator
    Whoami,
    /// List all users
    Users,
    /// Delete a user account
    DeleteUser {
        /// User ID
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum MerchantCommand {
    /// Register a merchant account; an OTP is emailed
    Signup {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "KFT_PASSWORD", hide_env_values = true)]
        password: String,
        /// Defaults to the email address
        #[arg(short, long)]
        username: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
    /// Complete signup with the emailed code
    VerifyOtp {
        /// Code from the signup email
        #[arg(long)]
        code: String,
        /// Defaults to the email used at signup
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Log in as a merchant
    Login(Credentials),
    /// Drop the stored merchant session
    Logout,
    /// Show the logged-in merchant
    Whoami,
    /// Balance and products
    Dashboard,
    /// List your products
    Products,
    /// Show one product
    Product {
        /// Product ID
        id: i64,
    },
    /// Add a product
    AddProduct {
        #[arg(short, long)]
        name: String,
        /// Decimal price, e.g. 12.50
        #[arg(long)]
        price: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Edit a product; omitted fields keep their current value
    UpdateProduct {
        /// Product ID
        id: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a product
    DeleteProduct {
        /// Product ID
        id: i64,
    },
    /// Transaction history
    Transactions,
    /// Profile and balance
    Profile,
    /// Change the logged-in merchant's password
    ChangePassword {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PasswordCommand {
    /// Email a password reset code
    Forgot {
        #[arg(long, value_enum, default_value_t = Portal::Merchant)]
        portal: Portal,
        #[arg(short, long)]
        email: String,
    },
    /// Exchange the emailed code for a reset token
    VerifyOtp {
        #[arg(long, value_enum, default_value_t = Portal::Merchant)]
        portal: Portal,
        #[arg(short, long)]
        email: String,
        #[arg(long)]
        code: String,
    },
    /// Set a new password with a reset token
    Reset {
        #[arg(long, value_enum, default_value_t = Portal::Merchant)]
        portal: Portal,
        /// Token printed by `kft password verify-otp`
        #[arg(long)]
        token: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

impl PasswordCommand {
    pub fn portal(&self) -> Portal {
        match self {
            PasswordCommand::Forgot { portal, .. }
            | PasswordCommand::VerifyOtp { portal, .. }
            | PasswordCommand::Reset { portal, .. } => *portal,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct Credentials {
    #[arg(short, long)]
    pub username: String,
    #[arg(short, long, env = "KFT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Portal {
    Admin,
    Merchant,
}
