//! Plain-text renderers for command output.

use kft_client::{format_amount, AdminUser, MerchantProfile, Product, Transaction, UserRecord};
use std::io::{self, Write};

pub(crate) fn render_users(
    out: &mut impl Write,
    users: &[AdminUser],
    current_user_id: Option<i64>,
) -> io::Result<()> {
    if users.is_empty() {
        return writeln!(out, "No users found.");
    }
    writeln!(out, "{:>6} {:<24} {:<32} ROLE(S)", "ID", "USERNAME", "EMAIL")?;
    for user in users {
        let marker = if current_user_id == Some(user.id) {
            " (you)"
        } else {
            ""
        };
        writeln!(
            out,
            "{:>6} {:<24} {:<32} {}{}",
            user.id,
            user.username,
            user.email,
            user.role_label(),
            marker
        )?;
    }
    Ok(())
}

pub(crate) fn render_products(out: &mut impl Write, products: &[Product]) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "No products found. Add your first product!");
    }
    writeln!(out, "{:>6} {:<24} {:>12} DESCRIPTION", "ID", "NAME", "PRICE")?;
    for product in products {
        writeln!(
            out,
            "{:>6} {:<24} {:>12} {}",
            product.id,
            product.name,
            format_amount(&product.price),
            product.description
        )?;
    }
    Ok(())
}

pub(crate) fn render_product(out: &mut impl Write, product: &Product) -> io::Result<()> {
    writeln!(out, "id: {}", product.id)?;
    writeln!(out, "name: {}", product.name)?;
    writeln!(out, "price: {}", format_amount(&product.price))?;
    if !product.description.is_empty() {
        writeln!(out, "description: {}", product.description)?;
    }
    if let Some(owner) = &product.owner_username {
        writeln!(out, "owner: {owner}")?;
    }
    if let Some(created) = &product.created_at {
        writeln!(out, "created: {created}")?;
    }
    if let Some(updated) = &product.updated_at {
        writeln!(out, "updated: {updated}")?;
    }
    Ok(())
}

pub(crate) fn render_transactions(
    out: &mut impl Write,
    transactions: &[Transaction],
) -> io::Result<()> {
    if transactions.is_empty() {
        return writeln!(out, "No transactions found.");
    }
    writeln!(out, "{:<20} {:<16} {:>12}", "DATE", "TYPE", "AMOUNT")?;
    for tx in transactions {
        let sign = if tx.is_debit() && !tx.amount.trim_start().starts_with('-') {
            "-"
        } else {
            ""
        };
        writeln!(
            out,
            "{:<20} {:<16} {:>12}",
            tx.created_at_display(),
            tx.transaction_type,
            format!("{}{}", sign, format_amount(&tx.amount))
        )?;
    }
    Ok(())
}

pub(crate) fn render_user(out: &mut impl Write, user: &UserRecord) -> io::Result<()> {
    writeln!(out, "id: {}", user.id)?;
    writeln!(out, "username: {}", user.username)?;
    if !user.email.is_empty() {
        writeln!(out, "email: {}", user.email)?;
    }
    let name = [user.first_name.as_deref(), user.last_name.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if !name.is_empty() {
        writeln!(out, "name: {name}")?;
    }
    if let Some(role) = &user.role {
        writeln!(out, "role: {role}")?;
    }
    Ok(())
}

pub(crate) fn render_admin(out: &mut impl Write, user: &AdminUser) -> io::Result<()> {
    writeln!(out, "id: {}", user.id)?;
    writeln!(out, "username: {}", user.username)?;
    if !user.email.is_empty() {
        writeln!(out, "email: {}", user.email)?;
    }
    writeln!(out, "role: {}", user.role_label())
}

pub(crate) fn render_profile(out: &mut impl Write, profile: &MerchantProfile) -> io::Result<()> {
    render_user(out, &profile.user)?;
    writeln!(out, "balance: {}", format_amount(&profile.balance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, price: &str) -> Product {
        Product {
            id,
            name: name.into(),
            description: String::new(),
            price: price.into(),
            owner: None,
            owner_username: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(
            render(|out| render_products(out, &[])),
            "No products found. Add your first product!\n"
        );
        assert_eq!(render(|out| render_transactions(out, &[])), "No transactions found.\n");
    }

    #[test]
    fn test_products_table_formats_prices() {
        let text = render(|out| render_products(out, &[product(1, "Tea", "4.5")]));
        let mut lines = text.lines();
        assert!(lines.next().unwrap().contains("PRICE"));
        let row = lines.next().unwrap();
        assert!(row.contains("Tea"));
        assert!(row.contains("4.50"));
    }

    #[test]
    fn test_debit_shown_negative() {
        let fee = Transaction {
            id: 1,
            amount: "2".into(),
            transaction_type: "fee".into(),
            created_at: "2024-05-01T12:00:00Z".into(),
        };
        let text = render(|out| render_transactions(out, &[fee]));
        assert!(text.contains("2024-05-01 12:00 UTC"));
        assert!(text.contains("-2.00"));
    }
}
