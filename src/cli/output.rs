//! CLI output formatting utilities

use colored::Colorize;

use crate::auth::Claims;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Print the decoded contents of a token
pub fn print_claims(claims: &Claims) {
    let format_ts = |ts: i64| {
        chrono::DateTime::from_timestamp(ts, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| ts.to_string())
    };

    println!("  {:<8} {}", "id".cyan(), claims.id);
    println!("  {:<8} {}", "email".cyan(), claims.email);
    println!("  {:<8} {}", "issued".cyan(), format_ts(claims.iat));
    println!("  {:<8} {}", "expires".cyan(), format_ts(claims.exp));
}
