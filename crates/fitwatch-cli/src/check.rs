//! `check-config` command handler.

use fitwatch_core::{load_watchlist, AppConfig};

/// Print the resolved configuration (secrets redacted) and watchlist sizes.
///
/// # Errors
///
/// Returns an error if the watchlist file cannot be loaded or is invalid.
pub(crate) fn check_config(config: &AppConfig) -> anyhow::Result<()> {
    let watchlist = load_watchlist(config.watchlist_path.as_deref())?;

    println!("{config:#?}");
    println!(
        "watchlist: {} keywords, {} competitors, channels: {}",
        watchlist.keywords().len(),
        watchlist.competitors().len(),
        watchlist.channels().join(", ")
    );
    if config.email.is_configured() {
        println!("email: enabled");
    } else {
        println!("email: disabled (EMAIL_FROM, EMAIL_PASSWORD and EMAIL_TO are all required)");
    }
    Ok(())
}
