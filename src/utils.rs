use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

pub fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTime::new(format_description!(
            "[hour]:[minute]:[second].[subsecond digits:3]"
        )))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Groups digits in threes with commas, e.g. `1234567` -> `1,234,567`.
pub fn format_number(num: u64) -> String {
    let digits = num.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

/// Masks a credential for diagnostics, keeping only its first four characters.
pub fn redact_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if visible.chars().count() == secret.chars().count() {
        return "*".repeat(secret.chars().count());
    }
    format!("{}{}", visible, "*".repeat(8))
}
