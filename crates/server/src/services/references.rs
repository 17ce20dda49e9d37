//! Human-readable reference numbers.
//!
//! Numbers are random, not sequential; the database's unique constraints
//! catch the rare collision and callers draw again.

use rand::Rng;

use crate::db::RepositoryError;

/// Draws attempted before giving up on a free number.
pub const MAX_ATTEMPTS: usize = 5;

/// `INV-2026-NNNN`.
pub fn invoice_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("INV-2026-{}", rng.random_range(1000..10_000))
}

/// `DEC-NNNNNN`.
pub fn declaration_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("DEC-{}", rng.random_range(100_000..1_000_000))
}

/// Run `insert` with freshly drawn numbers until one is not taken.
///
/// Only `RepositoryError::Conflict` triggers another draw; every other
/// outcome is returned as is.
///
/// # Errors
///
/// Returns the last `Conflict` after `MAX_ATTEMPTS` draws, or the first
/// non-conflict error from `insert`.
pub async fn insert_with_fresh_number<T, G, F, Fut>(
    mut generate: G,
    mut insert: F,
) -> Result<T, RepositoryError>
where
    G: FnMut() -> String,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, RepositoryError>>,
{
    let mut attempt = 1;
    loop {
        let number = generate();
        match insert(number.clone()).await {
            Err(RepositoryError::Conflict(reason)) if attempt < MAX_ATTEMPTS => {
                tracing::warn!(number = %number, attempt, reason = %reason, "Reference number taken, drawing again");
                attempt += 1;
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_retries_only_on_conflict() {
        let mut calls = 0;
        let result = insert_with_fresh_number(
            || "INV-2026-1000".to_string(),
            |number| {
                calls += 1;
                let outcome = if calls < 3 {
                    Err(RepositoryError::Conflict("invoice number already exists".into()))
                } else {
                    Ok(number)
                };
                async move { outcome }
            },
        )
        .await;

        assert_eq!(result.ok().as_deref(), Some("INV-2026-1000"));
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let mut calls = 0;
        let result: Result<(), _> = insert_with_fresh_number(
            || "DEC-100000".to_string(),
            |_| {
                calls += 1;
                async { Err(RepositoryError::Conflict("taken".into())) }
            },
        )
        .await;

        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
        assert_eq!(calls, MAX_ATTEMPTS);
    }

    #[tokio::test]
    async fn test_other_errors_are_not_retried() {
        let mut calls = 0;
        let result: Result<(), _> = insert_with_fresh_number(
            || "DEC-100000".to_string(),
            |_| {
                calls += 1;
                async { Err(RepositoryError::NotFound) }
            },
        )
        .await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_invoice_number_format() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let number = invoice_number(&mut rng);
            let digits = number.strip_prefix("INV-2026-").unwrap_or_default();
            assert_eq!(digits.len(), 4, "{number}");
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_declaration_number_format() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let number = declaration_number(&mut rng);
            let digits = number.strip_prefix("DEC-").unwrap_or_default();
            assert_eq!(digits.len(), 6, "{number}");
            assert!(!digits.starts_with('0'));
        }
    }
}
