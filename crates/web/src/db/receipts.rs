//! Payment receipt repository (the entitlement store).

use sqlx::PgPool;

use elite_tips_core::Email;

use super::RepositoryError;
use crate::models::PaymentReceipt;

/// Repository for payment receipts.
///
/// One row per paying email. "Has paid" is row existence, nothing more.
pub struct ReceiptRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReceiptRepository<'a> {
    /// Create a new receipt repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Whether a receipt exists for this email.
    ///
    /// This is the entitlement check.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, email: &Email) -> Result<bool, RepositoryError> {
        let present = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (SELECT 1 FROM payment_receipts WHERE email = $1)
            ",
        )
        .bind(email)
        .fetch_one(self.pool)
        .await?;

        Ok(present)
    }

    /// Write a receipt, fully replacing any previous one for the same
    /// email (last write wins, not a merge).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn upsert(&self, receipt: &PaymentReceipt) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO payment_receipts (email, reference, amount_kes, paid_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE
            SET reference = EXCLUDED.reference,
                amount_kes = EXCLUDED.amount_kes,
                paid_at = EXCLUDED.paid_at
            ",
        )
        .bind(&receipt.email)
        .bind(&receipt.reference)
        .bind(receipt.amount_kes)
        .bind(receipt.paid_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// The payment history projection: the latest receipt of every payer,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<PaymentReceipt>, RepositoryError> {
        let rows = sqlx::query_as::<_, PaymentReceipt>(
            r"
            SELECT email, reference, amount_kes, paid_at
            FROM payment_receipts
            ORDER BY paid_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
