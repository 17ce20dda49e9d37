//! Journey progress repository.
//!
//! One row per shipment. Saving a step is a single upsert so concurrent saves
//! for the same shipment can neither create a second row nor move
//! `current_step` backwards.

use serde_json::Value;
use sqlx::PgPool;

use smart_shipping_core::{JourneyProgress, JourneyStep, ShipmentId, UserId};

use super::RepositoryError;

/// Raw `journey_progress` row (only the columns the tracker reads).
#[derive(Debug, sqlx::FromRow)]
struct JourneyRow {
    current_step: i32,
    company_data: Value,
    documentation_data: Value,
    customs_data: Value,
    port_data: Value,
    sea_data: Value,
    import_data: Value,
}

impl From<JourneyRow> for JourneyProgress {
    fn from(row: JourneyRow) -> Self {
        let mut progress = Self::new();
        progress.current_step = row.current_step;
        let slots = [
            row.company_data,
            row.documentation_data,
            row.customs_data,
            row.port_data,
            row.sea_data,
            row.import_data,
        ];
        for (step, data) in JourneyStep::ALL.into_iter().zip(slots) {
            progress.step_data.set(step, data);
        }
        progress
    }
}

const RETURNING: &str = "RETURNING current_step, company_data, documentation_data, customs_data, port_data, sea_data, import_data";

/// Upsert statement for one step's slot. `column` always comes from
/// [`JourneyStep::column`], never from request input.
fn save_step_sql(column: &str) -> String {
    format!(
        r"
        INSERT INTO journey_progress (user_id, shipment_id, current_step, {column})
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (shipment_id) DO UPDATE SET
            {column} = EXCLUDED.{column},
            current_step = GREATEST(journey_progress.current_step, EXCLUDED.current_step),
            user_id = COALESCE(journey_progress.user_id, EXCLUDED.user_id),
            updated_at = NOW()
        {RETURNING}
        "
    )
}

/// Repository for journey progress.
pub struct JourneyRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> JourneyRepository<'a> {
    /// Create a new journey repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get progress for a shipment.
    ///
    /// A shipment without a row has not started: step 1 with empty slots.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, shipment_id: ShipmentId) -> Result<JourneyProgress, RepositoryError> {
        let row = sqlx::query_as::<_, JourneyRow>(
            r"
            SELECT current_step, company_data, documentation_data, customs_data,
                   port_data, sea_data, import_data
            FROM journey_progress
            WHERE shipment_id = $1
            ",
        )
        .bind(shipment_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map_or_else(JourneyProgress::new, JourneyProgress::from))
    }

    /// Replace one step's slot and advance `current_step` to at least
    /// `step + 1`. Returns the progress after the write.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the shipment (or user) does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn save_step(
        &self,
        user_id: Option<UserId>,
        shipment_id: ShipmentId,
        step: JourneyStep,
        data: &Value,
    ) -> Result<JourneyProgress, RepositoryError> {
        let sql = save_step_sql(step.column());

        let row = sqlx::query_as::<_, JourneyRow>(&sql)
            .bind(user_id)
            .bind(shipment_id)
            .bind(step.advances_to())
            .bind(data)
            .fetch_one(self.pool)
            .await
            .map_err(|e| RepositoryError::from_write(e, "journey"))?;

        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_save_sql_targets_only_the_step_column() {
        let sql = save_step_sql(JourneyStep::CustomsClearance.column());
        assert!(sql.contains("customs_data = EXCLUDED.customs_data"));
        assert!(!sql.contains("company_data ="));
        assert!(sql.contains("GREATEST(journey_progress.current_step"));
        assert!(sql.contains("ON CONFLICT (shipment_id)"));
    }

    #[test]
    fn test_row_maps_slots_in_step_order() {
        let row = JourneyRow {
            current_step: 3,
            company_data: json!({"input_company": "Acme"}),
            documentation_data: json!({"doc_gst": "gst.pdf"}),
            customs_data: json!({}),
            port_data: json!({}),
            sea_data: json!({}),
            import_data: json!({}),
        };

        let progress = JourneyProgress::from(row);

        assert_eq!(progress.current_step, 3);
        assert_eq!(
            progress.step_data.get(JourneyStep::CompanyRegistration),
            &json!({"input_company": "Acme"})
        );
        assert!(progress.step_data.is_filled(JourneyStep::Documentation));
        assert!(!progress.step_data.is_filled(JourneyStep::CustomsClearance));
    }
}
