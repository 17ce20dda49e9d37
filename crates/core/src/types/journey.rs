//! The six-step shipment onboarding journey.
//!
//! A journey is a fixed, linear wizard. Each step owns one JSON payload slot
//! that is replaced wholesale whenever that step is saved, and saving step
//! `n` marks the journey as having reached step `n + 1`. The reached step
//! never moves backwards, even when an earlier step is re-submitted.
//!
//! The same rule is enforced in SQL by the server's upsert; [`JourneyProgress`]
//! is the in-memory model used to read rows back and to reason about the rule.

use core::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Number of steps in a journey.
pub const STEP_COUNT: usize = 6;

/// Errors produced by journey step handling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JourneyError {
    /// The step number does not name one of the six steps.
    #[error("invalid step {0}: must be between 1 and 6")]
    InvalidStep(i64),
}

/// One stage of the journey wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JourneyStep {
    CompanyRegistration,
    Documentation,
    CustomsClearance,
    PortHandling,
    SeaTransport,
    ImportClearance,
}

/// Kind of input a step collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    File,
    Text,
}

/// A form field displayed for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepField {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u8>,
}

const fn file(id: &'static str, label: &'static str) -> StepField {
    StepField {
        id,
        label,
        kind: FieldKind::File,
        max_length: None,
    }
}

const fn text(id: &'static str, label: &'static str, max_length: Option<u8>) -> StepField {
    StepField {
        id,
        label,
        kind: FieldKind::Text,
        max_length,
    }
}

impl JourneyStep {
    /// All steps in wizard order.
    pub const ALL: [Self; STEP_COUNT] = [
        Self::CompanyRegistration,
        Self::Documentation,
        Self::CustomsClearance,
        Self::PortHandling,
        Self::SeaTransport,
        Self::ImportClearance,
    ];

    /// Look up a step by its 1-based number.
    ///
    /// # Errors
    ///
    /// Returns [`JourneyError::InvalidStep`] for anything outside `1..=6`.
    pub const fn from_number(number: i64) -> Result<Self, JourneyError> {
        match number {
            1 => Ok(Self::CompanyRegistration),
            2 => Ok(Self::Documentation),
            3 => Ok(Self::CustomsClearance),
            4 => Ok(Self::PortHandling),
            5 => Ok(Self::SeaTransport),
            6 => Ok(Self::ImportClearance),
            other => Err(JourneyError::InvalidStep(other)),
        }
    }

    /// 1-based step number.
    #[must_use]
    pub const fn number(self) -> i32 {
        match self {
            Self::CompanyRegistration => 1,
            Self::Documentation => 2,
            Self::CustomsClearance => 3,
            Self::PortHandling => 4,
            Self::SeaTransport => 5,
            Self::ImportClearance => 6,
        }
    }

    /// The step a journey reaches once this one has been saved.
    #[must_use]
    pub const fn advances_to(self) -> i32 {
        self.number() + 1
    }

    /// Name of the `journey_progress` column holding this step's payload.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::CompanyRegistration => "company_data",
            Self::Documentation => "documentation_data",
            Self::CustomsClearance => "customs_data",
            Self::PortHandling => "port_data",
            Self::SeaTransport => "sea_data",
            Self::ImportClearance => "import_data",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::CompanyRegistration => "Company Registration",
            Self::Documentation => "Documentation",
            Self::CustomsClearance => "Customs Clearance",
            Self::PortHandling => "Port Handling",
            Self::SeaTransport => "Sea Transport",
            Self::ImportClearance => "Import Clearance",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::CompanyRegistration => "Identity & Business Licensing",
            Self::Documentation => "Shipping & Invoice preparation",
            Self::CustomsClearance => "Local border inspection entry",
            Self::PortHandling => "Terminal loading & receipts",
            Self::SeaTransport => "Vessel transit tracking",
            Self::ImportClearance => "Destination arrival & tax payment",
        }
    }

    /// Fields the wizard collects for this step.
    #[must_use]
    pub const fn fields(self) -> &'static [StepField] {
        const COMPANY: &[StepField] = &[
            file("doc_aadhar", "Aadhar Card"),
            file("doc_pan", "PAN Card"),
            text("input_iec", "IEC Code (10 Digit)", Some(10)),
        ];
        const DOCUMENTATION: &[StepField] = &[
            file("doc_inv", "Commercial Invoice"),
            file("doc_pack", "Packing List"),
        ];
        const CUSTOMS: &[StepField] = &[
            file("doc_bill", "Shipping Bill"),
            text("input_sdf", "SDF Number", Some(15)),
        ];
        const PORT: &[StepField] = &[file("doc_gate", "Gate Pass")];
        const SEA: &[StepField] = &[
            file("doc_bl", "Bill of Lading"),
            text("input_vessel", "Vessel Name", None),
        ];
        const IMPORT: &[StepField] = &[
            file("doc_arr", "Arrival Notice"),
            file("doc_duty", "Duty Receipt"),
        ];

        match self {
            Self::CompanyRegistration => COMPANY,
            Self::Documentation => DOCUMENTATION,
            Self::CustomsClearance => CUSTOMS,
            Self::PortHandling => PORT,
            Self::SeaTransport => SEA,
            Self::ImportClearance => IMPORT,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::CompanyRegistration => 0,
            Self::Documentation => 1,
            Self::CustomsClearance => 2,
            Self::PortHandling => 3,
            Self::SeaTransport => 4,
            Self::ImportClearance => 5,
        }
    }
}

impl fmt::Display for JourneyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.title())
    }
}

impl Serialize for JourneyStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.number())
    }
}

/// The payload slots of a journey, one per step.
///
/// Serializes as an object keyed `"1"` through `"6"`.
#[derive(Debug, Clone, PartialEq)]
pub struct StepData([Value; STEP_COUNT]);

impl StepData {
    /// All six slots empty (`{}`).
    #[must_use]
    pub fn empty() -> Self {
        Self(std::array::from_fn(|_| Value::Object(Map::new())))
    }

    /// Payload saved for `step`.
    #[must_use]
    pub fn get(&self, step: JourneyStep) -> &Value {
        let [company, documentation, customs, port, sea, import] = &self.0;
        match step.slot() {
            0 => company,
            1 => documentation,
            2 => customs,
            3 => port,
            4 => sea,
            _ => import,
        }
    }

    /// Replace the payload for `step`.
    pub fn set(&mut self, step: JourneyStep, data: Value) {
        let [company, documentation, customs, port, sea, import] = &mut self.0;
        let slot = match step.slot() {
            0 => company,
            1 => documentation,
            2 => customs,
            3 => port,
            4 => sea,
            _ => import,
        };
        *slot = data;
    }

    /// Whether the slot for `step` holds anything other than `{}` or `null`.
    #[must_use]
    pub fn is_filled(&self, step: JourneyStep) -> bool {
        match self.get(step) {
            Value::Null => false,
            Value::Object(map) => !map.is_empty(),
            _ => true,
        }
    }
}

impl Default for StepData {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for StepData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(STEP_COUNT))?;
        for step in JourneyStep::ALL {
            map.serialize_entry(&step.number().to_string(), self.get(step))?;
        }
        map.end()
    }
}

/// Where a shipment's journey stands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyProgress {
    /// Step the client should show next. 1 for a fresh journey; 7 once the
    /// final step has been saved.
    pub current_step: i32,
    pub step_data: StepData,
}

impl JourneyProgress {
    /// A journey that has not been started.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_step: 1,
            step_data: StepData::empty(),
        }
    }

    /// Apply a step save: overwrite the slot, advance but never rewind.
    pub fn record_step(&mut self, step: JourneyStep, data: Value) {
        self.step_data.set(step, data);
        self.current_step = self.current_step.max(step.advances_to());
    }

    /// Steps the journey has moved past.
    #[must_use]
    pub fn completed_steps(&self) -> Vec<JourneyStep> {
        JourneyStep::ALL
            .into_iter()
            .filter(|step| step.number() < self.current_step)
            .collect()
    }

    /// True once the final step has been saved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current_step > JourneyStep::ImportClearance.number()
    }
}

impl Default for JourneyProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_fresh_journey_starts_at_step_one_with_empty_slots() {
        let progress = JourneyProgress::new();
        assert_eq!(progress.current_step, 1);
        for step in JourneyStep::ALL {
            assert_eq!(progress.step_data.get(step), &json!({}));
            assert!(!progress.step_data.is_filled(step));
        }
        assert!(progress.completed_steps().is_empty());
    }

    #[test]
    fn test_from_number_accepts_only_known_steps() {
        for (i, step) in JourneyStep::ALL.into_iter().enumerate() {
            let n = i64::try_from(i).unwrap() + 1;
            assert_eq!(JourneyStep::from_number(n), Ok(step));
            assert_eq!(i64::from(step.number()), n);
        }
        for bad in [-1, 0, 7, 100] {
            assert_eq!(
                JourneyStep::from_number(bad),
                Err(JourneyError::InvalidStep(bad))
            );
        }
    }

    #[test]
    fn test_columns_are_distinct() {
        let mut columns: Vec<_> = JourneyStep::ALL.iter().map(|s| s.column()).collect();
        columns.sort_unstable();
        columns.dedup();
        assert_eq!(columns.len(), STEP_COUNT);
    }

    #[test]
    fn test_record_step_overwrites_slot_and_advances() {
        let mut progress = JourneyProgress::new();
        progress.record_step(JourneyStep::CompanyRegistration, json!({"iec": "0123456789"}));
        assert_eq!(progress.current_step, 2);

        progress.record_step(JourneyStep::CompanyRegistration, json!({"pan": "ABCDE1234F"}));
        assert_eq!(progress.current_step, 2);
        assert_eq!(
            progress.step_data.get(JourneyStep::CompanyRegistration),
            &json!({"pan": "ABCDE1234F"})
        );
    }

    #[test]
    fn test_current_step_never_decreases() {
        let mut progress = JourneyProgress::new();
        progress.record_step(JourneyStep::CustomsClearance, json!({"sdf": "X1"}));
        assert_eq!(progress.current_step, 4);

        progress.record_step(JourneyStep::CompanyRegistration, json!({"iec": "1"}));
        assert_eq!(progress.current_step, 4);
        assert!(progress.step_data.is_filled(JourneyStep::CompanyRegistration));
        assert!(!progress.step_data.is_filled(JourneyStep::Documentation));
    }

    #[test]
    fn test_two_saves_reach_step_three() {
        let mut progress = JourneyProgress::new();
        progress.record_step(JourneyStep::CompanyRegistration, json!({"a": 1}));
        progress.record_step(JourneyStep::Documentation, json!({"b": 2}));

        assert_eq!(progress.current_step, 3);
        assert_eq!(
            progress.completed_steps(),
            vec![JourneyStep::CompanyRegistration, JourneyStep::Documentation]
        );
        for step in &JourneyStep::ALL[2..] {
            assert!(!progress.step_data.is_filled(*step));
        }
    }

    #[test]
    fn test_final_step_completes_journey() {
        let mut progress = JourneyProgress::new();
        assert!(!progress.is_complete());
        progress.record_step(JourneyStep::ImportClearance, json!({"duty": "paid"}));
        assert_eq!(progress.current_step, 7);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_progress_serializes_step_data_by_number() {
        let mut progress = JourneyProgress::new();
        progress.record_step(JourneyStep::Documentation, json!({"doc_inv": "inv.pdf"}));

        let value = serde_json::to_value(&progress).unwrap();
        assert_eq!(value["currentStep"], 3);
        assert_eq!(value["stepData"]["2"], json!({"doc_inv": "inv.pdf"}));
        assert_eq!(value["stepData"]["6"], json!({}));
    }

    #[test]
    fn test_step_catalogue_fields() {
        let fields = JourneyStep::CompanyRegistration.fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[2].max_length, Some(10));
        assert_eq!(JourneyStep::PortHandling.fields().len(), 1);
        assert_eq!(JourneyStep::SeaTransport.title(), "Sea Transport");
    }
}
