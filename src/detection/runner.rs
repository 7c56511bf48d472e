//! Detection run orchestration.
//!
//! This module wires the grouping, window construction, and the two
//! detection rules into a single pass over the full record store.

use crate::config::DetectionSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{DetectionOutcome, PayrollRecord, Period};

use super::discount_drift::detect_discount_drift;
use super::grouping::group_by_employee;
use super::history::EmployeeHistory;
use super::unusual_income::detect_unusual_income;

/// Runs both detection rules over the full record store.
///
/// Records are partitioned by employee in first-appearance order, and each
/// group is evaluated independently: the unusual-income rule against the
/// trailing window, the discount-drift rule against the unbounded prior
/// history. Anomalies accumulate in grouping order, so identical input
/// always produces identical output.
///
/// The run is a pure function of its inputs. One employee's degenerate data
/// never aborts the batch: indeterminate records surface on the outcome's
/// notice channel and the pass continues.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPeriod`] if the reference month is outside
/// 1-12. This is the only whole-run failure.
///
/// # Example
///
/// ```
/// use payroll_anomaly_engine::config::DetectionSettings;
/// use payroll_anomaly_engine::detection::run_detection;
/// use payroll_anomaly_engine::models::{PayrollRecord, Period, RubricType};
/// use rust_decimal::Decimal;
///
/// let records = vec![PayrollRecord {
///     employee_id: "E1".to_string(),
///     rubric_code: "BONUS_ANUAL".to_string(),
///     rubric_type: RubricType::Income,
///     value: Decimal::new(150000, 2),
///     year: 2024,
///     month: 8,
/// }];
///
/// let outcome = run_detection(
///     &records,
///     Period { year: 2024, month: 8 },
///     &DetectionSettings::default(),
/// )
/// .unwrap();
/// assert_eq!(outcome.unusual_income.len(), 1);
/// ```
pub fn run_detection(
    records: &[PayrollRecord],
    reference: Period,
    settings: &DetectionSettings,
) -> EngineResult<DetectionOutcome> {
    if !reference.is_valid() {
        return Err(EngineError::InvalidPeriod {
            year: reference.year,
            month: reference.month,
        });
    }

    let mut outcome = DetectionOutcome::default();

    for (employee_id, group) in group_by_employee(records) {
        let history = EmployeeHistory::new(&employee_id, &group);
        let current = history.current_period(reference);

        let trailing = history.trailing_window(reference, settings.income_lookback_months);
        if let Some(anomaly) = detect_unusual_income(&employee_id, &current, &trailing) {
            outcome.unusual_income.push(anomaly);
        }

        let prior = history.prior_history(reference);
        let drift =
            detect_discount_drift(&employee_id, &current, &prior, settings.drift_threshold);
        outcome.discount_drift.extend(drift.anomalies);
        outcome.indeterminate.extend(drift.notices);
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RubricType;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(
        employee_id: &str,
        code: &str,
        rubric_type: RubricType,
        value: &str,
        year: i32,
        month: u32,
    ) -> PayrollRecord {
        PayrollRecord {
            employee_id: employee_id.to_string(),
            rubric_code: code.to_string(),
            rubric_type,
            value: dec(value),
            year,
            month,
        }
    }

    #[test]
    fn test_invalid_reference_month_fails_the_run() {
        let result = run_detection(&[], Period::new(2024, 13), &DetectionSettings::default());
        match result {
            Err(EngineError::InvalidPeriod { year, month }) => {
                assert_eq!(year, 2024);
                assert_eq!(month, 13);
            }
            other => panic!("Expected InvalidPeriod, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_record_store_yields_empty_outcome() {
        let outcome =
            run_detection(&[], Period::new(2024, 8), &DetectionSettings::default()).unwrap();
        assert!(outcome.is_empty());
    }

    #[test]
    fn test_bonus_in_reference_month_is_flagged() {
        // E1 earns BASE_SALARY Jan-Jul 2024 and additionally BONUS_ANUAL
        // only in the August reference period.
        let mut records: Vec<PayrollRecord> = (1..=7)
            .map(|m| record("E1", "BASE_SALARY", RubricType::Income, "4200", 2024, m))
            .collect();
        records.push(record("E1", "BASE_SALARY", RubricType::Income, "4200", 2024, 8));
        records.push(record("E1", "BONUS_ANUAL", RubricType::Income, "1500", 2024, 8));

        let outcome =
            run_detection(&records, Period::new(2024, 8), &DetectionSettings::default())
                .unwrap();

        assert_eq!(outcome.unusual_income.len(), 1);
        let anomaly = &outcome.unusual_income[0];
        assert_eq!(anomaly.employee_id, "E1");
        assert_eq!(
            anomaly.new_income_codes.iter().collect::<Vec<_>>(),
            vec!["BONUS_ANUAL"]
        );
        assert!(outcome.discount_drift.is_empty());
    }

    #[test]
    fn test_drifting_discount_is_flagged_with_mean() {
        // E2 pays PLANO_SAUDE 280, 285, 290 over the three prior months and
        // 300 in the reference period: deviation 15/285 exceeds 5%.
        let records = vec![
            record("E2", "PLANO_SAUDE", RubricType::Discount, "280", 2024, 5),
            record("E2", "PLANO_SAUDE", RubricType::Discount, "285", 2024, 6),
            record("E2", "PLANO_SAUDE", RubricType::Discount, "290", 2024, 7),
            record("E2", "PLANO_SAUDE", RubricType::Discount, "300", 2024, 8),
        ];

        let outcome =
            run_detection(&records, Period::new(2024, 8), &DetectionSettings::default())
                .unwrap();

        assert_eq!(outcome.discount_drift.len(), 1);
        let anomaly = &outcome.discount_drift[0];
        assert_eq!(anomaly.employee_id, "E2");
        assert_eq!(anomaly.rubric_code, "PLANO_SAUDE");
        assert_eq!(anomaly.current_value, dec("300"));
        assert_eq!(anomaly.historical_mean, dec("285"));
        assert!(outcome.unusual_income.is_empty());
    }

    #[test]
    fn test_income_window_is_bounded_but_discount_history_is_not() {
        // An income code last seen 7 months back is outside the trailing
        // window and counts as new; a discount from the same month still
        // joins the mean.
        let records = vec![
            record("E1", "GRATIFICACAO", RubricType::Income, "800", 2024, 1),
            record("E1", "PLANO_SAUDE", RubricType::Discount, "200", 2024, 1),
            record("E1", "GRATIFICACAO", RubricType::Income, "800", 2024, 8),
            record("E1", "PLANO_SAUDE", RubricType::Discount, "230", 2024, 8),
        ];

        let outcome =
            run_detection(&records, Period::new(2024, 8), &DetectionSettings::default())
                .unwrap();

        assert_eq!(outcome.unusual_income.len(), 1);
        assert!(
            outcome.unusual_income[0]
                .new_income_codes
                .contains("GRATIFICACAO")
        );

        // 230 vs mean 200: 15% drift, flagged from unbounded history.
        assert_eq!(outcome.discount_drift.len(), 1);
        assert_eq!(outcome.discount_drift[0].historical_mean, dec("200"));
    }

    #[test]
    fn test_anomalies_follow_first_appearance_order() {
        let records = vec![
            record("E9", "NOVO", RubricType::Income, "100", 2024, 8),
            record("E1", "NOVO", RubricType::Income, "100", 2024, 8),
            record("E5", "NOVO", RubricType::Income, "100", 2024, 8),
        ];

        let outcome =
            run_detection(&records, Period::new(2024, 8), &DetectionSettings::default())
                .unwrap();

        let order: Vec<&str> = outcome
            .unusual_income
            .iter()
            .map(|a| a.employee_id.as_str())
            .collect();
        assert_eq!(order, vec!["E9", "E1", "E5"]);
    }

    #[test]
    fn test_employees_are_evaluated_independently() {
        // E1's history must not make E2's codes look familiar.
        let records = vec![
            record("E1", "BONUS_ANUAL", RubricType::Income, "1500", 2024, 7),
            record("E2", "BONUS_ANUAL", RubricType::Income, "1500", 2024, 8),
        ];

        let outcome =
            run_detection(&records, Period::new(2024, 8), &DetectionSettings::default())
                .unwrap();

        assert_eq!(outcome.unusual_income.len(), 1);
        assert_eq!(outcome.unusual_income[0].employee_id, "E2");
    }

    #[test]
    fn test_zero_mean_surfaces_as_notice_and_run_continues() {
        let records = vec![
            record("E1", "AJUSTE", RubricType::Discount, "-30", 2024, 6),
            record("E1", "AJUSTE", RubricType::Discount, "30", 2024, 7),
            record("E1", "AJUSTE", RubricType::Discount, "50", 2024, 8),
            record("E2", "PLANO_SAUDE", RubricType::Discount, "285", 2024, 7),
            record("E2", "PLANO_SAUDE", RubricType::Discount, "300", 2024, 8),
        ];

        let outcome =
            run_detection(&records, Period::new(2024, 8), &DetectionSettings::default())
                .unwrap();

        assert_eq!(outcome.indeterminate.len(), 1);
        assert_eq!(outcome.indeterminate[0].employee_id, "E1");
        // E2 still evaluated: 15/285 > 5%.
        assert_eq!(outcome.discount_drift.len(), 1);
        assert_eq!(outcome.discount_drift[0].employee_id, "E2");
    }

    #[test]
    fn test_base_records_never_produce_anomalies() {
        let records = vec![
            record("E1", "SALARIO_BASE", RubricType::Base, "4200", 2024, 8),
        ];

        let outcome =
            run_detection(&records, Period::new(2024, 8), &DetectionSettings::default())
                .unwrap();
        assert!(outcome.is_empty());
    }

    #[test]
    fn test_custom_lookback_widens_the_income_window() {
        let records = vec![
            record("E1", "GRATIFICACAO", RubricType::Income, "800", 2024, 1),
            record("E1", "GRATIFICACAO", RubricType::Income, "800", 2024, 8),
        ];

        let settings = DetectionSettings {
            income_lookback_months: 7,
            ..DetectionSettings::default()
        };

        let outcome = run_detection(&records, Period::new(2024, 8), &settings).unwrap();
        assert!(outcome.unusual_income.is_empty());
    }
}
