//! Income and wealth ranking for one person in one country.

use serde::Serialize;
use tracing::{debug, warn};

use crate::estimator::{estimate, Estimation};
use crate::population::{CountryProfile, Quantity};

/// Ranking of a single observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantityRank {
    pub quantity: Quantity,
    pub value: f64,
    #[serde(flatten)]
    pub estimation: Estimation,
}

impl QuantityRank {
    fn assess(profile: &CountryProfile, quantity: Quantity, value: f64) -> Self {
        let estimation = estimate(value, profile.model(quantity));
        if estimation.clamped {
            warn!(
                country = profile.code(),
                %quantity,
                value,
                percentile = estimation.percentile,
                "estimate clamped at distribution bound"
            );
        }
        Self {
            quantity,
            value,
            estimation,
        }
    }
}

/// Income and wealth ranks for one country, as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankReport {
    pub country_code: String,
    pub country_name: String,
    pub currency_symbol: String,
    pub population_size: u64,
    pub income: QuantityRank,
    pub wealth: QuantityRank,
}

impl RankReport {
    /// # Examples
    /// ```
    /// use wealthrank::population::CountryTable;
    /// use wealthrank::report::RankReport;
    ///
    /// let table = CountryTable::builtin();
    /// let report = RankReport::assess(table.get("CN").unwrap(), 35_000.0, 120_000.0);
    /// assert!((report.income.estimation.percentile - 0.5).abs() < 1e-6);
    /// assert!((report.wealth.estimation.percentile - 0.5).abs() < 1e-6);
    /// ```
    pub fn assess(profile: &CountryProfile, income: f64, wealth: f64) -> Self {
        let report = Self {
            country_code: profile.code().to_owned(),
            country_name: profile.display_name().to_owned(),
            currency_symbol: profile.currency_symbol().to_owned(),
            population_size: profile.population_size(),
            income: QuantityRank::assess(profile, Quantity::Income, income),
            wealth: QuantityRank::assess(profile, Quantity::Wealth, wealth),
        };
        debug!(
            country = %report.country_code,
            income_percentile = report.income.estimation.percentile,
            wealth_percentile = report.wealth.estimation.percentile,
            "assessed rank report"
        );
        report
    }

    pub fn get(&self, quantity: Quantity) -> &QuantityRank {
        match quantity {
            Quantity::Income => &self.income,
            Quantity::Wealth => &self.wealth,
        }
    }

    pub fn ranks(&self) -> [&QuantityRank; 2] {
        [&self.income, &self.wealth]
    }

    /// True when either estimate hit a clamp bound.
    pub fn has_clamped(&self) -> bool {
        self.ranks().iter().any(|r| r.estimation.clamped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::{PERCENTILE_CEILING, PERCENTILE_FLOOR};
    use crate::population::CountryTable;

    #[test]
    fn test_report_fields() {
        let table = CountryTable::builtin();
        let report = RankReport::assess(table.get("us").unwrap(), 90_000.0, 50_000.0);
        assert_eq!(report.country_code, "US");
        assert_eq!(report.country_name, "United States");
        assert_eq!(report.currency_symbol, "$");
        assert_eq!(report.population_size, 331_900_000);
        assert_eq!(report.income.quantity, Quantity::Income);
        assert_eq!(report.get(Quantity::Wealth).value, 50_000.0);
        assert!(report.income.estimation.percentile > 0.5);
        assert!(report.wealth.estimation.percentile < 0.5);
        assert!(!report.has_clamped());
    }

    #[test]
    fn test_report_flags_clamped_estimates() {
        let table = CountryTable::builtin();
        let profile = table.get("DE").unwrap();
        let report = RankReport::assess(profile, 0.0, 1e15);
        assert_eq!(report.income.estimation.percentile, PERCENTILE_FLOOR);
        assert_eq!(report.wealth.estimation.percentile, PERCENTILE_CEILING);
        assert!(report.has_clamped());
        assert_eq!(
            report.income.estimation.absolute_rank,
            (83_200_000_f64 * (1.0 - PERCENTILE_FLOOR)).floor() as u64
        );
    }

    #[test]
    fn test_report_serializes_flat_estimation() {
        let table = CountryTable::builtin();
        let report = RankReport::assess(table.get("JP").unwrap(), 4_000_000.0, 1.0);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["country_code"], "JP");
        assert_eq!(json["income"]["quantity"], "income");
        assert_eq!(json["income"]["absolute_rank"], 62_850_000);
        assert_eq!(json["wealth"]["clamped"], true);
    }
}
