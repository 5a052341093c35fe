//! Core projection engine: year-by-year household income, expense, tax, and
//! asset balance
//!
//! Sign convention, held uniformly: `income`, `expense`, and `tax` are
//! non-negative magnitudes and `net_cash_flow = income - expense - tax`.
//! Event amounts are the one signed quantity (positive = income, negative =
//! expense).

use crate::household::{LifeEvent, Setup};

use super::row::{Projection, ProjectionRow};

/// Minimum number of years any projection covers.
const MIN_HORIZON_YEARS: u32 = 50;

/// The horizon must reach at least this attained age for the younger person.
const COVERAGE_AGE: i32 = 90;

/// Ceiling on the projection horizon. Bounds the row count against absurd
/// `Years` or birth-year inputs so the cast to `u32` can never wrap.
const MAX_HORIZON_YEARS: u32 = 1_000;

/// Household projection engine.
///
/// Caller-owned: construct one per `(setup, events)` pair, call it as often
/// as needed, and drop it when the session ends. Every method is a pure
/// function of the inputs; calling twice reproduces the same output exactly.
pub struct ProjectionEngine {
    setup: Setup,
    events: Vec<LifeEvent>,
}

impl ProjectionEngine {
    /// Create an engine for the given household and event list.
    pub fn new(setup: Setup, events: Vec<LifeEvent>) -> Self {
        Self { setup, events }
    }

    pub fn setup(&self) -> &Setup {
        &self.setup
    }

    pub fn events(&self) -> &[LifeEvent] {
        &self.events
    }

    /// Total income for one year: salaries while working, pensions once
    /// eligible, plus active positive events. Each person is evaluated
    /// independently.
    pub fn income(&self, year: i32) -> f64 {
        let mut income = 0.0;

        for person in self.setup.persons() {
            if person.is_working(year) {
                income += finite_or_zero(person.salary_start);
            }
            if person.draws_pension(year) {
                income += finite_or_zero(person.pension_income);
            }
        }

        for event in self.active_events(year) {
            if event.is_income() {
                income += finite_or_zero(event.amount);
            }
        }

        income
    }

    /// Total expense magnitude for one year.
    ///
    /// Housing and living costs switch from pre- to post-retirement levels at
    /// Person 1's retirement year for the whole household, even when the two
    /// people retire in different years.
    pub fn expense(&self, year: i32) -> f64 {
        let s = &self.setup;
        let mut expense = 0.0;

        if year < s.person1().retirement_year() {
            expense += cost(s.housing_annual_pre) + cost(s.living_annual_pre);
        } else {
            expense += cost(s.housing_annual_post) + cost(s.living_annual_post);
        }

        expense += cost(s.travel_annual);

        for person in s.persons() {
            if person.incurs_medical(year) {
                expense += cost(person.medical_annual);
            }
        }

        for event in self.active_events(year) {
            if event.is_expense() {
                expense += finite_or_zero(event.amount).abs();
            }
        }

        expense
    }

    /// Total tax magnitude for one year: flat rates on salaries, pensions,
    /// and positive events. No brackets, deductions, or carryover.
    pub fn tax(&self, year: i32) -> f64 {
        let s = &self.setup;
        let income_rate = finite_or_zero(s.income_tax_rate);
        let pension_rate = finite_or_zero(s.pension_tax_rate);
        let events_rate = finite_or_zero(s.events_tax_rate);
        let mut tax = 0.0;

        for person in s.persons() {
            if person.is_working(year) {
                tax += finite_or_zero(person.salary_start) * income_rate;
            }
            if person.draws_pension(year) {
                tax += finite_or_zero(person.pension_income) * pension_rate;
            }
        }

        for event in self.active_events(year) {
            if event.is_income() {
                tax += finite_or_zero(event.amount) * events_rate;
            }
        }

        tax
    }

    /// Net cash flow for one year: `income - expense - tax`.
    pub fn net_cash_flow(&self, year: i32) -> f64 {
        self.income(year) - self.expense(year) - self.tax(year)
    }

    /// Number of years the projection must cover:
    /// `max(setup.Years, 50, 90 - youngest current age)`.
    ///
    /// The age-90 floor guarantees coverage into late life even when the
    /// user-supplied horizon is too short; an explicitly larger horizon wins,
    /// capped at `MAX_HORIZON_YEARS`. A non-finite or non-positive `Years`
    /// is ignored rather than an error.
    pub fn projection_years(&self) -> u32 {
        let s = &self.setup;

        let user_years = if s.years.is_finite() && s.years > 0.0 {
            s.years as i64
        } else {
            0
        };

        let youngest_age = (s.start_year as i64 - s.person1_birth_year as i64)
            .min(s.start_year as i64 - s.person2_birth_year as i64);
        let coverage_years = COVERAGE_AGE as i64 - youngest_age;

        user_years
            .max(MIN_HORIZON_YEARS as i64)
            .max(coverage_years)
            .max(1)
            .min(MAX_HORIZON_YEARS as i64) as u32
    }

    /// Deflated growth factor applied uniformly to the asset balance each
    /// year: `(1 + invest_return) / (1 + inflation)`.
    ///
    /// Degenerate inflation at or below -100% would divide by zero or flip the
    /// balance's sign every year; the deflator is clamped to 1 in that case so
    /// the output stays finite.
    pub fn real_return_factor(&self) -> f64 {
        let invest = finite_or_zero(self.setup.invest_return);
        let deflator = 1.0 + finite_or_zero(self.setup.inflation);

        if deflator > 0.0 {
            (1.0 + invest) / deflator
        } else {
            1.0 + invest
        }
    }

    /// Run the full projection: a stateful fold in year order, since the
    /// asset balance carries forward. Growth applies to the whole balance
    /// before the year's net cash flow is added.
    pub fn generate(&self) -> Projection {
        let s = &self.setup;
        let n = self.projection_years();
        let factor = self.real_return_factor();

        let mut projection = Projection::new();
        let mut asset = finite_or_zero(s.initial_asset);

        for i in 0..n {
            let year = s.start_year + i as i32;
            let income = self.income(year);
            let expense = self.expense(year);
            let tax = self.tax(year);
            let net_cash_flow = income - expense - tax;

            asset = asset * factor + net_cash_flow;

            projection.add_row(ProjectionRow {
                year,
                person1_age: year - s.person1_birth_year,
                person2_age: year - s.person2_birth_year,
                child_age: year - s.child1_birth_year,
                income,
                expense,
                tax,
                net_cash_flow,
                asset,
            });
        }

        projection
    }

    fn active_events(&self, year: i32) -> impl Iterator<Item = &LifeEvent> + '_ {
        self.events.iter().filter(move |e| e.is_active(year))
    }
}

/// Defensive defaulting: any non-finite input contributes zero.
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Expense-like setup fields are magnitudes regardless of the sign convention
/// a caller-built record used.
fn cost(value: f64) -> f64 {
    finite_or_zero(value).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Minimal household: both people born start-30, working to 65, pension
    /// and medical costs from fixed ages, no events.
    fn test_setup() -> Setup {
        Setup {
            start_year: 2025,
            years: 40.0,
            initial_asset: 10_000_000.0,
            invest_return: 0.03,
            inflation: 0.01,
            person1_birth_year: 1995,
            person1_salary_start: 6_000_000.0,
            person1_retire_age: 65,
            person1_pension_start_age: 65,
            person1_pension_income: 1_500_000.0,
            person1_medical_start_age: 70,
            person1_medical_annual: 800_000.0,
            person2_birth_year: 1995,
            person2_salary_start: 4_000_000.0,
            person2_retire_age: 65,
            person2_pension_start_age: 65,
            person2_pension_income: 1_200_000.0,
            person2_medical_start_age: 70,
            person2_medical_annual: 800_000.0,
            child1_birth_year: 2025,
            housing_annual_pre: 2_400_000.0,
            housing_annual_post: 1_200_000.0,
            living_annual_pre: 3_600_000.0,
            living_annual_post: 3_000_000.0,
            travel_annual: 500_000.0,
            income_tax_rate: 0.20,
            pension_tax_rate: 0.10,
            events_tax_rate: 0.30,
        }
    }

    #[test]
    fn test_zero_event_income_baseline() {
        let engine = ProjectionEngine::new(test_setup(), vec![]);

        // Both working, no pensions yet
        assert_eq!(engine.income(2030), 10_000_000.0);
        // Both retired at 65 (2060); pensions active from the same age
        assert_eq!(engine.income(2060), 2_700_000.0);
    }

    #[test]
    fn test_zero_event_expense_baseline() {
        let engine = ProjectionEngine::new(test_setup(), vec![]);

        // Pre-retirement: housing + living + travel
        assert_eq!(engine.expense(2030), 2_400_000.0 + 3_600_000.0 + 500_000.0);
        // Post-retirement, before medical age
        assert_eq!(engine.expense(2062), 1_200_000.0 + 3_000_000.0 + 500_000.0);
        // At age 70 both people add medical costs
        assert_eq!(
            engine.expense(2065),
            1_200_000.0 + 3_000_000.0 + 500_000.0 + 1_600_000.0
        );
    }

    #[test]
    fn test_zero_event_tax_baseline() {
        let engine = ProjectionEngine::new(test_setup(), vec![]);

        // Salaries taxed at the flat income rate
        assert_relative_eq!(engine.tax(2030), 10_000_000.0 * 0.20);
        // Pensions taxed at the pension rate
        assert_relative_eq!(engine.tax(2060), 2_700_000.0 * 0.10);
    }

    #[test]
    fn test_event_windowing_in_expense() {
        let events = vec![LifeEvent::new(2030, -100.0, 3, "tuition")];
        let engine = ProjectionEngine::new(test_setup(), events);
        let baseline = ProjectionEngine::new(test_setup(), vec![]);

        assert_eq!(engine.expense(2029), baseline.expense(2029));
        assert_eq!(engine.expense(2030), baseline.expense(2030) + 100.0);
        assert_eq!(engine.expense(2031), baseline.expense(2031) + 100.0);
        assert_eq!(engine.expense(2032), baseline.expense(2032) + 100.0);
        assert_eq!(engine.expense(2033), baseline.expense(2033));
    }

    #[test]
    fn test_positive_events_feed_income_and_tax() {
        let events = vec![LifeEvent::new(2040, 10_000_000.0, 1, "inheritance")];
        let engine = ProjectionEngine::new(test_setup(), events);
        let baseline = ProjectionEngine::new(test_setup(), vec![]);

        assert_eq!(engine.income(2040), baseline.income(2040) + 10_000_000.0);
        assert_relative_eq!(engine.tax(2040), baseline.tax(2040) + 10_000_000.0 * 0.30);
        // Expense untouched by positive events
        assert_eq!(engine.expense(2040), baseline.expense(2040));
    }

    #[test]
    fn test_inert_zero_duration_event() {
        let events = vec![LifeEvent::new(2030, -1_000_000.0, 0, "never")];
        let engine = ProjectionEngine::new(test_setup(), events);
        let baseline = ProjectionEngine::new(test_setup(), vec![]);

        for year in 2028..=2032 {
            assert_eq!(engine.expense(year), baseline.expense(year));
        }
    }

    #[test]
    fn test_retirement_switch_happens_exactly_once() {
        let engine = ProjectionEngine::new(test_setup(), vec![]);
        let retirement = 1995 + 65;

        let mut switches = 0;
        let mut prev = engine.expense(2025);
        for year in 2026..2065 {
            let cur = engine.expense(year);
            if cur != prev {
                switches += 1;
                assert_eq!(year, retirement);
            }
            prev = cur;
        }
        assert_eq!(switches, 1);
    }

    #[test]
    fn test_household_switch_keyed_off_person1() {
        // Person 2 retires five years before Person 1; housing/living still
        // switch at Person 1's retirement year.
        let mut setup = test_setup();
        setup.person2_retire_age = 60;
        let engine = ProjectionEngine::new(setup, vec![]);

        let p2_retirement = 1995 + 60;
        let p1_retirement = 1995 + 65;

        // Between the two retirements only Person 2's salary drops out; the
        // household cost base stays pre-retirement.
        let pre_costs = 2_400_000.0 + 3_600_000.0 + 500_000.0;
        assert_eq!(engine.expense(p2_retirement), pre_costs);
        assert_eq!(
            engine.expense(p1_retirement),
            1_200_000.0 + 3_000_000.0 + 500_000.0
        );
    }

    #[test]
    fn test_net_cash_flow_is_sum_of_parts() {
        let events = vec![
            LifeEvent::new(2030, -2_000_000.0, 5, "mortgage"),
            LifeEvent::new(2032, 1_000_000.0, 3, "side income"),
        ];
        let engine = ProjectionEngine::new(test_setup(), events);

        for year in [2029, 2030, 2032, 2036, 2060] {
            assert_relative_eq!(
                engine.net_cash_flow(year),
                engine.income(year) - engine.expense(year) - engine.tax(year)
            );
        }
    }

    #[test]
    fn test_horizon_age_90_floor() {
        let mut setup = test_setup();
        setup.years = 1.0;
        // Both people are 30 at start
        let engine = ProjectionEngine::new(setup, vec![]);
        assert_eq!(engine.projection_years(), 60);
    }

    #[test]
    fn test_horizon_respects_larger_user_override() {
        let mut setup = test_setup();
        setup.years = 75.0; // exceeds both 50 and 90 - 30
        let engine = ProjectionEngine::new(setup, vec![]);
        assert_eq!(engine.projection_years(), 75);
    }

    #[test]
    fn test_horizon_minimum_fifty_for_old_household() {
        let mut setup = test_setup();
        setup.years = 1.0;
        setup.person1_birth_year = 1940;
        setup.person2_birth_year = 1940; // both 85: 90 - 85 = 5
        let engine = ProjectionEngine::new(setup, vec![]);
        assert_eq!(engine.projection_years(), 50);
    }

    #[test]
    fn test_horizon_guards_invalid_years() {
        let mut setup = test_setup();
        setup.years = f64::NAN;
        let engine = ProjectionEngine::new(setup, vec![]);
        assert_eq!(engine.projection_years(), 60);

        let mut setup = test_setup();
        setup.years = -10.0;
        let engine = ProjectionEngine::new(setup, vec![]);
        assert_eq!(engine.projection_years(), 60);
    }

    #[test]
    fn test_horizon_capped_for_absurd_years() {
        let mut setup = test_setup();
        setup.years = 1e10; // finite but far beyond any real horizon
        let engine = ProjectionEngine::new(setup, vec![]);
        assert_eq!(engine.projection_years(), 1_000);
    }

    #[test]
    fn test_asset_recurrence() {
        // Zero cash flows: asset compounds at the real return factor alone
        let setup = Setup {
            start_year: 2025,
            years: 2.0,
            initial_asset: 1_000_000.0,
            invest_return: 0.05,
            inflation: 0.0,
            ..Setup::default()
        };
        let engine = ProjectionEngine::new(setup, vec![]);
        let projection = engine.generate();

        assert_relative_eq!(projection.rows[0].asset, 1_050_000.0, max_relative = 1e-12);
        assert_relative_eq!(projection.rows[1].asset, 1_102_500.0, max_relative = 1e-12);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let events = vec![
            LifeEvent::new(2030, -2_000_000.0, 5, "mortgage"),
            LifeEvent::new(2055, 10_000_000.0, 1, "inheritance"),
        ];
        let engine = ProjectionEngine::new(test_setup(), events);

        let first = engine.generate();
        let second = engine.generate();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_rows_and_ages() {
        let engine = ProjectionEngine::new(test_setup(), vec![]);
        let projection = engine.generate();

        assert_eq!(projection.len() as u32, engine.projection_years());

        let first = &projection.rows[0];
        assert_eq!(first.year, 2025);
        assert_eq!(first.person1_age, 30);
        assert_eq!(first.person2_age, 30);
        assert_eq!(first.child_age, 0);

        for (i, row) in projection.rows.iter().enumerate() {
            assert_eq!(row.year, 2025 + i as i32);
        }
    }

    #[test]
    fn test_degenerate_inflation_stays_finite() {
        let mut setup = test_setup();
        setup.inflation = -1.0;
        let engine = ProjectionEngine::new(setup, vec![]);

        let projection = engine.generate();
        for row in &projection.rows {
            assert!(row.asset.is_finite());
            assert!(row.net_cash_flow.is_finite());
        }
        // Deflator clamped: nominal growth only
        assert_relative_eq!(engine.real_return_factor(), 1.03);
    }

    #[test]
    fn test_empty_setup_produces_defined_projection() {
        let engine = ProjectionEngine::new(Setup::default(), vec![]);
        let projection = engine.generate();

        assert!(projection.len() >= 1);
        for row in &projection.rows {
            assert_eq!(row.income, 0.0);
            assert_eq!(row.expense, 0.0);
            assert_eq!(row.tax, 0.0);
            assert!(row.asset.is_finite());
        }
    }

    #[test]
    fn test_negative_cost_convention_still_magnitudes() {
        // Caller-built setup using the older negative-cost convention
        let mut setup = test_setup();
        setup.living_annual_pre = -3_600_000.0;
        setup.person1_medical_annual = -800_000.0;
        let engine = ProjectionEngine::new(setup, vec![]);
        let baseline = ProjectionEngine::new(test_setup(), vec![]);

        assert_eq!(engine.expense(2030), baseline.expense(2030));
        assert_eq!(engine.expense(2065), baseline.expense(2065));
    }
}
