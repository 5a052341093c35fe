//! Household setup record matching the persisted flat key-value format

use serde::{Deserialize, Serialize};

/// The full set of demographic and economic parameters for one household.
///
/// Serialized form is a flat key-value record (the shape the front end
/// persists), so field names carry explicit renames. Every field defaults to
/// zero on a missing key: an incomplete record produces a degraded but defined
/// projection rather than a deserialization error.
///
/// All monetary fields are annual amounts in yen. Expense-like fields
/// (housing, living, travel, medical) are magnitudes; the engine takes their
/// absolute value so records persisted with the older negative-cost convention
/// still load correctly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Setup {
    // Global parameters
    #[serde(rename = "Start_Year")]
    pub start_year: i32,
    #[serde(rename = "Years")]
    pub years: f64,
    #[serde(rename = "Initial_Asset")]
    pub initial_asset: f64,
    #[serde(rename = "Invest_Return")]
    pub invest_return: f64,
    #[serde(rename = "Inflation")]
    pub inflation: f64,

    // Person 1
    #[serde(rename = "Person1_Birth_Year")]
    pub person1_birth_year: i32,
    #[serde(rename = "Person1_Salary_Start")]
    pub person1_salary_start: f64,
    #[serde(rename = "Person1_Retire_Age")]
    pub person1_retire_age: i32,
    #[serde(rename = "Person1_Pension_Start_Age")]
    pub person1_pension_start_age: i32,
    #[serde(rename = "Person1_Pension_Income")]
    pub person1_pension_income: f64,
    #[serde(rename = "Person1_Medical_Start_Age")]
    pub person1_medical_start_age: i32,
    #[serde(rename = "Person1_Medical_Annual")]
    pub person1_medical_annual: f64,

    // Person 2
    #[serde(rename = "Person2_Birth_Year")]
    pub person2_birth_year: i32,
    #[serde(rename = "Person2_Salary_Start")]
    pub person2_salary_start: f64,
    #[serde(rename = "Person2_Retire_Age")]
    pub person2_retire_age: i32,
    #[serde(rename = "Person2_Pension_Start_Age")]
    pub person2_pension_start_age: i32,
    #[serde(rename = "Person2_Pension_Income")]
    pub person2_pension_income: f64,
    #[serde(rename = "Person2_Medical_Start_Age")]
    pub person2_medical_start_age: i32,
    #[serde(rename = "Person2_Medical_Annual")]
    pub person2_medical_annual: f64,

    // Child
    #[serde(rename = "Child1_Birth_Year")]
    pub child1_birth_year: i32,

    // Household expenses
    #[serde(rename = "Housing_Annual_Pre")]
    pub housing_annual_pre: f64,
    #[serde(rename = "Housing_Annual_Post")]
    pub housing_annual_post: f64,
    #[serde(rename = "Living_Annual_Pre")]
    pub living_annual_pre: f64,
    #[serde(rename = "Living_Annual_Post")]
    pub living_annual_post: f64,
    #[serde(rename = "Travel_Annual")]
    pub travel_annual: f64,

    // Flat tax rates
    #[serde(rename = "Income_Tax_Rate")]
    pub income_tax_rate: f64,
    #[serde(rename = "Pension_Tax_Rate")]
    pub pension_tax_rate: f64,
    #[serde(rename = "Events_Tax_Rate")]
    pub events_tax_rate: f64,
}

/// Per-person parameter view so the engine treats both people uniformly.
///
/// Retirement and pension timing are evaluated independently per person; there
/// is no shared household retirement year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonParams {
    pub birth_year: i32,
    pub salary_start: f64,
    pub retire_age: i32,
    pub pension_start_age: i32,
    pub pension_income: f64,
    pub medical_start_age: i32,
    pub medical_annual: f64,
}

impl PersonParams {
    /// Age attained in the given calendar year.
    pub fn age_in(&self, year: i32) -> i32 {
        year - self.birth_year
    }

    /// First calendar year in which this person is retired.
    pub fn retirement_year(&self) -> i32 {
        self.birth_year + self.retire_age
    }

    /// Whether this person still draws a salary in the given year.
    pub fn is_working(&self, year: i32) -> bool {
        year < self.retirement_year()
    }

    /// Whether this person draws a pension in the given year.
    pub fn draws_pension(&self, year: i32) -> bool {
        self.age_in(year) >= self.pension_start_age
    }

    /// Whether this person incurs recurring medical costs in the given year.
    pub fn incurs_medical(&self, year: i32) -> bool {
        self.age_in(year) >= self.medical_start_age
    }
}

impl Setup {
    /// View of Person 1's parameters.
    pub fn person1(&self) -> PersonParams {
        PersonParams {
            birth_year: self.person1_birth_year,
            salary_start: self.person1_salary_start,
            retire_age: self.person1_retire_age,
            pension_start_age: self.person1_pension_start_age,
            pension_income: self.person1_pension_income,
            medical_start_age: self.person1_medical_start_age,
            medical_annual: self.person1_medical_annual,
        }
    }

    /// View of Person 2's parameters.
    pub fn person2(&self) -> PersonParams {
        PersonParams {
            birth_year: self.person2_birth_year,
            salary_start: self.person2_salary_start,
            retire_age: self.person2_retire_age,
            pension_start_age: self.person2_pension_start_age,
            pension_income: self.person2_pension_income,
            medical_start_age: self.person2_medical_start_age,
            medical_annual: self.person2_medical_annual,
        }
    }

    /// Both people, Person 1 first.
    pub fn persons(&self) -> [PersonParams; 2] {
        [self.person1(), self.person2()]
    }

    /// Combined starting salary of both people.
    pub fn household_salary(&self) -> f64 {
        self.person1_salary_start + self.person2_salary_start
    }

    /// Default dual-income Tokyo household used when no plan file is supplied.
    pub fn default_tokyo_household() -> Self {
        Self {
            start_year: 2025,
            years: 50.0,
            initial_asset: 100_000_000.0,
            invest_return: 0.05,
            inflation: 0.02,

            person1_birth_year: 1981,
            person1_salary_start: 12_000_000.0,
            person1_retire_age: 65,
            person1_pension_start_age: 65,
            person1_pension_income: 2_000_000.0,
            person1_medical_start_age: 70,
            person1_medical_annual: 960_000.0,

            person2_birth_year: 1986,
            person2_salary_start: 9_000_000.0,
            person2_retire_age: 65,
            person2_pension_start_age: 65,
            person2_pension_income: 2_000_000.0,
            person2_medical_start_age: 70,
            person2_medical_annual: 960_000.0,

            child1_birth_year: 2019,

            housing_annual_pre: 3_600_000.0,
            housing_annual_post: 0.0,
            living_annual_pre: 4_440_000.0,
            living_annual_post: 3_600_000.0,
            travel_annual: 960_000.0,

            income_tax_rate: 0.30,
            pension_tax_rate: 0.15,
            events_tax_rate: 0.30,
        }
    }
}
