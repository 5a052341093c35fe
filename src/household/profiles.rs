//! Preset household profiles used to seed the conversational intake

use super::{LifeEvent, Setup};

/// Identifier for a preset profile, ordered from highest household income down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileId {
    /// Dual income, high earner (household income ~13M)
    DualIncomeHigh,
    /// Standard dual-income household (~8M)
    Standard,
    /// Single main earner, modest spending (~7.5M)
    SingleIncome,
}

impl ProfileId {
    /// Pick the preset whose income band contains the given household salary.
    pub fn best_match(household_salary: f64) -> Self {
        if household_salary >= 10_500_000.0 {
            ProfileId::DualIncomeHigh
        } else if household_salary >= 7_800_000.0 {
            ProfileId::Standard
        } else {
            ProfileId::SingleIncome
        }
    }
}

/// A complete preset: setup defaults plus a representative event list.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: ProfileId,
    pub name: &'static str,
    pub description: &'static str,
    pub setup: Setup,
    pub events: Vec<LifeEvent>,
}

impl Profile {
    /// All built-in presets.
    pub fn all() -> Vec<Profile> {
        vec![dual_income_high(), standard(), single_income()]
    }

    /// Look up a preset by id.
    pub fn get(id: ProfileId) -> Profile {
        match id {
            ProfileId::DualIncomeHigh => dual_income_high(),
            ProfileId::Standard => standard(),
            ProfileId::SingleIncome => single_income(),
        }
    }
}

fn base_setup() -> Setup {
    Setup {
        start_year: 2025,
        years: 50.0,
        person1_birth_year: 1985,
        person1_retire_age: 65,
        person1_pension_start_age: 65,
        person1_medical_start_age: 70,
        person2_birth_year: 1987,
        person2_retire_age: 65,
        person2_pension_start_age: 65,
        person2_medical_start_age: 70,
        child1_birth_year: 2021,
        housing_annual_pre: 600_000.0,
        housing_annual_post: 480_000.0,
        ..Setup::default()
    }
}

fn dual_income_high() -> Profile {
    let setup = Setup {
        initial_asset: 2_000_000.0,
        invest_return: 0.05,
        inflation: 0.02,
        person1_salary_start: 7_500_000.0,
        person1_pension_income: 2_000_000.0,
        person1_medical_annual: 840_000.0,
        person2_salary_start: 5_500_000.0,
        person2_pension_income: 2_000_000.0,
        person2_medical_annual: 840_000.0,
        living_annual_pre: 4_200_000.0,
        living_annual_post: 3_600_000.0,
        travel_annual: 1_000_000.0,
        income_tax_rate: 0.25,
        pension_tax_rate: 0.15,
        events_tax_rate: 0.30,
        ..base_setup()
    };
    let events = vec![
        LifeEvent::new(2025, -2_400_000.0, 28, "住宅ローン"),
        LifeEvent::new(2029, -600_000.0, 2, "小学補習"),
        LifeEvent::new(2031, -800_000.0, 3, "中学補習"),
        LifeEvent::new(2034, -1_000_000.0, 3, "高校補習"),
        LifeEvent::new(2038, -1_477_339.0, 1, "私立大学(初年度)"),
        LifeEvent::new(2039, -1_124_476.0, 3, "私立大学(以降)"),
        LifeEvent::new(2027, 3_000_000.0, 13, "P1 中年昇給"),
        LifeEvent::new(2029, 2_000_000.0, 11, "P2 中年昇給"),
        LifeEvent::new(2042, -1_000_000.0, 10, "P1 役職定年減収"),
        LifeEvent::new(2044, -800_000.0, 8, "P2 役職定年減収"),
        LifeEvent::new(2047, -3_000_000.0, 1, "子供結婚支援"),
        LifeEvent::new(2050, -10_000_000.0, 1, "大規模修繕"),
        LifeEvent::new(2052, -5_000_000.0, 1, "世界一周旅行"),
        LifeEvent::new(2067, -3_000_000.0, 8, "P1 介護費用"),
        LifeEvent::new(2069, -3_000_000.0, 6, "P2 介護費用"),
    ];
    Profile {
        id: ProfileId::DualIncomeHigh,
        name: "共働き・高収入",
        description: "世帯年収1300万円、私立教育、都心生活",
        setup,
        events,
    }
}

fn standard() -> Profile {
    let setup = Setup {
        initial_asset: 2_000_000.0,
        invest_return: 0.03,
        inflation: 0.02,
        person1_salary_start: 5_000_000.0,
        person1_pension_income: 1_200_000.0,
        person1_medical_annual: 1_000_000.0,
        person2_salary_start: 3_000_000.0,
        person2_pension_income: 1_200_000.0,
        person2_medical_annual: 1_000_000.0,
        living_annual_pre: 4_500_000.0,
        living_annual_post: 3_600_000.0,
        travel_annual: 600_000.0,
        income_tax_rate: 0.20,
        pension_tax_rate: 0.10,
        events_tax_rate: 0.20,
        ..base_setup()
    };
    let events = vec![
        LifeEvent::new(2025, -1_800_000.0, 30, "住宅ローン"),
        LifeEvent::new(2030, -400_000.0, 3, "中学補習"),
        LifeEvent::new(2033, -600_000.0, 3, "高校補習"),
        LifeEvent::new(2036, -817_800.0, 1, "国立大学(初年度)"),
        LifeEvent::new(2037, -535_800.0, 3, "国立大学(以降)"),
        LifeEvent::new(2042, -2_000_000.0, 10, "P1 役職定年減収"),
        LifeEvent::new(2044, -800_000.0, 8, "P2 役職定年減収"),
        LifeEvent::new(2045, -2_000_000.0, 1, "子供結婚支援"),
        LifeEvent::new(2050, -5_000_000.0, 1, "大規模修繕"),
        LifeEvent::new(2070, -2_000_000.0, 8, "P1 介護費用"),
        LifeEvent::new(2072, -2_000_000.0, 6, "P2 介護費用"),
    ];
    Profile {
        id: ProfileId::Standard,
        name: "標準世帯",
        description: "世帯年収800万円、国立・私立混合、標準的生活",
        setup,
        events,
    }
}

fn single_income() -> Profile {
    let setup = Setup {
        initial_asset: 3_000_000.0,
        invest_return: 0.03,
        inflation: 0.02,
        person1_salary_start: 6_000_000.0,
        person1_pension_income: 1_100_000.0,
        person1_medical_annual: 900_000.0,
        person2_salary_start: 1_500_000.0,
        person2_pension_income: 1_100_000.0,
        person2_medical_annual: 900_000.0,
        living_annual_pre: 4_000_000.0,
        living_annual_post: 3_000_000.0,
        travel_annual: 200_000.0,
        income_tax_rate: 0.20,
        pension_tax_rate: 0.10,
        events_tax_rate: 0.20,
        ..base_setup()
    };
    let events = vec![
        LifeEvent::new(2025, -1_800_000.0, 30, "住宅ローン"),
        LifeEvent::new(2030, -400_000.0, 3, "中学補習"),
        LifeEvent::new(2033, -600_000.0, 3, "高校補習"),
        LifeEvent::new(2036, -1_500_000.0, 1, "私立大学(初年度)"),
        LifeEvent::new(2037, -1_200_000.0, 3, "私立大学(以降)"),
        LifeEvent::new(2042, -1_500_000.0, 10, "P1 役職定年減収"),
        LifeEvent::new(2044, -500_000.0, 8, "P2 役職定年減収"),
        LifeEvent::new(2045, -1_000_000.0, 1, "子供結婚支援"),
        LifeEvent::new(2050, -5_000_000.0, 1, "大規模修繕"),
        LifeEvent::new(2070, -2_500_000.0, 8, "P1 介護費用"),
        LifeEvent::new(2072, -2_500_000.0, 6, "P2 介護費用"),
    ];
    Profile {
        id: ProfileId::SingleIncome,
        name: "片働き・堅実",
        description: "世帯年収750万円、公立中心、堅実な生活",
        setup,
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_match_income_bands() {
        assert_eq!(
            ProfileId::best_match(13_000_000.0),
            ProfileId::DualIncomeHigh
        );
        assert_eq!(ProfileId::best_match(10_500_000.0), ProfileId::DualIncomeHigh);
        assert_eq!(ProfileId::best_match(8_000_000.0), ProfileId::Standard);
        assert_eq!(ProfileId::best_match(7_500_000.0), ProfileId::SingleIncome);
        assert_eq!(ProfileId::best_match(0.0), ProfileId::SingleIncome);
    }

    #[test]
    fn test_all_profiles_well_formed() {
        for profile in Profile::all() {
            assert!(profile.setup.start_year > 0);
            assert!(profile.setup.household_salary() > 0.0);
            assert!(!profile.events.is_empty());
            // Expense-like setup fields are magnitudes
            assert!(profile.setup.living_annual_pre >= 0.0);
            assert!(profile.setup.person1_medical_annual >= 0.0);
        }
    }

    #[test]
    fn test_get_matches_id() {
        for profile in Profile::all() {
            assert_eq!(Profile::get(profile.id).id, profile.id);
        }
    }
}
