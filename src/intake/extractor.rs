//! Declarative field extraction from free-form user input
//!
//! Each extractor pairs a pattern with a normalization rule (unit conversion,
//! year-vs-age disambiguation), so every mapping from text to a setup field is
//! individually testable. Extraction is literal: "月12万" yields 120,000,
//! with no monthly-to-annual guessing here.

use crate::household::Setup;
use regex::Regex;

/// Setup fields the conversational intake can fill from user text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetupField {
    Person1BirthYear,
    Person1Salary,
    Person1RetireAge,
    Person1PensionIncome,
    Person2BirthYear,
    Person2Salary,
    Person2RetireAge,
    Person2PensionIncome,
    Child1BirthYear,
    InitialAsset,
    HousingAnnualPre,
    LivingAnnualPre,
}

impl SetupField {
    /// Key in the persisted flat setup record.
    pub fn key(&self) -> &'static str {
        match self {
            SetupField::Person1BirthYear => "Person1_Birth_Year",
            SetupField::Person1Salary => "Person1_Salary_Start",
            SetupField::Person1RetireAge => "Person1_Retire_Age",
            SetupField::Person1PensionIncome => "Person1_Pension_Income",
            SetupField::Person2BirthYear => "Person2_Birth_Year",
            SetupField::Person2Salary => "Person2_Salary_Start",
            SetupField::Person2RetireAge => "Person2_Retire_Age",
            SetupField::Person2PensionIncome => "Person2_Pension_Income",
            SetupField::Child1BirthYear => "Child1_Birth_Year",
            SetupField::InitialAsset => "Initial_Asset",
            SetupField::HousingAnnualPre => "Housing_Annual_Pre",
            SetupField::LivingAnnualPre => "Living_Annual_Pre",
        }
    }

    /// Short label used when asking the user for a missing value.
    pub fn label(&self) -> &'static str {
        match self {
            SetupField::Person1BirthYear => "あなたの年齢",
            SetupField::Person1Salary => "あなたの年収",
            SetupField::Person1RetireAge => "あなたの退職年齢",
            SetupField::Person1PensionIncome => "あなたの年金収入",
            SetupField::Person2BirthYear => "配偶者の年齢",
            SetupField::Person2Salary => "配偶者の年収",
            SetupField::Person2RetireAge => "配偶者の退職年齢",
            SetupField::Person2PensionIncome => "配偶者の年金収入",
            SetupField::Child1BirthYear => "お子様の年齢",
            SetupField::InitialAsset => "現在の資産",
            SetupField::HousingAnnualPre => "年間住居費",
            SetupField::LivingAnnualPre => "年間生活費",
        }
    }

    /// Write the (normalized) value into the setup record.
    pub fn set(&self, setup: &mut Setup, value: f64) {
        match self {
            SetupField::Person1BirthYear => setup.person1_birth_year = value as i32,
            SetupField::Person1Salary => setup.person1_salary_start = value,
            SetupField::Person1RetireAge => setup.person1_retire_age = value as i32,
            SetupField::Person1PensionIncome => setup.person1_pension_income = value,
            SetupField::Person2BirthYear => setup.person2_birth_year = value as i32,
            SetupField::Person2Salary => setup.person2_salary_start = value,
            SetupField::Person2RetireAge => setup.person2_retire_age = value as i32,
            SetupField::Person2PensionIncome => setup.person2_pension_income = value,
            SetupField::Child1BirthYear => setup.child1_birth_year = value as i32,
            SetupField::InitialAsset => setup.initial_asset = value,
            SetupField::HousingAnnualPre => setup.housing_annual_pre = value,
            SetupField::LivingAnnualPre => setup.living_annual_pre = value,
        }
    }

    /// Read the field back out of a setup record.
    pub fn get(&self, setup: &Setup) -> f64 {
        match self {
            SetupField::Person1BirthYear => setup.person1_birth_year as f64,
            SetupField::Person1Salary => setup.person1_salary_start,
            SetupField::Person1RetireAge => setup.person1_retire_age as f64,
            SetupField::Person1PensionIncome => setup.person1_pension_income,
            SetupField::Person2BirthYear => setup.person2_birth_year as f64,
            SetupField::Person2Salary => setup.person2_salary_start,
            SetupField::Person2RetireAge => setup.person2_retire_age as f64,
            SetupField::Person2PensionIncome => setup.person2_pension_income,
            SetupField::Child1BirthYear => setup.child1_birth_year as f64,
            SetupField::InitialAsset => setup.initial_asset,
            SetupField::HousingAnnualPre => setup.housing_annual_pre,
            SetupField::LivingAnnualPre => setup.living_annual_pre,
        }
    }
}

/// Currency unit suffix captured after a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// 万 = 10,000 yen
    Man,
    /// 億 = 100,000,000 yen
    Oku,
}

impl Unit {
    fn scale(self) -> f64 {
        match self {
            Unit::Man => 10_000.0,
            Unit::Oku => 100_000_000.0,
        }
    }
}

/// How a captured number is turned into a setup field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    /// Values under 100 are ages and convert to a birth year relative to the
    /// session's reference year; larger values are taken as calendar years.
    BirthYear,
    /// Yen amount. An explicit 万/億 suffix scales it; a bare value under
    /// 10,000 is assumed to be in 万 (nobody earns 600 yen a year).
    Amount,
    /// Like `Amount` with a 1,000 threshold, returned as a magnitude.
    CostAmount,
    /// Plain number (ages such as a retirement age).
    Raw,
}

impl Normalizer {
    pub fn apply(&self, value: f64, unit: Option<Unit>, reference_year: i32) -> f64 {
        match self {
            Normalizer::BirthYear => {
                if value < 100.0 {
                    (reference_year as f64) - value
                } else {
                    value
                }
            }
            Normalizer::Amount => match unit {
                Some(u) => value * u.scale(),
                None if value < 10_000.0 => value * 10_000.0,
                None => value,
            },
            Normalizer::CostAmount => {
                let scaled = match unit {
                    Some(u) => value * u.scale(),
                    None if value < 1_000.0 => value * 10_000.0,
                    None => value,
                };
                scaled.abs()
            }
            Normalizer::Raw => value,
        }
    }
}

/// Number capture with an optional currency unit suffix:
/// named groups `value` and `unit`.
const NUMBER: &str = r"(?P<value>\d[\d,.]*)\s*(?P<unit>万|億)?";

/// One pattern-to-field mapping.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    pub field: SetupField,
    pattern: Regex,
    normalizer: Normalizer,
}

impl FieldExtractor {
    /// Keyword-then-number form: `<subject>...<keyword>...<number>[unit]`.
    /// The prefix supplies everything up to the number capture.
    fn keyword(field: SetupField, prefix: &str, normalizer: Normalizer) -> Self {
        Self::from_pattern(field, &format!(r"(?i){prefix}{NUMBER}"), normalizer)
    }

    /// Age form: `<subject>は<number>歳`, the common Japanese phrasing for a
    /// person's current age. The gap between subject and number admits only
    /// particles and age words, so intent phrases such as 「退職は60歳」 or
    /// 「年金は65歳から」 do not read as a current age.
    fn age(field: SetupField, subject: &str) -> Self {
        Self::from_pattern(
            field,
            &format!(
                r"(?i){subject}[はがのでもとに年齢今現在、。,.\s]*?(?P<value>\d{{1,3}})\s*(?:歳|才)"
            ),
            Normalizer::BirthYear,
        )
    }

    fn from_pattern(field: SetupField, pattern: &str, normalizer: Normalizer) -> Self {
        Self {
            field,
            pattern: Regex::new(pattern).expect("valid field pattern"),
            normalizer,
        }
    }

    /// Try to pull this field's value out of the input text.
    pub fn extract(&self, text: &str, reference_year: i32) -> Option<f64> {
        let caps = self.pattern.captures(text)?;
        let raw: f64 = caps
            .name("value")?
            .as_str()
            .replace(',', "")
            .parse()
            .ok()?;
        let unit = caps.name("unit").map(|m| match m.as_str() {
            "億" => Unit::Oku,
            _ => Unit::Man,
        });
        Some(self.normalizer.apply(raw, unit, reference_year))
    }
}

const P1: &str = r"(?:私|本人|夫|旦那|p1)";
const P2: &str = r"(?:配偶者|妻|嫁|奥さん|パートナー|p2)";
const CHILD: &str = r"(?:子供|子|娘|息子)";

/// The standard extractor set covering the fields users volunteer in chat.
///
/// Order matters: for each field the first matching extractor wins, so the
/// age form is tried before the explicit birth-year form.
pub fn standard_extractors() -> Vec<FieldExtractor> {
    use Normalizer::*;
    use SetupField::*;

    vec![
        FieldExtractor::age(Person1BirthYear, P1),
        FieldExtractor::keyword(
            Person1BirthYear,
            &format!(r"{P1}.*?(?:生年|生まれ|birth).*?"),
            BirthYear,
        ),
        FieldExtractor::keyword(
            Person1Salary,
            r"(?:私|本人|夫|旦那|p1|年収|給与).*?(?:年収|給与|手取り).*?",
            Amount,
        ),
        FieldExtractor::keyword(
            Person1RetireAge,
            &format!(r"{P1}.*?(?:退職|引退|リタイア).*?"),
            Raw,
        ),
        FieldExtractor::keyword(
            Person1PensionIncome,
            &format!(r"{P1}.*?(?:年金|国民年金|厚生年金).*?"),
            Amount,
        ),
        FieldExtractor::age(Person2BirthYear, P2),
        FieldExtractor::keyword(
            Person2BirthYear,
            &format!(r"{P2}.*?(?:生年|生まれ|birth).*?"),
            BirthYear,
        ),
        FieldExtractor::keyword(
            Person2Salary,
            &format!(r"{P2}.*?(?:年収|給与).*?"),
            Amount,
        ),
        FieldExtractor::keyword(
            Person2RetireAge,
            &format!(r"{P2}.*?(?:退職|引退|リタイア).*?"),
            Raw,
        ),
        FieldExtractor::keyword(
            Person2PensionIncome,
            &format!(r"{P2}.*?(?:年金|国民年金|厚生年金).*?"),
            Amount,
        ),
        FieldExtractor::age(Child1BirthYear, CHILD),
        FieldExtractor::keyword(
            Child1BirthYear,
            &format!(r"{CHILD}.*?(?:生年|生まれ|birth).*?"),
            BirthYear,
        ),
        FieldExtractor::keyword(InitialAsset, r"(?:資産|貯金|貯蓄).*?", Amount),
        FieldExtractor::keyword(HousingAnnualPre, r"(?:住居|家賃|ローン).*?", CostAmount),
        FieldExtractor::keyword(LivingAnnualPre, r"(?:生活|食費|光熱).*?", CostAmount),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor_for(field: SetupField) -> FieldExtractor {
        standard_extractors()
            .into_iter()
            .find(|e| e.field == field)
            .unwrap()
    }

    #[test]
    fn test_birth_year_from_age() {
        let ex = extractor_for(SetupField::Person1BirthYear);
        assert_eq!(ex.extract("私は35歳です", 2025), Some(1990.0));
    }

    #[test]
    fn test_birth_year_explicit() {
        let ex = standard_extractors()
            .into_iter()
            .filter(|e| e.field == SetupField::Person1BirthYear)
            .nth(1)
            .unwrap();
        assert_eq!(ex.extract("本人の生まれは1985年", 2025), Some(1985.0));
    }

    #[test]
    fn test_salary_with_man_suffix() {
        let ex = extractor_for(SetupField::Person1Salary);
        assert_eq!(ex.extract("私の年収は600万円", 2025), Some(6_000_000.0));
    }

    #[test]
    fn test_salary_bare_value_assumed_man() {
        let ex = extractor_for(SetupField::Person1Salary);
        assert_eq!(ex.extract("本人の年収は600です", 2025), Some(6_000_000.0));
    }

    #[test]
    fn test_salary_full_yen_value() {
        let ex = extractor_for(SetupField::Person1Salary);
        assert_eq!(ex.extract("私の年収は6,000,000円", 2025), Some(6_000_000.0));
    }

    #[test]
    fn test_asset_with_oku_suffix() {
        let ex = extractor_for(SetupField::InitialAsset);
        assert_eq!(ex.extract("資産は1.5億あります", 2025), Some(150_000_000.0));
    }

    #[test]
    fn test_spouse_fields_are_separate() {
        let p1 = extractor_for(SetupField::Person1Salary);
        let p2 = extractor_for(SetupField::Person2Salary);
        let text = "妻の年収は400万";

        assert_eq!(p1.extract(text, 2025), None);
        assert_eq!(p2.extract(text, 2025), Some(4_000_000.0));
    }

    #[test]
    fn test_retire_age_raw() {
        let ex = extractor_for(SetupField::Person1RetireAge);
        assert_eq!(ex.extract("私の退職は60歳の予定", 2025), Some(60.0));
    }

    #[test]
    fn test_retire_phrase_is_not_a_current_age() {
        // 「退職は60歳」 names a planned age, not how old the person is now
        let ex = extractor_for(SetupField::Person1BirthYear);
        assert_eq!(ex.extract("私の退職は60歳の予定", 2025), None);
        assert_eq!(ex.extract("私の年金は65歳から", 2025), None);
    }

    #[test]
    fn test_cost_extraction_is_literal() {
        let ex = extractor_for(SetupField::HousingAnnualPre);
        assert_eq!(ex.extract("家賃は月12万くらい", 2025), Some(120_000.0));
    }

    #[test]
    fn test_no_match_returns_none() {
        let ex = extractor_for(SetupField::Person1Salary);
        assert_eq!(ex.extract("こんにちは", 2025), None);
    }
}
