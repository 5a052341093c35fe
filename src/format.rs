//! Plain-text formatting for yen amounts and rates

/// Format a yen amount with 億/万 abbreviations: `¥1.25億`, `¥960万`, `¥5,000`.
pub fn format_yen(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    if abs >= 100_000_000.0 {
        format!("{}¥{:.2}億", sign, abs / 100_000_000.0)
    } else if abs >= 10_000.0 {
        format!("{}¥{:.0}万", sign, abs / 10_000.0)
    } else {
        format!("{}¥{}", sign, group_thousands(abs.round() as u64))
    }
}

/// Format a fractional rate as a percentage with one decimal: `0.05` → `5.0%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn group_thousands(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut groups = Vec::new();
    while value > 0 {
        groups.push(value % 1000);
        value /= 1000;
    }
    groups
        .iter()
        .rev()
        .enumerate()
        .map(|(i, g)| {
            if i == 0 {
                g.to_string()
            } else {
                format!("{:03}", g)
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_yen_oku() {
        assert_eq!(format_yen(125_000_000.0), "¥1.25億");
        assert_eq!(format_yen(-125_000_000.0), "-¥1.25億");
    }

    #[test]
    fn test_format_yen_man() {
        assert_eq!(format_yen(9_600_000.0), "¥960万");
        assert_eq!(format_yen(-40_000_000.0), "-¥4000万");
    }

    #[test]
    fn test_format_yen_small() {
        assert_eq!(format_yen(5_000.0), "¥5,000");
        assert_eq!(format_yen(0.0), "¥0");
        assert_eq!(format_yen(123.0), "¥123");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.05), "5.0%");
        assert_eq!(format_percent(0.3), "30.0%");
        assert_eq!(format_percent(0.015), "1.5%");
    }
}
