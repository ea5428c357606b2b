use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};

/// 預設處理日期：本月，格式為 `Jan-2006`
#[must_use]
pub fn default_processing_date() -> String {
    Local::now().format("%b-%Y").to_string()
}

/// 解析原始沖洗日期
///
/// 接受 `Jan-2006`（日期視為 1 日）或 `Jan 2, 2006`
pub fn parse_processing_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(&format!("1-{trimmed}"), "%d-%b-%Y") {
        return Ok(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%b %d, %Y") {
        return Ok(date);
    }

    bail!("Unrecognized date: {raw}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_month_year_form() {
        let date = parse_processing_date("Jan-2024").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 1, 1));
    }

    #[test]
    fn test_month_day_year_form() {
        let date = parse_processing_date("Mar 7, 1998").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (1998, 3, 7));
    }

    #[test]
    fn test_unrecognized_date() {
        let err = parse_processing_date("2024/01/01").unwrap_err();
        assert!(err.to_string().contains("Unrecognized date"));
    }

    #[test]
    fn test_default_round_trips() {
        assert!(parse_processing_date(&default_processing_date()).is_ok());
    }
}
