//! pt-BR display helpers.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// `R$ 1.234,56`. Rounds to cents.
pub fn currency_brl(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let int = (cents / 100).to_string();

    let mut grouped = String::new();
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{}R$ {},{:02}", sign, grouped, cents % 100)
}

/// `dd/mm/yyyy` from a date, naive datetime or RFC 3339 timestamp.
pub fn date_br(raw: &str) -> Result<String, chrono::ParseError> {
    let raw = raw.trim();
    let date = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            Ok(dt) => dt.date(),
            Err(_) => DateTime::parse_from_rfc3339(raw)?.date_naive(),
        },
    };
    Ok(date.format("%d/%m/%Y").to_string())
}

/// `HH:MM` from `HH:MM:SS`.
pub fn time_hm(raw: &str) -> String {
    raw.chars().take(5).collect()
}

#[cfg(test)]
mod tests {
    use super::{currency_brl, date_br, time_hm};

    #[test]
    fn currency_uses_brazilian_separators() {
        assert_eq!(currency_brl(1234.5), "R$ 1.234,50");
        assert_eq!(currency_brl(0.0), "R$ 0,00");
        assert_eq!(currency_brl(999.999), "R$ 1.000,00");
        assert_eq!(currency_brl(1234567.891), "R$ 1.234.567,89");
        assert_eq!(currency_brl(-12.3), "-R$ 12,30");
    }

    #[test]
    fn dates_render_day_first() {
        assert_eq!(date_br("2024-03-09").expect("date"), "09/03/2024");
        assert_eq!(date_br("2024-03-09T14:30:00").expect("datetime"), "09/03/2024");
        assert_eq!(
            date_br("2024-03-09T14:30:00-03:00").expect("rfc3339"),
            "09/03/2024"
        );
        assert!(date_br("09/03/2024").is_err());
    }

    #[test]
    fn time_drops_seconds() {
        assert_eq!(time_hm("14:30:00"), "14:30");
        assert_eq!(time_hm("9:00"), "9:00");
    }
}
