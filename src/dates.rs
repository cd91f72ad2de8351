use chrono::{Local, NaiveDate};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn today_string() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| format!("Invalid date '{value}'. Use YYYY-MM-DD."))
}
