use serde_json::Value;

use crate::models::Record;

/// A column: field name and width in characters.
pub type Field = (&'static str, usize);

pub const TIME_ENTRY_FIELDS: &[Field] = &[("id", 4), ("project", 10), ("name", 15), ("real_time", 5)];
pub const ARTICLE_FIELDS: &[Field] = &[("importance", 1), ("title", 15), ("short_description", 40)];

/// One line per record, each followed by a newline.
pub fn render_records(fields: &[Field], records: &[Record]) -> String {
    records
        .iter()
        .map(|record| perform_row(fields, record))
        .collect()
}

pub fn perform_row(fields: &[Field], record: &Record) -> String {
    let cells: Vec<String> = fields
        .iter()
        .map(|&(name, width)| {
            let text = cell_text(record.get(name));
            let truncated: String = text.chars().take(width).collect();
            format!("{truncated:<width$}")
        })
        .collect();
    format!("{}\n", cells.join(" "))
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn exact_fit_has_no_padding() {
        let row = perform_row(&[("name", 5)], &record(json!({"name": "abcdefg"})));
        assert_eq!(row, "abcde\n");
    }

    #[test]
    fn short_values_are_padded() {
        let row = perform_row(&[("name", 5), ("id", 3)], &record(json!({"name": "ab", "id": 7})));
        assert_eq!(row, "ab    7  \n");
    }

    #[test]
    fn missing_and_null_fields_are_blank() {
        let row = perform_row(&[("a", 2), ("b", 2)], &record(json!({"b": null})));
        assert_eq!(row, "     \n");
    }

    #[test]
    fn truncates_by_characters() {
        let row = perform_row(&[("title", 3)], &record(json!({"title": "ñandú"})));
        assert_eq!(row, "ñan\n");
    }

    #[test]
    fn renders_time_entries() {
        let records = vec![
            record(json!({"id": 12, "project": "core", "name": "Review pull requests", "real_time": 1.5})),
            record(json!({"id": 13, "project": "ops", "name": "Deploy", "real_time": "0.25h"})),
        ];
        let text = render_records(TIME_ENTRY_FIELDS, &records);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "12   core       Review pull req 1.5  ");
        assert_eq!(lines[1], "13   ops        Deploy          0.25h");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn empty_record_list_renders_nothing() {
        assert_eq!(render_records(ARTICLE_FIELDS, &[]), "");
    }
}
