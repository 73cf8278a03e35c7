//! Decoders for the two row formats a source can serve.

use anyhow::{Context, Result, bail};

use crate::model::JourneyRow;

/// Decodes JSON bytes into journey rows.
///
/// Accepts either a bare array of row objects or the `{"data": [...]}`
/// envelope some deployments of the rows endpoint wrap around it.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON or the rows are
/// missing required columns.
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<JourneyRow>> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).context("response is not valid JSON")?;

    let rows = match value {
        serde_json::Value::Array(_) => value,
        serde_json::Value::Object(ref map) if map.contains_key("data") => {
            map["data"].clone()
        }
        _ => bail!("expected a JSON array of rows or a {{\"data\": [...]}} envelope"),
    };

    serde_json::from_value(rows).context("rows do not match the journey row schema")
}

/// Decodes CSV bytes (with a header row) into journey rows.
pub fn parse_rows_csv(bytes: &[u8]) -> Result<Vec<JourneyRow>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut rows = Vec::new();

    for result in reader.deserialize() {
        let row: JourneyRow = result.context("malformed CSV row")?;
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW_JSON: &str = r#"{
        "journey_id": 1,
        "train_id": "101",
        "train_name": "Coastal Express",
        "departure_city": "Northport",
        "arrival_city": "Kingsbridge",
        "journey_date": "2024-03-15",
        "class": "Second",
        "scheduled_time": "08:30:00",
        "is_delayed": false,
        "default_delay_minutes": 10,
        "total_seats": 320,
        "reserved_seats": 256,
        "revenue": 4864.0
    }"#;

    #[test]
    fn test_parse_bare_array() {
        let body = format!("[{ROW_JSON}]");
        let rows = parse_rows(body.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].train_id, "101");
    }

    #[test]
    fn test_parse_data_envelope() {
        let body = format!("{{\"data\": [{ROW_JSON}]}}");
        let rows = parse_rows(body.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_parse_empty_array() {
        let rows = parse_rows(b"[]").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_invalid_json_fails() {
        assert!(parse_rows(b"not json").is_err());
    }

    #[test]
    fn test_parse_wrong_shape_fails() {
        assert!(parse_rows(b"{\"rows\": []}").is_err());
        assert!(parse_rows(b"42").is_err());
    }

    #[test]
    fn test_parse_csv() {
        let csv = "\
journey_id,train_id,train_name,departure_city,arrival_city,journey_date,class,scheduled_time,is_delayed,default_delay_minutes,total_seats,reserved_seats,revenue
1,101,Coastal Express,Northport,Kingsbridge,2024-03-15,Second,08:30:00,false,10,320,256,4864.0
2,102,Highland Flyer,Kingsbridge,Westmere,2024-07-22,First,09:15:00,true,12,280,210,6300.0
";
        let rows = parse_rows_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(!rows[0].is_delayed);
        assert!(rows[1].is_delayed);
        assert_eq!(rows[1].default_delay_minutes, 12);
    }

    #[test]
    fn test_parse_csv_missing_column_fails() {
        let csv = "journey_id,train_id\n1,101\n";
        assert!(parse_rows_csv(csv.as_bytes()).is_err());
    }
}
