use std::path::Path;

use hashbrown::HashMap;

use super::{HistoricalContact, HistoryError};

/// Reads every contact from the ADIF log at `path`.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<HistoricalContact>, HistoryError> {
    let path = path.as_ref();
    let raw = std::fs::read(path).map_err(|source| HistoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bytes(&raw)
}

/// Parses ADIF text.
pub fn parse_str(text: &str) -> Result<Vec<HistoricalContact>, HistoryError> {
    parse_bytes(text.as_bytes())
}

/// Parses ADIF bytes. Field lengths count bytes; values are decoded lossily.
///
/// A log whose first byte after any BOM and leading whitespace is not `<`
/// has a free-text header ending at `<EOH>`; a header that is never closed
/// although fields follow it is an error. Each record ends at `<EOR>`;
/// trailing fields without one are dropped.
pub fn parse_bytes(bytes: &[u8]) -> Result<Vec<HistoricalContact>, HistoryError> {
    let start = content_start(bytes);
    let mut in_header = bytes.get(start) != Some(&b'<');
    let mut header_fields = 0usize;
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut out = Vec::new();
    let mut pos = start;

    while let Some(rel) = bytes[pos..].iter().position(|&b| b == b'<') {
        let open = pos + rel;
        let close = bytes[open..]
            .iter()
            .position(|&b| b == b'>')
            .map(|r| open + r)
            .ok_or(HistoryError::Malformed {
                offset: open,
                reason: "unterminated data specifier",
            })?;
        pos = close + 1;

        let spec = String::from_utf8_lossy(&bytes[open + 1..close]);
        let mut parts = spec.split(':');
        let name = parts.next().unwrap_or_default().trim().to_ascii_uppercase();

        match name.as_str() {
            "EOH" => {
                in_header = false;
                fields.clear();
                continue;
            }
            "EOR" => {
                if !in_header && !fields.is_empty() {
                    out.push(take_contact(&mut fields));
                }
                continue;
            }
            _ => {}
        }

        let Some(len) = parts.next() else {
            continue;
        };
        let len: usize = len.trim().parse().map_err(|_| HistoryError::Malformed {
            offset: open,
            reason: "bad field length",
        })?;
        let end = pos + len;
        if end > bytes.len() {
            return Err(HistoryError::Malformed {
                offset: open,
                reason: "field value runs past end of log",
            });
        }

        if in_header {
            header_fields += 1;
        } else {
            let value = String::from_utf8_lossy(&bytes[pos..end]).into_owned();
            fields.insert(name, value);
        }
        pos = end;
    }

    if in_header && header_fields > 0 {
        return Err(HistoryError::Malformed {
            offset: start,
            reason: "missing <EOH>",
        });
    }
    Ok(out)
}

const BOM: &[u8] = b"\xEF\xBB\xBF";

fn content_start(bytes: &[u8]) -> usize {
    let body = bytes.strip_prefix(BOM).unwrap_or(bytes);
    let skipped = body.iter().take_while(|b| b.is_ascii_whitespace()).count();
    bytes.len() - body.len() + skipped
}

fn take_contact(fields: &mut HashMap<String, String>) -> HistoricalContact {
    let mut take = |key: &str| fields.remove(key).unwrap_or_default();
    let contact = HistoricalContact {
        call: take("CALL"),
        mode: take("MODE"),
        band: take("BAND"),
        qso_date: take("QSO_DATE"),
    };
    fields.clear();
    contact
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "WSJT-X ADIF Export<eoh>\n\
        <call:4>W1AW <gridsquare:4>FN31 <mode:3>FT8 <qso_date:8>20240301 <band:3>20m <eor>\n\
        <call:5>K1ABC <mode:2>CW <qso_date:8>20231231 <eor>\n";

    #[test]
    fn reads_records_after_header() {
        let contacts = parse_str(LOG).unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(
            contacts[0],
            HistoricalContact {
                call: "W1AW".into(),
                mode: "FT8".into(),
                band: "20m".into(),
                qso_date: "20240301".into(),
            }
        );
        assert_eq!(contacts[1].band, "");
    }

    #[test]
    fn headerless_log_starts_with_first_field() {
        let contacts = parse_str("<CALL:4>N0AX<QSO_DATE:8>20240101<EOR>").unwrap();
        assert_eq!(contacts[0].call, "N0AX");
    }

    #[test]
    fn byte_order_mark_and_blank_lines_do_not_start_a_header() {
        let body = "<CALL:4>W1AW<MODE:3>FT8<BAND:3>20m<QSO_DATE:8>20240101<EOR>";
        for text in [format!("\u{feff}{body}"), format!("\n\r\n{body}"), format!("\u{feff} \n{body}")] {
            let contacts = parse_str(&text).unwrap();
            assert_eq!(contacts.len(), 1, "{text:?}");
            assert_eq!(contacts[0].call, "W1AW");
        }
    }

    #[test]
    fn unterminated_header_is_an_error() {
        let err = parse_str("Exported by logger\n<CALL:4>W1AW<QSO_DATE:8>20240101<EOR>").unwrap_err();
        assert!(matches!(err, HistoryError::Malformed { reason: "missing <EOH>", .. }));
    }

    #[test]
    fn header_only_log_is_empty() {
        assert!(parse_str("Nothing logged yet\n").unwrap().is_empty());
        assert!(parse_str("").unwrap().is_empty());
    }

    #[test]
    fn truncated_value_is_an_error() {
        let err = parse_str("<CALL:10>N0AX").unwrap_err();
        assert!(matches!(err, HistoryError::Malformed { offset: 0, .. }));
    }
}
