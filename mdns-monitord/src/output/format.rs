use shared::message::{Query, Record, RrType};

use super::highlight::highlight;

/// Top-level bullets are indented two spaces, TXT attribute sub-bullets four.
const BULLET: &str = "  - ";
const TXT_BULLET: &str = "    - ";

/// Render one query as a single bullet line describing what is being asked.
pub fn format_query(query: &Query, color: bool) -> Vec<String> {
    let name = highlight(&query.name, color);
    let line = match query.rtype {
        RrType::A => format!("{BULLET}IPv4 address for {name}"),
        RrType::Aaaa => format!("{BULLET}IPv6 address for {name}"),
        RrType::Any => format!("{BULLET}probing for a record named {name}"),
        RrType::Ptr => format!("{BULLET}services providing {name}"),
        RrType::Srv => format!("{BULLET}service information for {name}"),
        RrType::Txt => format!("{BULLET}TXT record for {name}"),
        RrType::Other(_) => format!("{BULLET}[unknown]"),
    };
    vec![line]
}

/// Render one record, mirroring the shape of its data: an address mapping,
/// an alias mapping, a service-location triple, or a key/value bag.
pub fn format_record(record: &Record, color: bool) -> Vec<String> {
    let name = highlight(&record.name, color);
    match record.rtype {
        RrType::A | RrType::Aaaa => {
            vec![format!("{BULLET}address for {name} is {}", record.address)]
        }
        RrType::Ptr => {
            vec![format!(
                "{BULLET}{} provides {name}",
                highlight(&record.target, color)
            )]
        }
        RrType::Srv => {
            vec![format!(
                "{BULLET}{name} is at {} port {}",
                highlight(&record.target, color),
                highlight(&record.port.to_string(), color),
            )]
        }
        RrType::Txt => {
            let mut lines = vec![format!("{BULLET}{name} has the following data:")];
            for (key, value) in &record.attributes {
                lines.push(format!(
                    "{TXT_BULLET}{}: {}",
                    highlight(key, color),
                    highlight(value, color)
                ));
            }
            lines
        }
        // ANY has no record shape; it only makes sense as a query type.
        RrType::Any | RrType::Other(_) => vec![format!("{BULLET}[unknown]")],
    }
}
