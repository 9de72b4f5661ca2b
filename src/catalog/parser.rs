use crate::catalog::error::CatalogError;
use crate::catalog::types::ElementSet;

/// Parse raw catalog text into element sets.
///
/// The feed groups records in fixed triples: name line, TLE line 1, TLE
/// line 2. A line starts a record iff its index is a multiple of three.
/// Name lines that are blank after trimming are skipped, which tolerates
/// trailing blank lines; a record cut off before both TLE lines is a
/// malformed catalog, never a silently short record. Output order matches
/// input order, and empty input yields an empty list.
pub fn parse_catalog(raw: &str) -> Result<Vec<ElementSet>, CatalogError> {
    let lines: Vec<&str> = raw.split('\n').collect();
    let mut sets = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if index % 3 != 0 {
            continue;
        }
        let name = line.trim();
        if name.is_empty() {
            continue;
        }

        let truncated = || CatalogError::Truncated {
            name: name.to_string(),
            line: index,
        };
        let line1 = lines.get(index + 1).ok_or_else(truncated)?;
        let line2 = lines.get(index + 2).ok_or_else(truncated)?;

        sets.push(ElementSet {
            name: name.to_string(),
            line1: line1.trim().to_string(),
            line2: line2.trim().to_string(),
        });
    }

    Ok(sets)
}
