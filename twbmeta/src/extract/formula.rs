//! Calculation formula lookup on datasource columns

use crate::reader::XmlNode;

/// Formula of the column's calculation, with `\r\n` collapsed to a single space.
///
/// Returns `None` when the column has no `<calculation>` element or the
/// calculation carries no `formula` attribute.
pub fn extract_formula(column: &XmlNode) -> Option<String> {
    let calculation = column.find("calculation")?;
    let formula = calculation.attr("formula")?;
    Some(formula.replace("\r\n", " "))
}

/// Strip the `[` `]` decoration around a column identifier
pub fn strip_brackets(name: &str) -> &str {
    name.trim_matches(|c| c == '[' || c == ']')
}
