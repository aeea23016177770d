//! Worksheets placed on each dashboard

use crate::error::StructureError;
use crate::reader::Document;
use crate::record::DashboardWorksheetRecord;

/// Extract one record per viewpoint of every dashboard window, in document order.
///
/// Dashboards are `<window>` elements whose class contains `dashboard`. A
/// dashboard window without a name fails the workbook; a viewpoint without a
/// name yields a record with no worksheet name.
pub fn extract_dashboards(
    doc: &Document,
    workbook_name: &str,
) -> Result<Vec<DashboardWorksheetRecord>, StructureError> {
    let mut records = Vec::new();

    let dashboards = doc
        .root()
        .find_all("window")
        .filter(|window| window.has_class("dashboard"));

    for (index, dashboard) in dashboards.enumerate() {
        let dashboard_name = dashboard
            .attr("name")
            .ok_or(StructureError::UnnamedDashboard { index: index + 1 })?;

        for viewpoints in dashboard.find_all("viewpoints") {
            for viewpoint in viewpoints.children_named("viewpoint") {
                records.push(DashboardWorksheetRecord {
                    workbook_name: workbook_name.to_string(),
                    dashboard_name: dashboard_name.to_string(),
                    worksheet_name: viewpoint.attr("name").map(str::to_string),
                });
            }
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Document {
        Document::parse(xml).unwrap()
    }

    #[test]
    fn test_single_dashboard_viewpoint() {
        let doc = parse(
            r#"<workbook><windows>
  <window class="dashboard" maximized="true" name="Overview">
    <viewpoints><viewpoint name="Sheet1"><zoom type="entire-view"/></viewpoint></viewpoints>
  </window>
</windows></workbook>"#,
        );

        let records = extract_dashboards(&doc, "sales.twb").unwrap();
        assert_eq!(
            records,
            vec![DashboardWorksheetRecord {
                workbook_name: "sales.twb".to_string(),
                dashboard_name: "Overview".to_string(),
                worksheet_name: Some("Sheet1".to_string()),
            }]
        );
    }

    #[test]
    fn test_no_dashboards_is_empty() {
        let doc = parse(
            r#"<workbook><windows>
  <window class="worksheet" name="Sheet1"><viewpoints><viewpoint name="x"/></viewpoints></window>
</windows></workbook>"#,
        );
        assert!(extract_dashboards(&doc, "w.twb").unwrap().is_empty());
        assert!(extract_dashboards(&parse("<workbook/>"), "w.twb").unwrap().is_empty());
    }

    #[test]
    fn test_multiple_dashboards_in_order() {
        let doc = parse(
            r#"<windows>
  <window class="dashboard" name="D1">
    <viewpoints><viewpoint name="A"/><viewpoint name="B"/></viewpoints>
  </window>
  <window class="worksheet" name="A"/>
  <window class="dashboard" name="D2">
    <viewpoints><viewpoint name="C"/></viewpoints>
    <viewpoints><viewpoint name="A"/></viewpoints>
  </window>
</windows>"#,
        );

        let pairs: Vec<(String, Option<String>)> = extract_dashboards(&doc, "m.twb")
            .unwrap()
            .into_iter()
            .map(|r| (r.dashboard_name, r.worksheet_name))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("D1".to_string(), Some("A".to_string())),
                ("D1".to_string(), Some("B".to_string())),
                ("D2".to_string(), Some("C".to_string())),
                ("D2".to_string(), Some("A".to_string())),
            ]
        );
    }

    #[test]
    fn test_unnamed_dashboard_is_structure_error() {
        let doc = parse(
            r#"<windows>
  <window class="dashboard" name="Fine"/>
  <window class="dashboard"><viewpoints><viewpoint name="A"/></viewpoints></window>
</windows>"#,
        );
        assert_eq!(
            extract_dashboards(&doc, "u.twb"),
            Err(StructureError::UnnamedDashboard { index: 2 })
        );
    }

    #[test]
    fn test_unnamed_viewpoint_is_absent() {
        let doc = parse(
            r#"<window class="dashboard" name="D"><viewpoints><viewpoint/></viewpoints></window>"#,
        );
        let records = extract_dashboards(&doc, "v.twb").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].worksheet_name, None);
    }
}
