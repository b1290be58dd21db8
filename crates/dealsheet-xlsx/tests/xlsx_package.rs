//! Package-level tests: write a workbook and inspect the parts with zip

use std::io::{Cursor, Read};

use dealsheet_core::{
    CellRange, Chart, ChartPosition, ChartType, Color, ConditionalFormatRule, GaugeOptions,
    NumberFormat, SheetHost, SourceRange, Workbook,
};
use dealsheet_xlsx::XlsxWriter;
use pretty_assertions::assert_eq;

fn range(a1: &str) -> CellRange {
    CellRange::parse(a1).unwrap()
}

fn write(wb: &Workbook) -> Vec<u8> {
    let mut buf = Vec::new();
    XlsxWriter::write(wb, Cursor::new(&mut buf)).unwrap();
    buf
}

fn part(buf: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(buf)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

fn part_names(buf: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(buf)).unwrap();
    let mut names: Vec<String> = archive.file_names().map(String::from).collect();
    names.sort();
    names
}

fn formatted_workbook() -> Workbook {
    let mut wb = Workbook::new();
    wb.add_worksheet("Main").unwrap();
    wb.add_worksheet("Dashboard").unwrap();

    let main = wb.worksheet_mut(0).unwrap();
    main.set_number_format(&range("B4:B5"), &NumberFormat::currency())
        .unwrap();
    main.set_number_format(&range("B13"), &NumberFormat::percent())
        .unwrap();
    main.set_background(&range("B4"), Color::from_hex("#e6f2ff").unwrap())
        .unwrap();
    main.add_conditional_format(
        ConditionalFormatRule::number_greater_than(0.0)
            .with_ranges(vec![range("B31"), range("C48:C52")])
            .with_background(Color::from_hex("#b7e1cd").unwrap()),
    );
    main.add_conditional_format(
        ConditionalFormatRule::number_between(1.0, 1.25)
            .with_range(range("B34"))
            .with_background(Color::from_hex("#fce8b2").unwrap()),
    );
    wb
}

#[test]
fn test_minimal_package_parts() {
    let mut wb = Workbook::new();
    wb.add_worksheet("Main").unwrap();
    let buf = write(&wb);

    assert_eq!(
        part_names(&buf),
        vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/workbook.xml",
            "xl/worksheets/sheet1.xml",
        ]
    );
    let workbook = part(&buf, "xl/workbook.xml");
    assert!(workbook.contains(r#"<sheet name="Main" sheetId="1" r:id="rId1"/>"#));
}

#[test]
fn test_style_only_cells_are_written() {
    let buf = write(&formatted_workbook());
    let sheet = part(&buf, "xl/worksheets/sheet1.xml");

    assert!(sheet.contains("<row r=\"4\">"));
    assert!(sheet.contains("<c r=\"B4\" s="));
    assert!(sheet.contains("<c r=\"B5\" s="));
    assert!(sheet.contains("<c r=\"B13\" s="));
    // Dashboard has nothing to write
    let dashboard = part(&buf, "xl/worksheets/sheet2.xml");
    assert!(dashboard.contains("<sheetData>\n    </sheetData>"));

    let styles = part(&buf, "xl/styles.xml");
    assert!(styles.contains("formatCode=\"$#,##0.00\""));
    assert!(styles.contains("<fgColor rgb=\"FFE6F2FF\"/>"));
}

#[test]
fn test_conditional_formatting_blocks() {
    let buf = write(&formatted_workbook());
    let sheet = part(&buf, "xl/worksheets/sheet1.xml");

    assert!(sheet.contains(r#"<conditionalFormatting sqref="B31 C48:C52">"#));
    assert!(sheet.contains(
        r#"<cfRule type="cellIs" dxfId="0" priority="1" operator="greaterThan">"#
    ));
    assert!(sheet.contains(
        r#"<cfRule type="cellIs" dxfId="1" priority="2" operator="between">"#
    ));
    assert!(sheet.contains("<formula>1</formula>\n            <formula>1.25</formula>"));

    let styles = part(&buf, "xl/styles.xml");
    assert!(styles.contains("<dxfs count=\"2\">"));
    assert!(styles.contains("<bgColor rgb=\"FFFCE8B2\"/>"));
}

#[test]
fn test_charts_get_drawing_and_chart_parts() {
    let mut wb = formatted_workbook();
    let dashboard = wb.worksheet_mut(1).unwrap();
    dashboard
        .insert_chart(
            Chart::new(ChartType::Line)
                .add_range(SourceRange::new("Main", range("A56:A59")))
                .add_range(SourceRange::new("Main", range("B56:C59")))
                .with_position(ChartPosition::new(15, 5, 0, 0))
                .with_title("Property Value Projection by Appreciation Rate")
                .with_size(500, 300),
        )
        .unwrap();
    dashboard
        .insert_chart(
            Chart::new(ChartType::Gauge)
                .add_range(SourceRange::new("Main", range("A43")))
                .add_range(SourceRange::new("Main", range("B43")))
                .with_position(ChartPosition::new(45, 3, 0, 0))
                .with_title("Return on Investment")
                .with_size(400, 200),
        )
        .unwrap();
    let buf = write(&wb);

    let names = part_names(&buf);
    for expected in [
        "xl/worksheets/_rels/sheet2.xml.rels",
        "xl/drawings/drawing1.xml",
        "xl/drawings/_rels/drawing1.xml.rels",
        "xl/charts/chart1.xml",
        "xl/charts/chart2.xml",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing {expected}");
    }
    assert!(!names.iter().any(|n| n == "xl/worksheets/_rels/sheet1.xml.rels"));

    let sheet = part(&buf, "xl/worksheets/sheet2.xml");
    assert!(sheet.contains("<drawing r:id=\"rId1\"/>"));

    let types = part(&buf, "[Content_Types].xml");
    assert!(types.contains("/xl/charts/chart2.xml"));
    assert!(types.contains("/xl/drawings/drawing1.xml"));

    let drawing = part(&buf, "xl/drawings/drawing1.xml");
    assert_eq!(drawing.matches("<xdr:oneCellAnchor>").count(), 2);
    assert!(drawing.contains("<xdr:ext cx=\"3810000\" cy=\"1905000\"/>"));

    let line = part(&buf, "xl/charts/chart1.xml");
    assert!(line.contains("<c:lineChart>"));
    assert_eq!(line.matches("<c:ser>").count(), 2);
    assert!(line.contains("<c:f>'Main'!$C$56:$C$59</c:f>"));

    let gauge = part(&buf, "xl/charts/chart2.xml");
    assert!(gauge.contains("<c:doughnutChart>"));
    assert!(gauge.contains("<c:firstSliceAng val=\"270\"/>"));
    assert!(!gauge.contains("<c:legend>"));
}

#[test]
fn test_gauge_bands_in_chart_part() {
    let mut wb = Workbook::new();
    wb.add_worksheet("Main").unwrap();
    let mut chart = Chart::new(ChartType::Gauge)
        .add_range(SourceRange::new("Main", range("A43")))
        .add_range(SourceRange::new("Main", range("B43")));
    chart.options.gauge = Some(
        GaugeOptions::new(0.0, 30.0)
            .with_red(0.0, 5.0)
            .with_yellow(5.0, 15.0)
            .with_green(15.0, 30.0),
    );
    wb.worksheet_mut(0).unwrap().insert_chart(chart).unwrap();
    let buf = write(&wb);

    let gauge = part(&buf, "xl/charts/chart1.xml");
    assert!(gauge.contains("<c:ptCount val=\"4\"/>"));
    assert!(gauge.contains("<c:pt idx=\"0\"><c:v>5</c:v></c:pt>"));
    assert!(gauge.contains("<c:pt idx=\"1\"><c:v>10</c:v></c:pt>"));
    assert!(gauge.contains("<c:pt idx=\"2\"><c:v>15</c:v></c:pt>"));
    assert!(gauge.contains("<c:pt idx=\"3\"><c:v>30</c:v></c:pt>"));
    assert!(gauge.contains("<a:srgbClr val=\"DC3912\"/>"));
}

#[test]
fn test_write_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deal.xlsx");
    XlsxWriter::write_file(&formatted_workbook(), &path).unwrap();
    let buf = std::fs::read(&path).unwrap();
    assert!(part(&buf, "xl/worksheets/sheet1.xml").contains("conditionalFormatting"));
}
