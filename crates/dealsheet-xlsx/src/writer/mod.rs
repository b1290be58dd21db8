//! XLSX writer

mod chart;

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::XlsxResult;
use crate::styles::XlsxStyleTable;
use dealsheet_core::{SheetHost, Workbook, Worksheet};

/// Package part numbers for the sheets that carry charts
#[derive(Debug, Clone, Copy)]
struct DrawingPart {
    sheet_index: usize,
    /// `xl/drawings/drawing{number}.xml`
    number: usize,
    /// Number of this sheet's first `xl/charts/chart{n}.xml`
    first_chart: usize,
    chart_count: usize,
}

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        Self::write(workbook, file)
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        let mut zip = ZipWriter::new(writer);

        let style_table = XlsxStyleTable::build(workbook);
        let drawings = Self::plan_drawings(workbook);
        tracing::debug!(
            sheets = workbook.sheet_count(),
            drawings = drawings.len(),
            "writing xlsx package"
        );

        Self::write_content_types(&mut zip, workbook, &drawings)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, workbook)?;
        Self::write_workbook_rels(&mut zip, workbook)?;
        Self::write_styles_xml(&mut zip, &style_table)?;

        for (i, sheet) in workbook.worksheets().enumerate() {
            let drawing = drawings.iter().find(|d| d.sheet_index == i);
            Self::write_worksheet(&mut zip, sheet, i, drawing.is_some(), &style_table)?;

            if let Some(drawing) = drawing {
                Self::write_worksheet_rels(&mut zip, i, drawing.number)?;
                Self::write_drawing(&mut zip, sheet, drawing)?;
            }
        }

        zip.finish()?;
        Ok(())
    }

    fn plan_drawings(workbook: &Workbook) -> Vec<DrawingPart> {
        let mut parts = Vec::new();
        let mut next_chart = 1;
        for (sheet_index, sheet) in workbook.worksheets().enumerate() {
            let chart_count = sheet.chart_count();
            if chart_count == 0 {
                continue;
            }
            parts.push(DrawingPart {
                sheet_index,
                number: parts.len() + 1,
                first_chart: next_chart,
                chart_count,
            });
            next_chart += chart_count;
        }
        parts
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        workbook: &Workbook,
        drawings: &[DrawingPart],
    ) -> XlsxResult<()> {
        zip.start_file("[Content_Types].xml", SimpleFileOptions::default())?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        for drawing in drawings {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/drawings/drawing{}.xml" ContentType="application/vnd.openxmlformats-officedocument.drawing+xml"/>"#,
                drawing.number
            ));
            for n in drawing.first_chart..drawing.first_chart + drawing.chart_count {
                content.push_str(&format!(
                    r#"
    <Override PartName="/xl/charts/chart{}.xml" ContentType="application/vnd.openxmlformats-officedocument.drawingml.chart+xml"/>"#,
                    n
                ));
            }
        }

        content.push_str("\n</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut ZipWriter<W>) -> XlsxResult<()> {
        zip.start_file("_rels/.rels", SimpleFileOptions::default())?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        zip.start_file("xl/workbook.xml", SimpleFileOptions::default())?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, sheet) in workbook.worksheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape(sheet.name()),
                i + 1,
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        zip.start_file("xl/_rels/workbook.xml.rels", SimpleFileOptions::default())?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        let styles_rid = workbook.sheet_count() + 1;
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            styles_rid
        ));

        content.push_str("\n</Relationships>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_styles_xml<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        style_table: &XlsxStyleTable,
    ) -> XlsxResult<()> {
        zip.start_file("xl/styles.xml", SimpleFileOptions::default())?;
        let xml = style_table.to_styles_xml();
        zip.write_all(xml.as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        sheet: &Worksheet,
        index: usize,
        has_drawing: bool,
        style_table: &XlsxStyleTable,
    ) -> XlsxResult<()> {
        zip.start_file(
            format!("xl/worksheets/sheet{}.xml", index + 1),
            SimpleFileOptions::default(),
        )?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );

        // Cells carry no values, only styles (sparse, row-major)
        let mut current_row: Option<u32> = None;
        content.push_str("\n    <sheetData>");
        for (addr, format) in sheet.formatted_cells() {
            let xf_id = style_table.xf_id_for(format);
            if xf_id == 0 {
                continue;
            }
            if current_row != Some(addr.row) {
                if current_row.is_some() {
                    content.push_str("\n        </row>");
                }
                content.push_str(&format!("\n        <row r=\"{}\">", addr.row + 1));
                current_row = Some(addr.row);
            }
            content.push_str(&format!(
                "\n            <c r=\"{}\" s=\"{}\"/>",
                addr.to_a1_string(),
                xf_id
            ));
        }
        if current_row.is_some() {
            content.push_str("\n        </row>");
        }
        content.push_str("\n    </sheetData>");

        Self::write_conditional_formatting(&mut content, sheet, style_table);

        if has_drawing {
            content.push_str("\n    <drawing r:id=\"rId1\"/>");
        }

        content.push_str("\n</worksheet>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// One `<conditionalFormatting>` per rule; priority follows list order
    fn write_conditional_formatting(
        content: &mut String,
        sheet: &Worksheet,
        style_table: &XlsxStyleTable,
    ) {
        for (rule_idx, rule) in sheet.conditional_formats().iter().enumerate() {
            if rule.ranges.is_empty() {
                continue;
            }

            let sqref = rule
                .ranges
                .iter()
                .map(|r| r.to_a1_string())
                .collect::<Vec<_>>()
                .join(" ");

            let dxf_attr = style_table
                .dxf_id_for(rule.background)
                .map_or(String::new(), |id| format!(" dxfId=\"{}\"", id));

            content.push_str(&format!(
                "\n    <conditionalFormatting sqref=\"{}\">\n        <cfRule type=\"cellIs\"{} priority=\"{}\" operator=\"{}\">",
                sqref,
                dxf_attr,
                rule_idx + 1,
                rule.condition.xlsx_operator()
            ));
            for operand in rule.condition.operands() {
                content.push_str(&format!("\n            <formula>{}</formula>", operand));
            }
            content.push_str("\n        </cfRule>\n    </conditionalFormatting>");
        }
    }

    fn write_worksheet_rels<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        sheet_index: usize,
        drawing_number: usize,
    ) -> XlsxResult<()> {
        zip.start_file(
            format!("xl/worksheets/_rels/sheet{}.xml.rels", sheet_index + 1),
            SimpleFileOptions::default(),
        )?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/drawing" Target="../drawings/drawing{}.xml"/>
</Relationships>"#,
            drawing_number
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_drawing<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        sheet: &Worksheet,
        drawing: &DrawingPart,
    ) -> XlsxResult<()> {
        let charts = sheet.embedded_charts();

        zip.start_file(
            format!("xl/drawings/drawing{}.xml", drawing.number),
            SimpleFileOptions::default(),
        )?;
        zip.write_all(chart::drawing_xml(charts).as_bytes())?;

        zip.start_file(
            format!("xl/drawings/_rels/drawing{}.xml.rels", drawing.number),
            SimpleFileOptions::default(),
        )?;
        zip.write_all(chart::drawing_rels_xml(drawing.first_chart, charts.len()).as_bytes())?;

        for (offset, embedded) in charts.iter().enumerate() {
            let number = drawing.first_chart + offset;
            tracing::trace!(
                sheet = sheet.name(),
                chart = number,
                kind = embedded.chart_type.as_str(),
                "writing chart part"
            );
            zip.start_file(
                format!("xl/charts/chart{}.xml", number),
                SimpleFileOptions::default(),
            )?;
            zip.write_all(chart::chart_xml(embedded).as_bytes())?;
        }

        Ok(())
    }
}
