//! styles.xml generation

use ahash::AHashMap;
use quick_xml::escape::escape;

use dealsheet_core::style::{CellFormat, Color, NumberFormat};
use dealsheet_core::Workbook;

/// First id available for custom number formats
const FIRST_CUSTOM_NUMFMT_ID: u32 = 164;

#[derive(Debug)]
pub(crate) struct XlsxStyleTable {
    /// Deduplicated cell formats. Index is the cellXfs index; 0 is the default.
    formats: Vec<CellFormat>,
    xf_ids: AHashMap<CellFormat, u32>,
    /// Conditional-format backgrounds. Index is the dxf id.
    dxf_fills: Vec<Color>,
    dxf_ids: AHashMap<Color, u32>,
}

#[derive(Debug, Clone, Copy)]
struct ResolvedXfIds {
    fill_id: u32,
    num_fmt_id: u32,
}

impl XlsxStyleTable {
    pub(crate) fn build(workbook: &Workbook) -> Self {
        let mut table = Self {
            formats: vec![CellFormat::default()],
            xf_ids: AHashMap::new(),
            dxf_fills: Vec::new(),
            dxf_ids: AHashMap::new(),
        };
        table.xf_ids.insert(CellFormat::default(), 0);

        for sheet in workbook.worksheets() {
            for (_, format) in sheet.formatted_cells() {
                if !table.xf_ids.contains_key(format) {
                    let id = table.formats.len() as u32;
                    table.formats.push(format.clone());
                    table.xf_ids.insert(format.clone(), id);
                }
            }

            for color in sheet
                .conditional_formats()
                .iter()
                .filter_map(|rule| rule.background)
            {
                if !table.dxf_ids.contains_key(&color) {
                    let id = table.dxf_fills.len() as u32;
                    table.dxf_fills.push(color);
                    table.dxf_ids.insert(color, id);
                }
            }
        }

        table
    }

    pub(crate) fn xf_id_for(&self, format: &CellFormat) -> u32 {
        self.xf_ids.get(format).copied().unwrap_or(0)
    }

    pub(crate) fn dxf_id_for(&self, background: Option<Color>) -> Option<u32> {
        background.and_then(|color| self.dxf_ids.get(&color).copied())
    }

    pub(crate) fn xf_count(&self) -> usize {
        self.formats.len()
    }

    pub(crate) fn dxf_count(&self) -> usize {
        self.dxf_fills.len()
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        // Excel requires the first two fills to be none and gray125
        let mut fills: Vec<Color> = Vec::new();
        let mut fill_ids: AHashMap<Color, u32> = AHashMap::new();

        let mut numfmts: Vec<(u32, String)> = Vec::new();
        let mut numfmt_ids: AHashMap<String, u32> = AHashMap::new();
        let mut next_numfmt_id = FIRST_CUSTOM_NUMFMT_ID;

        let mut resolved: Vec<ResolvedXfIds> = Vec::with_capacity(self.formats.len());
        for format in &self.formats {
            let fill_id = match format.background {
                None => 0,
                Some(color) => *fill_ids.entry(color).or_insert_with(|| {
                    fills.push(color);
                    fills.len() as u32 + 1
                }),
            };

            let num_fmt_id = match &format.number_format {
                None | Some(NumberFormat::General) => 0,
                Some(nf) => match nf.builtin_id() {
                    Some(id) => id,
                    None => {
                        let code = nf.code().to_string();
                        *numfmt_ids.entry(code.clone()).or_insert_with(|| {
                            let id = next_numfmt_id;
                            next_numfmt_id += 1;
                            numfmts.push((id, code));
                            id
                        })
                    }
                },
            };

            resolved.push(ResolvedXfIds {
                fill_id,
                num_fmt_id,
            });
        }

        let mut xml = String::new();
        xml.push_str(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if !numfmts.is_empty() {
            xml.push_str(&format!("\n  <numFmts count=\"{}\">", numfmts.len()));
            for (id, code) in &numfmts {
                xml.push_str(&format!(
                    "\n    <numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                    id,
                    escape(code.as_str())
                ));
            }
            xml.push_str("\n  </numFmts>");
        }

        xml.push_str(
            r#"
  <fonts count="1">
    <font><sz val="11"/><name val="Calibri"/></font>
  </fonts>"#,
        );

        xml.push_str(&format!("\n  <fills count=\"{}\">", fills.len() + 2));
        xml.push_str("\n    <fill><patternFill patternType=\"none\"/></fill>");
        xml.push_str("\n    <fill><patternFill patternType=\"gray125\"/></fill>");
        for color in &fills {
            xml.push_str("\n    ");
            xml.push_str(&write_solid_fill(color));
        }
        xml.push_str("\n  </fills>");

        xml.push_str(
            r#"
  <borders count="1">
    <border><left/><right/><top/><bottom/><diagonal/></border>
  </borders>
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", resolved.len()));
        for ids in &resolved {
            xml.push_str("\n    ");
            xml.push_str(&write_xf(*ids));
        }
        xml.push_str("\n  </cellXfs>");

        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>"#,
        );

        if self.dxf_fills.is_empty() {
            xml.push_str("\n  <dxfs count=\"0\"/>");
        } else {
            xml.push_str(&format!("\n  <dxfs count=\"{}\">", self.dxf_fills.len()));
            for color in &self.dxf_fills {
                xml.push_str("\n    ");
                xml.push_str(&write_dxf(color));
            }
            xml.push_str("\n  </dxfs>");
        }

        xml.push_str(
            r#"
  <tableStyles count="0" defaultTableStyle="TableStyleMedium9" defaultPivotStyle="PivotStyleLight16"/>"#,
        );
        xml.push_str("\n</styleSheet>");
        xml
    }
}

fn write_solid_fill(color: &Color) -> String {
    format!(
        "<fill><patternFill patternType=\"solid\"><fgColor rgb=\"{}\"/><bgColor indexed=\"64\"/></patternFill></fill>",
        color.to_argb_hex()
    )
}

fn write_xf(ids: ResolvedXfIds) -> String {
    let mut attrs = String::new();
    if ids.num_fmt_id != 0 {
        attrs.push_str(" applyNumberFormat=\"1\"");
    }
    if ids.fill_id != 0 {
        attrs.push_str(" applyFill=\"1\"");
    }
    format!(
        "<xf numFmtId=\"{}\" fontId=\"0\" fillId=\"{}\" borderId=\"0\" xfId=\"0\"{}/>",
        ids.num_fmt_id, ids.fill_id, attrs
    )
}

/// Differential fills put the colour in bgColor
fn write_dxf(color: &Color) -> String {
    format!(
        "<dxf><fill><patternFill patternType=\"solid\"><bgColor rgb=\"{}\"/></patternFill></fill></dxf>",
        color.to_argb_hex()
    )
}
