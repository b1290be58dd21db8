//! DrawingML drawing and chart parts

use quick_xml::escape::partial_escape;

use dealsheet_core::chart::{AxisTitles, GaugeOptions, PieSliceText};
use dealsheet_core::{Chart, ChartType, Color, DataSeries, LegendPosition};

/// English Metric Units per screen pixel (96 dpi)
pub(crate) const EMU_PER_PIXEL: u64 = 9525;

const DEFAULT_WIDTH: u32 = 600;
const DEFAULT_HEIGHT: u32 = 371;

const CATEGORY_AXIS_ID: u32 = 500_000_001;
const VALUE_AXIS_ID: u32 = 500_000_002;

/// Unbanded stretches of a gauge dial
const GAUGE_TRACK: Color = Color::rgb(0xd9, 0xd9, 0xd9);
const GAUGE_RED: Color = Color::rgb(0xdc, 0x39, 0x12);
const GAUGE_YELLOW: Color = Color::rgb(0xff, 0x99, 0x00);
const GAUGE_GREEN: Color = Color::rgb(0x10, 0x96, 0x18);

const NS_CHART: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";
const NS_MAIN: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_RELS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// `xl/drawings/drawingN.xml`: one one-cell anchor per chart, in insertion order.
/// Chart `i` is linked through relationship `rId{i + 1}`.
pub(crate) fn drawing_xml(charts: &[Chart]) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<xdr:wsDr xmlns:xdr="http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing" xmlns:a="{NS_MAIN}">"#
    );

    for (i, chart) in charts.iter().enumerate() {
        let anchor = chart.position.anchor();
        let (width, height) = chart_size(chart);
        xml.push_str(&format!(
            r#"
  <xdr:oneCellAnchor>
    <xdr:from><xdr:col>{}</xdr:col><xdr:colOff>{}</xdr:colOff><xdr:row>{}</xdr:row><xdr:rowOff>{}</xdr:rowOff></xdr:from>
    <xdr:ext cx="{}" cy="{}"/>
    <xdr:graphicFrame macro="">
      <xdr:nvGraphicFramePr><xdr:cNvPr id="{}" name="Chart {}"/><xdr:cNvGraphicFramePr/></xdr:nvGraphicFramePr>
      <xdr:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/></xdr:xfrm>
      <a:graphic><a:graphicData uri="{NS_CHART}"><c:chart xmlns:c="{NS_CHART}" xmlns:r="{NS_RELS}" r:id="rId{}"/></a:graphicData></a:graphic>
    </xdr:graphicFrame>
    <xdr:clientData/>
  </xdr:oneCellAnchor>"#,
            anchor.col,
            u64::from(chart.position.offset_x) * EMU_PER_PIXEL,
            anchor.row,
            u64::from(chart.position.offset_y) * EMU_PER_PIXEL,
            u64::from(width) * EMU_PER_PIXEL,
            u64::from(height) * EMU_PER_PIXEL,
            i + 2,
            i + 1,
            i + 1,
        ));
    }

    xml.push_str("\n</xdr:wsDr>");
    xml
}

/// `xl/drawings/_rels/drawingN.xml.rels`, pointing at consecutively numbered chart parts
pub(crate) fn drawing_rels_xml(first_chart_number: usize, count: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for i in 0..count {
        xml.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="{NS_RELS}/chart" Target="../charts/chart{}.xml"/>"#,
            i + 1,
            first_chart_number + i
        ));
    }
    xml.push_str("\n</Relationships>");
    xml
}

/// `xl/charts/chartN.xml` for one chart
pub(crate) fn chart_xml(chart: &Chart) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<c:chartSpace xmlns:c="{NS_CHART}" xmlns:a="{NS_MAIN}" xmlns:r="{NS_RELS}">
  <c:roundedCorners val="0"/>
  <c:chart>"#
    );

    let title = chart.title();
    if title.is_empty() {
        xml.push_str("\n    <c:autoTitleDeleted val=\"1\"/>");
    } else {
        xml.push_str("\n    ");
        xml.push_str(&title_xml(title));
        xml.push_str("\n    <c:autoTitleDeleted val=\"0\"/>");
    }

    xml.push_str("\n    <c:plotArea>\n      <c:layout/>");
    let series = chart.data_series();
    for s in series.iter().filter(|s| s.target_axis != 0) {
        tracing::debug!(
            chart = title,
            series = s.index,
            axis = s.target_axis,
            "secondary axis is drawn on the primary axis"
        );
    }

    match chart.chart_type {
        ChartType::Pie => write_pie(&mut xml, chart, &series),
        ChartType::Line => {
            write_line(&mut xml, &series);
            write_axes(&mut xml, chart.chart_type, &chart.options.axes);
        }
        ChartType::Column | ChartType::Bar => {
            write_bar(&mut xml, chart.chart_type, &series);
            write_axes(&mut xml, chart.chart_type, &chart.options.axes);
        }
        ChartType::Gauge => write_gauge(&mut xml, chart),
    }
    xml.push_str("\n    </c:plotArea>");

    if let Some(pos) = legend_position(chart).xlsx_position() {
        xml.push_str(&format!(
            "\n    <c:legend><c:legendPos val=\"{}\"/><c:overlay val=\"0\"/></c:legend>",
            pos
        ));
    }

    xml.push_str(
        r#"
    <c:plotVisOnly val="1"/>
    <c:dispBlanksAs val="gap"/>
  </c:chart>
</c:chartSpace>"#,
    );
    xml
}

fn chart_size(chart: &Chart) -> (u32, u32) {
    (
        chart.options.width.unwrap_or(DEFAULT_WIDTH),
        chart.options.height.unwrap_or(DEFAULT_HEIGHT),
    )
}

/// Gauges carry no legend unless one is asked for
fn legend_position(chart: &Chart) -> LegendPosition {
    match (chart.options.legend, chart.chart_type) {
        (Some(position), _) => position,
        (None, ChartType::Gauge) => LegendPosition::None,
        (None, _) => LegendPosition::Right,
    }
}

fn title_xml(text: &str) -> String {
    format!(
        "<c:title><c:tx><c:rich><a:bodyPr/><a:lstStyle/><a:p><a:r><a:t>{}</a:t></a:r></a:p></c:rich></c:tx><c:overlay val=\"0\"/></c:title>",
        partial_escape(text)
    )
}

fn series_header(xml: &mut String, series: &DataSeries) {
    xml.push_str(&format!(
        "\n        <c:ser><c:idx val=\"{0}\"/><c:order val=\"{0}\"/>",
        series.index
    ));
    if let Some(name) = &series.name {
        xml.push_str(&format!("<c:tx><c:v>{}</c:v></c:tx>", partial_escape(name.as_str())));
    }
}

fn series_data(xml: &mut String, series: &DataSeries) {
    xml.push_str(&format!(
        "<c:cat><c:strRef><c:f>{}</c:f></c:strRef></c:cat><c:val><c:numRef><c:f>{}</c:f></c:numRef></c:val>",
        partial_escape(series.categories.reference().as_str()),
        partial_escape(series.values.reference().as_str())
    ));
}

fn solid_fill(color: Color) -> String {
    format!("<a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>", color.to_rgb_hex())
}

fn write_pie(xml: &mut String, chart: &Chart, series: &[DataSeries]) {
    xml.push_str("\n      <c:pieChart><c:varyColors val=\"1\"/>");
    for s in series {
        series_header(xml, s);
        // Pie colours go to slices, not to the series
        let slices = s.categories.range.row_count() as usize;
        for (point, color) in chart.options.colors.iter().take(slices).enumerate() {
            xml.push_str(&format!(
                "<c:dPt><c:idx val=\"{}\"/><c:bubble3D val=\"0\"/><c:spPr>{}</c:spPr></c:dPt>",
                point,
                solid_fill(*color)
            ));
        }
        let slice_text = chart.options.pie_slice_text.unwrap_or(PieSliceText::Percentage);
        if let Some(labels) = pie_labels(slice_text) {
            xml.push_str(&labels);
        }
        series_data(xml, s);
        xml.push_str("</c:ser>");
    }
    xml.push_str("\n        <c:firstSliceAng val=\"0\"/>\n      </c:pieChart>");
}

fn pie_labels(text: PieSliceText) -> Option<String> {
    let (val, cat, percent) = match text {
        PieSliceText::Percentage => (0, 0, 1),
        PieSliceText::Value => (1, 0, 0),
        PieSliceText::Label => (0, 1, 0),
        PieSliceText::None => return None,
    };
    Some(format!(
        "<c:dLbls><c:showLegendKey val=\"0\"/><c:showVal val=\"{val}\"/><c:showCatName val=\"{cat}\"/><c:showSerName val=\"0\"/><c:showPercent val=\"{percent}\"/><c:showBubbleSize val=\"0\"/></c:dLbls>"
    ))
}

fn write_line(xml: &mut String, series: &[DataSeries]) {
    xml.push_str("\n      <c:lineChart><c:grouping val=\"standard\"/><c:varyColors val=\"0\"/>");
    for s in series {
        series_header(xml, s);
        if let Some(color) = s.color {
            xml.push_str(&format!(
                "<c:spPr><a:ln w=\"28575\" cap=\"rnd\">{}</a:ln></c:spPr>",
                solid_fill(color)
            ));
        }
        xml.push_str("<c:marker><c:symbol val=\"none\"/></c:marker>");
        series_data(xml, s);
        xml.push_str("<c:smooth val=\"0\"/></c:ser>");
    }
    xml.push_str(&format!(
        "\n        <c:marker val=\"1\"/><c:axId val=\"{CATEGORY_AXIS_ID}\"/><c:axId val=\"{VALUE_AXIS_ID}\"/>\n      </c:lineChart>"
    ));
}

fn write_bar(xml: &mut String, chart_type: ChartType, series: &[DataSeries]) {
    let direction = if chart_type == ChartType::Bar { "bar" } else { "col" };
    xml.push_str(&format!(
        "\n      <c:barChart><c:barDir val=\"{direction}\"/><c:grouping val=\"clustered\"/><c:varyColors val=\"0\"/>"
    ));
    for s in series {
        series_header(xml, s);
        if let Some(color) = s.color {
            xml.push_str(&format!("<c:spPr>{}</c:spPr>", solid_fill(color)));
        }
        xml.push_str("<c:invertIfNegative val=\"0\"/>");
        series_data(xml, s);
        xml.push_str("</c:ser>");
    }
    xml.push_str(&format!(
        "\n        <c:gapWidth val=\"150\"/><c:axId val=\"{CATEGORY_AXIS_ID}\"/><c:axId val=\"{VALUE_AXIS_ID}\"/>\n      </c:barChart>"
    ));
}

/// Horizontal bar charts put categories on the vertical axis, so the
/// horizontal title belongs to the value axis there.
fn write_axes(xml: &mut String, chart_type: ChartType, titles: &AxisTitles) {
    let (cat_pos, val_pos, cat_title, val_title) = if chart_type == ChartType::Bar {
        ("l", "b", &titles.vertical, &titles.horizontal)
    } else {
        ("b", "l", &titles.horizontal, &titles.vertical)
    };

    xml.push_str(&format!(
        "\n      <c:catAx><c:axId val=\"{CATEGORY_AXIS_ID}\"/><c:scaling><c:orientation val=\"minMax\"/></c:scaling><c:delete val=\"0\"/><c:axPos val=\"{cat_pos}\"/>"
    ));
    if let Some(title) = cat_title {
        xml.push_str(&title_xml(title));
    }
    xml.push_str(&format!(
        "<c:numFmt formatCode=\"General\" sourceLinked=\"1\"/><c:tickLblPos val=\"nextTo\"/><c:crossAx val=\"{VALUE_AXIS_ID}\"/><c:crosses val=\"autoZero\"/><c:auto val=\"1\"/><c:lblAlgn val=\"ctr\"/><c:lblOffset val=\"100\"/></c:catAx>"
    ));

    xml.push_str(&format!(
        "\n      <c:valAx><c:axId val=\"{VALUE_AXIS_ID}\"/><c:scaling><c:orientation val=\"minMax\"/></c:scaling><c:delete val=\"0\"/><c:axPos val=\"{val_pos}\"/><c:majorGridlines/>"
    ));
    if let Some(title) = val_title {
        xml.push_str(&title_xml(title));
    }
    xml.push_str(&format!(
        "<c:numFmt formatCode=\"General\" sourceLinked=\"1\"/><c:tickLblPos val=\"nextTo\"/><c:crossAx val=\"{CATEGORY_AXIS_ID}\"/><c:crosses val=\"autoZero\"/><c:crossBetween val=\"between\"/></c:valAx>"
    ));
}

/// DrawingML has no gauge. The dial is a doughnut rotated to start at nine
/// o'clock: one slice per band across `min..max`, then an unfilled slice of
/// equal total size that hides the lower half. The series takes its name from
/// the value cell, and that name is the only data label, so the dial reads out
/// the current value.
fn write_gauge(xml: &mut String, chart: &Chart) {
    let gauge = chart
        .options
        .gauge
        .unwrap_or_else(|| GaugeOptions::new(0.0, 100.0));
    let mut segments = gauge_segments(&gauge);
    segments.push((gauge.max - gauge.min, None));

    xml.push_str("\n      <c:doughnutChart><c:varyColors val=\"1\"/>");
    xml.push_str("\n        <c:ser><c:idx val=\"0\"/><c:order val=\"0\"/>");
    let reading = chart.ranges.get(1);
    if let Some(value) = reading {
        xml.push_str(&format!(
            "<c:tx><c:strRef><c:f>{}</c:f></c:strRef></c:tx>",
            partial_escape(value.reference().as_str())
        ));
    }
    for (point, (_, color)) in segments.iter().enumerate() {
        let fill = match color {
            Some(color) => solid_fill(*color),
            None => "<a:noFill/>".to_string(),
        };
        xml.push_str(&format!(
            "<c:dPt><c:idx val=\"{}\"/><c:bubble3D val=\"0\"/><c:spPr>{}<a:ln><a:noFill/></a:ln></c:spPr></c:dPt>",
            point, fill
        ));
    }
    // The series name is the value cell; show it once, on the hidden half below the dial
    if reading.is_some() {
        xml.push_str(&format!(
            "<c:dLbls><c:dLbl><c:idx val=\"{}\"/><c:showLegendKey val=\"0\"/><c:showVal val=\"0\"/><c:showCatName val=\"0\"/><c:showSerName val=\"1\"/><c:showPercent val=\"0\"/><c:showBubbleSize val=\"0\"/></c:dLbl><c:showLegendKey val=\"0\"/><c:showVal val=\"0\"/><c:showCatName val=\"0\"/><c:showSerName val=\"0\"/><c:showPercent val=\"0\"/><c:showBubbleSize val=\"0\"/></c:dLbls>",
            segments.len() - 1
        ));
    }
    xml.push_str(&format!(
        "<c:val><c:numLit><c:formatCode>General</c:formatCode><c:ptCount val=\"{}\"/>",
        segments.len()
    ));
    for (point, (span, _)) in segments.iter().enumerate() {
        xml.push_str(&format!("<c:pt idx=\"{}\"><c:v>{}</c:v></c:pt>", point, span));
    }
    xml.push_str("</c:numLit></c:val></c:ser>");
    xml.push_str("\n        <c:firstSliceAng val=\"270\"/><c:holeSize val=\"50\"/>\n      </c:doughnutChart>");
}

/// Visible dial slices in drawing order. Gaps between bands are filled with
/// the track colour; overlapping bands are clipped to what is left.
pub(crate) fn gauge_segments(gauge: &GaugeOptions) -> Vec<(f64, Option<Color>)> {
    let mut bands: Vec<(f64, f64, Color)> = gauge
        .bands()
        .into_iter()
        .map(|(name, band)| {
            let color = match name {
                "red" => GAUGE_RED,
                "yellow" => GAUGE_YELLOW,
                _ => GAUGE_GREEN,
            };
            (band.from.max(gauge.min), band.to.min(gauge.max), color)
        })
        .collect();
    bands.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut segments = Vec::new();
    let mut cursor = gauge.min;
    for (from, to, color) in bands {
        if from > cursor {
            segments.push((from - cursor, Some(GAUGE_TRACK)));
            cursor = from;
        }
        if to > cursor {
            segments.push((to - cursor, Some(color)));
            cursor = to;
        }
    }
    if gauge.max > cursor {
        segments.push((gauge.max - cursor, Some(GAUGE_TRACK)));
    }
    segments
}
