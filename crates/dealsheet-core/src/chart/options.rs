//! Chart option set
//!
//! Options are typed here and flattened to the host's nested option mapping by
//! [`ChartOptions::to_option_map`].

use std::collections::BTreeMap;

use super::axis::AxisTitles;
use super::legend::LegendPosition;
use crate::style::Color;

/// Options applied to a chart
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartOptions {
    /// Chart title
    pub title: Option<String>,
    /// Width in pixels
    pub width: Option<u32>,
    /// Height in pixels
    pub height: Option<u32>,
    /// Legend position
    pub legend: Option<LegendPosition>,
    /// Axis titles
    pub axes: AxisTitles,
    /// Per-series options, indexed by series position
    pub series: Vec<SeriesOptions>,
    /// Explicit series colours, in series order. The option map spells them
    /// `#RRGGBB` in upper case.
    pub colors: Vec<Color>,
    /// What pie slices are labelled with
    pub pie_slice_text: Option<PieSliceText>,
    /// Gauge scale and colour bands
    pub gauge: Option<GaugeOptions>,
}

impl ChartOptions {
    /// Flatten to the host option mapping (`title`, `legend.position`, `hAxis.title`,
    /// `series.0.labelInLegend`, `colors`, `min`, `redFrom`, ...)
    pub fn to_option_map(&self) -> BTreeMap<String, OptionValue> {
        let mut map = BTreeMap::new();

        if let Some(title) = &self.title {
            map.insert("title".to_string(), OptionValue::text(title));
        }
        if let Some(width) = self.width {
            map.insert("width".to_string(), OptionValue::Number(width as f64));
        }
        if let Some(height) = self.height {
            map.insert("height".to_string(), OptionValue::Number(height as f64));
        }
        if let Some(legend) = self.legend {
            map.insert(
                "legend".to_string(),
                OptionValue::map([("position", OptionValue::text(legend.as_str()))]),
            );
        }
        if let Some(title) = &self.axes.horizontal {
            map.insert(
                "hAxis".to_string(),
                OptionValue::map([("title", OptionValue::text(title))]),
            );
        }
        if let Some(title) = &self.axes.vertical {
            map.insert(
                "vAxis".to_string(),
                OptionValue::map([("title", OptionValue::text(title))]),
            );
        }
        if !self.series.is_empty() {
            let series = self
                .series
                .iter()
                .enumerate()
                .map(|(i, s)| (i.to_string(), s.to_option_value()))
                .collect();
            map.insert("series".to_string(), OptionValue::Map(series));
        }
        if !self.colors.is_empty() {
            map.insert(
                "colors".to_string(),
                OptionValue::List(
                    self.colors
                        .iter()
                        .map(|c| OptionValue::text(format!("#{}", c.to_rgb_hex())))
                        .collect(),
                ),
            );
        }
        if let Some(text) = self.pie_slice_text {
            map.insert("pieSliceText".to_string(), OptionValue::text(text.as_str()));
        }
        if let Some(gauge) = &self.gauge {
            for (key, value) in gauge.option_pairs() {
                map.insert(key, OptionValue::Number(value));
            }
        }

        map
    }
}

/// Options for one series
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeriesOptions {
    /// Value axis index (`targetAxisIndex`), 0 = left/primary
    pub target_axis_index: u8,
    /// Legend label (`labelInLegend`)
    pub label_in_legend: Option<String>,
}

impl SeriesOptions {
    /// Series on the primary axis with a legend label
    pub fn labelled<S: Into<String>>(label: S) -> Self {
        Self {
            target_axis_index: 0,
            label_in_legend: Some(label.into()),
        }
    }

    fn to_option_value(&self) -> OptionValue {
        let mut map = BTreeMap::new();
        map.insert(
            "targetAxisIndex".to_string(),
            OptionValue::Number(self.target_axis_index as f64),
        );
        if let Some(label) = &self.label_in_legend {
            map.insert("labelInLegend".to_string(), OptionValue::text(label));
        }
        OptionValue::Map(map)
    }
}

/// Pie slice label mode (`pieSliceText`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieSliceText {
    Percentage,
    Value,
    Label,
    None,
}

impl PieSliceText {
    pub fn as_str(&self) -> &'static str {
        match self {
            PieSliceText::Percentage => "percentage",
            PieSliceText::Value => "value",
            PieSliceText::Label => "label",
            PieSliceText::None => "none",
        }
    }
}

/// A coloured span of a gauge dial
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeBand {
    pub from: f64,
    pub to: f64,
}

impl GaugeBand {
    pub const fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }
}

/// Gauge scale and colour zones
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeOptions {
    pub min: f64,
    pub max: f64,
    pub red: Option<GaugeBand>,
    pub yellow: Option<GaugeBand>,
    pub green: Option<GaugeBand>,
}

impl GaugeOptions {
    /// Gauge from `min` to `max` with no zones
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            red: None,
            yellow: None,
            green: None,
        }
    }

    pub fn with_red(mut self, from: f64, to: f64) -> Self {
        self.red = Some(GaugeBand::new(from, to));
        self
    }

    pub fn with_yellow(mut self, from: f64, to: f64) -> Self {
        self.yellow = Some(GaugeBand::new(from, to));
        self
    }

    pub fn with_green(mut self, from: f64, to: f64) -> Self {
        self.green = Some(GaugeBand::new(from, to));
        self
    }

    /// Configured zones in red, yellow, green order
    pub fn bands(&self) -> Vec<(&'static str, GaugeBand)> {
        [("red", self.red), ("yellow", self.yellow), ("green", self.green)]
            .into_iter()
            .filter_map(|(name, band)| band.map(|b| (name, b)))
            .collect()
    }

    fn option_pairs(&self) -> Vec<(String, f64)> {
        let mut pairs = vec![("min".to_string(), self.min), ("max".to_string(), self.max)];
        for (name, band) in self.bands() {
            pairs.push((format!("{}From", name), band.from));
            pairs.push((format!("{}To", name), band.to));
        }
        pairs
    }
}

/// A value in the host option mapping
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Number(f64),
    Text(String),
    List(Vec<OptionValue>),
    Map(BTreeMap<String, OptionValue>),
}

impl OptionValue {
    pub fn text<S: Into<String>>(s: S) -> Self {
        OptionValue::Text(s.into())
    }

    fn map<const N: usize>(entries: [(&str, OptionValue); N]) -> Self {
        OptionValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Follow a dotted path into nested maps, e.g. `series.1.labelInLegend`
    pub fn lookup(&self, path: &str) -> Option<&OptionValue> {
        path.split('.').try_fold(self, |value, key| match value {
            OptionValue::Map(map) => map.get(key),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_gauge_option_pairs() {
        let options = ChartOptions {
            gauge: Some(
                GaugeOptions::new(0.0, 30.0)
                    .with_red(0.0, 5.0)
                    .with_yellow(5.0, 15.0)
                    .with_green(15.0, 30.0),
            ),
            ..Default::default()
        };
        let map = options.to_option_map();

        assert_eq!(map["min"], OptionValue::Number(0.0));
        assert_eq!(map["max"], OptionValue::Number(30.0));
        assert_eq!(map["yellowFrom"], OptionValue::Number(5.0));
        assert_eq!(map["greenTo"], OptionValue::Number(30.0));
        assert_eq!(map.len(), 8);
    }

    #[test]
    fn test_nested_options() {
        let options = ChartOptions {
            title: Some("Scenario Comparison".into()),
            legend: Some(LegendPosition::Top),
            axes: AxisTitles::new("Value", "Metric"),
            series: vec![SeriesOptions::labelled("5-Year Value")],
            colors: vec![Color::rgb(0x42, 0x85, 0xf4)],
            ..Default::default()
        };
        let root = OptionValue::Map(options.to_option_map());

        assert_eq!(root.lookup("legend.position").and_then(|v| v.as_str()), Some("top"));
        assert_eq!(root.lookup("vAxis.title").and_then(|v| v.as_str()), Some("Metric"));
        assert_eq!(
            root.lookup("series.0.labelInLegend").and_then(|v| v.as_str()),
            Some("5-Year Value")
        );
        assert_eq!(
            root.lookup("series.0.targetAxisIndex").and_then(|v| v.as_f64()),
            Some(0.0)
        );
        assert_eq!(
            root.lookup("colors"),
            Some(&OptionValue::List(vec![OptionValue::text("#4285F4")]))
        );
        assert!(root.lookup("pieSliceText").is_none());
    }
}
