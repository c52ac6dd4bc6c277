use std::fmt::Write as _;

use tracing::debug;

use crate::core::path::PathNumber;
use crate::core::{
    AxisTick, BarChartPlan, GaugePlan, GaugeStatus, GuideLine, LineChartPlan, PiePlan, Rect,
    StackedBarChartPlan, TooltipContent,
};
use crate::error::ChartResult;
use crate::render::{ChartStyle, DrawPlan, Renderer};

/// Serializes plans into standalone `<svg>` fragments.
///
/// Hover targets are transparent rects carrying a `<title>` with the tooltip
/// text, so a browser shows the same rows an interactive host would.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    style: ChartStyle,
    charts: Vec<String>,
}

impl SvgRenderer {
    pub fn new(style: ChartStyle) -> ChartResult<Self> {
        Ok(Self {
            style: style.validate()?,
            charts: Vec::new(),
        })
    }

    #[must_use]
    pub fn charts(&self) -> &[String] {
        &self.charts
    }

    /// Wraps every rendered chart in a minimal HTML page.
    #[must_use]
    pub fn into_document(self, title: &str) -> String {
        let mut out = String::new();
        let title = escape_xml(title);
        let _ = write!(
            out,
            r#"<!DOCTYPE html>
<html lang="ja">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>body{{font-family:sans-serif;margin:24px}}section{{margin-bottom:32px}}</style>
</head>
<body>
  <h1>{title}</h1>
"#
        );
        for chart in &self.charts {
            let _ = writeln!(out, "  <section>\n{chart}  </section>");
        }
        out.push_str("</body>\n</html>\n");
        out
    }

    fn text_attrs(&self) -> String {
        format!(
            "fill=\"{}\" font-size=\"{}\"",
            self.style.text.to_css(),
            PathNumber(self.style.font_size_px)
        )
    }

    fn render_gauge(&self, plan: &GaugePlan, out: &mut String) {
        let centre = PathNumber(plan.size / 2.0);
        let status_color = match plan.status {
            GaugeStatus::Good => self.style.good,
            GaugeStatus::Bad => self.style.bad,
        };
        let _ = writeln!(out, "  <g transform=\"translate({centre},{centre})\">");
        let _ = writeln!(
            out,
            "    <path d=\"{}\" fill=\"{}\"/>",
            plan.background,
            self.style.track.to_css()
        );
        let _ = writeln!(
            out,
            "    <path d=\"{}\" fill=\"{}\" data-status=\"{}\"/>",
            plan.foreground,
            status_color.to_css(),
            plan.status.as_str()
        );
        let _ = writeln!(
            out,
            "    <text text-anchor=\"middle\" dominant-baseline=\"middle\" fill=\"{}\" font-size=\"{}\">{}%</text>",
            status_color.to_css(),
            PathNumber(self.style.font_size_px * 2.4),
            escape_xml(&plan.label)
        );
        let _ = writeln!(out, "  </g>");
    }

    fn render_pie(&self, plan: &PiePlan, out: &mut String) {
        let centre = PathNumber(plan.size / 2.0);
        let tooltip = tooltip_text(&plan.tooltip);
        let _ = writeln!(out, "  <g transform=\"translate({centre},{centre})\">");
        for slice in &plan.slices {
            let index = plan
                .tooltip
                .rows
                .iter()
                .position(|row| row.id == slice.id)
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "    <path d=\"{}\" fill=\"{}\" data-id=\"{}\"><title>{tooltip}</title></path>",
                slice.path,
                self.style.series_color(index).to_css(),
                escape_xml(&slice.id)
            );
        }
        let _ = writeln!(out, "  </g>");
    }

    fn render_bar(&self, plan: &BarChartPlan, out: &mut String) {
        for (index, bar) in plan.bars.iter().enumerate() {
            write_rect(
                out,
                bar.rect,
                &self.style.series_color(index).to_css(),
                &bar.id,
                None,
            );
        }
        self.write_ticks(out, &plan.x_ticks, |tick| {
            (tick.position, plan.margins.top - 4.0, "middle")
        });
        self.write_ticks(out, &plan.y_ticks, |tick| {
            (plan.margins.left - 8.0, tick.position, "end")
        });
        for pointer in &plan.pointers {
            let tooltip = plan.tooltip(&pointer.id).map(|content| tooltip_text(&content));
            write_rect(out, pointer.rect, "transparent", &pointer.id, tooltip.as_deref());
        }
    }

    fn render_line(&self, plan: &LineChartPlan, out: &mut String) {
        self.write_frame(out, &plan.frame);
        let height = plan.viewport.height_px();
        self.write_ticks(out, &plan.x_ticks, |tick| (tick.position, height - 6.0, "middle"));
        self.write_ticks(out, &plan.y_ticks, |tick| {
            (plan.margins.left - 4.0, tick.position, "end")
        });

        for (index, line) in plan.lines.iter().enumerate() {
            let _ = writeln!(
                out,
                "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\" data-id=\"{}\"/>",
                line.path,
                self.style.series_color(index).to_css(),
                escape_xml(&line.id)
            );
        }

        for group in &plan.marker_groups {
            let date = group.date.format("%Y-%m-%d");
            let tooltip = plan
                .tooltip(group.date)
                .map(|content| tooltip_text(&content))
                .unwrap_or_default();
            let _ = writeln!(out, "  <g data-date=\"{date}\"><title>{tooltip}</title>");
            write_line(out, group.guide, &self.style.guide.to_css());
            for marker in &group.markers {
                let index = plan
                    .lines
                    .iter()
                    .position(|line| line.id == marker.id)
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "    <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" data-id=\"{}\"/>",
                    PathNumber(marker.cx),
                    PathNumber(marker.cy),
                    PathNumber(marker.r),
                    self.style.series_color(index).to_css(),
                    escape_xml(&marker.id)
                );
            }
            let _ = writeln!(out, "  </g>");
        }
    }

    fn render_stacked_bar(&self, plan: &StackedBarChartPlan, out: &mut String) {
        self.write_frame(out, &plan.frame);
        let height = plan.viewport.height_px();
        self.write_ticks(out, &plan.x_ticks, |tick| (tick.position, height - 6.0, "middle"));
        self.write_ticks(out, &plan.y_ticks, |tick| {
            (plan.margins.left - 4.0, tick.position, "end")
        });

        for column in &plan.columns {
            let date = column.date.format("%Y-%m-%d").to_string();
            for cell in &column.cells {
                let index = plan
                    .categories
                    .iter()
                    .position(|category| category.id == cell.id)
                    .unwrap_or_default();
                write_rect(
                    out,
                    cell.rect,
                    &self.style.series_color(index).to_css(),
                    &cell.id,
                    None,
                );
            }
            let tooltip = plan.tooltip(column.date).map(|content| tooltip_text(&content));
            write_rect(out, column.pointer, "transparent", &date, tooltip.as_deref());
        }
    }

    fn write_frame(&self, out: &mut String, frame: &[GuideLine]) {
        let stroke = self.style.frame.to_css();
        for line in frame {
            write_line(out, *line, &stroke);
        }
    }

    fn write_ticks(
        &self,
        out: &mut String,
        ticks: &[AxisTick],
        anchor: impl Fn(&AxisTick) -> (f64, f64, &'static str),
    ) {
        let attrs = self.text_attrs();
        for tick in ticks {
            let (x, y, text_anchor) = anchor(tick);
            let _ = writeln!(
                out,
                "  <text x=\"{}\" y=\"{}\" text-anchor=\"{text_anchor}\" {attrs}>{}</text>",
                PathNumber(x),
                PathNumber(y),
                escape_xml(&tick.label)
            );
        }
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, plan: &DrawPlan) -> ChartResult<()> {
        plan.validate()?;
        let (width, height) = plan.size();
        let mut out = String::new();
        let _ = writeln!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{0}\" height=\"{1}\" viewBox=\"0 0 {0} {1}\" data-kind=\"{2}\">",
            PathNumber(width),
            PathNumber(height),
            plan.kind()
        );
        match plan {
            DrawPlan::Gauge(plan) => self.render_gauge(plan, &mut out),
            DrawPlan::Pie(plan) => self.render_pie(plan, &mut out),
            DrawPlan::Bar(plan) => self.render_bar(plan, &mut out),
            DrawPlan::Line(plan) => self.render_line(plan, &mut out),
            DrawPlan::StackedBar(plan) => self.render_stacked_bar(plan, &mut out),
        }
        let _ = writeln!(out, "</svg>");
        debug!(kind = plan.kind(), bytes = out.len(), "rendered svg chart");
        self.charts.push(out);
        Ok(())
    }
}

fn write_rect(out: &mut String, rect: Rect, fill: &str, id: &str, tooltip: Option<&str>) {
    let _ = write!(
        out,
        "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{fill}\" data-id=\"{}\"",
        PathNumber(rect.x),
        PathNumber(rect.y),
        PathNumber(rect.width),
        PathNumber(rect.height),
        escape_xml(id)
    );
    match tooltip {
        Some(text) => {
            let _ = writeln!(out, "><title>{text}</title></rect>");
        }
        None => {
            let _ = writeln!(out, "/>");
        }
    }
}

fn write_line(out: &mut String, line: GuideLine, stroke: &str) {
    let _ = writeln!(
        out,
        "    <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{stroke}\"/>",
        PathNumber(line.x1),
        PathNumber(line.y1),
        PathNumber(line.x2),
        PathNumber(line.y2)
    );
}

/// Escaped tooltip text, one row per line.
fn tooltip_text(content: &TooltipContent) -> String {
    content
        .title
        .iter()
        .map(String::as_str)
        .chain(content.rows.iter().map(|row| row.text.as_str()))
        .map(escape_xml)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escapes the five XML special characters.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_xml;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_xml("<a href=\"x\">Tom & 'Jerry'</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &apos;Jerry&apos;&lt;/a&gt;"
        );
    }
}
