//! Dataset info overlay: a centered popup with metadata and attributes.

use super::ThemeColors;
use crate::container::NodeInfo;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Draw the info popup for a resolved node.
pub(super) fn draw_info(f: &mut Frame<'_>, node: &NodeInfo, colors: &ThemeColors) {
    let area = centered_rect(60, 15, f.area());

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Dataset: {}", node.name),
            Style::default()
                .fg(colors.heading)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if let Some(ref shape) = node.shape {
        lines.push(labeled("Shape: ", format!("{:?}", shape), colors));
    }
    if let Some(ref dtype) = node.dtype {
        lines.push(labeled("Type: ", dtype.clone(), colors));
    }
    if let Some(size) = node.size {
        lines.push(labeled("Size: ", size.to_string(), colors));
    }

    if !node.attributes.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Attributes:",
            Style::default()
                .fg(colors.heading)
                .add_modifier(Modifier::BOLD),
        )));
        for (key, value) in &node.attributes {
            lines.push(labeled(format!("  {}: ", key), value.clone(), colors));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Info ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border))
                .style(Style::default().bg(colors.bg)),
        )
        .style(Style::default().fg(colors.text))
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn labeled(label: impl Into<String>, value: String, colors: &ThemeColors) -> Line<'static> {
    Line::from(vec![
        Span::styled(label.into(), Style::default().fg(colors.label)),
        Span::styled(value, Style::default().fg(colors.value)),
    ])
}

/// A rectangle of at most `width` x `height`, centered in `frame`.
fn centered_rect(width: u16, height: u16, frame: Rect) -> Rect {
    let w = width.min(frame.width.saturating_sub(2));
    let h = height.min(frame.height.saturating_sub(2));
    Rect {
        x: frame.x + (frame.width.saturating_sub(w)) / 2,
        y: frame.y + (frame.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}
