use ratatui::{prelude::*, widgets::*};

use crate::domain::{
    shop::Order,
    text::{ellipsize, format_price},
};

/// An order summary that expands into its line items
#[derive(Clone, Debug)]
pub struct OrderItem<'a> {
    pub order: &'a Order,
    pub expanded: bool,
    pub highlight: bool,
    pub price_style: Style,
    pub muted_style: Style,
    pub selected_style: Style,
}

impl<'a> OrderItem<'a> {
    pub fn new(order: &'a Order, expanded: bool) -> Self {
        Self {
            order,
            expanded,
            highlight: false,
            price_style: Style::default().bold(),
            muted_style: Style::default().fg(Color::Gray),
            selected_style: Style::default().reversed(),
        }
    }

    pub fn styles(mut self, price: Style, muted: Style, selected: Style) -> Self {
        self.price_style = price;
        self.muted_style = muted;
        self.selected_style = selected;
        self
    }

    pub fn height(&self) -> u16 {
        let body = if self.expanded {
            self.order.items.len().max(1)
        } else {
            1
        };
        (body + 2) as u16
    }

    fn detail_lines(&self, width: usize) -> Vec<Line<'a>> {
        if !self.expanded {
            let count = self.order.items.iter().map(|l| l.quantity).sum::<u32>();
            return vec![Line::styled(
                format!("▸ {count} item(s), press enter for details"),
                self.muted_style,
            )];
        }
        if self.order.items.is_empty() {
            return vec![Line::styled("  (no items)", self.muted_style)];
        }
        self.order
            .items
            .iter()
            .map(|line| {
                let sum = format_price(line.sum);
                let head = format!("  {}x ", line.quantity);
                let room = width.saturating_sub(head.len() + sum.len() + 1);
                let title = ellipsize(&line.product_title, room);
                let gap = width.saturating_sub(head.len() + title.chars().count() + sum.len());
                Line::from(vec![
                    Span::raw(head),
                    Span::raw(title),
                    Span::raw(" ".repeat(gap)),
                    Span::raw(sum),
                ])
            })
            .collect()
    }
}

impl Widget for OrderItem<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width as usize;
        let total = format_price(self.order.total_amount);
        let date = self.order.readable_date();
        let gap = width.saturating_sub(total.len() + date.chars().count());

        let mut lines = vec![Line::from(vec![
            Span::styled(total, self.price_style),
            Span::raw(" ".repeat(gap)),
            Span::styled(date, self.muted_style),
        ])];
        lines.extend(self.detail_lines(width));
        lines.push(Line::styled("─".repeat(width), self.muted_style));

        let mut paragraph = Paragraph::new(lines);
        if self.highlight {
            paragraph = paragraph.style(self.selected_style);
        }
        paragraph.render(area, buf);
    }
}
