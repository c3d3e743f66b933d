use ratatui::{prelude::*, widgets::*};

use crate::domain::{
    shop::Product,
    text::{ellipsize, format_price},
};

/// One row of a product list: title, price, one line of description
#[derive(Clone, Debug)]
pub struct ProductItem<'a> {
    pub product: &'a Product,
    pub in_cart: Option<u32>,
    pub highlight: bool,
    pub title_style: Style,
    pub price_style: Style,
    pub muted_style: Style,
    pub selected_style: Style,
}

impl<'a> ProductItem<'a> {
    pub const HEIGHT: u16 = 3;

    pub fn new(product: &'a Product) -> Self {
        Self {
            product,
            in_cart: None,
            highlight: false,
            title_style: Style::default().bold(),
            price_style: Style::default(),
            muted_style: Style::default().fg(Color::Gray),
            selected_style: Style::default().reversed(),
        }
    }

    pub fn in_cart(mut self, quantity: Option<u32>) -> Self {
        self.in_cart = quantity;
        self
    }

    pub fn styles(mut self, title: Style, price: Style, muted: Style, selected: Style) -> Self {
        self.title_style = title;
        self.price_style = price;
        self.muted_style = muted;
        self.selected_style = selected;
        self
    }

    fn heading(&self, width: usize) -> Line<'a> {
        let price = format_price(self.product.price);
        let badge = self
            .in_cart
            .map(|q| format!(" ({q} in cart)"))
            .unwrap_or_default();
        let room = width.saturating_sub(price.len() + badge.len() + 1);
        let title = ellipsize(&self.product.title, room);
        let gap = width.saturating_sub(title.chars().count() + badge.len() + price.len());
        Line::from(vec![
            Span::styled(title, self.title_style),
            Span::styled(badge, self.muted_style),
            Span::raw(" ".repeat(gap)),
            Span::styled(price, self.price_style),
        ])
    }
}

impl Widget for ProductItem<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width as usize;
        let lines = vec![
            self.heading(width),
            Line::styled(ellipsize(&self.product.description, width), self.muted_style),
            Line::styled("─".repeat(width), self.muted_style),
        ];
        let mut paragraph = Paragraph::new(lines);
        if self.highlight {
            paragraph = paragraph.style(self.selected_style);
        }
        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(item: ProductItem, width: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, ProductItem::HEIGHT);
        let mut buf = Buffer::empty(area);
        item.render(area, &mut buf);
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn test_heading_right_aligns_price() {
        let product = Product::new("p1", "u1", "Red Shirt", "img", "A red t-shirt", 29.99);
        let lines = render(ProductItem::new(&product), 24);
        assert_eq!(lines[0], "Red Shirt         $29.99");
        assert_eq!(lines[1].trim_end(), "A red t-shirt");
    }

    #[test]
    fn test_long_title_is_ellipsized_and_badge_shown() {
        let product = Product::new("p4", "u3", "The Book - Limited Edition", "img", "", 15.99);
        let lines = render(ProductItem::new(&product).in_cart(Some(2)), 30);
        assert!(lines[0].ends_with("$15.99"));
        assert!(lines[0].contains("(2 in cart)"));
        assert!(lines[0].contains('…'));
    }
}
