use ratatui::{prelude::*, widgets::*};
use tui_widget_list::{ListBuilder, ListState as ItemListState, ListView};

use crate::{
    core::state::{
        screens::{CartScreen, ProductDetailScreen, ProductsOverviewScreen},
        AppState,
    },
    domain::{
        shop::Product,
        text::{ellipsize, format_price, wrap_text},
    },
    presentation::{config::keybindings::Action, widgets::ProductItem},
};

use super::{fetch_error, key_hints, placeholder, with_footer};

/// Product rows with highlight and cart badges
pub(crate) fn view_product_list(
    state: &AppState,
    products: &[Product],
    selected: Option<usize>,
    frame: &mut Frame,
    area: Rect,
) {
    let styles = &state.config.config.styles;
    let cart = &state.cart.cart;
    let items: Vec<ProductItem> = products
        .iter()
        .map(|product| {
            ProductItem::new(product)
                .in_cart(cart.get(&product.id).map(|item| item.quantity))
                .styles(
                    styles.get_style("title"),
                    styles.get_style("price"),
                    styles.get_style("muted"),
                    styles.get_style("selected"),
                )
        })
        .collect();
    let count = items.len();

    let builder = ListBuilder::new(move |context| {
        let mut item = items[context.index].clone();
        item.highlight = context.is_selected;
        (item, ProductItem::HEIGHT)
    });
    let list =
        ListView::new(builder, count).block(Block::default().padding(Padding::horizontal(1)));
    let mut list_state = ItemListState::default();
    list_state.select(selected);
    frame.render_stateful_widget(list, area, &mut list_state);
}

#[derive(Debug, Default)]
pub struct ProductsOverviewComponent;

impl ProductsOverviewComponent {
    pub fn view(
        &self,
        state: &AppState,
        screen: &ProductsOverviewScreen,
        frame: &mut Frame,
        area: Rect,
    ) {
        let styles = &state.config.config.styles;
        let products = &state.products.available;
        let (body, footer) = with_footer(area);

        if let Some(error) = screen.fetch.error() {
            fetch_error(state, error, frame, body);
        } else if screen.fetch.is_loading() && products.is_empty() {
            placeholder(frame, body, "Loading…", styles.get_style("primary"));
        } else if products.is_empty() {
            placeholder(
                frame,
                body,
                "No products found. Maybe start adding some!",
                styles.get_style("muted"),
            );
        } else {
            let selected = screen.cursor.selected(products.len());
            view_product_list(state, products, selected, frame, body);
        }

        frame.render_widget(
            Paragraph::new(key_hints(
                state,
                &[
                    (Action::Select, "details"),
                    (Action::AddToCart, "to cart"),
                    (Action::OpenCart, "cart"),
                    (Action::ToggleDrawer, "menu"),
                ],
            )),
            footer,
        );
    }
}

#[derive(Debug, Default)]
pub struct ProductDetailComponent;

impl ProductDetailComponent {
    pub fn lines(&self, state: &AppState, product: &Product, width: usize) -> Vec<Line<'static>> {
        let styles = &state.config.config.styles;
        let mut lines = vec![
            Line::styled(format_price(product.price), styles.get_style("price")),
            Line::raw(""),
        ];
        lines.extend(
            wrap_text(&product.description, width)
                .lines()
                .map(|line| Line::raw(line.to_string())),
        );
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("Image: {}", ellipsize(&product.image_url, width.saturating_sub(7))),
            styles.get_style("muted"),
        ));
        if let Some(item) = state.cart.cart.get(&product.id) {
            lines.push(Line::styled(
                format!("In your cart: {}", item.quantity),
                styles.get_style("accent"),
            ));
        }
        lines
    }

    pub fn view(&self, state: &AppState, screen: &ProductDetailScreen, frame: &mut Frame, area: Rect) {
        let styles = &state.config.config.styles;
        let (body, footer) = with_footer(area);
        let Some(product) = screen.product(&state.products.available) else {
            placeholder(
                frame,
                body,
                "This product does not exist anymore.",
                styles.get_style("error"),
            );
            return;
        };

        let block = Block::default().padding(Padding::horizontal(2));
        let width = block.inner(body).width as usize;
        frame.render_widget(
            Paragraph::new(self.lines(state, product, width))
                .block(block)
                .scroll((screen.scroll, 0)),
            body,
        );
        frame.render_widget(
            Paragraph::new(key_hints(
                state,
                &[(Action::AddToCart, "to cart"), (Action::Back, "back")],
            )),
            footer,
        );
    }
}

#[derive(Debug, Default)]
pub struct CartComponent;

impl CartComponent {
    pub fn view(&self, state: &AppState, screen: &CartScreen, frame: &mut Frame, area: Rect) {
        let styles = &state.config.config.styles;
        let cart = &state.cart.cart;
        let (body, footer) = with_footer(area);
        let [summary, items_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(body);

        let order_label = if screen.order.is_loading() {
            Span::styled("Placing order…", styles.get_style("primary"))
        } else if cart.is_empty() {
            Span::styled("Order Now", styles.get_style("muted"))
        } else {
            Span::styled("Order Now", styles.get_style("accent"))
        };
        let total = Line::from(vec![
            Span::styled("Total: ", styles.get_style("title")),
            Span::styled(format_price(cart.total_amount()), styles.get_style("price")),
            Span::raw("   "),
            order_label,
        ]);
        frame.render_widget(
            Paragraph::new(total).block(Block::default().borders(Borders::ALL)),
            summary,
        );

        if cart.is_empty() {
            placeholder(frame, items_area, "Your cart is empty.", styles.get_style("muted"));
        } else {
            let width = items_area.width.saturating_sub(2) as usize;
            let rows: Vec<ListItem> = cart
                .iter()
                .map(|(_, item)| {
                    let head = format!("{}x ", item.quantity);
                    let sum = format_price(item.sum);
                    let room = width.saturating_sub(head.len() + sum.len() + 1);
                    let title = ellipsize(&item.product_title, room);
                    let gap = width.saturating_sub(head.len() + title.chars().count() + sum.len());
                    ListItem::new(Line::from(vec![
                        Span::styled(head, styles.get_style("muted")),
                        Span::raw(title),
                        Span::raw(" ".repeat(gap)),
                        Span::styled(sum, styles.get_style("price")),
                    ]))
                })
                .collect();
            let mut list_state =
                ListState::default().with_selected(screen.cursor.selected(cart.len()));
            frame.render_stateful_widget(
                List::new(rows)
                    .block(Block::default().padding(Padding::horizontal(1)))
                    .highlight_style(styles.get_style("selected")),
                items_area,
                &mut list_state,
            );
        }

        frame.render_widget(
            Paragraph::new(key_hints(
                state,
                &[
                    (Action::RemoveFromCart, "remove one"),
                    (Action::OrderNow, "order now"),
                    (Action::Back, "back"),
                ],
            )),
            footer,
        );
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    use crate::{
        core::msg::shop::ShopReply,
        domain::shop::Session,
        presentation::components::test_support::{demo_products, Harness},
    };

    #[test]
    fn test_overview_lists_products() {
        let harness = Harness::signed_in(demo_products());
        assert!(harness.shows("All Products"));
        assert!(harness.shows("Red Shirt"));
        assert!(harness.shows("$99.99"));
    }

    #[test]
    fn test_overview_loading_and_empty_states() {
        let mut harness = Harness::new();
        let session = Session::new("token", "u1", Utc::now() + TimeDelta::hours(1));
        harness.respond(ShopReply::SessionRestored(Some(session)));
        assert!(harness.shows("Loading…"));
        harness.respond(ShopReply::Products(vec![]));
        assert!(harness.shows("No products found. Maybe start adding some!"));
    }

    #[test]
    fn test_overview_error_offers_retry() {
        let mut harness = Harness::signed_in(vec![]);
        harness.key(KeyCode::Char('r'));
        harness.fail("Something went wrong! (offline)");
        assert!(harness.shows("An error occurred!"));
        assert!(harness.shows("Press r to try again"));
    }

    #[test]
    fn test_add_to_cart_updates_badges() {
        let mut harness = Harness::signed_in(demo_products());
        harness.key(KeyCode::Char('a'));
        harness.key(KeyCode::Char('a'));
        assert!(harness.shows("(2 in cart)"));
        assert!(harness.shows("Cart: 2 | $59.98"));
    }

    #[test]
    fn test_detail_shows_description() {
        let mut harness = Harness::signed_in(demo_products());
        harness.key(KeyCode::Char('j'));
        harness.key(KeyCode::Enter);
        let lines = harness.render(80, 30);
        assert_eq!(lines[0].trim_start().split("  ").next(), Some("Blue Carpet"));
        assert!(harness.shows("Fits your red shirt perfectly."));
        assert!(harness.shows("Image: https://example.com/carpet.jpg"));
    }

    #[test]
    fn test_cart_lists_lines_and_total() {
        let mut harness = Harness::signed_in(demo_products());
        harness.key(KeyCode::Char('a'));
        harness.key(KeyCode::Char('c'));
        assert!(harness.shows("Your Cart"));
        assert!(harness.shows("1x Red Shirt"));
        assert!(harness.shows("Total: $29.99"));

        harness.key(KeyCode::Char('x'));
        assert!(harness.shows("Your cart is empty."));
    }
}
