use ratatui::{prelude::*, widgets::*};

use crate::{
    core::state::{screens::Screen, AppState},
    domain::{navigation::Root, text::format_price},
};

/// Title of the focused route with the cart badge on the right
#[derive(Debug, Default)]
pub struct HeaderComponent;

impl HeaderComponent {
    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        let styles = &state.config.config.styles;
        let title = state
            .current_screen()
            .map(|(entry, screen)| match (screen, entry.params.product_title.as_deref()) {
                (Screen::EditProduct(edit), _) => edit.title().to_string(),
                (_, Some(title)) => title.to_string(),
                (_, None) => entry.route.title().to_string(),
            })
            .unwrap_or_default();

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {title}"), styles.get_style("title"))),
            area,
        );

        if state.nav.root() == Some(Root::Shop) {
            let badge = self.cart_badge(state);
            frame.render_widget(
                Paragraph::new(Span::styled(badge, styles.get_style("accent")))
                    .alignment(Alignment::Right),
                area,
            );
        }
    }

    pub fn cart_badge(&self, state: &AppState) -> String {
        let cart = &state.cart.cart;
        let count: u32 = cart.iter().map(|(_, item)| item.quantity).sum();
        format!("Cart: {count} | {} ", format_price(cart.total_amount()))
    }
}
