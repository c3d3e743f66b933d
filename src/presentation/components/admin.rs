use ratatui::{prelude::*, widgets::*};

use crate::{
    core::state::{
        screens::{EditProductScreen, UserProductsScreen},
        AppState,
    },
    presentation::config::keybindings::Action,
};

use super::{catalog::view_product_list, fetch_error, key_hints, placeholder, view_form, with_footer};

#[derive(Debug, Default)]
pub struct UserProductsComponent;

impl UserProductsComponent {
    pub fn view(&self, state: &AppState, screen: &UserProductsScreen, frame: &mut Frame, area: Rect) {
        let styles = &state.config.config.styles;
        let products = &state.products.user_products;
        let (body, footer) = with_footer(area);

        if let Some(error) = screen.fetch.error() {
            fetch_error(state, error, frame, body);
        } else if screen.fetch.is_loading() && products.is_empty() {
            placeholder(frame, body, "Loading…", styles.get_style("primary"));
        } else if products.is_empty() {
            placeholder(
                frame,
                body,
                "No products found. Maybe start creating some!",
                styles.get_style("muted"),
            );
        } else {
            let selected = screen.cursor.selected(products.len());
            view_product_list(state, products, selected, frame, body);
        }

        let hints = if screen.delete.is_loading() {
            Line::styled("Deleting…", styles.get_style("primary"))
        } else {
            key_hints(
                state,
                &[
                    (Action::NewProduct, "add"),
                    (Action::EditProduct, "edit"),
                    (Action::DeleteProduct, "delete"),
                    (Action::ToggleDrawer, "menu"),
                ],
            )
        };
        frame.render_widget(Paragraph::new(hints), footer);
    }
}

#[derive(Debug, Default)]
pub struct EditProductComponent;

impl EditProductComponent {
    pub fn view(&self, state: &AppState, screen: &EditProductScreen, frame: &mut Frame, area: Rect) {
        let styles = &state.config.config.styles;
        let (body, footer) = with_footer(area);
        let block = Block::default().padding(Padding::horizontal(2));
        let inner = block.inner(body);
        frame.render_widget(block, body);
        view_form(state, &screen.form, frame, inner);

        let footer_line = if screen.submit.is_loading() {
            Line::styled("Saving…", styles.get_style("primary"))
        } else {
            Line::from(vec![
                Span::styled("ctrl-s", styles.get_style("accent")),
                Span::styled(" save  ", styles.get_style("muted")),
                Span::styled("tab", styles.get_style("accent")),
                Span::styled(" next field  ", styles.get_style("muted")),
                Span::styled("esc", styles.get_style("accent")),
                Span::styled(" cancel", styles.get_style("muted")),
            ])
        };
        frame.render_widget(Paragraph::new(footer_line), footer);
    }
}
