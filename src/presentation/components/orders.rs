use ratatui::{prelude::*, widgets::*};
use tui_widget_list::{ListBuilder, ListState, ListView};

use crate::{
    core::state::{screens::OrdersScreen, AppState},
    presentation::{config::keybindings::Action, widgets::OrderItem},
};

use super::{fetch_error, key_hints, placeholder, with_footer};

#[derive(Debug, Default)]
pub struct OrdersComponent;

impl OrdersComponent {
    pub fn view(&self, state: &AppState, screen: &OrdersScreen, frame: &mut Frame, area: Rect) {
        let styles = &state.config.config.styles;
        let orders = &state.orders.orders;
        let (body, footer) = with_footer(area);

        if screen.fetch.is_loading() {
            placeholder(frame, body, "Loading…", styles.get_style("primary"));
        } else if let Some(error) = screen.fetch.error() {
            fetch_error(state, error, frame, body);
        } else if orders.is_empty() {
            placeholder(
                frame,
                body,
                "No orders found!",
                styles.get_style("muted"),
            );
        } else {
            let items: Vec<OrderItem> = orders
                .iter()
                .map(|order| {
                    OrderItem::new(order, screen.is_expanded(&order.id)).styles(
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
                let height = item.height();
                (item, height)
            });
            let list = ListView::new(builder, count)
                .block(Block::default().padding(Padding::horizontal(1)));
            let mut list_state = ListState::default();
            list_state.select(screen.cursor.selected(count));
            frame.render_stateful_widget(list, body, &mut list_state);
        }

        frame.render_widget(
            Paragraph::new(key_hints(
                state,
                &[
                    (Action::Select, "details"),
                    (Action::Refresh, "reload"),
                    (Action::ToggleDrawer, "menu"),
                ],
            )),
            footer,
        );
    }
}
