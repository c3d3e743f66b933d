use std::collections::BTreeSet;

use crate::{
    core::{
        cmd::ShopAction,
        msg::{screen::ScreenMsg, shop::ShopResponse},
        state::screens::{ListCursor, ScreenCtx},
    },
    domain::{request::AsyncSlot, shop::OrderId},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrdersScreen {
    pub fetch: AsyncSlot,
    pub cursor: ListCursor,
    /// Orders showing their line items
    pub expanded: BTreeSet<OrderId>,
}

impl OrdersScreen {
    pub fn mount(ctx: &mut ScreenCtx) -> Self {
        let mut screen = Self::default();
        ctx.dispatch.shop(&mut screen.fetch, ShopAction::FetchOrders);
        screen
    }

    pub fn is_expanded(&self, id: &OrderId) -> bool {
        self.expanded.contains(id)
    }

    pub fn update(&mut self, msg: ScreenMsg, ctx: &mut ScreenCtx) {
        let orders = &ctx.store.orders.orders;
        if self.cursor.update(&msg, orders.len()) {
            return;
        }
        match msg {
            ScreenMsg::Activate => {
                let Some(order) = self.cursor.selected(orders.len()).and_then(|i| orders.get(i)) else {
                    return;
                };
                if !self.expanded.remove(&order.id) {
                    self.expanded.insert(order.id.clone());
                }
            }
            ScreenMsg::Refresh => {
                ctx.dispatch.shop(&mut self.fetch, ShopAction::FetchOrders);
            }
            _ => {}
        }
    }

    pub fn settle(&mut self, response: &ShopResponse) -> bool {
        self.fetch.settle(response.request, response.outcome())
    }
}
